pub mod answer_override;
pub mod complaint;
pub mod grouping;
pub mod log_entry;
pub mod pagination;
pub mod panel;
pub mod priority;
pub mod stats;
pub mod synonym;
pub mod tabs;
pub mod user_role;

pub use answer_override::{AnswerOverride, OverrideDraft};
pub use complaint::{Complaint, ComplaintStatus};
pub use log_entry::{ExportFile, ExportFormat, LogEntry, LogFilter, LogPage, LogQuery};
pub use panel::PanelState;
pub use priority::PriorityDoc;
pub use stats::{StatsSnapshot, StatsView, TopQuestion};
pub use synonym::Synonym;
pub use user_role::UserRole;
