// Template context structures for Askama templates, one file per panel group.

use actix_session::Session;

use crate::models::tabs::{Tab, TabLink, tab_bar};
use crate::web::csrf;
use crate::web::flash::{take_flash, take_flash_error};

/// Common context shared by all panel pages.
/// Templates access these as `ctx.app_name`, `ctx.tabs`, etc.
pub struct PageContext {
    pub app_name: String,
    pub tabs: Vec<TabLink>,
    pub flash: Option<String>,
    pub flash_error: Option<String>,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, app_name: &str, active: Tab) -> Self {
        Self {
            app_name: app_name.to_string(),
            tabs: tab_bar(active),
            flash: take_flash(session),
            flash_error: take_flash_error(session),
            csrf_token: csrf::get_or_create_token(session),
        }
    }
}

mod answers;
mod complaints;
mod keywords;
mod logs;
mod stats;
mod users;

pub use self::answers::{OverrideEditTemplate, OverridesTemplate};
pub use self::complaints::{ComplaintRespondTemplate, ComplaintRow, ComplaintsTemplate};
pub use self::keywords::{PrioritiesTemplate, PriorityEditTemplate, SynonymsTemplate, TrainingTemplate};
pub use self::logs::LogsTemplate;
pub use self::stats::StatsTemplate;
pub use self::users::{RoleForm, UsersTemplate};
