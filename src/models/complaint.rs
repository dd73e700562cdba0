#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintStatus {
    Pending,
    Resolved,
    Rejected,
}

impl ComplaintStatus {
    /// Missing or unknown statuses are treated as still pending.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
            Some("RESOLVED") => ComplaintStatus::Resolved,
            Some("REJECTED") => ComplaintStatus::Rejected,
            _ => ComplaintStatus::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::Resolved => "Resolved",
            ComplaintStatus::Rejected => "Rejected",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "badge badge-danger",
            ComplaintStatus::Resolved => "badge badge-success",
            ComplaintStatus::Rejected => "badge badge-warning",
        }
    }
}

/// A user-flagged answer awaiting operator review.
#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    pub id: i64,
    pub user_id: Option<i64>,
    pub username: String,
    pub question: String,
    pub answer: String,
    pub complaint: String,
    pub status: ComplaintStatus,
}

impl Complaint {
    /// Only pending complaints can still be answered by hand.
    pub fn can_respond(&self) -> bool {
        self.status == ComplaintStatus::Pending
    }
}
