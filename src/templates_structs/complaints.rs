use askama::Template;

use crate::models::Complaint;
use super::PageContext;

/// A complaint plus the link that opens the manual-answer form pre-filled
/// with its question and answer.
pub struct ComplaintRow {
    pub complaint: Complaint,
    pub override_href: String,
}

#[derive(Template)]
#[template(path = "complaints/list.html")]
pub struct ComplaintsTemplate {
    pub ctx: PageContext,
    pub rows: Vec<ComplaintRow>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "complaints/respond.html")]
pub struct ComplaintRespondTemplate {
    pub ctx: PageContext,
    pub complaint: Complaint,
    /// Pre-filled with the bot's answer, or the operator's last submission.
    pub manual_response: String,
    pub errors: Vec<String>,
}
