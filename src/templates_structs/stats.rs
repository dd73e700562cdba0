use askama::Template;

use crate::models::StatsView;
use super::PageContext;

#[derive(Template)]
#[template(path = "stats.html")]
pub struct StatsTemplate {
    pub ctx: PageContext,
    /// `None` when the snapshot could not be loaded.
    pub stats: Option<StatsView>,
    pub errors: Vec<String>,
}
