use askama::Template;

use crate::models::pagination::Pager;
use crate::models::{LogFilter, LogPage};
use super::PageContext;

#[derive(Template)]
#[template(path = "logs.html")]
pub struct LogsTemplate {
    pub ctx: PageContext,
    pub page: LogPage,
    pub filter: LogFilter,
    pub limit: u32,
    pub pager: Pager,
    pub export_csv_href: String,
    pub export_json_href: String,
    pub errors: Vec<String>,
}
