use askama::Template;

use crate::models::{AnswerOverride, OverrideDraft};
use super::PageContext;

#[derive(Template)]
#[template(path = "overrides/list.html")]
pub struct OverridesTemplate {
    pub ctx: PageContext,
    pub overrides: Vec<AnswerOverride>,
    pub draft: OverrideDraft,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "overrides/edit.html")]
pub struct OverrideEditTemplate {
    pub ctx: PageContext,
    pub id: i64,
    pub draft: OverrideDraft,
    pub errors: Vec<String>,
}
