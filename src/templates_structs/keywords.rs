use askama::Template;

use crate::models::grouping::KeyGroup;
use crate::models::{PriorityDoc, Synonym};
use super::PageContext;

#[derive(Template)]
#[template(path = "synonyms.html")]
pub struct SynonymsTemplate {
    pub ctx: PageContext,
    pub groups: Vec<KeyGroup<String, Synonym>>,
    pub keyword: String,
    pub synonym: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "priorities/list.html")]
pub struct PrioritiesTemplate {
    pub ctx: PageContext,
    pub priorities: Vec<PriorityDoc>,
    pub keyword: String,
    pub document_name: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "priorities/edit.html")]
pub struct PriorityEditTemplate {
    pub ctx: PageContext,
    pub priority: PriorityDoc,
    pub document_name: String,
    pub errors: Vec<String>,
}

/// Read-only view of what shapes retrieval: synonym groups and boosted documents.
#[derive(Template)]
#[template(path = "training.html")]
pub struct TrainingTemplate {
    pub ctx: PageContext,
    /// `(keyword, "syn1, syn2")`
    pub synonyms: Vec<(String, String)>,
    pub priorities: Vec<KeyGroup<String, String>>,
    pub errors: Vec<String>,
}
