use super::grouping::{KeyGroup, group_by_key};

/// A document boosted in retrieval whenever `keyword` appears in a question.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityDoc {
    pub id: i64,
    pub keyword: String,
    pub document_name: String,
}

pub fn group_by_keyword(docs: &[PriorityDoc]) -> Vec<KeyGroup<String, String>> {
    group_by_key(docs.iter().map(|d| (d.keyword.clone(), d.document_name.clone())))
}
