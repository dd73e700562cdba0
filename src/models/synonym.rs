use super::grouping::{KeyGroup, group_by_key};

/// An alternate spelling or word that the retriever treats as `keyword`.
#[derive(Debug, Clone, PartialEq)]
pub struct Synonym {
    pub id: i64,
    pub keyword: String,
    pub synonym: String,
}

/// Group synonyms under their keyword, keeping table order.
pub fn group_by_keyword(synonyms: &[Synonym]) -> Vec<KeyGroup<String, Synonym>> {
    group_by_key(synonyms.iter().map(|s| (s.keyword.clone(), s.clone())))
}

/// `"a, b, c"` for display in read-only views.
pub fn joined(group: &KeyGroup<String, Synonym>) -> String {
    group
        .values
        .iter()
        .map(|s| s.synonym.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
