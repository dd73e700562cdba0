use std::collections::HashMap;
use std::hash::Hash;

/// All values that share one key, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyGroup<K, V> {
    pub key: K,
    pub values: Vec<V>,
}

/// Collapse `(key, value)` pairs into groups keyed by `key`.
///
/// Groups come out in first-seen key order and each group keeps its values
/// in input order. Repeated values are kept.
pub fn group_by_key<K, V, I>(pairs: I) -> Vec<KeyGroup<K, V>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, V)>,
{
    let mut groups: Vec<KeyGroup<K, V>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for (key, value) in pairs {
        match index.get(&key) {
            Some(&i) => groups[i].values.push(value),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(KeyGroup { key, values: vec![value] });
            }
        }
    }

    groups
}
