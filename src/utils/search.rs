//! Search filtering for item lists.

use crate::model::SchemaRecord;

/// Returns the items whose display name or description text contains
/// `query`, ignoring case, in their original order. An empty query keeps
/// every item.
///
pub fn filter<T: SchemaRecord + Clone>(items: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return items.to_vec();
    }
    let query_lower = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches(*item, &query_lower))
        .cloned()
        .collect()
}

fn matches<T: SchemaRecord>(item: &T, query_lower: &str) -> bool {
    item.display_name().to_lowercase().contains(query_lower)
        || item.description_text().to_lowercase().contains(query_lower)
}
