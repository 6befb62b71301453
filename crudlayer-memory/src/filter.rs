//! Filter matching for the in-memory store.
//!
//! Filters follow the opaque `{field: matchCriterion}` contract: a stored
//! document matches when every filter field equals the corresponding
//! document field. An empty filter matches everything.

use bson::{Bson, Document};

/// Returns true when `document` satisfies every field of `filter`.
pub(crate) fn matches(document: &Bson, filter: &Document) -> bool {
    let Some(doc) = document.as_document() else {
        return filter.is_empty();
    };

    filter
        .iter()
        .all(|(field, criterion)| doc.get(field).is_some_and(|value| values_equal(value, criterion)))
}

/// Equality across the numeric BSON types, exact equality otherwise, so a
/// filter built with an i32 literal still matches a stored i64.
fn values_equal(left: &Bson, right: &Bson) -> bool {
    match (as_f64(left), as_f64(right)) {
        (Some(l), Some(r)) => l == r,
        _ => left == right,
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(*v as f64),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn empty_filter_matches_everything() {
        let document = Bson::Document(doc! { "name": "Alice" });
        assert!(matches(&document, &doc! {}));
    }

    #[test]
    fn all_filter_fields_must_match() {
        let document = Bson::Document(doc! { "name": "Alice", "active": true });

        assert!(matches(&document, &doc! { "name": "Alice" }));
        assert!(matches(&document, &doc! { "name": "Alice", "active": true }));
        assert!(!matches(&document, &doc! { "name": "Alice", "active": false }));
        assert!(!matches(&document, &doc! { "missing": "field" }));
    }

    #[test]
    fn numeric_types_compare_across_widths() {
        let document = Bson::Document(doc! { "stock": 7i64 });
        assert!(matches(&document, &doc! { "stock": 7i32 }));
    }
}
