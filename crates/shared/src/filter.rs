//! Filter query construction.
//!
//! The backend interprets repeated same-key params as OR within a category
//! and distinct keys as AND across categories, so the query for
//! `gender: [men, women]` + `condition: [worn]` is
//! `gender=men&gender=women&condition=worn`. Param order carries no
//! meaning server-side.

/// The checked value ids of one category, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedGroup {
    pub category_id: String,
    pub value_ids: Vec<String>,
}

impl CheckedGroup {
    pub fn new(category_id: impl Into<String>, value_ids: Vec<String>) -> Self {
        CheckedGroup {
            category_id: category_id.into(),
            value_ids,
        }
    }

    fn fragment(&self) -> Option<String> {
        if self.value_ids.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .value_ids
            .iter()
            .map(|v| format!("{}={}", self.category_id, v))
            .collect();
        Some(parts.join("&"))
    }
}

/// Build the query string for the currently checked boxes.
///
/// Categories with nothing checked contribute no fragment; nothing checked
/// anywhere yields the empty string (the caller then fetches unfiltered).
pub fn build_query(groups: &[CheckedGroup]) -> String {
    let fragments: Vec<String> = groups.iter().filter_map(CheckedGroup::fragment).collect();
    fragments.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(cat: &str, values: &[&str]) -> CheckedGroup {
        CheckedGroup::new(cat, values.iter().map(|v| v.to_string()).collect())
    }

    /// Split a query back into (category, value) pairs.
    fn pairs(query: &str) -> Vec<(String, String)> {
        if query.is_empty() {
            return vec![];
        }
        query
            .split('&')
            .map(|kv| {
                let (k, v) = kv.split_once('=').expect("param without '='");
                (k.to_string(), v.to_string())
            })
            .collect()
    }

    #[test]
    fn test_single_category_single_value() {
        let q = build_query(&[group("gender", &["men"])]);
        assert_eq!(q, "gender=men");
    }

    #[test]
    fn test_values_within_category_repeat_the_key() {
        let q = build_query(&[group("gender", &["men", "women"])]);
        assert_eq!(q, "gender=men&gender=women");
    }

    #[test]
    fn test_categories_join_with_ampersand() {
        let q = build_query(&[
            group("types", &["clothes"]),
            group("gender", &["men", "women"]),
            group("condition", &["worn"]),
        ]);
        assert_eq!(
            q,
            "types=clothes&gender=men&gender=women&condition=worn"
        );
    }

    #[test]
    fn test_empty_categories_contribute_nothing() {
        let q = build_query(&[
            group("types", &[]),
            group("gender", &["women"]),
            group("condition", &[]),
        ]);
        assert_eq!(q, "gender=women");
    }

    #[test]
    fn test_nothing_checked_is_empty_query() {
        assert_eq!(build_query(&[]), "");
        assert_eq!(build_query(&[group("types", &[]), group("gender", &[])]), "");
    }

    #[test]
    fn test_query_reconstructs_checked_pairs_regardless_of_order() {
        // Render order only affects param order, never the pair set
        let forward = [
            group("types", &["clothes", "shoes"]),
            group("gender", &["men"]),
        ];
        let reversed = [
            group("gender", &["men"]),
            group("types", &["shoes", "clothes"]),
        ];

        let mut a = pairs(&build_query(&forward));
        let mut b = pairs(&build_query(&reversed));
        a.sort();
        b.sort();
        assert_eq!(a, b);
        assert_eq!(
            a,
            vec![
                ("gender".to_string(), "men".to_string()),
                ("types".to_string(), "clothes".to_string()),
                ("types".to_string(), "shoes".to_string()),
            ]
        );
    }

    #[test]
    fn test_same_value_id_in_two_categories_stays_qualified() {
        // "unknown" exists in both categories; the pairs must stay distinct
        let q = build_query(&[
            group("gender", &["unknown"]),
            group("condition", &["unknown"]),
        ]);
        let got = pairs(&q);
        assert!(got.contains(&("gender".to_string(), "unknown".to_string())));
        assert!(got.contains(&("condition".to_string(), "unknown".to_string())));
        assert_eq!(got.len(), 2);
    }
}
