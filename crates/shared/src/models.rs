use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One filter dimension (e.g. "gender", "condition").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
}

/// One selectable option within a category (e.g. "men", "worn").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub id: String,
    pub label: String,
}

/// A point of interest as served by `/api/data`.
///
/// Everything except `position` defaults when absent so that one malformed
/// record cannot fail deserialization of a whole batch. A place without a
/// position cannot be put on the map and is skipped at layer-build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub id: String,
    /// `[latitude, longitude]`.
    pub position: Option<[f64; 2]>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Attribute-category name to list of values, e.g. `types -> [clothes]`.
    #[serde(default)]
    pub data: BTreeMap<String, Vec<String>>,
}

impl Place {
    /// Whether the place carries enough data to be rendered as a marker.
    pub fn is_renderable(&self) -> bool {
        self.position.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_deserializes() {
        let json = r#"{"id":"gender","label":"Gender"}"#;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert_eq!(cat.id, "gender");
        assert_eq!(cat.label, "Gender");
    }

    #[test]
    fn test_place_deserializes_full() {
        let json = r#"{
            "id": "c-17",
            "position": [51.1, 17.05],
            "title": "PCK container",
            "subtitle": "clothes container",
            "data": {"types": ["clothes"], "gender": ["men", "women"]}
        }"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.id, "c-17");
        assert_eq!(place.position, Some([51.1, 17.05]));
        assert_eq!(place.data["gender"], vec!["men", "women"]);
        assert!(place.is_renderable());
    }

    #[test]
    fn test_place_without_position_is_unrenderable() {
        let json = r#"{"id":"x","position":null,"title":"t","subtitle":"s"}"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert!(!place.is_renderable());
    }

    #[test]
    fn test_place_missing_fields_default() {
        // A bare record must not fail the whole batch
        let json = r#"[{"position":[1.0,2.0]},{"position":null}]"#;
        let places: Vec<Place> = serde_json::from_str(json).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].id, "");
        assert!(places[0].data.is_empty());
        assert!(!places[1].is_renderable());
    }
}
