use serde::de::DeserializeOwned;
use spotfinder_shared::models::{Category, CategoryValue, Place};

/// Build the path for the places endpoint. An empty query targets the
/// unfiltered endpoint with no `?`.
pub fn data_path(query: &str) -> String {
    if query.is_empty() {
        "/api/data".to_string()
    } else {
        format!("/api/data?{}", query)
    }
}

/// Build the JSON body for a problem report.
///
/// The report endpoint requires `location`, `name` and `type`; the
/// user-entered text rides along as `description`.
pub fn build_report_payload(place: &Place, description: &str) -> serde_json::Value {
    serde_json::json!({
        "location": place.position,
        "name": place.title,
        "type": place.subtitle,
        "description": description,
    })
}

fn api_url(path: &str) -> String {
    // Same origin in production and in dev (the dev server proxies /api).
    let window = web_sys::window().unwrap();
    let origin = window.location().origin().unwrap();
    format!("{}{}", origin, path)
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let resp = reqwest::get(api_url(path))
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;
    resp.json().await.map_err(|e| e.to_string())
}

pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    get_json("/api/categories").await
}

pub async fn fetch_category_values(category_id: &str) -> Result<Vec<CategoryValue>, String> {
    get_json(&format!("/api/category/{}", category_id)).await
}

pub async fn fetch_places(query: &str) -> Result<Vec<Place>, String> {
    get_json(&data_path(query)).await
}

pub async fn fetch_languages() -> Result<Vec<String>, String> {
    get_json("/api/languages").await
}

pub async fn report_place(place: &Place, description: &str) -> Result<(), String> {
    let payload = build_report_payload(place, description);
    reqwest::Client::new()
        .post(api_url("/api/report-location"))
        .json(&payload)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Path builders ---

    #[test]
    fn test_data_path_unfiltered() {
        assert_eq!(data_path(""), "/api/data");
    }

    #[test]
    fn test_data_path_with_query() {
        assert_eq!(
            data_path("gender=men&condition=worn"),
            "/api/data?gender=men&condition=worn"
        );
    }

    // --- Report payload ---

    #[test]
    fn test_build_report_payload() {
        let place = Place {
            id: "c-17".to_string(),
            position: Some([51.1, 17.05]),
            title: "PCK container".to_string(),
            subtitle: "clothes container".to_string(),
            data: Default::default(),
        };
        let payload = build_report_payload(&place, "lid is broken");
        assert_eq!(payload["location"][0], 51.1);
        assert_eq!(payload["location"][1], 17.05);
        assert_eq!(payload["name"], "PCK container");
        assert_eq!(payload["type"], "clothes container");
        assert_eq!(payload["description"], "lid is broken");
    }

    #[test]
    fn test_build_report_payload_without_position() {
        let place = Place {
            id: String::new(),
            position: None,
            title: "x".to_string(),
            subtitle: String::new(),
            data: Default::default(),
        };
        let payload = build_report_payload(&place, "gone");
        assert!(payload["location"].is_null());
    }

    // --- Response deserialization (endpoint shapes) ---

    #[test]
    fn test_categories_deserialize() {
        let json = r#"[{"id":"types","label":"Types"},{"id":"gender","label":"Gender"}]"#;
        let cats: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].id, "types");
        assert_eq!(cats[1].label, "Gender");
    }

    #[test]
    fn test_category_values_deserialize() {
        let json = r#"[{"id":"men","label":"Men"},{"id":"women","label":"Women"}]"#;
        let values: Vec<CategoryValue> = serde_json::from_str(json).unwrap();
        assert_eq!(values[0].id, "men");
        assert_eq!(values[1].label, "Women");
    }

    #[test]
    fn test_places_deserialize() {
        let json = r#"[
            {"id":"a","position":[51.1,17.05],"title":"t","subtitle":"s",
             "data":{"types":["clothes"]}},
            {"id":"b","position":null,"title":"gone","subtitle":""}
        ]"#;
        let places: Vec<Place> = serde_json::from_str(json).unwrap();
        assert_eq!(places.len(), 2);
        assert!(places[0].is_renderable());
        assert!(!places[1].is_renderable());
    }

    #[test]
    fn test_languages_deserialize() {
        let json = r#"["en","pl","de"]"#;
        let langs: Vec<String> = serde_json::from_str(json).unwrap();
        assert_eq!(langs, vec!["en", "pl", "de"]);
    }
}
