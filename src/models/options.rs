//! Validated query option bags forwarded to the store provider.
//!
//! Every field is optional; unset fields are omitted when serialized so the
//! provider applies its own defaults.

use serde::Serialize;
use serde_json::Number;

use super::vocabulary::VocabValue;

/// Options for a term search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_detail: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<VocabValue>,
}

/// Options for a single app detail lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// Options for listing a developer's apps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_detail: Option<bool>,
}

/// Options for browsing a curated collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    pub collection: VocabValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<VocabValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_detail: Option<bool>,
}

/// Options for fetching reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<VocabValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paginate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_pagination_token: Option<String>,
}

/// Options for similar-app lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_detail: Option<bool>,
}

/// Options for permission listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<bool>,
}

/// Options for data safety lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSafetyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// Options for autocomplete suggestions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_are_omitted() {
        let options = SearchOptions {
            term: "clash".to_string(),
            full_detail: Some(true),
            ..SearchOptions::default()
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json, serde_json::json!({ "term": "clash", "fullDetail": true }));
    }

    #[test]
    fn test_reviews_token_is_camel_case() {
        let options = ReviewsOptions {
            sort: Some(VocabValue::Number(2)),
            next_pagination_token: Some("abc".to_string()),
            ..ReviewsOptions::default()
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["nextPaginationToken"], "abc");
        assert_eq!(json["sort"], 2);
    }
}
