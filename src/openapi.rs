//! `OpenAPI` document for the HTTP surface.

use std::sync::OnceLock;

use utoipa::OpenApi;

/// `OpenAPI` documentation for the game crawler API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Game Crawler Data Service",
        description = "Google Play data exposed over REST, backed by a store data provider."
    ),
    paths(
        crate::routes::system::health,
        crate::routes::system::get_openapi_json,
        crate::routes::google_play::search_apps,
        crate::routes::google_play::get_app_details,
        crate::routes::google_play::get_developer_apps,
        crate::routes::google_play::list_apps,
        crate::routes::google_play::get_app_reviews,
        crate::routes::google_play::get_similar_apps,
        crate::routes::google_play::get_app_permissions,
        crate::routes::google_play::get_app_data_safety,
        crate::routes::google_play::suggest_apps,
        crate::routes::google_play::get_collections,
        crate::routes::google_play::get_categories,
        crate::routes::google_play::get_sort_options,
    ),
    components(schemas(crate::error::ErrorBody, crate::routes::system::Health)),
    tags(
        (name = "google-play", description = "Google Play store data"),
        (name = "system", description = "Health and API description"),
    ),
)]
pub struct ApiDoc;

/// Returns the generated `OpenAPI` document.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

static OPENAPI_JSON: OnceLock<String> = OnceLock::new();

/// Returns the document serialized as pretty JSON, cached after first use.
pub fn openapi_json() -> Result<String, serde_json::Error> {
    if let Some(spec) = OPENAPI_JSON.get() {
        return Ok(spec.clone());
    }
    let spec = serde_json::to_string_pretty(&openapi())?;
    Ok(OPENAPI_JSON.get_or_init(|| spec).clone())
}
