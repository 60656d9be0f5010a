//! Google Play endpoints.
//!
//! Each handler validates its query string into an option bag, then hands it
//! to [`GooglePlayService`](crate::services::GooglePlayService). Provider
//! payloads are returned unmodified.

use std::collections::HashMap;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use serde_json::Value;

use crate::error::Result;
use crate::models::{
    AppOptions, DEFAULT_COLLECTION, DataSafetyOptions, DeveloperOptions, ListOptions,
    PermissionsOptions, ReviewsOptions, SearchOptions, SimilarOptions, SuggestOptions, VocabValue,
    Vocabularies, Vocabulary,
};
use crate::services::QueryParams;
use crate::services::validate;
use crate::state::AppState;

const TERM_REQUIRED: &str = "term query parameter is required";

type RawQuery = Query<HashMap<String, String>>;

/// Google Play route group.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/google-play/search", get(search_apps))
        .route("/google-play/apps/:appId", get(get_app_details))
        .route("/google-play/developers/:devId/apps", get(get_developer_apps))
        .route("/google-play/list", get(list_apps))
        .route("/google-play/apps/:appId/reviews", get(get_app_reviews))
        .route("/google-play/apps/:appId/similar", get(get_similar_apps))
        .route("/google-play/apps/:appId/permissions", get(get_app_permissions))
        .route("/google-play/apps/:appId/data-safety", get(get_app_data_safety))
        .route("/google-play/suggest", get(suggest_apps))
        .route("/google-play/collections", get(get_collections))
        .route("/google-play/categories", get(get_categories))
        .route("/google-play/reviews/sort-options", get(get_sort_options))
}

// ============================================================================
// Option builders
// ============================================================================

pub(crate) fn search_options(q: &QueryParams, vocab: &Vocabularies) -> Result<SearchOptions> {
    Ok(SearchOptions {
        term: q.required_with("term", TERM_REQUIRED)?,
        num: q.number("num")?,
        country: q.optional("country"),
        lang: q.optional("lang"),
        full_detail: q.boolean("fullDetail")?,
        price: q.enumeration(&vocab.price, "price")?,
    })
}

pub(crate) fn app_options(q: &QueryParams) -> AppOptions {
    AppOptions {
        country: q.optional("country"),
        lang: q.optional("lang"),
    }
}

pub(crate) fn developer_options(q: &QueryParams) -> Result<DeveloperOptions> {
    Ok(DeveloperOptions {
        num: q.number("num")?,
        country: q.optional("country"),
        lang: q.optional("lang"),
        full_detail: q.boolean("fullDetail")?,
    })
}

pub(crate) fn list_options(q: &QueryParams, vocab: &Vocabularies) -> Result<ListOptions> {
    let collection = match q.enumeration(&vocab.collection, "collection")? {
        Some(value) => value,
        None => vocab
            .collection
            .get(DEFAULT_COLLECTION)
            .cloned()
            .unwrap_or_else(|| VocabValue::text(DEFAULT_COLLECTION)),
    };

    Ok(ListOptions {
        collection,
        category: q.enumeration(&vocab.category, "category")?,
        num: q.number("num")?,
        country: q.optional("country"),
        lang: q.optional("lang"),
        full_detail: q.boolean("fullDetail")?,
    })
}

pub(crate) fn reviews_options(q: &QueryParams, vocab: &Vocabularies) -> Result<ReviewsOptions> {
    Ok(ReviewsOptions {
        sort: q.enumeration(&vocab.sort, "sort")?,
        num: q.number("num")?,
        country: q.optional("country"),
        lang: q.optional("lang"),
        paginate: q.boolean("paginate")?,
        next_pagination_token: q.optional("nextPaginationToken"),
    })
}

pub(crate) fn similar_options(q: &QueryParams) -> Result<SimilarOptions> {
    Ok(SimilarOptions {
        country: q.optional("country"),
        lang: q.optional("lang"),
        full_detail: q.boolean("fullDetail")?,
    })
}

pub(crate) fn permissions_options(q: &QueryParams) -> Result<PermissionsOptions> {
    Ok(PermissionsOptions {
        lang: q.optional("lang"),
        short: q.boolean("short")?,
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /google-play/search`
#[utoipa::path(
    get,
    path = "/google-play/search",
    tag = "google-play",
    params(
        ("term" = String, Query, description = "Search term"),
        ("num" = Option<f64>, Query, description = "Number of results"),
        ("country" = Option<String>, Query, description = "Two letter country code"),
        ("lang" = Option<String>, Query, description = "Two letter language code"),
        ("fullDetail" = Option<bool>, Query, description = "Fetch full app detail"),
        ("price" = Option<String>, Query, description = "all, free or paid"),
    ),
    responses(
        (status = 200, description = "Search results", body = Object),
        (status = 400, description = "Invalid query", body = crate::error::ErrorBody),
        (status = 500, description = "Provider failure", body = crate::error::ErrorBody),
    )
)]
pub async fn search_apps(
    State(state): State<AppState>,
    Query(query): RawQuery,
) -> Result<Json<Value>> {
    let options = search_options(&query.into(), state.service.vocabularies())?;
    Ok(Json(state.service.search_apps(&options).await?))
}

/// `GET /google-play/apps/{appId}`
#[utoipa::path(
    get,
    path = "/google-play/apps/{appId}",
    tag = "google-play",
    params(
        ("appId" = String, Path, description = "Package name"),
        ("country" = Option<String>, Query, description = "Two letter country code"),
        ("lang" = Option<String>, Query, description = "Two letter language code"),
    ),
    responses(
        (status = 200, description = "App detail", body = Object),
        (status = 400, description = "Invalid query", body = crate::error::ErrorBody),
        (status = 500, description = "Provider failure", body = crate::error::ErrorBody),
    )
)]
pub async fn get_app_details(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Query(query): RawQuery,
) -> Result<Json<Value>> {
    let app_id = validate::required(Some(&app_id), "appId")?;
    let options = app_options(&query.into());
    Ok(Json(state.service.get_app_details(&app_id, &options).await?))
}

/// `GET /google-play/developers/{devId}/apps`
#[utoipa::path(
    get,
    path = "/google-play/developers/{devId}/apps",
    tag = "google-play",
    params(
        ("devId" = String, Path, description = "Developer id or name"),
        ("num" = Option<f64>, Query, description = "Number of results"),
        ("country" = Option<String>, Query, description = "Two letter country code"),
        ("lang" = Option<String>, Query, description = "Two letter language code"),
        ("fullDetail" = Option<bool>, Query, description = "Fetch full app detail"),
    ),
    responses(
        (status = 200, description = "Developer apps", body = Object),
        (status = 400, description = "Invalid query", body = crate::error::ErrorBody),
        (status = 500, description = "Provider failure", body = crate::error::ErrorBody),
    )
)]
pub async fn get_developer_apps(
    State(state): State<AppState>,
    Path(dev_id): Path<String>,
    Query(query): RawQuery,
) -> Result<Json<Value>> {
    let dev_id = validate::required(Some(&dev_id), "devId")?;
    let options = developer_options(&query.into())?;
    Ok(Json(state.service.get_developer_apps(&dev_id, &options).await?))
}

/// `GET /google-play/list`
#[utoipa::path(
    get,
    path = "/google-play/list",
    tag = "google-play",
    params(
        ("collection" = Option<String>, Query, description = "Collection, defaults to TOP_FREE"),
        ("category" = Option<String>, Query, description = "Category key"),
        ("num" = Option<f64>, Query, description = "Number of results"),
        ("country" = Option<String>, Query, description = "Two letter country code"),
        ("lang" = Option<String>, Query, description = "Two letter language code"),
        ("fullDetail" = Option<bool>, Query, description = "Fetch full app detail"),
    ),
    responses(
        (status = 200, description = "Collection listing", body = Object),
        (status = 400, description = "Invalid query", body = crate::error::ErrorBody),
        (status = 500, description = "Provider failure", body = crate::error::ErrorBody),
    )
)]
pub async fn list_apps(
    State(state): State<AppState>,
    Query(query): RawQuery,
) -> Result<Json<Value>> {
    let options = list_options(&query.into(), state.service.vocabularies())?;
    Ok(Json(state.service.list_apps(&options).await?))
}

/// `GET /google-play/apps/{appId}/reviews`
#[utoipa::path(
    get,
    path = "/google-play/apps/{appId}/reviews",
    tag = "google-play",
    params(
        ("appId" = String, Path, description = "Package name"),
        ("sort" = Option<String>, Query, description = "NEWEST, RATING or HELPFULNESS"),
        ("num" = Option<f64>, Query, description = "Number of reviews"),
        ("country" = Option<String>, Query, description = "Two letter country code"),
        ("lang" = Option<String>, Query, description = "Two letter language code"),
        ("paginate" = Option<bool>, Query, description = "Return a pagination token"),
        ("nextPaginationToken" = Option<String>, Query, description = "Token from a previous page"),
    ),
    responses(
        (status = 200, description = "Reviews", body = Object),
        (status = 400, description = "Invalid query", body = crate::error::ErrorBody),
        (status = 500, description = "Provider failure", body = crate::error::ErrorBody),
    )
)]
pub async fn get_app_reviews(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Query(query): RawQuery,
) -> Result<Json<Value>> {
    let app_id = validate::required(Some(&app_id), "appId")?;
    let options = reviews_options(&query.into(), state.service.vocabularies())?;
    Ok(Json(state.service.get_app_reviews(&app_id, &options).await?))
}

/// `GET /google-play/apps/{appId}/similar`
#[utoipa::path(
    get,
    path = "/google-play/apps/{appId}/similar",
    tag = "google-play",
    params(
        ("appId" = String, Path, description = "Package name"),
        ("country" = Option<String>, Query, description = "Two letter country code"),
        ("lang" = Option<String>, Query, description = "Two letter language code"),
        ("fullDetail" = Option<bool>, Query, description = "Fetch full app detail"),
    ),
    responses(
        (status = 200, description = "Similar apps", body = Object),
        (status = 400, description = "Invalid query", body = crate::error::ErrorBody),
        (status = 500, description = "Provider failure", body = crate::error::ErrorBody),
    )
)]
pub async fn get_similar_apps(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Query(query): RawQuery,
) -> Result<Json<Value>> {
    let app_id = validate::required(Some(&app_id), "appId")?;
    let options = similar_options(&query.into())?;
    Ok(Json(state.service.get_similar_apps(&app_id, &options).await?))
}

/// `GET /google-play/apps/{appId}/permissions`
#[utoipa::path(
    get,
    path = "/google-play/apps/{appId}/permissions",
    tag = "google-play",
    params(
        ("appId" = String, Path, description = "Package name"),
        ("lang" = Option<String>, Query, description = "Two letter language code"),
        ("short" = Option<bool>, Query, description = "Return permission names only"),
    ),
    responses(
        (status = 200, description = "Permissions", body = Object),
        (status = 400, description = "Invalid query", body = crate::error::ErrorBody),
        (status = 500, description = "Provider failure", body = crate::error::ErrorBody),
    )
)]
pub async fn get_app_permissions(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Query(query): RawQuery,
) -> Result<Json<Value>> {
    let app_id = validate::required(Some(&app_id), "appId")?;
    let options = permissions_options(&query.into())?;
    Ok(Json(state.service.get_app_permissions(&app_id, &options).await?))
}

/// `GET /google-play/apps/{appId}/data-safety`
#[utoipa::path(
    get,
    path = "/google-play/apps/{appId}/data-safety",
    tag = "google-play",
    params(
        ("appId" = String, Path, description = "Package name"),
        ("lang" = Option<String>, Query, description = "Two letter language code"),
    ),
    responses(
        (status = 200, description = "Data safety section", body = Object),
        (status = 400, description = "Invalid query", body = crate::error::ErrorBody),
        (status = 500, description = "Provider failure", body = crate::error::ErrorBody),
    )
)]
pub async fn get_app_data_safety(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Query(query): RawQuery,
) -> Result<Json<Value>> {
    let app_id = validate::required(Some(&app_id), "appId")?;
    let query = QueryParams::from(query);
    let options = DataSafetyOptions {
        lang: query.optional("lang"),
    };
    Ok(Json(state.service.get_app_data_safety(&app_id, &options).await?))
}

/// `GET /google-play/suggest`
#[utoipa::path(
    get,
    path = "/google-play/suggest",
    tag = "google-play",
    params(
        ("term" = String, Query, description = "Partial search term"),
        ("country" = Option<String>, Query, description = "Two letter country code"),
        ("lang" = Option<String>, Query, description = "Two letter language code"),
    ),
    responses(
        (status = 200, description = "Suggestions", body = Object),
        (status = 400, description = "Invalid query", body = crate::error::ErrorBody),
        (status = 500, description = "Provider failure", body = crate::error::ErrorBody),
    )
)]
pub async fn suggest_apps(
    State(state): State<AppState>,
    Query(query): RawQuery,
) -> Result<Json<Value>> {
    let query = QueryParams::from(query);
    let term = query.required_with("term", TERM_REQUIRED)?;
    let options = SuggestOptions {
        country: query.optional("country"),
        lang: query.optional("lang"),
    };
    Ok(Json(state.service.suggest_apps(&term, &options).await?))
}

/// `GET /google-play/collections`
#[utoipa::path(
    get,
    path = "/google-play/collections",
    tag = "google-play",
    responses((status = 200, description = "Collection constants", body = Object))
)]
pub async fn get_collections(State(state): State<AppState>) -> Json<Vocabulary> {
    Json(state.service.get_collections().clone())
}

/// `GET /google-play/categories`
#[utoipa::path(
    get,
    path = "/google-play/categories",
    tag = "google-play",
    responses((status = 200, description = "Category constants", body = Object))
)]
pub async fn get_categories(State(state): State<AppState>) -> Json<Vocabulary> {
    Json(state.service.get_categories().clone())
}

/// `GET /google-play/reviews/sort-options`
#[utoipa::path(
    get,
    path = "/google-play/reviews/sort-options",
    tag = "google-play",
    responses((status = 200, description = "Review sort constants", body = Object))
)]
pub async fn get_sort_options(State(state): State<AppState>) -> Json<Vocabulary> {
    Json(state.service.get_sort_options().clone())
}
