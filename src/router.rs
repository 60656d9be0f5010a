//! Router setup.

use axum::Json;
use axum::Router;
use axum::extract::OriginalUri;
use axum::http::{Method, StatusCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ErrorBody;
use crate::models::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Creates the API router.
pub fn api_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .merge(routes::system::routes())
        .merge(routes::google_play::routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    let router = if config.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

async fn not_found(method: Method, uri: OriginalUri) -> (StatusCode, Json<ErrorBody>) {
    let message = format!("Cannot {method} {}", uri.0.path());
    (StatusCode::NOT_FOUND, Json(ErrorBody::new(StatusCode::NOT_FOUND, message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fake::FakeProvider;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(provider: Arc<FakeProvider>) -> Router {
        api_router(AppState::new(provider), &ServerConfig::default())
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_search_without_term_is_rejected() {
        let provider = Arc::new(FakeProvider::new());
        let (status, body) = get(app(Arc::clone(&provider)), "/google-play/search").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "statusCode": 400,
                "message": "term query parameter is required",
                "error": "Bad Request"
            })
        );
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_passes_payload_through() {
        let payload = json!([{ "appId": "com.supercell.clashofclans", "title": "Clash of Clans" }]);
        let provider = Arc::new(FakeProvider::with_response(payload.clone()));
        let (status, body) = get(app(Arc::clone(&provider)), "/google-play/search?term=clash").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, payload);
        assert_eq!(provider.calls()[0].options, json!({ "term": "clash" }));
    }

    #[tokio::test]
    async fn test_list_resolves_collection() {
        let provider = Arc::new(FakeProvider::new());
        let (status, body) = get(app(provider), "/google-play/list?collection=top_free").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["operation"], "list");
        assert_eq!(body["options"]["collection"], "TOP_FREE");
    }

    #[tokio::test]
    async fn test_app_detail_uses_path_id() {
        let provider = Arc::new(FakeProvider::new());
        let (status, body) = get(
            app(provider),
            "/google-play/apps/com.supercell.clashofclans?lang=ko",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["operation"], "app");
        assert_eq!(body["id"], "com.supercell.clashofclans");
        assert_eq!(body["options"], json!({ "lang": "ko" }));
    }

    #[tokio::test]
    async fn test_blank_path_id_is_rejected() {
        let provider = Arc::new(FakeProvider::new());
        let (status, body) = get(app(Arc::clone(&provider)), "/google-play/apps/%20/similar").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "appId is required");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_nested_routes_reach_provider() {
        let cases = [
            ("/google-play/developers/Supercell/apps?num=5", "developer"),
            ("/google-play/apps/x.y/reviews?sort=rating", "reviews"),
            ("/google-play/apps/x.y/permissions?short=true", "permissions"),
            ("/google-play/apps/x.y/data-safety", "datasafety"),
            ("/google-play/suggest?term=cla", "suggest"),
        ];
        for (uri, operation) in cases {
            let (status, body) = get(app(Arc::new(FakeProvider::new())), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body["operation"], operation, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_reviews_sort_forwarded_as_number() {
        let provider = Arc::new(FakeProvider::new());
        let (_, body) = get(app(provider), "/google-play/apps/x.y/reviews?sort=helpfulness").await;
        assert_eq!(body["options"]["sort"], 1);
    }

    #[tokio::test]
    async fn test_invalid_enum_lists_keys() {
        let (status, body) = get(
            app(Arc::new(FakeProvider::new())),
            "/google-play/apps/x.y/reviews?sort=oldest",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "sort must be one of: NEWEST, RATING, HELPFULNESS");
    }

    #[tokio::test]
    async fn test_price_is_resolved_or_rejected() {
        let (status, body) = get(
            app(Arc::new(FakeProvider::new())),
            "/google-play/search?term=clash&price=FREE",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["options"]["price"], "free");

        let provider = Arc::new(FakeProvider::new());
        let (status, body) = get(
            app(Arc::clone(&provider)),
            "/google-play/search?term=clash&price=cheap",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "price must be one of: all, free, paid");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_full_detail_flag_on_every_route() {
        let routes = [
            "/google-play/search?term=clash&",
            "/google-play/list?",
            "/google-play/apps/x.y/similar?",
            "/google-play/developers/dev/apps?",
        ];
        for route in routes {
            let (status, body) =
                get(app(Arc::new(FakeProvider::new())), &format!("{route}fullDetail=1")).await;
            assert_eq!(status, StatusCode::OK, "{route}");
            assert_eq!(body["options"]["fullDetail"], true, "{route}");

            let (status, body) =
                get(app(Arc::new(FakeProvider::new())), &format!("{route}fullDetail=FALSE")).await;
            assert_eq!(status, StatusCode::OK, "{route}");
            assert_eq!(body["options"]["fullDetail"], false, "{route}");

            let provider = Arc::new(FakeProvider::new());
            let (status, body) =
                get(app(Arc::clone(&provider)), &format!("{route}fullDetail=maybe")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{route}");
            assert_eq!(body["message"], "fullDetail must be either true/false or 1/0");
            assert_eq!(provider.call_count(), 0, "{route}");
        }
    }

    #[tokio::test]
    async fn test_num_on_every_route() {
        let routes = [
            "/google-play/search?term=clash&",
            "/google-play/list?",
            "/google-play/apps/x.y/reviews?",
            "/google-play/developers/dev/apps?",
        ];
        for route in routes {
            let (status, body) =
                get(app(Arc::new(FakeProvider::new())), &format!("{route}num=25")).await;
            assert_eq!(status, StatusCode::OK, "{route}");
            assert_eq!(body["options"]["num"], 25, "{route}");

            let (status, body) =
                get(app(Arc::new(FakeProvider::new())), &format!("{route}num=2.5")).await;
            assert_eq!(status, StatusCode::OK, "{route}");
            assert_eq!(body["options"]["num"], 2.5, "{route}");

            let provider = Arc::new(FakeProvider::new());
            let (status, body) =
                get(app(Arc::clone(&provider)), &format!("{route}num=lots")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{route}");
            assert_eq!(body["message"], "num must be a valid number");
            assert_eq!(provider.call_count(), 0, "{route}");
        }
    }

    #[tokio::test]
    async fn test_paginate_and_short_flags() {
        let (_, body) = get(
            app(Arc::new(FakeProvider::new())),
            "/google-play/apps/x.y/reviews?paginate=true",
        )
        .await;
        assert_eq!(body["options"]["paginate"], true);

        let (status, body) = get(
            app(Arc::new(FakeProvider::new())),
            "/google-play/apps/x.y/permissions?short=2",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "short must be either true/false or 1/0");
    }

    #[tokio::test]
    async fn test_provider_failure_is_500() {
        let (status, body) = get(
            app(Arc::new(FakeProvider::failing())),
            "/google-play/search?term=clash",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["statusCode"], 500);
    }

    #[tokio::test]
    async fn test_vocabulary_listings() {
        let router = app(Arc::new(FakeProvider::new()));

        let (status, body) = get(router.clone(), "/google-play/collections").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "TOP_FREE": "TOP_FREE", "TOP_PAID": "TOP_PAID", "GROSSING": "GROSSING" })
        );

        let (_, body) = get(router.clone(), "/google-play/reviews/sort-options").await;
        assert_eq!(body, json!({ "NEWEST": 2, "RATING": 3, "HELPFULNESS": 1 }));

        let (_, body) = get(router, "/google-play/categories").await;
        assert_eq!(body["GAME_ACTION"], "GAME_ACTION");
    }

    #[tokio::test]
    async fn test_health_and_docs() {
        let router = app(Arc::new(FakeProvider::new()));

        let (status, body) = get(router.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));

        let (status, body) = get(router, "/api/docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "Game Crawler Data Service");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, body) = get(app(Arc::new(FakeProvider::new())), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Cannot GET /nope");
        assert_eq!(body["error"], "Not Found");
    }
}
