use axum::{
    extract::{ConnectInfo, State},
    http::{Extensions, HeaderMap},
    Json,
};
use std::net::SocketAddr;

use crate::error::AppResult;
use crate::models::TrackedReleaseView;
use crate::state::AppState;

/// Client address for logging: first `X-Forwarded-For` hop, else the peer address
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// List tracked releases, soonest next check first
#[utoipa::path(
    get,
    path = "/show",
    tag = "tracked",
    responses(
        (status = 200, description = "Tracked releases", body = Vec<TrackedReleaseView>),
        (status = 500, description = "Store unavailable", body = String, content_type = "text/plain")
    )
)]
pub async fn show_tracked(
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
) -> AppResult<Json<Vec<TrackedReleaseView>>> {
    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(&headers, peer);
    let releases = state.tracked.list_all().await?;

    tracing::info!("Listing {} tracked releases for {}", releases.len(), ip);
    Ok(Json(releases.iter().map(TrackedReleaseView::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use crate::error::INTERNAL_ERROR_BODY;
    use crate::models::{Quality, Site, TrackedRelease};
    use crate::repositories::{StoreError, TrackedReader};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct FixedReader(Vec<TrackedRelease>);

    #[async_trait]
    impl TrackedReader for FixedReader {
        async fn list_all(&self) -> Result<Vec<TrackedRelease>, StoreError> {
            Ok(self.0.clone())
        }
    }

    struct FailingReader;

    #[async_trait]
    impl TrackedReader for FailingReader {
        async fn list_all(&self) -> Result<Vec<TrackedRelease>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }
    }

    fn release(name: &str, next_check: DateTime<Utc>) -> TrackedRelease {
        TrackedRelease {
            name: name.to_string(),
            site: Site::AnimeWorld,
            expected_episode: 7,
            quality: Quality::P720,
            next_check_not_before: next_check,
        }
    }

    async fn get_show(reader: Arc<dyn TrackedReader>) -> (StatusCode, Vec<u8>, Option<String>) {
        let (router, _) = create_router(AppState::new(reader));
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/show")
                    .header("x-forwarded-for", "203.0.113.9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec(), content_type)
    }

    #[tokio::test]
    async fn test_show_lists_releases() {
        let next_check = Utc.with_ymd_and_hms(2024, 10, 14, 18, 30, 0).unwrap();
        let reader = Arc::new(FixedReader(vec![
            release("Early", next_check),
            release("Late", next_check + Duration::days(1)),
        ]));

        let (status, body, _) = get_show(reader).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json[0],
            serde_json::json!({
                "name": "Early",
                "site": "animeworld",
                "date": next_check.with_timezone(&Local).to_rfc2822(),
                "episode": 7,
                "quality": "720p"
            })
        );
        assert_eq!(json[1]["name"], "Late");
    }

    #[tokio::test]
    async fn test_show_empty() {
        let (status, body, _) = get_show(Arc::new(FixedReader(Vec::new()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn test_show_store_error_is_plain_500() {
        let (status, body, content_type) = get_show(Arc::new(FailingReader)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, INTERNAL_ERROR_BODY.as_bytes());
        assert!(content_type.unwrap().starts_with("text/plain"));
    }

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let peer: Option<SocketAddr> = "192.0.2.1:5000".parse().ok();

        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, peer), "192.0.2.1");
        assert_eq!(client_ip(&headers, None), "unknown");

        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers, peer), "203.0.113.9");
    }
}
