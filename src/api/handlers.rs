//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::types::{ErrorResponse, ProfileRecord, SizeQuery};
use crate::profile::BusinessProfile;
use crate::report::SizingReport;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Lists the built-in profiles.
///
/// `GET /profiles` → 200 + `Vec<ProfileRecord>` JSON
pub async fn get_profiles() -> Json<Vec<ProfileRecord>> {
    Json(BusinessProfile::ALL.into_iter().map(ProfileRecord::from).collect())
}

/// Sizes one site.
///
/// `GET /size` → 200 + `SizingReport` for the Custom pre-filled load
/// `GET /size?profile=restaurant&backup_hours=48` → preset load, one override
/// `GET /size?daily_kwh=0` → 400 + `ErrorResponse`
/// `GET /size?daily_kwh=abc` → 400 + `ErrorResponse`
pub async fn get_size(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SizeQuery>, QueryRejection>,
) -> Result<Json<SizingReport>, ApiError> {
    let Query(query) = query.map_err(|e| bad_request(e.body_text()))?;
    let profile = match query.profile.as_deref() {
        Some(name) => BusinessProfile::from_name(name).map_err(|e| bad_request(e.to_string()))?,
        None => BusinessProfile::Custom,
    };
    let inputs = profile
        .resolve_inputs(query.daily_kwh, query.peak_kw)
        .map_err(|e| bad_request(e.to_string()))?;
    let configuration = query.overrides().apply_to(state.defaults);

    SizingReport::build(profile, inputs, configuration)
        .map(Json)
        .map_err(|e| bad_request(e.to_string()))
}

fn bad_request(error: String) -> ApiError {
    warn!(%error, "rejected sizing request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(Arc::new(AppState::default()));
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn profiles_returns_all_four() {
        let (status, json) = get_json("/profiles").await;
        assert_eq!(status, StatusCode::OK);
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[1]["slug"], "restaurant");
        assert_eq!(records[1]["daily_energy_usage_kwh"], 200.0);
    }

    #[tokio::test]
    async fn size_defaults_to_custom() {
        let (status, json) = get_json("/size").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["profile"], "custom");
        assert_eq!(json["result"]["battery_capacity_kwh"], 172.5);
        assert_eq!(json["result"]["solar_capacity_kw"], 27.6);
        assert_eq!(json["result"]["inverter_size_kw"], 20.7);
    }

    #[tokio::test]
    async fn size_preset_with_override() {
        let (status, json) = get_json("/size?profile=restaurant&backup_hours=48").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["configuration"]["backup_hours"], 48.0);
        assert_eq!(json["result"]["battery_capacity_kwh"], 690.0);
        assert_eq!(json["result"]["inverter_size_kw"], 34.5);
    }

    #[tokio::test]
    async fn size_zero_usage_returns_400() {
        let (status, json) = get_json("/size?daily_kwh=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .contains("daily_energy_usage_kwh")
        );
    }

    #[tokio::test]
    async fn size_non_numeric_query_returns_json_400() {
        let (status, json) = get_json("/size?daily_kwh=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!json["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn size_unknown_profile_returns_400() {
        let (status, json) = get_json("/size?profile=bakery").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("unknown profile"));
    }
}
