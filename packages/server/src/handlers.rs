//! HTTP handler functions for the violation search API.

use actix_web::{HttpResponse, web};
use nyc_violations_server_models::{
    ApiBorough, ApiDataset, ApiError, ApiHealth, ApiSearchResponse, ViolationSearchParams,
};
use nyc_violations_source::{SearchError, search};
use nyc_violations_violation_models::Borough;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/boroughs`
///
/// Lists the boroughs accepted by the `borough` search parameter.
pub async fn boroughs() -> HttpResponse {
    let boroughs: Vec<ApiBorough> = Borough::all()
        .iter()
        .copied()
        .map(ApiBorough::from)
        .collect();
    HttpResponse::Ok().json(boroughs)
}

/// `GET /api/datasets`
pub async fn datasets(state: web::Data<AppState>) -> HttpResponse {
    let datasets: Vec<ApiDataset> = state
        .datasets
        .iter()
        .map(|d| ApiDataset::new(d, &state.default_dataset))
        .collect();
    HttpResponse::Ok().json(datasets)
}

/// `GET /api/violations`
///
/// Searches one dataset by plate (plus optional state, date range and
/// borough) and returns the normalized, filtered violations.
pub async fn violations(
    state: web::Data<AppState>,
    params: web::Query<ViolationSearchParams>,
) -> HttpResponse {
    let mut params = params.into_inner();
    let dataset = params.dataset.take();

    let Some(source) = state.source(dataset.as_deref()) else {
        let dataset = dataset.unwrap_or_default();
        log::warn!("Search requested unknown dataset {dataset:?}");
        return HttpResponse::NotFound()
            .json(ApiError::new(format!("unknown dataset {dataset:?}")));
    };

    match search(source.as_ref(), params.into()).await {
        Ok(results) => HttpResponse::Ok().json(ApiSearchResponse::new(source.id(), results)),
        Err(SearchError::Query(e)) => {
            log::warn!("Rejected search: {e}");
            HttpResponse::BadRequest().json(ApiError::new(e))
        }
        Err(SearchError::Source(e)) => {
            log::error!("Failed to fetch violations from {}: {e}", source.id());
            HttpResponse::BadGateway().json(ApiError::new("Failed to fetch violations"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use async_trait::async_trait;
    use nyc_violations_source::registry::{DEFAULT_DATASET_ID, all_datasets};
    use nyc_violations_source::{SearchQuery, SourceError, ViolationSource};
    use serde_json::{Value, json};

    use super::*;
    use crate::configure_api;

    struct StaticSource(Vec<Value>);

    #[async_trait]
    impl ViolationSource for StaticSource {
        fn id(&self) -> &'static str {
            DEFAULT_DATASET_ID
        }

        fn name(&self) -> &'static str {
            "Static"
        }

        async fn fetch(&self, _query: &SearchQuery) -> Result<Vec<Value>, SourceError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ViolationSource for FailingSource {
        fn id(&self) -> &'static str {
            "failing"
        }

        fn name(&self) -> &'static str {
            "Failing"
        }

        async fn fetch(&self, _query: &SearchQuery) -> Result<Vec<Value>, SourceError> {
            Err(SourceError::Status {
                status: 503,
                url: "https://example.invalid".to_string(),
            })
        }
    }

    fn state() -> web::Data<AppState> {
        let mut sources: BTreeMap<String, Arc<dyn ViolationSource>> = BTreeMap::new();
        sources.insert(
            DEFAULT_DATASET_ID.to_string(),
            Arc::new(StaticSource(vec![
                json!({
                    "summons_number": "1",
                    "plate": "ABC1234",
                    "county": "K",
                    "violation_time": "0730A",
                }),
                json!({"summons_number": "2", "plate": "ABC1234", "county": "NY"}),
                json!({"summons_number": "3", "plate": "ABC1234", "county": "BK"}),
            ])),
        );
        sources.insert("failing".to_string(), Arc::new(FailingSource));
        web::Data::new(AppState {
            sources,
            datasets: all_datasets(),
            default_dataset: DEFAULT_DATASET_ID.to_string(),
        })
    }

    #[allow(clippy::future_not_send)]
    async fn get(uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(App::new().app_data(state()).configure(configure_api)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let (status, body) = get("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn lists_boroughs_and_datasets() {
        let (_, boroughs) = get("/api/boroughs").await;
        assert_eq!(boroughs.as_array().unwrap().len(), 5);
        assert_eq!(boroughs[4]["name"], "STATEN ISLAND");

        let (_, datasets) = get("/api/datasets").await;
        let datasets = datasets.as_array().unwrap();
        assert_eq!(datasets.len(), all_datasets().len());
        assert_eq!(
            datasets.iter().filter(|d| d["isDefault"] == true).count(),
            1
        );
    }

    #[actix_web::test]
    async fn searches_default_dataset_with_borough_filter() {
        let (status, body) = get("/api/violations?plate=abc1234&borough=Brooklyn").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dataset"], DEFAULT_DATASET_ID);
        assert_eq!(body["count"], 2);
        assert_eq!(body["violations"][0]["summons_number"], "1");
        assert_eq!(body["violations"][0]["violation_time"], "0730A");
        assert_eq!(body["violations"][1]["violation_county"], "BK");
    }

    #[actix_web::test]
    async fn all_boroughs_returns_everything() {
        let (status, body) = get("/api/violations?plate=ABC1234&borough=All%20Boroughs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 3);
    }

    #[actix_web::test]
    async fn unrecognized_borough_returns_empty_result() {
        let (status, body) = get("/api/violations?plate=ABC1234&borough=Atlantis").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
        assert_eq!(body["violations"], json!([]));
    }

    #[actix_web::test]
    async fn missing_plate_is_bad_request() {
        let (status, body) = get("/api/violations?borough=Queens").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "a license plate is required");
    }

    #[actix_web::test]
    async fn blank_dataset_uses_default_source() {
        let (status, body) = get("/api/violations?plate=ABC1234&dataset=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dataset"], DEFAULT_DATASET_ID);
        assert_eq!(body["count"], 3);
    }

    #[actix_web::test]
    async fn unknown_dataset_is_not_found() {
        let (status, _) = get("/api/violations?plate=ABC&dataset=nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn upstream_failure_is_bad_gateway() {
        let (status, body) = get("/api/violations?plate=ABC&dataset=failing").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Failed to fetch violations");
    }
}
