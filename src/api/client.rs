//! Analytics Backend Client
//!
//! HTTP client for the prediction/metrics service.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::model::{AttritionPrediction, DepartmentMetrics, Employee, TrendPoint};

use super::error::{ApiError, ApiResult};
use super::response::CheckResponse;

pub const DEPARTMENT_METRICS_PATH: &str = "/metrics/departments";
pub const ATTRITION_TRENDS_PATH: &str = "/metrics/trends";
pub const PREDICT_ATTRITION_PATH: &str = "/predict/attrition";

/// Header carrying a per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Operations the dashboard needs from the backend
///
/// Futures are not `Send`: the dashboard runs on a single-threaded event
/// loop (browser or current-thread runtime).
#[async_trait(?Send)]
pub trait AttritionApi {
    /// `GET /metrics/departments`
    async fn fetch_department_metrics(&self) -> ApiResult<Vec<DepartmentMetrics>>;

    /// `POST /predict/attrition`
    async fn predict_attrition(&self, employee: &Employee) -> ApiResult<AttritionPrediction>;

    /// `GET /metrics/trends`
    async fn fetch_attrition_trends(&self) -> ApiResult<Vec<TrendPoint>>;
}

/// reqwest-backed implementation of [`AttritionApi`]
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    /// Create a new client for the configured backend
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.normalized_base_url().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T>(&self, method: &'static str, path: &str, request: RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned + CheckResponse,
    {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(%method, %path, %request_id, "Sending backend request");

        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(%method, %path, %request_id, status = status.as_u16(), "Backend returned an error");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body: T = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        body.checked()
    }
}

#[async_trait(?Send)]
impl AttritionApi for HttpApiClient {
    async fn fetch_department_metrics(&self) -> ApiResult<Vec<DepartmentMetrics>> {
        let url = self.url(DEPARTMENT_METRICS_PATH);
        self.send("GET", DEPARTMENT_METRICS_PATH, self.client.get(&url))
            .await
    }

    async fn predict_attrition(&self, employee: &Employee) -> ApiResult<AttritionPrediction> {
        let url = self.url(PREDICT_ATTRITION_PATH);
        self.send("POST", PREDICT_ATTRITION_PATH, self.client.post(&url).json(employee))
            .await
    }

    async fn fetch_attrition_trends(&self) -> ApiResult<Vec<TrendPoint>> {
        let url = self.url(ATTRITION_TRENDS_PATH);
        self.send("GET", ATTRITION_TRENDS_PATH, self.client.get(&url))
            .await
    }
}
