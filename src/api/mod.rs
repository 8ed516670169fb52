//! Analytics Backend API
//!
//! Typed client for the external prediction/metrics service.
//!
//! # Endpoints
//!
//! - `GET /metrics/departments` - Summary figures per department
//! - `GET /metrics/trends` - Monthly attrition rate series
//! - `POST /predict/attrition` - Risk prediction for one employee
//!
//! Views depend on the [`AttritionApi`] trait, not on [`HttpApiClient`], so
//! tests can substitute an in-memory backend.

pub mod client;
pub mod error;
pub mod response;

pub use client::{
    AttritionApi, HttpApiClient, ATTRITION_TRENDS_PATH, DEPARTMENT_METRICS_PATH,
    PREDICT_ATTRITION_PATH, REQUEST_ID_HEADER,
};
pub use error::{ApiError, ApiResult};
pub use response::CheckResponse;
