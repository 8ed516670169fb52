//! # Attrition Analytics
//!
//! Core of the employee-attrition dashboard: typed access to the
//! prediction/metrics service, a key-based query cache, risk-form
//! validation and the view models the dashboard renders.
//!
//! ## Modules
//!
//! - [`model`]: Values exchanged with the backend
//! - [`validation`]: Risk-calculator form validation
//! - [`api`]: HTTP client for the analytics backend
//! - [`query`]: Query cache and mutation lifecycle
//! - [`views`]: Dashboard and trend view models
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use attrition::{ApiConfig, Dashboard, EmployeeField, HttpApiClient, QueryClient, SubmitOutcome};
//! use std::rc::Rc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let api = Rc::new(HttpApiClient::new(&ApiConfig::default()));
//!     let dashboard = Dashboard::new(api, QueryClient::new());
//!
//!     // Load department metrics and the trend series
//!     dashboard.mount().await;
//!     if let Some(summary) = dashboard.render().summary {
//!         println!("{}: {} attrition", summary.department, summary.attrition_rate);
//!     }
//!
//!     // Run the risk calculator
//!     dashboard.set_field(EmployeeField::YearsAtCompany, "5");
//!     dashboard.set_field(EmployeeField::MonthlyIncome, "4000");
//!     dashboard.set_field(EmployeeField::JobLevel, "Senior");
//!     if let SubmitOutcome::Predicted(prediction) = dashboard.submit().await {
//!         println!("Risk: {}", prediction.risk_level);
//!     }
//! }
//! ```

pub mod api;
pub mod config;
#[cfg(feature = "cli")]
pub mod logging;
pub mod model;
pub mod query;
pub mod validation;
pub mod views;

pub use api::{ApiError, ApiResult, AttritionApi, HttpApiClient};

pub use config::{generate_default_config, ApiConfig, Config, ConfigError, LoggingConfig};

pub use model::{
    AttritionPrediction, DepartmentMetrics, Employee, JobLevel, RiskFactor, RiskLevel, TrendPoint,
};

pub use query::{
    Mutation, MutationError, MutationStatus, QueryClient, QueryKey, QuerySnapshot, QueryStatus,
};

pub use validation::{validate_employee, EmployeeField, EmployeeForm, ValidationErrors};

pub use views::{
    Dashboard, DashboardRender, PredictionPanel, SubmitOutcome, SummaryFigures, TrendRender,
    TrendView,
};
