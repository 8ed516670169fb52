//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod error_banner;
pub mod header;
pub mod loading;
pub mod metric_card;
pub mod prediction_card;
pub mod risk_form;
pub mod toast;
pub mod trend_chart;

pub use error_banner::ErrorBanner;
pub use header::Header;
pub use loading::{CardSkeleton, Loading};
pub use metric_card::MetricCard;
pub use prediction_card::PredictionCard;
pub use risk_form::RiskForm;
pub use toast::Toast;
pub use trend_chart::TrendChart;
