//! View Models
//!
//! Framework-neutral state and render models for the dashboard page. The
//! browser front-end and the headless binary both draw from these.
//!
//! - [`Dashboard`]: metrics summary, department selector, risk calculator
//! - [`TrendView`]: monthly attrition chart

pub mod dashboard;
pub mod trend;

#[cfg(test)]
pub(crate) mod fake;

pub use dashboard::{
    select_department, Dashboard, DashboardRender, PredictionPanel, SubmitOutcome,
    SummaryFigures, ALL_DEPARTMENTS, DEPARTMENT_METRICS_KEY, SUBMIT_LABEL, SUBMIT_PENDING_LABEL,
};
pub use trend::{
    render_trend, ChartPoint, TrendRender, TrendSeries, TrendView, ATTRITION_TRENDS_KEY,
    TREND_PLACEHOLDER_HEIGHT_PX,
};
