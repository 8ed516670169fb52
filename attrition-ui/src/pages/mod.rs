//! Pages
//!
//! The dashboard is the only page.

pub mod dashboard;

pub use dashboard::DashboardPage;
