//! State Management
//!
//! Bridges the core dashboard controller into Leptos signals.

pub mod dashboard;

pub use dashboard::{provide_dashboard_state, DashboardState};
