//! Query Layer
//!
//! Caching and request orchestration between the views and the backend.
//!
//! - [`QueryClient`]: key-based cache of reads with in-flight deduplication
//!   and change notification
//! - [`Mutation`]: pending/success/error lifecycle for writes
//!
//! ## Example
//!
//! ```rust,no_run
//! use attrition::api::{AttritionApi, HttpApiClient};
//! use attrition::config::ApiConfig;
//! use attrition::query::QueryClient;
//! use std::rc::Rc;
//!
//! # async fn run() {
//! let api = Rc::new(HttpApiClient::new(&ApiConfig::default()));
//! let cache = QueryClient::new();
//!
//! let snapshot = cache
//!     .fetch_query("departmentMetrics", move || async move {
//!         api.fetch_department_metrics().await
//!     })
//!     .await;
//!
//! println!("{} departments", snapshot.data.unwrap_or_default().len());
//! # }
//! ```

mod cache;
mod mutation;
mod state;

pub use cache::{QueryClient, SubscriptionId};
pub use mutation::{Mutation, MutationError, MutationStatus};
pub use state::{QueryKey, QuerySnapshot, QueryStatus};
