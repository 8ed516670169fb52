//! Query state types
//!
//! What a caller sees when it reads a cached query.

use chrono::{DateTime, Utc};
use std::borrow::Cow;

use crate::api::ApiError;

/// Stable identity of a cached read
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Cow<'static, str>);

impl QueryKey {
    pub const fn from_static(key: &'static str) -> Self {
        QueryKey(Cow::Borrowed(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for QueryKey {
    fn from(key: &'static str) -> Self {
        QueryKey(Cow::Borrowed(key))
    }
}

impl From<String> for QueryKey {
    fn from(key: String) -> Self {
        QueryKey(Cow::Owned(key))
    }
}

impl From<&QueryKey> for QueryKey {
    fn from(key: &QueryKey) -> Self {
        key.clone()
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of one query key
///
/// `Idle -> Loading -> Success | Error`; a refetch goes back to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl std::fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryStatus::Idle => write!(f, "idle"),
            QueryStatus::Loading => write!(f, "loading"),
            QueryStatus::Success => write!(f, "success"),
            QueryStatus::Error => write!(f, "error"),
        }
    }
}

/// Point-in-time copy of a cache entry
///
/// `data` holds the last successful result and survives later loading or
/// error states.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot<T> {
    pub status: QueryStatus,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    /// When `data` last changed
    pub updated_at: Option<DateTime<Utc>>,
    /// A request for this key is in flight
    pub is_fetching: bool,
}

impl<T> Default for QuerySnapshot<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            updated_at: None,
            is_fetching: false,
        }
    }
}

impl<T> QuerySnapshot<T> {
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    /// Loading with nothing to show yet
    pub fn is_initial_load(&self) -> bool {
        matches!(self.status, QueryStatus::Idle | QueryStatus::Loading) && self.data.is_none()
    }
}
