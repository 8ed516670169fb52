//! Loading Component
//!
//! Loading spinners and skeleton states.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading(
    #[prop(default = "Loading...")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 space-y-3">
            <div class="loading-spinner w-8 h-8" />
            <span class="text-gray-400 text-sm">{label}</span>
        </div>
    }
}

/// Skeleton loader for summary cards
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 animate-pulse">
            <div class="h-4 bg-gray-700 rounded w-1/3 mb-4" />
            <div class="h-8 bg-gray-700 rounded w-1/2 mb-2" />
            <div class="h-4 bg-gray-700 rounded w-2/3" />
        </div>
    }
}
