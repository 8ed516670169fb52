//! Error Banner Component
//!
//! Inline failure message with a retry action.

use leptos::*;

#[component]
pub fn ErrorBanner(
    #[prop(into)]
    message: String,
    /// Show the retry button; permanent failures only get the message
    #[prop(default = true)]
    retryable: bool,
    on_retry: impl Fn(web_sys::MouseEvent) + 'static,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between bg-red-900/40 border border-red-700 text-red-200 rounded-lg px-4 py-3">
            <span class="text-sm">{message}</span>
            {retryable.then(|| view! {
                <button
                    on:click=on_retry
                    class="px-3 py-1 bg-red-700 hover:bg-red-600 rounded text-sm font-medium transition-colors"
                >
                    "Retry"
                </button>
            })}
        </div>
    }
}
