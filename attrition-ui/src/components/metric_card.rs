//! Metric Card Component
//!
//! One headline figure of the selected department.

use leptos::*;

/// Metric card component
#[component]
pub fn MetricCard(
    /// Caption above the value
    title: &'static str,
    /// Formatted value
    #[prop(into)]
    value: Signal<String>,
    /// Tailwind text color of the value
    #[prop(default = "text-white")]
    accent: &'static str,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <span class="text-gray-400 text-sm">{title}</span>
            <div class=format!("text-3xl font-bold mt-2 {}", accent)>
                {move || value.get()}
            </div>
        </div>
    }
}
