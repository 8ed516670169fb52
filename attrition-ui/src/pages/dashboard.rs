//! Dashboard Page
//!
//! Department summary, attrition trend and the risk calculator.

use leptos::*;

use attrition::SummaryFigures;

use crate::components::{CardSkeleton, ErrorBanner, Loading, MetricCard, PredictionCard, RiskForm, TrendChart};
use crate::state::DashboardState;

/// Dashboard page component
#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let view_model = state.view;

    // Fetch metrics and trends once on mount
    state.mount();

    let loading = create_memo(move |_| view_model.get().loading);
    let banner = create_memo(move |_| {
        let view = view_model.get();
        view.banner.map(|message| (message, view.banner_retryable))
    });

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"Attrition Overview"</h1>
                <p class="text-gray-400 mt-1">"Department attrition at a glance"</p>
            </div>

            {move || {
                banner.get().map(|(message, retryable)| {
                    let state = state.clone();
                    view! {
                        <ErrorBanner
                            message=message
                            retryable=retryable
                            on_retry=move |_| state.retry_metrics()
                        />
                    }
                })
            }}

            {move || {
                if loading.get() {
                    view! { <Loading label="Loading department metrics..." /> }.into_view()
                } else {
                    view! { <DepartmentSummary /> }.into_view()
                }
            }}

            // Main chart
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Attrition Trends"</h2>
                <TrendChart />
            </section>

            // Risk calculator
            <section class="bg-gray-800 rounded-xl p-6 max-w-xl">
                <h2 class="text-xl font-semibold mb-4">"Attrition Risk Calculator"</h2>
                <RiskForm />
                <PredictionCard />
            </section>
        </div>
    }
}

/// Department selector and the three headline figures
#[component]
fn DepartmentSummary() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let view_model = state.view;

    let departments = create_memo(move |_| view_model.get().departments);
    let selected = create_memo(move |_| view_model.get().selected_department);
    let summary = create_memo(move |_| view_model.get().summary);

    let figure = move |pick: fn(&SummaryFigures) -> String| {
        Signal::derive(move || summary.get().as_ref().map(pick).unwrap_or_else(|| "—".to_string()))
    };

    view! {
        <section class="space-y-4">
            <div class="flex items-center space-x-3">
                <label class="text-sm text-gray-400" for="department">"Department"</label>
                <select
                    id="department"
                    prop:value=move || selected.get()
                    on:change=move |ev| state.select_department(event_target_value(&ev))
                    class="bg-gray-700 rounded-lg px-4 py-2 text-white border border-gray-600
                           focus:border-primary-500 focus:outline-none"
                >
                    {move || {
                        departments
                            .get()
                            .into_iter()
                            .map(|name| view! { <option value=name.clone()>{name}</option> })
                            .collect_view()
                    }}
                </select>
            </div>

            {move || {
                if summary.get().is_none() {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                        </div>
                    }
                    .into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                            <MetricCard
                                title="Attrition Rate"
                                value=figure(|s| s.attrition_rate.clone())
                                accent="text-red-400"
                            />
                            <MetricCard
                                title="Total Employees"
                                value=figure(|s| s.employee_count.clone())
                            />
                            <MetricCard
                                title="Predicted Attrition (Next 3 Months)"
                                value=figure(|s| s.predicted_attrition.clone())
                                accent="text-yellow-400"
                            />
                        </div>
                    }
                    .into_view()
                }
            }}
        </section>
    }
}
