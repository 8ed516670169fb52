//! Prediction Card Component
//!
//! Result panel of the risk calculator.

use leptos::*;

use attrition::{AttritionPrediction, PredictionPanel, RiskLevel};

use crate::state::DashboardState;

#[component]
pub fn PredictionCard() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let view_model = state.view;
    let panel = create_memo(move |_| view_model.get().prediction);

    view! {
        {move || match panel.get() {
            PredictionPanel::Hidden => view! {}.into_view(),
            PredictionPanel::Pending => view! {
                <div class="flex items-center space-x-2 text-gray-400 mt-6">
                    <div class="loading-spinner w-4 h-4" />
                    <span>"Calculating risk..."</span>
                </div>
            }
            .into_view(),
            PredictionPanel::Ready(prediction) => view! { <PredictionResult prediction=prediction /> }.into_view(),
            PredictionPanel::Failed(message) => view! {
                <div class="mt-6 bg-red-900/40 border border-red-700 text-red-200 rounded-lg px-4 py-3 text-sm">
                    {message}
                </div>
            }
            .into_view(),
        }}
    }
}

#[component]
fn PredictionResult(prediction: AttritionPrediction) -> impl IntoView {
    let badge = match prediction.risk_level {
        RiskLevel::Low => "bg-green-600",
        RiskLevel::Medium => "bg-yellow-600",
        RiskLevel::High => "bg-red-600",
    };

    view! {
        <div class="mt-6 bg-gray-700 rounded-lg p-4 space-y-3">
            <div class="flex items-center justify-between">
                <span class=format!("px-3 py-1 rounded-full text-sm font-semibold {}", badge)>
                    {format!("{} risk", prediction.risk_level)}
                </span>
                <span class="text-2xl font-bold">
                    {format!("{:.1}%", prediction.probability * 100.0)}
                </span>
            </div>

            {(!prediction.top_factors.is_empty()).then(|| view! {
                <div>
                    <h3 class="text-sm text-gray-400 mb-2">"Top factors"</h3>
                    <ul class="space-y-1">
                        {prediction.top_factors.iter().map(|factor| view! {
                            <li class="flex justify-between text-sm">
                                <span>{factor.factor.clone()}</span>
                                <span class="text-gray-300">{format!("{:+.2}", factor.impact)}</span>
                            </li>
                        }).collect_view()}
                    </ul>
                </div>
            })}
        </div>
    }
}
