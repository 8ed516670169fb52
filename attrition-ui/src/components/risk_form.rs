//! Risk Form Component
//!
//! Attrition risk calculator: three inputs, inline field errors and a
//! submit button that is disabled while a prediction is pending.

use leptos::*;

use attrition::{EmployeeField, JobLevel};

use crate::state::DashboardState;

const INPUT_CLASS: &str = "w-full bg-gray-700 rounded-lg px-4 py-3 text-white \
                           border border-gray-600 focus:border-primary-500 focus:outline-none";

/// Risk calculator form component
#[component]
pub fn RiskForm() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let view_model = state.view;

    let submit_disabled = create_memo(move |_| view_model.get().submit_disabled);
    let submit_label = create_memo(move |_| view_model.get().submit_label);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        state.submit();
    };

    view! {
        <form on:submit=on_submit class="space-y-4" novalidate=true>
            <FieldInput
                field=EmployeeField::YearsAtCompany
                label="Years at Company"
                input_type="number"
            />
            <FieldInput
                field=EmployeeField::MonthlyIncome
                label="Monthly Income"
                input_type="number"
            />
            <JobLevelSelect />

            <button
                type="submit"
                disabled=move || submit_disabled.get()
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                       transition-colors flex items-center justify-center space-x-2"
            >
                {move || submit_disabled.get().then(|| view! { <div class="loading-spinner w-5 h-5" /> })}
                <span>{move || submit_label.get()}</span>
            </button>
        </form>
    }
}

#[component]
fn FieldInput(
    field: EmployeeField,
    label: &'static str,
    input_type: &'static str,
) -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let view_model = state.view;

    let value = create_memo(move |_| view_model.get().form.get(field).to_string());
    let error = create_memo(move |_| view_model.get().errors.get(field).map(str::to_string));

    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2" for=field.as_str()>{label}</label>
            <input
                id=field.as_str()
                name=field.as_str()
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| state.set_field(field, event_target_value(&ev))
                class=INPUT_CLASS
            />
            <FieldError error=error />
        </div>
    }
}

#[component]
fn JobLevelSelect() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let view_model = state.view;
    let field = EmployeeField::JobLevel;

    let value = create_memo(move |_| view_model.get().form.get(field).to_string());
    let error = create_memo(move |_| view_model.get().errors.get(field).map(str::to_string));

    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2" for=field.as_str()>"Job Level"</label>
            <select
                id=field.as_str()
                name=field.as_str()
                prop:value=move || value.get()
                on:change=move |ev| state.set_field(field, event_target_value(&ev))
                class=INPUT_CLASS
            >
                {JobLevel::all()
                    .iter()
                    .map(|level| view! { <option value=level.as_str()>{level.as_str()}</option> })
                    .collect_view()}
            </select>
            <FieldError error=error />
        </div>
    }
}

#[component]
fn FieldError(error: Memo<Option<String>>) -> impl IntoView {
    move || {
        error
            .get()
            .map(|message| view! { <p class="text-red-400 text-sm mt-1">{message}</p> })
    }
}
