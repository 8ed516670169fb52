//! App Root Component
//!
//! Builds the dashboard controller against the configured backend and
//! provides it to the page.

use leptos::*;

use attrition::{Dashboard, QueryClient};
use std::rc::Rc;

use crate::api;
use crate::components::{Header, Toast};
use crate::pages::DashboardPage;
use crate::state::provide_dashboard_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let base_url = api::get_api_base();
    web_sys::console::log_1(&format!("Attrition dashboard using {}", base_url).into());

    provide_dashboard_state(Dashboard::new(Rc::new(api::client(&base_url)), QueryClient::new()));

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <Header />

            <main class="flex-1 container mx-auto px-4 py-8">
                <DashboardPage />
            </main>

            <Toast />
        </div>
    }
}
