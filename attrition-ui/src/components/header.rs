//! Header Component
//!
//! Title bar with the backend URL editor.

use leptos::*;

use crate::api;

/// Page header
#[component]
pub fn Header() -> impl IntoView {
    let (editing, set_editing) = create_signal(false);
    let (url, set_url) = create_signal(api::get_api_base());

    // The client is built once per page load, so a new URL needs a reload
    let reload = || {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    };

    let on_save = move |_| {
        api::set_api_base(&url.get());
        reload();
    };

    let on_reset = move |_| {
        api::clear_api_base();
        reload();
    };

    view! {
        <header class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4 flex items-center justify-between h-16">
                <div class="flex items-center space-x-3">
                    <span class="text-2xl">"📉"</span>
                    <span class="text-xl font-bold text-white">"Employee Attrition Analytics"</span>
                </div>

                {move || {
                    if editing.get() {
                        view! {
                            <div class="flex items-center space-x-2">
                                <input
                                    type="url"
                                    prop:value=move || url.get()
                                    on:input=move |ev| set_url.set(event_target_value(&ev))
                                    class="w-72 bg-gray-700 rounded px-3 py-2 text-sm
                                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                                />
                                <button
                                    on:click=on_save
                                    class="px-3 py-2 bg-primary-600 hover:bg-primary-700 rounded text-sm"
                                >
                                    "Save"
                                </button>
                                <button
                                    on:click=on_reset
                                    class="px-3 py-2 bg-gray-600 hover:bg-gray-500 rounded text-sm"
                                >
                                    "Reset"
                                </button>
                            </div>
                        }
                        .into_view()
                    } else {
                        view! {
                            <button
                                on:click=move |_| set_editing.set(true)
                                class="text-sm text-gray-400 hover:text-white"
                                title="Change analytics service"
                            >
                                {move || url.get()}
                            </button>
                        }
                        .into_view()
                    }
                }}
            </div>
        </header>
    }
}
