//! Attrition Dashboard
//!
//! Employee attrition analytics dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Department attrition summary with department selector
//! - Monthly attrition trend chart
//! - Attrition risk calculator
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All fetching, caching and validation lives in the `attrition`
//! core crate; components here only render its view models.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
