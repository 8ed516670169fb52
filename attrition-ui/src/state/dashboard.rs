//! Dashboard State
//!
//! The controller from the core crate plus a signal holding its latest
//! render model. Query and mutation listeners push a fresh render model
//! whenever the cache or the prediction changes.

use leptos::*;
use std::rc::{Rc, Weak};

use attrition::views::{ATTRITION_TRENDS_KEY, DEPARTMENT_METRICS_KEY};
use attrition::{Dashboard, DashboardRender, EmployeeField, HttpApiClient, MutationError, SubmitOutcome};

pub type AppDashboard = Dashboard<HttpApiClient>;

/// Dashboard state provided to all components
#[derive(Clone)]
pub struct DashboardState {
    dashboard: Rc<AppDashboard>,
    /// Latest render model
    pub view: RwSignal<DashboardRender>,
    /// Error message (for toasts)
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide dashboard state to the component tree
pub fn provide_dashboard_state(dashboard: AppDashboard) -> DashboardState {
    let dashboard = Rc::new(dashboard);
    let view = create_rw_signal(dashboard.render());

    let weak = Rc::downgrade(&dashboard);
    for key in [DEPARTMENT_METRICS_KEY, ATTRITION_TRENDS_KEY] {
        let weak = weak.clone();
        dashboard.cache().subscribe(key, move |_| redraw(&weak, view));
    }
    dashboard
        .prediction_mutation()
        .subscribe(move |_| redraw(&weak, view));

    let state = DashboardState {
        dashboard,
        view,
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state.clone());
    state
}

fn redraw(dashboard: &Weak<AppDashboard>, view: RwSignal<DashboardRender>) {
    if let Some(dashboard) = dashboard.upgrade() {
        view.set(dashboard.render());
    }
}

impl DashboardState {
    /// Issue the metrics and trend queries
    pub fn mount(&self) {
        let dashboard = Rc::clone(&self.dashboard);
        spawn_local(async move {
            dashboard.mount().await;
        });
    }

    /// Retry the department metrics after a failure
    pub fn retry_metrics(&self) {
        let dashboard = Rc::clone(&self.dashboard);
        spawn_local(async move {
            dashboard.retry_metrics().await;
        });
    }

    pub fn retry_trends(&self) {
        let dashboard = Rc::clone(&self.dashboard);
        spawn_local(async move {
            dashboard.trend().refetch().await;
        });
    }

    pub fn select_department(&self, department: String) {
        self.dashboard.select_department(department);
        self.refresh();
    }

    pub fn set_field(&self, field: EmployeeField, value: String) {
        self.dashboard.set_field(field, value);
        self.refresh();
    }

    /// Validate the risk form and request a prediction
    pub fn submit(&self) {
        if self.dashboard.is_submitting() {
            return;
        }

        let state = self.clone();
        spawn_local(async move {
            match state.dashboard.submit().await {
                SubmitOutcome::Invalid(_) => {}
                SubmitOutcome::Predicted(prediction) => {
                    state.show_success(&format!("Risk level: {}", prediction.risk_level));
                }
                SubmitOutcome::Failed(MutationError::AlreadyPending) => {}
                SubmitOutcome::Failed(err) => {
                    web_sys::console::error_1(&format!("Prediction failed: {}", err).into());
                    state.show_error(&err.to_string());
                }
            }
            state.refresh();
        });
    }

    pub fn refresh(&self) {
        self.view.set(self.dashboard.render());
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
