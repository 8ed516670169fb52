//! Dashboard View
//!
//! Composes the department summary, the trend panel and the risk
//! calculator. Owns the UI-local state: selected department, raw form
//! fields and their validation errors.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ApiError, AttritionApi};
use crate::model::{AttritionPrediction, DepartmentMetrics, Employee};
use crate::query::{Mutation, MutationError, MutationStatus, QueryClient, QueryKey, QuerySnapshot};
use crate::validation::{validate_employee, EmployeeField, EmployeeForm, ValidationErrors};

use super::trend::{TrendRender, TrendView};

/// Cache key for the per-department figures
pub const DEPARTMENT_METRICS_KEY: QueryKey = QueryKey::from_static("departmentMetrics");

/// Initial selection; matches no real department, so the first entry is shown
pub const ALL_DEPARTMENTS: &str = "All";

pub const SUBMIT_LABEL: &str = "Calculate Risk";
pub const SUBMIT_PENDING_LABEL: &str = "Calculating...";

/// Entry named `selected`, or the first entry when none matches
pub fn select_department<'a>(
    metrics: &'a [DepartmentMetrics],
    selected: &str,
) -> Option<&'a DepartmentMetrics> {
    metrics
        .iter()
        .find(|m| m.department == selected)
        .or_else(|| metrics.first())
}

/// The three headline figures, formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryFigures {
    pub department: String,
    /// One decimal with a percent sign, e.g. `"12.5%"`
    pub attrition_rate: String,
    pub employee_count: String,
    /// Predicted departures over the next three months
    pub predicted_attrition: String,
}

impl SummaryFigures {
    pub fn from_metrics(metrics: &DepartmentMetrics) -> Self {
        Self {
            department: metrics.department.clone(),
            attrition_rate: format!("{:.1}%", round_half_up(metrics.attrition_rate, 1)),
            employee_count: metrics.employee_count.to_string(),
            // f64 Display drops a trailing ".0"
            predicted_attrition: metrics.predicted_attrition.to_string(),
        }
    }
}

/// Round to `digits` decimals with ties going up, so `8.25` shows as `8.3`
fn round_half_up(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Result panel of the risk calculator
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionPanel {
    Hidden,
    Pending,
    Ready(AttritionPrediction),
    Failed(String),
}

/// What happened to one form submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid(ValidationErrors),
    Predicted(AttritionPrediction),
    Failed(MutationError),
}

/// Everything the page needs to draw itself
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRender {
    /// First metrics load still pending; the page shows a loading state
    pub loading: bool,
    /// Error banner text, if the metrics query failed
    pub banner: Option<String>,
    /// The failure is transient, so the banner offers a retry
    pub banner_retryable: bool,
    /// Options of the department selector, in fetch order
    pub departments: Vec<String>,
    pub selected_department: String,
    pub summary: Option<SummaryFigures>,
    pub trend: TrendRender,
    pub form: EmployeeForm,
    pub errors: ValidationErrors,
    pub submit_disabled: bool,
    pub submit_label: &'static str,
    pub prediction: PredictionPanel,
}

/// Dashboard controller
///
/// Methods take `&self` so one instance can be shared by every event
/// handler of the page; local state lives in `RefCell`s that are never
/// borrowed across an await.
pub struct Dashboard<A: ?Sized> {
    api: Rc<A>,
    cache: QueryClient,
    trend: TrendView<A>,
    selected_department: RefCell<String>,
    form: RefCell<EmployeeForm>,
    errors: RefCell<ValidationErrors>,
    predict: Mutation<Employee, AttritionPrediction>,
}

impl<A: AttritionApi + ?Sized + 'static> Dashboard<A> {
    pub fn new(api: Rc<A>, cache: QueryClient) -> Self {
        let trend = TrendView::new(Rc::clone(&api), cache.clone());

        let predict_api = Rc::clone(&api);
        let predict = Mutation::new(move |employee: Employee| {
            let api = Rc::clone(&predict_api);
            async move { api.predict_attrition(&employee).await }
        })
        .on_success(|prediction: &AttritionPrediction| {
            tracing::info!(
                probability = prediction.probability,
                risk_level = %prediction.risk_level,
                factors = prediction.top_factors.len(),
                "Prediction received"
            );
        })
        .on_error(|err| {
            tracing::warn!(error = %err, "Prediction request failed");
        });

        Self {
            api,
            cache,
            trend,
            selected_department: RefCell::new(ALL_DEPARTMENTS.to_string()),
            form: RefCell::new(EmployeeForm::default()),
            errors: RefCell::new(ValidationErrors::new()),
            predict,
        }
    }

    pub fn cache(&self) -> &QueryClient {
        &self.cache
    }

    pub fn trend(&self) -> &TrendView<A> {
        &self.trend
    }

    /// The prediction mutation, for subscribing to its status
    pub fn prediction_mutation(&self) -> &Mutation<Employee, AttritionPrediction> {
        &self.predict
    }

    /// Issue the metrics and trends queries
    pub async fn mount(&self) {
        futures_util::join!(self.load_metrics(), self.trend.mount());
    }

    pub async fn load_metrics(&self) -> QuerySnapshot<Vec<DepartmentMetrics>> {
        let api = Rc::clone(&self.api);
        self.cache
            .fetch_query(DEPARTMENT_METRICS_KEY, move || async move {
                api.fetch_department_metrics().await
            })
            .await
    }

    /// Retry action behind the error banner
    pub async fn retry_metrics(&self) -> QuerySnapshot<Vec<DepartmentMetrics>> {
        let api = Rc::clone(&self.api);
        self.cache
            .refetch(DEPARTMENT_METRICS_KEY, move || async move {
                api.fetch_department_metrics().await
            })
            .await
    }

    pub fn metrics_snapshot(&self) -> QuerySnapshot<Vec<DepartmentMetrics>> {
        self.cache.snapshot(DEPARTMENT_METRICS_KEY)
    }

    /// Metrics of the selected department, falling back to the first entry
    pub fn current_metrics(&self) -> Option<DepartmentMetrics> {
        let metrics = self.metrics_snapshot().data?;
        select_department(&metrics, &self.selected_department.borrow()).cloned()
    }

    pub fn select_department(&self, department: impl Into<String>) {
        *self.selected_department.borrow_mut() = department.into();
    }

    pub fn selected_department(&self) -> String {
        self.selected_department.borrow().clone()
    }

    pub fn set_field(&self, field: EmployeeField, value: impl Into<String>) {
        self.form.borrow_mut().set(field, value);
    }

    pub fn form(&self) -> EmployeeForm {
        self.form.borrow().clone()
    }

    pub fn errors(&self) -> ValidationErrors {
        self.errors.borrow().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.predict.is_pending()
    }

    /// Handle a form submission
    ///
    /// Invalid input is stored as field errors and never reaches the
    /// network. Valid input clears the errors and triggers the prediction.
    pub async fn submit(&self) -> SubmitOutcome {
        let form = self.form();

        let employee = match validate_employee(&form) {
            Ok(employee) => employee,
            Err(errors) => {
                tracing::debug!(fields = errors.len(), "Risk form rejected");
                *self.errors.borrow_mut() = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
        };

        self.errors.borrow_mut().clear();

        match self.predict.mutate(employee).await {
            Ok(prediction) => SubmitOutcome::Predicted(prediction),
            Err(err) => SubmitOutcome::Failed(err),
        }
    }

    pub fn prediction_panel(&self) -> PredictionPanel {
        match self.predict.status() {
            MutationStatus::Idle => PredictionPanel::Hidden,
            MutationStatus::Pending => PredictionPanel::Pending,
            MutationStatus::Success => self
                .predict
                .data()
                .map(PredictionPanel::Ready)
                .unwrap_or(PredictionPanel::Hidden),
            MutationStatus::Error => PredictionPanel::Failed(
                self.predict
                    .error()
                    .map(|err| format!("Prediction failed: {}", err))
                    .unwrap_or_else(|| "Prediction failed".to_string()),
            ),
        }
    }

    pub fn render(&self) -> DashboardRender {
        let snapshot = self.metrics_snapshot();
        let metrics = snapshot.data.clone().unwrap_or_default();
        let selected = self.selected_department();
        let submitting = self.is_submitting();

        DashboardRender {
            loading: snapshot.is_initial_load(),
            banner: snapshot
                .error
                .as_ref()
                .filter(|_| snapshot.is_error())
                .map(|err| format!("Could not load department metrics: {}", err)),
            banner_retryable: snapshot.is_error()
                && snapshot.error.as_ref().is_some_and(ApiError::is_retryable),
            departments: metrics.iter().map(|m| m.department.clone()).collect(),
            summary: select_department(&metrics, &selected).map(SummaryFigures::from_metrics),
            selected_department: selected,
            trend: self.trend.render(),
            form: self.form(),
            errors: self.errors(),
            submit_disabled: submitting,
            submit_label: if submitting {
                SUBMIT_PENDING_LABEL
            } else {
                SUBMIT_LABEL
            },
            prediction: self.prediction_panel(),
        }
    }
}
