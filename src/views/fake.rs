//! In-memory backend for view tests

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tokio::sync::Notify;

use crate::api::{ApiError, ApiResult, AttritionApi};
use crate::model::{
    AttritionPrediction, DepartmentMetrics, Employee, RiskFactor, RiskLevel, TrendPoint,
};

pub(crate) fn department(name: &str, rate: f64, count: u64, predicted: f64) -> DepartmentMetrics {
    DepartmentMetrics {
        department: name.to_string(),
        attrition_rate: rate,
        employee_count: count,
        predicted_attrition: predicted,
    }
}

pub(crate) struct FakeApi {
    metrics: RefCell<ApiResult<Vec<DepartmentMetrics>>>,
    trends: RefCell<ApiResult<Vec<TrendPoint>>>,
    prediction: RefCell<ApiResult<AttritionPrediction>>,
    predict_gate: RefCell<Option<Rc<Notify>>>,
    metric_calls: Cell<u32>,
    trend_calls: Cell<u32>,
    posted: RefCell<Vec<Employee>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            metrics: RefCell::new(Ok(vec![
                department("Engineering", 8.26, 240, 6.0),
                department("Sales", 15.5, 80, 4.5),
                department("Support", 21.04, 35, 3.0),
            ])),
            trends: RefCell::new(Ok(vec![
                TrendPoint { month: "Jan".into(), rate: 10.0 },
                TrendPoint { month: "Feb".into(), rate: 9.0 },
                TrendPoint { month: "Mar".into(), rate: 11.5 },
            ])),
            prediction: RefCell::new(Ok(AttritionPrediction {
                probability: 0.31,
                risk_level: RiskLevel::Medium,
                top_factors: vec![
                    RiskFactor { factor: "Monthly income".into(), impact: 0.18 },
                    RiskFactor { factor: "Years at company".into(), impact: 0.09 },
                ],
            })),
            predict_gate: RefCell::new(None),
            metric_calls: Cell::new(0),
            trend_calls: Cell::new(0),
            posted: RefCell::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub(crate) fn set_metrics(&self, metrics: ApiResult<Vec<DepartmentMetrics>>) {
        *self.metrics.borrow_mut() = metrics;
    }

    pub(crate) fn fail_trends(&self, err: ApiError) {
        *self.trends.borrow_mut() = Err(err);
    }

    pub(crate) fn fail_predictions(&self, err: ApiError) {
        *self.prediction.borrow_mut() = Err(err);
    }

    /// Hold every prediction until the returned gate is notified
    pub(crate) fn gate_predictions(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        *self.predict_gate.borrow_mut() = Some(Rc::clone(&gate));
        gate
    }

    pub(crate) fn metric_calls(&self) -> u32 {
        self.metric_calls.get()
    }

    pub(crate) fn trend_calls(&self) -> u32 {
        self.trend_calls.get()
    }

    pub(crate) fn posted(&self) -> Vec<Employee> {
        self.posted.borrow().clone()
    }
}

#[async_trait(?Send)]
impl AttritionApi for FakeApi {
    async fn fetch_department_metrics(&self) -> ApiResult<Vec<DepartmentMetrics>> {
        self.metric_calls.set(self.metric_calls.get() + 1);
        tokio::task::yield_now().await;
        self.metrics.borrow().clone()
    }

    async fn predict_attrition(&self, employee: &Employee) -> ApiResult<AttritionPrediction> {
        self.posted.borrow_mut().push(employee.clone());
        let gate = self.predict_gate.borrow().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.prediction.borrow().clone()
    }

    async fn fetch_attrition_trends(&self) -> ApiResult<Vec<TrendPoint>> {
        self.trend_calls.set(self.trend_calls.get() + 1);
        tokio::task::yield_now().await;
        self.trends.borrow().clone()
    }
}
