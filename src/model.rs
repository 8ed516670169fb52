//! Core data types for the attrition dashboard
//!
//! This module defines the values exchanged with the analytics backend:
//! - `Employee`: A validated risk-calculator submission
//! - `AttritionPrediction`: The backend's verdict for one employee
//! - `DepartmentMetrics`: Summary figures for one department
//! - `TrendPoint`: One month of the attrition time series

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// A validated employee profile, built only by [`crate::validation::validate_employee`]
///
/// Wire format: `{"yearsAtCompany": 5, "monthlyIncome": 4000, "jobLevel": "Senior"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Tenure in years, within `[0, 50]`
    #[serde(serialize_with = "serialize_number")]
    pub years_at_company: f64,
    /// Monthly income, never negative
    #[serde(serialize_with = "serialize_number")]
    pub monthly_income: f64,
    /// Seniority bucket
    pub job_level: JobLevel,
}

/// Whole numbers go out as JSON integers so the backend sees `5`, not `5.0`.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Job level of an employee
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum JobLevel {
    #[default]
    #[serde(rename = "Entry Level")]
    EntryLevel,
    #[serde(rename = "Mid Level")]
    MidLevel,
    Senior,
    Manager,
    Director,
}

impl JobLevel {
    /// All levels in the order they appear in the form
    pub fn all() -> &'static [JobLevel] {
        &[
            JobLevel::EntryLevel,
            JobLevel::MidLevel,
            JobLevel::Senior,
            JobLevel::Manager,
            JobLevel::Director,
        ]
    }

    /// Display and wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            JobLevel::EntryLevel => "Entry Level",
            JobLevel::MidLevel => "Mid Level",
            JobLevel::Senior => "Senior",
            JobLevel::Manager => "Manager",
            JobLevel::Director => "Director",
        }
    }
}

impl std::fmt::Display for JobLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no job level
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown job level: {0}")]
pub struct UnknownJobLevel(pub String);

impl FromStr for JobLevel {
    type Err = UnknownJobLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobLevel::all()
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownJobLevel(s.to_string()))
    }
}

/// Categorical risk bucket assigned by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// One contributing factor of a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    pub impact: f64,
}

/// Prediction returned by `POST /predict/attrition`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttritionPrediction {
    /// Probability of leaving, in `[0, 1]`
    pub probability: f64,
    pub risk_level: RiskLevel,
    /// Ordered by the backend, most important first
    #[serde(default)]
    pub top_factors: Vec<RiskFactor>,
}

/// Summary figures for one department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentMetrics {
    pub department: String,
    /// Percentage, e.g. `12.5` for 12.5%
    pub attrition_rate: f64,
    /// Accepts `120` as well as `120.0` from the backend
    #[serde(deserialize_with = "deserialize_count")]
    pub employee_count: u64,
    /// Expected departures over the next three months
    pub predicted_attrition: f64,
}

fn deserialize_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && value >= 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(de::Error::custom(format!(
            "expected a whole employee count, got {}",
            value
        )))
    }
}

/// One month of the attrition trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Month label as provided by the backend (e.g. "Jan")
    pub month: String,
    pub rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_employee_wire_format() {
        let employee = Employee {
            years_at_company: 5.0,
            monthly_income: 4000.0,
            job_level: JobLevel::Senior,
        };

        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(
            value,
            json!({"yearsAtCompany": 5, "monthlyIncome": 4000, "jobLevel": "Senior"})
        );
    }

    #[test]
    fn test_fractional_values_stay_floats() {
        let employee = Employee {
            years_at_company: 2.5,
            monthly_income: 1234.75,
            job_level: JobLevel::MidLevel,
        };

        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["yearsAtCompany"], json!(2.5));
        assert_eq!(value["jobLevel"], json!("Mid Level"));
    }

    #[test]
    fn test_job_level_names() {
        assert_eq!("Entry Level".parse::<JobLevel>().unwrap(), JobLevel::EntryLevel);
        assert_eq!("Director".parse::<JobLevel>().unwrap(), JobLevel::Director);
        assert!("Intern".parse::<JobLevel>().is_err());
        assert!("senior".parse::<JobLevel>().is_err());
        assert_eq!(JobLevel::all().len(), 5);
        assert_eq!(JobLevel::default(), JobLevel::EntryLevel);
    }

    #[test]
    fn test_prediction_from_backend_json() {
        let prediction: AttritionPrediction = serde_json::from_value(json!({
            "probability": 0.42,
            "riskLevel": "Medium",
            "topFactors": [
                {"factor": "Overtime", "impact": 0.3},
                {"factor": "Income", "impact": 0.1}
            ]
        }))
        .unwrap();

        assert_eq!(prediction.risk_level, RiskLevel::Medium);
        assert_eq!(prediction.top_factors[0].factor, "Overtime");
        assert_eq!(prediction.top_factors.len(), 2);
    }

    #[test]
    fn test_unknown_risk_level_rejected() {
        let result: Result<AttritionPrediction, _> = serde_json::from_value(json!({
            "probability": 0.42,
            "riskLevel": "Extreme",
            "topFactors": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_department_metrics_from_backend_json() {
        let metrics: Vec<DepartmentMetrics> = serde_json::from_value(json!([
            {"department": "Sales", "attritionRate": 12.34, "employeeCount": 120, "predictedAttrition": 8}
        ]))
        .unwrap();

        assert_eq!(metrics[0].department, "Sales");
        assert_eq!(metrics[0].employee_count, 120);
        assert_eq!(metrics[0].predicted_attrition, 8.0);
    }

    #[test]
    fn test_employee_count_accepts_whole_floats() {
        let metrics: DepartmentMetrics = serde_json::from_value(json!(
            {"department": "Sales", "attritionRate": 12.5, "employeeCount": 120.0, "predictedAttrition": 8}
        ))
        .unwrap();
        assert_eq!(metrics.employee_count, 120);

        for count in [json!(120.5), json!(-3), json!("120")] {
            let result: Result<DepartmentMetrics, _> = serde_json::from_value(json!(
                {"department": "Sales", "attritionRate": 12.5, "employeeCount": count, "predictedAttrition": 8}
            ));
            assert!(result.is_err(), "accepted {}", count);
        }
    }
}
