//! Response checks
//!
//! Serde already enforces the structure of each body. These checks reject
//! values that decode fine but cannot be right.

use crate::model::{AttritionPrediction, DepartmentMetrics, TrendPoint};

use super::error::{ApiError, ApiResult};

/// Value-level check applied to every decoded response
pub trait CheckResponse {
    fn check(&self) -> Result<(), String>;

    /// Run the check, mapping failures into [`ApiError::InvalidResponse`]
    fn checked(self) -> ApiResult<Self>
    where
        Self: Sized,
    {
        self.check().map_err(ApiError::InvalidResponse)?;
        Ok(self)
    }
}

impl CheckResponse for AttritionPrediction {
    fn check(&self) -> Result<(), String> {
        if !self.probability.is_finite() || !(0.0..=1.0).contains(&self.probability) {
            return Err(format!("probability {} outside [0, 1]", self.probability));
        }
        for factor in &self.top_factors {
            if !factor.impact.is_finite() {
                return Err(format!("factor '{}' has non-finite impact", factor.factor));
            }
        }
        Ok(())
    }
}

impl CheckResponse for DepartmentMetrics {
    fn check(&self) -> Result<(), String> {
        if !self.attrition_rate.is_finite() || self.attrition_rate < 0.0 {
            return Err(format!(
                "department '{}' has invalid attrition rate {}",
                self.department, self.attrition_rate
            ));
        }
        if !self.predicted_attrition.is_finite() || self.predicted_attrition < 0.0 {
            return Err(format!(
                "department '{}' has invalid predicted attrition {}",
                self.department, self.predicted_attrition
            ));
        }
        Ok(())
    }
}

impl CheckResponse for TrendPoint {
    fn check(&self) -> Result<(), String> {
        if !self.rate.is_finite() {
            return Err(format!("month '{}' has non-finite rate", self.month));
        }
        Ok(())
    }
}

impl<T: CheckResponse> CheckResponse for Vec<T> {
    fn check(&self) -> Result<(), String> {
        self.iter().try_for_each(CheckResponse::check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RiskFactor, RiskLevel};

    fn prediction(probability: f64) -> AttritionPrediction {
        AttritionPrediction {
            probability,
            risk_level: RiskLevel::Low,
            top_factors: vec![RiskFactor {
                factor: "Tenure".to_string(),
                impact: 0.2,
            }],
        }
    }

    #[test]
    fn test_probability_bounds() {
        assert!(prediction(0.0).check().is_ok());
        assert!(prediction(1.0).check().is_ok());
        assert!(prediction(1.5).check().is_err());
        assert!(prediction(f64::NAN).check().is_err());
    }

    #[test]
    fn test_checked_maps_error() {
        let err = prediction(-0.1).checked().unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_metrics_list() {
        let good = DepartmentMetrics {
            department: "Sales".to_string(),
            attrition_rate: 12.0,
            employee_count: 10,
            predicted_attrition: 2.0,
        };
        let mut bad = good.clone();
        bad.attrition_rate = -3.0;

        assert!(vec![good.clone()].check().is_ok());
        let message = vec![good, bad].check().unwrap_err();
        assert!(message.contains("attrition rate"));
    }
}
