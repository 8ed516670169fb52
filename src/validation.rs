//! Risk-calculator form validation
//!
//! Turns raw, string-typed form input into an [`Employee`] or a field-keyed
//! set of error messages. Pure: nothing is stored and nothing is sent.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{Employee, JobLevel};

/// Upper bound for tenure, inclusive
pub const MAX_YEARS_AT_COMPANY: f64 = 50.0;

/// Raw form input, exactly as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    pub years_at_company: String,
    pub monthly_income: String,
    pub job_level: String,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            years_at_company: String::new(),
            monthly_income: String::new(),
            job_level: JobLevel::default().as_str().to_string(),
        }
    }
}

impl EmployeeForm {
    pub fn new(
        years_at_company: impl Into<String>,
        monthly_income: impl Into<String>,
        job_level: impl Into<String>,
    ) -> Self {
        Self {
            years_at_company: years_at_company.into(),
            monthly_income: monthly_income.into(),
            job_level: job_level.into(),
        }
    }

    /// Replace the raw value of one field
    pub fn set(&mut self, field: EmployeeField, value: impl Into<String>) {
        let slot = match field {
            EmployeeField::YearsAtCompany => &mut self.years_at_company,
            EmployeeField::MonthlyIncome => &mut self.monthly_income,
            EmployeeField::JobLevel => &mut self.job_level,
        };
        *slot = value.into();
    }

    pub fn get(&self, field: EmployeeField) -> &str {
        match field {
            EmployeeField::YearsAtCompany => &self.years_at_company,
            EmployeeField::MonthlyIncome => &self.monthly_income,
            EmployeeField::JobLevel => &self.job_level,
        }
    }
}

/// Form fields that can carry an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EmployeeField {
    YearsAtCompany,
    MonthlyIncome,
    JobLevel,
}

impl EmployeeField {
    /// Field name as used on the wire and in the form
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeField::YearsAtCompany => "yearsAtCompany",
            EmployeeField::MonthlyIncome => "monthlyIncome",
            EmployeeField::JobLevel => "jobLevel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "yearsAtCompany" => Some(EmployeeField::YearsAtCompany),
            "monthlyIncome" => Some(EmployeeField::MonthlyIncome),
            "jobLevel" => Some(EmployeeField::JobLevel),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed validation messages, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    errors: BTreeMap<EmployeeField, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message unless the field already has one
    pub fn add(&mut self, field: EmployeeField, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: EmployeeField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Lookup by field name, e.g. `"yearsAtCompany"`
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        EmployeeField::from_name(name).and_then(|field| self.get(field))
    }

    pub fn contains(&self, field: EmployeeField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmployeeField, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid employee input")?;
        for (i, (field, message)) in self.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}: {}", sep, field, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate raw form input
///
/// Numeric fields are trimmed and parsed as finite decimals. Blank input
/// reads as zero, the same as a cleared number field in the browser.
pub fn validate_employee(form: &EmployeeForm) -> Result<Employee, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let years = parse_number(&form.years_at_company);
    match years {
        None => errors.add(
            EmployeeField::YearsAtCompany,
            "Years at company must be a number",
        ),
        Some(y) if !(0.0..=MAX_YEARS_AT_COMPANY).contains(&y) => errors.add(
            EmployeeField::YearsAtCompany,
            "Years at company must be between 0 and 50",
        ),
        Some(_) => {}
    }

    let income = parse_number(&form.monthly_income);
    match income {
        None => errors.add(EmployeeField::MonthlyIncome, "Monthly income must be a number"),
        Some(i) if i < 0.0 => {
            errors.add(EmployeeField::MonthlyIncome, "Monthly income cannot be negative")
        }
        Some(_) => {}
    }

    let job_level = form.job_level.parse::<JobLevel>().ok();
    if job_level.is_none() {
        let allowed: Vec<&str> = JobLevel::all().iter().map(JobLevel::as_str).collect();
        errors.add(
            EmployeeField::JobLevel,
            format!("Job level must be one of: {}", allowed.join(", ")),
        );
    }

    match (years, income, job_level) {
        (Some(years_at_company), Some(monthly_income), Some(job_level)) if errors.is_empty() => {
            Ok(Employee {
                years_at_company,
                monthly_income,
                job_level,
            })
        }
        _ => Err(errors),
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(years: &str, income: &str, level: &str) -> EmployeeForm {
        EmployeeForm::new(years, income, level)
    }

    #[test]
    fn test_valid_input() {
        let employee = validate_employee(&form("5", "4000", "Senior")).unwrap();
        assert_eq!(employee.years_at_company, 5.0);
        assert_eq!(employee.monthly_income, 4000.0);
        assert_eq!(employee.job_level, JobLevel::Senior);
    }

    #[test]
    fn test_boundaries_accepted() {
        assert!(validate_employee(&form("0", "0", "Entry Level")).is_ok());
        assert!(validate_employee(&form("50", "0", "Director")).is_ok());
        assert!(validate_employee(&form(" 12.5 ", "1999.99", "Mid Level")).is_ok());
    }

    #[test]
    fn test_years_out_of_range() {
        for years in ["-1", "50.01", "51", "-0.5", "1000"] {
            let errors = validate_employee(&form(years, "1000", "Senior")).unwrap_err();
            assert_eq!(errors.len(), 1, "years={}", years);
            assert_eq!(
                errors.get(EmployeeField::YearsAtCompany),
                Some("Years at company must be between 0 and 50")
            );
        }
    }

    #[test]
    fn test_negative_income() {
        let errors = validate_employee(&form("3", "-0.01", "Manager")).unwrap_err();
        assert_eq!(
            errors.get_by_name("monthlyIncome"),
            Some("Monthly income cannot be negative")
        );
        assert!(!errors.contains(EmployeeField::YearsAtCompany));
    }

    #[test]
    fn test_unknown_job_level() {
        let errors = validate_employee(&form("3", "100", "Intern")).unwrap_err();
        let message = errors.get(EmployeeField::JobLevel).unwrap();
        assert!(message.starts_with("Job level must be one of"));
        assert!(message.contains("Entry Level"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_blank_numbers_read_as_zero() {
        let employee = validate_employee(&form("", "   ", "Senior")).unwrap();
        assert_eq!(employee.years_at_company, 0.0);
        assert_eq!(employee.monthly_income, 0.0);
        assert_eq!(employee.job_level, JobLevel::Senior);
    }

    #[test]
    fn test_coercion_failures() {
        let errors = validate_employee(&form("five", "abc", "Senior")).unwrap_err();
        assert_eq!(
            errors.get(EmployeeField::YearsAtCompany),
            Some("Years at company must be a number")
        );
        assert_eq!(
            errors.get(EmployeeField::MonthlyIncome),
            Some("Monthly income must be a number")
        );

        let errors = validate_employee(&form("NaN", "inf", "Senior")).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_every_field_reported_once() {
        let errors = validate_employee(&form("-1", "-1", "CEO")).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|(field, _)| field.as_str()).collect();
        assert_eq!(fields, vec!["yearsAtCompany", "monthlyIncome", "jobLevel"]);
    }

    #[test]
    fn test_first_failure_wins() {
        let mut errors = ValidationErrors::new();
        errors.add(EmployeeField::JobLevel, "first");
        errors.add(EmployeeField::JobLevel, "second");
        assert_eq!(errors.get(EmployeeField::JobLevel), Some("first"));
    }

    #[test]
    fn test_error_display() {
        let errors = validate_employee(&form("-1", "1000", "Senior")).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "Invalid employee input: yearsAtCompany: Years at company must be between 0 and 50"
        );
    }

    #[test]
    fn test_default_form() {
        let mut form = EmployeeForm::default();
        assert_eq!(form.job_level, "Entry Level");
        form.set(EmployeeField::YearsAtCompany, "7");
        assert_eq!(form.get(EmployeeField::YearsAtCompany), "7");
    }
}
