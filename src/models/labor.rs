//! Labor models: crew roles, the legacy single-crew block, oncosts and
//! additional labor items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::numeric::{lenient_bool, lenient_decimal, lenient_optional_decimal};

/// Day and time conditions that attract penalty rates.
///
/// The flags are independent inputs; which one wins is decided by the
/// penalty rule priority in [`crate::calculation::select_penalty_rule`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PenaltyFlags {
    /// Work is performed on a public holiday.
    #[serde(deserialize_with = "lenient_bool")]
    pub public_holiday: bool,
    /// Work is performed on a Sunday.
    #[serde(deserialize_with = "lenient_bool")]
    pub sunday: bool,
    /// Work is performed on a Saturday.
    #[serde(deserialize_with = "lenient_bool")]
    pub saturday: bool,
    /// Work is performed outside ordinary daytime hours.
    #[serde(deserialize_with = "lenient_bool")]
    pub after_hours: bool,
}

/// One crew role on the job (e.g. "Paver Operator").
///
/// # Example
///
/// ```
/// use asphalt_estimator::models::LaborRole;
/// use rust_decimal::Decimal;
///
/// let role: LaborRole = serde_json::from_str(
///     r#"{"type": "Laborer", "workers": 2, "hoursPerDay": "8", "days": 1,
///         "rate": 30, "saturday": true}"#,
/// ).unwrap();
/// assert_eq!(role.workers, Decimal::from(2));
/// assert!(role.flags.saturday);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaborRole {
    /// Role name.
    #[serde(rename = "type")]
    pub role_type: String,
    /// Number of workers in this role.
    #[serde(deserialize_with = "lenient_decimal")]
    pub workers: Decimal,
    /// Hours each worker works per day.
    #[serde(deserialize_with = "lenient_decimal")]
    pub hours_per_day: Decimal,
    /// Number of days worked.
    #[serde(deserialize_with = "lenient_decimal")]
    pub days: Decimal,
    /// Base hourly rate before oncosts and penalties.
    #[serde(deserialize_with = "lenient_decimal")]
    pub rate: Decimal,
    /// Penalty conditions for this role.
    #[serde(flatten)]
    pub flags: PenaltyFlags,
}

/// The legacy single-crew labor block.
///
/// Only used when no labor roles are supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyLabor {
    /// Number of workers.
    #[serde(deserialize_with = "lenient_decimal")]
    pub workers: Decimal,
    /// Total hours each worker spends on the job.
    #[serde(deserialize_with = "lenient_decimal")]
    pub hours_per_worker: Decimal,
    /// Days the job is spread over.
    #[serde(deserialize_with = "lenient_decimal")]
    pub job_duration_days: Decimal,
    /// Base hourly rate before oncosts and penalties.
    #[serde(deserialize_with = "lenient_decimal")]
    pub hourly_rate: Decimal,
    /// Penalty conditions for the crew.
    #[serde(flatten)]
    pub flags: PenaltyFlags,
}

/// Employer-side labor loading, as percentages of the base rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Oncosts {
    /// Superannuation guarantee percentage.
    #[serde(deserialize_with = "lenient_decimal")]
    pub superannuation_pct: Decimal,
    /// Workers' compensation premium percentage.
    #[serde(deserialize_with = "lenient_decimal")]
    pub workers_comp_pct: Decimal,
    /// Other statutory costs percentage (payroll tax, leave loading).
    #[serde(deserialize_with = "lenient_decimal")]
    pub other_costs_pct: Decimal,
}

impl Oncosts {
    /// Returns the rate multiplier `1 + (super + comp + other) / 100`, or
    /// `None` when the percentages overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use asphalt_estimator::models::Oncosts;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let oncosts = Oncosts {
    ///     superannuation_pct: Decimal::from(11),
    ///     workers_comp_pct: Decimal::from(2),
    ///     other_costs_pct: Decimal::ZERO,
    /// };
    /// assert_eq!(oncosts.multiplier(), Some(Decimal::from_str("1.13").unwrap()));
    /// ```
    pub fn multiplier(&self) -> Option<Decimal> {
        let total_pct = self
            .superannuation_pct
            .checked_add(self.workers_comp_pct)?
            .checked_add(self.other_costs_pct)?;
        Decimal::ONE.checked_add(total_pct / Decimal::ONE_HUNDRED)
    }
}

/// The source of truth for crew labor.
///
/// Chosen once when the input is built: a non-empty role list always wins
/// and the legacy block is dropped entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "detail", rename_all = "snake_case")]
pub enum LaborModel {
    /// A single crew described by the legacy block.
    Legacy(LegacyLabor),
    /// One entry per crew role.
    Roles(Vec<LaborRole>),
}

impl LaborModel {
    /// Picks the labor source from the two input sections.
    ///
    /// # Example
    ///
    /// ```
    /// use asphalt_estimator::models::{LaborModel, LaborRole, LegacyLabor};
    ///
    /// let model = LaborModel::from_sections(LegacyLabor::default(), vec![]);
    /// assert!(matches!(model, LaborModel::Legacy(_)));
    ///
    /// let model = LaborModel::from_sections(LegacyLabor::default(), vec![LaborRole::default()]);
    /// assert!(matches!(model, LaborModel::Roles(_)));
    /// ```
    pub fn from_sections(legacy: LegacyLabor, roles: Vec<LaborRole>) -> Self {
        if roles.is_empty() {
            LaborModel::Legacy(legacy)
        } else {
            LaborModel::Roles(roles)
        }
    }
}

impl Default for LaborModel {
    fn default() -> Self {
        LaborModel::Legacy(LegacyLabor::default())
    }
}

/// How an additional labor item is priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PricingMethod {
    /// Hours times an hourly rate.
    #[default]
    Hourly,
    /// A fixed lump sum.
    Fixed,
}

impl From<String> for PricingMethod {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "fixed" => PricingMethod::Fixed,
            _ => PricingMethod::Hourly,
        }
    }
}

impl From<PricingMethod> for String {
    fn from(method: PricingMethod) -> Self {
        match method {
            PricingMethod::Hourly => "hourly".to_string(),
            PricingMethod::Fixed => "fixed".to_string(),
        }
    }
}

/// Additional labor such as a line marking subcontractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtherLaborItem {
    /// Description of the labor.
    #[serde(rename = "type")]
    pub labor_type: String,
    /// Hourly or fixed pricing.
    pub pricing_method: PricingMethod,
    /// Hours, for hourly pricing.
    #[serde(deserialize_with = "lenient_optional_decimal")]
    pub hours: Option<Decimal>,
    /// Rate per hour, for hourly pricing.
    #[serde(deserialize_with = "lenient_optional_decimal")]
    pub cost_per_hour: Option<Decimal>,
    /// Lump sum, for fixed pricing.
    #[serde(deserialize_with = "lenient_optional_decimal")]
    pub fixed_amount: Option<Decimal>,
    /// Whether the supplier charges GST on top.
    #[serde(deserialize_with = "lenient_bool")]
    pub add_gst: bool,
}
