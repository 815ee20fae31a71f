//! Policy configuration: budgets, category authorizations, claim statistics
//!
//! Loaded once at process start and treated as immutable afterwards.
//! Every field has a default, so a partial JSON file only overrides what
//! it names.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ComplianceError, ComplianceResult};

/// Maximum allowed amount per expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetTable(BTreeMap<String, Decimal>);

impl BudgetTable {
    pub fn new(limits: impl IntoIterator<Item = (impl Into<String>, Decimal)>) -> Self {
        Self(limits.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Budget limit for a category, `None` if the category is not budgeted
    pub fn limit_for(&self, category: &str) -> Option<Decimal> {
        self.0.get(category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for BudgetTable {
    fn default() -> Self {
        Self::new([
            ("Travel", Decimal::new(10_000, 0)),
            ("Meals", Decimal::new(3_000, 0)),
            ("Supplies", Decimal::new(5_000, 0)),
        ])
    }
}

/// Categories each department may claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAuthorizationTable(BTreeMap<String, BTreeSet<String>>);

impl CategoryAuthorizationTable {
    pub fn new<D, C>(entries: impl IntoIterator<Item = (D, C)>) -> Self
    where
        D: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(|(dept, cats)| (dept.into(), cats.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }

    /// Whether `department` may claim `category`.
    ///
    /// `None` when the department is unknown: the rule does not apply.
    pub fn authorizes(&self, department: &str, category: &str) -> Option<bool> {
        self.0
            .get(department)
            .map(|allowed| allowed.contains(category))
    }

    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl Default for CategoryAuthorizationTable {
    fn default() -> Self {
        Self::new([
            ("Engineering", vec!["Travel", "Meals", "Supplies"]),
            ("IT", vec!["Travel", "Supplies"]),
            ("Finance", vec!["Travel", "Meals"]),
            ("HR", vec!["Meals"]),
            ("Operations", vec!["Travel", "Meals", "Supplies"]),
            ("Sales", vec!["Travel", "Meals"]),
            ("Marketing", vec!["Travel", "Meals", "Supplies"]),
        ])
    }
}

/// Historical claim statistics used for outlier detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingStatistics {
    pub median: Decimal,
    pub std: Decimal,
}

impl TrainingStatistics {
    /// Number of standard deviations above the median that counts as an outlier
    pub const OUTLIER_SIGMAS: u32 = 3;

    pub fn new(median: Decimal, std: Decimal) -> Self {
        Self { median, std }
    }

    /// `median + 3 * std`
    pub fn outlier_threshold(&self) -> Decimal {
        self.median + Decimal::from(Self::OUTLIER_SIGMAS) * self.std
    }
}

impl Default for TrainingStatistics {
    fn default() -> Self {
        Self::new(Decimal::new(5_000, 0), Decimal::new(2_500, 0))
    }
}

/// Full policy configuration for the Compliance Engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Currency the budgets are denominated in (used in messages)
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub budgets: BudgetTable,

    #[serde(default)]
    pub authorized_categories: CategoryAuthorizationTable,

    /// `null` disables the outlier rule
    #[serde(default = "default_training_stats")]
    pub training_stats: Option<TrainingStatistics>,
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_training_stats() -> Option<TrainingStatistics> {
    Some(TrainingStatistics::default())
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            budgets: BudgetTable::default(),
            authorized_categories: CategoryAuthorizationTable::default(),
            training_stats: default_training_stats(),
        }
    }
}

impl PolicyConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file(path: &Path) -> ComplianceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tables that could never be satisfied
    pub fn validate(&self) -> ComplianceResult<()> {
        if self.currency.trim().is_empty() {
            return Err(ComplianceError::ConfigError("currency must not be empty".into()));
        }
        if let Some((category, limit)) = self.budgets.iter().find(|(_, l)| l.is_sign_negative()) {
            return Err(ComplianceError::ConfigError(format!(
                "budget for {category} is negative: {limit}"
            )));
        }
        if let Some(stats) = &self.training_stats {
            if stats.std.is_sign_negative() {
                return Err(ComplianceError::ConfigError(format!(
                    "training std is negative: {}",
                    stats.std
                )));
            }
        }
        Ok(())
    }

    /// SHA-256 over the canonical JSON form of the policy.
    ///
    /// Map keys are sorted and amounts normalized, so key order and
    /// trailing zeros do not change the result.
    pub fn fingerprint(&self) -> ComplianceResult<String> {
        let canonical = Self {
            currency: self.currency.clone(),
            budgets: BudgetTable(
                self.budgets
                    .iter()
                    .map(|(category, limit)| (category.to_string(), limit.normalize()))
                    .collect(),
            ),
            authorized_categories: self.authorized_categories.clone(),
            training_stats: self
                .training_stats
                .map(|stats| TrainingStatistics::new(stats.median.normalize(), stats.std.normalize())),
        };

        let bytes = serde_json::to_vec(&canonical)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}
