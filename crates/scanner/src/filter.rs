//! Single-criterion filter predicates.

use crate::criterion::{CriterionValue, ScanCriterion, StockContext};
use crate::error::ScanError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison applied between a stock's value and the filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    #[default]
    Gte,
    Lte,
    Eq,
    In,
    NotIn,
}

impl FilterOperator {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Eq => "eq",
            Self::In => "in",
            Self::NotIn => "not_in",
        }
    }

    /// Set operators take a list value; the others take a scalar.
    #[must_use]
    pub fn is_set_operator(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    fn apply(&self, actual: &CriterionValue, expected: &FilterValue) -> bool {
        match (self, expected) {
            (Self::Gte, FilterValue::Scalar(v)) => {
                matches!(actual.compare(v), Some(Ordering::Greater | Ordering::Equal))
            }
            (Self::Lte, FilterValue::Scalar(v)) => {
                matches!(actual.compare(v), Some(Ordering::Less | Ordering::Equal))
            }
            (Self::Eq, FilterValue::Scalar(v)) => actual.compare(v) == Some(Ordering::Equal),
            (Self::In, FilterValue::Set(values)) => values.contains(actual),
            (Self::NotIn, FilterValue::Set(values)) => !values.contains(actual),
            _ => false,
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gte" => Ok(Self::Gte),
            "lte" => Ok(Self::Lte),
            "eq" => Ok(Self::Eq),
            "in" => Ok(Self::In),
            "not_in" => Ok(Self::NotIn),
            _ => Err(ScanError::UnknownOperator(s.to_string())),
        }
    }
}

/// Right-hand side of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Set(Vec<CriterionValue>),
    Scalar(CriterionValue),
}

impl From<Decimal> for FilterValue {
    fn from(value: Decimal) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

/// One criterion, one operator, one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFilter {
    pub criterion: ScanCriterion,
    pub value: FilterValue,
    #[serde(default)]
    pub operator: FilterOperator,
}

impl ScanFilter {
    pub fn new(
        criterion: ScanCriterion,
        value: impl Into<FilterValue>,
        operator: FilterOperator,
    ) -> Self {
        Self {
            criterion,
            value: value.into(),
            operator,
        }
    }

    pub fn gte(criterion: ScanCriterion, value: impl Into<FilterValue>) -> Self {
        Self::new(criterion, value, FilterOperator::Gte)
    }

    pub fn lte(criterion: ScanCriterion, value: impl Into<FilterValue>) -> Self {
        Self::new(criterion, value, FilterOperator::Lte)
    }

    pub fn eq(criterion: ScanCriterion, value: impl Into<FilterValue>) -> Self {
        Self::new(criterion, value, FilterOperator::Eq)
    }

    pub fn one_of<I, V>(criterion: ScanCriterion, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CriterionValue>,
    {
        let set = values.into_iter().map(Into::into).collect();
        Self::new(criterion, FilterValue::Set(set), FilterOperator::In)
    }

    pub fn none_of<I, V>(criterion: ScanCriterion, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CriterionValue>,
    {
        let set = values.into_iter().map(Into::into).collect();
        Self::new(criterion, FilterValue::Set(set), FilterOperator::NotIn)
    }

    /// Builds a filter from textual criterion and operator tags.
    ///
    /// # Errors
    /// Returns a configuration error for an unknown tag or an ill-typed value.
    pub fn parse(criterion: &str, value: FilterValue, operator: &str) -> Result<Self, ScanError> {
        let filter = Self {
            criterion: criterion.parse()?,
            value,
            operator: operator.parse()?,
        };
        filter.validate()?;
        Ok(filter)
    }

    /// Checks that the value's shape suits the operator and its kind suits
    /// the criterion.
    ///
    /// # Errors
    /// Returns the first mismatch found.
    pub fn validate(&self) -> Result<(), ScanError> {
        match (&self.value, self.operator.is_set_operator()) {
            (FilterValue::Scalar(value), false) => self.criterion.expect_kind(value),
            (FilterValue::Set(values), true) => values
                .iter()
                .try_for_each(|value| self.criterion.expect_kind(value)),
            (FilterValue::Scalar(_), true) => Err(ScanError::ValueShapeMismatch {
                criterion: self.criterion,
                operator: self.operator,
                expected: "list",
            }),
            (FilterValue::Set(_), false) => Err(ScanError::ValueShapeMismatch {
                criterion: self.criterion,
                operator: self.operator,
                expected: "scalar",
            }),
        }
    }

    /// Returns true when the stock has the criterion's field and the
    /// comparison holds.
    pub fn matches(&self, ctx: &StockContext<'_>) -> bool {
        match self.criterion.extract(ctx) {
            Some(actual) => self.operator.apply(&actual, &self.value),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use divscan_domain::entities::{FinancialMetrics, StockSnapshot};
    use divscan_domain::metrics::DividendStats;
    use rust_decimal_macros::dec;

    fn check(filter: &ScanFilter, snapshot: &StockSnapshot) -> bool {
        let metrics = FinancialMetrics::default().with_pe_ratio(dec!(15));
        let stats = DividendStats::default();
        let ctx = StockContext {
            snapshot,
            metrics: &metrics,
            stats: &stats,
            as_of: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        filter.matches(&ctx)
    }

    fn utility() -> StockSnapshot {
        StockSnapshot::new("DUK", "Duke Energy")
            .with_sector("Utilities")
            .with_dividend_yield(dec!(0.04))
            .with_payout_ratio(dec!(0.75))
    }

    #[test]
    fn test_numeric_operators() {
        let stock = utility();
        assert!(check(&ScanFilter::gte(ScanCriterion::DividendYield, dec!(0.04)), &stock));
        assert!(!check(&ScanFilter::gte(ScanCriterion::DividendYield, dec!(0.041)), &stock));
        assert!(check(&ScanFilter::lte(ScanCriterion::PayoutRatio, dec!(0.8)), &stock));
        assert!(!check(&ScanFilter::lte(ScanCriterion::PayoutRatio, dec!(0.7)), &stock));
        assert!(check(&ScanFilter::eq(ScanCriterion::PeRatio, dec!(15.0)), &stock));
    }

    #[test]
    fn test_set_operators() {
        let stock = utility();
        let in_filter = ScanFilter::one_of(ScanCriterion::Sector, ["Utilities", "Energy"]);
        let not_in_filter = ScanFilter::none_of(ScanCriterion::Sector, ["Utilities"]);

        assert!(check(&in_filter, &stock));
        assert!(!check(&not_in_filter, &stock));
    }

    #[test]
    fn test_missing_field_fails_every_operator() {
        let bare = StockSnapshot::new("NEW", "Newly Listed");
        assert!(!check(&ScanFilter::gte(ScanCriterion::DividendYield, dec!(0)), &bare));
        assert!(!check(&ScanFilter::none_of(ScanCriterion::Sector, ["Energy"]), &bare));
        assert!(!check(&ScanFilter::gte(ScanCriterion::MarketCap, dec!(0)), &bare));
    }

    #[test]
    fn test_validation_rejects_ill_typed_filters() {
        let scalar_in = ScanFilter::new(ScanCriterion::Sector, "Energy", FilterOperator::In);
        assert!(matches!(
            scalar_in.validate(),
            Err(ScanError::ValueShapeMismatch { expected: "list", .. })
        ));

        let text_on_numeric = ScanFilter::gte(ScanCriterion::DividendYield, "high");
        assert!(matches!(
            text_on_numeric.validate(),
            Err(ScanError::ValueKindMismatch { .. })
        ));

        let set_gte = ScanFilter::new(
            ScanCriterion::DividendYield,
            FilterValue::Set(vec![dec!(0.01).into()]),
            FilterOperator::Gte,
        );
        assert!(set_gte.validate().is_err());

        assert!(ScanFilter::gte(ScanCriterion::DividendYield, dec!(0.03)).validate().is_ok());
    }

    #[test]
    fn test_parse_from_tags() {
        let filter = ScanFilter::parse("max_payout_ratio", dec!(0.8).into(), "lte").unwrap();
        assert_eq!(filter.criterion, ScanCriterion::PayoutRatio);
        assert_eq!(filter.operator, FilterOperator::Lte);

        assert_eq!(
            ScanFilter::parse("payout_ratio", dec!(0.8).into(), "between"),
            Err(ScanError::UnknownOperator("between".to_string()))
        );
    }

    #[test]
    fn test_deserialize_defaults_operator_to_gte() {
        let filter: ScanFilter =
            serde_json::from_str(r#"{"criterion": "min_roe", "value": 0.15}"#).unwrap();
        assert_eq!(filter.criterion, ScanCriterion::ReturnOnEquity);
        assert_eq!(filter.operator, FilterOperator::Gte);
        assert_eq!(filter.value, FilterValue::from(dec!(0.15)));

        let sectors: ScanFilter = serde_json::from_str(
            r#"{"criterion": "sectors", "value": ["Utilities"], "operator": "in"}"#,
        )
        .unwrap();
        assert!(sectors.validate().is_ok());
    }
}
