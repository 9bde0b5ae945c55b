//! Parameter vocabulary for the generic catalog search aggregation.
//!
//! Query-string parameters parse into closed enums before any pipeline is
//! built, so only known field names can ever reach the store's aggregation
//! language. The store layer maps these enums to concrete pipeline stages.

use std::str::FromStr;

use crate::error::CoreError;

/// Grouping key for the search aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// Group by the owning vendor.
    VendorId,
    /// Group by category membership. Multi-category potions contribute one
    /// fact per category, so the pipeline fans out before grouping.
    Categories,
}

impl GroupBy {
    /// Document field name this grouping reads.
    pub fn field_name(self) -> &'static str {
        match self {
            GroupBy::VendorId => "vendor_id",
            GroupBy::Categories => "categories",
        }
    }
}

impl FromStr for GroupBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vendor_id" => Ok(GroupBy::VendorId),
            "categories" => Ok(GroupBy::Categories),
            _ => Err(CoreError::validation(
                "group must be one of: vendor_id, categories",
            )),
        }
    }
}

/// Numeric fields the avg/sum metrics may aggregate over.
///
/// This is the allow-list the raw `field` parameter is checked against; an
/// unknown name is a validation failure, never a pipeline input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    Score,
    Price,
    Count,
}

impl MetricField {
    /// Document field name this metric reads.
    pub fn field_name(self) -> &'static str {
        match self {
            MetricField::Score => "score",
            MetricField::Price => "price",
            MetricField::Count => "count",
        }
    }
}

impl FromStr for MetricField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" => Ok(MetricField::Score),
            "price" => Ok(MetricField::Price),
            "count" => Ok(MetricField::Count),
            _ => Err(CoreError::validation(
                "field must be one of: score, price, count",
            )),
        }
    }
}

/// Aggregation metric, carrying its target field where one applies.
///
/// Avg and sum cannot exist without a field, and count cannot carry one, so
/// the "field required only for avg/sum" rule is structural rather than a
/// runtime check downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Avg(MetricField),
    Sum(MetricField),
    Count,
}

/// Fully validated search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub group: GroupBy,
    pub metric: Metric,
}

impl SearchParams {
    /// Parse raw query-string values into validated parameters.
    ///
    /// `group` and `metric` are required. `field` is required for avg/sum
    /// and ignored for count.
    pub fn from_query(
        group: Option<&str>,
        metric: Option<&str>,
        field: Option<&str>,
    ) -> Result<Self, CoreError> {
        let group = group
            .ok_or_else(|| CoreError::validation("group parameter is required"))?
            .parse::<GroupBy>()?;

        let metric = match metric
            .ok_or_else(|| CoreError::validation("metric parameter is required"))?
        {
            "count" => Metric::Count,
            kind @ ("avg" | "sum") => {
                let field = field
                    .ok_or_else(|| {
                        CoreError::validation("field parameter is required for avg and sum")
                    })?
                    .parse::<MetricField>()?;
                if kind == "avg" {
                    Metric::Avg(field)
                } else {
                    Metric::Sum(field)
                }
            }
            _ => {
                return Err(CoreError::validation(
                    "metric must be one of: avg, sum, count",
                ))
            }
        };

        Ok(SearchParams { group, metric })
    }
}
