//! Enum-to-pipeline mapping and row types for catalog analytics.
//!
//! Pipelines are assembled exclusively from [`SearchParams`] variants; no
//! caller-supplied string is ever spliced into a field path.

use cauldron_core::analytics::{GroupBy, Metric, SearchParams};
use mongodb::bson::{doc, Bson, Document};
use serde::{Deserialize, Serialize};

/// Build the aggregation pipeline for the generic search operation.
///
/// Grouping by categories inserts a leading `$unwind` so each category
/// membership counts as a separate fact.
pub fn build_search_pipeline(params: &SearchParams) -> Vec<Document> {
    let group_path = format!("${}", params.group.field_name());

    let mut pipeline = Vec::with_capacity(2);
    if params.group == GroupBy::Categories {
        pipeline.push(doc! { "$unwind": group_path.clone() });
    }

    let group_stage = match params.metric {
        Metric::Count => doc! {
            "$group": { "_id": group_path, "count": { "$sum": 1 } }
        },
        Metric::Sum(field) => doc! {
            "$group": {
                "_id": group_path,
                "total": { "$sum": format!("${}", field.field_name()) },
            }
        },
        Metric::Avg(field) => doc! {
            "$group": {
                "_id": group_path,
                "average": { "$avg": format!("${}", field.field_name()) },
            }
        },
    };
    pipeline.push(group_stage);

    pipeline
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

// The `$group` stage emits the grouping key as `_id`; the rename is
// deserialize-only so the wire output reads `group_value`. Keys are `Bson`
// because permissive writes make no type guarantee for grouped fields.

/// Search row for `metric=count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCountRow {
    #[serde(rename(deserialize = "_id"))]
    pub group_value: Bson,
    pub count: i64,
}

/// Search row for `metric=sum`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupTotalRow {
    #[serde(rename(deserialize = "_id"))]
    pub group_value: Bson,
    pub total: f64,
}

/// Search row for `metric=avg`. The average is null for groups with no
/// numeric values under the target field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAverageRow {
    #[serde(rename(deserialize = "_id"))]
    pub group_value: Bson,
    pub average: Option<f64>,
}

/// Search results, shaped by the requested metric.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SearchRows {
    Count(Vec<GroupCountRow>),
    Total(Vec<GroupTotalRow>),
    Average(Vec<GroupAverageRow>),
}

/// Mean score per vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorScoreRow {
    #[serde(rename(deserialize = "_id"))]
    pub vendor_id: Bson,
    pub average_score: Option<f64>,
}

/// Mean score per category (after fan-out).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScoreRow {
    #[serde(rename(deserialize = "_id"))]
    pub category: Bson,
    pub average_score: Option<f64>,
}

/// Strength/flavor ratio for one potion.
///
/// Division happens host-side in f64, so a zero flavor yields a non-finite
/// value (serialized as JSON null) instead of aborting the aggregation. The
/// ratio is null outright when either rating is absent.
#[derive(Debug, Clone, Serialize)]
pub struct StrengthFlavorRow {
    pub id: String,
    pub ratio: Option<f64>,
}
