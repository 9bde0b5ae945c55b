//! Repository for the `potions` collection: CRUD queries and the analytics
//! aggregations.

use cauldron_core::analytics::{Metric, SearchParams};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};
use serde::Deserialize;

use crate::analytics::{
    build_search_pipeline, CategoryScoreRow, GroupAverageRow, GroupCountRow, GroupTotalRow,
    SearchRows, StrengthFlavorRow, VendorScoreRow,
};
use crate::models::potion::{
    CreatePotion, DeleteReport, Potion, Ratings, UpdatePotion, UpdateReport,
};

const COLLECTION: &str = "potions";

/// Provides catalog queries over potions.
pub struct PotionRepo;

impl PotionRepo {
    fn collection(db: &Database) -> Collection<Potion> {
        db.collection::<Potion>(COLLECTION)
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// List every potion. Unbounded: the catalog has no pagination.
    pub async fn list_all(db: &Database) -> Result<Vec<Potion>, mongodb::error::Error> {
        let cursor = Self::collection(db).find(doc! {}).await?;
        cursor.try_collect().await
    }

    /// List only the `name` values, via a projection query.
    pub async fn list_names(db: &Database) -> Result<Vec<String>, mongodb::error::Error> {
        #[derive(Deserialize)]
        struct NameOnly {
            name: String,
        }

        let cursor = db
            .collection::<NameOnly>(COLLECTION)
            .find(doc! {})
            .projection(doc! { "name": 1, "_id": 0 })
            .await?;
        let rows: Vec<NameOnly> = cursor.try_collect().await?;
        Ok(rows.into_iter().map(|row| row.name).collect())
    }

    /// List every potion owned by the given vendor. An unknown vendor is an
    /// empty list, not an error.
    pub async fn list_by_vendor(
        db: &Database,
        vendor_id: &str,
    ) -> Result<Vec<Potion>, mongodb::error::Error> {
        let cursor = Self::collection(db)
            .find(doc! { "vendor_id": vendor_id })
            .await?;
        cursor.try_collect().await
    }

    /// List potions priced strictly between `min` and `max` (both bounds
    /// exclusive).
    ///
    /// NaN bounds (the coercion of non-numeric caller input) can never be
    /// satisfied under IEEE comparison, so the round-trip is skipped rather
    /// than letting BSON ordering reinterpret NaN.
    pub async fn list_by_price_range(
        db: &Database,
        min: f64,
        max: f64,
    ) -> Result<Vec<Potion>, mongodb::error::Error> {
        if min.is_nan() || max.is_nan() {
            return Ok(Vec::new());
        }
        let cursor = Self::collection(db)
            .find(doc! { "price": { "$gt": min, "$lt": max } })
            .await?;
        cursor.try_collect().await
    }

    /// Point lookup by id.
    pub async fn find_by_id(
        db: &Database,
        id: ObjectId,
    ) -> Result<Option<Potion>, mongodb::error::Error> {
        Self::collection(db).find_one(doc! { "_id": id }).await
    }

    /// Insert a new potion and return it with its assigned id.
    ///
    /// Extras are stored verbatim, except a smuggled `_id`, which is dropped
    /// so the store always assigns the identity. Returns `None` only if the
    /// driver reports a non-ObjectId inserted id, which cannot happen after
    /// that strip.
    pub async fn create(
        db: &Database,
        input: &CreatePotion,
    ) -> Result<Option<Potion>, mongodb::error::Error> {
        let mut input = input.clone();
        input.extra.remove("_id");

        let result = db
            .collection::<CreatePotion>(COLLECTION)
            .insert_one(&input)
            .await?;

        Ok(result.inserted_id.as_object_id().map(|id| Potion {
            id,
            name: input.name,
            price: input.price,
            score: input.score,
            count: input.count,
            ingredients: input.ingredients,
            ratings: input.ratings,
            categories: input.categories,
            vendor_id: input.vendor_id,
            extra: input.extra,
        }))
    }

    /// Merge the supplied fields into an existing potion via `$set`.
    ///
    /// Returns the match/modify counts; the caller decides what a zero
    /// match means.
    pub async fn update(
        db: &Database,
        id: ObjectId,
        input: &UpdatePotion,
    ) -> Result<UpdateReport, mongodb::error::Error> {
        let set = input.set_document();

        // The server rejects an empty $set; an empty payload is a no-op
        // that still reports whether the id matched.
        if set.is_empty() {
            let matched = Self::find_by_id(db, id).await?.is_some();
            return Ok(UpdateReport {
                matched_count: u64::from(matched),
                modified_count: 0,
            });
        }

        let result = Self::collection(db)
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;
        Ok(UpdateReport {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    /// Delete a potion. A zero deleted count is a success descriptor.
    pub async fn delete(
        db: &Database,
        id: ObjectId,
    ) -> Result<DeleteReport, mongodb::error::Error> {
        let result = Self::collection(db).delete_one(doc! { "_id": id }).await?;
        Ok(DeleteReport {
            deleted_count: result.deleted_count,
        })
    }

    // -----------------------------------------------------------------------
    // Analytics
    // -----------------------------------------------------------------------

    /// Number of distinct categories across the whole catalog.
    pub async fn distinct_category_count(db: &Database) -> Result<i64, mongodb::error::Error> {
        #[derive(Deserialize)]
        struct CountRow {
            distinct_categories: i64,
        }

        let pipeline = vec![
            doc! { "$unwind": "$categories" },
            doc! { "$group": { "_id": "$categories" } },
            doc! { "$count": "distinct_categories" },
        ];
        let mut cursor = Self::collection(db)
            .aggregate(pipeline)
            .with_type::<CountRow>()
            .await?;

        // $count emits no row at all over an empty input.
        Ok(cursor
            .try_next()
            .await?
            .map_or(0, |row| row.distinct_categories))
    }

    /// Mean score per vendor.
    pub async fn average_score_by_vendor(
        db: &Database,
    ) -> Result<Vec<VendorScoreRow>, mongodb::error::Error> {
        let pipeline = vec![doc! {
            "$group": { "_id": "$vendor_id", "average_score": { "$avg": "$score" } }
        }];
        let cursor = Self::collection(db)
            .aggregate(pipeline)
            .with_type::<VendorScoreRow>()
            .await?;
        cursor.try_collect().await
    }

    /// Mean score per category, one fact per category membership.
    pub async fn average_score_by_category(
        db: &Database,
    ) -> Result<Vec<CategoryScoreRow>, mongodb::error::Error> {
        let pipeline = vec![
            doc! { "$unwind": "$categories" },
            doc! { "$group": { "_id": "$categories", "average_score": { "$avg": "$score" } } },
        ];
        let cursor = Self::collection(db)
            .aggregate(pipeline)
            .with_type::<CategoryScoreRow>()
            .await?;
        cursor.try_collect().await
    }

    /// Strength/flavor ratio per potion, computed host-side in f64 so a
    /// zero flavor follows float semantics instead of aborting the query.
    pub async fn strength_flavor_ratios(
        db: &Database,
    ) -> Result<Vec<StrengthFlavorRow>, mongodb::error::Error> {
        #[derive(Deserialize)]
        struct RatingsOnly {
            #[serde(rename = "_id")]
            id: ObjectId,
            ratings: Option<Ratings>,
        }

        let cursor = db
            .collection::<RatingsOnly>(COLLECTION)
            .find(doc! {})
            .projection(doc! { "ratings": 1 })
            .await?;
        let rows: Vec<RatingsOnly> = cursor.try_collect().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let ratio = row.ratings.and_then(|r| match (r.strength, r.flavor) {
                    (Some(strength), Some(flavor)) => Some(strength / flavor),
                    _ => None,
                });
                StrengthFlavorRow {
                    id: row.id.to_hex(),
                    ratio,
                }
            })
            .collect())
    }

    /// Run the generic search aggregation for validated parameters.
    pub async fn search(
        db: &Database,
        params: &SearchParams,
    ) -> Result<SearchRows, mongodb::error::Error> {
        let pipeline = build_search_pipeline(params);
        let collection = Self::collection(db);

        let rows = match params.metric {
            Metric::Count => SearchRows::Count(
                collection
                    .aggregate(pipeline)
                    .with_type::<GroupCountRow>()
                    .await?
                    .try_collect()
                    .await?,
            ),
            Metric::Sum(_) => SearchRows::Total(
                collection
                    .aggregate(pipeline)
                    .with_type::<GroupTotalRow>()
                    .await?
                    .try_collect()
                    .await?,
            ),
            Metric::Avg(_) => SearchRows::Average(
                collection
                    .aggregate(pipeline)
                    .with_type::<GroupAverageRow>()
                    .await?
                    .try_collect()
                    .await?,
            ),
        };
        Ok(rows)
    }
}
