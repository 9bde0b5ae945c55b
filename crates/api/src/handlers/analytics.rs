//! Handlers for the read-only `/potions/analytics` surface.

use axum::extract::{Query, State};
use axum::Json;
use cauldron_core::analytics::SearchParams;
use cauldron_db::analytics::{
    CategoryScoreRow, SearchRows, StrengthFlavorRow, VendorScoreRow,
};
use cauldron_db::repositories::PotionRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Raw query parameters for `GET /potions/analytics/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub group: Option<String>,
    pub metric: Option<String>,
    pub field: Option<String>,
}

/// GET /potions/analytics/distinct-categories
///
/// Number of distinct categories across the catalog, counting each
/// category value once however many potions carry it.
pub async fn distinct_categories(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<i64>>> {
    let count = PotionRepo::distinct_category_count(&state.db).await?;
    Ok(Json(DataResponse { data: count }))
}

/// GET /potions/analytics/average-score-by-vendor
pub async fn average_score_by_vendor(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<VendorScoreRow>>>> {
    let rows = PotionRepo::average_score_by_vendor(&state.db).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /potions/analytics/average-score-by-category
///
/// Categories fan out first, so a two-category potion contributes its
/// score to both groups.
pub async fn average_score_by_category(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryScoreRow>>>> {
    let rows = PotionRepo::average_score_by_category(&state.db).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /potions/analytics/strength-flavor-ratio
///
/// Per-potion strength/flavor ratio under f64 division; a zero flavor
/// serializes as null rather than failing the request.
pub async fn strength_flavor_ratio(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<StrengthFlavorRow>>>> {
    let rows = PotionRepo::strength_flavor_ratios(&state.db).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /potions/analytics/search?group=&metric=&field=
///
/// Generic grouping query. Parameters are validated into enums before any
/// pipeline is built; invalid input is a 400 and the store is never hit.
pub async fn search(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<DataResponse<SearchRows>>> {
    let params = SearchParams::from_query(
        query.group.as_deref(),
        query.metric.as_deref(),
        query.field.as_deref(),
    )?;

    let rows = PotionRepo::search(&state.db, &params).await?;
    Ok(Json(DataResponse { data: rows }))
}
