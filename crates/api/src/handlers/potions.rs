//! Handlers for the `/potions` CRUD surface. All routes require a session.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cauldron_core::error::CoreError;
use cauldron_db::models::potion::{
    CreatePotion, DeleteReport, PotionResponse, UpdatePotion, UpdateReport,
};
use cauldron_db::repositories::PotionRepo;
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /potions/price-range`.
///
/// Kept as raw strings: non-numeric input coerces to NaN below instead of
/// rejecting the request.
#[derive(Debug, Deserialize)]
pub struct PriceRangeQuery {
    pub min: Option<String>,
    pub max: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /potions/all
///
/// Every potion in the catalog. Unbounded: no pagination or limit.
pub async fn list_all(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PotionResponse>>>> {
    let potions = PotionRepo::list_all(&state.db).await?;
    Ok(Json(DataResponse {
        data: potions.into_iter().map(PotionResponse::from).collect(),
    }))
}

/// GET /potions/names
///
/// Just the potion names, from a projection-only query.
pub async fn list_names(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let names = PotionRepo::list_names(&state.db).await?;
    Ok(Json(DataResponse { data: names }))
}

/// GET /potions/vendor/{vendor_id}
///
/// All potions owned by one vendor. An unknown vendor yields an empty
/// list; vendor ids themselves are not checked for existence.
pub async fn list_by_vendor(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<PotionResponse>>>> {
    let potions = PotionRepo::list_by_vendor(&state.db, &vendor_id).await?;
    Ok(Json(DataResponse {
        data: potions.into_iter().map(PotionResponse::from).collect(),
    }))
}

/// GET /potions/price-range?min=X&max=Y
///
/// Potions priced strictly between the bounds (both exclusive).
pub async fn list_by_price_range(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<PriceRangeQuery>,
) -> AppResult<Json<DataResponse<Vec<PotionResponse>>>> {
    let min = parse_price_bound(query.min.as_deref());
    let max = parse_price_bound(query.max.as_deref());

    let potions = PotionRepo::list_by_price_range(&state.db, min, max).await?;
    Ok(Json(DataResponse {
        data: potions.into_iter().map(PotionResponse::from).collect(),
    }))
}

/// GET /potions/{id}
///
/// Single potion by id. A malformed id is indistinguishable from an absent
/// one: both are 404, never a server error.
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<PotionResponse>>> {
    let object_id = parse_object_id(&id)?;
    let potion = PotionRepo::find_by_id(&state.db, object_id)
        .await?
        .ok_or_else(|| potion_not_found(&id))?;
    Ok(Json(DataResponse {
        data: PotionResponse::from(potion),
    }))
}

/// POST /potions
///
/// Create a potion. `name` is the only required field; undocumented extra
/// fields are stored as-is. Returns the created record with its id.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePotion>,
) -> AppResult<(StatusCode, Json<DataResponse<PotionResponse>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::validation("name is required")));
    }

    let created = PotionRepo::create(&state.db, &input)
        .await?
        .ok_or_else(|| AppError::InternalError("Store did not assign an ObjectId".into()))?;

    tracing::info!(user = %user.username, potion_id = %created.id, "Potion created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PotionResponse::from(created),
        }),
    ))
}

/// PUT /potions/{id}
///
/// Merge the supplied fields into an existing potion. Responds with the
/// match/modify counts rather than the updated document.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePotion>,
) -> AppResult<Json<DataResponse<UpdateReport>>> {
    let object_id = parse_object_id(&id)?;
    let report = PotionRepo::update(&state.db, object_id, &input).await?;

    tracing::info!(
        user = %user.username,
        potion_id = %id,
        matched = report.matched_count,
        modified = report.modified_count,
        "Potion updated",
    );

    Ok(Json(DataResponse { data: report }))
}

/// DELETE /potions/{id}
///
/// Remove a potion. Deleting a nonexistent id is still a success, with a
/// zero deleted count.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<DeleteReport>>> {
    let object_id = parse_object_id(&id)?;
    let report = PotionRepo::delete(&state.db, object_id).await?;

    tracing::info!(
        user = %user.username,
        potion_id = %id,
        deleted = report.deleted_count,
        "Potion deleted",
    );

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Coerce a raw price bound the way a dynamic runtime's `Number()` would:
/// anything that does not parse as a float becomes NaN, which downstream
/// matches no document.
fn parse_price_bound(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Parse a path id, mapping malformed input to the same not-found outcome
/// as an absent document.
fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| potion_not_found(raw))
}

fn potion_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "potion",
        id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_bound_parses_numbers() {
        assert_eq!(parse_price_bound(Some("10")), 10.0);
        assert_eq!(parse_price_bound(Some(" 19.99 ")), 19.99);
        assert_eq!(parse_price_bound(Some("-3")), -3.0);
    }

    #[test]
    fn test_price_bound_coerces_garbage_to_nan() {
        assert!(parse_price_bound(Some("cheap")).is_nan());
        assert!(parse_price_bound(Some("")).is_nan());
        assert!(parse_price_bound(None).is_nan());
    }

    #[test]
    fn test_malformed_object_id_is_not_found() {
        let err = parse_object_id("definitely-not-hex").expect_err("must fail");
        assert!(matches!(
            err,
            AppError::Core(CoreError::NotFound { entity: "potion", .. })
        ));
    }
}
