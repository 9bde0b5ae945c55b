pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{analytics, auth, potions};
use crate::state::AppState;

/// Build the `/auth` route tree.
///
/// ```text
/// /auth/register      create account (public)
/// /auth/login         authenticate, set session cookie (public)
/// /auth/logout        clear session cookie (public)
/// ```
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
}

/// Build the `/potions` route tree. Every route requires a valid session.
///
/// ```text
/// /potions                                      create (POST)
/// /potions/all                                  list all
/// /potions/names                                name projection
/// /potions/vendor/{vendor_id}                   list by vendor
/// /potions/price-range?min=&max=                exclusive price bounds
/// /potions/analytics/distinct-categories        distinct category count
/// /potions/analytics/average-score-by-vendor    mean score per vendor
/// /potions/analytics/average-score-by-category  mean score per category
/// /potions/analytics/strength-flavor-ratio      per-potion ratio
/// /potions/analytics/search?group=&metric=&field=  generic grouping
/// /potions/{id}                                 get, update, delete
/// ```
pub fn potion_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(potions::create))
        .route("/all", get(potions::list_all))
        .route("/names", get(potions::list_names))
        .route("/vendor/{vendor_id}", get(potions::list_by_vendor))
        .route("/price-range", get(potions::list_by_price_range))
        .route(
            "/analytics/distinct-categories",
            get(analytics::distinct_categories),
        )
        .route(
            "/analytics/average-score-by-vendor",
            get(analytics::average_score_by_vendor),
        )
        .route(
            "/analytics/average-score-by-category",
            get(analytics::average_score_by_category),
        )
        .route(
            "/analytics/strength-flavor-ratio",
            get(analytics::strength_flavor_ratio),
        )
        .route("/analytics/search", get(analytics::search))
        .route(
            "/{id}",
            get(potions::get_by_id)
                .put(potions::update)
                .delete(potions::delete),
        )
}
