pub mod creature;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the catalog route tree.
///
/// Route hierarchy:
///
/// ```text
/// /bestiary/list                   paginated listing
/// /bestiary/info/{name}            single creature
/// /bestiary/search                 filtered search
/// /bestiary/category/{name}        creatures in one category
/// /bestiary/categories             category histogram
/// /bestiary/dangerous              danger range
/// /bestiary/random                 random pick
/// /bestiary/stats                  aggregate statistics
/// /bestiary/export                 JSON or CSV download
/// /bestiary/add                    create (POST)
/// /bestiary/update/{name}          partial update (PUT)
/// /bestiary/remove/{name}          delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/bestiary", creature::router())
}
