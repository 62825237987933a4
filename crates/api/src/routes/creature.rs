use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::creature;
use crate::state::AppState;

/// Routes mounted under `/bestiary`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(creature::list))
        .route("/info/{name}", get(creature::info))
        .route("/search", get(creature::search))
        .route("/category/{name}", get(creature::by_category))
        .route("/categories", get(creature::categories))
        .route("/dangerous", get(creature::dangerous))
        .route("/random", get(creature::random))
        .route("/stats", get(creature::stats))
        .route("/export", get(creature::export))
        .route("/add", post(creature::add))
        .route("/update/{name}", put(creature::update))
        .route("/remove/{name}", delete(creature::remove))
}
