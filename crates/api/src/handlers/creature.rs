//! Handlers for the `/bestiary` resource.
//!
//! Read endpoints that select by name, category or filter answer with 404
//! when nothing matches. The write endpoints wrap the affected creature in a
//! confirmation message.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bestiary_core::creature::{Creature, CreatureUpdate, NewCreature};
use bestiary_core::error::CoreError;
use bestiary_core::export::{build_csv, ExportFormat};
use bestiary_core::query::CreatureFilter;
use bestiary_core::stats::{CategoryCount, CreatureStats};
use bestiary_db::repositories::CreatureRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, QueryParams};
use crate::query::{DangerRangeParams, ExportParams, ListParams, RandomParams, SearchParams};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// One page of the full listing.
#[derive(Debug, Serialize)]
pub struct CreaturePage {
    pub creatures: Vec<Creature>,
    /// Number of creatures in the bestiary, ignoring pagination.
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Confirmation returned by `POST /add`.
#[derive(Debug, Serialize)]
pub struct CreatureAdded {
    pub creature: Creature,
    pub message: String,
}

/// Confirmation returned by `PUT /update/{name}`.
#[derive(Debug, Serialize)]
pub struct CreatureUpdated {
    pub message: String,
    pub creature: Creature,
}

fn missing(name: &str) -> AppError {
    AppError::not_found(format!("Creature '{name}' not found in the bestiary"))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /bestiary/list
///
/// Paginated listing of every creature. An empty page is a 404.
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<DataResponse<CreaturePage>>> {
    let query = params.into_query(CreatureFilter::default())?;
    let creatures = CreatureRepo::search(&state.pool, &query).await?;
    if creatures.is_empty() {
        return Err(AppError::not_found("No creatures found for the requested page"));
    }
    let total = CreatureRepo::count(&state.pool, &query.filter).await?;
    Ok(Json(DataResponse {
        data: CreaturePage {
            creatures,
            total,
            limit: query.page.limit,
            offset: query.page.offset,
        },
    }))
}

/// GET /bestiary/info/{name}
pub async fn info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<Creature>>> {
    let creature = CreatureRepo::find_by_name(&state.pool, &name)
        .await?
        .ok_or_else(|| missing(&name))?;
    Ok(Json(DataResponse { data: creature }))
}

/// GET /bestiary/search
///
/// Name-prefix, category and danger-range filters, combined with AND.
pub async fn search(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Creature>>>> {
    let query = params.into_query()?;
    let creatures = CreatureRepo::search(&state.pool, &query).await?;
    if creatures.is_empty() {
        return Err(AppError::not_found("No creatures match the search criteria"));
    }
    Ok(Json(DataResponse { data: creatures }))
}

/// GET /bestiary/category/{name}
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Creature>>>> {
    let query = params.into_query(CreatureFilter::by_category(category.clone()))?;
    let creatures = CreatureRepo::search(&state.pool, &query).await?;
    if creatures.is_empty() {
        return Err(AppError::not_found(format!(
            "No creatures in category '{category}'"
        )));
    }
    Ok(Json(DataResponse { data: creatures }))
}

/// GET /bestiary/categories
///
/// Category histogram, largest category first.
pub async fn categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryCount>>>> {
    let counts = CreatureRepo::category_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: counts }))
}

/// GET /bestiary/dangerous
///
/// Creatures within a danger range: above `threshold` (default 50) or from
/// `min`, up to `max` (default 100). An empty result is still a 200.
pub async fn dangerous(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<DangerRangeParams>,
) -> AppResult<Json<DataResponse<Vec<Creature>>>> {
    let (min, max) = params.resolve()?;
    let creatures = CreatureRepo::in_danger_range(&state.pool, min, max).await?;
    Ok(Json(DataResponse { data: creatures }))
}

/// GET /bestiary/random
pub async fn random(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<RandomParams>,
) -> AppResult<Json<DataResponse<Creature>>> {
    let category = params.category();
    match CreatureRepo::random(&state.pool, category).await? {
        Some(creature) => Ok(Json(DataResponse { data: creature })),
        None => Err(match category {
            Some(c) => AppError::not_found(format!("No creatures in category '{c}'")),
            None => AppError::not_found("The bestiary is empty"),
        }),
    }
}

/// GET /bestiary/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<CreatureStats>>> {
    let stats = CreatureRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /bestiary/export?format=json|csv
///
/// Full dump as a file download. JSON keeps list fields as arrays; CSV joins
/// them with `", "`.
pub async fn export(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ExportParams>,
) -> AppResult<Response> {
    let format = match params.format.as_deref() {
        Some(raw) => raw.parse::<ExportFormat>()?,
        None => ExportFormat::default(),
    };

    let creatures = CreatureRepo::list_all(&state.pool).await?;
    tracing::debug!(count = creatures.len(), format = format.extension(), "Exporting bestiary");

    let body = match format {
        ExportFormat::Json => serde_json::to_string(&DataResponse { data: &creatures })
            .map_err(|e| AppError::InternalError(format!("Failed to serialize export: {e}")))?,
        ExportFormat::Csv => build_csv(&creatures),
    };

    let headers = [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (header::CONTENT_DISPOSITION, format.content_disposition()),
    ];
    Ok((headers, body).into_response())
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /bestiary/add
///
/// Returns 400 `CONFLICT` if the name is already taken.
pub async fn add(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewCreature>,
) -> AppResult<Json<DataResponse<CreatureAdded>>> {
    input.validate()?;

    let creature = CreatureRepo::create(&state.pool, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Creature '{}' already exists in the bestiary",
                input.name
            )))
        })?;

    tracing::info!(id = creature.id, name = %creature.name, "Creature added");

    let message = format!("{} added to the bestiary", creature.name);
    Ok(Json(DataResponse {
        data: CreatureAdded { creature, message },
    }))
}

/// PUT /bestiary/update/{name}
///
/// Partial update. Absent fields are kept; `null` clears an optional field.
pub async fn update(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonBody(input): JsonBody<CreatureUpdate>,
) -> AppResult<Json<DataResponse<CreatureUpdated>>> {
    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Update must set at least one field".into(),
        )));
    }
    input.validate()?;

    let creature = CreatureRepo::update(&state.pool, &name, &input)
        .await?
        .ok_or_else(|| missing(&name))?;

    tracing::info!(id = creature.id, name = %creature.name, "Creature updated");

    Ok(Json(DataResponse {
        data: CreatureUpdated {
            message: format!("{name} updated in the bestiary"),
            creature,
        },
    }))
}

/// DELETE /bestiary/remove/{name}
pub async fn remove(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    if !CreatureRepo::delete(&state.pool, &name).await? {
        return Err(missing(&name));
    }

    tracing::info!(name = %name, "Creature removed");

    Ok(Json(DataResponse {
        data: MessageResponse {
            message: format!("{name} removed from the bestiary"),
        },
    }))
}
