//! Repository for the `creatures` table.
//!
//! Covers CRUD by name, filtered/sorted/paginated retrieval, the category
//! histogram, aggregate statistics, random selection and the full export.
//! Every write runs in its own transaction.

use bestiary_core::codec::encode_list;
use bestiary_core::creature::{Creature, CreatureUpdate, NewCreature};
use bestiary_core::query::{fold_name, like_prefix_pattern, CreatureFilter, CreatureQuery};
use bestiary_core::random::pick_index;
use bestiary_core::stats::{CategoryCount, CreatureStats};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::creature::{CategoryCountRow, CreatureRow, DangerStatRow};

/// Column list for `creatures` queries.
const CREATURE_COLUMNS: &str = "\
    id, name, description, danger_level, habitat, quote, category, \
    abilities, related_works, image_url, status, min_insanity, \
    relations, audio_url, video_url";

/// Provides all persistence operations for creatures.
pub struct CreatureRepo;

impl CreatureRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a new creature.
    ///
    /// Returns `None` without touching the table if a creature with the same
    /// name already exists.
    pub async fn create(
        pool: &SqlitePool,
        input: &NewCreature,
    ) -> Result<Option<Creature>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO creatures \
                 (name, description, danger_level, habitat, quote, category, \
                  abilities, related_works, image_url, status, min_insanity, \
                  relations, audio_url, video_url, name_folded) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15) \
             ON CONFLICT (name) DO NOTHING \
             RETURNING {CREATURE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CreatureRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.danger_level)
            .bind(&input.habitat)
            .bind(input.quote.as_deref())
            .bind(&input.category)
            .bind(encode_list(&input.abilities))
            .bind(encode_list(&input.related_works))
            .bind(input.image_url.as_deref())
            .bind(&input.status)
            .bind(input.min_insanity)
            .bind(encode_list(&input.relations))
            .bind(input.audio_url.as_deref())
            .bind(input.video_url.as_deref())
            .bind(fold_name(&input.name))
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.map(Creature::from))
    }

    /// Partially update the creature with the given name.
    ///
    /// `COALESCE` keeps columns whose field is absent. Nullable columns use a
    /// "provided" flag so an explicit `null` clears them. List fields, when
    /// present, replace the stored list.
    ///
    /// Returns `None` if no creature has that name.
    pub async fn update(
        pool: &SqlitePool,
        name: &str,
        dto: &CreatureUpdate,
    ) -> Result<Option<Creature>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE creatures SET \
                 description   = COALESCE(?2, description), \
                 danger_level  = COALESCE(?3, danger_level), \
                 habitat       = COALESCE(?4, habitat), \
                 quote         = CASE WHEN ?5 THEN ?6 ELSE quote END, \
                 category      = COALESCE(?7, category), \
                 abilities     = COALESCE(?8, abilities), \
                 related_works = COALESCE(?9, related_works), \
                 image_url     = CASE WHEN ?10 THEN ?11 ELSE image_url END, \
                 status        = COALESCE(?12, status), \
                 min_insanity  = COALESCE(?13, min_insanity), \
                 relations     = COALESCE(?14, relations), \
                 audio_url     = CASE WHEN ?15 THEN ?16 ELSE audio_url END, \
                 video_url     = CASE WHEN ?17 THEN ?18 ELSE video_url END \
             WHERE name = ?1 \
             RETURNING {CREATURE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CreatureRow>(&query)
            .bind(name)
            .bind(dto.description.as_deref())
            .bind(dto.danger_level)
            .bind(dto.habitat.as_deref())
            .bind(dto.quote.is_some())
            .bind(dto.quote.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.category.as_deref())
            .bind(dto.abilities.as_deref().map(encode_list))
            .bind(dto.related_works.as_deref().map(encode_list))
            .bind(dto.image_url.is_some())
            .bind(dto.image_url.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.status.as_deref())
            .bind(dto.min_insanity)
            .bind(dto.relations.as_deref().map(encode_list))
            .bind(dto.audio_url.is_some())
            .bind(dto.audio_url.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.video_url.is_some())
            .bind(dto.video_url.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.map(Creature::from))
    }

    /// Delete the creature with the given name.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM creatures WHERE name = ?1")
            .bind(name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Find a creature by its exact (case-sensitive) name.
    pub async fn find_by_name(
        pool: &SqlitePool,
        name: &str,
    ) -> Result<Option<Creature>, sqlx::Error> {
        let query = format!("SELECT {CREATURE_COLUMNS} FROM creatures WHERE name = ?1");
        let row = sqlx::query_as::<_, CreatureRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Creature::from))
    }

    /// Filtered, sorted and paginated retrieval.
    ///
    /// Ties on the sort key fall back to `id` so pages are stable.
    pub async fn search(
        pool: &SqlitePool,
        query: &CreatureQuery,
    ) -> Result<Vec<Creature>, sqlx::Error> {
        tracing::debug!(
            filter = ?query.filter,
            sort = query.sort.column(),
            order = query.order.keyword(),
            limit = query.page.limit,
            offset = query.page.offset,
            "Searching creatures",
        );

        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {CREATURE_COLUMNS} FROM creatures"
        ));
        push_filter(&mut qb, &query.filter);
        qb.push(" ORDER BY ")
            .push(query.sort.column())
            .push(" ")
            .push(query.order.keyword())
            .push(", id ASC LIMIT ")
            .push_bind(query.page.limit)
            .push(" OFFSET ")
            .push_bind(query.page.offset);

        let rows = qb.build_query_as::<CreatureRow>().fetch_all(pool).await?;
        Ok(rows.into_iter().map(Creature::from).collect())
    }

    /// Count creatures matching a filter (ignores sorting and pagination).
    pub async fn count(pool: &SqlitePool, filter: &CreatureFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM creatures");
        push_filter(&mut qb, filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Creatures whose danger level lies in `[min, max]`, most dangerous first.
    pub async fn in_danger_range(
        pool: &SqlitePool,
        min: i32,
        max: i32,
    ) -> Result<Vec<Creature>, sqlx::Error> {
        let query = format!(
            "SELECT {CREATURE_COLUMNS} FROM creatures \
             WHERE danger_level BETWEEN ?1 AND ?2 \
             ORDER BY danger_level DESC, name ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, CreatureRow>(&query)
            .bind(min)
            .bind(max)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Creature::from).collect())
    }

    /// Pick one creature uniformly at random, optionally within a category.
    ///
    /// Counting and fetching share one transaction so the drawn offset is
    /// taken against the same snapshot. Returns `None` when the candidate set
    /// is empty.
    pub async fn random(
        pool: &SqlitePool,
        category: Option<&str>,
    ) -> Result<Option<Creature>, sqlx::Error> {
        let filter = category
            .map(CreatureFilter::by_category)
            .unwrap_or_default();

        let mut tx = pool.begin().await?;

        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM creatures");
        push_filter(&mut count_qb, &filter);
        let candidates: i64 = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&mut *tx)
            .await?;

        let Some(offset) = pick_index(u64::try_from(candidates).unwrap_or(0)) else {
            return Ok(None);
        };

        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {CREATURE_COLUMNS} FROM creatures"
        ));
        push_filter(&mut qb, &filter);
        qb.push(" ORDER BY id ASC LIMIT 1 OFFSET ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let row = qb
            .build_query_as::<CreatureRow>()
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.map(Creature::from))
    }

    /// Every creature in natural (insertion) order.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Creature>, sqlx::Error> {
        let query = format!("SELECT {CREATURE_COLUMNS} FROM creatures ORDER BY id ASC");
        let rows = sqlx::query_as::<_, CreatureRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Creature::from).collect())
    }

    // -----------------------------------------------------------------------
    // Aggregates
    // -----------------------------------------------------------------------

    /// Number of creatures per exact category, largest groups first.
    pub async fn category_counts(pool: &SqlitePool) -> Result<Vec<CategoryCount>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CategoryCountRow>(
            "SELECT category, COUNT(*) AS count \
             FROM creatures \
             GROUP BY category \
             ORDER BY count DESC, category ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(CategoryCount::from).collect())
    }

    /// Total, rounded mean danger level and the danger extrema.
    ///
    /// Extrema ties resolve to the lowest `id`.
    pub async fn stats(pool: &SqlitePool) -> Result<CreatureStats, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (total, average): (i64, Option<f64>) =
            sqlx::query_as("SELECT COUNT(*), AVG(danger_level) FROM creatures")
                .fetch_one(&mut *tx)
                .await?;

        let safest = sqlx::query_as::<_, DangerStatRow>(
            "SELECT id, name, danger_level FROM creatures \
             ORDER BY danger_level ASC, id ASC LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await?;

        let most_dangerous = sqlx::query_as::<_, DangerStatRow>(
            "SELECT id, name, danger_level FROM creatures \
             ORDER BY danger_level DESC, id ASC LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CreatureStats::new(
            total,
            average,
            safest.map(Into::into),
            most_dangerous.map(Into::into),
        ))
    }
}

/// Append the `WHERE` clause for a filter. Predicates are joined with `AND`.
fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &CreatureFilter) {
    let mut keyword = " WHERE ";

    if let Some(prefix) = &filter.name_prefix {
        qb.push(keyword)
            .push("name_folded LIKE ")
            .push_bind(like_prefix_pattern(&fold_name(prefix)))
            .push(" ESCAPE '\\'");
        keyword = " AND ";
    }
    if let Some(category) = &filter.category {
        qb.push(keyword)
            .push("category = ")
            .push_bind(category.clone());
        keyword = " AND ";
    }
    if let Some(min) = filter.min_danger {
        qb.push(keyword).push("danger_level >= ").push_bind(min);
        keyword = " AND ";
    }
    if let Some(max) = filter.max_danger {
        qb.push(keyword).push("danger_level <= ").push_bind(max);
    }
}
