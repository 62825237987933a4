//! Creature row models.

use bestiary_core::codec::decode_list;
use bestiary_core::creature::Creature;
use bestiary_core::stats::{CategoryCount, DangerStat};
use bestiary_core::types::DbId;
use sqlx::FromRow;

/// A row from the `creatures` table, list columns still encoded.
#[derive(Debug, Clone, FromRow)]
pub struct CreatureRow {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub danger_level: i32,
    pub habitat: String,
    pub quote: Option<String>,
    pub category: String,
    pub abilities: Option<String>,
    pub related_works: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub min_insanity: i32,
    pub relations: Option<String>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
}

impl From<CreatureRow> for Creature {
    fn from(row: CreatureRow) -> Self {
        Self {
            abilities: decode_list(row.abilities.as_deref()),
            related_works: decode_list(row.related_works.as_deref()),
            relations: decode_list(row.relations.as_deref()),
            id: row.id,
            name: row.name,
            description: row.description,
            danger_level: row.danger_level,
            habitat: row.habitat,
            quote: row.quote,
            category: row.category,
            image_url: row.image_url,
            status: row.status,
            min_insanity: row.min_insanity,
            audio_url: row.audio_url,
            video_url: row.video_url,
        }
    }
}

/// Projection used for the danger extrema in statistics.
#[derive(Debug, Clone, FromRow)]
pub struct DangerStatRow {
    pub id: DbId,
    pub name: String,
    pub danger_level: i32,
}

impl From<DangerStatRow> for DangerStat {
    fn from(row: DangerStatRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            danger_level: row.danger_level,
        }
    }
}

/// One group of the category histogram.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryCountRow {
    pub category: String,
    pub count: i64,
}

impl From<CategoryCountRow> for CategoryCount {
    fn from(row: CategoryCountRow) -> Self {
        Self {
            name: row.category,
            count: row.count,
        }
    }
}
