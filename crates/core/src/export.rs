//! Full-bestiary export in structured (JSON) and tabular (CSV) form.
//!
//! The structured form is simply the list of [`Creature`] records. The
//! tabular form flattens each record into [`TabularCreature`], which has the
//! same fields in the same order with every list joined into one cell.

use std::str::FromStr;

use serde::Serialize;

use crate::creature::Creature;
use crate::error::CoreError;
use crate::types::DbId;

/// Joiner for list cells in tabular output.
pub const TABULAR_LIST_JOINER: &str = ", ";

/// Column order for tabular output. Matches the field order of [`Creature`].
pub const CSV_COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "danger_level",
    "habitat",
    "quote",
    "category",
    "abilities",
    "related_works",
    "image_url",
    "status",
    "min_insanity",
    "relations",
    "audio_url",
    "video_url",
];

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

/// Requested export representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }

    /// Value for the `Content-Disposition` header of a download.
    pub fn content_disposition(self) -> String {
        format!("attachment; filename=bestiary_export.{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(CoreError::Validation(format!(
                "format must be 'json' or 'csv', got '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tabular form
// ---------------------------------------------------------------------------

/// A creature flattened for tabular output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularCreature {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub danger_level: i32,
    pub habitat: String,
    pub quote: String,
    pub category: String,
    pub abilities: String,
    pub related_works: String,
    pub image_url: String,
    pub status: String,
    pub min_insanity: i32,
    pub relations: String,
    pub audio_url: String,
    pub video_url: String,
}

impl TabularCreature {
    /// Cells in [`CSV_COLUMNS`] order.
    fn cells(&self) -> [String; 15] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.description.clone(),
            self.danger_level.to_string(),
            self.habitat.clone(),
            self.quote.clone(),
            self.category.clone(),
            self.abilities.clone(),
            self.related_works.clone(),
            self.image_url.clone(),
            self.status.clone(),
            self.min_insanity.to_string(),
            self.relations.clone(),
            self.audio_url.clone(),
            self.video_url.clone(),
        ]
    }
}

/// Flatten a creature: lists are joined with [`TABULAR_LIST_JOINER`], line
/// breaks become single spaces and every text cell is trimmed.
pub fn to_tabular(creature: &Creature) -> TabularCreature {
    TabularCreature {
        id: creature.id,
        name: flatten_text(&creature.name),
        description: flatten_text(&creature.description),
        danger_level: creature.danger_level,
        habitat: flatten_text(&creature.habitat),
        quote: flatten_optional(creature.quote.as_deref()),
        category: flatten_text(&creature.category),
        abilities: flatten_list(&creature.abilities),
        related_works: flatten_list(&creature.related_works),
        image_url: flatten_optional(creature.image_url.as_deref()),
        status: flatten_text(&creature.status),
        min_insanity: creature.min_insanity,
        relations: flatten_list(&creature.relations),
        audio_url: flatten_optional(creature.audio_url.as_deref()),
        video_url: flatten_optional(creature.video_url.as_deref()),
    }
}

fn flatten_text(value: &str) -> String {
    value
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

fn flatten_optional(value: Option<&str>) -> String {
    value.map(flatten_text).unwrap_or_default()
}

fn flatten_list(items: &[String]) -> String {
    let flattened: Vec<String> = items.iter().map(|item| flatten_text(item)).collect();
    flattened.join(TABULAR_LIST_JOINER)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Escape a value for CSV: wrap in quotes if it contains comma, quote, or newline.
fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render creatures as CSV with a header row, one record per line.
pub fn build_csv(creatures: &[Creature]) -> String {
    let mut lines = Vec::with_capacity(creatures.len() + 1);
    lines.push(CSV_COLUMNS.join(","));

    for creature in creatures {
        let row: Vec<String> = to_tabular(creature)
            .cells()
            .iter()
            .map(|cell| csv_escape(cell))
            .collect();
        lines.push(row.join(","));
    }

    let mut csv = lines.join("\n");
    csv.push('\n');
    csv
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
