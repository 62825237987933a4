//! Creature record, create payload and partial-update payload.
//!
//! Field bounds are enforced with `validator` on write only; rows read back
//! from the store are trusted as-is.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Lowest permitted danger level.
pub const MIN_DANGER_LEVEL: i32 = 1;

/// Highest permitted danger level.
pub const MAX_DANGER_LEVEL: i32 = 100;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A creature with its list columns decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Creature {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub danger_level: i32,
    pub habitat: String,
    pub quote: Option<String>,
    pub category: String,
    pub abilities: Vec<String>,
    pub related_works: Vec<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub min_insanity: i32,
    pub relations: Vec<String>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Payload for adding a creature to the bestiary.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCreature {
    #[validate(length(min = 3, max = 50))]
    pub name: String,
    #[validate(length(min = 10, max = 500))]
    pub description: String,
    #[validate(range(min = 1, max = 100))]
    pub danger_level: i32,
    #[validate(length(min = 2, max = 100))]
    pub habitat: String,
    #[validate(length(max = 400))]
    pub quote: Option<String>,
    #[validate(length(min = 3, max = 30))]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 15))]
    pub abilities: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub related_works: Vec<String>,
    #[validate(length(max = 350))]
    pub image_url: Option<String>,
    #[validate(length(min = 3, max = 30))]
    pub status: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub min_insanity: i32,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub relations: Vec<String>,
    #[validate(length(max = 350))]
    pub audio_url: Option<String>,
    #[validate(length(max = 350))]
    pub video_url: Option<String>,
}

/// Partial update of an existing creature. `name` is the lookup key and
/// cannot be changed.
///
/// Absent keys leave the column untouched. List fields replace the stored
/// list wholesale. Nullable columns use `Option<Option<_>>`: an explicit
/// JSON `null` clears the column, an absent key keeps it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreatureUpdate {
    #[validate(length(min = 10, max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 1, max = 100))]
    pub danger_level: Option<i32>,
    #[validate(length(min = 2, max = 100))]
    pub habitat: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 400))]
    pub quote: Option<Option<String>>,
    #[validate(length(min = 3, max = 30))]
    pub category: Option<String>,
    #[validate(length(max = 15))]
    pub abilities: Option<Vec<String>>,
    #[validate(length(max = 50))]
    pub related_works: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 350))]
    pub image_url: Option<Option<String>>,
    #[validate(length(min = 3, max = 30))]
    pub status: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub min_insanity: Option<i32>,
    #[validate(length(max = 20))]
    pub relations: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 350))]
    pub audio_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 350))]
    pub video_url: Option<Option<String>>,
}

impl CreatureUpdate {
    /// True when the payload names no field at all.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.danger_level.is_none()
            && self.habitat.is_none()
            && self.quote.is_none()
            && self.category.is_none()
            && self.abilities.is_none()
            && self.related_works.is_none()
            && self.image_url.is_none()
            && self.status.is_none()
            && self.min_insanity.is_none()
            && self.relations.is_none()
            && self.audio_url.is_none()
            && self.video_url.is_none()
    }
}

/// Wrap whatever was present under the key (including `null`) in `Some`.
/// Combined with `#[serde(default)]`, a missing key stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
