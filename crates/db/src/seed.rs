//! Canonical starter bestiary.
//!
//! [`run`] inserts every fixture whose name is not yet taken, so it can be
//! re-run against a populated database.

use bestiary_core::creature::NewCreature;

use crate::repositories::CreatureRepo;
use crate::DbPool;

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The starter creatures, in insertion order.
pub fn fixtures() -> Vec<NewCreature> {
    vec![
        NewCreature {
            name: "Yog-Sothoth".into(),
            description: "The Key and the Gate, coterminous with all time and space.".into(),
            danger_level: 100,
            habitat: "Outside space and time".into(),
            quote: Some("Past, present, future, all are one in Yog-Sothoth.".into()),
            category: "Outer God".into(),
            abilities: list(&["Omniscience", "Immortality", "Time control"]),
            related_works: list(&["The Dunwich Horror", "The Case of Charles Dexter Ward"]),
            image_url: None,
            status: "Beyond life and death".into(),
            min_insanity: 90,
            relations: list(&["Azathoth"]),
            audio_url: None,
            video_url: None,
        },
        NewCreature {
            name: "Shub-Niggurath".into(),
            description: "The Black Goat of the Woods with a Thousand Young.".into(),
            danger_level: 85,
            habitat: "Dark forests and other dimensions".into(),
            quote: Some("Ia! Shub-Niggurath! The Black Goat of the Woods with a Thousand Young!".into()),
            category: "Outer God".into(),
            abilities: list(&["Fertility", "Spawning", "Dark magic"]),
            related_works: list(&["The Whisperer in Darkness"]),
            image_url: None,
            status: "Breeding".into(),
            min_insanity: 0,
            relations: Vec::new(),
            audio_url: None,
            video_url: None,
        },
        NewCreature {
            name: "Deep Ones".into(),
            description: "A race of amphibious humanoids serving Father Dagon.".into(),
            danger_level: 40,
            habitat: "Innsmouth".into(),
            quote: Some("I think their predominant colour was a greyish-green, though they had white bellies.".into()),
            category: "Race".into(),
            abilities: list(&["Unpredictability"]),
            related_works: list(&[
                "The Shadow over Innsmouth",
                "Dagon",
                "The Temple",
                "The Call of Cthulhu",
            ]),
            image_url: None,
            status: "Alive".into(),
            min_insanity: 0,
            relations: list(&["Dagon", "Hydra", "Cthulhu"]),
            audio_url: None,
            video_url: None,
        },
        NewCreature {
            name: "Shoggoths".into(),
            description: "Amoeboid servitors bred by the Elder Things, who rose against their masters.".into(),
            danger_level: 60,
            habitat: "Subterranean cities and Antarctica".into(),
            quote: Some("Tekeli-li! Tekeli-li!".into()),
            category: "Race".into(),
            abilities: list(&["Shapeshifting", "Immense strength", "Corrosion"]),
            related_works: list(&["At the Mountains of Madness"]),
            image_url: None,
            status: "Active".into(),
            min_insanity: 0,
            relations: Vec::new(),
            audio_url: None,
            video_url: None,
        },
        NewCreature {
            name: "Hastur".into(),
            description: "The Unspeakable One, the King in Yellow, bringer of madness and chaos.".into(),
            danger_level: 90,
            habitat: "Carcosa".into(),
            quote: Some("Have you found the Yellow Sign?".into()),
            category: "Outer God".into(),
            abilities: list(&["Madness", "Reality manipulation", "Teleportation"]),
            related_works: list(&["The King in Yellow"]),
            image_url: None,
            status: "Exists".into(),
            min_insanity: 0,
            relations: list(&["Nyarlathotep"]),
            audio_url: None,
            video_url: None,
        },
    ]
}

/// Insert missing fixtures. Returns how many were inserted.
pub async fn run(pool: &DbPool) -> Result<usize, sqlx::Error> {
    let mut inserted = 0;
    for creature in fixtures() {
        match CreatureRepo::create(pool, &creature).await? {
            Some(created) => {
                tracing::info!(id = created.id, name = %created.name, "Seeded creature");
                inserted += 1;
            }
            None => {
                tracing::debug!(name = %creature.name, "Creature already present, skipping");
            }
        }
    }
    Ok(inserted)
}
