//! Level files — ASCII maps on disk.
//!
//! A [`Level`] is the serializable form of a map: a name plus the rows of
//! symbols that [`build_map`](crate::world::World::build_map) consumes.
//! Stored as pretty-printed JSON so levels are hand-editable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::context::Context;

/// A map as authored: one string per row, one registered symbol per cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub rows: Vec<String>,
}

impl Level {
    /// Load a level from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let json = std::fs::read_to_string(path).expect("Failed to read level file");
        serde_json::from_str(&json).expect("Failed to parse level file")
    }

    /// Save a level as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) {
        let json = serde_json::to_string_pretty(self).expect("Failed to serialize level");
        std::fs::write(path, json).expect("Failed to write level file");
    }
}

impl Context {
    /// Load a level file and build its map with the current tile size.
    pub fn load_level(&mut self, path: impl AsRef<Path>) {
        let level = Level::load(path);
        log::info!("Loading level \"{}\"", level.name);
        let rows: Vec<&str> = level.rows.iter().map(String::as_str).collect();
        self.build_map(&rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::BBox;
    use crate::world::EntityTypeDef;

    #[test]
    fn save_then_load_round_trips() {
        let level = Level {
            name: "test chamber".to_string(),
            rows: vec!["####".to_string(), "#  #".to_string(), "####".to_string()],
        };

        let path = std::env::temp_dir().join("froskr_level_roundtrip.json");
        level.save(&path);
        let loaded = Level::load(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, level);
    }

    #[test]
    fn load_level_builds_the_map() {
        let level = Level {
            name: "box".to_string(),
            rows: vec!["####".to_string(), "#  #".to_string(), "####".to_string()],
        };
        let path = std::env::temp_dir().join("froskr_level_build.json");
        level.save(&path);

        let mut ctx = Context::new();
        ctx.register_type(EntityTypeDef::new('#').bbox(BBox::sized(1.0, 1.0)));
        ctx.load_level(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(ctx.world.entity_count(), 10);
    }

    #[test]
    #[should_panic(expected = "Failed to read level file")]
    fn missing_file_fails_fast() {
        Level::load("/nonexistent/froskr/level.json");
    }
}
