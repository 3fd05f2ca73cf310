//! Animation definition registry.
//!
//! This module provides a store for [`BasicAnimationDef`]s shared by every
//! entity that wants them. At setup, the definitions are turned into fresh
//! [`ActionSequence`](crate::components::actionsequence::ActionSequence)s and
//! registered on each entity's own
//! [`AnimationRegistry`](crate::components::animation::AnimationRegistry), so
//! entities never share playback state.

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;

use crate::components::actionsequence::{RepeatPolicy, SequenceError};
use crate::components::animation::{Animatable, BasicAnimationDef};

/// Central registry of reusable animation definitions keyed by name.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, BasicAnimationDef>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The avatar timelines the demo world ships with.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.insert(BasicAnimationDef {
            name: "fly".into(),
            frames: vec![
                ("dragon_1".into(), 4),
                ("dragon_2".into(), 4),
                ("dragon_3".into(), 4),
                ("dragon_4".into(), 4),
            ],
            repeat: RepeatPolicy::Forever,
        });
        store.insert(BasicAnimationDef {
            name: "land".into(),
            frames: vec![("dragon_land_1".into(), 6), ("dragon_land_2".into(), 6)],
            repeat: RepeatPolicy::Once,
        });
        store
    }

    /// Add definitions from a JSON file, replacing same-named ones.
    ///
    /// Every definition is checked before any is stored, so a file with one
    /// bad entry leaves the store unchanged.
    pub fn load_from_file(&mut self, path: &str) -> Result<usize, Box<dyn std::error::Error>> {
        let defs = BasicAnimationDef::load_from_file(path)?;
        for def in &defs {
            def.to_sequence()
                .map_err(|e| format!("animation '{}' in {}: {}", def.name, path, e))?;
        }
        let count = defs.len();
        for def in defs {
            self.insert(def);
        }
        info!("Loaded {} animation definitions from {}", count, path);
        Ok(count)
    }

    pub fn insert(&mut self, def: BasicAnimationDef) {
        self.animations.insert(def.name.clone(), def);
    }

    pub fn get(&self, name: &str) -> Option<&BasicAnimationDef> {
        self.animations.get(name)
    }

    /// Register a fresh copy of every stored definition on `target`.
    ///
    /// All definitions are built first, in name order; if any is invalid the
    /// first error is returned and `target` is left untouched.
    pub fn register_all<A: Animatable>(&self, target: &mut A) -> Result<(), SequenceError> {
        let mut names: Vec<&String> = self.animations.keys().collect();
        names.sort();
        let mut sequences = Vec::with_capacity(names.len());
        for name in names {
            sequences.push((name.clone(), self.animations[name].to_sequence()?));
        }
        for (name, sequence) in sequences {
            target.register_animation_sequence(name, sequence);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::AnimationRegistry;

    #[test]
    fn test_defaults_register_on_registry() {
        let store = AnimationStore::with_defaults();
        let mut registry = AnimationRegistry::new();
        store.register_all(&mut registry).unwrap();
        assert!(registry.contains("fly"));
        assert!(registry.contains("land"));
        assert_eq!(
            registry.get("fly").map(|s| s.repeat_policy()),
            Some(RepeatPolicy::Forever)
        );
    }

    #[test]
    fn test_entities_get_independent_sequences() {
        let store = AnimationStore::with_defaults();
        let mut a = AnimationRegistry::new();
        let mut b = AnimationRegistry::new();
        store.register_all(&mut a).unwrap();
        store.register_all(&mut b).unwrap();
        a.start("fly").unwrap();
        a.advance_active();
        assert_eq!(a.get("fly").map(|s| s.ticks_held()), Some(1));
        assert_eq!(b.get("fly").map(|s| s.ticks_held()), Some(0));
    }

    #[test]
    fn test_invalid_definition_fails_registration() {
        let mut store = AnimationStore::new();
        store.insert(BasicAnimationDef {
            name: "broken".into(),
            frames: vec![],
            repeat: RepeatPolicy::Once,
        });
        let mut registry = AnimationRegistry::new();
        assert_eq!(
            store.register_all(&mut registry),
            Err(SequenceError::EmptySequence)
        );
    }

    #[test]
    fn test_one_invalid_definition_registers_nothing() {
        let mut store = AnimationStore::with_defaults();
        store.insert(BasicAnimationDef {
            name: "broken".into(),
            frames: vec![],
            repeat: RepeatPolicy::Once,
        });
        for _ in 0..20 {
            let mut registry = AnimationRegistry::new();
            assert_eq!(
                store.register_all(&mut registry),
                Err(SequenceError::EmptySequence)
            );
            assert!(registry.is_empty());
        }
    }

    fn write_temp(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!(
            "tickslice_{}_{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_rejects_invalid_definitions_before_storing() {
        let path = write_temp(
            "invalid",
            r#"[{"name":"hover","frames":[["dragon_5",3]]},{"name":"fly","frames":[]}]"#,
        );
        let mut store = AnimationStore::with_defaults();
        let result = store.load_from_file(&path);
        let _ = std::fs::remove_file(&path);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("'fly'"), "{}", err);
        assert!(store.get("hover").is_none());
        assert_eq!(store.get("fly").map(|d| d.frames.len()), Some(4));
    }

    #[test]
    fn test_load_valid_file_replaces_same_name() {
        let path = write_temp(
            "valid",
            r#"[{"name":"fly","frames":[["dragon_9",2]],"repeat":{"Count":3}}]"#,
        );
        let mut store = AnimationStore::with_defaults();
        let result = store.load_from_file(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(result.unwrap(), 1);
        let fly = store.get("fly").unwrap();
        assert_eq!(fly.repeat, RepeatPolicy::Count(3));
        assert_eq!(fly.frames, vec![("dragon_9".to_string(), 2)]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut store = AnimationStore::new();
        assert!(store.load_from_file("/nonexistent/animations.json").is_err());
        assert!(store.animations.is_empty());
    }
}
