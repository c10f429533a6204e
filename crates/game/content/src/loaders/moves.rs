//! Move catalog loader.

use std::collections::HashMap;
use std::path::Path;

use gacha_core::{ElementType, GameConfig, MoveDef, MoveOracle};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

const EMBEDDED: &str = include_str!("../../data/moves.ron");

/// On-disk layout of `moves.ron`: move sets reference moves by name.
#[derive(Debug, Clone, Deserialize)]
struct MoveFile {
    moves: Vec<MoveDef>,
    default_set: Vec<String>,
    #[serde(default)]
    sets: HashMap<ElementType, Vec<String>>,
}

/// Validated move catalog with resolved move sets.
#[derive(Debug, Clone)]
pub struct MoveCatalog {
    moves: HashMap<String, MoveDef>,
    default_set: Vec<MoveDef>,
    sets: HashMap<ElementType, Vec<MoveDef>>,
}

impl MoveCatalog {
    /// Load the move catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn embedded() -> LoadResult<Self> {
        Self::parse(EMBEDDED)
    }

    /// Parses and validates a catalog.
    ///
    /// Rejects invalid move definitions and duplicate names. Every set must
    /// name known moves, fill all move slots and carry exactly one heal.
    pub fn parse(content: &str) -> LoadResult<Self> {
        let file: MoveFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse move catalog RON: {}", e))?;

        let mut moves = HashMap::with_capacity(file.moves.len());
        for def in file.moves {
            def.validate()
                .map_err(|e| anyhow::anyhow!("Invalid move '{}': {}", def.name, e))?;
            if let Some(previous) = moves.insert(def.name.clone(), def) {
                anyhow::bail!("Duplicate move '{}'", previous.name);
            }
        }

        let default_set = resolve_set(&moves, "default", &file.default_set)?;
        let mut sets = HashMap::with_capacity(file.sets.len());
        for (element, names) in &file.sets {
            let set = resolve_set(&moves, &element.to_string(), names)?;
            sets.insert(*element, set);
        }

        Ok(Self {
            moves,
            default_set,
            sets,
        })
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Elements that have their own set.
    pub fn elements(&self) -> impl Iterator<Item = ElementType> + '_ {
        self.sets.keys().copied()
    }
}

fn resolve_set(
    moves: &HashMap<String, MoveDef>,
    label: &str,
    names: &[String],
) -> LoadResult<Vec<MoveDef>> {
    let set = names
        .iter()
        .map(|name| {
            moves.get(name).cloned().ok_or_else(|| {
                anyhow::anyhow!("Move set '{}' references unknown move '{}'", label, name)
            })
        })
        .collect::<LoadResult<Vec<_>>>()?;

    if set.len() != GameConfig::MAX_MOVES {
        anyhow::bail!(
            "Move set '{}' has {} moves, expected {}",
            label,
            set.len(),
            GameConfig::MAX_MOVES
        );
    }
    let heals = set.iter().filter(|def| def.is_heal()).count();
    if heals != 1 {
        anyhow::bail!(
            "Move set '{}' has {} healing moves, expected exactly one",
            label,
            heals
        );
    }
    Ok(set)
}

impl MoveOracle for MoveCatalog {
    fn move_def(&self, name: &str) -> Option<&MoveDef> {
        self.moves.get(name)
    }

    fn move_set(&self, element: ElementType) -> Option<Vec<MoveDef>> {
        self.sets
            .get(&element)
            .or(Some(&self.default_set))
            .filter(|set| !set.is_empty())
            .cloned()
    }
}
