//! Content bundle that loads every catalog at once.

use std::path::{Path, PathBuf};

use gacha_core::{Env, GameConfig};

use crate::loaders::{
    ConfigLoader, EvolutionTable, LoadResult, MoveCatalog, PackCatalog, SpeciesCatalog,
    StarterPool, TypeChart,
};

/// Every catalog the game reads, cross-checked against the species table.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── moves.ron
/// ├── type_chart.ron
/// ├── species.ron
/// ├── starters.ron
/// ├── evolutions.ron
/// └── packs.ron
/// ```
///
/// Any file missing from the directory falls back to the embedded copy.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub moves: MoveCatalog,
    pub types: TypeChart,
    pub species: SpeciesCatalog,
    pub starters: StarterPool,
    pub evolutions: EvolutionTable,
    pub packs: PackCatalog,
}

impl ContentBundle {
    /// Content compiled into the binary.
    pub fn embedded() -> LoadResult<Self> {
        let species = SpeciesCatalog::embedded()?;
        let packs = PackCatalog::embedded(&species)?;
        Self::assemble(
            ConfigLoader::embedded()?,
            MoveCatalog::embedded()?,
            TypeChart::embedded()?,
            species,
            StarterPool::embedded()?,
            EvolutionTable::embedded()?,
            packs,
        )
    }

    /// Loads content from `data_dir`, using embedded data for absent files.
    pub fn load_dir(data_dir: impl Into<PathBuf>) -> LoadResult<Self> {
        let dir = DataDir(data_dir.into());
        if !dir.0.is_dir() {
            anyhow::bail!("Content directory {} does not exist", dir.0.display());
        }

        let config = dir.load("config.toml", ConfigLoader::load, ConfigLoader::embedded)?;
        let moves = dir.load("moves.ron", MoveCatalog::load, MoveCatalog::embedded)?;
        let types = dir.load("type_chart.ron", TypeChart::load, TypeChart::embedded)?;
        let species = dir.load("species.ron", SpeciesCatalog::load, SpeciesCatalog::embedded)?;
        let starters = dir.load("starters.ron", StarterPool::load, StarterPool::embedded)?;
        let evolutions = dir.load(
            "evolutions.ron",
            EvolutionTable::load,
            EvolutionTable::embedded,
        )?;
        let packs = dir.load(
            "packs.ron",
            |path| PackCatalog::load(path, &species),
            || PackCatalog::embedded(&species),
        )?;

        Self::assemble(config, moves, types, species, starters, evolutions, packs)
    }

    fn assemble(
        config: GameConfig,
        moves: MoveCatalog,
        types: TypeChart,
        species: SpeciesCatalog,
        starters: StarterPool,
        evolutions: EvolutionTable,
        packs: PackCatalog,
    ) -> LoadResult<Self> {
        starters.check_against(&species)?;
        evolutions.check_against(&species)?;

        tracing::info!(
            moves = moves.len(),
            species = species.len(),
            starters = starters.len(),
            evolutions = evolutions.len(),
            packs = packs.len(),
            "content loaded"
        );

        Ok(Self {
            config,
            moves,
            types,
            species,
            starters,
            evolutions,
            packs,
        })
    }

    /// Rules environment backed by this bundle.
    pub fn env(&self) -> Env<'_> {
        Env::with_all(&self.config, &self.moves, &self.types, &self.evolutions)
    }
}

struct DataDir(PathBuf);

impl DataDir {
    fn load<T>(
        &self,
        file: &str,
        from_path: impl FnOnce(&Path) -> LoadResult<T>,
        fallback: impl FnOnce() -> LoadResult<T>,
    ) -> LoadResult<T> {
        let path = self.0.join(file);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading content file");
            from_path(&path)
        } else {
            tracing::debug!(file, "content file absent, using embedded copy");
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::{ElementType, SpeciesId};

    #[test]
    fn embedded_bundle_wires_env() {
        let bundle = ContentBundle::embedded().unwrap();
        let env = bundle.env();

        let fire_set = env.move_set(ElementType::Fire).unwrap();
        assert!(fire_set.iter().any(|m| m.name == "Ember"));
        assert_eq!(
            env.types().multiplier(ElementType::Water, ElementType::Fire),
            2.0
        );
        assert_eq!(env.evolution_line(SpeciesId(4)).unwrap()[0].to, SpeciesId(5));
    }

    #[test]
    fn load_dir_overrides_single_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[economy]\nstarting_coins = 42\n",
        )
        .unwrap();

        let bundle = ContentBundle::load_dir(dir.path()).unwrap();
        assert_eq!(bundle.config.economy.starting_coins, 42);
        assert_eq!(bundle.species.len(), 151);
    }

    #[test]
    fn load_dir_rejects_unknown_starter() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("starters.ron"), "[1, 999]").unwrap();
        let err = ContentBundle::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("999"));
    }

    #[test]
    fn load_dir_requires_directory() {
        assert!(ContentBundle::load_dir("/nonexistent/gacha/content").is_err());
    }
}
