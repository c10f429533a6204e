//! Content loaders for reading game data from files.
//!
//! Each loader parses one file format into a catalog that validates itself
//! on construction. Catalogs can be built from a path or from the copy
//! embedded in the binary.

pub mod config;
pub mod evolutions;
pub mod factory;
pub mod moves;
pub mod packs;
pub mod species;
pub mod type_chart;

pub use config::ConfigLoader;
pub use evolutions::EvolutionTable;
pub use factory::ContentBundle;
pub use moves::MoveCatalog;
pub use packs::{GachaPack, PackCatalog};
pub use species::{SpeciesCatalog, StarterPool};
pub use type_chart::TypeChart;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
