//! Data-driven content definitions and loaders.
//!
//! This crate houses the static game content and the loaders that turn the
//! RON/TOML files under `data/` into oracle implementations:
//! - Move catalog and per-element move sets (`moves.ron`)
//! - Type effectiveness chart (`type_chart.ron`)
//! - Species table (`species.ron`) and starter pool (`starters.ron`)
//! - Evolution lines (`evolutions.ron`)
//! - Gacha packs (`packs.ron`)
//! - Game balance (`config.toml`)
//!
//! Every file is embedded at compile time, so [`ContentBundle::embedded`]
//! always works; [`ContentBundle::load_dir`] overrides any of them from disk.
//! Content is consumed by runtime oracles and never appears in player state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentBundle, EvolutionTable, GachaPack, MoveCatalog, PackCatalog,
    SpeciesCatalog, StarterPool, TypeChart,
};
