//! High-level runtime orchestrator.
//!
//! [`Runtime`] owns the shared service context and hands out short-lived
//! service views. It is cheap to clone, so clients can share one instance
//! across tasks. [`RuntimeBuilder`] wires in repositories, providers and the
//! clock, falling back to sensible defaults for anything left unset.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use tokio::sync::broadcast;

use crate::api::{
    Clock, MoveProvider, RandomMoveProvider, Result, RuntimeError, SpeciesProvider, SystemClock,
};
use crate::events::{Event, EventBus, Topic};
use crate::oracle::{CachedSpeciesProvider, CatalogSpeciesProvider, OracleManager, RngSource};
use crate::repository::{
    FilePlayerRepository, InMemoryPlayerRepository, PlayerId, PlayerRecord, PlayerRepository,
    Profile,
};
use crate::services::{
    BattleService, EnergyService, EvolutionService, GachaService, InventoryService,
    ServiceContext, StarterService,
};

/// Runtime configuration shared across services.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Think time before the default enemy AI picks a move.
    pub ai_delay: Duration,
    pub event_capacity: usize,
    /// Seed for every random draw; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Rounds after which a battle ends as a stalemate.
    pub round_limit: u32,
    /// Where player records are saved; `None` keeps them in memory.
    pub save_dir: Option<PathBuf>,
}

impl RuntimeConfig {
    pub const AI_DELAY: Duration = Duration::from_millis(1500);
    pub const EVENT_CAPACITY: usize = 100;
    pub const ROUND_LIMIT: u32 = 100;

    /// Per-user data directory for save files, if the platform has one.
    pub fn default_save_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gacha").map(|dirs| dirs.data_dir().join("players"))
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            ai_delay: Self::AI_DELAY,
            event_capacity: Self::EVENT_CAPACITY,
            seed: None,
            round_limit: Self::ROUND_LIMIT,
            save_dir: None,
        }
    }
}

/// Entry point for every player operation.
#[derive(Clone)]
pub struct Runtime {
    ctx: Arc<ServiceContext>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a player with the starting balances.
    pub fn register(&self, id: &PlayerId, display_name: &str) -> Result<Profile> {
        let profile = Profile::new(
            id.clone(),
            display_name,
            &self.ctx.oracles.config().economy,
        );
        self.ctx.repo.create(PlayerRecord::new(profile.clone()))?;
        tracing::info!(player = %id, "player registered");
        Ok(profile)
    }

    pub fn profile(&self, id: &PlayerId) -> Result<Profile> {
        Ok(self.ctx.repo.require(id)?.profile)
    }

    pub fn record(&self, id: &PlayerId) -> Result<PlayerRecord> {
        self.ctx.repo.require(id)
    }

    pub fn players(&self) -> Result<Vec<PlayerId>> {
        self.ctx.repo.list()
    }

    pub fn energy(&self) -> EnergyService<'_> {
        EnergyService { ctx: &self.ctx }
    }

    pub fn gacha(&self) -> GachaService<'_> {
        GachaService { ctx: &self.ctx }
    }

    pub fn starter(&self) -> StarterService<'_> {
        StarterService { ctx: &self.ctx }
    }

    pub fn battle(&self) -> BattleService<'_> {
        BattleService { ctx: &self.ctx }
    }

    pub fn evolution(&self) -> EvolutionService<'_> {
        EvolutionService { ctx: &self.ctx }
    }

    pub fn inventory(&self) -> InventoryService<'_> {
        InventoryService { ctx: &self.ctx }
    }

    pub fn events(&self) -> &EventBus {
        &self.ctx.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.ctx.events.subscribe(topic)
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.ctx.oracles
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.ctx.config
    }
}

/// Builder for [`Runtime`].
///
/// Only the oracle manager is required. Without a repository the runtime
/// saves to `save_dir` when set and keeps records in memory otherwise.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn PlayerRepository>>,
    species: Option<Arc<dyn SpeciesProvider>>,
    enemy_moves: Option<Arc<dyn MoveProvider>>,
    clock: Option<Arc<dyn Clock>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            repository: None,
            species: None,
            enemy_moves: None,
            clock: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    pub fn repository(mut self, repository: impl PlayerRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    pub fn shared_repository(mut self, repository: Arc<dyn PlayerRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Species source; defaults to a cached lookup over the content table.
    pub fn species_provider(mut self, provider: impl SpeciesProvider + 'static) -> Self {
        self.species = Some(Arc::new(provider));
        self
    }

    /// Move selection for wild enemies; defaults to the random AI.
    pub fn enemy_moves(mut self, provider: impl MoveProvider + 'static) -> Self {
        self.enemy_moves = Some(Arc::new(provider));
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn shared_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let config = self.config;
        let rng = RngSource::new(config.seed);

        let repo: Arc<dyn PlayerRepository> = match (self.repository, &config.save_dir) {
            (Some(repo), _) => repo,
            (None, Some(dir)) => {
                tracing::info!("saving players to {}", dir.display());
                Arc::new(FilePlayerRepository::new(dir)?)
            }
            (None, None) => Arc::new(InMemoryPlayerRepository::new()),
        };

        let species = self.species.unwrap_or_else(|| {
            let catalog = CatalogSpeciesProvider::new(oracles.content().clone());
            Arc::new(CachedSpeciesProvider::new(catalog))
        });

        let enemy_moves = match self.enemy_moves {
            Some(provider) => provider,
            None => Arc::new(RandomMoveProvider::new(rng.fork()?, config.ai_delay)),
        };

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let events = EventBus::with_capacity(config.event_capacity);

        Ok(Runtime {
            ctx: Arc::new(ServiceContext {
                config,
                oracles,
                repo,
                species,
                enemy_moves,
                events,
                rng,
                clock,
            }),
        })
    }
}
