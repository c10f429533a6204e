//! Player-facing operations.
//!
//! Each service borrows the shared [`ServiceContext`] and covers one family
//! of operations. Every state change runs inside a single repository
//! transaction, and events are published only after it commits.
mod battle;
mod energy;
mod evolution;
mod gacha;
mod inventory;
mod starter;

use std::sync::Arc;

use gacha_core::{SpeciesData, SpeciesId};

pub use battle::{BattleService, BattleSummary, Encounter};
pub use energy::{EnergyService, EnergyStatus, regenerate_energy, spend_energy};
pub use evolution::{EvolutionOption, EvolutionService, Evolved};
pub use gacha::GachaService;
pub use inventory::{EntryProgress, InventoryService};
pub use starter::{StarterOffer, StarterService};

use crate::api::{Clock, MoveProvider, Result, SpeciesProvider};
use crate::events::EventBus;
use crate::oracle::{OracleManager, RngSource};
use crate::repository::PlayerRepository;
use crate::runtime::RuntimeConfig;

/// Collaborators shared by every service.
pub(crate) struct ServiceContext {
    pub(crate) config: RuntimeConfig,
    pub(crate) oracles: OracleManager,
    pub(crate) repo: Arc<dyn PlayerRepository>,
    pub(crate) species: Arc<dyn SpeciesProvider>,
    pub(crate) enemy_moves: Arc<dyn MoveProvider>,
    pub(crate) events: EventBus,
    pub(crate) rng: RngSource,
    pub(crate) clock: Arc<dyn Clock>,
}

impl ServiceContext {
    pub(crate) async fn species(&self, id: SpeciesId) -> Result<SpeciesData> {
        self.species.species(id).await
    }
}
