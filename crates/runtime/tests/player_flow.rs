use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use gacha_content::ContentBundle;
use gacha_core::{EntryId, Rarity, SpeciesId};
use gacha_runtime::{
    BattleOutcome, GreedyMoveProvider, InMemoryPlayerRepository, ManualClock, OracleManager,
    PlayerId, PlayerRepository, Runtime, RuntimeConfig, RuntimeError,
};

struct Harness {
    runtime: Runtime,
    repo: Arc<InMemoryPlayerRepository>,
    player: PlayerId,
}

fn harness(seed: u64) -> Harness {
    let repo = Arc::new(InMemoryPlayerRepository::new());
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
    let config = RuntimeConfig {
        ai_delay: Duration::ZERO,
        seed: Some(seed),
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::builder()
        .config(config)
        .oracles(OracleManager::new(ContentBundle::embedded().unwrap()))
        .shared_repository(repo.clone())
        .clock(clock)
        .build()
        .expect("runtime should build");

    let player = PlayerId::new("ash").unwrap();
    runtime.register(&player, "Ash").unwrap();
    Harness {
        runtime,
        repo,
        player,
    }
}

/// New player picks a starter, pulls from a pack and battles until the
/// energy bar is visibly lower.
#[tokio::test]
async fn starter_pull_and_battle_session() {
    let Harness {
        runtime, player, ..
    } = harness(42);

    let profile = runtime.profile(&player).unwrap();
    assert_eq!(profile.coins, 1000);
    assert_eq!(profile.scale, 0);
    assert_eq!(profile.energy, 50);
    assert_eq!(profile.reroll_count, 3);

    // Starter offer
    let offer = runtime.starter().offer(&player).await.unwrap();
    assert_eq!(offer.candidates.len(), 3);
    assert_eq!(offer.rerolls_left, 3);
    let distinct: HashSet<_> = offer.candidates.iter().map(|s| s.id).collect();
    assert_eq!(distinct.len(), 3);
    let starters = runtime.oracles().starters();
    assert!(offer.candidates.iter().all(|s| starters.contains(s.id)));

    let offer = runtime.starter().reroll(&player).await.unwrap();
    assert_eq!(offer.rerolls_left, 2);
    assert_eq!(runtime.profile(&player).unwrap().reroll_count, 2);

    let pick = offer.candidates[0].id;
    let starter = runtime.starter().choose(&player, pick).await.unwrap();
    assert_eq!(starter.species, pick);
    assert_eq!(starter.level, 5);
    assert_eq!(starter.rarity, Rarity::R);
    assert!(starter.is_active);

    let again = runtime.starter().choose(&player, pick).await;
    assert!(matches!(again, Err(RuntimeError::StarterAlreadyChosen)));
    let reroll = runtime.starter().reroll(&player).await;
    assert!(matches!(reroll, Err(RuntimeError::StarterAlreadyChosen)));

    // Two pulls spend the whole starting balance
    for remaining in [500, 0] {
        let entry = runtime.gacha().pull(&player, "kanto").await.unwrap();
        assert_eq!(entry.level, 1);
        assert_eq!(entry.exp, 0);
        assert!(!entry.is_active);
        assert_eq!(runtime.profile(&player).unwrap().coins, remaining);
    }
    let broke = runtime.gacha().pull(&player, "kanto").await;
    assert!(matches!(
        broke,
        Err(RuntimeError::InsufficientCoins {
            required: 500,
            available: 0
        })
    ));
    let inventory = runtime.inventory().list(&player, None).unwrap();
    assert_eq!(inventory.len(), 3);
    assert_eq!(inventory[0].id, EntryId(3));
    assert_eq!(inventory[2].id, EntryId(1));

    // Battles always use the active starter
    let auto = GreedyMoveProvider::new(runtime.oracles().clone());
    for fought in 1..=5u32 {
        let before = runtime.record(&player).unwrap();
        let summary = runtime.battle().run(&player, &auto).await.unwrap();
        let after = runtime.record(&player).unwrap();

        assert_eq!(summary.entry, starter.id);
        assert!(!summary.log.is_empty());
        assert_eq!(after.profile.energy, 50 - fought);

        let fighter = after.entry(starter.id).unwrap();
        assert!(fighter.exp < fighter.level * 100);
        match summary.outcome {
            BattleOutcome::Victory(result) => {
                assert_eq!(after.profile.coins, before.profile.coins + result.coin_gained);
                assert_eq!(after.profile.scale, before.profile.scale + result.scale_dropped);
                assert_eq!(result.coin_gained, 50 + 10 * u64::from(summary.enemy_level));
                assert!((1..=20).contains(&result.scale_dropped));
                assert_eq!(fighter.level, result.new_level);
            }
            BattleOutcome::Defeat | BattleOutcome::Stalemate => {
                assert_eq!(after.profile.coins, before.profile.coins);
                assert_eq!(after.profile.scale, before.profile.scale);
                assert_eq!(after.inventory, before.inventory);
            }
        }
    }
}

#[tokio::test]
async fn evolution_spends_both_currencies_and_rescales() {
    let Harness {
        runtime,
        repo,
        player,
    } = harness(3);

    let bulbasaur = runtime
        .starter()
        .choose(&player, SpeciesId(1))
        .await
        .unwrap();

    // Below the required level nothing is eligible and nothing is charged
    let options = runtime.evolution().options(&player, bulbasaur.id).await.unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].target.name, "Ivysaur");
    assert_eq!(options[0].cost.coins, 2500);
    assert_eq!(options[0].cost.scale, 500);
    assert!(!options[0].eligible);
    assert!(!options[0].affordable);

    let early = runtime.evolution().evolve(&player, bulbasaur.id, None).await;
    assert!(matches!(early, Err(RuntimeError::Evolution(_))));

    repo.update(&player, &mut |record| {
        record.profile.coins = 3000;
        record.profile.scale = 800;
        if let Some(entry) = record.entry_mut(bulbasaur.id) {
            entry.level = 16;
        }
        Ok(())
    })
    .unwrap();

    let options = runtime.evolution().options(&player, bulbasaur.id).await.unwrap();
    assert!(options[0].eligible && options[0].affordable);

    let wrong = runtime
        .evolution()
        .evolve(&player, bulbasaur.id, Some(SpeciesId(3)))
        .await;
    assert!(matches!(wrong, Err(RuntimeError::Evolution(_))));

    let evolved = runtime
        .evolution()
        .evolve(&player, bulbasaur.id, Some(SpeciesId(2)))
        .await
        .unwrap();
    assert_eq!(evolved.from, SpeciesId(1));
    assert_eq!(evolved.entry.id, bulbasaur.id);
    assert_eq!(evolved.entry.species, SpeciesId(2));
    assert_eq!(evolved.entry.name, "Ivysaur");
    assert_eq!(evolved.entry.rarity, Rarity::R);
    assert_eq!(evolved.entry.level, 16);
    assert!(evolved.entry.is_active);
    assert!(evolved.entry.sprite_url.ends_with("/2.png"));

    // base stats scaled by the base ratio land exactly on the new base
    let ivysaur = runtime.oracles().species().get(SpeciesId(2)).unwrap();
    assert_eq!(evolved.entry.stats, ivysaur.base_stats);

    let profile = runtime.profile(&player).unwrap();
    assert_eq!(profile.coins, 500);
    assert_eq!(profile.scale, 300);
}

#[tokio::test]
async fn final_forms_have_no_options() {
    let Harness {
        runtime,
        repo,
        player,
    } = harness(5);
    let starter = runtime
        .starter()
        .choose(&player, SpeciesId(147))
        .await
        .unwrap();
    repo.update(&player, &mut |record| {
        if let Some(entry) = record.entry_mut(starter.id) {
            entry.species = SpeciesId(149);
        }
        Ok(())
    })
    .unwrap();

    let options = runtime.evolution().options(&player, starter.id).await.unwrap();
    assert!(options.is_empty());
    let result = runtime.evolution().evolve(&player, starter.id, None).await;
    assert!(matches!(result, Err(RuntimeError::Oracle(_))));
}

#[tokio::test]
async fn inventory_filters_and_active_switching() {
    let Harness {
        runtime,
        repo,
        player,
    } = harness(8);
    let starter = runtime
        .starter()
        .choose(&player, SpeciesId(4))
        .await
        .unwrap();
    let pulled = runtime.gacha().pull(&player, "kanto").await.unwrap();

    let rare = runtime.inventory().list(&player, Some(Rarity::R)).unwrap();
    assert!(rare.iter().any(|entry| entry.id == starter.id));
    assert!(rare.iter().all(|entry| entry.rarity == Rarity::R));

    let active = runtime.inventory().set_active(&player, pulled.id).unwrap();
    assert!(active.is_active);
    let record = runtime.record(&player).unwrap();
    assert_eq!(record.inventory.iter().filter(|e| e.is_active).count(), 1);
    assert_eq!(record.active().map(|e| e.id), Some(pulled.id));

    let missing = runtime.inventory().set_active(&player, EntryId(99));
    assert!(matches!(missing, Err(RuntimeError::EntryNotFound(EntryId(99)))));

    repo.update(&player, &mut |record| {
        if let Some(entry) = record.entry_mut(starter.id) {
            entry.exp = 250;
        }
        Ok(())
    })
    .unwrap();
    let progress = runtime.inventory().progress(&player, starter.id).unwrap();
    assert_eq!(progress.next_level_exp, 500);
    assert!((progress.fraction - 0.5).abs() < f64::EPSILON);
}
