//! Subcommand parsing and execution.
use std::fmt::Write as _;

use anyhow::{Context, Result, anyhow, bail};
use gacha_core::{EntryId, InventoryEntry, Rarity, SpeciesId};
use gacha_runtime::{BattleOutcome, GreedyMoveProvider, PlayerId, Runtime};

pub const USAGE: &str = "\
usage: gacha <command>

commands:
  register <name>              create the player
  profile                      balances, energy and rerolls
  starter                      show starter candidates
  starter reroll               spend a reroll for new candidates
  starter choose <species>     take a starter
  pull [<pack>]                buy from a pack, or list packs
  battle                       fight a wild creature
  inventory [<rarity>]         list creatures, newest first
  activate <entry>             choose the creature that fights
  evolve                       list evolution options
  evolve <entry> [<species>]   evolve a creature";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Register { name: String },
    Profile,
    StarterOffer,
    StarterReroll,
    StarterChoose { species: SpeciesId },
    Packs,
    Pull { pack: String },
    Battle,
    Inventory { rarity: Option<Rarity> },
    Activate { entry: EntryId },
    EvolveOptions,
    Evolve { entry: EntryId, target: Option<SpeciesId> },
}

impl Command {
    /// Parses the arguments after the binary name.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
        let command = match args.as_slice() {
            ["register", name @ ..] if !name.is_empty() => Self::Register {
                name: name.join(" "),
            },
            ["profile"] => Self::Profile,
            ["starter"] => Self::StarterOffer,
            ["starter", "reroll"] => Self::StarterReroll,
            ["starter", "choose", species] => Self::StarterChoose {
                species: parse_species(species)?,
            },
            ["pull"] => Self::Packs,
            ["pull", pack] => Self::Pull {
                pack: (*pack).to_owned(),
            },
            ["battle"] => Self::Battle,
            ["inventory"] => Self::Inventory { rarity: None },
            ["inventory", rarity] => Self::Inventory {
                rarity: Some(
                    rarity
                        .parse()
                        .map_err(|_| anyhow!("unknown rarity '{rarity}'"))?,
                ),
            },
            ["activate", entry] => Self::Activate {
                entry: parse_entry(entry)?,
            },
            ["evolve"] => Self::EvolveOptions,
            ["evolve", entry] => Self::Evolve {
                entry: parse_entry(entry)?,
                target: None,
            },
            ["evolve", entry, species] => Self::Evolve {
                entry: parse_entry(entry)?,
                target: Some(parse_species(species)?),
            },
            _ => bail!("{USAGE}"),
        };
        Ok(command)
    }

    /// Runs the command for `player` and returns the text to print.
    pub async fn execute(&self, runtime: &Runtime, player: &PlayerId) -> Result<String> {
        let mut out = String::new();
        match self {
            Self::Register { name } => {
                let profile = runtime.register(player, name)?;
                writeln!(
                    out,
                    "Welcome, {}! You start with {} coins.",
                    profile.display_name, profile.coins
                )?;
                writeln!(out, "Run `gacha starter` to meet your first partner.")?;
            }
            Self::Profile => {
                let energy = runtime.energy().refresh(player)?;
                let record = runtime.record(player)?;
                let profile = &record.profile;
                writeln!(out, "{} ({})", profile.display_name, profile.id)?;
                writeln!(out, "  coins:   {}", profile.coins)?;
                writeln!(out, "  scale:   {}", profile.scale)?;
                writeln!(out, "  energy:  {}/{}", energy.energy, energy.max)?;
                if let Some(at) = energy.next_point_at {
                    writeln!(out, "  next +1: {}", at.format("%H:%M:%S UTC"))?;
                }
                writeln!(out, "  rerolls: {}", profile.reroll_count)?;
                writeln!(out, "  team:    {} creatures", record.inventory.len())?;
            }
            Self::StarterOffer | Self::StarterReroll => {
                let offer = if *self == Self::StarterReroll {
                    runtime.starter().reroll(player).await?
                } else {
                    runtime.starter().offer(player).await?
                };
                writeln!(out, "Starter candidates:")?;
                for species in &offer.candidates {
                    writeln!(
                        out,
                        "  #{:<4} {:<12} {}",
                        species.id,
                        species.name,
                        species.primary_element()
                    )?;
                }
                writeln!(out, "Rerolls left: {}", offer.rerolls_left)?;
            }
            Self::StarterChoose { species } => {
                let entry = runtime.starter().choose(player, *species).await?;
                writeln!(out, "{} joins your team!", entry.name)?;
                out.push_str(&describe_entry(&entry));
            }
            Self::Packs => {
                for pack in runtime.gacha().packs() {
                    writeln!(
                        out,
                        "{:<8} {} - {} coins ({} species)",
                        pack.id,
                        pack.name,
                        pack.cost,
                        pack.total_species()
                    )?;
                }
            }
            Self::Pull { pack } => {
                let entry = runtime.gacha().pull(player, pack).await?;
                writeln!(out, "You got {} [{}]!", entry.name, entry.rarity)?;
                out.push_str(&describe_entry(&entry));
            }
            Self::Battle => {
                let auto = GreedyMoveProvider::new(runtime.oracles().clone());
                let summary = runtime.battle().run(player, &auto).await?;
                writeln!(
                    out,
                    "A wild {} (Lv.{}) appeared!",
                    summary.enemy, summary.enemy_level
                )?;
                for line in &summary.log {
                    writeln!(out, "  {line}")?;
                }
                match summary.outcome {
                    BattleOutcome::Victory(result) => {
                        writeln!(
                            out,
                            "Victory! +{} exp, +{} coins, +{} scale",
                            result.exp_gained, result.coin_gained, result.scale_dropped
                        )?;
                        if result.leveled_up {
                            writeln!(
                                out,
                                "Level up! {} -> {}",
                                result.old_level, result.new_level
                            )?;
                        }
                    }
                    BattleOutcome::Defeat => writeln!(out, "Defeat...")?,
                    BattleOutcome::Stalemate => {
                        writeln!(out, "Both sides withdrew after {} rounds.", summary.rounds)?
                    }
                }
            }
            Self::Inventory { rarity } => {
                let entries = runtime.inventory().list(player, *rarity)?;
                if entries.is_empty() {
                    writeln!(out, "No creatures.")?;
                }
                for entry in &entries {
                    out.push_str(&describe_entry(entry));
                }
            }
            Self::Activate { entry } => {
                let active = runtime.inventory().set_active(player, *entry)?;
                writeln!(out, "{} will fight next.", active.name)?;
            }
            Self::EvolveOptions => {
                let entries = runtime.inventory().list(player, None)?;
                let mut any = false;
                for entry in &entries {
                    for option in runtime.evolution().options(player, entry.id).await? {
                        any = true;
                        let status = match (option.eligible, option.affordable) {
                            (true, true) => "ready",
                            (false, _) => "level too low",
                            (true, false) => "cannot afford",
                        };
                        writeln!(
                            out,
                            "  #{} {} -> {} (#{}) at Lv.{}: {} coins, {} scale [{}]",
                            entry.id,
                            entry.name,
                            option.target.name,
                            option.target.id,
                            option.rule.required_level,
                            option.cost.coins,
                            option.cost.scale,
                            status
                        )?;
                    }
                }
                if !any {
                    writeln!(out, "Nothing can evolve.")?;
                }
            }
            Self::Evolve { entry, target } => {
                let evolved = runtime.evolution().evolve(player, *entry, *target).await?;
                writeln!(
                    out,
                    "Evolved into {}! (-{} coins, -{} scale)",
                    evolved.entry.name, evolved.cost.coins, evolved.cost.scale
                )?;
                out.push_str(&describe_entry(&evolved.entry));
            }
        }
        Ok(out)
    }
}

fn describe_entry(entry: &InventoryEntry) -> String {
    let stats = entry.stats;
    format!(
        "  #{:<4} {}{:<12} Lv.{:<3} [{}] HP {} ATK {} DEF {} SPD {}\n",
        entry.id,
        if entry.is_active { "*" } else { " " },
        entry.name,
        entry.level,
        entry.rarity,
        stats.hp,
        stats.atk,
        stats.def,
        stats.spd
    )
}

fn parse_species(raw: &str) -> Result<SpeciesId> {
    raw.trim_start_matches('#')
        .parse()
        .map(SpeciesId)
        .with_context(|| format!("invalid species id '{raw}'"))
}

fn parse_entry(raw: &str) -> Result<EntryId> {
    raw.trim_start_matches('#')
        .parse()
        .map(EntryId)
        .with_context(|| format!("invalid entry id '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        Command::parse(args)
    }

    #[test]
    fn parses_every_subcommand() {
        assert_eq!(
            parse(&["register", "Red", "Oak"]).unwrap(),
            Command::Register {
                name: "Red Oak".into()
            }
        );
        assert_eq!(parse(&["profile"]).unwrap(), Command::Profile);
        assert_eq!(parse(&["starter"]).unwrap(), Command::StarterOffer);
        assert_eq!(parse(&["starter", "reroll"]).unwrap(), Command::StarterReroll);
        assert_eq!(
            parse(&["starter", "choose", "#25"]).unwrap(),
            Command::StarterChoose {
                species: SpeciesId(25)
            }
        );
        assert_eq!(parse(&["pull"]).unwrap(), Command::Packs);
        assert_eq!(
            parse(&["pull", "kanto"]).unwrap(),
            Command::Pull {
                pack: "kanto".into()
            }
        );
        assert_eq!(parse(&["battle"]).unwrap(), Command::Battle);
        assert_eq!(
            parse(&["inventory", "ssr"]).unwrap(),
            Command::Inventory {
                rarity: Some(Rarity::SSR)
            }
        );
        assert_eq!(
            parse(&["activate", "3"]).unwrap(),
            Command::Activate { entry: EntryId(3) }
        );
        assert_eq!(parse(&["evolve"]).unwrap(), Command::EvolveOptions);
        assert_eq!(
            parse(&["evolve", "2", "134"]).unwrap(),
            Command::Evolve {
                entry: EntryId(2),
                target: Some(SpeciesId(134))
            }
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["register"]).is_err());
        assert!(parse(&["activate", "abc"]).is_err());
        assert!(parse(&["inventory", "legendary"]).is_err());
        assert!(parse(&["battle", "now"]).is_err());
    }
}
