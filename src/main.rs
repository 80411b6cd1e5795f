//! Initiative Tracker - terminal front-end
//!
//! A line-oriented table view over the combat tracker. Combatants are
//! addressed by their position in the visible list, the way a card is
//! clicked on screen.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use initiative_tracker::combatant::Role;
use initiative_tracker::core::error::Result;
use initiative_tracker::{
    CombatTracker, CombatantDraft, CombatantId, CombatantKind, JsonFileStore, MemoryStore, Mode,
    Outcome, TrackerConfig,
};

/// Tabletop initiative tracker
#[derive(Parser, Debug)]
#[command(name = "initiative-tracker")]
#[command(about = "Track combatants, hit points and turn order at the table")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the saved table (overrides the config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Do not save anything to disk
    #[arg(long)]
    in_memory: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("initiative_tracker=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TrackerConfig::load_from_file(path)?,
        None => TrackerConfig::default(),
    };
    let data_dir = args.data_dir.clone().unwrap_or_else(|| config.data_dir.clone());

    let tracker = if args.in_memory {
        CombatTracker::open(MemoryStore::with_key(config.storage_key.as_str()))
    } else {
        tracing::info!("Saving table to {:?}", data_dir);
        CombatTracker::open(JsonFileStore::new(&data_dir, &config.storage_key))
    };
    let mut tracker = tracker.with_defaults(config.defaults);

    println!("\n=== INITIATIVE TRACKER ===");
    print_help();

    loop {
        display_table(&tracker);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let Some((&command, rest)) = tokens.split_first() else {
            continue;
        };

        match command {
            "quit" | "q" => break,
            "help" | "h" | "?" => print_help(),
            "list" | "l" => {}
            "add" => {
                let Some((&kind, rest)) = rest.split_first() else {
                    println!("Usage: add <player|npc> <name> [init=N] [ac=N] [hp=N] [res=N] [class=ROLE]");
                    continue;
                };
                match kind.parse::<CombatantKind>() {
                    Ok(CombatantKind::Monster) => println!("Use 'monster' to add monsters"),
                    Ok(kind) => add(&mut tracker, CombatantDraft::new("", kind), rest),
                    Err(e) => println!("{}", e),
                }
            }
            "monster" | "m" => add(&mut tracker, CombatantDraft::monster(""), rest),
            "edit" | "e" => {
                if let Some((id, fields)) = target(&tracker, rest) {
                    edit(&mut tracker, id, fields);
                }
            }
            "rm" => {
                if let Some((id, _)) = target(&tracker, rest) {
                    report(tracker.remove_combatant(id).map(|_| "Removed.".to_string()));
                }
            }
            "dup" | "d" => {
                if let Some((id, _)) = target(&tracker, rest) {
                    let result = tracker.duplicate_combatant(id).map(|copy| {
                        let name = tracker.combatant(copy).map(|c| c.name.as_str()).unwrap_or("");
                        format!("Added {}.", name)
                    });
                    report(result);
                }
            }
            "dmg" => {
                if let Some((id, args)) = target(&tracker, rest) {
                    match amount(args) {
                        Some(n) => {
                            report_outcome(tracker.apply_damage(id, n), "Players ignore damage.")
                        }
                        None => println!("Usage: dmg <#> <amount>"),
                    }
                }
            }
            "heal" => {
                if let Some((id, args)) = target(&tracker, rest) {
                    match amount(args) {
                        Some(n) => report_outcome(tracker.apply_heal(id, n), "Nothing to heal."),
                        None => println!("Usage: heal <#> <amount>"),
                    }
                }
            }
            "ko" => {
                if let Some((id, _)) = target(&tracker, rest) {
                    report_outcome(tracker.toggle_unconscious(id), "Only players fall unconscious.");
                }
            }
            "res" => {
                if let Some((id, _)) = target(&tracker, rest) {
                    report_outcome(tracker.toggle_resistance(id), "Players have no resistance.");
                }
            }
            "mode" => {
                let mode = tracker.toggle_mode();
                println!("{} mode.", mode_label(mode));
            }
            "move" => {
                let from = rest.first().and_then(|t| position(t));
                let to = rest.get(1).and_then(|t| position(t));
                match (from, to) {
                    (Some(from), Some(to)) => {
                        report(tracker.move_visible(from, to).map(|_| "Moved.".to_string()))
                    }
                    _ => println!("Usage: move <from#> <to#>"),
                }
            }
            "next" | "n" => {
                if tracker.mode() != Mode::Combat {
                    println!("Start combat first ('mode').");
                } else {
                    tracker.advance_turn();
                }
            }
            "reset" => tracker.reset_combat(),
            "clear" => tracker.clear_all(),
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }

    println!(
        "\nGoodbye! {} combatant(s) on the table.",
        tracker.combatants().len()
    );
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  add <player|npc> <name> [init=N] [ac=N] [hp=N] [res=N] [class=ROLE]");
    println!("  monster <name> [init=N] [ac=N] [hp=N] [res=N]");
    println!("  edit <#> [name] [field=value ...]");
    println!("  rm <#> | dup <#> | ko <#> | res <#>");
    println!("  dmg <#> <n> | heal <#> <n>");
    println!("  move <from#> <to#>   - reorder (exploration only)");
    println!("  mode                 - toggle exploration / combat");
    println!("  next | reset | clear | list | quit");
    println!();
}

fn add(tracker: &mut CombatTracker, draft: CombatantDraft, fields: &[&str]) {
    match fill_draft(draft, fields) {
        Ok(draft) => report(tracker.add_combatant(&draft).map(|_| "Added.".to_string())),
        Err(e) => println!("{}", e),
    }
}

fn edit(tracker: &mut CombatTracker, id: CombatantId, fields: &[&str]) {
    let draft = match tracker.begin_edit(id) {
        Ok(draft) => draft,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };
    match fill_draft(draft, fields) {
        Ok(draft) => report(tracker.commit_edit(&draft).map(|_| "Saved.".to_string())),
        Err(e) => {
            tracker.cancel_edit();
            println!("{}", e);
        }
    }
}

/// Apply `key=value` fields to a draft; any other words form the name
fn fill_draft(
    mut draft: CombatantDraft,
    fields: &[&str],
) -> std::result::Result<CombatantDraft, String> {
    let mut name_parts = Vec::new();

    for field in fields {
        match field.split_once('=') {
            Some(("init", v)) => draft.initiative = v.to_string(),
            Some(("ac", v)) => draft.armor_class = v.to_string(),
            Some(("hp", v)) => draft.max_hit_points = v.to_string(),
            Some(("res", v)) => draft.resistance = v.to_string(),
            Some(("class", v)) => draft.role = v.parse::<Role>()?,
            Some((key, _)) => return Err(format!("Unknown field '{}'", key)),
            None => name_parts.push(*field),
        }
    }

    if !name_parts.is_empty() {
        draft.name = name_parts.join(" ");
    }
    Ok(draft)
}

/// Resolve the leading `#` argument to a combatant; returns the
/// remaining arguments alongside it
fn target<'a, 'b>(
    tracker: &CombatTracker,
    args: &'a [&'b str],
) -> Option<(CombatantId, &'a [&'b str])> {
    let Some((&first, rest)) = args.split_first() else {
        println!("Which combatant? Give its number from the list.");
        return None;
    };

    let id = position(first).and_then(|idx| tracker.visible_roster().get(idx).map(|c| c.id));
    if id.is_none() {
        println!("No combatant #{} on the table.", first);
    }
    id.map(|id| (id, rest))
}

/// 1-based list number to 0-based position
fn position(token: &str) -> Option<usize> {
    token.parse::<usize>().ok()?.checked_sub(1)
}

fn amount(args: &[&str]) -> Option<i32> {
    args.first()?.parse().ok()
}

fn report(result: Result<String>) {
    match result {
        Ok(message) => println!("{}", message),
        Err(e) => println!("Error: {}", e),
    }
}

fn report_outcome(result: Result<Outcome>, ignored: &str) {
    match result {
        Ok(Outcome::Updated) => {}
        Ok(Outcome::Ignored) => println!("{}", ignored),
        Err(e) => println!("Error: {}", e),
    }
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Exploration => "Exploration",
        Mode::Combat => "Combat",
    }
}

fn display_table(tracker: &CombatTracker) {
    let visible = tracker.visible_roster();
    let in_combat = tracker.mode() == Mode::Combat;

    println!();
    print!(
        "--- {} | {}/{} standing",
        mode_label(tracker.mode()),
        tracker.alive_count(),
        tracker.combatants().len()
    );
    if tracker.hidden_monster_count() > 0 {
        print!(" | {} monster(s) waiting", tracker.hidden_monster_count());
    }
    println!(" ---");

    if visible.is_empty() {
        println!("  No combatants. Add players, NPCs or monsters to begin.");
        return;
    }

    let active = tracker.visible_current_turn_index();
    for (idx, c) in visible.iter().enumerate() {
        let marker = if in_combat && idx == active { ">" } else { " " };
        let mut line = format!(
            "{} {:>2}. {:<20} {:<8} AC {:>2}  INIT {:>3}",
            marker,
            idx + 1,
            c.name,
            c.kind.label(),
            c.armor_class,
            c.initiative
        );

        match c.kind {
            CombatantKind::Player => line.push_str(&format!("  {}", c.role.label())),
            CombatantKind::Npc | CombatantKind::Monster => {
                line.push_str(&format!("  HP {:>3}/{:<3}", c.hit_points, c.max_hit_points));
                if let Some(res) = c.resistance.filter(|r| *r > 0) {
                    let state = if c.resistance_active == Some(true) { "on" } else { "off" };
                    line.push_str(&format!("  RES {} ({})", res, state));
                }
            }
        }

        if c.is_defeated {
            line.push_str(match c.kind {
                CombatantKind::Player => "  [unconscious]",
                _ => "  [defeated]",
            });
        }
        println!("{}", line);
    }

    if in_combat {
        if let Some(current) = tracker.current_combatant() {
            println!("Current turn: {}", current.name);
        }
    }
}
