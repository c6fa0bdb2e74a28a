mod actions;
mod cli;
mod config;
mod dbus;
mod deck;
mod decks;
mod error;
mod exec;
mod hotkey;
mod keycodes;
mod ui;
mod xdotool;

use anyhow::Context;
use clap::Parser;
use cli::{Args, DeckTarget};
use config::Config;
use dbus::DbusSend;
use deck::{Deck, Transport};
use decks::{Capabilities, Decks};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use xdotool::{InputAutomation, XdoTool};

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args, &mut std::io::stdout()) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// `out` receives the action listing; everything else goes to the log
fn run(args: Args, out: &mut impl Write) -> anyhow::Result<()> {
    let config = config::resolve(&args)?;

    let automation: Arc<dyn InputAutomation> = Arc::new(XdoTool::new(&config.tools.xdotool));
    let decks = Decks::new(
        build_deck("left", &args.left, &automation, &config),
        build_deck("right", &args.right, &automation, &config),
        config.crossfade.policy,
    );

    // Listing touches no player, so it leaves no log file behind either
    if args.list_actions {
        print_actions(out, decks.capabilities())?;
        return Ok(());
    }

    init_logging(&config.logging.file)?;

    log::info!("===========================================");
    log::info!("Starting fdsify...");
    log::info!("xdotool: {}", config.tools.xdotool.display());
    log::info!("dbus-send: {}", config.tools.dbus_send.display());
    log::info!("===========================================");
    log::info!("{}", decks);

    if args.reset {
        log::info!("Resetting decks");
        decks.reset().context("Reset failed")?;
    }

    // One-shot mode: run the requested actions and leave
    if !args.actions.is_empty() {
        for name in &args.actions {
            actions::run_action(&decks, name)?;
        }
        return Ok(());
    }

    let hotkeys = hotkey::default_hotkeys(decks.capabilities())
        .context("Failed to build key bindings")?;

    log::info!("Registered {} hotkeys:", hotkeys.len());
    for hotkey in &hotkeys {
        log::info!("  - {}", hotkey.describe());
    }

    ui::run(&decks, &hotkeys)?;

    log::info!("Exiting");
    Ok(())
}

fn build_deck(
    name: &str,
    target: &DeckTarget,
    automation: &Arc<dyn InputAutomation>,
    config: &Config,
) -> Deck {
    let transport = match &target.user {
        Some(user) => Transport::Session(Box::new(DbusSend::new(
            &config.tools,
            &config.player,
            user.as_str(),
        ))),
        None => Transport::Keystroke,
    };
    Deck::new(name, target.window, Arc::clone(automation), transport)
}

fn print_actions(out: &mut impl Write, caps: Capabilities) -> anyhow::Result<()> {
    writeln!(out, "Actions:")?;
    for action in actions::available(caps) {
        writeln!(out, "  {:<18} {}", action.name, action.description)?;
    }

    writeln!(out)?;
    writeln!(out, "Keys:")?;
    let hotkeys = hotkey::default_hotkeys(caps)?;
    for line in ui::help_lines(&hotkeys) {
        writeln!(out, "  {}", line)?;
    }
    Ok(())
}

/// Initialize logging system
///
/// The terminal belongs to the key window, so records go to a file,
/// appended across runs.
fn init_logging(log_file_path: &Path) -> anyhow::Result<()> {
    use std::fs::OpenOptions;

    let target = Box::new(
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path)
            .with_context(|| {
                format!("Failed to open log file {} for writing", log_file_path.display())
            })?,
    );

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info) // Default to Info level if RUST_LOG not set
        .parse_default_env()
        .target(env_logger::Target::Pipe(target))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    Ok(())
}
