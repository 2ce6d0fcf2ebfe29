//! pilot-view - interactive demo of the navigation display engine.
//!
//! Push screens, go back, fire bursts and clear the display to watch views enter and
//! exit under the chosen strategy.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use pilot_view::config::{StrategyKind, ThemeName};
use pilot_view::render::ui::TerminalUI;
use pilot_view::{Application, DisplayConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG controls the filter
    env_logger::init();

    let matches = cli().get_matches();
    let config = resolve_config(&matches)?;

    let ui_renderer = Box::new(TerminalUI::with_theme(config.color_theme())?);
    let mut app = Application::new(config, ui_renderer)?;

    app.run().await?;

    Ok(())
}

fn cli() -> Command {
    let command = Command::new("pilot-view")
        .version(pilot_view::VERSION)
        .about("Interactive demo of animated navigation transitions")
        .long_about(
            "pilot-view renders a small navigation stack in the terminal. Each push renders \
             a new screen; with the animated strategy the new screen fades in while the \
             previous ones fade out and are detached once their transition ends.",
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .value_name("direct|animated")
                .help("How new screens replace the visible one"),
        )
        .arg(
            Arg::new("fade-ms")
                .long("fade-ms")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64))
                .help("Fade length for the animated strategy"),
        )
        .arg(
            Arg::new("tick-ms")
                .long("tick-ms")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64))
                .help("Frame interval"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .action(ArgAction::SetTrue)
                .help("Log every render decision (visible with RUST_LOG=info)"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("default|monochrome|high-contrast")
                .help("Color palette"),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .value_name("PATH")
            .value_parser(clap::value_parser!(std::path::PathBuf))
            .help("Config file (defaults to the user config directory)"),
    );

    command
}

/// Start from the config file (when enabled) and apply command-line overrides.
fn resolve_config(matches: &ArgMatches) -> Result<DisplayConfig> {
    #[cfg(feature = "config")]
    let mut config = match matches.get_one::<std::path::PathBuf>("config") {
        Some(path) => DisplayConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DisplayConfig::load()?,
    };
    #[cfg(not(feature = "config"))]
    let mut config = DisplayConfig::default();

    if let Some(strategy) = matches.get_one::<String>("strategy") {
        config.strategy = strategy.parse::<StrategyKind>()?;
    }
    if let Some(fade_ms) = matches.get_one::<u64>("fade-ms") {
        config.fade_ms = *fade_ms;
    }
    if let Some(tick_ms) = matches.get_one::<u64>("tick-ms") {
        config.tick_ms = *tick_ms;
    }
    if matches.get_flag("log") {
        config.enable_logging = true;
    }
    if let Some(theme) = matches.get_one::<String>("theme") {
        config.theme = theme.parse::<ThemeName>()?;
    }

    config.validate().context("invalid settings")?;
    Ok(config)
}
