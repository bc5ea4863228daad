use anyhow::{Context, anyhow};
use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use flowgraph::config::Config;
use flowgraph::scenario::scenario::{Scenario, by_name, catalog};
use flowgraph::simulation::engine::SimulationEngine;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::tui::app::App;
use crate::tui::draw::draw_app;

mod telemetry;
mod tui;

/// Interactive path-based flow control over a sample s-t network.
#[derive(Debug, Parser)]
#[command(name = "flowgraph", version)]
struct Cli {
    /// Sample network to load
    #[arg(short, long, default_value = "simple")]
    sample: String,

    /// Configuration file (defaults to ./flowgraph.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `simulation.seed`
    #[arg(long)]
    seed: Option<u64>,

    /// List the available samples and exit
    #[arg(long)]
    list: bool,

    /// Print the network state as JSON and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(seed) = cli.seed {
        config.simulation.seed = seed;
    }

    if cli.list {
        for scenario in catalog(config.simulation.seed) {
            println!("{:<12} {}", scenario.name(), scenario.description());
        }
        return Ok(());
    }

    let _guard = telemetry::init_tracing(&config.logging);

    let scenario = by_name(&cli.sample, config.simulation.seed)
        .ok_or_else(|| anyhow!("unknown sample '{}', try --list", cli.sample))?;
    let network = scenario
        .build(config.enumeration)
        .with_context(|| format!("building sample '{}'", cli.sample))?;
    info!(sample = scenario.name(), "sample loaded");

    let mut engine = SimulationEngine::from_config(network, &config.simulation);
    if cli.dump {
        let snapshot = engine.controller_mut().get_complete_network_state();
        println!("{}", snapshot.to_json()?);
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let mut app = App::new(engine, scenario.name().to_string());

    while app.running {
        terminal.draw(|frame| draw_app(frame, &app))?;

        if crossterm::event::poll(Duration::from_millis(16))? {
            match crossterm::event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.running = false,
                    KeyCode::Char(' ') => app.step(),
                    KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                    KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
                    KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_flow(true),
                    KeyCode::Char('-') => app.adjust_flow(false),
                    KeyCode::Char('s') => app.saturate(),
                    KeyCode::Char('x') => app.toggle_bottleneck(),
                    KeyCode::Char('c') => app.clear(),
                    KeyCode::Char('h') => app.handle_failures(),
                    _ => {}
                },
                _ => continue,
            }
        }
    }
    info!(turns = app.engine.turn(), "session ended");
    Ok(())
}
