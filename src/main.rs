/*
 * This file is part of EcoSense.
 *
 * Copyright (C) 2025 EcoSense contributors
 *
 * EcoSense is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * EcoSense is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with EcoSense. If not, see <https://www.gnu.org/licenses/>.
 */

use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use ecosense::config::{config_path, load_config, validate_config, write_default_config, DashboardConfig};
use ecosense::controller::Dashboard;
use ecosense::events::handle_key_event;
use ecosense::gateway::HttpGateway;
use ecosense::logger;
use ecosense::ui::ui;

/// Terminal dashboard for the EcoSense optimization backend
#[derive(Parser, Debug)]
#[command(name = "ecosense")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (defaults to $XDG_CONFIG_HOME/ecosense/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long)]
    url: Option<String>,

    /// Initial optimization mode, overrides the config file
    #[arg(long)]
    mode: Option<String>,

    /// Write JSON logs to $XDG_STATE_HOME/ecosense/logs.json
    #[arg(long)]
    logging: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default configuration to the config path and exit
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn resolve_config(cli: &Cli) -> anyhow::Result<DashboardConfig> {
    let path = cli.config.clone().unwrap_or_else(config_path);
    let mut cfg = load_config(&path)?;
    if let Some(url) = &cli.url {
        cfg.base_url = url.clone();
    }
    if let Some(mode) = &cli.mode {
        cfg.default_mode = mode.clone();
    }
    validate_config(&cfg).context("command-line overrides")?;
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::InitConfig { force }) = &cli.command {
        let path = cli.config.clone().unwrap_or_else(config_path);
        if path.exists() && !force {
            eprintln!("{} already exists; pass --force to overwrite", path.display());
            std::process::exit(1);
        }
        write_default_config(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    if cli.logging {
        if let Err(e) = logger::init_logging() {
            eprintln!("warning: logging disabled: {e}");
        }
    }

    let cfg = resolve_config(&cli)?;
    info!(base_url = %cfg.base_url, mode = %cfg.default_mode, "configuration loaded");
    let gateway = HttpGateway::new(&cfg.base_url, cfg.request_timeout())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut dash = Dashboard::new(Arc::new(gateway), &cfg);
    let res = runtime.block_on(run_app(&mut terminal, &mut dash));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "fatal error");
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    dash: &mut Dashboard,
) -> anyhow::Result<()> {
    let mut events = EventStream::new();
    dash.start();

    loop {
        terminal.draw(|f| ui(f, dash))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        if handle_key_event(dash, key_event)? {
                            info!("quit requested");
                            return Ok(());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                }
            }
            Some(update) = dash.next_update(), if dash.has_pending() => {
                dash.apply(update);
            }
        }
    }
}
