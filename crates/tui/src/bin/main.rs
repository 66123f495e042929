// Loupe - Interactive Object Inspector
// Copyright (C) 2026 The Loupe Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Loupe TUI binary
//!
//! Runs the terminal object inspector against an in-process demo backend.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use eyre::Result;
use loupe_tui::TuiConfig;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "loupe-tui", about = "Terminal object inspector", version)]
struct Args {
    /// Path to the configuration file (defaults to ~/.loupe.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Terminal refresh interval in milliseconds
    #[arg(long, default_value_t = 50)]
    refresh_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout belongs to the terminal UI, logs go to a file
    let log_dir = loupe_common::logging::init_file_only_logging("loupe-tui")?;
    info!("Starting loupe-tui, logging to {}", log_dir.display());

    let config = TuiConfig {
        refresh_interval: Duration::from_millis(args.refresh_ms),
        config_path: args.config,
    };

    loupe_tui::api::start_local_tui(config).await
}
