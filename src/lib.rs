// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Camera Measure: an interactive geometric measurement engine for
//! machine-vision camera overlays

use anyhow::{Context, Result};
use std::path::PathBuf;

pub mod editing;
pub mod geometry;
pub mod model;
pub mod render;
pub mod script;
pub mod settings;
pub mod sync;
pub mod theme;
pub mod tools;

use script::{Export, Script};
use settings::EngineSettings;

/// Entry point for the `camera-measure` binary
pub fn run() -> Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("camera_measure=info".parse()?),
        )
        .init();

    handle_command_line_args()
}

/// Replay `<script.toml> [settings.toml]` and print the main view's drawing
fn handle_command_line_args() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() <= 1 {
        tracing::error!("Usage: camera-measure <script.toml> [settings.toml]");
        anyhow::bail!("no script given");
    }

    let script_path = PathBuf::from(&args[1]);
    tracing::info!("Loading script from: {}", script_path.display());
    let script = Script::load(&script_path)?;

    let settings = match args.get(2) {
        Some(path) => {
            let path = PathBuf::from(path);
            tracing::info!("Loading settings from: {}", path.display());
            EngineSettings::load(&path)
                .with_context(|| format!("Failed to load settings {:?}", path))?
        }
        None => match &script.settings {
            Some(inline) => {
                inline.validate().context("Invalid inline script settings")?;
                inline.clone()
            }
            None => EngineSettings::default(),
        },
    };

    let (pair, events) = script.run(settings);
    tracing::info!(
        "Replayed {} step(s), {} event(s), {} object(s) in view {:?}",
        script.steps.len(),
        events.len(),
        pair.main().store().len(),
        script.view
    );

    let export = Export::from_session(pair.main());
    let json = serde_json::to_string_pretty(&export).context("Failed to serialize drawing")?;
    println!("{json}");
    Ok(())
}
