// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Curvedit: an interactive editor core for piecewise cubic Bézier curves.
//!
//! The crate holds the curve model, the pointer interaction state machine
//! and the geometry used to measure curves. Rendering is left to the host,
//! which feeds events into an [`Editor`] and draws the projections it
//! returns.

use anyhow::{Context, bail};
use std::path::PathBuf;
use std::time::Instant;

pub mod editing;
pub mod editor;
pub mod model;
pub mod path;
pub mod projection;
pub mod script;
pub mod settings;

pub use editor::Editor;
pub use settings::Settings;

use script::Script;

const USAGE: &str = "Usage: curvedit [--config settings.toml] [--keep-going] <script>";

/// Command-line options of the script runner
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    keep_going: bool,
    script: Option<PathBuf>,
}

/// Entry point for the curvedit script runner
pub fn run() -> anyhow::Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("curvedit=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = handle_command_line_args(std::env::args().skip(1))?;
    let Some(script_path) = args.script else {
        bail!("{USAGE}");
    };

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let source = std::fs::read_to_string(&script_path)
        .with_context(|| format!("failed to read script {}", script_path.display()))?;
    let script = if args.keep_going {
        Script::parse_lenient(&source).0
    } else {
        Script::parse(&source).with_context(|| format!("in {}", script_path.display()))?
    };
    tracing::info!(
        "Replaying {} commands from {}",
        script.len(),
        script_path.display()
    );

    let mut editor = Editor::new(settings);
    script.run(&mut editor, Instant::now());
    print_report(&editor);
    Ok(())
}

/// Parse `--config <path>`, `--keep-going` and the script path
fn handle_command_line_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--keep-going" => parsed.keep_going = true,
            "-h" | "--help" => bail!("{USAGE}"),
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ if parsed.script.is_some() => bail!("more than one script given\n{USAGE}"),
            _ => parsed.script = Some(PathBuf::from(&arg)),
        }
    }
    Ok(parsed)
}

fn print_report(editor: &Editor) {
    let status = editor.status();
    println!(
        "curves: {}  points: {}  length: {:.2}  delete mode: {}",
        status.curve_count,
        status.point_count,
        status.total_length,
        if status.delete_mode { "on" } else { "off" }
    );
    let viewport = &editor.session.viewport;
    println!(
        "zoom: {:.3}  pan: ({:.2}, {:.2})  pending taps: {}",
        viewport.zoom,
        viewport.offset.x,
        viewport.offset.y,
        editor.pending_taps()
    );
    for view in editor.segment_views() {
        let s = view.segment;
        println!(
            "curve {} [{} -> {}] ({:.2}, {:.2}) c1 ({:.2}, {:.2}) c2 ({:.2}, {:.2}) ({:.2}, {:.2}) length {:.2}",
            view.curve,
            view.start,
            view.end,
            s.p0.x,
            s.p0.y,
            s.p1.x,
            s.p1.y,
            s.p2.x,
            s.p2.y,
            s.p3.x,
            s.p3.y,
            view.length
        );
    }
    for curve in editor.session.model.curve_ids() {
        if let (Some(area), Some(volume)) = (
            editor.session.model.curve_area(curve),
            editor.session.model.curve_volume(curve),
        ) {
            println!("curve {curve}: area {area:.2}  volume {volume:.2}");
        }
    }
}
