// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Collision box CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use ubx::cli::{discover_scenes, Reporter, Runner};
use ubx::{Grouping, KernelConfig, Report, VolumeKind};

#[derive(Parser)]
#[command(name = "ubx")]
#[command(about = "Collision bounding boxes for scene selections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./ubx.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print JSON reports instead of the colored summary
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Axis-aligned box around a scene selection
    Aabb {
        /// Scene JSON file
        scene: PathBuf,

        /// One box per object instead of one for the selection
        #[arg(long)]
        per_object: bool,

        /// Write the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Oriented box around a scene selection
    Obb {
        /// Scene JSON file
        scene: PathBuf,

        /// One box per object instead of one for the selection
        #[arg(long)]
        per_object: bool,

        /// Write the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run every scene in the given files or directories
    Batch {
        /// Scene files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Box kind
        #[arg(short, long, value_enum, default_value = "aabb")]
        kind: VolumeKind,

        /// One box per object instead of one per scene
        #[arg(long)]
        per_object: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => KernelConfig::from_file(path)?.with_env_overrides(),
        None => KernelConfig::load()?,
    };
    config.verbose |= cli.verbose;

    let default_level = if config.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(config);

    match cli.command {
        Commands::Aabb {
            scene,
            per_object,
            output,
        } => scene_command(
            &runner,
            &scene,
            VolumeKind::Aabb,
            per_object,
            output.as_deref(),
            cli.json,
        ),
        Commands::Obb {
            scene,
            per_object,
            output,
        } => scene_command(
            &runner,
            &scene,
            VolumeKind::Obb,
            per_object,
            output.as_deref(),
            cli.json,
        ),
        Commands::Batch {
            inputs,
            kind,
            per_object,
        } => batch_command(&runner, &inputs, kind, per_object, cli.json),
        Commands::Version => {
            println!("ubx v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn grouping(per_object: bool) -> Grouping {
    if per_object {
        Grouping::PerObject
    } else {
        Grouping::Selection
    }
}

fn scene_command(
    runner: &Runner,
    scene: &Path,
    kind: VolumeKind,
    per_object: bool,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let grouping = grouping(per_object);

    let run = match runner.run_scene(scene, kind, grouping) {
        Ok(run) => run,
        Err(e) => {
            Reporter::report_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let report = run.report(kind, grouping);
    if json {
        println!("{}", report.to_json()?);
    } else {
        Reporter::report_scene(&scene.display().to_string(), &run.created, run.duration);
    }

    if let Some(path) = output {
        report.write(path)?;
        if !json {
            Reporter::success(&format!("Report written to {}", path.display()));
        }
    }

    Ok(())
}

fn batch_command(
    runner: &Runner,
    inputs: &[PathBuf],
    kind: VolumeKind,
    per_object: bool,
    json: bool,
) -> Result<()> {
    let grouping = grouping(per_object);
    let scenes = discover_scenes(inputs)?;

    if scenes.is_empty() {
        eprintln!("{}", "No scene files found".red());
        std::process::exit(1);
    }

    let verbose = runner.config().verbose;
    if verbose {
        Reporter::report_info(&format!("Running {} scene(s)", scenes.len()));
    }

    let pb = ProgressBar::new(scenes.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let mut reports: Vec<Report> = Vec::with_capacity(scenes.len());
    let mut failures = Vec::new();

    for scene in &scenes {
        pb.set_message(scene.display().to_string());
        match runner.run_scene(scene, kind, grouping) {
            Ok(run) => {
                if verbose && !json {
                    let source = scene.display().to_string();
                    pb.suspend(|| Reporter::report_scene(&source, &run.created, run.duration));
                }
                reports.push(run.report(kind, grouping));
            }
            Err(e) => failures.push((scene.clone(), format!("{:#}", e))),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        let placed: usize = reports.iter().map(|r| r.boxes.len()).sum();
        println!(
            "{} {} scene(s), {} box(es)",
            "Completed:".green(),
            reports.len(),
            placed
        );
    }

    for (scene, message) in &failures {
        Reporter::report_error(&format!("{}: {}", scene.display(), message));
    }

    if !failures.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
