//! laserpath command-line interface

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use laserpath_core::{MaterialCategory, Operation, Registry, ToolpathLayer};
use laserpath_cutting::{optimize_toolpaths_with, OptimizationSettings};
use laserpath_recommend::{QualityLevel, Recommender};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "laserpath")]
#[command(about = "Laser toolpath optimizer and power/speed advisor")]
#[command(version)]
struct Cli {
    /// Machine/material registry JSON to use instead of the builtin tables
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known machines
    Machines,

    /// List known materials
    Materials {
        /// Only materials this machine supports
        #[arg(short, long)]
        machine: Option<String>,

        /// Only materials of this category (wood, acrylic, leather, ...)
        #[arg(short, long)]
        category: Option<MaterialCategory>,
    },

    /// Recommend power, speed and passes for an operation
    Recommend {
        /// Material id (e.g., basswood-3mm)
        #[arg(long)]
        material: String,

        /// Stock thickness in mm
        #[arg(short, long)]
        thickness: f64,

        /// cut, engrave or score
        #[arg(short, long, default_value = "cut")]
        operation: Operation,

        /// Machine id (e.g., xtool-d1)
        #[arg(short, long)]
        machine: String,

        /// draft, normal, high or ultra
        #[arg(short, long, default_value = "normal")]
        quality: QualityLevel,

        /// Print the recommendation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Optimize the toolpaths of a job file
    Optimize {
        /// Job JSON with `settings` and `layers`
        job: PathBuf,

        /// Output file for the optimized job (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether a material can be processed on a machine
    Validate {
        /// Material id
        #[arg(long)]
        material: String,

        /// Machine id
        #[arg(short, long)]
        machine: String,
    },
}

/// Job file layout.
#[derive(Debug, Deserialize)]
struct JobFile {
    #[serde(default)]
    settings: OptimizationSettings,
    layers: Vec<ToolpathLayer>,
}

fn load_registry(path: Option<&Path>) -> anyhow::Result<Cow<'static, Registry>> {
    match path {
        None => Ok(Cow::Borrowed(Registry::builtin())),
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read registry {}", path.display()))?;
            let registry = Registry::from_json(&json)
                .with_context(|| format!("invalid registry {}", path.display()))?;
            log::debug!(
                "loaded {} machine(s), {} material(s) from {}",
                registry.machines().len(),
                registry.materials().len(),
                path.display()
            );
            Ok(Cow::Owned(registry))
        }
    }
}

fn load_job(path: &Path) -> anyhow::Result<JobFile> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read job {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid job {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let registry = load_registry(cli.registry.as_deref())?;

    match cli.command {
        Commands::Machines => {
            println!("Machines:");
            println!("{:-<72}", "");
            for m in registry.machines() {
                println!(
                    "  {:<16} {:<20} {:>5.1} W  {:>4} x {:<4} mm  {}-{} mm/min",
                    m.id,
                    m.name,
                    m.laser_power_watts,
                    m.work_area.width,
                    m.work_area.height,
                    m.speed_range.min,
                    m.speed_range.max
                );
            }
        }

        Commands::Materials { machine, category } => {
            let mut materials = match &machine {
                Some(id) => {
                    registry.machine(id)?;
                    registry.compatible_materials(id)
                }
                None => registry.materials().iter().collect(),
            };
            if let Some(category) = category {
                materials.retain(|m| m.category == category);
            }

            println!("Materials:");
            println!("{:-<72}", "");
            for m in materials {
                println!(
                    "  {:<24} {:<28} {:<8} {:>5.1} mm",
                    m.id,
                    m.name,
                    m.category.as_str(),
                    m.thickness
                );
            }
        }

        Commands::Recommend {
            material,
            thickness,
            operation,
            machine,
            quality,
            json,
        } => {
            let rec = Recommender::new(&registry)
                .recommend(&material, thickness, operation, &machine, quality)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rec)?);
            } else {
                println!(
                    "{} {} mm, {} ({} quality)",
                    rec.material_name, rec.thickness, rec.operation, quality
                );
                println!("{:-<60}", "");
                let s = &rec.recommended;
                println!(
                    "  power={:.1}%  speed={:.0} mm/min  passes={}  air_assist={}",
                    s.power, s.speed, s.passes, s.air_assist
                );
                println!("  confidence={:.2}", rec.confidence);
                if !rec.alternatives.is_empty() {
                    println!("\nAlternatives:");
                    for a in &rec.alternatives {
                        println!(
                            "  power={:.1}%  speed={:.0} mm/min  passes={}",
                            a.power, a.speed, a.passes
                        );
                    }
                }
                if !rec.notes.is_empty() {
                    println!("\nNotes:");
                    for note in &rec.notes {
                        println!("  - {}", note);
                    }
                }
            }
        }

        Commands::Optimize { job, output } => {
            let JobFile { settings, layers } = load_job(&job)?;
            for layer in &layers {
                layer
                    .validate()
                    .with_context(|| format!("layer '{}' in {}", layer.id, job.display()))?;
            }
            let optimized = optimize_toolpaths_with(&registry, layers, &settings);
            let r = &optimized.result;

            println!("Optimized {} layer(s), {} path(s)", optimized.layers.len(), r.path_count);
            println!("{:-<60}", "");
            println!(
                "  cut length:  {:.1} -> {:.1} mm",
                r.original_length, r.optimized_length
            );
            println!("  travel:      {:.1} -> {:.1} mm", r.travel_before, r.travel_after);
            println!("  time saved:  {:.1} s", r.time_reduction);
            println!("  energy:      {:.1}% saved", r.energy_saving_pct);
            println!("  layer order: {}", r.layer_order.join(", "));
            if r.has_warnings() {
                println!("\nWarnings:");
                for w in &r.warnings {
                    println!("  - {}", w);
                }
            }

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&optimized)?;
                fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("\nOptimized job saved to: {}", path.display());
            }
        }

        Commands::Validate { material, machine } => {
            let report = registry.validate_compatibility(&material, &machine);
            for issue in &report.issues {
                println!("  - {}", issue);
            }
            if !report.compatible {
                bail!("{} cannot be processed on {}", material, machine);
            }
            println!("{} is compatible with {}", material, machine);
        }
    }

    Ok(())
}
