//! gi-core CLI: probe the local host for GPU inventory.

use clap::{Parser, Subcommand};
use gi_common::{MemUnit, OutputFormat, Result};
use gi_config::{resolve_vendor, ConfigPaths, GpuVendor, ProbeConfig};
use gi_core::exit_codes::{exit_code_for, ExitCode};
use gi_core::probe::types::ProbeSnapshot;
use gi_core::probe::GpuProbe;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "gi-core",
    about = "Probe the local host for GPU ids and memory",
    version
)]
struct Cli {
    /// GPU vendor to probe (overrides GI_VENDOR and the config file)
    #[arg(long, global = true, value_enum)]
    vendor: Option<GpuVendor>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config directory override
    #[arg(long, global = true, value_name = "DIR")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List host GPU identifiers
    Ids,
    /// Report per-GPU memory values
    Memory {
        #[command(subcommand)]
        kind: MemoryKind,
    },
    /// Full per-device snapshot
    Snapshot,
    /// Print the JSON schema of the snapshot output
    Schema,
}

#[derive(Subcommand, Debug)]
enum MemoryKind {
    /// Total memory per GPU
    Total {
        /// Unit for reported values
        #[arg(long, value_enum, default_value_t = MemUnit::MiB)]
        unit: MemUnit,
    },
    /// Free memory per GPU
    Free {
        /// Unit for reported values
        #[arg(long, value_enum, default_value_t = MemUnit::MiB)]
        unit: MemUnit,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match run(&cli) {
        Ok(()) => ExitCode::Clean,
        Err(e) => {
            match cli.format {
                OutputFormat::Json => {
                    let payload = serde_json::json!({
                        "error": e.to_string(),
                        "code": e.code(),
                    });
                    println!("{payload}");
                }
                OutputFormat::Text => eprintln!("error: {e}"),
            }
            exit_code_for(&e)
        }
    };
    std::process::exit(code.as_i32());
}

fn run(cli: &Cli) -> Result<()> {
    if matches!(cli.command, Commands::Schema) {
        let schema = schemars::schema_for!(ProbeSnapshot);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let mut paths = ConfigPaths::new();
    if let Some(dir) = &cli.config {
        paths = paths.with_config_dir(dir);
    }
    let vendor = resolve_vendor(cli.vendor, &paths)?;
    let probe = GpuProbe::with_system_runner(ProbeConfig::new(vendor));

    match &cli.command {
        Commands::Ids => {
            let ids = probe.gpu_ids()?;
            match cli.format {
                OutputFormat::Text => {
                    for id in &ids {
                        println!("{id}");
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string(&ids)?),
            }
        }
        Commands::Memory { kind } => {
            let (values, unit) = match kind {
                MemoryKind::Total { unit } => (probe.gpu_memory_total(*unit)?, *unit),
                MemoryKind::Free { unit } => (probe.gpu_memory_free(*unit)?, *unit),
            };
            match cli.format {
                OutputFormat::Text => {
                    for value in &values {
                        println!("{value} {unit}");
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string(&values)?),
            }
        }
        Commands::Snapshot => {
            let snapshot = probe.snapshot()?;
            match cli.format {
                OutputFormat::Text => print_snapshot_text(&snapshot),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
            }
        }
        Commands::Schema => unreachable!("handled before vendor resolution"),
    }
    Ok(())
}

/// Operator-facing rendering of one snapshot.
fn print_snapshot_text(snapshot: &ProbeSnapshot) {
    if snapshot.devices.is_empty() {
        println!("No GPUs detected");
        return;
    }
    for (idx, device) in snapshot.devices.iter().enumerate() {
        println!("GPU {}:", idx + 1);
        println!("  Host ID: {}", device.id);
        if let Some(name) = &device.name {
            println!("  Name: {name}");
        }
        if let Some(total) = device.memory_total_mib {
            println!("  Total Memory: {total} MiB");
        }
        if let Some(free) = device.memory_free_mib {
            println!("  Free Memory: {free} MiB");
        }
        if let Some(uuid) = &device.uuid {
            println!("  UUID: {uuid}");
        }
        if let Some(node) = &device.node {
            println!("  Node: {node}");
        }
        println!();
    }
}
