use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use rendevice::{FixtureInventory, RendeviceConfig};

#[derive(Parser, Debug)]
#[command(name = "rendevice", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run backend selection and print what was tried and chosen.
    Probe(ProbeArgs),
    /// Strict GPU setup: fails when no accelerator is available.
    Setup(HostArgs),
    /// Select a backend and plan a render job for one worker.
    Configure(ConfigureArgs),
}

#[derive(Parser, Debug)]
struct HostArgs {
    /// Device inventory JSON describing the host.
    #[arg(long)]
    inventory: PathBuf,

    /// Config JSON (candidates, acceptance, fallback, render settings).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    #[command(flatten)]
    host: HostArgs,

    /// Print the selection result as JSON instead of status lines.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ConfigureArgs {
    #[command(flatten)]
    host: HostArgs,

    /// Worker id used to namespace the output path.
    #[arg(long)]
    worker: Option<u32>,

    /// Pass-through script arguments; a trailing number is taken as the worker id.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Setup(args) => cmd_setup(args),
        Command::Configure(args) => cmd_configure(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_host(args: &HostArgs) -> anyhow::Result<(RendeviceConfig, FixtureInventory)> {
    let config = match &args.config {
        Some(path) => RendeviceConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => RendeviceConfig::default(),
    };
    let inventory = FixtureInventory::load(&args.inventory)
        .with_context(|| format!("load inventory '{}'", args.inventory.display()))?;
    Ok((config, inventory))
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<ExitCode> {
    let (config, mut inventory) = load_host(&args.host)?;
    let result = config.selector()?.select(&mut inventory)?;

    if args.json {
        let json = serde_json::to_string_pretty(&result).context("serialize selection result")?;
        println!("{json}");
    } else {
        for line in result.report_lines() {
            println!("{line}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_setup(args: HostArgs) -> anyhow::Result<ExitCode> {
    let (config, mut inventory) = load_host(&args)?;
    let result = config.selector()?.select(&mut inventory)?;

    println!("compute backend setup");
    println!("candidates:");
    for line in result.report_lines() {
        println!("  {line}");
    }

    if !result.is_accelerated() {
        eprintln!("warning: GPU acceleration not available, rendering will use CPU");
        return Ok(ExitCode::FAILURE);
    }

    println!("devices:");
    for (i, d) in inventory.devices().iter().enumerate() {
        println!("  [{i}] {} ({}) - use: {}", d.name, d.kind, d.enabled);
    }
    if let Some(kind) = result.chosen_kind {
        println!("compute device type: {kind}");
    }
    println!("GPU devices enabled: {}", result.activated_devices.len());
    println!("render device: GPU");
    Ok(ExitCode::SUCCESS)
}

fn cmd_configure(args: ConfigureArgs) -> anyhow::Result<ExitCode> {
    let (config, mut inventory) = load_host(&args.host)?;
    let worker = args
        .worker
        .unwrap_or_else(|| rendevice::worker_id_from_args(&args.rest));

    let (result, job) = rendevice::configure_job(&config, &mut inventory, worker)
        .with_context(|| format!("configure render job for worker {worker}"))?;

    for line in result.report_lines() {
        println!("{line}");
    }
    for line in job.summary_lines() {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}
