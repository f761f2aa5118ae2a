//! goap-demo - run the reference planning scenarios.
//!
//! - `goap-demo run --scenario <name>` - plan a scenario and print the result
//! - `goap-demo list` - list available scenarios
//! - `goap-demo init` - write a default planner config

mod scenarios;

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use goap::{GoapPlanner, Plan, PlannerConfig, TraceLog};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use scenarios::Scenario;

#[derive(Parser)]
#[command(name = "goap-demo")]
#[command(about = "Goal-oriented action planning demos", version)]
struct Cli {
    /// Planner config file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the expansion budget from the config file
    #[arg(long, global = true)]
    max_expansions: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a scenario from its default starting state
    Run {
        #[arg(short, long, value_enum)]
        scenario: Scenario,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        /// Print the search trace after the plan
        #[arg(long)]
        trace: bool,
    },

    /// List available scenarios
    List,

    /// Write a default config file
    Init {
        #[arg(default_value = "goap.yaml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            json,
            trace,
        } => {
            let config = load_config(cli.config.as_deref(), cli.max_expansions)?;
            let output = OutputOptions { json, trace };
            match scenario {
                Scenario::GatherWood => run_scenario(
                    scenario,
                    scenarios::gather_wood().with_config(config),
                    &scenarios::Forest::default(),
                    output,
                ),
                Scenario::KillEnemy => run_scenario(
                    scenario,
                    scenarios::kill_enemy().with_config(config),
                    &scenarios::Skirmish::default(),
                    output,
                ),
            }
        }
        Commands::List => {
            for scenario in Scenario::value_variants() {
                println!("{:<12} {}", scenario.name(), scenario.summary());
            }
            Ok(())
        }
        Commands::Init { path } => init_config(&path),
    }
}

#[derive(Debug, Clone, Copy)]
struct OutputOptions {
    json: bool,
    trace: bool,
}

fn load_config(path: Option<&Path>, max_expansions: Option<usize>) -> Result<PlannerConfig> {
    let mut config = match path {
        Some(path) => PlannerConfig::load(path)
            .with_context(|| format!("loading planner config from {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    if let Some(limit) = max_expansions {
        config = config.with_max_expansions(limit);
    }
    tracing::debug!(max_expansions = ?config.max_expansions, "planner config");
    Ok(config)
}

fn run_scenario<S>(
    scenario: Scenario,
    planner: GoapPlanner<S>,
    initial: &S,
    output: OutputOptions,
) -> Result<()>
where
    S: Serialize + Debug,
{
    tracing::info!(
        scenario = scenario.name(),
        actions = planner.actions().len(),
        goal = planner.goal().label(),
        "planning"
    );

    let mut log = TraceLog::default();
    let plan = planner
        .create_plan_traced(initial, &mut log)
        .with_context(|| format!("planning {}", scenario.name()))?;

    match &plan {
        Some(plan) if output.json => {
            println!("{}", serde_json::to_string_pretty(plan)?);
        }
        Some(plan) => print_plan(plan),
        None if output.json => println!("null"),
        None => println!("No plan reaches {}", planner.goal().label()),
    }

    if output.trace {
        if output.json {
            println!("{}", serde_json::to_string_pretty(&log)?);
        } else {
            for event in &log.events {
                println!(
                    "[{:>4}] {:<18} {:<14} depth={} cost={}",
                    event.seq,
                    event.tag,
                    event.label.as_deref().unwrap_or("-"),
                    event.depth,
                    event.cost
                );
            }
        }
    }

    Ok(())
}

fn print_plan<S: Debug>(plan: &Plan<S>) {
    println!("Goal: {}", plan.goal);
    println!("Total cost: {}", plan.total_cost);
    println!();
    for (i, step) in plan.steps().enumerate() {
        println!("  {}. {} (cost {})", i + 1, step.label, step.cost);
        println!("     {:?}", step.state);
    }
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("{} already exists, leaving it untouched", path.display());
        return Ok(());
    }

    let default_config = r#"# Planner configuration

# Maximum number of nodes built per search. Remove (or set to null) for an
# exhaustive search.
max_expansions: null
"#;
    std::fs::write(path, default_config)
        .with_context(|| format!("writing {}", path.display()))?;

    // Make sure what we wrote is something we can read back.
    PlannerConfig::load(path)?;

    println!("Wrote {}", path.display());
    Ok(())
}
