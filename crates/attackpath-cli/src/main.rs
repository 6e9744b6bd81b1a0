//! attackpath — shortest attack paths and asset reach ranking.

use std::io::{BufRead, Write};

use anyhow::Context;
use attackpath_core::{AnalysisConfig, HubConfig};
use attackpath_engine::{Analyzer, PathOutcome, RankedTarget, Scenario};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;
mod report;

use args::{Command, Options};

fn load_scenario(options: &Options, config: &AnalysisConfig) -> anyhow::Result<Scenario> {
    let mut scenario = match options.scenario.as_ref().or(config.scenario_path.as_ref()) {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => {
            info!("No scenario file given, using built-in demo");
            Scenario::demo()
        }
    };
    if let Some(path) = &options.hub {
        let hub = HubConfig::load(path)
            .with_context(|| format!("Failed to load hub config {}", path.display()))?;
        info!("Hub routes from {} replace the scenario's", path.display());
        scenario.hub = Some(hub);
    }
    Ok(scenario)
}

/// Ask on stdin; an empty answer falls back to `default`.
fn prompt(question: &str, default: Option<&str>) -> anyhow::Result<String> {
    print!("{}", question);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim();
    Ok(match (answer.is_empty(), default) {
        (true, Some(default)) => default.to_string(),
        _ => answer.to_string(),
    })
}

fn run_query(options: &Options, config: &AnalysisConfig) -> anyhow::Result<i32> {
    let scenario = load_scenario(options, config)?;
    let analyzer = scenario.build()?;

    if !options.json {
        report::print_assets(&scenario.assets);
    }

    let start = match &options.start {
        Some(start) => start.clone(),
        None => prompt(
            &format!("START node (press Enter for '{}'): ", config.default_start),
            Some(config.default_start.as_str()),
        )?,
    };
    let target = match &options.target {
        Some(target) => target.clone(),
        None => prompt("TARGET node (one of the assets or any node): ", None)?,
    };

    for (role, node) in [("START", &start), ("TARGET", &target)] {
        if !analyzer.graph().contains(node) {
            report::print_unknown(role, node, analyzer.list_nodes());
            return Ok(1);
        }
    }

    let (outcome, ranked) = query(&analyzer, &start, &target, &scenario.assets)?;
    if options.json {
        let json = report::to_json(&start, &target, &outcome, &ranked);
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        report::print_path(&start, &target, &outcome);
        report::print_ranking(&start, &ranked);
    }
    Ok(0)
}

/// One Dijkstra run answers both the path and the ranking.
fn query(
    analyzer: &Analyzer,
    start: &str,
    target: &str,
    assets: &[String],
) -> attackpath_core::Result<(PathOutcome, Vec<RankedTarget>)> {
    let tree = analyzer.tree(start)?;
    let outcome = tree.path_to(target)?;
    let ranked = tree.rank(assets)?;
    Ok((outcome, ranked))
}

fn run_nodes(options: &Options, config: &AnalysisConfig) -> anyhow::Result<i32> {
    let analyzer = load_scenario(options, config)?.build()?;
    let nodes = analyzer.list_nodes();
    if options.json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
    } else {
        for node in nodes {
            println!("{}", node);
        }
    }
    Ok(0)
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = Options::parse(&args)?;
    let config = AnalysisConfig::from_env();

    let code = match options.command {
        Command::Help => {
            args::print_usage();
            0
        }
        Command::Nodes => run_nodes(&options, &config)?,
        Command::Query => run_query(&options, &config)?,
    };
    std::process::exit(code);
}
