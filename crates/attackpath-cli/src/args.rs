//! Command-line argument parsing.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Shortest path plus asset ranking.
    Query,
    /// List every node in the scenario.
    Nodes,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub command: Command,
    pub scenario: Option<PathBuf>,
    /// Hub config replacing the scenario's own.
    pub hub: Option<PathBuf>,
    pub start: Option<String>,
    pub target: Option<String>,
    pub json: bool,
}

impl Options {
    /// Parse arguments, excluding the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut options = Options {
            command: Command::Query,
            scenario: None,
            hub: None,
            start: None,
            target: None,
            json: false,
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "nodes" => options.command = Command::Nodes,
                "query" => options.command = Command::Query,
                "--help" | "-h" | "help" => options.command = Command::Help,
                "--scenario" | "-s" => {
                    let value = iter.next().context("--scenario needs a file path")?;
                    options.scenario = Some(PathBuf::from(value));
                }
                "--hub" => {
                    let value = iter.next().context("--hub needs a file path")?;
                    options.hub = Some(PathBuf::from(value));
                }
                "--start" => {
                    options.start = Some(iter.next().context("--start needs a node")?.clone());
                }
                "--target" | "-t" => {
                    options.target = Some(iter.next().context("--target needs a node")?.clone());
                }
                "--json" => options.json = true,
                other => bail!("Unknown argument: {}. Use 'attackpath help' for usage.", other),
            }
        }
        Ok(options)
    }
}

pub fn print_usage() {
    println!("attackpath — shortest attack paths over a weighted network graph");
    println!();
    println!("Usage: attackpath [command] [options]");
    println!();
    println!("Commands:");
    println!("  query (default)          Shortest path START -> TARGET and asset ranking");
    println!("  nodes                    List every node in the scenario");
    println!("  help                     Show this help message");
    println!();
    println!("Options:");
    println!("  -s, --scenario <file>    Scenario JSON (default: $ATTACKPATH_SCENARIO or built-in demo)");
    println!("      --hub <file>         Hub config JSON overriding the scenario's hub routes");
    println!("      --start <node>       START node (prompted when omitted)");
    println!("  -t, --target <node>      TARGET node (prompted when omitted)");
    println!("      --json               Print results as JSON");
}
