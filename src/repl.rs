//! Interactive loop — reads lines from stdin, dispatches commands or
//! queries, prints the rendered turn.
//!
//! Runs until `exit`, Ctrl-C, or stdin is closed. A failed turn prints a
//! styled error and the loop continues — one bad round-trip never ends the
//! session.

use std::io::Write as _;

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::agent::Agent;
use crate::console::{Spinner, banner, panel, table};
use crate::error::AppError;

/// What a line of input asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Exit,
    Stats,
    Viz,
    Help,
    Query(String),
}

/// Classify a trimmed input line. `None` for empty lines.
fn parse_input(line: &str) -> Option<Input> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.to_lowercase().as_str() {
        "exit" | "quit" => Some(Input::Exit),
        "stats" => Some(Input::Stats),
        "viz" => Some(Input::Viz),
        "help" => Some(Input::Help),
        _ => Some(Input::Query(trimmed.to_string())),
    }
}

/// Run the console until the user leaves.
pub async fn run(agent: &mut Agent, agent_name: &str) -> Result<(), AppError> {
    print_banner(agent, agent_name);

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        print!("\n{} ", style(">").green().bold());
        let _ = std::io::stdout().flush();

        tokio::select! {
            biased;

            _ = tokio::signal::ctrl_c() => {
                println!("\n{}", style("Emergency shutdown initiated... Goodbye!").yellow());
                info!("ctrl-c received, leaving console");
                break;
            }

            line = lines.next_line() => {
                match line {
                    Err(e) => {
                        warn!("stdin read error: {e}");
                        break;
                    }
                    Ok(None) => {
                        info!("stdin closed");
                        break;
                    }
                    Ok(Some(input)) => {
                        debug!(input = %input, "console received line");
                        match parse_input(&input) {
                            None => continue,
                            Some(Input::Exit) => {
                                println!("{}", style("Shutting down thought systems... Goodbye!").yellow());
                                break;
                            }
                            Some(Input::Stats) => print_stats(agent),
                            Some(Input::Viz) => {
                                println!("{}", panel("Thought Process Map", &agent.thought_map()));
                            }
                            Some(Input::Help) => print_help(),
                            Some(Input::Query(query)) => run_turn(agent, &query).await,
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

async fn run_turn(agent: &mut Agent, query: &str) {
    let spinner = Spinner::start("Generating response...");
    let result = agent.process_query(query).await;
    spinner.stop();

    match result {
        Ok(report) => {
            println!("\n{}", panel("Response", &report.text));
            println!("\n{}", panel("Thought Process Map", &agent.thought_map()));

            let rows: Vec<(String, String)> = report
                .scores
                .iter()
                .map(|(category, score)| (category.to_string(), format!("{score:.2}")))
                .collect();
            println!(
                "\n{}",
                table("Scientific Principle Analysis", ("Principle", "Application Score"), &rows)
            );

            if let Some(usage) = report.usage {
                debug!(
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    "token usage"
                );
            }
        }
        Err(e) => {
            println!("{}", style(format!("Error in processing: {e}")).red());
        }
    }
}

fn print_stats(agent: &Agent) {
    let stats = agent.stats();
    let mean = stats
        .mean_response_time
        .map(|d| format!("{:.2}s", d.as_secs_f64()))
        .unwrap_or_else(|| "—".to_string());

    let rows = vec![
        ("Total Queries".to_string(), stats.queries.to_string()),
        ("Average Response Time".to_string(), mean),
        ("Transcript Entries".to_string(), stats.transcript_len.to_string()),
    ];
    println!("{}", table("Session Statistics", ("Metric", "Value"), &rows));
}

fn print_banner(agent: &Agent, agent_name: &str) {
    let lines = vec![
        "Advanced world-of-thought reasoning console.".to_string(),
        format!("Backend: {}", agent.provider_name()),
        String::new(),
        "Type 'exit' to quit, 'stats' for session statistics,".to_string(),
        "'viz' for the thought map, 'help' for commands.".to_string(),
    ];
    println!("{}", banner(agent_name, &lines));
}

fn print_help() {
    println!("Available commands:");
    println!("  exit | quit   - leave the console");
    println!("  stats         - session statistics");
    println!("  viz           - render the thought process map");
    println!("  help          - this list");
    println!("Anything else is sent to the model as a query.");
}
