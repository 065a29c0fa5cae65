//! Human and JSON output rendering.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use serde_json::json;

use crate::domain::models::ConvergeOutcome;

/// Print one convergence outcome.
///
/// # Errors
///
/// Fails only when JSON serialization fails.
pub fn print_outcome(username: &str, outcome: &ConvergeOutcome, json: bool) -> Result<()> {
    if json {
        let line = json!({ "username": username, "result": outcome });
        println!("{}", serde_json::to_string(&line)?);
        return Ok(());
    }
    match outcome {
        ConvergeOutcome::Unchanged => println!("{username}: no changes needed"),
        ConvergeOutcome::Applied { action, commands } => {
            println!("{username}: converged ({action})");
            for command in commands {
                println!("  ran: {}", command.display());
            }
        }
    }
    Ok(())
}

/// Print a dry-run plan: every command that would have been dispatched.
///
/// # Errors
///
/// Fails only when JSON serialization fails.
pub fn print_plan(calls: &[(String, Vec<String>)], json: bool) -> Result<()> {
    if json {
        let rows: Vec<_> = calls
            .iter()
            .map(|(command, args)| json!({ "command": command, "args": args }))
            .collect();
        println!("{}", serde_json::to_string(&rows)?);
        return Ok(());
    }

    if calls.is_empty() {
        println!("no changes needed");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "command"]);
    for (index, (command, args)) in calls.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            format!("{command} {}", args.join(" ")),
        ]);
    }
    println!("{table}");
    Ok(())
}
