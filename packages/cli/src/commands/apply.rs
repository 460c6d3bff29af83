use super::open_session;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use tessera_editor::Mutation;
use tracing::info;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Screen id
    pub screen: String,

    /// JSON file holding an array of mutations
    pub mutations: PathBuf,

    /// Apply without saving a draft
    #[arg(long)]
    pub dry_run: bool,
}

/// Parse a mutation script: a JSON array, or a single mutation object
pub fn parse_mutations(source: &str) -> Result<Vec<Mutation>> {
    let json: serde_json::Value = serde_json::from_str(source)?;
    let mutations = match json {
        serde_json::Value::Array(_) => serde_json::from_value(json)?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        other => return Err(anyhow!("Expected an array of mutations, found {}", other)),
    };
    Ok(mutations)
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let script = PathBuf::from(cwd).join(&args.mutations);
    let source = fs::read_to_string(&script)
        .with_context(|| format!("Cannot read {}", script.display()))?;
    let mutations = parse_mutations(&source)?;

    let mut session = open_session(cwd, &args.screen)?;
    println!(
        "{}",
        format!("🔧 Applying {} mutations to '{}'...", mutations.len(), args.screen)
            .bright_blue()
            .bold()
    );

    let descriptions: Vec<String> = mutations.iter().map(Mutation::describe).collect();
    let edits = session.apply_all(mutations, Some(&args.mutations.display().to_string()))?;

    let mut applied = 0;
    for (description, edit) in descriptions.iter().zip(&edits) {
        if edit.is_applied() {
            applied += 1;
            println!("  {} {} → {}", "✓".green(), description, edit.path);
        } else {
            println!("  {} {} {}", "·".dimmed(), description, "(no effect)".dimmed());
        }
    }

    info!(
        screen = %args.screen,
        script = %script.display(),
        total = edits.len(),
        applied,
        "Applied mutation script"
    );

    println!();
    if args.dry_run {
        println!("{} {} changes (dry run, nothing saved)", "ℹ".cyan(), applied);
    } else if session.save_draft()? {
        println!("{} Saved draft with {} changes", "✅".green(), applied);
    } else {
        println!("{} Draft unchanged", "✅".green());
    }
    Ok(())
}
