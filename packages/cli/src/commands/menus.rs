use super::open_session;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct MenusArgs {
    /// Screen id
    pub screen: String,

    /// Print the index as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn menus(args: MenusArgs, cwd: &str) -> Result<()> {
    let session = open_session(cwd, &args.screen)?;
    let Some(snapshot) = session.snapshot() else {
        return Ok(());
    };
    let index = &snapshot.presentation.menus;

    if args.json {
        println!("{}", serde_json::to_string_pretty(index)?);
        return Ok(());
    }

    if index.is_empty() {
        println!("{}", "No menus".dimmed());
        return Ok(());
    }
    for id in index.ids() {
        println!("{}", id.bright_white().bold());
        for item in index.get(id).unwrap_or_default() {
            let action = item
                .action_id
                .as_deref()
                .map(|a| format!(" → {}", a))
                .unwrap_or_default();
            let line = format!("  {}{}", item.label, action);
            if item.enabled {
                println!("{}", line);
            } else {
                println!("{}", line.dimmed());
            }
        }
    }
    Ok(())
}
