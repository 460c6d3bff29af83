use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tessera_editor::{FileLayoutHost, LayoutHost, Tree};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Layout directory
    #[arg(short, long, default_value = "layouts")]
    pub layout_dir: String,

    /// Theme (light, dark)
    #[arg(short, long, default_value = "light")]
    pub theme: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

const EXAMPLE_SCREEN: &str = "home";

fn example_layout() -> serde_json::Value {
    json!({
        "page": { "title": "Home" },
        "blocks": [
            { "type": "SectionHeader", "title": "Overview" },
            {
                "type": "Row",
                "children": [
                    { "type": "Card", "blocks": [ { "type": "Progress", "label": "Storage", "value": 0.4 } ] },
                    { "type": "Card", "container": { "style": "tonal" }, "blocks": [] }
                ]
            },
            { "type": "ButtonRow", "buttons": [ { "label": "Open", "actionId": "open" } ] }
        ]
    })
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        layout_dir: args.layout_dir.clone(),
        theme: args.theme.clone(),
        ..Config::default()
    };
    // Reject unknown themes before writing anything
    config.resolve_context()?;

    println!("{}", "📝 Initializing Tessera project...".bright_blue().bold());

    let mut host = FileLayoutHost::new(config.get_layout_dir(cwd));
    host.init()?;
    println!("  {} Created {}/", "✓".green(), args.layout_dir);

    if host.screens()?.is_empty() {
        let tree = Tree::from_json(&example_layout())?;
        host.save_draft(EXAMPLE_SCREEN, &tree)?;
        host.publish(EXAMPLE_SCREEN)?;
        println!("  {} Created example screen '{}'", "✓".green(), EXAMPLE_SCREEN);
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: tessera outline {}", EXAMPLE_SCREEN);
    println!("  2. Run: tessera apply {} mutations.json", EXAMPLE_SCREEN);
    println!("  3. Run: tessera publish {}", EXAMPLE_SCREEN);

    Ok(())
}
