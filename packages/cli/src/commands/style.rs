use super::open_session;
use anyhow::{anyhow, Result};
use clap::Args;
use tessera_document::Path;
use tessera_style::resolve_node;

#[derive(Debug, Args)]
pub struct StyleArgs {
    /// Screen id
    pub screen: String,

    /// Node path, e.g. /blocks/0
    pub path: String,
}

pub fn style(args: StyleArgs, cwd: &str) -> Result<()> {
    let path: Path = args.path.parse()?;
    let session = open_session(cwd, &args.screen)?;
    let snapshot = session
        .snapshot()
        .ok_or_else(|| anyhow!("No snapshot for '{}'", args.screen))?;

    // Nodes without a container config are not in the presentation map;
    // they resolve with defaults
    let style = match snapshot.presentation.style_at(&path) {
        Some(style) => style.clone(),
        None => {
            let node = snapshot
                .tree
                .resolve_node(&path)
                .ok_or_else(|| anyhow!("No node at {} in '{}'", path, args.screen))?;
            resolve_node(node, session.context())
        }
    };

    println!("{}", serde_json::to_string_pretty(&style)?);
    Ok(())
}
