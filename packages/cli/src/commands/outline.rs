use super::open_session;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tessera_document::{visitor::walk_node, NodeKind, NodeRef, Path, Tree, Visitor};

#[derive(Debug, Args)]
pub struct OutlineArgs {
    /// Screen id
    pub screen: String,

    /// Include untyped records (tabs, container configs, items)
    #[arg(long)]
    pub records: bool,
}

/// One printed line of the outline
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub depth: usize,
    pub path: Path,
    pub kind: String,
    pub label: Option<String>,
}

struct OutlineCollector {
    records: bool,
    entries: Vec<OutlineEntry>,
    depth: usize,
}

impl Visitor for OutlineCollector {
    fn visit_node(&mut self, node: NodeRef<'_>, path: &mut Path) {
        let shown = !path.is_root() && (self.records || *node.kind() != NodeKind::Record);
        if shown {
            self.entries.push(OutlineEntry {
                depth: self.depth,
                path: path.clone(),
                kind: node.kind().to_string(),
                label: ["title", "label", "text", "id"]
                    .iter()
                    .find_map(|key| node.str_attr(key))
                    .map(str::to_string),
            });
            self.depth += 1;
        }
        walk_node(self, node, path);
        if shown {
            self.depth -= 1;
        }
    }
}

/// Nodes of `tree` in document order with their nesting depth
pub fn collect_outline(tree: &Tree, records: bool) -> Vec<OutlineEntry> {
    let mut collector = OutlineCollector {
        records,
        entries: Vec::new(),
        depth: 0,
    };
    collector.visit_tree(tree);
    collector.entries
}

pub fn outline(args: OutlineArgs, cwd: &str) -> Result<()> {
    let session = open_session(cwd, &args.screen)?;
    let entries = collect_outline(session.document().tree(), args.records);

    println!("{} {}", "📄".bright_blue(), args.screen.bright_white().bold());
    if entries.is_empty() {
        println!("{}", "  (empty layout)".dimmed());
    }
    for entry in entries {
        let indent = "  ".repeat(entry.depth + 1);
        let label = entry
            .label
            .map(|l| format!(" \"{}\"", l))
            .unwrap_or_default();
        println!(
            "{}{}{}  {}",
            indent,
            entry.kind.cyan(),
            label,
            entry.path.to_string().dimmed()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outline_depths() {
        let tree = Tree::from_json(&json!({
            "blocks": [
                { "type": "Card", "blocks": [ { "type": "SectionHeader", "title": "Inner" } ] },
                { "type": "Tabs", "tabs": [ { "title": "One", "blocks": [ { "type": "Divider" } ] } ] }
            ]
        }))
        .unwrap();

        let entries = collect_outline(&tree, false);
        let summary: Vec<(usize, String, String)> = entries
            .iter()
            .map(|e| (e.depth, e.path.encode(), e.kind.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, "/blocks/0".to_string(), "Card".to_string()),
                (1, "/blocks/0/blocks/0".to_string(), "SectionHeader".to_string()),
                (0, "/blocks/1".to_string(), "Tabs".to_string()),
                (1, "/blocks/1/tabs/0/blocks/0".to_string(), "Divider".to_string()),
            ]
        );
        assert_eq!(entries[1].label.as_deref(), Some("Inner"));

        let with_records = collect_outline(&tree, true);
        assert_eq!(with_records.len(), 5);
        assert_eq!(with_records[3].depth, 1);
        assert_eq!(with_records[4].depth, 2);
    }
}
