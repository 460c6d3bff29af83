//! Node-kind catalog.
//!
//! The set of kinds is closed; anything else round-trips through
//! [`NodeKind::Unknown`] untouched so layouts written by newer designers
//! survive editing by older ones.

use std::fmt;

/// JSON key carrying a node's kind
pub const KIND_KEY: &str = "type";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SectionHeader,
    Row,
    Card,
    Tabs,
    ButtonRow,
    ChipRow,
    Slider,
    Toggle,
    List,
    MetricsGrid,
    Progress,
    Alert,
    Image,
    Divider,
    DividerV,
    Spacer,
    Fab,
    Menu,
    IconButton,
    AppBar,
    /// Untyped object: tab records, container configs, menu items, the root
    Record,
    /// Kind not in the catalog, preserved verbatim
    Unknown(String),
}

impl NodeKind {
    pub const CATALOG: [NodeKind; 20] = [
        NodeKind::SectionHeader,
        NodeKind::Row,
        NodeKind::Card,
        NodeKind::Tabs,
        NodeKind::ButtonRow,
        NodeKind::ChipRow,
        NodeKind::Slider,
        NodeKind::Toggle,
        NodeKind::List,
        NodeKind::MetricsGrid,
        NodeKind::Progress,
        NodeKind::Alert,
        NodeKind::Image,
        NodeKind::Divider,
        NodeKind::DividerV,
        NodeKind::Spacer,
        NodeKind::Fab,
        NodeKind::Menu,
        NodeKind::IconButton,
        NodeKind::AppBar,
    ];

    /// Parse the `type` tag of a JSON object. `None` means an untyped record.
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return NodeKind::Record;
        };
        match tag {
            "SectionHeader" => NodeKind::SectionHeader,
            "Row" => NodeKind::Row,
            "Card" => NodeKind::Card,
            "Tabs" => NodeKind::Tabs,
            "ButtonRow" => NodeKind::ButtonRow,
            "ChipRow" => NodeKind::ChipRow,
            "Slider" => NodeKind::Slider,
            "Toggle" => NodeKind::Toggle,
            "List" => NodeKind::List,
            "MetricsGrid" => NodeKind::MetricsGrid,
            "Progress" => NodeKind::Progress,
            "Alert" => NodeKind::Alert,
            "Image" => NodeKind::Image,
            "Divider" => NodeKind::Divider,
            "DividerV" => NodeKind::DividerV,
            "Spacer" => NodeKind::Spacer,
            "Fab" => NodeKind::Fab,
            "Menu" => NodeKind::Menu,
            "IconButton" => NodeKind::IconButton,
            "AppBar" => NodeKind::AppBar,
            other => NodeKind::Unknown(other.to_string()),
        }
    }

    /// The `type` tag written back to JSON. `None` for untyped records.
    pub fn tag(&self) -> Option<&str> {
        let tag = match self {
            NodeKind::SectionHeader => "SectionHeader",
            NodeKind::Row => "Row",
            NodeKind::Card => "Card",
            NodeKind::Tabs => "Tabs",
            NodeKind::ButtonRow => "ButtonRow",
            NodeKind::ChipRow => "ChipRow",
            NodeKind::Slider => "Slider",
            NodeKind::Toggle => "Toggle",
            NodeKind::List => "List",
            NodeKind::MetricsGrid => "MetricsGrid",
            NodeKind::Progress => "Progress",
            NodeKind::Alert => "Alert",
            NodeKind::Image => "Image",
            NodeKind::Divider => "Divider",
            NodeKind::DividerV => "DividerV",
            NodeKind::Spacer => "Spacer",
            NodeKind::Fab => "Fab",
            NodeKind::Menu => "Menu",
            NodeKind::IconButton => "IconButton",
            NodeKind::AppBar => "AppBar",
            NodeKind::Record => return None,
            NodeKind::Unknown(tag) => tag.as_str(),
        };
        Some(tag)
    }

    /// List attributes this kind owns as ordered children.
    pub fn child_lists(&self) -> &'static [&'static str] {
        match self {
            NodeKind::Card => &["blocks"],
            NodeKind::Tabs => &["tabs"],
            NodeKind::Row => &["children"],
            NodeKind::ButtonRow => &["buttons"],
            NodeKind::ChipRow => &["chips"],
            NodeKind::List | NodeKind::MetricsGrid | NodeKind::Menu => &["items"],
            NodeKind::AppBar => &["actions"],
            // Tab records and the root carry nested blocks
            NodeKind::Record => &["blocks"],
            NodeKind::SectionHeader
            | NodeKind::Slider
            | NodeKind::Toggle
            | NodeKind::Progress
            | NodeKind::Alert
            | NodeKind::Image
            | NodeKind::Divider
            | NodeKind::DividerV
            | NodeKind::Spacer
            | NodeKind::Fab
            | NodeKind::IconButton
            | NodeKind::Unknown(_) => &[],
        }
    }

    /// Whether nodes of this kind accept a `container` style config.
    pub fn accepts_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Card
                | NodeKind::Row
                | NodeKind::Tabs
                | NodeKind::ButtonRow
                | NodeKind::ChipRow
                | NodeKind::List
                | NodeKind::MetricsGrid
                | NodeKind::Alert
                | NodeKind::Image
                | NodeKind::SectionHeader
        )
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, NodeKind::Unknown(_))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or("{record}"))
    }
}
