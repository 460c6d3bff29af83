//! # Presentation Pipeline
//!
//! Re-derives everything the renderer needs from the tree after each
//! change: Mutate → Derive → Publish.
//!
//! Derived data is never patched in place. Every effective change produces
//! a fresh [`Snapshot`] (the tree is copy-on-write, so holding one is cheap)
//! and hands it to every subscriber.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tessera_document::{
    visitor::walk_node, MenuIndex, NodeKind, NodeRef, Path, Tree, Visitor, CONTAINER_KEY,
};
use tessera_style::{resolve_node, ResolveContext, ResolvedStyle};
use tracing::{debug, trace};

use crate::document::LayoutDocument;

/// Data derived from a tree for rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Presentation {
    pub menus: MenuIndex,
    /// Node path → style, for every node with a container config and
    /// every `Card`
    pub styles: BTreeMap<Path, ResolvedStyle>,
}

impl Presentation {
    pub fn style_at(&self, path: &Path) -> Option<&ResolvedStyle> {
        self.styles.get(path)
    }
}

/// Point-in-time view handed to the renderer
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub screen_id: String,
    pub version: u64,
    pub generation: u64,
    pub tree: Tree,
    pub presentation: Presentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub type Observer = Box<dyn FnMut(&Snapshot) + Send>;

/// Manages derivation and the observer list
pub struct Pipeline {
    context: ResolveContext,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    latest: Option<Arc<Snapshot>>,
}

impl Pipeline {
    pub fn new(context: ResolveContext) -> Self {
        Self {
            context,
            observers: Vec::new(),
            next_subscription: 0,
            latest: None,
        }
    }

    /// Derive presentation data for `tree`. Pure: the same tree and
    /// context always give the same result.
    pub fn derive(tree: &Tree, context: &ResolveContext) -> Presentation {
        let mut collector = StyleCollector {
            context,
            styles: BTreeMap::new(),
        };
        collector.visit_tree(tree);
        trace!(styles = collector.styles.len(), "Resolved container styles");

        Presentation {
            menus: MenuIndex::build(tree),
            styles: collector.styles,
        }
    }

    /// Derive from the document's current tree and notify subscribers
    pub fn publish(&mut self, document: &LayoutDocument) -> Arc<Snapshot> {
        let tree = document.tree().clone();
        let snapshot = Arc::new(Snapshot {
            screen_id: document.screen_id.clone(),
            version: document.version,
            generation: tree.generation(),
            presentation: Self::derive(&tree, &self.context),
            tree,
        });

        debug!(
            screen = %snapshot.screen_id,
            version = snapshot.version,
            observers = self.observers.len(),
            "Published snapshot"
        );
        for (_, observer) in self.observers.iter_mut() {
            observer(&snapshot);
        }
        self.latest = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.latest.clone()
    }

    pub fn context(&self) -> &ResolveContext {
        &self.context
    }

    /// Switch theme. Takes effect on the next publish.
    pub fn set_context(&mut self, context: ResolveContext) {
        self.context = context;
    }
}

struct StyleCollector<'c> {
    context: &'c ResolveContext,
    styles: BTreeMap<Path, ResolvedStyle>,
}

impl Visitor for StyleCollector<'_> {
    fn visit_node(&mut self, node: NodeRef<'_>, path: &mut Path) {
        if *node.kind() == NodeKind::Card || node.node_attr(CONTAINER_KEY).is_some() {
            self.styles
                .insert(path.clone(), resolve_node(node, self.context));
        }
        walk_node(self, node, path);
    }
}
