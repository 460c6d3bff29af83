use crate::path::{Path, Step};
use crate::tree::{NodeRef, Tree, Value};

/// Visitor pattern for traversing a layout tree depth-first
///
/// Default implementations walk the entire tree, attributes in key order
/// and list elements in sequence. Override `visit_node` to act on nodes;
/// call [`walk_node`] from the override to keep descending.
pub trait Visitor: Sized {
    fn visit_tree(&mut self, tree: &Tree) {
        walk_tree(self, tree);
    }

    fn visit_node(&mut self, node: NodeRef<'_>, path: &mut Path) {
        walk_node(self, node, path);
    }

    fn visit_scalar(&mut self, _value: &Value, _path: &Path) {
        // Leaf, no children to walk
    }
}

pub fn walk_tree<V: Visitor>(visitor: &mut V, tree: &Tree) {
    let mut path = Path::root();
    visitor.visit_node(tree.root_ref(), &mut path);
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: NodeRef<'_>, path: &mut Path) {
    let tree = node.tree();
    for (key, value) in node.data().attributes() {
        path.push(Step::Field(key.clone()));
        match value {
            Value::Node(id) => {
                if let Some(child) = tree.node(*id) {
                    visitor.visit_node(child, path);
                }
            }
            Value::List(items) => {
                for (i, id) in items.iter().enumerate() {
                    if let Some(child) = tree.node(*id) {
                        path.push(Step::Index(i));
                        visitor.visit_node(child, path);
                        path.pop();
                    }
                }
            }
            scalar => visitor.visit_scalar(scalar, path),
        }
        path.pop();
    }
}
