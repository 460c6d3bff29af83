//! Tests for complex mutation sequences
//!
//! This tests:
//! - Insert + move + remove chains
//! - Undo/redo sequences
//! - Batched mutations
//! - Document integrity after operations

use serde_json::json;
use tessera_editor::{
    DesignerSession, Drag, MemoryLayoutHost, Mutation, Path, Position, SessionOptions, Tree,
};

fn open(layout: serde_json::Value) -> DesignerSession<MemoryLayoutHost> {
    let host = MemoryLayoutHost::new().with_published("screen", Tree::from_json(&layout).unwrap());
    DesignerSession::open(host, "screen", SessionOptions::default()).unwrap()
}

fn titles(session: &DesignerSession<MemoryLayoutHost>) -> Vec<String> {
    session
        .document()
        .tree()
        .blocks()
        .iter()
        .map(|b| b.str_attr("title").unwrap_or("-").to_string())
        .collect()
}

fn header(title: &str) -> serde_json::Value {
    json!({ "type": "SectionHeader", "title": title })
}

#[test]
fn test_insert_move_remove_chain() {
    let mut session = open(json!({ "blocks": [ header("A"), header("B"), header("C") ] }));

    let edit = session
        .apply(Mutation::Insert {
            anchor: Some(Path::block(1)),
            node: header("X"),
            position: Position::After,
        })
        .unwrap();
    assert_eq!(edit.path, Path::block(2));
    assert_eq!(titles(&session), vec!["A", "B", "X", "C"]);

    let edit = session.apply(Mutation::Move { path: edit.path, delta: -2 }).unwrap();
    assert_eq!(edit.path, Path::block(0));
    assert_eq!(titles(&session), vec!["X", "A", "B", "C"]);

    session.apply(Mutation::Remove { path: Path::block(2) }).unwrap();
    assert_eq!(titles(&session), vec!["X", "A", "C"]);

    // Walk all the way back, then forward again
    assert!(session.undo());
    assert_eq!(titles(&session), vec!["X", "A", "B", "C"]);
    assert!(session.undo());
    assert!(session.undo());
    assert_eq!(titles(&session), vec!["A", "B", "C"]);
    assert!(!session.undo());

    assert!(session.redo());
    assert!(session.redo());
    assert!(session.redo());
    assert_eq!(titles(&session), vec!["X", "A", "C"]);
    assert!(!session.redo());
}

#[test]
fn test_batch_undoes_as_one_step() {
    let mut session = open(json!({ "blocks": [ header("A") ] }));

    let edits = session
        .apply_all(
            vec![
                Mutation::Duplicate { path: Path::block(0) },
                Mutation::Duplicate { path: Path::block(1) },
                Mutation::SetAttribute {
                    path: Path::block(2),
                    name: "title".to_string(),
                    value: json!("C"),
                },
            ],
            Some("Fill section"),
        )
        .unwrap();
    assert_eq!(edits.len(), 3);
    assert_eq!(titles(&session), vec!["A", "A", "C"]);
    assert_eq!(session.history().undo_description(), Some("Fill section"));

    assert!(session.undo());
    assert_eq!(titles(&session), vec!["A"]);
    assert!(!session.history().can_undo());
}

#[test]
fn test_nested_edits_keep_siblings_intact() {
    let mut session = open(json!({
        "blocks": [
            { "type": "Tabs", "tabs": [
                { "title": "One", "blocks": [ header("1a"), header("1b") ] },
                { "title": "Two", "blocks": [ header("2a") ] }
            ] },
            header("after")
        ]
    }));

    let inner: Path = "/blocks/0/tabs/0/blocks/1".parse().unwrap();
    session.apply(Mutation::Duplicate { path: inner.clone() }).unwrap();
    session.apply(Mutation::Move { path: inner, delta: -5 }).unwrap();

    let tree = session.document().tree();
    let first_tab: Path = "/blocks/0/tabs/0/blocks".parse().unwrap();
    let json = tree.resolve_json(&first_tab).unwrap();
    assert_eq!(
        json,
        json!([ header("1b"), header("1a"), header("1b") ])
    );
    let second_tab: Path = "/blocks/0/tabs/1/blocks".parse().unwrap();
    assert_eq!(tree.resolve_json(&second_tab).unwrap(), json!([ header("2a") ]));
    assert_eq!(titles(&session), vec!["-", "after"]);
}

#[test]
fn test_structural_edit_drops_pending_resize() {
    let mut session = open(json!({
        "blocks": [
            header("top"),
            { "type": "Row", "children": [ { "type": "Card" }, { "type": "Card" } ] }
        ]
    }));
    let row = Path::block(1);
    session.begin_resize(&row).unwrap();
    session.drag_resize(&row, 0, &Drag { delta_px: 40.0, row_width_px: 200.0, density: 1.0 });

    // The row moves to /blocks/0, so the tracked path is stale
    session.apply(Mutation::Remove { path: Path::block(0) }).unwrap();
    assert!(session.end_resize(&row).unwrap().is_none());

    let children = session.document().tree().blocks()[0].list_attr("children").unwrap();
    assert!(children.iter().all(|c| c.f64_attr("weight").is_none()));
}

#[test]
fn test_resize_is_undoable() {
    let mut session = open(json!({
        "blocks": [ { "type": "Row", "children": [ { "type": "Card" }, { "type": "Card" } ] } ]
    }));
    let original = session.document().tree().clone();
    let row = Path::block(0);

    session.begin_resize(&row).unwrap();
    session.drag_resize(&row, 0, &Drag { delta_px: 50.0, row_width_px: 200.0, density: 1.0 });
    session.end_resize(&row).unwrap();

    let weights: Vec<f64> = session.document().tree().blocks()[0]
        .list_attr("children")
        .unwrap()
        .iter()
        .map(|c| c.f64_attr("weight").unwrap())
        .collect();
    assert!((weights.iter().sum::<f64>() - 2.0).abs() < 1e-4);
    assert!(weights[0] > weights[1]);

    assert!(session.undo());
    assert_eq!(session.document().tree(), &original);
}
