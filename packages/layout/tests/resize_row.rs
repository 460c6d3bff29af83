//! Row resize scenarios driven against a real layout tree

use serde_json::json;
use tessera_document::{Path, Tree};
use tessera_layout::{Drag, RowResizeTable, RowSizing, MIN_WEIGHT, WEIGHT_KEY, WIDTH_KEY};

fn screen() -> Tree {
    Tree::from_json(&json!({
        "blocks": [
            { "type": "SectionHeader", "title": "Stats" },
            {
                "type": "Row",
                "children": [
                    { "type": "Card", "blocks": [] },
                    { "type": "Card", "blocks": [] },
                    { "type": "Card", "blocks": [] }
                ]
            },
            {
                "type": "Row",
                "scrollable": true,
                "children": [ { "type": "Card", "widthDp": 100 }, { "type": "Card" } ]
            }
        ]
    }))
    .unwrap()
}

fn child_f64(tree: &Tree, path: &str, key: &str) -> Option<f64> {
    tree.resolve_node(&path.parse().unwrap())?.f64_attr(key)
}

#[test]
fn test_drag_then_commit_weighted_row() {
    let mut tree = screen();
    let row = Path::block(1);
    let mut table = RowResizeTable::new();
    table.begin(&tree, &row).unwrap();

    // Two small drags add up to a third of the row
    let drag = Drag { delta_px: 50.0, row_width_px: 300.0, density: 1.0 };
    table.drag(&row, 0, &drag);
    table.drag(&row, 0, &drag);

    let sizing = table.finish(&row).unwrap();
    assert!(sizing.commit(&mut tree, &row).is_applied());

    let weights: Vec<f64> = (0..3)
        .map(|i| child_f64(&tree, &format!("/blocks/1/children/{}", i), WEIGHT_KEY).unwrap())
        .collect();
    let sum: f64 = weights.iter().sum();
    assert!((sum - 3.0).abs() < 1e-4);
    assert!(weights[0] > 1.2);
    assert!(weights.iter().all(|w| *w >= MIN_WEIGHT));
    assert!((weights[1] - weights[2]).abs() < 1e-9);
}

#[test]
fn test_committed_weights_seed_next_gesture() {
    let mut tree = screen();
    let row = Path::block(1);
    let drag = Drag { delta_px: 100.0, row_width_px: 300.0, density: 1.0 };

    let first = RowSizing::from_row(tree.resolve_node(&row).unwrap())
        .unwrap()
        .apply_drag(2, &drag);
    first.commit(&mut tree, &row);

    let reloaded = RowSizing::from_row(tree.resolve_node(&row).unwrap()).unwrap();
    let (RowSizing::Weighted(a), RowSizing::Weighted(b)) = (&first, &reloaded) else {
        panic!("expected weighted rows");
    };
    assert_eq!(a.weights(), b.weights());
}

#[test]
fn test_scrollable_row_commits_widths_only() {
    let mut tree = screen();
    let row = Path::block(2);
    let mut table = RowResizeTable::new();
    table.begin(&tree, &row).unwrap();
    table.drag(&row, 1, &Drag { delta_px: -150.0, row_width_px: 0.0, density: 1.5 });

    let sizing = table.finish(&row).unwrap();
    sizing.commit(&mut tree, &row);

    assert_eq!(child_f64(&tree, "/blocks/2/children/0", WIDTH_KEY), Some(100.0));
    assert_eq!(child_f64(&tree, "/blocks/2/children/1", WIDTH_KEY), Some(60.0));
    assert_eq!(child_f64(&tree, "/blocks/2/children/1", WEIGHT_KEY), None);
}

#[test]
fn test_commit_on_vanished_row_is_no_op() {
    let mut tree = screen();
    let row = Path::block(1);
    let sizing = RowSizing::from_row(tree.resolve_node(&row).unwrap()).unwrap();

    let before = tree.to_json();
    assert!(!sizing.commit(&mut tree, &Path::block(0)).is_applied());
    assert!(!sizing.commit(&mut tree, &Path::block(9)).is_applied());
    assert_eq!(tree.to_json(), before);
}
