//! Determinism tests - style resolution is a pure function of its input
//!
//! These tests validate that:
//! - Byte-identical configs produce byte-identical output
//! - No state leaks between calls
//! - The context is the only source of theme colors

use serde_json::json;
use tessera_document::Tree;
use tessera_style::{resolve, Fill, ResolveContext, ResolvedStyle};

fn configs() -> Vec<serde_json::Value> {
    vec![
        json!({}),
        json!({ "style": "text", "customColor": "#FF0000" }),
        json!({ "style": "outlined", "borderThicknessDp": 2 }),
        json!({ "style": "topbottom", "borderMode": "full" }),
        json!({ "gradient1": "#101010", "gradient2": "#F0F0F0", "gradientOrientation": "vertical" }),
        json!({ "color1": "#101010", "color2": "#F0F0F0" }),
        json!({ "style": "tonal", "widthMode": "fixed", "widthDp": 90, "heightMode": "fixed" }),
        json!({ "style": "surface", "image": { "source": "a.png" } }),
        json!({ "style": "mystery", "shape": "hexagon" }),
    ]
}

#[test]
fn test_resolution_is_byte_identical() {
    let ctx = ResolveContext::light();
    for config in configs() {
        let tree = Tree::fragment(&config).expect("config should import");
        let outputs: Vec<String> = (0..10)
            .map(|_| serde_json::to_string(&resolve(Some(tree.root_ref()), &ctx)).unwrap())
            .collect();
        for i in 1..outputs.len() {
            assert_eq!(outputs[0], outputs[i], "config {} differs on call {}", config, i);
        }
    }
}

#[test]
fn test_interleaved_calls_do_not_interfere() {
    let ctx = ResolveContext::light();
    let trees: Vec<Tree> = configs().iter().map(|c| Tree::fragment(c).unwrap()).collect();

    let first: Vec<ResolvedStyle> = trees.iter().map(|t| resolve(Some(t.root_ref()), &ctx)).collect();
    let reversed: Vec<ResolvedStyle> = trees
        .iter()
        .rev()
        .map(|t| resolve(Some(t.root_ref()), &ctx))
        .collect();

    for (a, b) in first.iter().zip(reversed.iter().rev()) {
        assert_eq!(a, b);
    }
}

#[test]
fn test_theme_comes_from_context() {
    let tree = Tree::fragment(&json!({ "style": "primary" })).unwrap();
    let light = resolve(Some(tree.root_ref()), &ResolveContext::light());
    let dark = resolve(Some(tree.root_ref()), &ResolveContext::dark());

    assert_eq!(light.fill, Fill::Solid { color: ResolveContext::light().primary });
    assert_eq!(dark.fill, Fill::Solid { color: ResolveContext::dark().primary });
    assert_ne!(light.fill, dark.fill);
}
