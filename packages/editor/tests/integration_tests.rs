//! Integration tests for editor crate

use std::sync::{Arc, Mutex};

use serde_json::json;
use tessera_editor::{
    DesignerSession, FileLayoutHost, LayoutHost, Mutation, Path, Position, ResolveContext,
    SessionOptions,
};
use tessera_style::{Color, Fill};

fn write_published(host: &FileLayoutHost, screen: &str, layout: serde_json::Value) {
    host.init().unwrap();
    std::fs::write(
        host.published_path(screen),
        serde_json::to_string_pretty(&layout).unwrap(),
    )
    .unwrap();
}

#[test]
fn test_file_backed_session_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let host = FileLayoutHost::new(dir.path());
    write_published(
        &host,
        "home",
        json!({
            "page": { "title": "Home" },
            "blocks": [ { "type": "SectionHeader", "title": "Welcome" } ]
        }),
    );

    let mut session = DesignerSession::open(host, "home", SessionOptions::default()).unwrap();
    session
        .apply(Mutation::Insert {
            anchor: Some(Path::block(0)),
            node: json!({ "type": "Card", "blocks": [], "container": { "customColor": "#000000" } }),
            position: Position::After,
        })
        .unwrap();

    assert!(session.save_draft().unwrap());
    assert!(session.publish().unwrap());

    // A fresh session sees the published edit, with top-level singletons intact
    let reopened =
        DesignerSession::open(FileLayoutHost::new(dir.path()), "home", SessionOptions::default())
            .unwrap();
    let tree = reopened.document().tree();
    assert_eq!(tree.blocks().len(), 2);
    assert_eq!(tree.top_level("page"), Some(json!({ "title": "Home" })));

    let style = reopened
        .snapshot()
        .unwrap()
        .presentation
        .style_at(&Path::block(1))
        .cloned()
        .unwrap();
    assert_eq!(style.fill, Fill::Solid { color: Color::BLACK });
    assert_eq!(style.content_color, ResolveContext::light().light_content);
}

#[test]
fn test_subscribers_see_every_effective_change() {
    let mut session = DesignerSession::open(
        tessera_editor::MemoryLayoutHost::new(),
        "home",
        SessionOptions::default(),
    )
    .unwrap();

    let versions = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&versions);
    session.subscribe(Box::new(move |snapshot| {
        sink.lock().unwrap().push((snapshot.version, snapshot.tree.blocks().len()));
    }));

    let divider = || Mutation::Insert {
        anchor: None,
        node: json!({ "type": "Divider" }),
        position: Position::After,
    };
    session.apply(divider()).unwrap();
    session.apply(Mutation::Remove { path: Path::block(5) }).unwrap();
    session.apply(divider()).unwrap();
    session.undo();

    assert_eq!(*versions.lock().unwrap(), vec![(1, 1), (2, 2), (3, 1)]);
}

#[test]
fn test_theme_switch_rederives_styles() {
    let mut host = tessera_editor::MemoryLayoutHost::new();
    let tree = tessera_editor::Tree::from_json(&json!({
        "blocks": [ { "type": "Card", "container": { "style": "primary" } } ]
    }))
    .unwrap();
    host.save_draft("home", &tree).unwrap();

    let mut session = DesignerSession::open(host, "home", SessionOptions::default()).unwrap();
    let light = session.snapshot().unwrap();
    session.set_context(ResolveContext::dark());
    let dark = session.snapshot().unwrap();

    assert_eq!(
        light.presentation.style_at(&Path::block(0)).unwrap().fill,
        Fill::Solid { color: ResolveContext::light().primary }
    );
    assert_eq!(
        dark.presentation.style_at(&Path::block(0)).unwrap().fill,
        Fill::Solid { color: ResolveContext::dark().primary }
    );
    // Snapshots are immutable once published
    assert_ne!(light.presentation, dark.presentation);
}

#[test]
fn test_mutation_serialization() {
    let mutations: Vec<Mutation> = serde_json::from_value(json!([
        { "Insert": { "anchor": "/blocks/0", "node": { "type": "Spacer" }, "position": "before" } },
        { "Move": { "path": "/blocks/1", "delta": 2 } },
        { "SetAttribute": { "path": "/blocks/0", "name": "height", "value": 12 } },
        { "SetTopLevel": { "key": "fab", "value": { "icon": "add" } } }
    ]))
    .unwrap();
    assert_eq!(mutations.len(), 4);

    let json = serde_json::to_string(&mutations).unwrap();
    let deserialized: Vec<Mutation> = serde_json::from_str(&json).unwrap();
    assert_eq!(mutations, deserialized);
}

#[test]
fn test_malformed_path_in_script_is_rejected() {
    let result: Result<Mutation, _> =
        serde_json::from_value(json!({ "Remove": { "path": "blocks/0" } }));
    assert!(result.is_err());
}
