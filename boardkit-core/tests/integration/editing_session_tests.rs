//! Integration tests for a full editing session
//!
//! Settings configure the store and drag reconciler; blocks are dragged
//! between containers and the result is rendered for every viewport.

use std::time::{Duration, Instant};

use boardkit_core::config::EditorSettings;
use boardkit_core::layout::{
    BlockKind, BlockSpec, Composition, DropOutcome, DropTarget, LayoutError, LayoutStore,
    RenderMode, Viewport, render_document,
};

#[test]
fn settings_drive_split_caps_and_claim_window() {
    let settings: EditorSettings = toml::from_str(
        r#"
        [split_limits]
        desktop = 3
        mobile = 0

        [drag]
        claim_window_ms = 100
        "#,
    )
    .unwrap();
    settings.validate().unwrap();

    let mut store = LayoutStore::with_limits("Page", settings.split_limits);
    let root = store.roots()[0].id;
    assert!(!store.can_split(root, Viewport::Mobile));
    assert!(matches!(
        store.split_container_for(root, Viewport::Mobile),
        Err(LayoutError::MaxDepthReached { max: 0, .. })
    ));

    let [left, right] = store.split_container_for(root, Viewport::Desktop).unwrap();
    let block = store.add_block(BlockSpec::paragraph("moving"), left).unwrap();

    let mut drag = settings.reconciler();
    let start = Instant::now();
    let key = drag.start_block_drag(block, left, 0, start).unwrap();
    let target = DropTarget::append(right);
    assert!(drag.handle_drop(&mut store, key, target, start).is_applied());
    assert_eq!(
        drag.handle_drop(&mut store, key, target, start + Duration::from_millis(50)),
        DropOutcome::Duplicate
    );
    drag.end_drag(key);
    assert_eq!(store.find_block(block).unwrap().container_id, right);
}

#[test]
fn session_renders_per_viewport() {
    let mut store = LayoutStore::new("Landing page");
    let root = store.roots()[0].id;
    let [a, b] = store.split_container(root).unwrap();
    let [a1, a2] = store.split_container(a).unwrap();
    store.add_block(BlockSpec::heading(1, "Title"), a1).unwrap();
    store.add_block(BlockSpec::paragraph("Intro"), a2).unwrap();
    store.add_block(BlockSpec::new(BlockKind::Divider), b).unwrap();
    let spare = store.add_root_container();

    let desktop = render_document(store.roots(), Viewport::Desktop, RenderMode::Edit);
    assert_eq!(desktop.len(), 2);
    assert!(desktop[0].has_horizontal());

    let tablet = render_document(store.roots(), Viewport::Tablet, RenderMode::Edit);
    let Composition::Grid { cells, .. } = &tablet[0] else {
        panic!("expected grid, got {:?}", tablet[0]);
    };
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[2].column_span, 2);

    let mobile = render_document(store.roots(), Viewport::Mobile, RenderMode::Preview);
    assert_eq!(mobile.len(), 1, "preview hides the empty root");
    assert!(!mobile[0].has_horizontal());
    assert!(mobile.iter().all(|c| c.id() != spare));
}

#[test]
fn dragging_out_then_merging_restores_the_section() {
    let mut store = LayoutStore::new("Page");
    let root = store.roots()[0].id;
    let [left, right] = store.split_container(root).unwrap();
    let first = store.add_block(BlockSpec::paragraph("one"), left).unwrap();
    let second = store.add_block(BlockSpec::paragraph("two"), right).unwrap();
    assert!(!store.can_merge(left, right));

    let settings = EditorSettings::default();
    let mut drag = settings.reconciler();
    let key = drag.start_block_drag(second, right, 0, Instant::now()).unwrap();
    let target = drag.hover_over(key, left, 100.0, 1).unwrap();
    assert_eq!(target.index, Some(1));
    assert!(drag.handle_drop_now(&mut store, key, target).is_applied());
    drag.end_drag(key);

    assert!(store.can_merge(right, left));
    let merged = store.merge_containers(right, left).unwrap();
    assert_eq!(merged, root);
    let blocks: Vec<_> = store.roots()[0].blocks().iter().map(|b| b.id).collect();
    assert_eq!(blocks, vec![first, second]);
}
