use mindmap_engine::{
    DiagramSettings, Host, LayoutStrategy, NodeId, PlainTextNotes, export_svg, extract_blocks,
};
use pretty_assertions::assert_eq;

const DOCUMENT: &str = r#"# Meeting notes

```mindmap
- Launch
  - Marketing
    - Blog post
    - Newsletter
  - Engineering
    - Release build
```

```mindmap
# Retro
## Went well
Shipped on time.
## To improve
```
"#;

fn find(host_diagram: &mindmap_engine::DiagramRef, text: &str) -> NodeId {
    let diagram = host_diagram.borrow();
    let mut found = None;
    diagram.root().unwrap().walk(&mut |n, _| {
        if n.text == text {
            found = Some(n.id.clone());
        }
    });
    found.unwrap()
}

#[test]
fn folds_survive_reopening_a_block() {
    let blocks = extract_blocks(DOCUMENT);
    assert_eq!(blocks.len(), 2);

    let mut host = Host::default();
    let first = host.open(&blocks[0], 800.0, 600.0);
    let marketing = find(&first, "Marketing");
    first.borrow_mut().toggle(&marketing);
    drop(first);

    let reopened = host.open(&blocks[0], 800.0, 600.0);
    let diagram = reopened.borrow();
    assert!(diagram.root().unwrap().find(&marketing).unwrap().collapsed);
    assert!(diagram.layout().unwrap().nodes.iter().all(|n| n.text != "Blog post"));
    assert_eq!(host.live_instances(), 1);
}

#[test]
fn collapse_and_expand_all_round_trip_every_strategy() {
    let blocks = extract_blocks(DOCUMENT);
    let mut host = Host::default();

    for strategy in LayoutStrategy::ALL {
        let fresh = host.open(&blocks[0], 800.0, 600.0);
        fresh.borrow_mut().set_strategy(strategy);
        let expected = fresh.borrow().bounds();

        let diagram = host.open(&blocks[0], 800.0, 600.0);
        let mut d = diagram.borrow_mut();
        d.set_strategy(strategy);
        d.collapse_all();
        assert_eq!(d.layout().unwrap().nodes.len(), 1, "{strategy}");
        d.expand_all();
        assert_eq!(d.bounds(), expected, "{strategy}");
    }
}

#[test]
fn note_width_broadcast_rewraps_open_notes() {
    let blocks = extract_blocks(DOCUMENT);
    let mut host = Host::new(DiagramSettings {
        note_panel_width: 200,
        ..DiagramSettings::default()
    });
    let retro = host.open(&blocks[1], 800.0, 600.0);
    let went_well = find(&retro, "Went well");

    {
        let mut d = retro.borrow_mut();
        d.set_note_renderer(PlainTextNotes);
        assert_eq!(d.open_note(&went_well).unwrap().body, "Shipped on time.");
    }

    host.set_note_panel_width(400);
    assert_eq!(retro.borrow().note_panel().unwrap().width, 400);
}

#[test]
fn exported_svg_reflects_current_view() {
    let dir = tempfile::tempdir().unwrap();
    let blocks = extract_blocks(DOCUMENT);
    let mut host = Host::default();
    let diagram = host.open(&blocks[0], 800.0, 600.0);
    let engineering = find(&diagram, "Engineering");
    diagram.borrow_mut().toggle(&engineering);

    let path = dir.path().join("launch.svg");
    export_svg(&diagram.borrow(), &path).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains(">Launch</text>"));
    assert!(svg.contains(">Newsletter</text>"));
    assert!(!svg.contains(">Release build</text>"));
}
