//! Drop handling through the payload protocol and the engine

use blockmail_editor::{apply_drag_payload, apply_drag_payload_with, DragPayload, DropTarget};
use blockmail_model::{
    create_block_with, create_columns_block_with, Block, Document, IdGenerator, LeafContent,
};

fn named(ids: &mut IdGenerator, block_type: &str, id: &str) -> Block {
    let mut block = create_block_with(ids, block_type, None).unwrap();
    block.id = id.to_string();
    block
}

fn abc() -> Document {
    let mut ids = IdGenerator::new("drag-tests");
    Document::from_blocks(vec![
        named(&mut ids, "text", "A"),
        named(&mut ids, "image", "B"),
        named(&mut ids, "button", "C"),
    ])
}

fn with_columns() -> Document {
    let mut ids = IdGenerator::new("drag-tests");
    let mut columns = create_columns_block_with(&mut ids, "33-33-33", None);
    columns.id = "col1".to_string();
    Document::from_blocks(vec![named(&mut ids, "text", "A"), columns])
}

fn top_ids(doc: &Document) -> Vec<&str> {
    doc.blocks.iter().map(|b| b.id.as_str()).collect()
}

#[test]
fn test_reorder_first_to_last() {
    let doc = abc();
    let next = apply_drag_payload(&doc, &DragPayload::reorder("A"), Some(&DropTarget::canvas(2)));
    assert_eq!(top_ids(&next), vec!["B", "C", "A"]);
}

#[test]
fn test_reorder_from_raw_wire_string() {
    let doc = abc();
    let payload = DragPayload::parse("C");
    let next = apply_drag_payload(&doc, &payload, Some(&DropTarget::canvas(0)));
    assert_eq!(top_ids(&next), vec!["C", "A", "B"]);
}

#[test]
fn test_same_index_and_missing_target_are_noops() {
    let doc = abc();
    assert_eq!(
        apply_drag_payload(&doc, &DragPayload::reorder("B"), Some(&DropTarget::canvas(1))),
        doc
    );
    assert_eq!(apply_drag_payload(&doc, &DragPayload::reorder("B"), None), doc);
    assert_eq!(
        apply_drag_payload(&doc, &DragPayload::parse("not-a-block"), Some(&DropTarget::canvas(0))),
        doc
    );
}

#[test]
fn test_new_block_inserted_at_drop_index() {
    let doc = abc();
    let mut ids = IdGenerator::new("new-block");
    let next = apply_drag_payload_with(
        &mut ids,
        &doc,
        &DragPayload::parse(r#"{"blockType":"divider"}"#),
        Some(&DropTarget::canvas(1)),
    );
    assert_eq!(next.len(), 4);
    assert_eq!(next.blocks[1].type_name(), "divider");
    next.validate().unwrap();
}

#[test]
fn test_button_dropped_on_column_slot() {
    let doc = with_columns();
    let target = DropTarget::from_zone("col1-1", doc.len());
    let next = apply_drag_payload(&doc, &DragPayload::new_block("button"), target.as_ref());

    let columns = &next.get("col1").unwrap().as_columns().unwrap().columns;
    assert_eq!(columns[0].blocks.len(), 0);
    assert_eq!(columns[1].blocks.len(), 1);
    assert_eq!(columns[2].blocks.len(), 0);
    assert!(matches!(columns[1].blocks[0].content, LeafContent::Button(_)));
    assert_eq!(next.len(), doc.len());
}

#[test]
fn test_invalid_column_drops_are_noops() {
    let doc = with_columns();
    for zone in ["col1-3", "missing-0", "A-0"] {
        let target = DropTarget::from_zone(zone, doc.len());
        let next = apply_drag_payload(&doc, &DragPayload::new_block("button"), target.as_ref());
        assert_eq!(next, doc, "drop on {} should change nothing", zone);
    }

    let target = DropTarget::from_zone("col1-0", doc.len());
    let nested_layout = apply_drag_payload(&doc, &DragPayload::layout("50-50", 2), target.as_ref());
    assert_eq!(nested_layout, doc);
}

#[test]
fn test_layout_preset_inserts_columns() {
    let doc = abc();
    let payload = DragPayload::parse(
        r#"{"blockType":"columns","isLayout":true,
            "layoutData":{"columnCount":2,"columnRatio":"33-67"}}"#,
    );
    let next = apply_drag_payload(&doc, &payload, Some(&DropTarget::canvas(3)));

    let columns = next.blocks[3].as_columns().unwrap();
    assert_eq!(columns.column_ratio, "33-67");
    assert_eq!(columns.columns.len(), 2);
}

#[test]
fn test_layout_with_unknown_ratio_falls_back() {
    let doc = Document::new();
    let payload = DragPayload::layout("10-90", 2);
    let next = apply_drag_payload(&doc, &payload, Some(&DropTarget::canvas(0)));
    assert_eq!(next.blocks[0].as_columns().unwrap().column_ratio, "50-50");
}

#[test]
fn test_reorder_moves_block_into_and_out_of_columns() {
    let doc = with_columns();
    let payload = DragPayload::reorder("A");
    let into = apply_drag_payload(&doc, &payload, Some(&DropTarget::column("col1", 2)));
    assert_eq!(top_ids(&into), vec!["col1"]);
    assert_eq!(into.find_nested("A").map(|b| b.id.as_str()), Some("A"));

    let out = apply_drag_payload(&into, &payload, Some(&DropTarget::canvas(1)));
    assert_eq!(top_ids(&out), vec!["col1", "A"]);
    assert!(out.get("col1").unwrap().as_columns().unwrap().columns[2].blocks.is_empty());
}

#[test]
fn test_rapid_drops_keep_ids_unique() {
    let mut doc = with_columns();
    for (i, block_type) in ["text", "image", "button", "social", "table"].iter().enumerate() {
        let zone = format!("col1-{}", i % 3);
        let target = DropTarget::from_zone(&zone, doc.len());
        let payload = DragPayload::new_block(*block_type);
        doc = apply_drag_payload(&doc, &payload, target.as_ref());
        doc = apply_drag_payload(&doc, &payload, Some(&DropTarget::canvas(0)));
    }
    assert_eq!(doc.block_ids().len(), 2 + 10);
    doc.validate().unwrap();
}
