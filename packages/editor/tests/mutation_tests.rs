//! Mutation tests against small hand-built documents

use blockmail_editor::{Destination, Mutation, MutationError};
use blockmail_model::{
    create_block_with, create_columns_block_with, create_leaf_block_with, Block, BlockContent,
    Breakpoint, DisplayOptions, Document, IdGenerator, LeafContent,
};
use serde_json::json;

fn named(ids: &mut IdGenerator, block_type: &str, id: &str) -> Block {
    let mut block = create_block_with(ids, block_type, None).unwrap();
    block.id = id.to_string();
    block
}

/// `[A: text, col1: 50-50 columns with "inner" in column 0, C: button]`
fn fixture() -> Document {
    let mut ids = IdGenerator::new("mutation-tests");
    let mut columns = create_columns_block_with(&mut ids, "50-50", None);
    columns.id = "col1".to_string();

    let mut inner = create_leaf_block_with(&mut ids, "image", None).unwrap();
    inner.id = "inner".to_string();
    columns.as_columns_mut().unwrap().columns[0].blocks.push(inner);

    Document::from_blocks(vec![
        named(&mut ids, "text", "A"),
        columns,
        named(&mut ids, "button", "C"),
    ])
}

fn top_ids(doc: &Document) -> Vec<&str> {
    doc.blocks.iter().map(|b| b.id.as_str()).collect()
}

#[test]
fn test_insert_block_clamps_index() {
    let doc = fixture();
    let mut ids = IdGenerator::new("insert");
    let mutation = Mutation::InsertBlock {
        index: 99,
        block: named(&mut ids, "spacer", "S"),
    };

    let next = mutation.apply(&doc).unwrap();
    assert_eq!(top_ids(&next), vec!["A", "col1", "C", "S"]);
    assert_eq!(top_ids(&doc), vec!["A", "col1", "C"], "input must be untouched");
}

#[test]
fn test_insert_rejects_existing_id() {
    let doc = fixture();
    let mut ids = IdGenerator::new("insert");
    let mutation = Mutation::InsertBlock {
        index: 0,
        block: named(&mut ids, "spacer", "inner"),
    };
    assert_eq!(
        mutation.apply(&doc),
        Err(MutationError::DuplicateId("inner".to_string()))
    );
}

#[test]
fn test_insert_into_column_validates_slot() {
    let doc = fixture();
    let mut ids = IdGenerator::new("column");
    let block = create_leaf_block_with(&mut ids, "text", None).unwrap();

    let out_of_range = Mutation::InsertIntoColumn {
        parent_id: "col1".to_string(),
        column: 2,
        index: None,
        block: block.clone(),
    };
    assert!(matches!(
        out_of_range.apply(&doc),
        Err(MutationError::ColumnOutOfRange { column: 2, count: 2, .. })
    ));

    let not_columns = Mutation::InsertIntoColumn {
        parent_id: "A".to_string(),
        column: 0,
        index: None,
        block: block.clone(),
    };
    assert_eq!(
        not_columns.apply(&doc),
        Err(MutationError::NotAColumnsBlock("A".to_string()))
    );

    let ok = Mutation::InsertIntoColumn {
        parent_id: "col1".to_string(),
        column: 0,
        index: Some(0),
        block,
    };
    let next = ok.apply(&doc).unwrap();
    let column = &next.get("col1").unwrap().as_columns().unwrap().columns[0];
    assert_eq!(column.blocks.len(), 2);
    assert_eq!(column.blocks[1].id, "inner");
}

#[test]
fn test_move_nested_block_to_canvas() {
    let doc = fixture();
    let mutation = Mutation::MoveBlock {
        block_id: "inner".to_string(),
        to: Destination::Canvas { index: 0 },
    };

    let next = mutation.apply(&doc).unwrap();
    assert_eq!(top_ids(&next), vec!["inner", "A", "col1", "C"]);
    assert!(next.get("col1").unwrap().as_columns().unwrap().columns[0].blocks.is_empty());
    next.validate().unwrap();
}

#[test]
fn test_move_top_level_block_into_column() {
    let doc = fixture();
    let mutation = Mutation::MoveBlock {
        block_id: "C".to_string(),
        to: Destination::Column {
            parent_id: "col1".to_string(),
            column: 1,
            index: None,
        },
    };

    let next = mutation.apply(&doc).unwrap();
    assert_eq!(top_ids(&next), vec!["A", "col1"]);
    let moved = &next.get("col1").unwrap().as_columns().unwrap().columns[1].blocks[0];
    assert_eq!(moved.id, "C");
    assert!(matches!(moved.content, LeafContent::Button(_)));
}

#[test]
fn test_columns_cannot_move_into_a_column() {
    let doc = fixture();
    let mutation = Mutation::MoveBlock {
        block_id: "col1".to_string(),
        to: Destination::Column {
            parent_id: "col1".to_string(),
            column: 0,
            index: None,
        },
    };
    assert_eq!(mutation.apply(&doc), Err(MutationError::NestedColumns));
}

#[test]
fn test_remove_nested_block() {
    let doc = fixture();
    let next = Mutation::RemoveBlock {
        block_id: "inner".to_string(),
    }
    .apply(&doc)
    .unwrap();
    assert!(!next.contains_id("inner"));
    assert_eq!(next.len(), 3);
}

#[test]
fn test_duplicate_inserts_after_source_with_fresh_ids() {
    let doc = fixture();
    let next = Mutation::DuplicateBlock {
        block_id: "col1".to_string(),
    }
    .apply(&doc)
    .unwrap();

    assert_eq!(next.len(), 4);
    assert_eq!(next.blocks[1].id, "col1");
    assert_ne!(next.blocks[2].id, "col1");
    assert!(next.blocks[2].is_columns());
    next.validate().unwrap();
}

#[test]
fn test_set_style_on_one_or_all_breakpoints() {
    let doc = fixture();
    let mobile_only = Mutation::SetStyle {
        block_id: "inner".to_string(),
        breakpoint: Some(Breakpoint::Mobile),
        property: "borderRadius".to_string(),
        value: "8px".to_string(),
    }
    .apply(&doc)
    .unwrap();
    let inner = mobile_only.find_nested("inner").unwrap();
    assert_eq!(inner.styling.property(Breakpoint::Mobile, "borderRadius"), Some("8px"));
    assert_eq!(inner.styling.property(Breakpoint::Desktop, "borderRadius"), None);

    let everywhere = Mutation::SetStyle {
        block_id: "A".to_string(),
        breakpoint: None,
        property: "color".to_string(),
        value: "#111".to_string(),
    }
    .apply(&doc)
    .unwrap();
    for bp in Breakpoint::ALL {
        assert_eq!(everywhere.get("A").unwrap().styling.property(bp, "color"), Some("#111"));
    }

    let removed = Mutation::RemoveStyle {
        block_id: "A".to_string(),
        breakpoint: None,
        property: "color".to_string(),
    }
    .apply(&everywhere)
    .unwrap();
    assert_eq!(removed, doc);
}

#[test]
fn test_update_content_merges_patch() {
    let doc = fixture();
    let next = Mutation::UpdateContent {
        block_id: "C".to_string(),
        patch: json!({ "text": "Shop now", "link": "https://example.com" }),
    }
    .apply(&doc)
    .unwrap();

    match &next.get("C").unwrap().content {
        BlockContent::Leaf(LeafContent::Button(button)) => {
            assert_eq!(button.text, "Shop now");
            assert_eq!(button.link, "https://example.com");
            assert_eq!(button.background_color, "#007bff");
        }
        other => panic!("expected button content, got {:?}", other),
    }
}

#[test]
fn test_update_content_rejects_wrong_shape() {
    let doc = fixture();
    let mutation = Mutation::UpdateContent {
        block_id: "A".to_string(),
        patch: json!({ "html": 42 }),
    };
    assert!(matches!(mutation.apply(&doc), Err(MutationError::InvalidContent(_))));

    let not_object = Mutation::UpdateContent {
        block_id: "A".to_string(),
        patch: json!("text"),
    };
    assert!(matches!(not_object.apply(&doc), Err(MutationError::InvalidContent(_))));
}

#[test]
fn test_display_options_and_starred() {
    let doc = fixture();
    let hidden = DisplayOptions {
        show_on_desktop: true,
        show_on_tablet: false,
        show_on_mobile: false,
    };
    let next = Mutation::SetDisplayOptions {
        block_id: "inner".to_string(),
        options: hidden,
    }
    .apply(&doc)
    .unwrap();
    let next = Mutation::SetStarred {
        block_id: "A".to_string(),
        starred: true,
    }
    .apply(&next)
    .unwrap();

    assert_eq!(next.find_nested("inner").unwrap().display_options, hidden);
    assert!(next.get("A").unwrap().is_starred);
}
