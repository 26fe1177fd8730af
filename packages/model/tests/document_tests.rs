//! Loading documents produced by the canvas UI

use blockmail_model::{Block, BlockType, Document, LeafContent, BlockContent};

const LEGACY_DOCUMENT: &str = r#"[
  {
    "id": "text-1",
    "type": "text",
    "content": { "html": "<p>Hello</p>" },
    "styling": {
      "desktop": { "padding": "10px 20px", "fontSize": "16px" },
      "tablet": { "padding": "10px 16px", "fontSize": "16px" },
      "mobile": { "padding": "8px 12px", "fontSize": "14px" }
    },
    "position": { "x": 0, "y": 0 },
    "displayOptions": { "showOnDesktop": true, "showOnTablet": true, "showOnMobile": false },
    "isStarred": true,
    "sectionId": "intro"
  },
  {
    "id": "cols-1",
    "type": "columns",
    "content": {
      "columnRatio": "50-50",
      "columnCount": 2,
      "gap": 20,
      "columns": [
        {
          "id": "c-0",
          "blocks": [ { "id": "btn-1", "type": "button", "content": { "text": "Go" } } ]
        },
        { "id": "c-1", "blocks": [] }
      ]
    }
  },
  { "id": "weird-1", "type": "countdown", "content": { "until": "soon" } },
  { "id": "broken-1", "type": "spacer", "content": { "height": 42 } }
]"#;

#[test]
fn test_load_legacy_document() {
    let doc = Document::from_json(LEGACY_DOCUMENT).unwrap();

    assert_eq!(doc.len(), 4);
    assert!(doc.validate().is_ok());

    let text = &doc.blocks[0];
    assert_eq!(text.block_type(), Some(BlockType::Text));
    assert!(text.is_starred);
    assert_eq!(text.section_id.as_deref(), Some("intro"));
    assert!(!text.display_options.show_on_mobile);

    let button = doc.find_nested("btn-1").unwrap();
    match &button.content {
        LeafContent::Button(b) => {
            assert_eq!(b.text, "Go");
            assert_eq!(b.link, "");
        }
        other => panic!("expected button, got {:?}", other),
    }
}

#[test]
fn test_anomalies_degrade_to_unrecognized() {
    let doc = Document::from_json(LEGACY_DOCUMENT).unwrap();

    assert_eq!(doc.blocks[2].type_name(), "countdown");
    assert_eq!(doc.blocks[2].block_type(), None);

    // Height has the wrong JSON type for a spacer
    assert!(matches!(
        &doc.blocks[3].content,
        BlockContent::Leaf(LeafContent::Unrecognized { block_type, .. }) if block_type == "spacer"
    ));
}

#[test]
fn test_round_trip_preserves_everything() {
    let doc = Document::from_json(LEGACY_DOCUMENT).unwrap();
    let json = doc.to_json_pretty().unwrap();
    let again = Document::from_json(&json).unwrap();

    assert_eq!(doc, again);
}

#[test]
fn test_block_without_id_is_rejected() {
    let result: Result<Block, _> = serde_json::from_str(r#"{"id": "", "type": "text"}"#);
    assert!(result.is_err());
}
