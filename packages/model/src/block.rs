//! # Block tree
//!
//! A document is a list of top-level [`Block`]s. A block's content is either a
//! leaf variant or a columns layout whose columns hold [`LeafBlock`]s only:
//!
//! ```text
//! Document
//!  └─ Block (text | image | … | columns)
//!      └─ Column (columns only)
//!          └─ LeafBlock (never columns)
//! ```
//!
//! Serialization uses the flat wire shape
//! `{ id, type, content, styling, position, displayOptions, isStarred, sectionId? }`.
//! Unknown types, and content that does not fit its declared type, load as
//! [`LeafContent::Unrecognized`] with the raw JSON preserved.

use crate::content::*;
use crate::error::ModelError;
use crate::styling::{DisplayOptions, Position, Styling};
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Closed set of block variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Image,
    Button,
    Spacer,
    Divider,
    Html,
    Video,
    Social,
    Table,
    Columns,
    Content,
    ProductFeed,
}

impl BlockType {
    pub const ALL: [BlockType; 12] = [
        BlockType::Text,
        BlockType::Image,
        BlockType::Button,
        BlockType::Spacer,
        BlockType::Divider,
        BlockType::Html,
        BlockType::Video,
        BlockType::Social,
        BlockType::Table,
        BlockType::Columns,
        BlockType::Content,
        BlockType::ProductFeed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Spacer => "spacer",
            BlockType::Divider => "divider",
            BlockType::Html => "html",
            BlockType::Video => "video",
            BlockType::Social => "social",
            BlockType::Table => "table",
            BlockType::Columns => "columns",
            BlockType::Content => "content",
            BlockType::ProductFeed => "productfeed",
        }
    }

    /// Everything except `columns` may live inside a column
    pub fn is_leaf(&self) -> bool {
        !matches!(self, BlockType::Columns)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::unknown_block_type(s))
    }
}

/// Content of a block that can appear anywhere, including inside a column
#[derive(Debug, Clone, PartialEq)]
pub enum LeafContent {
    Text(TextContent),
    Image(ImageContent),
    Button(ButtonContent),
    Spacer(SpacerContent),
    Divider(DividerContent),
    Html(HtmlContent),
    Video(VideoContent),
    Social(SocialContent),
    Table(TableContent),
    Content(SectionContent),
    ProductFeed(ProductFeedContent),
    /// Legacy or corrupted entry, kept verbatim
    Unrecognized { block_type: String, content: Value },
}

impl LeafContent {
    pub fn block_type(&self) -> Option<BlockType> {
        Some(match self {
            LeafContent::Text(_) => BlockType::Text,
            LeafContent::Image(_) => BlockType::Image,
            LeafContent::Button(_) => BlockType::Button,
            LeafContent::Spacer(_) => BlockType::Spacer,
            LeafContent::Divider(_) => BlockType::Divider,
            LeafContent::Html(_) => BlockType::Html,
            LeafContent::Video(_) => BlockType::Video,
            LeafContent::Social(_) => BlockType::Social,
            LeafContent::Table(_) => BlockType::Table,
            LeafContent::Content(_) => BlockType::Content,
            LeafContent::ProductFeed(_) => BlockType::ProductFeed,
            LeafContent::Unrecognized { .. } => return None,
        })
    }

    fn decode(kind: BlockType, content: &Value) -> Result<Option<Self>, serde_json::Error> {
        Ok(Some(match kind {
            BlockType::Text => LeafContent::Text(TextContent::deserialize(content)?),
            BlockType::Image => LeafContent::Image(ImageContent::deserialize(content)?),
            BlockType::Button => LeafContent::Button(ButtonContent::deserialize(content)?),
            BlockType::Spacer => LeafContent::Spacer(SpacerContent::deserialize(content)?),
            BlockType::Divider => LeafContent::Divider(DividerContent::deserialize(content)?),
            BlockType::Html => LeafContent::Html(HtmlContent::deserialize(content)?),
            BlockType::Video => LeafContent::Video(VideoContent::deserialize(content)?),
            BlockType::Social => LeafContent::Social(SocialContent::deserialize(content)?),
            BlockType::Table => LeafContent::Table(TableContent::deserialize(content)?),
            BlockType::Content => LeafContent::Content(SectionContent::deserialize(content)?),
            BlockType::ProductFeed => {
                LeafContent::ProductFeed(ProductFeedContent::deserialize(content)?)
            }
            BlockType::Columns => return Ok(None),
        }))
    }

    fn unrecognized(block_type: &str, content: Value) -> Self {
        LeafContent::Unrecognized {
            block_type: block_type.to_string(),
            content,
        }
    }
}

/// Content of a top-level block
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Leaf(LeafContent),
    Columns(ColumnsContent),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnsContent {
    pub column_ratio: String,
    pub column_count: usize,
    pub gap: u32,
    pub columns: Vec<Column>,
}

/// Slot inside a columns block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    #[serde(default)]
    pub blocks: Vec<LeafBlock>,
}

/// Content types that can be carried by a [`Block`]
pub trait BlockBody: Sized {
    /// Wire discriminant
    fn type_name(&self) -> &str;

    fn to_value(&self) -> Result<Value, serde_json::Error>;

    /// Never fails: unusable content becomes `Unrecognized`
    fn from_value(block_type: &str, content: Value) -> Self;
}

impl BlockBody for LeafContent {
    fn type_name(&self) -> &str {
        match self {
            LeafContent::Unrecognized { block_type, .. } => block_type,
            known => known.block_type().map(|t| t.as_str()).unwrap_or_default(),
        }
    }

    fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            LeafContent::Text(c) => serde_json::to_value(c),
            LeafContent::Image(c) => serde_json::to_value(c),
            LeafContent::Button(c) => serde_json::to_value(c),
            LeafContent::Spacer(c) => serde_json::to_value(c),
            LeafContent::Divider(c) => serde_json::to_value(c),
            LeafContent::Html(c) => serde_json::to_value(c),
            LeafContent::Video(c) => serde_json::to_value(c),
            LeafContent::Social(c) => serde_json::to_value(c),
            LeafContent::Table(c) => serde_json::to_value(c),
            LeafContent::Content(c) => serde_json::to_value(c),
            LeafContent::ProductFeed(c) => serde_json::to_value(c),
            LeafContent::Unrecognized { content, .. } => Ok(content.clone()),
        }
    }

    fn from_value(block_type: &str, content: Value) -> Self {
        let Ok(kind) = block_type.parse::<BlockType>() else {
            return LeafContent::unrecognized(block_type, content);
        };

        match LeafContent::decode(kind, &object_or_empty(&content)) {
            Ok(Some(leaf)) => leaf,
            Ok(None) => {
                tracing::debug!(block_type, "columns entry found inside a column");
                LeafContent::unrecognized(block_type, content)
            }
            Err(e) => {
                tracing::debug!(block_type, error = %e, "block content does not match its type");
                LeafContent::unrecognized(block_type, content)
            }
        }
    }
}

impl BlockBody for BlockContent {
    fn type_name(&self) -> &str {
        match self {
            BlockContent::Leaf(leaf) => leaf.type_name(),
            BlockContent::Columns(_) => BlockType::Columns.as_str(),
        }
    }

    fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            BlockContent::Leaf(leaf) => leaf.to_value(),
            BlockContent::Columns(columns) => serde_json::to_value(columns),
        }
    }

    fn from_value(block_type: &str, content: Value) -> Self {
        if block_type != BlockType::Columns.as_str() {
            return BlockContent::Leaf(LeafContent::from_value(block_type, content));
        }

        match ColumnsContent::deserialize(&object_or_empty(&content)) {
            Ok(columns) => BlockContent::Columns(columns),
            Err(e) => {
                tracing::debug!(error = %e, "columns content is malformed");
                BlockContent::Leaf(LeafContent::unrecognized(block_type, content))
            }
        }
    }
}

fn object_or_empty(content: &Value) -> Value {
    if content.is_null() {
        Value::Object(Default::default())
    } else {
        content.clone()
    }
}

/// A single content unit in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Block<C = BlockContent> {
    pub id: String,
    pub content: C,
    pub styling: Styling,
    pub position: Position,
    pub display_options: DisplayOptions,
    pub is_starred: bool,
    pub section_id: Option<String>,
}

/// A block that is guaranteed not to be a columns layout
pub type LeafBlock = Block<LeafContent>;

impl<C> Block<C> {
    pub fn new(id: impl Into<String>, content: C, styling: Styling) -> Self {
        Self {
            id: id.into(),
            content,
            styling,
            position: Position::default(),
            display_options: DisplayOptions::default(),
            is_starred: false,
            section_id: None,
        }
    }

    pub fn with_section(mut self, section_id: Option<&str>) -> Self {
        self.section_id = section_id.map(str::to_string);
        self
    }

    /// Swap the content while keeping the shared fields
    pub fn map_content<D>(self, f: impl FnOnce(C) -> D) -> Block<D> {
        Block {
            id: self.id,
            content: f(self.content),
            styling: self.styling,
            position: self.position,
            display_options: self.display_options,
            is_starred: self.is_starred,
            section_id: self.section_id,
        }
    }
}

impl<C: BlockBody> Block<C> {
    pub fn type_name(&self) -> &str {
        self.content.type_name()
    }
}

impl Block {
    pub fn block_type(&self) -> Option<BlockType> {
        match &self.content {
            BlockContent::Leaf(leaf) => leaf.block_type(),
            BlockContent::Columns(_) => Some(BlockType::Columns),
        }
    }

    pub fn as_columns(&self) -> Option<&ColumnsContent> {
        match &self.content {
            BlockContent::Columns(columns) => Some(columns),
            BlockContent::Leaf(_) => None,
        }
    }

    pub fn as_columns_mut(&mut self) -> Option<&mut ColumnsContent> {
        match &mut self.content {
            BlockContent::Columns(columns) => Some(columns),
            BlockContent::Leaf(_) => None,
        }
    }

    pub fn is_columns(&self) -> bool {
        self.as_columns().is_some()
    }
}

impl From<LeafBlock> for Block {
    fn from(leaf: LeafBlock) -> Self {
        leaf.map_content(BlockContent::Leaf)
    }
}

impl TryFrom<Block> for LeafBlock {
    type Error = ModelError;

    fn try_from(block: Block) -> Result<Self, Self::Error> {
        let Block {
            id,
            content,
            styling,
            position,
            display_options,
            is_starred,
            section_id,
        } = block;

        match content {
            BlockContent::Leaf(content) => Ok(Block {
                id,
                content,
                styling,
                position,
                display_options,
                is_starred,
                section_id,
            }),
            BlockContent::Columns(_) => Err(ModelError::NestedColumns),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockRecordRef<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    block_type: &'a str,
    content: Value,
    styling: &'a Styling,
    position: &'a Position,
    display_options: &'a DisplayOptions,
    is_starred: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    section_id: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockRecord {
    id: String,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    styling: Styling,
    #[serde(default)]
    position: Position,
    #[serde(default)]
    display_options: DisplayOptions,
    #[serde(default)]
    is_starred: bool,
    #[serde(default)]
    section_id: Option<String>,
}

impl<C: BlockBody> Serialize for Block<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let content = self.content.to_value().map_err(S::Error::custom)?;
        BlockRecordRef {
            id: &self.id,
            block_type: self.content.type_name(),
            content,
            styling: &self.styling,
            position: &self.position,
            display_options: &self.display_options,
            is_starred: self.is_starred,
            section_id: self.section_id.as_deref(),
        }
        .serialize(serializer)
    }
}

impl<'de, C: BlockBody> Deserialize<'de> for Block<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = BlockRecord::deserialize(deserializer)?;
        if record.id.is_empty() {
            return Err(D::Error::custom("block id must not be empty"));
        }
        Ok(Block {
            content: C::from_value(&record.block_type, record.content),
            id: record.id,
            styling: record.styling,
            position: record.position,
            display_options: record.display_options,
            is_starred: record.is_starred,
            section_id: record.section_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_type_parsing() {
        assert_eq!("productfeed".parse::<BlockType>().unwrap(), BlockType::ProductFeed);
        assert!(matches!(
            "bogus-type".parse::<BlockType>(),
            Err(ModelError::UnknownBlockType(t)) if t == "bogus-type"
        ));
    }

    #[test]
    fn test_wire_shape() {
        let block: Block = LeafBlock::new(
            "text-1",
            LeafContent::Text(TextContent { html: "<p>Hi</p>".to_string() }),
            Styling::default(),
        )
        .into();

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["content"]["html"], "<p>Hi</p>");
        assert_eq!(value["displayOptions"]["showOnMobile"], true);
        assert_eq!(value["isStarred"], false);
        assert!(value.get("sectionId").is_none());
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let raw = json!({
            "id": "legacy-1",
            "type": "countdown",
            "content": { "until": "2030-01-01" }
        });

        let block: Block = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(block.type_name(), "countdown");
        assert_eq!(block.block_type(), None);

        let back = serde_json::to_value(&block).unwrap();
        assert_eq!(back["type"], "countdown");
        assert_eq!(back["content"], raw["content"]);
    }

    #[test]
    fn test_columns_inside_column_is_not_a_layout() {
        let raw = json!({
            "id": "outer",
            "type": "columns",
            "content": {
                "columnRatio": "100",
                "columnCount": 1,
                "columns": [{
                    "id": "col-a",
                    "blocks": [{ "id": "inner", "type": "columns", "content": {} }]
                }]
            }
        });

        let block: Block = serde_json::from_value(raw).unwrap();
        let columns = block.as_columns().unwrap();
        let inner = &columns.columns[0].blocks[0];
        assert!(matches!(inner.content, LeafContent::Unrecognized { .. }));
        assert_eq!(inner.type_name(), "columns");
    }

    #[test]
    fn test_leaf_conversion_rejects_columns() {
        let block = Block::new(
            "cols",
            BlockContent::Columns(ColumnsContent::default()),
            Styling::default(),
        );
        assert!(matches!(LeafBlock::try_from(block), Err(ModelError::NestedColumns)));
    }
}
