//! # Block Factory
//!
//! The only place blocks are constructed. Every block gets type-specific
//! default content and styling on all three breakpoints; breakpoints differ
//! only in padding and font size.

use crate::block::*;
use crate::content::*;
use crate::error::{ModelError, ModelResult};
use crate::id_generator::{IdSource, ProcessIds};
use crate::ratio::ColumnRatio;
use crate::styling::{StyleMap, Styling};
use crate::visitor::{walk_column_mut, VisitorMut};
use tracing::debug;

const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x300";

/// Create a block of the given type with process-unique ids
pub fn create_block(block_type: &str, section_id: Option<&str>) -> ModelResult<Block> {
    create_block_with(&mut ProcessIds, block_type, section_id)
}

pub fn create_block_with(
    ids: &mut impl IdSource,
    block_type: &str,
    section_id: Option<&str>,
) -> ModelResult<Block> {
    let kind: BlockType = block_type.parse()?;
    Ok(build_block(ids, kind, section_id))
}

/// Build a block from an already-validated type
pub fn build_block(ids: &mut impl IdSource, kind: BlockType, section_id: Option<&str>) -> Block {
    match default_leaf_content(kind) {
        Some(content) => Block::new(
            ids.next_id(kind.as_str()),
            BlockContent::Leaf(content),
            default_styling(kind),
        )
        .with_section(section_id),
        None => create_columns_block_with(ids, ColumnRatio::default().as_str(), section_id),
    }
}

/// Create a block that may be placed inside a column
pub fn create_leaf_block(block_type: &str, section_id: Option<&str>) -> ModelResult<LeafBlock> {
    create_leaf_block_with(&mut ProcessIds, block_type, section_id)
}

pub fn create_leaf_block_with(
    ids: &mut impl IdSource,
    block_type: &str,
    section_id: Option<&str>,
) -> ModelResult<LeafBlock> {
    let kind: BlockType = block_type.parse()?;
    let content = default_leaf_content(kind).ok_or(ModelError::NestedColumns)?;
    Ok(LeafBlock::new(ids.next_id(kind.as_str()), content, default_styling(kind))
        .with_section(section_id))
}

/// Create a columns layout; an unrecognized ratio falls back to 50-50
pub fn create_columns_block(ratio: &str) -> Block {
    create_columns_block_with(&mut ProcessIds, ratio, None)
}

pub fn create_columns_block_with(
    ids: &mut impl IdSource,
    ratio: &str,
    section_id: Option<&str>,
) -> Block {
    let ratio = ColumnRatio::parse(ratio).unwrap_or_else(|| {
        debug!(ratio, "unrecognized column ratio, using 50-50");
        ColumnRatio::default()
    });

    let columns = (0..ratio.column_count())
        .map(|_| Column {
            id: ids.next_id("column"),
            blocks: Vec::new(),
        })
        .collect();

    let content = ColumnsContent {
        column_ratio: ratio.as_str().to_string(),
        column_count: ratio.column_count(),
        gap: 20,
        columns,
    };

    Block::new(
        ids.next_id(BlockType::Columns.as_str()),
        BlockContent::Columns(content),
        default_styling(BlockType::Columns),
    )
    .with_section(section_id)
}

/// Copy a block with fresh ids for the block, its columns, and every nested block
pub fn duplicate_block(block: &Block) -> Block {
    duplicate_block_with(&mut ProcessIds, block)
}

pub fn duplicate_block_with(ids: &mut impl IdSource, block: &Block) -> Block {
    let mut copy = block.clone();
    Reidentify { ids }.visit_block_mut(&mut copy);
    copy
}

pub fn duplicate_leaf_block_with(ids: &mut impl IdSource, block: &LeafBlock) -> LeafBlock {
    let mut copy = block.clone();
    copy.id = ids.next_id(id_prefix(copy.type_name()));
    copy
}

struct Reidentify<'a, I: IdSource> {
    ids: &'a mut I,
}

impl<I: IdSource> VisitorMut for Reidentify<'_, I> {
    fn visit_block_mut(&mut self, block: &mut Block) {
        block.id = self.ids.next_id(id_prefix(block.type_name()));
        crate::visitor::walk_block_mut(self, block);
    }

    fn visit_column_mut(&mut self, column: &mut Column) {
        column.id = self.ids.next_id("column");
        walk_column_mut(self, column);
    }

    fn visit_nested_block_mut(&mut self, block: &mut LeafBlock) {
        block.id = self.ids.next_id(id_prefix(block.type_name()));
    }
}

fn id_prefix(type_name: &str) -> &str {
    match type_name.parse::<BlockType>() {
        Ok(kind) => kind.as_str(),
        Err(_) => "block",
    }
}

/// Default content for every leaf type; `None` for columns
pub fn default_leaf_content(kind: BlockType) -> Option<LeafContent> {
    Some(match kind {
        BlockType::Text => LeafContent::Text(TextContent {
            html: "<p>Add your text here</p>".to_string(),
        }),
        BlockType::Html => LeafContent::Html(HtmlContent {
            html: "<div>Custom HTML</div>".to_string(),
        }),
        BlockType::Image => LeafContent::Image(ImageContent {
            src: PLACEHOLDER_IMAGE.to_string(),
            alt: "Image".to_string(),
            link: None,
            width: None,
        }),
        BlockType::Button => LeafContent::Button(ButtonContent {
            text: "Click Here".to_string(),
            link: "#".to_string(),
            background_color: "#007bff".to_string(),
            text_color: "#ffffff".to_string(),
        }),
        BlockType::Spacer => LeafContent::Spacer(SpacerContent {
            height: "20px".to_string(),
        }),
        BlockType::Divider => LeafContent::Divider(DividerContent {
            color: "#e0e0e0".to_string(),
            thickness: "1px".to_string(),
            style: "solid".to_string(),
        }),
        BlockType::Video => LeafContent::Video(VideoContent {
            url: String::new(),
            thumbnail: PLACEHOLDER_IMAGE.to_string(),
            alt: "Watch video".to_string(),
        }),
        BlockType::Social => LeafContent::Social(SocialContent {
            platforms: ["facebook", "twitter", "instagram"]
                .into_iter()
                .map(|platform| SocialPlatform {
                    platform: platform.to_string(),
                    url: "#".to_string(),
                    icon: format!("https://cdn.simpleicons.org/{}", platform),
                })
                .collect(),
            layout: SocialLayout::Horizontal,
            icon_size: "32px".to_string(),
        }),
        BlockType::Table => LeafContent::Table(TableContent {
            rows: vec![
                vec!["Header 1".to_string(), "Header 2".to_string()],
                vec!["Cell 1".to_string(), "Cell 2".to_string()],
            ],
            header_row: true,
            border_width: "1px".to_string(),
            border_style: "solid".to_string(),
            border_color: "#dddddd".to_string(),
            cell_padding: "8px".to_string(),
        }),
        BlockType::Content => LeafContent::Content(SectionContent {
            heading: "Your heading".to_string(),
            body: "<p>Tell your story here.</p>".to_string(),
            image_url: None,
            button_text: Some("Learn more".to_string()),
            button_link: Some("#".to_string()),
        }),
        BlockType::ProductFeed => LeafContent::ProductFeed(ProductFeedContent {
            products: (1..=2)
                .map(|n| Product {
                    name: format!("Product {}", n),
                    price: "$29.99".to_string(),
                    image_url: PLACEHOLDER_IMAGE.to_string(),
                    link: "#".to_string(),
                    description: "Short product description".to_string(),
                })
                .collect(),
            columns: 2,
            show_price: true,
            button_text: "Shop now".to_string(),
        }),
        BlockType::Columns => return None,
    })
}

/// Default styling; breakpoints share everything except padding and font size
pub fn default_styling(kind: BlockType) -> Styling {
    let (padding, font_size): ([&str; 3], Option<[&str; 3]>) = match kind {
        BlockType::Text | BlockType::Html | BlockType::Content => (
            ["10px 20px", "10px 16px", "8px 12px"],
            Some(["16px", "16px", "14px"]),
        ),
        BlockType::Button => (
            ["12px 24px", "12px 20px", "10px 16px"],
            Some(["16px", "16px", "14px"]),
        ),
        BlockType::Social | BlockType::Table | BlockType::ProductFeed => (
            ["10px 20px", "10px 16px", "8px 12px"],
            Some(["14px", "14px", "13px"]),
        ),
        BlockType::Image | BlockType::Video | BlockType::Columns => {
            (["10px 20px", "10px 16px", "8px 12px"], None)
        }
        BlockType::Spacer | BlockType::Divider => (["0px", "0px", "0px"], None),
    };

    let shared: &[(&str, &str)] = match kind {
        BlockType::Text | BlockType::Html => &[("textAlign", "left"), ("lineHeight", "1.5")],
        BlockType::Content => &[("textAlign", "left"), ("lineHeight", "1.5")],
        BlockType::Button => &[("textAlign", "center"), ("borderRadius", "4px")],
        BlockType::Image | BlockType::Video => &[("textAlign", "center")],
        BlockType::Social => &[("textAlign", "center")],
        BlockType::Table | BlockType::ProductFeed => &[("width", "100%")],
        BlockType::Spacer => &[("backgroundColor", "transparent")],
        BlockType::Divider => &[("margin", "10px 0")],
        BlockType::Columns => &[("backgroundColor", "transparent")],
    };

    let build = |i: usize| -> StyleMap {
        let mut map: StyleMap = shared
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        map.insert("padding".to_string(), padding[i].to_string());
        if let Some(sizes) = font_size {
            map.insert("fontSize".to_string(), sizes[i].to_string());
        }
        map
    };

    Styling {
        desktop: build(0),
        tablet: build(1),
        mobile: build(2),
    }
}
