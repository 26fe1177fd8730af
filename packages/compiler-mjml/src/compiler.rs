use blockmail_compiler_html::{render_leaf_with, Context, RenderOptions};
use blockmail_model::{
    get_column_widths, Block, BlockBody, BlockContent, ButtonContent, ColumnsContent, Document,
    LeafContent, SectionContent, SocialContent, SocialLayout, TableContent,
};
use blockmail_resolver::{brand, ComputedStyle};
use tracing::debug;

type Attributes = Vec<(&'static str, String)>;

/// Style properties that map onto `mj-text` attributes
const TEXT_ATTRIBUTES: &[(&str, &str)] = &[
    ("backgroundColor", "container-background-color"),
    ("color", "color"),
    ("fontFamily", "font-family"),
    ("fontSize", "font-size"),
    ("fontWeight", "font-weight"),
    ("lineHeight", "line-height"),
    ("padding", "padding"),
    ("textAlign", "align"),
];

const BUTTON_ATTRIBUTES: &[(&str, &str)] = &[
    ("backgroundColor", "background-color"),
    ("borderRadius", "border-radius"),
    ("color", "color"),
    ("fontFamily", "font-family"),
    ("fontSize", "font-size"),
    ("fontWeight", "font-weight"),
    ("padding", "inner-padding"),
    ("textAlign", "align"),
];

const IMAGE_ATTRIBUTES: &[(&str, &str)] = &[("padding", "padding"), ("textAlign", "align")];

const TABLE_ATTRIBUTES: &[(&str, &str)] = &[
    ("color", "color"),
    ("fontFamily", "font-family"),
    ("fontSize", "font-size"),
    ("padding", "padding"),
    ("width", "width"),
];

pub fn render_block_to_mjml(block: &Block) -> String {
    render_block_to_mjml_with(block, &RenderOptions::default())
}

/// One `mj-section` for a top-level block
pub fn render_block_to_mjml_with(block: &Block, options: &RenderOptions) -> String {
    let mut ctx = Context::new(options);
    compile_section(block, &mut ctx);
    ctx.get_output()
}

pub fn render_document_to_mjml(document: &Document) -> String {
    render_document_to_mjml_with(document, &RenderOptions::default())
}

/// Full `<mjml>` document; an empty document yields the empty body shell
pub fn render_document_to_mjml_with(document: &Document, options: &RenderOptions) -> String {
    let mut ctx = Context::new(options);
    ctx.open("mjml", &[], "");

    if let Some(font) = options.resolver.brand().get(brand::FONT_FAMILY) {
        ctx.open("mj-head", &[], "");
        ctx.open("mj-attributes", &[], "");
        ctx.void("mj-all", &[("font-family", font)], "");
        ctx.close("mj-attributes");
        ctx.close("mj-head");
    }

    let width = format!("{}px", options.max_width);
    ctx.open("mj-body", &[("width", &width)], "");
    for block in &document.blocks {
        if options.resolver.is_visible(block) {
            compile_section(block, &mut ctx);
        } else {
            debug!(block_id = %block.id, "Skipping hidden block");
        }
    }
    ctx.close("mj-body");

    ctx.close("mjml");
    ctx.get_output()
}

fn compile_section(block: &Block, ctx: &mut Context) {
    match &block.content {
        BlockContent::Leaf(leaf) => {
            ctx.open("mj-section", &[("padding", "0")], "");
            ctx.open("mj-column", &[], "");
            compile_leaf(block, leaf, ctx);
            ctx.close("mj-column");
            ctx.close("mj-section");
        }
        BlockContent::Columns(columns) => compile_columns(block, columns, ctx),
    }
}

fn compile_columns(block: &Block, columns: &ColumnsContent, ctx: &mut Context) {
    let style = ctx.options.resolver.resolve(block);
    let mut section = vec![("padding", "0".to_string())];
    if let Some(background) = style.get("backgroundColor") {
        section.push(("background-color", background.to_string()));
    }
    open(ctx, "mj-section", &section);

    let widths = get_column_widths(&columns.column_ratio);
    let padding = format!("0 {}px", columns.gap / 2);

    for i in 0..widths.len().max(columns.columns.len()) {
        let width = widths.get(i).map(String::as_str).unwrap_or("100%");
        ctx.open("mj-column", &[("width", width), ("padding", &padding)], "");

        if let Some(column) = columns.columns.get(i) {
            for nested in &column.blocks {
                if ctx.options.resolver.is_visible(nested) {
                    compile_leaf(nested, &nested.content, ctx);
                }
            }
        }

        ctx.close("mj-column");
    }

    ctx.close("mj-section");
}

fn compile_leaf<C: BlockBody>(block: &Block<C>, content: &LeafContent, ctx: &mut Context) {
    let style = ctx.options.resolver.resolve(block);

    match content {
        LeafContent::Text(text) => {
            open(ctx, "mj-text", &attributes(&style, TEXT_ATTRIBUTES));
            ctx.add(&text.html);
            ctx.close("mj-text");
        }
        LeafContent::Image(image) => {
            let mut attrs = vec![
                ("src", image.src.clone()),
                ("alt", image.alt.clone()),
                ("href", image.link.clone().unwrap_or_default()),
                ("width", image.width.clone().unwrap_or_default()),
            ];
            attrs.extend(attributes(&style, IMAGE_ATTRIBUTES));
            void(ctx, "mj-image", &attrs);
        }
        LeafContent::Button(button) => {
            let explicit = ctx.options.resolver.active_map(&block.styling);
            let overrides = (
                explicit.contains_key("backgroundColor"),
                explicit.contains_key("color"),
            );
            compile_button(button, style, overrides, ctx);
        }
        LeafContent::Spacer(spacer) => {
            ctx.void("mj-spacer", &[("height", &spacer.height)], "");
        }
        LeafContent::Divider(divider) => {
            let padding = style.get("margin").unwrap_or("10px 0");
            ctx.void(
                "mj-divider",
                &[
                    ("border-color", &divider.color),
                    ("border-width", &divider.thickness),
                    ("border-style", &divider.style),
                    ("padding", padding),
                ],
                "",
            );
        }
        LeafContent::Video(video) => {
            let mut attrs = vec![
                ("src", video.thumbnail.clone()),
                ("alt", video.alt.clone()),
                ("href", video.url.clone()),
            ];
            attrs.extend(attributes(&style, IMAGE_ATTRIBUTES));
            void(ctx, "mj-image", &attrs);
        }
        LeafContent::Social(social) => compile_social(social, &style, ctx),
        LeafContent::Table(table) => compile_table(table, &style, ctx),
        LeafContent::Content(section) => compile_content(section, &style, ctx),
        LeafContent::Html(html) => {
            ctx.open("mj-raw", &[], "");
            ctx.add(&html.html);
            ctx.close("mj-raw");
        }
        // No MJML counterpart; embed the HTML rendering
        LeafContent::ProductFeed(_) | LeafContent::Unrecognized { .. } => {
            let html = render_leaf_with(block, content, ctx.options);
            ctx.open("mj-raw", &[], "");
            ctx.add(&html);
            ctx.close("mj-raw");
        }
    }
}

fn compile_button(
    button: &ButtonContent,
    mut style: ComputedStyle,
    overrides: (bool, bool),
    ctx: &mut Context,
) {
    if !button.background_color.is_empty() && !overrides.0 {
        style.insert("backgroundColor", button.background_color.clone());
    }
    if !button.text_color.is_empty() && !overrides.1 {
        style.insert("color", button.text_color.clone());
    }

    let mut attrs = vec![("href", button.link.clone())];
    attrs.extend(attributes(&style, BUTTON_ATTRIBUTES));
    open(ctx, "mj-button", &attrs);
    ctx.add_text(&button.text);
    ctx.close("mj-button");
}

fn compile_social(social: &SocialContent, style: &ComputedStyle, ctx: &mut Context) {
    let mode = match social.layout {
        SocialLayout::Horizontal => "horizontal",
        SocialLayout::Vertical => "vertical",
    };
    let mut attrs = vec![("mode", mode.to_string()), ("icon-size", social.icon_size.clone())];
    attrs.extend(attributes(style, IMAGE_ATTRIBUTES));
    open(ctx, "mj-social", &attrs);

    for platform in &social.platforms {
        ctx.open(
            "mj-social-element",
            &[
                ("href", &platform.url),
                ("src", &platform.icon),
                ("alt", &platform.platform),
            ],
            "",
        );
        ctx.close("mj-social-element");
    }

    ctx.close("mj-social");
}

fn compile_table(table: &TableContent, style: &ComputedStyle, ctx: &mut Context) {
    let mut attrs = attributes(style, TABLE_ATTRIBUTES);
    attrs.push(("border", table.border()));
    open(ctx, "mj-table", &attrs);

    let padding = if table.cell_padding.is_empty() {
        "8px"
    } else {
        table.cell_padding.as_str()
    };
    let cell_style = format!("border: {}; padding: {};", table.border(), padding);

    for (i, row) in table.rows.iter().enumerate() {
        let cell_tag = if i == 0 && table.header_row { "th" } else { "td" };
        ctx.open("tr", &[], "");
        for cell in row {
            ctx.open(cell_tag, &[], &cell_style);
            ctx.add_text(cell);
            ctx.close(cell_tag);
        }
        ctx.close("tr");
    }

    ctx.close("mj-table");
}

fn compile_content(section: &SectionContent, style: &ComputedStyle, ctx: &mut Context) {
    if let Some(src) = section.image_url.as_deref().filter(|s| !s.is_empty()) {
        ctx.void("mj-image", &[("src", src), ("alt", &section.heading)], "");
    }

    open(ctx, "mj-text", &attributes(style, TEXT_ATTRIBUTES));
    ctx.add("<h2>");
    ctx.add_text(&section.heading);
    ctx.add("</h2>");
    ctx.add(&section.body);
    ctx.close("mj-text");

    if let Some(text) = section.button_text.as_deref().filter(|t| !t.is_empty()) {
        let href = section.button_link.as_deref().unwrap_or("#");
        ctx.open(
            "mj-button",
            &[("href", href), ("background-color", "#007bff"), ("color", "#ffffff")],
            "",
        );
        ctx.add_text(text);
        ctx.close("mj-button");
    }
}

/// Pick the computed properties MJML understands for a tag, renamed to its attributes
fn attributes(style: &ComputedStyle, mapping: &[(&str, &'static str)]) -> Attributes {
    mapping
        .iter()
        .filter_map(|(property, attribute)| {
            style
                .get(property)
                .filter(|value| !value.is_empty())
                .map(|value| (*attribute, value.to_string()))
        })
        .collect()
}

fn open(ctx: &mut Context, tag: &str, attrs: &[(&'static str, String)]) {
    let borrowed: Vec<(&str, &str)> = attrs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    ctx.open(tag, &borrowed, "");
}

fn void(ctx: &mut Context, tag: &str, attrs: &[(&'static str, String)]) {
    let borrowed: Vec<(&str, &str)> = attrs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    ctx.void(tag, &borrowed, "");
}
