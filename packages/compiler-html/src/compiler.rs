use crate::context::{Context, RenderOptions};
use blockmail_model::{
    get_column_widths, Block, BlockBody, BlockContent, ButtonContent, ColumnsContent,
    DividerContent, Document, ImageContent, LeafContent, ProductFeedContent, SectionContent,
    SocialContent, SocialLayout, TableContent, VideoContent,
};
use blockmail_resolver::ComputedStyle;
use tracing::debug;

/// Render one block with desktop defaults
pub fn render_block_to_html(block: &Block) -> String {
    render_block_with(block, &RenderOptions::default())
}

pub fn render_block_with(block: &Block, options: &RenderOptions) -> String {
    let mut ctx = Context::new(options);
    compile_block(block, &mut ctx);
    ctx.get_output()
}

/// Render leaf content carried by a top-level or nested block
pub fn render_leaf_with<C: BlockBody>(
    block: &Block<C>,
    content: &LeafContent,
    options: &RenderOptions,
) -> String {
    let mut ctx = Context::new(options);
    compile_leaf(block, content, &mut ctx);
    ctx.get_output()
}

/// Render a document with desktop defaults; an empty document renders as `""`
pub fn render_document(document: &Document) -> String {
    render_document_with(document, &RenderOptions::default())
}

/// Render visible blocks in order inside the max-width wrapper
pub fn render_document_with(document: &Document, options: &RenderOptions) -> String {
    if document.is_empty() {
        return String::new();
    }

    let mut ctx = Context::new(options);
    let wrapper = format!(
        "max-width:{}px;margin:0 auto;font-family:{};",
        options.max_width,
        options.resolver.brand().font_family()
    );
    ctx.open("div", &[], &wrapper);

    for block in &document.blocks {
        if options.resolver.is_visible(block) {
            compile_block(block, &mut ctx);
        } else {
            debug!(
                block_id = %block.id,
                breakpoint = %options.resolver.breakpoint(),
                "Skipping hidden block"
            );
        }
    }

    ctx.close("div");
    ctx.get_output()
}

fn compile_block(block: &Block, ctx: &mut Context) {
    match &block.content {
        BlockContent::Leaf(leaf) => compile_leaf(block, leaf, ctx),
        BlockContent::Columns(columns) => compile_columns(block, columns, ctx),
    }
}

fn compile_leaf<C: BlockBody>(block: &Block<C>, content: &LeafContent, ctx: &mut Context) {
    let style = ctx.options.resolver.resolve(block);

    match content {
        LeafContent::Text(text) => compile_raw_html(&text.html, &style, ctx),
        LeafContent::Html(html) => compile_raw_html(&html.html, &style, ctx),
        LeafContent::Image(image) => compile_image(image, &style, ctx),
        LeafContent::Button(button) => {
            let explicit = ctx.options.resolver.active_map(&block.styling);
            let overrides = (
                explicit.contains_key("backgroundColor"),
                explicit.contains_key("color"),
            );
            compile_button(button, style, overrides, ctx)
        }
        LeafContent::Spacer(spacer) => {
            let height = format!("height: {};", spacer.height);
            ctx.open("div", &[], &height);
            ctx.close("div");
        }
        LeafContent::Divider(divider) => compile_divider(divider, &style, ctx),
        LeafContent::Video(video) => compile_video(video, &style, ctx),
        LeafContent::Social(social) => compile_social(social, &style, ctx),
        LeafContent::Table(table) => compile_table(table, &style, ctx),
        LeafContent::Content(section) => compile_section(section, &style, ctx),
        LeafContent::ProductFeed(feed) => compile_product_feed(feed, &style, ctx),
        LeafContent::Unrecognized { block_type, .. } => compile_unknown(block_type, ctx),
    }
}

fn compile_raw_html(html: &str, style: &ComputedStyle, ctx: &mut Context) {
    let css = join_css("margin: 0 0 10px 0;", style);
    ctx.open("div", &[], &css);
    ctx.add(html);
    ctx.close("div");
}

fn compile_image(image: &ImageContent, style: &ComputedStyle, ctx: &mut Context) {
    ctx.open("div", &[], &style.to_css());

    let link = image.link.as_deref().filter(|l| !l.is_empty());
    if let Some(href) = link {
        ctx.open("a", &[("href", href)], "");
    }

    let mut img_style = String::from("max-width: 100%; height: auto; display: inline-block;");
    if let Some(width) = image.width.as_deref().filter(|w| !w.is_empty()) {
        img_style.push_str(&format!(" width: {};", width));
    }
    ctx.void("img", &[("src", &image.src), ("alt", &image.alt)], &img_style);

    if link.is_some() {
        ctx.close("a");
    }
    ctx.close("div");
}

/// `overrides` marks background and text color set directly on the block,
/// which win over the content colors
fn compile_button(
    button: &ButtonContent,
    mut style: ComputedStyle,
    overrides: (bool, bool),
    ctx: &mut Context,
) {
    let align = style.remove("textAlign").unwrap_or_else(|| "center".to_string());

    if !button.background_color.is_empty() && !overrides.0 {
        style.insert("backgroundColor", button.background_color.clone());
    }
    if !button.text_color.is_empty() && !overrides.1 {
        style.insert("color", button.text_color.clone());
    }
    if !style.contains("borderRadius") {
        style.insert("borderRadius", "4px");
    }
    style.insert("display", "inline-block");
    style.insert("textDecoration", "none");

    ctx.open("div", &[], &format!("text-align: {};", align));
    ctx.open("a", &[("href", &button.link)], &style.to_css());
    ctx.add_text(&button.text);
    ctx.close("a");
    ctx.close("div");
}

fn compile_divider(divider: &DividerContent, style: &ComputedStyle, ctx: &mut Context) {
    let margin = style.get("margin").unwrap_or("10px 0");
    let css = format!(
        "border: none; border-top: {} {} {}; margin: {};",
        divider.thickness, divider.style, divider.color, margin
    );
    ctx.void("hr", &[], &css);
}

fn compile_video(video: &VideoContent, style: &ComputedStyle, ctx: &mut Context) {
    ctx.open("div", &[], &style.to_css());
    ctx.open("a", &[("href", &video.url)], "");
    ctx.void(
        "img",
        &[("src", &video.thumbnail), ("alt", &video.alt)],
        "max-width: 100%; height: auto; display: inline-block;",
    );
    ctx.close("a");
    ctx.close("div");
}

fn compile_social(social: &SocialContent, style: &ComputedStyle, ctx: &mut Context) {
    ctx.open("div", &[], &style.to_css());

    let size = if social.icon_size.is_empty() {
        "32px"
    } else {
        social.icon_size.as_str()
    };
    let link_style = match social.layout {
        SocialLayout::Horizontal => "display: inline-block; margin: 0 5px;",
        SocialLayout::Vertical => "display: block; margin: 5px 0;",
    };
    let icon_style = format!("width: {}; height: {}; border: 0;", size, size);

    for platform in &social.platforms {
        ctx.open("a", &[("href", &platform.url)], link_style);
        ctx.void("img", &[("src", &platform.icon), ("alt", &platform.platform)], &icon_style);
        ctx.close("a");
    }

    ctx.close("div");
}

fn compile_table(table: &TableContent, style: &ComputedStyle, ctx: &mut Context) {
    let border = table.border();
    let padding = if table.cell_padding.is_empty() {
        "8px"
    } else {
        table.cell_padding.as_str()
    };
    let cell_style = format!("border: {}; padding: {};", border, padding);

    ctx.open(
        "table",
        &[("cellpadding", "0"), ("cellspacing", "0")],
        &join_css(&format!("border-collapse: collapse; border: {};", border), style),
    );

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

    ctx.close("table");
}

fn compile_section(section: &SectionContent, style: &ComputedStyle, ctx: &mut Context) {
    ctx.open("div", &[], &style.to_css());

    if let Some(src) = section.image_url.as_deref().filter(|s| !s.is_empty()) {
        ctx.void(
            "img",
            &[("src", src), ("alt", &section.heading)],
            "max-width: 100%; height: auto; display: block; margin: 0 0 10px 0;",
        );
    }

    ctx.open("h2", &[], "margin: 0 0 10px 0;");
    ctx.add_text(&section.heading);
    ctx.close("h2");

    // body is rich text, like text block html
    ctx.open("div", &[], "margin: 0 0 10px 0;");
    ctx.add(&section.body);
    ctx.close("div");

    if let Some(text) = section.button_text.as_deref().filter(|t| !t.is_empty()) {
        let href = section.button_link.as_deref().unwrap_or("#");
        ctx.open(
            "a",
            &[("href", href)],
            "display: inline-block; padding: 10px 20px; background-color: #007bff; \
             color: #ffffff; text-decoration: none; border-radius: 4px;",
        );
        ctx.add_text(text);
        ctx.close("a");
    }

    ctx.close("div");
}

fn compile_product_feed(feed: &ProductFeedContent, style: &ComputedStyle, ctx: &mut Context) {
    let per_row = usize::from(feed.columns.max(1));
    let cell_style = format!(
        "width: {}%; vertical-align: top; padding: 10px; text-align: center;",
        100 / per_row
    );

    ctx.open(
        "table",
        &[("cellpadding", "0"), ("cellspacing", "0")],
        &join_css("border-collapse: collapse;", style),
    );

    for row in feed.products.chunks(per_row) {
        ctx.open("tr", &[], "");
        for product in row {
            ctx.open("td", &[], &cell_style);
            if !product.image_url.is_empty() {
                ctx.void(
                    "img",
                    &[("src", &product.image_url), ("alt", &product.name)],
                    "max-width: 100%; height: auto;",
                );
            }
            ctx.open("h3", &[], "margin: 10px 0 5px 0;");
            ctx.add_text(&product.name);
            ctx.close("h3");
            if feed.show_price {
                ctx.open("p", &[], "margin: 0 0 5px 0; font-weight: bold;");
                ctx.add_text(&product.price);
                ctx.close("p");
            }
            if !product.description.is_empty() {
                ctx.open("p", &[], "margin: 0 0 10px 0;");
                ctx.add_text(&product.description);
                ctx.close("p");
            }
            if !feed.button_text.is_empty() {
                ctx.open(
                    "a",
                    &[("href", &product.link)],
                    "display: inline-block; padding: 8px 16px; background-color: #007bff; \
                     color: #ffffff; text-decoration: none; border-radius: 4px;",
                );
                ctx.add_text(&feed.button_text);
                ctx.close("a");
            }
            ctx.close("td");
        }
        ctx.close("tr");
    }

    ctx.close("table");
}

/// One `<tr>`, one `<td>` per column sized from the ratio table.
/// Columns beyond the width table fall back to full width.
fn compile_columns(block: &Block, columns: &ColumnsContent, ctx: &mut Context) {
    let style = ctx.options.resolver.resolve(block);
    let widths = get_column_widths(&columns.column_ratio);
    let half_gap = columns.gap / 2;

    ctx.open(
        "table",
        &[
            ("role", "presentation"),
            ("width", "100%"),
            ("cellpadding", "0"),
            ("cellspacing", "0"),
        ],
        &join_css("border-collapse: collapse;", &style),
    );
    ctx.open("tr", &[], "");

    let count = widths.len().max(columns.columns.len());
    for i in 0..count {
        let width = widths.get(i).map(String::as_str).unwrap_or("100%");
        let td_style = format!("width: {}; vertical-align: top; padding: 0 {}px;", width, half_gap);
        ctx.open("td", &[], &td_style);

        if let Some(column) = columns.columns.get(i) {
            for nested in &column.blocks {
                if ctx.options.resolver.is_visible(nested) {
                    compile_leaf(nested, &nested.content, ctx);
                }
            }
        }

        ctx.close("td");
    }

    ctx.close("tr");
    ctx.close("table");
}

fn compile_unknown(block_type: &str, ctx: &mut Context) {
    debug!(block_type, "Rendering placeholder for unknown block type");
    ctx.open(
        "div",
        &[],
        "padding: 10px; border: 1px dashed #dc3545; color: #dc3545;",
    );
    ctx.add("Unknown block type: ");
    ctx.add_text(block_type);
    ctx.close("div");
}

fn join_css(base: &str, style: &ComputedStyle) -> String {
    let computed = style.to_css();
    if computed.is_empty() {
        base.to_string()
    } else {
        format!("{} {}", base, computed)
    }
}
