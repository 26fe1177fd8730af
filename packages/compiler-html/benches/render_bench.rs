use blockmail_compiler_html::{render_document, render_document_with, RenderOptions};
use blockmail_model::{create_block, create_columns_block, create_leaf_block, Document};
use blockmail_resolver::{BrandStyles, DeviceMode};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn newsletter(sections: usize) -> Document {
    let mut blocks = Vec::new();
    for _ in 0..sections {
        blocks.push(create_block("text", None).unwrap());
        blocks.push(create_block("image", None).unwrap());

        let mut layout = create_columns_block("33-33-33");
        if let Some(columns) = layout.as_columns_mut() {
            for column in &mut columns.columns {
                column.blocks.push(create_leaf_block("content", None).unwrap());
                column.blocks.push(create_leaf_block("button", None).unwrap());
            }
        }
        blocks.push(layout);
        blocks.push(create_block("divider", None).unwrap());
    }
    Document::from_blocks(blocks)
}

fn render_small_document(c: &mut Criterion) {
    let doc = newsletter(1);

    c.bench_function("render_small_document", |b| {
        b.iter(|| render_document(black_box(&doc)))
    });
}

fn render_large_document(c: &mut Criterion) {
    let doc = newsletter(50);

    c.bench_function("render_large_document", |b| {
        b.iter(|| render_document(black_box(&doc)))
    });
}

fn render_branded_mobile(c: &mut Criterion) {
    let doc = newsletter(10);
    let brand = BrandStyles::from_variables([
        ("--brand-font-family", "Georgia, serif"),
        ("--brand-text-color", "#222222"),
        ("--brand-primary-color", "#ff5500"),
    ]);
    let options = RenderOptions::for_device(brand, DeviceMode::Mobile);

    c.bench_function("render_branded_mobile", |b| {
        b.iter(|| render_document_with(black_box(&doc), &options))
    });
}

criterion_group!(
    benches,
    render_small_document,
    render_large_document,
    render_branded_mobile
);
criterion_main!(benches);
