use blockmail_model::{create_block, Breakpoint, DisplayOptions, IdGenerator};
use blockmail_resolver::brand::{PRIMARY_COLOR, TEXT_COLOR};
use blockmail_resolver::{BrandStyles, DeviceMode, StyleResolver};

fn brand() -> BrandStyles {
    BrandStyles::from_variables([
        (PRIMARY_COLOR, "#ff6600"),
        (TEXT_COLOR, "#333333"),
        ("--brand-font-family", "Georgia, serif"),
    ])
}

#[test]
fn test_auto_mode_picks_tablet_and_mobile() {
    let block = create_block("text", None).unwrap();

    let tablet = StyleResolver::new(brand(), DeviceMode::Auto { width: 800 });
    assert_eq!(tablet.breakpoint(), Breakpoint::Tablet);
    assert_eq!(
        tablet.resolve(&block).get("padding"),
        block.styling.property(Breakpoint::Tablet, "padding")
    );

    let mobile = StyleResolver::new(brand(), DeviceMode::Auto { width: 767 });
    assert_eq!(mobile.breakpoint(), Breakpoint::Mobile);
    assert_eq!(
        mobile.resolve(&block).get("fontSize"),
        block.styling.property(Breakpoint::Mobile, "fontSize")
    );
}

#[test]
fn test_block_style_overrides_brand() {
    let mut block = create_block("button", None).unwrap();
    let resolver = StyleResolver::new(brand(), DeviceMode::Desktop);

    let computed = resolver.resolve(&block);
    assert_eq!(computed.get("backgroundColor"), Some("#ff6600"));
    assert_eq!(computed.get("fontFamily"), Some("Georgia, serif"));

    block.styling.set(Breakpoint::Desktop, "backgroundColor", "#000000");
    assert_eq!(resolver.resolve(&block).get("backgroundColor"), Some("#000000"));
}

#[test]
fn test_brand_variable_is_substituted() {
    let mut block = create_block("text", None).unwrap();
    block
        .styling
        .set(Breakpoint::Desktop, "borderColor", "var(--brand-primary-color)");
    block
        .styling
        .set(Breakpoint::Desktop, "outlineColor", "var(--brand-accent, #00ff00)");

    let computed = StyleResolver::new(brand(), DeviceMode::Desktop).resolve(&block);
    assert_eq!(computed.get("borderColor"), Some("#ff6600"));
    assert_eq!(computed.get("outlineColor"), Some("#00ff00"));
    assert!(computed.to_css().contains("border-color: #ff6600;"));
}

#[test]
fn test_nested_leaf_blocks_resolve_too() {
    let mut ids = IdGenerator::from_seed("resolver");
    let leaf = blockmail_model::create_leaf_block_with(&mut ids, "text", None).unwrap();
    let computed = StyleResolver::default().resolve(&leaf);
    assert_eq!(computed.get("fontSize"), Some("16px"));
}

#[test]
fn test_visibility_follows_display_options() {
    let mut block = create_block("image", None).unwrap();
    block.display_options = DisplayOptions {
        show_on_desktop: true,
        show_on_tablet: true,
        show_on_mobile: false,
    };

    assert!(StyleResolver::default().is_visible(&block));
    assert!(!StyleResolver::default()
        .with_mode(DeviceMode::Mobile)
        .is_visible(&block));
}
