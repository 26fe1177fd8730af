//! Browser bindings. Blocks, documents and payloads cross the boundary as
//! JSON strings; failures become string `JsValue`s.

use blockmail_compiler_html::{render_block_with, render_document_with, RenderOptions};
use blockmail_compiler_mjml::render_document_to_mjml_with;
use blockmail_editor::{apply_drag_payload, DragPayload, DropTarget};
use blockmail_model::{
    create_block, create_columns_block_with, duplicate_block, get_column_widths, Block, Document,
    ProcessIds,
};
use blockmail_resolver::{BrandStyles, DeviceMode};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

type BindingResult = Result<String, String>;

fn to_js(result: BindingResult) -> Result<String, JsValue> {
    result.map_err(|e| JsValue::from_str(&e))
}

fn parse_block(block_json: &str) -> Result<Block, String> {
    serde_json::from_str(block_json).map_err(|e| format!("Invalid block: {}", e))
}

fn parse_document(document_json: &str) -> Result<Document, String> {
    Document::from_json(document_json).map_err(|e| format!("Invalid document: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> BindingResult {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

/// `device` is a device mode string ("mobile", "auto:800", ...);
/// `brand_json` an object of CSS variables
fn render_options(
    device: Option<String>,
    brand_json: Option<String>,
) -> Result<RenderOptions, String> {
    let mode = match device {
        Some(device) => device.parse::<DeviceMode>().map_err(|e| e.to_string())?,
        None => DeviceMode::Desktop,
    };
    let brand = match brand_json {
        Some(json) => serde_json::from_str::<BrandStyles>(&json)
            .map_err(|e| format!("Invalid brand: {}", e))?,
        None => BrandStyles::new(),
    };
    Ok(RenderOptions::for_device(brand, mode))
}

fn create_block_impl(block_type: &str, section_id: Option<String>) -> BindingResult {
    let block = create_block(block_type, section_id.as_deref()).map_err(|e| e.to_string())?;
    to_json(&block)
}

fn apply_drag_payload_impl(
    document_json: &str,
    payload: &str,
    zone_id: Option<String>,
) -> BindingResult {
    let doc = parse_document(document_json)?;
    let payload = DragPayload::parse(payload);
    let target = zone_id.and_then(|zone| DropTarget::from_zone(&zone, doc.len()));
    to_json(&apply_drag_payload(&doc, &payload, target.as_ref()))
}

fn render_document_impl(
    document_json: &str,
    device: Option<String>,
    brand_json: Option<String>,
) -> BindingResult {
    let doc = parse_document(document_json)?;
    Ok(render_document_with(&doc, &render_options(device, brand_json)?))
}

#[wasm_bindgen(js_name = createBlock)]
pub fn create_block_js(block_type: &str, section_id: Option<String>) -> Result<String, JsValue> {
    to_js(create_block_impl(block_type, section_id))
}

#[wasm_bindgen(js_name = createColumnsBlock)]
pub fn create_columns_block_js(ratio: &str, section_id: Option<String>) -> Result<String, JsValue> {
    to_js(to_json(&create_columns_block_with(&mut ProcessIds, ratio, section_id.as_deref())))
}

/// Copy with fresh ids for the block and everything nested in it
#[wasm_bindgen(js_name = duplicateBlock)]
pub fn duplicate_block_js(block_json: &str) -> Result<String, JsValue> {
    to_js(parse_block(block_json).and_then(|block| to_json(&duplicate_block(&block))))
}

/// Returns the new document; rejected or cancelled drops return it unchanged
#[wasm_bindgen(js_name = applyDragPayload)]
pub fn apply_drag_payload_js(
    document_json: &str,
    payload: &str,
    zone_id: Option<String>,
) -> Result<String, JsValue> {
    to_js(apply_drag_payload_impl(document_json, payload, zone_id))
}

#[wasm_bindgen(js_name = renderBlockToHtml)]
pub fn render_block_to_html_js(
    block_json: &str,
    device: Option<String>,
    brand_json: Option<String>,
) -> Result<String, JsValue> {
    to_js(parse_block(block_json).and_then(|block| {
        let options = render_options(device, brand_json)?;
        Ok(render_block_with(&block, &options))
    }))
}

#[wasm_bindgen(js_name = renderDocument)]
pub fn render_document_js(
    document_json: &str,
    device: Option<String>,
    brand_json: Option<String>,
) -> Result<String, JsValue> {
    to_js(render_document_impl(document_json, device, brand_json))
}

#[wasm_bindgen(js_name = renderDocumentToMjml)]
pub fn render_document_to_mjml_js(
    document_json: &str,
    device: Option<String>,
    brand_json: Option<String>,
) -> Result<String, JsValue> {
    to_js(parse_document(document_json).and_then(|doc| {
        let options = render_options(device, brand_json)?;
        Ok(render_document_to_mjml_with(&doc, &options))
    }))
}

/// JSON array of CSS widths, e.g. `["33%","67%"]`
#[wasm_bindgen(js_name = getColumnWidths)]
pub fn get_column_widths_js(ratio: &str) -> String {
    serde_json::Value::from(get_column_widths(ratio)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_block_roundtrips_through_json() {
        let json = create_block_impl("button", None).unwrap();
        let block = parse_block(&json).unwrap();
        assert_eq!(block.type_name(), "button");
    }

    #[test]
    fn test_unknown_type_is_reported() {
        let err = create_block_impl("countdown", None).unwrap_err();
        assert!(err.contains("countdown"));
    }

    #[test]
    fn test_drop_payload_with_zone() {
        let doc =
            apply_drag_payload_impl("[]", r#"{"blockType":"text"}"#, Some("canvas".to_string()))
                .unwrap();
        assert_eq!(parse_document(&doc).unwrap().len(), 1);

        let unchanged = apply_drag_payload_impl("[]", r#"{"blockType":"text"}"#, None).unwrap();
        assert_eq!(unchanged, "[]");
    }

    #[test]
    fn test_render_document_for_device() {
        let doc =
            apply_drag_payload_impl("[]", r#"{"blockType":"text"}"#, Some("canvas".to_string()))
                .unwrap();

        let html = render_document_impl(&doc, Some("mobile".to_string()), None).unwrap();
        assert!(html.contains("font-size: 14px;"));

        assert!(render_document_impl(&doc, Some("watch".to_string()), None).is_err());
    }

    #[test]
    fn test_column_widths_json() {
        assert_eq!(get_column_widths_js("33-67"), r#"["33%","67%"]"#);
        assert_eq!(get_column_widths_js("nope"), r#"["100%"]"#);
    }
}
