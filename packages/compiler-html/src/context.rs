use blockmail_resolver::{BrandStyles, DeviceMode, StyleResolver};

/// Email body width in pixels
pub const DEFAULT_MAX_WIDTH: u32 = 600;

/// Options for HTML/MJML rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Device mode and brand variables
    pub resolver: StyleResolver,
    /// Width of the email body
    pub max_width: u32,
}

impl RenderOptions {
    pub fn new(resolver: StyleResolver) -> Self {
        Self {
            resolver,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }

    pub fn for_device(brand: BrandStyles, mode: DeviceMode) -> Self {
        Self::new(StyleResolver::new(brand, mode))
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(StyleResolver::default())
    }
}

/// Output buffer shared by the markup compilers
pub struct Context<'a> {
    pub options: &'a RenderOptions,
    buffer: String,
}

impl<'a> Context<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            buffer: String::new(),
        }
    }

    /// Append markup verbatim
    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Append escaped text
    pub fn add_text(&mut self, text: &str) {
        self.buffer.push_str(&escape_html(text));
    }

    /// `<tag attr="…" style="…">`; empty attribute values are skipped
    pub fn open(&mut self, tag: &str, attributes: &[(&str, &str)], style: &str) {
        self.add_start(tag, attributes, style);
        self.add(">");
    }

    /// `<tag attr="…" />`
    pub fn void(&mut self, tag: &str, attributes: &[(&str, &str)], style: &str) {
        self.add_start(tag, attributes, style);
        self.add(" />");
    }

    pub fn close(&mut self, tag: &str) {
        self.add("</");
        self.add(tag);
        self.add(">");
    }

    fn add_start(&mut self, tag: &str, attributes: &[(&str, &str)], style: &str) {
        self.add("<");
        self.add(tag);
        for (name, value) in attributes {
            if value.is_empty() {
                continue;
            }
            self.add_attribute(name, value);
        }
        if !style.is_empty() {
            self.add_attribute("style", style);
        }
    }

    fn add_attribute(&mut self, name: &str, value: &str) {
        self.add(" ");
        self.add(name);
        self.add("=\"");
        self.add_text(value);
        self.add("\"");
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn get_output(self) -> String {
        self.buffer
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
