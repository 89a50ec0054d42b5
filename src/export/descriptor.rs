//! Atlas descriptor export format.
//!
//! Writes an atlas back out in the text format [`crate::loader`] reads:
//!
//! ```text
//! atlas.png
//! size: 256, 256
//! format: RGBA8888
//! filter: Nearest, Nearest
//! repeat: none
//! player_idle
//!   rotate: false
//!   xy: 0, 0
//!   size: 32, 32
//!   orig: 32, 32
//!   offset: 0, 0
//!   index: -1
//! ```
//!
//! Pages are separated by a blank line. Regions keep descriptor order.
//! Sizes are written from the stored absolute `width`/`height`, so a region
//! loaded with a negative source size is written back with a positive one and
//! its `u2`/`v2` change on reload.

use crate::atlas::{Atlas, Page};
use crate::export::{ExportOptions, Exporter, Result};
use crate::texture::TextureWrap;

/// Descriptor format exporter.
#[derive(Debug)]
pub struct DescriptorExporter {
    /// Pixel format written to the `format` line
    format: String,
}

impl Default for DescriptorExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorExporter {
    /// Create a new descriptor exporter with default settings.
    pub fn new() -> Self {
        Self { format: "RGBA8888".to_string() }
    }

    /// Set the pixel format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    fn write_page<T>(&self, content: &mut String, atlas: &Atlas<T>, index: usize, page: &Page<T>) {
        content.push_str(&page.name);
        content.push('\n');
        content.push_str(&format!("size: {}, {}\n", page.width, page.height));
        content.push_str(&format!("format: {}\n", self.format));
        content.push_str(&format!("filter: {}, {}\n", page.min_filter.as_str(), page.mag_filter.as_str()));
        content.push_str(&format!("repeat: {}\n", repeat_direction(page.u_wrap, page.v_wrap)));

        for region in atlas.regions().iter().filter(|r| r.page == index) {
            content.push_str(&region.name);
            content.push('\n');
            content.push_str(&format!("  rotate: {}\n", region.rotate));
            content.push_str(&format!("  xy: {}, {}\n", region.x, region.y));
            content.push_str(&format!("  size: {}, {}\n", region.width, region.height));
            if let Some([a, b, c, d]) = region.splits {
                content.push_str(&format!("  split: {}, {}, {}, {}\n", a, b, c, d));
                if let Some([a, b, c, d]) = region.pads {
                    content.push_str(&format!("  pad: {}, {}, {}, {}\n", a, b, c, d));
                }
            }
            content.push_str(&format!("  orig: {}, {}\n", region.original_width, region.original_height));
            content.push_str(&format!("  offset: {}, {}\n", region.offset_x, region.offset_y));
            content.push_str(&format!("  index: {}\n", region.index));
        }
    }
}

/// Repeat token for a wrap pair. Mirrored wrapping has no token and is written as `none`.
fn repeat_direction(u_wrap: TextureWrap, v_wrap: TextureWrap) -> &'static str {
    match (u_wrap == TextureWrap::Repeat, v_wrap == TextureWrap::Repeat) {
        (true, true) => "xy",
        (true, false) => "x",
        (false, true) => "y",
        (false, false) => "none",
    }
}

impl Exporter for DescriptorExporter {
    fn export_to_string<T>(&self, atlas: &Atlas<T>, _options: &ExportOptions) -> Result<String> {
        let mut content = String::new();
        for (index, page) in atlas.pages().iter().enumerate() {
            if index > 0 {
                content.push('\n');
            }
            self.write_page(&mut content, atlas, index, page);
        }
        Ok(content)
    }

    fn format_name(&self) -> &'static str {
        "atlas descriptor"
    }

    fn extension(&self) -> &'static str {
        "atlas"
    }
}
