//! Generic JSON export format.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "pages": [
//!     {
//!       "name": "skin.png",
//!       "width": 256,
//!       "height": 128,
//!       "min_filter": "Linear",
//!       "mag_filter": "Linear",
//!       "u_wrap": "ClampToEdge",
//!       "v_wrap": "ClampToEdge"
//!     }
//!   ],
//!   "regions": [
//!     {
//!       "name": "head",
//!       "page": 0,
//!       "rotate": false,
//!       "x": 2,
//!       "y": 2,
//!       "width": 64,
//!       "height": 64,
//!       "u": 0.0078125,
//!       "v": 0.015625,
//!       "u2": 0.2578125,
//!       "v2": 0.515625,
//!       ...
//!     }
//!   ]
//! }
//! ```

use crate::atlas::{Atlas, Page, Region};
use crate::export::{ExportOptions, Exporter, Result};
use serde::Serialize;

#[derive(Serialize)]
#[serde(bound = "")]
struct JsonAtlas<'a, T> {
    pages: &'a [Page<T>],
    regions: &'a [Region],
}

/// JSON format exporter.
#[derive(Debug, Default)]
pub struct JsonExporter;

impl JsonExporter {
    /// Create a new JSON exporter.
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for JsonExporter {
    fn export_to_string<T>(&self, atlas: &Atlas<T>, options: &ExportOptions) -> Result<String> {
        let document = JsonAtlas { pages: atlas.pages(), regions: atlas.regions() };
        let json = if options.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(json)
    }

    fn format_name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_atlas;
    use serde_json::Value;

    #[test]
    fn test_json_structure() {
        let json = JsonExporter::new()
            .export_to_string(&sample_atlas(), &ExportOptions::default())
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["pages"].as_array().unwrap().len(), 2);
        assert_eq!(value["pages"][0]["name"], "one.png");
        assert_eq!(value["pages"][0]["min_filter"], "Linear");
        assert_eq!(value["pages"][1]["u_wrap"], "Repeat");
        assert!(value["pages"][0].get("texture").is_none());

        assert_eq!(value["regions"][2]["name"], "tail");
        assert_eq!(value["regions"][2]["page"], 1);
        assert_eq!(value["regions"][0]["u2"], 0.5);
        assert!(value["regions"][0].get("splits").is_none());
    }

    #[test]
    fn test_compact_output() {
        let options = ExportOptions { pretty: false };
        let json = JsonExporter::new().export_to_string(&sample_atlas(), &options).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_format_name_and_extension() {
        let exporter = JsonExporter::new();
        assert_eq!(exporter.format_name(), "json");
        assert_eq!(exporter.extension(), "json");
    }
}
