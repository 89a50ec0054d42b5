//! texatlas - Texture atlas descriptors for 2D skeletal animation runtimes
//!
//! This library provides functionality to:
//! - Read the line-oriented `.atlas` descriptor format (old and new layouts)
//! - Build pages and regions with normalized texture coordinates
//! - Resolve page textures through a pluggable [`texture::TextureLoader`]
//! - Export loaded atlases as JSON or descriptor text
//!
//! ```
//! use texatlas::atlas::Atlas;
//! use texatlas::texture::{Texture, TextureError, TextureFilter, TextureWrap};
//!
//! struct Sheet;
//!
//! impl Texture for Sheet {
//!     fn width(&self) -> u32 { 128 }
//!     fn height(&self) -> u32 { 128 }
//!     fn set_filters(&mut self, _min: TextureFilter, _mag: TextureFilter) {}
//!     fn set_wraps(&mut self, _u: TextureWrap, _v: TextureWrap) {}
//!     fn dispose(&mut self) {}
//! }
//!
//! let text = "skin.png\nfilter: Linear, Linear\nrepeat: none\nhead\n  rotate: false\n  xy: 0, 0\n  size: 64, 32\n  orig: 64, 32\n  offset: 0, 0\n  index: -1\n";
//! let mut loader = |_: &str| Ok::<_, TextureError>(Sheet);
//! let atlas = Atlas::load(text, &mut loader).unwrap();
//! let head = atlas.find_region("head").unwrap();
//! assert_eq!((head.u2, head.v2), (0.5, 0.25));
//! ```

pub mod atlas;
pub mod cli;
pub mod config;
pub mod export;
pub mod image_loader;
pub mod loader;
pub mod reader;
pub mod texture;

pub use atlas::{Atlas, Page, Region};
pub use loader::{load, LoadError};
pub use reader::{AtlasReader, FormatError};
pub use texture::{Texture, TextureError, TextureFilter, TextureLoader, TextureWrap};
