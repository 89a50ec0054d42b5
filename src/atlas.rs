//! Atlas data model - pages, regions and name lookup
//!
//! An [`Atlas`] is produced by [`crate::loader::load`] and is read-only
//! afterwards, apart from [`Atlas::flip_v`] and [`Atlas::dispose`].

use crate::loader::LoadError;
use crate::texture::{Texture, TextureFilter, TextureLoader, TextureWrap};
use serde::Serialize;
use std::path::Path;

/// One texture sheet of an atlas.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Page name, also the key the texture was resolved with
    pub name: String,
    /// Pixel width of the loaded texture
    pub width: u32,
    /// Pixel height of the loaded texture
    pub height: u32,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub u_wrap: TextureWrap,
    pub v_wrap: TextureWrap,
    #[serde(skip)]
    pub texture: T,
}

/// A named rectangle within a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub name: String,
    /// Index of the owning page in [`Atlas::pages`]
    pub page: usize,
    /// Stored rotated 90 degrees in the page
    pub rotate: bool,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,
    /// Size before whitespace was trimmed
    pub original_width: i32,
    pub original_height: i32,
    /// Offset of the packed pixels within the original size
    pub offset_x: i32,
    pub offset_y: i32,
    /// Position in an animation sequence, -1 if not part of one
    pub index: i32,
    /// Nine-patch split lines (left, right, top, bottom)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splits: Option<[i32; 4]>,
    /// Nine-patch content padding (left, right, top, bottom)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pads: Option<[i32; 4]>,
}

/// Pages and regions parsed from one descriptor.
#[derive(Debug)]
pub struct Atlas<T> {
    pages: Vec<Page<T>>,
    regions: Vec<Region>,
}

impl<T: Texture> Atlas<T> {
    /// Parse descriptor text, resolving each page through `loader`.
    ///
    /// See [`crate::loader::load`].
    pub fn load<L>(text: &str, loader: &mut L) -> Result<Self, LoadError>
    where
        L: TextureLoader<Texture = T>,
    {
        crate::loader::load(text, loader)
    }

    /// Read and parse a descriptor file.
    pub fn load_file<L>(path: &Path, loader: &mut L) -> Result<Self, LoadError>
    where
        L: TextureLoader<Texture = T>,
    {
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading atlas {}", path.display());
        crate::loader::load(&text, loader)
    }

    /// Assemble an atlas from records built elsewhere.
    ///
    /// Fails if a region points at a page index that does not exist.
    pub fn from_parts(pages: Vec<Page<T>>, regions: Vec<Region>) -> Result<Self, LoadError> {
        if let Some(region) = regions.iter().find(|r| r.page >= pages.len()) {
            return Err(LoadError::DanglingRegion { region: region.name.clone(), page: region.page });
        }
        Ok(Self { pages, regions })
    }

    /// Release every page texture.
    ///
    /// Calling this twice disposes each texture twice; whether that is safe
    /// is up to the texture implementation.
    pub fn dispose(&mut self) {
        for page in &mut self.pages {
            log::debug!("disposing texture for page '{}'", page.name);
            page.texture.dispose();
        }
    }
}

impl<T> Atlas<T> {
    pub(crate) fn from_loaded(pages: Vec<Page<T>>, regions: Vec<Region>) -> Self {
        Self { pages, regions }
    }

    /// Pages in descriptor order.
    pub fn pages(&self) -> &[Page<T>] {
        &self.pages
    }

    /// Regions in descriptor order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Returns the first region named `name`.
    ///
    /// This is a linear scan; cache the result rather than calling it per frame.
    pub fn find_region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.name == name)
    }

    /// The page a region belongs to.
    ///
    /// # Panics
    ///
    /// Panics if `region` was not produced by this atlas.
    pub fn page(&self, region: &Region) -> &Page<T> {
        &self.pages[region.page]
    }

    /// The texture a region is drawn from.
    pub fn texture(&self, region: &Region) -> &T {
        &self.page(region).texture
    }

    /// Flip texture coordinates vertically for hosts whose v axis points up.
    pub fn flip_v(&mut self) {
        for region in &mut self.regions {
            region.v = 1.0 - region.v;
            region.v2 = 1.0 - region.v2;
        }
    }
}

impl<'a, T> IntoIterator for &'a Atlas<T> {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
