//! Texture loader backed by image files on disk
//!
//! Resolves each page name against an images directory and reads the image
//! header for its pixel size. No pixel data is decoded or uploaded; the
//! returned handle only records the sampling state the atlas asked for.

use crate::texture::{Texture, TextureError, TextureFilter, TextureLoader, TextureWrap};
use std::path::{Path, PathBuf};

/// Page texture resolved from an image file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTexture {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub u_wrap: TextureWrap,
    pub v_wrap: TextureWrap,
    pub disposed: bool,
}

impl Texture for ImageTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_filters(&mut self, min: TextureFilter, mag: TextureFilter) {
        self.min_filter = min;
        self.mag_filter = mag;
    }

    fn set_wraps(&mut self, u: TextureWrap, v: TextureWrap) {
        self.u_wrap = u;
        self.v_wrap = v;
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

/// Loads page textures from `images_dir/<page name>`.
#[derive(Debug, Clone)]
pub struct ImageTextureLoader {
    images_dir: PathBuf,
}

impl ImageTextureLoader {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self { images_dir: images_dir.into() }
    }

    /// Loader resolving page names next to the descriptor file.
    pub fn beside(atlas_path: &Path) -> Self {
        Self::new(atlas_path.parent().map(Path::to_path_buf).unwrap_or_default())
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}

impl TextureLoader for ImageTextureLoader {
    type Texture = ImageTexture;

    fn load(&mut self, name: &str) -> Result<ImageTexture, TextureError> {
        let path = self.images_dir.join(name);
        let (width, height) = image::image_dimensions(&path)
            .map_err(|e| TextureError::new(format!("{}: {}", path.display(), e)))?;
        log::debug!("resolved page '{}' to {} ({}x{})", name, path.display(), width, height);

        Ok(ImageTexture {
            path,
            width,
            height,
            min_filter: TextureFilter::default(),
            mag_filter: TextureFilter::default(),
            u_wrap: TextureWrap::default(),
            v_wrap: TextureWrap::default(),
            disposed: false,
        })
    }
}
