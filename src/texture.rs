//! Texture sampling modes and the texture collaborator interfaces
//!
//! The atlas never creates GPU resources itself. Each page asks a
//! [`TextureLoader`] for a handle, configures its sampling through the
//! [`Texture`] trait and forwards disposal to it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// WebGL enum values, see https://registry.khronos.org/webgl/specs/latest/1.0/
const GL_NEAREST: u32 = 0x2600;
const GL_LINEAR: u32 = 0x2601;
const GL_NEAREST_MIPMAP_NEAREST: u32 = 0x2700;
const GL_LINEAR_MIPMAP_NEAREST: u32 = 0x2701;
const GL_NEAREST_MIPMAP_LINEAR: u32 = 0x2702;
const GL_LINEAR_MIPMAP_LINEAR: u32 = 0x2703;
const GL_REPEAT: u32 = 0x2901;
const GL_CLAMP_TO_EDGE: u32 = 0x812F;
const GL_MIRRORED_REPEAT: u32 = 0x8370;

/// Texture filtering mode for minification or magnification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TextureFilter {
    /// Nearest neighbor filtering - pixel perfect
    #[default]
    Nearest,
    /// Linear filtering - smooth
    Linear,
    /// Alias of `MipMapLinearLinear`
    MipMap,
    MipMapNearestNearest,
    MipMapLinearNearest,
    MipMapNearestLinear,
    MipMapLinearLinear,
}

impl TextureFilter {
    /// Look up a filter by its descriptor name (case-insensitive).
    ///
    /// ```
    /// use texatlas::texture::TextureFilter;
    ///
    /// assert_eq!(TextureFilter::from_str("Linear"), Some(TextureFilter::Linear));
    /// assert_eq!(TextureFilter::from_str("bilinear"), None);
    /// ```
    pub fn from_str(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "nearest" => Some(TextureFilter::Nearest),
            "linear" => Some(TextureFilter::Linear),
            "mipmap" => Some(TextureFilter::MipMap),
            "mipmapnearestnearest" => Some(TextureFilter::MipMapNearestNearest),
            "mipmaplinearnearest" => Some(TextureFilter::MipMapLinearNearest),
            "mipmapnearestlinear" => Some(TextureFilter::MipMapNearestLinear),
            "mipmaplinearlinear" => Some(TextureFilter::MipMapLinearLinear),
            _ => None,
        }
    }

    /// Get the descriptor name for this filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureFilter::Nearest => "Nearest",
            TextureFilter::Linear => "Linear",
            TextureFilter::MipMap => "MipMap",
            TextureFilter::MipMapNearestNearest => "MipMapNearestNearest",
            TextureFilter::MipMapLinearNearest => "MipMapLinearNearest",
            TextureFilter::MipMapNearestLinear => "MipMapNearestLinear",
            TextureFilter::MipMapLinearLinear => "MipMapLinearLinear",
        }
    }

    /// The WebGL `TEXTURE_MIN_FILTER`/`TEXTURE_MAG_FILTER` value.
    pub fn gl_enum(&self) -> u32 {
        match self {
            TextureFilter::Nearest => GL_NEAREST,
            TextureFilter::Linear => GL_LINEAR,
            TextureFilter::MipMap => GL_LINEAR_MIPMAP_LINEAR,
            TextureFilter::MipMapNearestNearest => GL_NEAREST_MIPMAP_NEAREST,
            TextureFilter::MipMapLinearNearest => GL_LINEAR_MIPMAP_NEAREST,
            TextureFilter::MipMapNearestLinear => GL_NEAREST_MIPMAP_LINEAR,
            TextureFilter::MipMapLinearLinear => GL_LINEAR_MIPMAP_LINEAR,
        }
    }

    /// Whether sampling with this filter needs a mipmap chain.
    pub fn uses_mipmaps(&self) -> bool {
        !matches!(self, TextureFilter::Nearest | TextureFilter::Linear)
    }
}

/// Texture wrap mode along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TextureWrap {
    MirroredRepeat,
    #[default]
    ClampToEdge,
    Repeat,
}

impl TextureWrap {
    /// Look up a wrap mode by name (case-insensitive).
    ///
    /// Older exporters wrote the mirrored mode as `mirroredtepeat`; both
    /// spellings are accepted.
    pub fn from_str(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "mirroredrepeat" | "mirroredtepeat" => Some(TextureWrap::MirroredRepeat),
            "clamptoedge" => Some(TextureWrap::ClampToEdge),
            "repeat" => Some(TextureWrap::Repeat),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextureWrap::MirroredRepeat => "MirroredRepeat",
            TextureWrap::ClampToEdge => "ClampToEdge",
            TextureWrap::Repeat => "Repeat",
        }
    }

    /// The WebGL `TEXTURE_WRAP_S`/`TEXTURE_WRAP_T` value.
    pub fn gl_enum(&self) -> u32 {
        match self {
            TextureWrap::MirroredRepeat => GL_MIRRORED_REPEAT,
            TextureWrap::ClampToEdge => GL_CLAMP_TO_EDGE,
            TextureWrap::Repeat => GL_REPEAT,
        }
    }
}

/// Error reported by a [`TextureLoader`] when a page image cannot be resolved.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct TextureError {
    pub message: String,
}

impl TextureError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// A texture handle owned by the host graphics layer.
pub trait Texture {
    /// Actual pixel width of the loaded image.
    fn width(&self) -> u32;

    /// Actual pixel height of the loaded image.
    fn height(&self) -> u32;

    fn set_filters(&mut self, min: TextureFilter, mag: TextureFilter);

    fn set_wraps(&mut self, u: TextureWrap, v: TextureWrap);

    /// Release the underlying resource.
    fn dispose(&mut self);
}

/// Resolves a page name to a texture handle.
///
/// The call is synchronous: the returned handle must already know its pixel
/// dimensions. Hosts that only resolve textures asynchronously should block
/// at this boundary.
pub trait TextureLoader {
    type Texture: Texture;

    fn load(&mut self, name: &str) -> Result<Self::Texture, TextureError>;
}

impl<T, F> TextureLoader for F
where
    T: Texture,
    F: FnMut(&str) -> Result<T, TextureError>,
{
    type Texture = T;

    fn load(&mut self, name: &str) -> Result<T, TextureError> {
        self(name)
    }
}
