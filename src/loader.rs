//! Atlas descriptor loading
//!
//! A descriptor is a list of page blocks separated by blank lines. Each block
//! starts with a page header followed by any number of regions:
//!
//! ```text
//! skin.png
//! size: 256, 128
//! format: RGBA8888
//! filter: Linear, Linear
//! repeat: none
//! head
//!   rotate: false
//!   xy: 2, 2
//!   size: 64, 64
//!   orig: 64, 64
//!   offset: 0, 0
//!   index: -1
//! ```
//!
//! The header differs between descriptor versions: `size` and `format` are
//! optional, and regions may carry `split`/`pad` lines before `orig`. Which
//! optional lines are present is decided from the field count of the tuple
//! read in their place, so the exact branching below matters for reading old
//! files.

use crate::atlas::{Atlas, Page, Region};
use crate::reader::{AtlasReader, FormatError, TUPLE_SIZE};
use crate::texture::{Texture, TextureError, TextureFilter, TextureLoader, TextureWrap};
use thiserror::Error;

/// Error type for atlas loading failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// Malformed descriptor text
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The texture loader could not resolve a page
    #[error("Failed to load texture for page '{page}': {source}")]
    Texture {
        page: String,
        #[source]
        source: TextureError,
    },
    /// Descriptor file could not be read
    #[error("Failed to read atlas: {0}")]
    Io(#[from] std::io::Error),
    /// A region refers to a page index that does not exist
    #[error("Region '{region}' refers to missing page {page}")]
    DanglingRegion { region: String, page: usize },
}

type Tuple = [String; TUPLE_SIZE];

/// Parse descriptor text into an [`Atlas`].
///
/// `loader` is called once per page, in descriptor order. Any malformed line
/// aborts the whole load; no partially parsed atlas is returned.
pub fn load<L: TextureLoader>(text: &str, loader: &mut L) -> Result<Atlas<L::Texture>, LoadError> {
    let mut reader = AtlasReader::new(text);
    let mut tuple = Tuple::default();
    let mut pages: Vec<Page<L::Texture>> = Vec::new();
    let mut regions = Vec::new();
    let mut open_page: Option<usize> = None;

    while let Some(line) = reader.read_line() {
        let line = line.trim();
        if line.is_empty() {
            open_page = None;
        } else if let Some(page_index) = open_page {
            let region = read_region(&mut reader, &mut tuple, line, page_index, &pages[page_index])?;
            regions.push(region);
        } else {
            let page = read_page(&mut reader, &mut tuple, line, loader)?;
            open_page = Some(pages.len());
            pages.push(page);
        }
    }

    log::debug!("loaded atlas with {} pages and {} regions", pages.len(), regions.len());
    Ok(Atlas::from_loaded(pages, regions))
}

fn read_page<L: TextureLoader>(
    reader: &mut AtlasReader<'_>,
    tuple: &mut Tuple,
    name: &str,
    loader: &mut L,
) -> Result<Page<L::Texture>, LoadError> {
    let mut header_size = None;
    let mut count = reader.read_tuple(tuple)?;
    if count == 2 {
        // Only atlases from old packers omit the size line.
        if let (Ok(width), Ok(height)) = (tuple[0].parse::<u32>(), tuple[1].parse::<u32>()) {
            header_size = Some((width, height));
            count = reader.read_tuple(tuple)?;
        }
    }
    // A tuple that is not a pair here was the pixel format line, which is ignored.
    if count != 2 {
        count = reader.read_tuple(tuple)?;
    }
    if count < 2 {
        return Err(FormatError::new(
            format!("Expected min and mag filter, got: {}", tuple[0]),
            reader.line_number(),
        )
        .into());
    }
    let min_filter = parse_filter(&tuple[0], reader)?;
    let mag_filter = parse_filter(&tuple[1], reader)?;

    let (u_wrap, v_wrap) = match reader.read_value()?.as_str() {
        "x" => (TextureWrap::Repeat, TextureWrap::ClampToEdge),
        "y" => (TextureWrap::ClampToEdge, TextureWrap::Repeat),
        "xy" => (TextureWrap::Repeat, TextureWrap::Repeat),
        _ => (TextureWrap::ClampToEdge, TextureWrap::ClampToEdge),
    };

    let mut texture = loader
        .load(name)
        .map_err(|source| LoadError::Texture { page: name.to_string(), source })?;
    texture.set_filters(min_filter, mag_filter);
    texture.set_wraps(u_wrap, v_wrap);
    let (width, height) = (texture.width(), texture.height());

    if let Some((header_width, header_height)) = header_size {
        if (header_width, header_height) != (width, height) {
            log::warn!(
                "page '{}' declares size {}x{} but its texture is {}x{}",
                name,
                header_width,
                header_height,
                width,
                height
            );
        }
    }
    log::debug!(
        "page '{}' {}x{} filter {}/{} wrap {}/{}",
        name,
        width,
        height,
        min_filter.as_str(),
        mag_filter.as_str(),
        u_wrap.as_str(),
        v_wrap.as_str()
    );

    Ok(Page {
        name: name.to_string(),
        width,
        height,
        min_filter,
        mag_filter,
        u_wrap,
        v_wrap,
        texture,
    })
}

fn read_region<T>(
    reader: &mut AtlasReader<'_>,
    tuple: &mut Tuple,
    name: &str,
    page_index: usize,
    page: &Page<T>,
) -> Result<Region, FormatError> {
    let rotate = reader.read_value()? == "true";

    reader.read_tuple(tuple)?;
    let x = parse_int(&tuple[0], reader)?;
    let y = parse_int(&tuple[1], reader)?;

    reader.read_tuple(tuple)?;
    let width = parse_int(&tuple[0], reader)?;
    let height = parse_int(&tuple[1], reader)?;

    let page_width = page.width as f32;
    let page_height = page.height as f32;
    let (xf, yf) = (x as f32, y as f32);
    let (wf, hf) = (width as f32, height as f32);
    let u = xf / page_width;
    let v = yf / page_height;
    let (u2, v2) = if rotate {
        ((xf + hf) / page_width, (yf + wf) / page_height)
    } else {
        ((xf + wf) / page_width, (yf + hf) / page_height)
    };

    let mut splits = None;
    let mut pads = None;
    if reader.read_tuple(tuple)? == 4 {
        splits = parse_quad(tuple);
        // Pads only ever follow splits.
        if reader.read_tuple(tuple)? == 4 {
            pads = parse_quad(tuple);
            reader.read_tuple(tuple)?;
        }
    }
    let original_width = parse_int(&tuple[0], reader)?;
    let original_height = parse_int(&tuple[1], reader)?;

    reader.read_tuple(tuple)?;
    let offset_x = parse_int(&tuple[0], reader)?;
    let offset_y = parse_int(&tuple[1], reader)?;

    let index_value = reader.read_value()?;
    let index = parse_int(&index_value, reader)?;

    log::debug!("region '{}' on page '{}' at {},{} {}x{}", name, page.name, x, y, width, height);

    Ok(Region {
        name: name.to_string(),
        page: page_index,
        rotate,
        x,
        y,
        width: width.unsigned_abs(),
        height: height.unsigned_abs(),
        u,
        v,
        u2,
        v2,
        original_width,
        original_height,
        offset_x,
        offset_y,
        index,
        splits,
        pads,
    })
}

fn parse_filter(text: &str, reader: &AtlasReader<'_>) -> Result<TextureFilter, FormatError> {
    TextureFilter::from_str(text).ok_or_else(|| {
        FormatError::new(format!("Unknown texture filter {}", text), reader.line_number())
    })
}

fn parse_int(text: &str, reader: &AtlasReader<'_>) -> Result<i32, FormatError> {
    text.parse()
        .map_err(|_| FormatError::new(format!("Invalid integer: {}", text), reader.line_number()))
}

/// Nine-patch values are kept when all four parse; otherwise the line is skipped.
fn parse_quad(tuple: &Tuple) -> Option<[i32; 4]> {
    Some([
        tuple[0].parse().ok()?,
        tuple[1].parse().ok()?,
        tuple[2].parse().ok()?,
        tuple[3].parse().ok()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct MockTexture {
        name: String,
        width: u32,
        height: u32,
        filters: Option<(TextureFilter, TextureFilter)>,
        wraps: Option<(TextureWrap, TextureWrap)>,
    }

    impl Texture for MockTexture {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn set_filters(&mut self, min: TextureFilter, mag: TextureFilter) {
            self.filters = Some((min, mag));
        }
        fn set_wraps(&mut self, u: TextureWrap, v: TextureWrap) {
            self.wraps = Some((u, v));
        }
        fn dispose(&mut self) {}
    }

    fn sized(width: u32, height: u32) -> impl FnMut(&str) -> Result<MockTexture, TextureError> {
        move |name: &str| {
            Ok(MockTexture { name: name.to_string(), width, height, filters: None, wraps: None })
        }
    }

    fn parse(text: &str) -> Result<Atlas<MockTexture>, LoadError> {
        load(text, &mut sized(128, 64))
    }

    const HEAD: &str = "head\n  rotate: false\n  xy: 0, 0\n  size: 64, 64\n  orig: 64, 64\n  offset: 0, 0\n  index: -1\n";

    #[test]
    fn test_page_without_size_header() {
        let text = format!("skin.png\nfilter: nearest,linear\nrepeat:\n{}", HEAD);
        let atlas = parse(&text).unwrap();

        assert_eq!(atlas.pages().len(), 1);
        let page = &atlas.pages()[0];
        assert_eq!(page.name, "skin.png");
        assert_eq!(page.min_filter, TextureFilter::Nearest);
        assert_eq!(page.mag_filter, TextureFilter::Linear);
        assert_eq!((page.u_wrap, page.v_wrap), (TextureWrap::ClampToEdge, TextureWrap::ClampToEdge));
        assert_eq!(page.texture.name, "skin.png");
        assert_eq!(
            page.texture.filters,
            Some((TextureFilter::Nearest, TextureFilter::Linear))
        );

        let head = atlas.find_region("head").unwrap();
        assert_eq!((head.u, head.v), (0.0, 0.0));
        assert_eq!(head.u2, 64.0 / 128.0);
        assert_eq!(head.v2, 64.0 / 64.0);
        assert_eq!(head.index, -1);
    }

    #[test]
    fn test_size_and_format_header_is_consumed() {
        let text = format!(
            "skin.png\nsize: 256, 256\nformat: RGBA8888\nfilter: Linear, MipMapLinearLinear\nrepeat: xy\n{}",
            HEAD
        );
        let atlas = parse(&text).unwrap();
        let page = &atlas.pages()[0];
        assert_eq!(page.min_filter, TextureFilter::Linear);
        assert_eq!(page.mag_filter, TextureFilter::MipMapLinearLinear);
        assert_eq!((page.u_wrap, page.v_wrap), (TextureWrap::Repeat, TextureWrap::Repeat));
        // texture size wins over the header
        assert_eq!((page.width, page.height), (128, 64));
        assert_eq!(atlas.regions().len(), 1);
    }

    #[test]
    fn test_format_header_without_size() {
        let text = format!("skin.png\nformat: RGBA8888\nfilter: Linear, Linear\nrepeat: x\n{}", HEAD);
        let atlas = parse(&text).unwrap();
        let page = &atlas.pages()[0];
        assert_eq!(page.min_filter, TextureFilter::Linear);
        assert_eq!((page.u_wrap, page.v_wrap), (TextureWrap::Repeat, TextureWrap::ClampToEdge));
    }

    #[test]
    fn test_repeat_y_and_unknown_direction() {
        let atlas = parse("a.png\nfilter: Nearest, Nearest\nrepeat: y\n").unwrap();
        let page = &atlas.pages()[0];
        assert_eq!((page.u_wrap, page.v_wrap), (TextureWrap::ClampToEdge, TextureWrap::Repeat));
        assert_eq!(page.texture.wraps, Some((TextureWrap::ClampToEdge, TextureWrap::Repeat)));

        let atlas = parse("a.png\nfilter: Nearest, Nearest\nrepeat: none\n").unwrap();
        let page = &atlas.pages()[0];
        assert_eq!((page.u_wrap, page.v_wrap), (TextureWrap::ClampToEdge, TextureWrap::ClampToEdge));
    }

    #[test]
    fn test_unknown_filter() {
        let err = parse("a.png\nfilter: Nearest, Bilinear\nrepeat: none\n").unwrap_err();
        match err {
            LoadError::Format(e) => {
                assert_eq!(e.message, "Unknown texture filter Bilinear");
                assert_eq!(e.line, 2);
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_rotated_region_swaps_uv_extent() {
        let text = "a.png\nfilter: Nearest, Nearest\nrepeat: none\narm\n  rotate: true\n  xy: 32, 16\n  size: 16, 8\n  orig: 16, 8\n  offset: 0, 0\n  index: -1\n";
        let atlas = parse(text).unwrap();
        let arm = atlas.find_region("arm").unwrap();
        assert!(arm.rotate);
        assert_eq!(arm.u2 - arm.u, 8.0 / 128.0);
        assert_eq!(arm.v2 - arm.v, 16.0 / 64.0);
    }

    #[test]
    fn test_negative_size_is_stored_absolute() {
        let text = "a.png\nfilter: Nearest, Nearest\nrepeat: none\nflip\n  rotate: false\n  xy: 64, 0\n  size: -32, 16\n  orig: 32, 16\n  offset: 0, 0\n  index: -1\n";
        let atlas = parse(text).unwrap();
        let flip = atlas.find_region("flip").unwrap();
        assert_eq!((flip.width, flip.height), (32, 16));
        // uv keeps the signed extent
        assert_eq!(flip.u2, 32.0 / 128.0);
    }

    #[test]
    fn test_split_and_pad_lines() {
        let text = "a.png\nfilter: Nearest, Nearest\nrepeat: none\nbutton\n  rotate: false\n  xy: 0, 0\n  size: 24, 24\n  split: 4, 4, 5, 5\n  pad: 1, 2, 3, 4\n  orig: 24, 24\n  offset: 2, 3\n  index: 7\n";
        let atlas = parse(text).unwrap();
        let button = atlas.find_region("button").unwrap();
        assert_eq!(button.splits, Some([4, 4, 5, 5]));
        assert_eq!(button.pads, Some([1, 2, 3, 4]));
        assert_eq!((button.original_width, button.original_height), (24, 24));
        assert_eq!((button.offset_x, button.offset_y), (2, 3));
        assert_eq!(button.index, 7);
    }

    #[test]
    fn test_split_without_pad() {
        let text = "a.png\nfilter: Nearest, Nearest\nrepeat: none\nbutton\n  rotate: false\n  xy: 0, 0\n  size: 24, 24\n  split: 4, 4, 5, 5\n  orig: 30, 28\n  offset: 0, 0\n  index: -1\n";
        let atlas = parse(text).unwrap();
        let button = atlas.find_region("button").unwrap();
        assert_eq!(button.splits, Some([4, 4, 5, 5]));
        assert_eq!(button.pads, None);
        assert_eq!((button.original_width, button.original_height), (30, 28));
    }

    #[test]
    fn test_unparseable_split_and_pad_are_skipped() {
        // the fourth split field absorbs "4, 5"
        let text = "a.png\nfilter: Nearest, Nearest\nrepeat: none\nbutton\n  rotate: false\n  xy: 0, 0\n  size: 24, 24\n  split: 1, 2, 3, 4, 5\n  pad: a, b, c, d\n  orig: 1, 1\n  offset: 0, 0\n  index: -1\n";
        let atlas = parse(text).unwrap();
        let button = atlas.find_region("button").unwrap();
        assert_eq!(button.splits, None);
        assert_eq!(button.pads, None);
        assert_eq!((button.original_width, button.original_height), (1, 1));
    }

    #[test]
    fn test_uv_extent_near_integer_limit() {
        let text = "a.png\nfilter: Nearest, Nearest\nrepeat: none\nr\n  rotate: false\n  xy: 2147483647, 0\n  size: 1, 1\n  orig: 1, 1\n  offset: 0, 0\n  index: -1\n";
        let atlas = parse(text).unwrap();
        let r = atlas.find_region("r").unwrap();
        assert!(r.u2.is_finite());
        assert!(r.u2 >= r.u);
        assert!(r.u2 > 0.0);
    }

    #[test]
    fn test_blank_line_starts_new_page() {
        let text = format!(
            "one.png\nfilter: Nearest, Nearest\nrepeat: none\n{}\ntwo.png\nfilter: Linear, Linear\nrepeat: none\n{}",
            HEAD, HEAD
        );
        let atlas = parse(&text).unwrap();
        assert_eq!(atlas.pages().len(), 2);
        assert_eq!(atlas.regions().len(), 2);
        assert_eq!(atlas.regions()[0].page, 0);
        assert_eq!(atlas.regions()[1].page, 1);
        assert_eq!(atlas.page(&atlas.regions()[1]).name, "two.png");
    }

    #[test]
    fn test_missing_colon_fails_whole_load() {
        let text = "a.png\nfilter: Nearest, Nearest\nrepeat: none\nhead\n  rotate true\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, LoadError::Format(ref e) if e.line == 5));
    }

    #[test]
    fn test_bad_integer() {
        let text = "a.png\nfilter: Nearest, Nearest\nrepeat: none\nhead\n  rotate: false\n  xy: 0, zero\n";
        let err = parse(text).unwrap_err();
        assert_eq!(err.to_string(), "line 6: Invalid integer: zero");
    }

    #[test]
    fn test_truncated_region() {
        let text = "a.png\nfilter: Nearest, Nearest\nrepeat: none\nhead\n  rotate: false\n";
        assert!(matches!(parse(text), Err(LoadError::Format(_))));
    }

    #[test]
    fn test_texture_loader_failure() {
        let mut failing = |name: &str| -> Result<MockTexture, TextureError> {
            Err(TextureError::new(format!("no such image: {}", name)))
        };
        let err = load("gone.png\nfilter: Nearest, Nearest\nrepeat: none\n", &mut failing).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to load texture for page 'gone.png': no such image: gone.png"
        );
    }

    #[test]
    fn test_empty_text_yields_empty_atlas() {
        let atlas = parse("").unwrap();
        assert!(atlas.pages().is_empty());
        assert!(atlas.regions().is_empty());
    }
}
