//! Bitmap and vector text
//!
//! Font data is borrowed, never copied: a font is a set of slices over
//! `'static` tables generated offline (or any buffer the caller owns).

pub mod hershey;
pub mod mono;
pub mod proportional;

pub use hershey::HersheyFont;
pub use mono::MonoFont;
pub use proportional::ProportionalFont;

use amoled_core::{Error, Rect, Result, Rgb565};

use crate::sink::PixelSink;

/// One glyph bitmap inside a packed bit stream
///
/// Pixels are `bpp` bits each, most significant bit first, rows starting
/// every `stride` bits. Any non-zero pixel value is foreground.
#[derive(Debug, Clone, Copy)]
pub struct Glyph<'a> {
    bits: &'a [u8],
    start: usize,
    stride: usize,
    width: u16,
    bpp: u8,
}

impl<'a> Glyph<'a> {
    pub(crate) const fn new(bits: &'a [u8], start: usize, stride: usize, width: u16, bpp: u8) -> Self {
        Self {
            bits,
            start,
            stride,
            width,
            bpp,
        }
    }

    /// Advance width in pixels
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Raw pixel value; bits past the end of the data read as zero
    pub fn sample(&self, x: u16, y: u16) -> u8 {
        let mut bit = self.start + usize::from(y) * self.stride + usize::from(x) * usize::from(self.bpp);
        let mut value = 0u8;
        for _ in 0..self.bpp {
            let byte = self.bits.get(bit / 8).copied().unwrap_or(0);
            value = (value << 1) | ((byte >> (7 - bit % 8)) & 1);
            bit += 1;
        }
        value
    }

    pub fn is_set(&self, x: u16, y: u16) -> bool {
        self.sample(x, y) != 0
    }
}

/// Bitmap font lookup
pub trait Font {
    /// Cell height shared by every glyph
    fn height(&self) -> u16;

    /// Glyph for a character, `None` when the font lacks it
    fn glyph(&self, c: char) -> Option<Glyph<'_>>;
}

/// Pixel extent of `text` as (width, height) without drawing
///
/// Uses the same advances as [`Draw::text`](crate::Draw::text); characters
/// the font lacks are skipped by both. Empty output measures zero wide.
pub fn measure<F: Font + ?Sized>(font: &F, text: &str) -> (u32, u16) {
    let width = text
        .chars()
        .filter_map(|c| font.glyph(c))
        .map(|g| u32::from(g.width()))
        .sum();
    (width, font.height())
}

/// Background image repeated behind every glyph cell
///
/// Sampled in cell coordinates, so a tile as large as the widest glyph
/// gives each character the same backdrop.
#[derive(Debug, Clone, Copy)]
pub struct Tile<'a> {
    pixels: &'a [Rgb565],
    width: u16,
    height: u16,
}

impl<'a> Tile<'a> {
    /// `pixels` is row-major and must hold `width * height` entries
    pub fn new(pixels: &'a [Rgb565], width: u16, height: u16) -> Result<Self> {
        if pixels.len() < usize::from(width) * usize::from(height) {
            return Err(Error::InvalidArgument);
        }
        Ok(Self { pixels, width, height })
    }

    /// Tile pixel at (x, y), `None` outside the tile
    pub fn at(&self, x: u16, y: u16) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }
}

/// What shows through the unset pixels of a glyph cell
#[derive(Debug, Clone, Copy)]
pub(crate) enum Backing<'a> {
    Clear,
    Solid(Rgb565),
    /// Tile pixels where the tile reaches, the color elsewhere
    Tiled(Tile<'a>, Rgb565),
}

impl Backing<'_> {
    fn behind(&self, x: u16, y: u16) -> Option<Rgb565> {
        match self {
            Backing::Clear => None,
            Backing::Solid(color) => Some(*color),
            Backing::Tiled(tile, color) => Some(tile.at(x, y).unwrap_or(*color)),
        }
    }
}

impl From<Option<Rgb565>> for Backing<'_> {
    fn from(background: Option<Rgb565>) -> Self {
        background.map_or(Backing::Clear, Backing::Solid)
    }
}

/// Render `text` with its top-left corner at (x, y), returning the x
/// position after the last glyph
///
/// An opaque backing paints each glyph cell whole; [`Backing::Clear`]
/// writes only foreground pixels. Glyphs starting past the right edge of
/// the sink are only measured, and the returned position saturates at
/// `i32::MAX`.
pub(crate) fn render<S, F>(
    sink: &mut S,
    font: &F,
    text: &str,
    x: i32,
    y: i32,
    foreground: Rgb565,
    backing: Backing<'_>,
) -> Result<i32>
where
    S: PixelSink + ?Sized,
    F: Font + ?Sized,
{
    let height = font.height();
    let bounds = sink.bounds();
    let mut cursor = x;

    for glyph in text.chars().filter_map(|c| font.glyph(c)) {
        let advance = i32::from(glyph.width());
        if i64::from(cursor) >= bounds.right() {
            cursor = cursor.saturating_add(advance);
            continue;
        }
        let cell = Rect::new(cursor, y, u32::from(glyph.width()), u32::from(height));
        if let Some(visible) = bounds.intersect(&cell) {
            let ox = (i64::from(visible.x) - i64::from(cursor)) as u16;
            let oy = (i64::from(visible.y) - i64::from(y)) as u16;
            if let Backing::Clear = backing {
                draw_runs(sink, &glyph, visible, ox, oy, foreground)?;
            } else {
                let pixels = (0..visible.height as u16).flat_map(move |row| {
                    (0..visible.width as u16).map(move |col| {
                        let (gx, gy) = (ox + col, oy + row);
                        match backing.behind(gx, gy) {
                            Some(behind) if !glyph.is_set(gx, gy) => behind,
                            _ => foreground,
                        }
                    })
                });
                sink.write_area(visible, pixels)?;
            }
        }
        cursor = cursor.saturating_add(advance);
    }
    Ok(cursor)
}

/// Transparent glyph: one span per run of set pixels
fn draw_runs<S: PixelSink + ?Sized>(
    sink: &mut S,
    glyph: &Glyph<'_>,
    visible: Rect,
    ox: u16,
    oy: u16,
    color: Rgb565,
) -> Result<()> {
    for row in 0..visible.height as u16 {
        let mut run_start: Option<u16> = None;
        for col in 0..=visible.width as u16 {
            let set = col < visible.width as u16 && glyph.is_set(ox + col, oy + row);
            match (set, run_start) {
                (true, None) => run_start = Some(col),
                (false, Some(start)) => {
                    let area = Rect::new(
                        visible.x + i32::from(start),
                        visible.y + i32::from(row),
                        u32::from(col - start),
                        1,
                    );
                    sink.fill_area(area, color)?;
                    run_start = None;
                }
                _ => {}
            }
        }
    }
    Ok(())
}
