//! In-memory raster model: the generic sample grid and the three Netpbm
//! image kinds that wrap it.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::PnmError;
use crate::pnm::{Encoding, PnmKind};

/// RGB color sample of a [`Pixmap`]. The zero value is black.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Integer pixel coordinate taken by the drawing functions.
///
/// Coordinates may lie outside the image; writes there are dropped by the
/// saturating [`PixelBuffer`] contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Dense row-major sample grid.
///
/// `samples.len() == width * height` always; there are no ragged rows.
/// Reads outside the image return the sample type's zero value and writes
/// outside the image are silent no-ops. That saturating contract is
/// deliberate: the drawing engine iterates past image edges and relies on
/// it instead of clipping shapes itself.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer<T> {
    width: u32,
    height: u32,
    samples: Vec<T>,
}

fn checked_len(width: u32, height: u32) -> Result<usize, PnmError> {
    if width == 0 || height == 0 {
        return Err(PnmError::InvalidArgument(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }
    // Coordinates are i32 throughout; reject grids we cannot address.
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(PnmError::DimensionsTooLarge { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(PnmError::DimensionsTooLarge { width, height })
}

impl<T: Copy + Default> PixelBuffer<T> {
    /// Zero-filled buffer. Dimensions must be positive and addressable.
    pub fn new(width: u32, height: u32) -> Result<Self, PnmError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            samples: vec![T::default(); len],
        })
    }

    /// Build a buffer around an existing row-major sample vector.
    pub(crate) fn from_samples(width: u32, height: u32, samples: Vec<T>) -> Result<Self, PnmError> {
        let len = checked_len(width, height)?;
        debug_assert_eq!(samples.len(), len);
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major sample slice.
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [T] {
        &mut self.samples
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }

    /// Sample at `(x, y)`, or the zero sample when out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> T {
        self.index(x, y).map_or_else(T::default, |i| self.samples[i])
    }

    /// Store a sample at `(x, y)`; out-of-bounds writes are dropped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        if let Some(i) = self.index(x, y) {
            self.samples[i] = value;
        }
    }

    /// Mirror about the vertical midline. For odd widths the middle
    /// column stays put.
    pub(crate) fn flip_horizontal(&mut self) {
        let w = self.width as usize;
        for row in self.samples.chunks_mut(w) {
            row.reverse();
        }
    }

    /// Mirror about the horizontal midline. For odd heights the middle
    /// row stays put.
    pub(crate) fn flip_vertical(&mut self) {
        let w = self.width as usize;
        let h = self.height as usize;
        for y in 0..h / 2 {
            let (head, tail) = self.samples.split_at_mut((h - 1 - y) * w);
            head[y * w..y * w + w].swap_with_slice(&mut tail[..w]);
        }
    }

    /// Same-shaped buffer with every sample passed through `f`.
    pub(crate) fn map<U: Copy + Default>(&self, f: impl Fn(T) -> U) -> PixelBuffer<U> {
        PixelBuffer {
            width: self.width,
            height: self.height,
            samples: self.samples.iter().map(|&s| f(s)).collect(),
        }
    }

    /// 90° clockwise rotation into a fresh buffer with swapped
    /// dimensions: source `(x, y)` lands at `(height - 1 - y, x)`.
    pub(crate) fn rotate90_cw(&self) -> Self {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut out = vec![T::default(); self.samples.len()];
        for y in 0..h {
            for x in 0..w {
                out[x * h + (h - 1 - y)] = self.samples[y * w + x];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            samples: out,
        }
    }
}

/// 1-bit black-and-white image (PBM, `P1`/`P4`). A set sample is a black
/// pixel in the Netpbm convention.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    pub(crate) buf: PixelBuffer<bool>,
    pub(crate) encoding: Encoding,
}

/// Single-channel intensity image (PGM, `P2`/`P5`).
///
/// Every sample lies in `0..=max`; keeping it there after direct `set`
/// calls is the caller's job.
#[derive(Clone, Debug, PartialEq)]
pub struct Graymap {
    pub(crate) buf: PixelBuffer<u8>,
    pub(crate) max: u8,
    pub(crate) encoding: Encoding,
}

/// RGB image (PPM, `P3`/`P6`). Every channel lies in `0..=max`.
#[derive(Clone, Debug, PartialEq)]
pub struct Pixmap {
    pub(crate) buf: PixelBuffer<Rgb>,
    pub(crate) max: u8,
    pub(crate) encoding: Encoding,
}

impl Bitmap {
    /// All-clear bitmap, binary encoding.
    pub fn new(width: u32, height: u32) -> Result<Self, PnmError> {
        Ok(Self {
            buf: PixelBuffer::new(width, height)?,
            encoding: Encoding::Binary,
        })
    }

    pub(crate) fn from_parts(buf: PixelBuffer<bool>, encoding: Encoding) -> Self {
        Self { buf, encoding }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.buf.width(), self.buf.height())
    }

    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// Sample at `(x, y)`; false when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.buf.get(x, y)
    }

    /// Set the sample at `(x, y)`; out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        self.buf.set(x, y, value);
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Switch between `P1` and `P4` output without touching samples.
    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    pub fn buffer(&self) -> &PixelBuffer<bool> {
        &self.buf
    }
}

impl Graymap {
    /// Zero-filled graymap with max value 255, binary encoding.
    pub fn new(width: u32, height: u32) -> Result<Self, PnmError> {
        Self::with_max(width, height, 255)
    }

    /// Zero-filled graymap with an explicit max value in `1..=255`.
    pub fn with_max(width: u32, height: u32, max: u8) -> Result<Self, PnmError> {
        if max == 0 {
            return Err(PnmError::InvalidArgument(
                "max value must be positive".into(),
            ));
        }
        Ok(Self {
            buf: PixelBuffer::new(width, height)?,
            max,
            encoding: Encoding::Binary,
        })
    }

    pub(crate) fn from_parts(buf: PixelBuffer<u8>, max: u8, encoding: Encoding) -> Self {
        Self { buf, max, encoding }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.buf.width(), self.buf.height())
    }

    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// Intensity at `(x, y)`; 0 when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> u8 {
        self.buf.get(x, y)
    }

    /// Set the intensity at `(x, y)`; out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, value: u8) {
        self.buf.set(x, y, value);
    }

    /// Declared maximum intensity.
    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Switch between `P2` and `P5` output without touching samples.
    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    pub fn buffer(&self) -> &PixelBuffer<u8> {
        &self.buf
    }
}

impl Pixmap {
    /// Black pixmap with max value 255, binary encoding.
    pub fn new(width: u32, height: u32) -> Result<Self, PnmError> {
        Self::with_max(width, height, 255)
    }

    /// Black pixmap with an explicit max value in `1..=255`.
    pub fn with_max(width: u32, height: u32, max: u8) -> Result<Self, PnmError> {
        if max == 0 {
            return Err(PnmError::InvalidArgument(
                "max value must be positive".into(),
            ));
        }
        Ok(Self {
            buf: PixelBuffer::new(width, height)?,
            max,
            encoding: Encoding::Binary,
        })
    }

    pub(crate) fn from_parts(buf: PixelBuffer<Rgb>, max: u8, encoding: Encoding) -> Self {
        Self { buf, max, encoding }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.buf.width(), self.buf.height())
    }

    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// Color at `(x, y)`; black when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Rgb {
        self.buf.get(x, y)
    }

    /// Set the color at `(x, y)`; out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        self.buf.set(x, y, color);
    }

    /// Declared maximum channel value.
    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Switch between `P3` and `P6` output without touching samples.
    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    pub fn buffer(&self) -> &PixelBuffer<Rgb> {
        &self.buf
    }
}

/// Any decoded Netpbm image.
#[derive(Clone, Debug, PartialEq)]
pub enum Image {
    Bitmap(Bitmap),
    Graymap(Graymap),
    Pixmap(Pixmap),
}

impl Image {
    pub fn kind(&self) -> PnmKind {
        match self {
            Image::Bitmap(_) => PnmKind::Bitmap,
            Image::Graymap(_) => PnmKind::Graymap,
            Image::Pixmap(_) => PnmKind::Pixmap,
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Image::Bitmap(b) => b.encoding(),
            Image::Graymap(g) => g.encoding(),
            Image::Pixmap(p) => p.encoding(),
        }
    }

    pub fn set_encoding(&mut self, encoding: Encoding) {
        match self {
            Image::Bitmap(b) => b.set_encoding(encoding),
            Image::Graymap(g) => g.set_encoding(encoding),
            Image::Pixmap(p) => p.set_encoding(encoding),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        match self {
            Image::Bitmap(b) => b.size(),
            Image::Graymap(g) => g.size(),
            Image::Pixmap(p) => p.size(),
        }
    }

    pub fn width(&self) -> u32 {
        self.size().0
    }

    pub fn height(&self) -> u32 {
        self.size().1
    }

    /// Declared maximum sample value; implicitly 1 for bitmaps.
    pub fn max_value(&self) -> u8 {
        match self {
            Image::Bitmap(_) => 1,
            Image::Graymap(g) => g.max(),
            Image::Pixmap(p) => p.max(),
        }
    }

    /// The magic number this image encodes as, e.g. `"P5"`.
    pub fn magic(&self) -> &'static str {
        crate::pnm::magic(self.kind(), self.encoding())
    }

    pub fn as_bitmap(&self) -> Option<&Bitmap> {
        match self {
            Image::Bitmap(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_graymap(&self) -> Option<&Graymap> {
        match self {
            Image::Graymap(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_pixmap(&self) -> Option<&Pixmap> {
        match self {
            Image::Pixmap(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_bitmap_mut(&mut self) -> Option<&mut Bitmap> {
        match self {
            Image::Bitmap(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_graymap_mut(&mut self) -> Option<&mut Graymap> {
        match self {
            Image::Graymap(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_pixmap_mut(&mut self) -> Option<&mut Pixmap> {
        match self {
            Image::Pixmap(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Bitmap> for Image {
    fn from(b: Bitmap) -> Self {
        Image::Bitmap(b)
    }
}

impl From<Graymap> for Image {
    fn from(g: Graymap) -> Self {
        Image::Graymap(g)
    }
}

impl From<Pixmap> for Image {
    fn from(p: Pixmap) -> Self {
        Image::Pixmap(p)
    }
}
