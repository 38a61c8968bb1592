//! The six classic Netpbm codecs: P1/P4 (PBM), P2/P5 (PGM), P3/P6 (PPM).
//!
//! All six share one header grammar (magic number, optional `#` comments,
//! whitespace-separated dimensions, a max-value token for the multi-level
//! kinds) and differ only in body token type and packing. The header of
//! encoded output is always rebuilt from the image's current state, never
//! copied from the bytes it was decoded from.

mod decode;
mod encode;

pub use decode::DecodeRequest;

use alloc::vec::Vec;
use enough::Stop;

use crate::error::PnmError;
use crate::image::Image;

/// Image kind addressed by a magic number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmKind {
    /// PBM, 1-bit (`P1`/`P4`).
    Bitmap,
    /// PGM, single-channel (`P2`/`P5`).
    Graymap,
    /// PPM, RGB (`P3`/`P6`).
    Pixmap,
}

impl PnmKind {
    /// Channels per pixel.
    pub fn channels(self) -> usize {
        match self {
            PnmKind::Bitmap | PnmKind::Graymap => 1,
            PnmKind::Pixmap => 3,
        }
    }

    /// Whether the header carries a max-value token.
    pub fn has_max_value(self) -> bool {
        !matches!(self, PnmKind::Bitmap)
    }
}

/// Sample encoding within a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Plain text samples (`P1`/`P2`/`P3`).
    Ascii,
    /// Raw samples (`P4`/`P5`/`P6`).
    Binary,
}

/// The two-character magic number for a kind/encoding pair.
pub fn magic(kind: PnmKind, encoding: Encoding) -> &'static str {
    match (kind, encoding) {
        (PnmKind::Bitmap, Encoding::Ascii) => "P1",
        (PnmKind::Graymap, Encoding::Ascii) => "P2",
        (PnmKind::Pixmap, Encoding::Ascii) => "P3",
        (PnmKind::Bitmap, Encoding::Binary) => "P4",
        (PnmKind::Graymap, Encoding::Binary) => "P5",
        (PnmKind::Pixmap, Encoding::Binary) => "P6",
    }
}

/// Header fields probed without decoding the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub kind: PnmKind,
    pub encoding: Encoding,
    /// Declared maximum sample value; 1 for bitmaps.
    pub max_value: u8,
}

impl ImageInfo {
    /// Parse the header of `data` without touching the pixel body.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PnmError> {
        decode::probe(data)
    }
}

/// Decode a Netpbm image from `data` (any of the six formats).
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Image, PnmError> {
    decode::decode(data, None, &stop)
}

/// Encode `image` in its current kind and encoding.
///
/// The header is rewritten from the image's dimensions, encoding, and max
/// value, so mutations made after decoding always show up in the output.
pub fn encode(image: &Image, stop: impl Stop) -> Result<Vec<u8>, PnmError> {
    encode::encode_image(image, &stop)
}
