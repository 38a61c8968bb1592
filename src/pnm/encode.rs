//! Netpbm encoding. The header is always rebuilt from the image's
//! current kind, encoding, dimensions, and max value.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::{Encoding, PnmKind, magic};
use crate::error::PnmError;
use crate::image::{Bitmap, Graymap, Image, Pixmap};

pub(super) fn encode_image(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, PnmError> {
    match image {
        Image::Bitmap(b) => encode_bitmap(b, stop),
        Image::Graymap(g) => encode_graymap(g, stop),
        Image::Pixmap(p) => encode_pixmap(p, stop),
    }
}

/// Append `v` in decimal without going through the formatter.
fn push_decimal(out: &mut Vec<u8>, v: u8) {
    if v >= 100 {
        out.push(b'0' + v / 100);
    }
    if v >= 10 {
        out.push(b'0' + (v / 10) % 10);
    }
    out.push(b'0' + v % 10);
}

pub(crate) fn encode_bitmap(image: &Bitmap, stop: &dyn Stop) -> Result<Vec<u8>, PnmError> {
    let (width, height) = image.size();
    let w = width as usize;
    let h = height as usize;
    let header = format!(
        "{}\n{width} {height}\n",
        magic(PnmKind::Bitmap, image.encoding())
    );
    let samples = image.buffer().samples();

    match image.encoding() {
        Encoding::Ascii => {
            let mut out = Vec::with_capacity(header.len() + h * (2 * w));
            out.extend_from_slice(header.as_bytes());
            for (y, row) in samples.chunks_exact(w).enumerate() {
                if y % 256 == 0 {
                    stop.check()?;
                }
                for (x, &bit) in row.iter().enumerate() {
                    if x > 0 {
                        out.push(b' ');
                    }
                    out.push(if bit { b'1' } else { b'0' });
                }
                out.push(b'\n');
            }
            Ok(out)
        }
        Encoding::Binary => {
            let row_bytes = w.div_ceil(8);
            let mut out = Vec::with_capacity(header.len() + h * row_bytes);
            out.extend_from_slice(header.as_bytes());
            for (y, row) in samples.chunks_exact(w).enumerate() {
                if y % 256 == 0 {
                    stop.check()?;
                }
                // MSB first; bits past the row width stay zero.
                let mut packed = vec![0u8; row_bytes];
                for (x, &bit) in row.iter().enumerate() {
                    if bit {
                        packed[x / 8] |= 0x80 >> (x % 8);
                    }
                }
                out.extend_from_slice(&packed);
            }
            Ok(out)
        }
    }
}

pub(crate) fn encode_graymap(image: &Graymap, stop: &dyn Stop) -> Result<Vec<u8>, PnmError> {
    let (width, height) = image.size();
    let w = width as usize;
    let h = height as usize;
    let header = format!(
        "{}\n{width} {height}\n{}\n",
        magic(PnmKind::Graymap, image.encoding()),
        image.max()
    );
    let samples = image.buffer().samples();

    match image.encoding() {
        Encoding::Ascii => {
            let mut out = Vec::with_capacity(header.len() + h * (4 * w));
            out.extend_from_slice(header.as_bytes());
            for (y, row) in samples.chunks_exact(w).enumerate() {
                if y % 64 == 0 {
                    stop.check()?;
                }
                for (x, &v) in row.iter().enumerate() {
                    if x > 0 {
                        out.push(b' ');
                    }
                    push_decimal(&mut out, v);
                }
                out.push(b'\n');
            }
            Ok(out)
        }
        Encoding::Binary => {
            stop.check()?;
            let mut out = Vec::with_capacity(header.len() + samples.len());
            out.extend_from_slice(header.as_bytes());
            out.extend_from_slice(samples);
            Ok(out)
        }
    }
}

pub(crate) fn encode_pixmap(image: &Pixmap, stop: &dyn Stop) -> Result<Vec<u8>, PnmError> {
    let (width, height) = image.size();
    let w = width as usize;
    let h = height as usize;
    let header = format!(
        "{}\n{width} {height}\n{}\n",
        magic(PnmKind::Pixmap, image.encoding()),
        image.max()
    );
    let samples = image.buffer().samples();

    match image.encoding() {
        Encoding::Ascii => {
            let mut out = Vec::with_capacity(header.len() + h * (12 * w));
            out.extend_from_slice(header.as_bytes());
            for (y, row) in samples.chunks_exact(w).enumerate() {
                if y % 64 == 0 {
                    stop.check()?;
                }
                for (x, &px) in row.iter().enumerate() {
                    if x > 0 {
                        out.push(b' ');
                    }
                    push_decimal(&mut out, px.r);
                    out.push(b' ');
                    push_decimal(&mut out, px.g);
                    out.push(b' ');
                    push_decimal(&mut out, px.b);
                }
                out.push(b'\n');
            }
            Ok(out)
        }
        Encoding::Binary => {
            let mut out = Vec::with_capacity(header.len() + 3 * samples.len());
            out.extend_from_slice(header.as_bytes());
            for (y, row) in samples.chunks_exact(w).enumerate() {
                if y % 256 == 0 {
                    stop.check()?;
                }
                for &px in row {
                    out.push(px.r);
                    out.push(px.g);
                    out.push(px.b);
                }
            }
            Ok(out)
        }
    }
}

impl Bitmap {
    /// Encode as `P1` or `P4` per the current [`Encoding`].
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, PnmError> {
        encode_bitmap(self, &stop)
    }
}

impl Graymap {
    /// Encode as `P2` or `P5` per the current [`Encoding`].
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, PnmError> {
        encode_graymap(self, &stop)
    }
}

impl Pixmap {
    /// Encode as `P3` or `P6` per the current [`Encoding`].
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, PnmError> {
        encode_pixmap(self, &stop)
    }
}

impl Image {
    /// Encode in the image's current kind and encoding.
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, PnmError> {
        encode_image(self, &stop)
    }
}
