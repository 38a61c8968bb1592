//! Raster operations: inversion, orientation, max-value rescaling, and
//! conversions between the three image kinds.
//!
//! Conversions keep the source max value and encoding kind (ASCII stays
//! ASCII, binary stays binary).

use crate::error::PnmError;
use crate::image::{Bitmap, Graymap, Image, Pixmap, Rgb};

/// `round(v * new / old)` in integer arithmetic, half away from zero.
fn rescale(v: u8, old: u8, new: u8) -> u8 {
    let num = u32::from(v) * u32::from(new) * 2 + u32::from(old);
    (num / (u32::from(old) * 2)) as u8
}

/// Rec. 709 luminosity weighting, rounded to nearest. The weights sum to
/// one, so the result never exceeds the source max value.
fn luminosity(px: Rgb) -> u8 {
    let num = u32::from(px.r) * 2126 + u32::from(px.g) * 7152 + u32::from(px.b) * 722;
    ((num + 5_000) / 10_000) as u8
}

/// Threshold policy shared by the to-bitmap conversions: a pixel is set
/// iff its gray value is strictly above half the max value.
fn over_half(v: u8, max: u8) -> bool {
    u16::from(v) * 2 > u16::from(max)
}

impl Bitmap {
    /// Toggle every sample.
    pub fn invert(&mut self) {
        for s in self.buf.samples_mut() {
            *s = !*s;
        }
    }

    /// Mirror about the vertical midline.
    pub fn flip_horizontal(&mut self) {
        self.buf.flip_horizontal();
    }

    /// Mirror about the horizontal midline.
    pub fn flip_vertical(&mut self) {
        self.buf.flip_vertical();
    }

    /// Rotate 90° clockwise, swapping width and height.
    pub fn rotate90_cw(&mut self) {
        self.buf = self.buf.rotate90_cw();
    }
}

impl Graymap {
    /// Replace every sample `v` with `max - v`.
    pub fn invert(&mut self) {
        let max = self.max;
        for s in self.buf.samples_mut() {
            *s = max - *s;
        }
    }

    /// Mirror about the vertical midline.
    pub fn flip_horizontal(&mut self) {
        self.buf.flip_horizontal();
    }

    /// Mirror about the horizontal midline.
    pub fn flip_vertical(&mut self) {
        self.buf.flip_vertical();
    }

    /// Rotate 90° clockwise, swapping width and height.
    pub fn rotate90_cw(&mut self) {
        self.buf = self.buf.rotate90_cw();
    }

    /// Linearly rescale every sample to a new max value, rounding to
    /// nearest. Lossy whenever `new_max < max`.
    pub fn set_max_value(&mut self, new_max: u8) -> Result<(), PnmError> {
        if new_max == 0 {
            return Err(PnmError::InvalidArgument(
                "max value must be positive".into(),
            ));
        }
        let old = self.max;
        if new_max != old {
            for s in self.buf.samples_mut() {
                *s = rescale(*s, old, new_max);
            }
            self.max = new_max;
        }
        Ok(())
    }

    /// Threshold to a bitmap: samples strictly brighter than half the max
    /// value become set bits. With max 255, intensities `[0, 127, 128,
    /// 255]` map to `[clear, clear, set, set]`.
    pub fn to_bitmap(&self) -> Bitmap {
        let max = self.max;
        Bitmap {
            buf: self.buf.map(|v| over_half(v, max)),
            encoding: self.encoding,
        }
    }

    /// Expand to a pixmap with the gray value replicated on all three
    /// channels.
    pub fn to_pixmap(&self) -> Pixmap {
        Pixmap {
            buf: self.buf.map(|v| Rgb::new(v, v, v)),
            max: self.max,
            encoding: self.encoding,
        }
    }
}

impl Pixmap {
    /// Replace every channel value `v` with `max - v`.
    pub fn invert(&mut self) {
        let max = self.max;
        for px in self.buf.samples_mut() {
            *px = Rgb::new(max - px.r, max - px.g, max - px.b);
        }
    }

    /// Mirror about the vertical midline.
    pub fn flip_horizontal(&mut self) {
        self.buf.flip_horizontal();
    }

    /// Mirror about the horizontal midline.
    pub fn flip_vertical(&mut self) {
        self.buf.flip_vertical();
    }

    /// Rotate 90° clockwise, swapping width and height.
    pub fn rotate90_cw(&mut self) {
        self.buf = self.buf.rotate90_cw();
    }

    /// Linearly rescale every channel to a new max value, rounding to
    /// nearest. Lossy whenever `new_max < max`.
    pub fn set_max_value(&mut self, new_max: u8) -> Result<(), PnmError> {
        if new_max == 0 {
            return Err(PnmError::InvalidArgument(
                "max value must be positive".into(),
            ));
        }
        let old = self.max;
        if new_max != old {
            for px in self.buf.samples_mut() {
                *px = Rgb::new(
                    rescale(px.r, old, new_max),
                    rescale(px.g, old, new_max),
                    rescale(px.b, old, new_max),
                );
            }
            self.max = new_max;
        }
        Ok(())
    }

    /// Luminosity-weighted grayscale conversion (Rec. 709 weights,
    /// rounded to nearest).
    pub fn to_graymap(&self) -> Graymap {
        Graymap {
            buf: self.buf.map(luminosity),
            max: self.max,
            encoding: self.encoding,
        }
    }

    /// Threshold to a bitmap via the luminosity gray value, with the same
    /// strictly-above-half policy as [`Graymap::to_bitmap`].
    pub fn to_bitmap(&self) -> Bitmap {
        let max = self.max;
        Bitmap {
            buf: self.buf.map(|px| over_half(luminosity(px), max)),
            encoding: self.encoding,
        }
    }
}

impl Image {
    /// Invert every sample, whatever the kind.
    pub fn invert(&mut self) {
        match self {
            Image::Bitmap(b) => b.invert(),
            Image::Graymap(g) => g.invert(),
            Image::Pixmap(p) => p.invert(),
        }
    }

    /// Mirror about the vertical midline.
    pub fn flip_horizontal(&mut self) {
        match self {
            Image::Bitmap(b) => b.flip_horizontal(),
            Image::Graymap(g) => g.flip_horizontal(),
            Image::Pixmap(p) => p.flip_horizontal(),
        }
    }

    /// Mirror about the horizontal midline.
    pub fn flip_vertical(&mut self) {
        match self {
            Image::Bitmap(b) => b.flip_vertical(),
            Image::Graymap(g) => g.flip_vertical(),
            Image::Pixmap(p) => p.flip_vertical(),
        }
    }

    /// Rotate 90° clockwise, swapping width and height.
    pub fn rotate90_cw(&mut self) {
        match self {
            Image::Bitmap(b) => b.rotate90_cw(),
            Image::Graymap(g) => g.rotate90_cw(),
            Image::Pixmap(p) => p.rotate90_cw(),
        }
    }
}
