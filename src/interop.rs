//! Typed-pixel interop with the `rgb` and `imgref` crates.

use alloc::vec::Vec;

use crate::image::{Graymap, Pixmap, Rgb};

impl From<rgb::RGB8> for Rgb {
    fn from(c: rgb::RGB8) -> Self {
        Rgb::new(c.r, c.g, c.b)
    }
}

impl From<Rgb> for rgb::RGB8 {
    fn from(c: Rgb) -> Self {
        rgb::RGB8::new(c.r, c.g, c.b)
    }
}

impl Pixmap {
    /// Samples as a row-major `rgb::RGB8` vector.
    pub fn to_rgb8_vec(&self) -> Vec<rgb::RGB8> {
        self.buf.samples().iter().map(|&c| c.into()).collect()
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGB8> {
        imgref::ImgVec::new(
            self.to_rgb8_vec(),
            self.width() as usize,
            self.height() as usize,
        )
    }
}

impl Graymap {
    /// Convert to an [`imgref::ImgVec`] of intensity bytes.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<u8> {
        imgref::ImgVec::new(
            self.buf.samples().to_vec(),
            self.width() as usize,
            self.height() as usize,
        )
    }
}
