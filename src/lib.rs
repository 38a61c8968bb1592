//! # pnmkit
//!
//! Decoder, encoder, and raster editor for the six classic Netpbm formats.
//!
//! ## Supported Formats
//!
//! - **P1/P4** (PBM) — 1-bit bitmap, ASCII and binary
//! - **P2/P5** (PGM) — grayscale, ASCII and binary, max value up to 255
//! - **P3/P6** (PPM) — RGB, ASCII and binary, max value up to 255
//!
//! Beyond the codec, the crate carries the editing surface a Netpbm
//! toolchain needs: orientation operations (flips, 90° rotation),
//! inversion, max-value rescaling, conversions between the three image
//! kinds, and a scan-conversion drawing engine (lines, rectangles,
//! circles, triangles, polygons, filled variants) in [`draw`].
//!
//! All input is a byte slice and all output is a `Vec<u8>`; the caller
//! owns file handling. The crate is `no_std` + `alloc`.
//!
//! ## Non-Goals
//!
//! - PAM (P7), PFM, or any format beyond the six classic variants
//! - Streaming or incremental decoding
//! - Color management
//!
//! ## Usage
//!
//! ```
//! use pnmkit::{decode, draw, Pixmap, Point, Rgb, Unstoppable};
//!
//! let mut image = Pixmap::new(64, 48)?;
//! draw::filled_circle(&mut image, Point::new(32, 24), 10, Rgb::new(255, 0, 0));
//!
//! let bytes = image.encode(Unstoppable)?;
//! let back = decode(&bytes, Unstoppable)?;
//! assert_eq!(back.size(), (64, 48));
//! # Ok::<(), pnmkit::PnmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod image;
mod limits;
mod ops;

pub mod draw;
pub mod pnm;

#[cfg(feature = "rgb")]
mod interop;

// Re-exports
pub use draw::Canvas;
pub use enough::{Stop, Unstoppable};
pub use error::PnmError;
pub use image::{Bitmap, Graymap, Image, PixelBuffer, Pixmap, Point, Rgb};
pub use limits::Limits;
pub use pnm::{DecodeRequest, Encoding, ImageInfo, PnmKind, decode, encode};
