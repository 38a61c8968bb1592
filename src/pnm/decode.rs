//! Netpbm decoding: one header parser shared by all six formats, then one
//! body reader per magic number.

use alloc::format;
use alloc::vec::Vec;

use enough::Stop;

use super::{Encoding, ImageInfo, PnmKind};
use crate::error::PnmError;
use crate::image::{Bitmap, Graymap, Image, PixelBuffer, Pixmap, Rgb};
use crate::limits::Limits;

/// Decode with optional resource limits.
///
/// ```no_run
/// use pnmkit::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[];
/// let limits = Limits {
///     max_pixels: Some(1 << 24),
///     ..Default::default()
/// };
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// # Ok::<(), pnmkit::PnmError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<Image, PnmError> {
        decode(self.data, self.limits, &stop)
    }
}

/// Byte cursor over the input with Netpbm whitespace and comment rules.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Skip whitespace and `#` comments; a comment runs to end of line.
    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Consume the digits of a decimal token, or `None` if the cursor is
    /// not on a digit.
    fn digits(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos > start {
            Some(&self.data[start..self.pos])
        } else {
            None
        }
    }

    /// Next header token as a decimal integer. Missing or malformed
    /// tokens are header errors naming the field.
    fn read_header_u32(&mut self, field: &str) -> Result<u32, PnmError> {
        self.skip_separators();
        match self.digits() {
            Some(digits) => parse_decimal(digits)
                .ok_or_else(|| PnmError::InvalidHeader(format!("{field} out of range"))),
            None => Err(match self.peek() {
                None => PnmError::InvalidHeader(format!("missing {field}")),
                Some(b) => PnmError::InvalidHeader(format!(
                    "expected digit for {field}, found byte {b:#04x}"
                )),
            }),
        }
    }

    /// Next ASCII body sample as a decimal integer, with row/column (and
    /// for pixmaps, channel) context on failure.
    fn read_sample_u32(&mut self, row: u32, col: u32, channel: &str) -> Result<u32, PnmError> {
        self.skip_separators();
        match self.digits() {
            Some(digits) => parse_decimal(digits).ok_or_else(|| {
                PnmError::InvalidData(format!("sample at row {row}, column {col}{channel} out of range"))
            }),
            None => Err(match self.peek() {
                None => PnmError::Truncated(format!(
                    "input ended at row {row}, column {col}{channel}"
                )),
                Some(b) => PnmError::InvalidData(format!(
                    "expected digit at row {row}, column {col}{channel}, found byte {b:#04x}"
                )),
            }),
        }
    }

    /// Next `0`/`1` sample of a P1 body. Historical Netpbm tolerance:
    /// every other byte is treated as a separator.
    fn read_bit(&mut self, row: u32, col: u32) -> Result<bool, PnmError> {
        while let Some(b) = self.peek() {
            self.pos += 1;
            match b {
                b'0' => return Ok(false),
                b'1' => return Ok(true),
                _ => {}
            }
        }
        Err(PnmError::Truncated(format!(
            "input ended at row {row}, column {col}"
        )))
    }

    /// Consume the single whitespace byte separating the header from a
    /// raw body.
    fn expect_body_separator(&mut self) -> Result<(), PnmError> {
        match self.peek() {
            Some(b) if b.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(())
            }
            Some(b) => Err(PnmError::InvalidHeader(format!(
                "expected whitespace before raw pixel data, found byte {b:#04x}"
            ))),
            None => Err(PnmError::Truncated("input ended before pixel data".into())),
        }
    }
}

fn parse_decimal(digits: &[u8]) -> Option<u32> {
    let mut value: u32 = 0;
    for &d in digits {
        value = value
            .checked_mul(10)?
            .checked_add(u32::from(d - b'0'))?;
    }
    Some(value)
}

/// Parsed header of any of the six formats.
struct Header {
    kind: PnmKind,
    encoding: Encoding,
    width: u32,
    height: u32,
    max: u8,
    /// Offset of the first body byte.
    body: usize,
}

impl Header {
    fn pixel_count(&self) -> Result<usize, PnmError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or(PnmError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

fn parse_header(data: &[u8]) -> Result<Header, PnmError> {
    let (kind, encoding) = match data.get(..2) {
        Some([b'P', b'1']) => (PnmKind::Bitmap, Encoding::Ascii),
        Some([b'P', b'2']) => (PnmKind::Graymap, Encoding::Ascii),
        Some([b'P', b'3']) => (PnmKind::Pixmap, Encoding::Ascii),
        Some([b'P', b'4']) => (PnmKind::Bitmap, Encoding::Binary),
        Some([b'P', b'5']) => (PnmKind::Graymap, Encoding::Binary),
        Some([b'P', b'6']) => (PnmKind::Pixmap, Encoding::Binary),
        _ => return Err(PnmError::UnrecognizedFormat),
    };

    let mut cur = Cursor::new(data, 2);
    let width = cur.read_header_u32("width")?;
    let height = cur.read_header_u32("height")?;
    if width == 0 || height == 0 {
        return Err(PnmError::InvalidHeader(format!(
            "width and height must be positive, got {width}x{height}"
        )));
    }

    let max = if kind.has_max_value() {
        let max = cur.read_header_u32("max value")?;
        // Values above 255 would not fit a single byte; reject, never truncate.
        if max == 0 || max > 255 {
            return Err(PnmError::InvalidHeader(format!(
                "max value must be in 1..=255, got {max}"
            )));
        }
        max as u8
    } else {
        1
    };

    // A raw body starts after exactly one whitespace byte; the ASCII
    // tokenizer skips separators on its own.
    if encoding == Encoding::Binary {
        cur.expect_body_separator()?;
    }

    Ok(Header {
        kind,
        encoding,
        width,
        height,
        max,
        body: cur.pos,
    })
}

pub(super) fn probe(data: &[u8]) -> Result<ImageInfo, PnmError> {
    let header = parse_header(data)?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        kind: header.kind,
        encoding: header.encoding,
        max_value: header.max,
    })
}

pub(super) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, PnmError> {
    let header = parse_header(data)?;

    if let Some(limits) = limits {
        limits.check_dimensions(header.width, header.height)?;
        let bytes = u64::from(header.width)
            * u64::from(header.height)
            * header.kind.channels() as u64;
        limits.check_allocation(bytes)?;
    }

    stop.check()?;

    match (header.kind, header.encoding) {
        (PnmKind::Bitmap, Encoding::Ascii) => decode_p1(data, &header, stop),
        (PnmKind::Graymap, Encoding::Ascii) => decode_p2(data, &header, stop),
        (PnmKind::Pixmap, Encoding::Ascii) => decode_p3(data, &header, stop),
        (PnmKind::Bitmap, Encoding::Binary) => decode_p4(data, &header, stop),
        (PnmKind::Graymap, Encoding::Binary) => decode_p5(data, &header, stop),
        (PnmKind::Pixmap, Encoding::Binary) => decode_p6(data, &header, stop),
    }
}

fn decode_p1(data: &[u8], header: &Header, stop: &dyn Stop) -> Result<Image, PnmError> {
    let mut cur = Cursor::new(data, header.body);
    let mut samples = Vec::with_capacity(header.pixel_count()?);
    for y in 0..header.height {
        if y % 64 == 0 {
            stop.check()?;
        }
        for x in 0..header.width {
            samples.push(cur.read_bit(y, x)?);
        }
    }
    let buf = PixelBuffer::from_samples(header.width, header.height, samples)?;
    Ok(Image::Bitmap(Bitmap::from_parts(buf, Encoding::Ascii)))
}

fn decode_p2(data: &[u8], header: &Header, stop: &dyn Stop) -> Result<Image, PnmError> {
    let mut cur = Cursor::new(data, header.body);
    let mut samples = Vec::with_capacity(header.pixel_count()?);
    for y in 0..header.height {
        if y % 64 == 0 {
            stop.check()?;
        }
        for x in 0..header.width {
            let v = cur.read_sample_u32(y, x, "")?;
            if v > u32::from(header.max) {
                return Err(PnmError::InvalidData(format!(
                    "sample {v} at row {y}, column {x} exceeds max value {}",
                    header.max
                )));
            }
            samples.push(v as u8);
        }
    }
    let buf = PixelBuffer::from_samples(header.width, header.height, samples)?;
    Ok(Image::Graymap(Graymap::from_parts(
        buf,
        header.max,
        Encoding::Ascii,
    )))
}

fn decode_p3(data: &[u8], header: &Header, stop: &dyn Stop) -> Result<Image, PnmError> {
    const CHANNELS: [&str; 3] = [" (red)", " (green)", " (blue)"];

    let mut cur = Cursor::new(data, header.body);
    let mut samples = Vec::with_capacity(header.pixel_count()?);
    for y in 0..header.height {
        if y % 64 == 0 {
            stop.check()?;
        }
        for x in 0..header.width {
            let mut px = [0u8; 3];
            for (value, channel) in px.iter_mut().zip(CHANNELS) {
                let v = cur.read_sample_u32(y, x, channel)?;
                if v > u32::from(header.max) {
                    return Err(PnmError::InvalidData(format!(
                        "sample {v} at row {y}, column {x}{channel} exceeds max value {}",
                        header.max
                    )));
                }
                *value = v as u8;
            }
            samples.push(Rgb::new(px[0], px[1], px[2]));
        }
    }
    let buf = PixelBuffer::from_samples(header.width, header.height, samples)?;
    Ok(Image::Pixmap(Pixmap::from_parts(
        buf,
        header.max,
        Encoding::Ascii,
    )))
}

fn decode_p4(data: &[u8], header: &Header, stop: &dyn Stop) -> Result<Image, PnmError> {
    let w = header.width as usize;
    let h = header.height as usize;
    let row_bytes = w.div_ceil(8);
    let needed = row_bytes
        .checked_mul(h)
        .ok_or(PnmError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    let body = &data[header.body..];
    if body.len() < needed {
        return Err(PnmError::Truncated(format!(
            "need {needed} bytes of packed bitmap data, got {}",
            body.len()
        )));
    }

    let mut samples = Vec::with_capacity(header.pixel_count()?);
    for (y, row) in body[..needed].chunks_exact(row_bytes).enumerate() {
        if y % 256 == 0 {
            stop.check()?;
        }
        // MSB first: bit b of byte i is pixel x = i*8 + (7-b). Padding
        // bits past the row width are never read.
        for x in 0..w {
            samples.push(row[x / 8] & (0x80 >> (x % 8)) != 0);
        }
    }
    let buf = PixelBuffer::from_samples(header.width, header.height, samples)?;
    Ok(Image::Bitmap(Bitmap::from_parts(buf, Encoding::Binary)))
}

fn decode_p5(data: &[u8], header: &Header, stop: &dyn Stop) -> Result<Image, PnmError> {
    let w = header.width as usize;
    let needed = header.pixel_count()?;
    let body = &data[header.body..];
    if body.len() < needed {
        return Err(PnmError::Truncated(format!(
            "need {needed} bytes of graymap data, got {}",
            body.len()
        )));
    }

    stop.check()?;
    let body = &body[..needed];
    if header.max < 255 {
        if let Some(i) = body.iter().position(|&b| b > header.max) {
            return Err(PnmError::InvalidData(format!(
                "sample {} at row {}, column {} exceeds max value {}",
                body[i],
                i / w,
                i % w,
                header.max
            )));
        }
    }
    let buf = PixelBuffer::from_samples(header.width, header.height, body.to_vec())?;
    Ok(Image::Graymap(Graymap::from_parts(
        buf,
        header.max,
        Encoding::Binary,
    )))
}

fn decode_p6(data: &[u8], header: &Header, stop: &dyn Stop) -> Result<Image, PnmError> {
    let w = header.width as usize;
    let needed = header
        .pixel_count()?
        .checked_mul(3)
        .ok_or(PnmError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    let body = &data[header.body..];
    if body.len() < needed {
        return Err(PnmError::Truncated(format!(
            "need {needed} bytes of pixmap data, got {}",
            body.len()
        )));
    }

    stop.check()?;
    let body = &body[..needed];
    if header.max < 255 {
        if let Some(i) = body.iter().position(|&b| b > header.max) {
            return Err(PnmError::InvalidData(format!(
                "sample {} at row {}, column {} exceeds max value {}",
                body[i],
                i / (3 * w),
                (i / 3) % w,
                header.max
            )));
        }
    }
    let samples = body
        .chunks_exact(3)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect();
    let buf = PixelBuffer::from_samples(header.width, header.height, samples)?;
    Ok(Image::Pixmap(Pixmap::from_parts(
        buf,
        header.max,
        Encoding::Binary,
    )))
}
