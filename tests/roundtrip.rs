use pnmkit::*;

fn checker_bitmap(w: u32, h: u32) -> Bitmap {
    let mut bm = Bitmap::new(w, h).unwrap();
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            bm.set(x, y, (x + y) % 2 == 0);
        }
    }
    bm
}

fn gradient_graymap(w: u32, h: u32, max: u8) -> Graymap {
    let mut gm = Graymap::with_max(w, h, max).unwrap();
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            gm.set(x, y, ((x * 31 + y * 7) % (i32::from(max) + 1)) as u8);
        }
    }
    gm
}

fn pattern_pixmap(w: u32, h: u32, max: u8) -> Pixmap {
    let mut pm = Pixmap::with_max(w, h, max).unwrap();
    let m = i32::from(max) + 1;
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            pm.set(
                x,
                y,
                Rgb::new(
                    ((x * 13) % m) as u8,
                    ((y * 29) % m) as u8,
                    ((x * 7 + y * 3) % m) as u8,
                ),
            );
        }
    }
    pm
}

#[test]
fn bitmap_roundtrip_binary() {
    let bm = checker_bitmap(9, 5);
    let encoded = bm.encode(Unstoppable).unwrap();
    assert!(encoded.starts_with(b"P4\n9 5\n"));
    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded, Image::Bitmap(bm));
}

#[test]
fn bitmap_roundtrip_ascii() {
    let mut bm = checker_bitmap(9, 5);
    bm.set_encoding(Encoding::Ascii);
    let encoded = bm.encode(Unstoppable).unwrap();
    assert!(encoded.starts_with(b"P1\n9 5\n"));
    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded, Image::Bitmap(bm));
}

#[test]
fn graymap_roundtrip_binary_custom_max() {
    let gm = gradient_graymap(16, 12, 200);
    let encoded = gm.encode(Unstoppable).unwrap();
    assert!(encoded.starts_with(b"P5\n16 12\n200\n"));
    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded, Image::Graymap(gm));
}

#[test]
fn graymap_roundtrip_ascii() {
    let mut gm = gradient_graymap(7, 3, 255);
    gm.set_encoding(Encoding::Ascii);
    let encoded = gm.encode(Unstoppable).unwrap();
    assert!(encoded.starts_with(b"P2\n7 3\n255\n"));
    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded, Image::Graymap(gm));
}

#[test]
fn pixmap_roundtrip_binary() {
    let pm = pattern_pixmap(8, 6, 255);
    let encoded = pm.encode(Unstoppable).unwrap();
    assert!(encoded.starts_with(b"P6\n8 6\n255\n"));
    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded, Image::Pixmap(pm));
}

#[test]
fn pixmap_roundtrip_ascii_custom_max() {
    let mut pm = pattern_pixmap(5, 4, 31);
    pm.set_encoding(Encoding::Ascii);
    let encoded = pm.encode(Unstoppable).unwrap();
    assert!(encoded.starts_with(b"P3\n5 4\n31\n"));
    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded, Image::Pixmap(pm));
}

#[test]
fn p4_bit_packing_is_exact() {
    // Width 10, row 1010101011 → 0b10101010, 0b11000000 (6 padding zeros).
    let mut bm = Bitmap::new(10, 1).unwrap();
    for (x, &bit) in [true, false, true, false, true, false, true, false, true, true]
        .iter()
        .enumerate()
    {
        bm.set(x as i32, 0, bit);
    }
    let encoded = bm.encode(Unstoppable).unwrap();
    assert_eq!(&encoded[..8], b"P4\n10 1\n");
    assert_eq!(&encoded[8..], &[0b1010_1010, 0b1100_0000]);
}

#[test]
fn p4_padding_bits_ignored_on_read() {
    // Same row, but the padding bits of the final byte are all set.
    let data = b"P4\n10 1\n\xAA\xFF";
    let decoded = decode(data, Unstoppable).unwrap();
    let bm = decoded.as_bitmap().unwrap();
    assert!(bm.get(8, 0));
    assert!(bm.get(9, 0));
    // Re-encoding writes the padding as zero.
    let encoded = bm.encode(Unstoppable).unwrap();
    assert_eq!(&encoded[8..], &[0xAA, 0xC0]);
}

#[test]
fn header_is_rewritten_from_image_state() {
    let data = b"P2\n# a comment\n3 1\n9\n1 2 3\n";
    let mut image = decode(data, Unstoppable).unwrap();
    assert_eq!(image.magic(), "P2");

    image.set_encoding(Encoding::Binary);
    image.invert();
    let encoded = image.encode(Unstoppable).unwrap();
    assert!(encoded.starts_with(b"P5\n3 1\n9\n"));
    assert_eq!(&encoded[b"P5\n3 1\n9\n".len()..], &[8, 7, 6]);
}

#[test]
fn rescaled_max_shows_up_in_header() {
    let mut gm = gradient_graymap(4, 2, 255);
    gm.set_max_value(100).unwrap();
    let encoded = gm.encode(Unstoppable).unwrap();
    assert!(encoded.starts_with(b"P5\n4 2\n100\n"));
}

#[test]
fn image_info_probe() {
    let pm = pattern_pixmap(3, 2, 200);
    let encoded = pm.encode(Unstoppable).unwrap();
    let info = ImageInfo::from_bytes(&encoded).unwrap();
    assert_eq!(info.width, 3);
    assert_eq!(info.height, 2);
    assert_eq!(info.kind, PnmKind::Pixmap);
    assert_eq!(info.encoding, Encoding::Binary);
    assert_eq!(info.max_value, 200);
}

#[test]
fn bitmap_probe_reports_max_one() {
    let info = ImageInfo::from_bytes(b"P1\n2 2\n0 1 1 0\n").unwrap();
    assert_eq!(info.kind, PnmKind::Bitmap);
    assert_eq!(info.max_value, 1);
}

#[test]
fn limits_reject_large() {
    let gm = gradient_graymap(4, 4, 255);
    let encoded = gm.encode(Unstoppable).unwrap();

    let limits = Limits {
        max_pixels: Some(1),
        ..Default::default()
    };
    let result = DecodeRequest::new(&encoded)
        .with_limits(&limits)
        .decode(Unstoppable);
    match result.unwrap_err() {
        PnmError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[test]
fn limits_pass_small() {
    let gm = gradient_graymap(4, 4, 255);
    let encoded = gm.encode(Unstoppable).unwrap();

    let limits = Limits {
        max_width: Some(64),
        max_height: Some(64),
        max_pixels: Some(4096),
        max_memory_bytes: Some(1 << 20),
    };
    let decoded = DecodeRequest::new(&encoded)
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(decoded, Image::Graymap(gm));
}

#[test]
fn free_encode_matches_method() {
    let image: Image = checker_bitmap(6, 4).into();
    assert_eq!(
        encode(&image, Unstoppable).unwrap(),
        image.encode(Unstoppable).unwrap()
    );
}
