#![cfg(feature = "imgref")]

use pnmkit::{Graymap, Pixmap, Rgb};

#[test]
fn pixmap_to_imgvec_preserves_layout() {
    let mut pm = Pixmap::new(3, 2).unwrap();
    pm.set(0, 0, Rgb::new(1, 2, 3));
    pm.set(2, 1, Rgb::new(9, 8, 7));

    let img = pm.to_imgvec();
    assert_eq!(img.width(), 3);
    assert_eq!(img.height(), 2);
    assert_eq!(img[(0usize, 0usize)], rgb::RGB8::new(1, 2, 3));
    assert_eq!(img[(2usize, 1usize)], rgb::RGB8::new(9, 8, 7));
}

#[test]
fn graymap_to_imgvec_preserves_samples() {
    let mut gm = Graymap::new(2, 2).unwrap();
    gm.set(1, 0, 200);

    let img = gm.to_imgvec();
    assert_eq!(img.width(), 2);
    assert_eq!(img[(1usize, 0usize)], 200);
}

#[test]
fn rgb8_conversions_are_lossless() {
    let ours = Rgb::new(10, 20, 30);
    let theirs: rgb::RGB8 = ours.into();
    assert_eq!(Rgb::from(theirs), ours);
}
