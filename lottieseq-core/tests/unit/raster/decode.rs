use std::io::Cursor;

use super::*;

fn png_bytes(rgba: Vec<u8>, width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let bytes = png_bytes(vec![100, 50, 200, 128], 1, 1);
    let img = decode_image("px.png", &bytes).unwrap();
    assert_eq!(img.name(), "px.png");
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(img.pixels(), &[100, 50, 200, 128]);
}

#[test]
fn decode_garbage_is_decode_error_naming_entry() {
    let err = decode_image("broken.png", b"not an image").unwrap_err();
    assert!(matches!(err, LottieSeqError::Decode(_)));
    assert!(err.to_string().contains("broken.png"));
}

#[test]
fn decode_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("f.png");
    std::fs::write(&path, png_bytes(vec![1, 2, 3, 255, 4, 5, 6, 255], 2, 1)).unwrap();

    let img = decode_file("frames/f.png", &path).unwrap();
    assert_eq!(img.name(), "frames/f.png");
    assert_eq!(img.dimensions(), (2, 1));
}

#[test]
fn decode_missing_file_is_other_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = decode_file("gone.png", &dir.path().join("gone.png")).unwrap_err();
    assert!(matches!(err, LottieSeqError::Other(_)));
}
