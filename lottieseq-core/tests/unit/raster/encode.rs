use super::*;
use crate::raster::{decode::decode_image, kind::with_extension};

fn checker(name: &str, width: u32, height: u32) -> DecodedImage {
    let mut px = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = if (x + y) % 2 == 0 { 240 } else { 16 };
            px.extend_from_slice(&[v, v / 2, 255 - v, 200]);
        }
    }
    DecodedImage::new(name, width, height, px).unwrap()
}

#[test]
fn png_and_webp_are_lossless() {
    let img = checker("c.png", 4, 3);
    for kind in [ImageKind::Png, ImageKind::Webp] {
        let bytes = encode_image(&img, kind).unwrap();
        let back = decode_image("c", &bytes).unwrap();
        assert_eq!(back.dimensions(), (4, 3), "{kind}");
        assert_eq!(back.pixels(), img.pixels(), "{kind}");
    }
}

#[test]
fn jpeg_drops_alpha_and_keeps_size() {
    let img = checker("c.jpg", 8, 8);
    let bytes = encode_image(&img, ImageKind::Jpeg).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let back = decode_image("c", &bytes).unwrap();
    assert_eq!(back.dimensions(), (8, 8));
    assert!(back.pixels().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn downsample_scales_and_floors_to_one_pixel() {
    let img = checker("c.png", 10, 4);
    assert_eq!(downsample(&img, 50).unwrap().dimensions(), (5, 2));
    assert_eq!(downsample(&img, 1).unwrap().dimensions(), (1, 1));
    assert_eq!(downsample(&img, 100).unwrap(), img);
    assert_eq!(downsample(&img, 500).unwrap(), img);
    assert_eq!(downsample(&img, 0).unwrap().dimensions(), (1, 1));
}

#[test]
fn kinds_resolve_from_names_case_insensitively() {
    assert_eq!(ImageKind::from_name("a/B.PNG"), Some(ImageKind::Png));
    assert_eq!(ImageKind::from_name("x.JpEg"), Some(ImageKind::Jpeg));
    assert_eq!(ImageKind::from_name("x.jpg"), Some(ImageKind::Jpeg));
    assert_eq!(ImageKind::from_name("x.webp"), Some(ImageKind::Webp));
    assert_eq!(ImageKind::from_name("notes.txt"), None);
    assert_eq!(ImageKind::from_name("dir.png/"), None);
    assert_eq!(ImageKind::from_name(".png"), None);
}

#[test]
fn with_extension_replaces_only_final_extension() {
    assert_eq!(with_extension("a.png.bak.png", "webp"), "a.png.bak.webp");
    assert_eq!(with_extension("seq/frame_01.PNG", "webp"), "seq/frame_01.webp");
    assert_eq!(with_extension("v1.2/frame", "webp"), "v1.2/frame.webp");
}
