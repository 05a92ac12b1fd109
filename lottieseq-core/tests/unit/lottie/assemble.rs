use super::*;
use crate::{lottie::data_uri::decode_data_uri, raster::decode::decode_image};

fn solid(name: &str, width: u32, height: u32, rgba: [u8; 4]) -> DecodedImage {
    let px = rgba.repeat((width * height) as usize);
    DecodedImage::new(name, width, height, px).unwrap()
}

fn frames(n: usize) -> Vec<DecodedImage> {
    (0..n)
        .map(|i| solid(&format!("f{i}.png"), 4, 2, [i as u8 * 20, 10, 200, 255]))
        .collect()
}

#[test]
fn cardinality_and_windows_match_input() {
    let images = frames(5);
    let doc = assemble(&images, Fps::new(12).unwrap()).unwrap();

    assert_eq!(doc.assets.len(), 5);
    assert_eq!(doc.layers.len(), 5);
    assert_eq!(doc.frame_count(), 5);
    assert_eq!(doc.frame_rate, 12);
    for (i, layer) in doc.layers.iter().enumerate() {
        assert_eq!(layer.in_point, i as u64);
        assert_eq!(layer.out_point, i as u64 + 1);
        assert_eq!(layer.start_time, i as u64);
        assert_eq!(layer.index, i as u64 + 1);
        assert_eq!(layer.ref_id, format!("image_{i}"));
        assert_eq!(layer.name, format!("f{i}.png"));
    }
    doc.validate().unwrap();
}

#[test]
fn identical_inputs_serialize_byte_identically() {
    let images = frames(3);
    let fps = Fps::new(24).unwrap();
    let a = assemble(&images, fps).unwrap().to_json_string(false).unwrap();
    let b = assemble(&images, fps).unwrap().to_json_string(false).unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_images_is_input_error() {
    let err = assemble(&[], Fps::new(24).unwrap()).unwrap_err();
    assert!(matches!(err, LottieSeqError::Input(_)));
}

#[test]
fn zero_sized_first_frame_is_input_error() {
    let images = vec![DecodedImage::new("e.png", 0, 0, Vec::new()).unwrap()];
    let err = assemble(&images, Fps::new(24).unwrap()).unwrap_err();
    assert!(matches!(err, LottieSeqError::Input(_)));
}

#[test]
fn canvas_follows_first_frame_and_layers_keep_native_size() {
    let images = vec![
        solid("a.png", 6, 4, [0, 0, 0, 255]),
        solid("b.png", 3, 9, [255, 255, 255, 255]),
    ];
    let doc = assemble(&images, Fps::new(30).unwrap()).unwrap();
    assert_eq!((doc.width, doc.height), (6, 4));
    assert_eq!((doc.assets[1].width, doc.assets[1].height), (3, 9));

    let ks = &doc.layers[1].transform;
    assert_eq!(ks.anchor.value, [1.5, 4.5, 0.0]);
    assert_eq!(ks.position.value, [1.5, 4.5, 0.0]);
    assert_eq!(ks.scale.value, [100.0, 100.0, 100.0]);
    assert_eq!(ks.opacity.value, 100.0);
    assert_eq!(ks.rotation.value, 0.0);
}

#[test]
fn embedded_payload_decodes_to_source_pixels() {
    let images = frames(2);
    for embed in [EmbedFormat::Png, EmbedFormat::WebpLossless] {
        let opts = AssembleOptions {
            embed,
            ..AssembleOptions::default()
        };
        let doc = assemble_with(&images, Fps::new(24).unwrap(), &opts).unwrap();
        let (mime, bytes) = decode_data_uri(&doc.assets[1].path).unwrap();
        assert_eq!(mime, embed.kind().mime());
        let back = decode_image("x", &bytes).unwrap();
        assert_eq!(back.pixels(), images[1].pixels());
    }
}

#[test]
fn wire_shape_uses_lottie_short_keys() {
    let doc = assemble(&frames(1), Fps::new(24).unwrap()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&doc.to_json_string(false).unwrap()).unwrap();

    assert_eq!(v["v"], "5.5.9");
    assert_eq!(v["fr"], 24);
    assert_eq!(v["ip"], 0);
    assert_eq!(v["op"], 1);
    assert_eq!(v["nm"], "Image Sequence Animation");
    assert_eq!(v["markers"], serde_json::json!([]));
    assert_eq!(v["assets"][0]["e"], 1);
    assert_eq!(v["assets"][0]["u"], "");
    assert_eq!(v["layers"][0]["ty"], 2);
    assert_eq!(v["layers"][0]["refId"], "image_0");
    assert_eq!(v["layers"][0]["ks"]["a"]["a"], 0);
    assert_eq!(v["layers"][0]["ks"]["a"]["k"], serde_json::json!([2.0, 1.0, 0.0]));
}
