use super::*;

fn doc(frames: u64) -> LottieDocument {
    let mut assets = Vec::new();
    let mut layers = Vec::new();
    for i in 0..frames {
        let id = format!("image_{i}");
        assets.push(ImageAsset::embedded(
            id.clone(),
            2,
            2,
            "data:image/png;base64,AA==".to_string(),
        ));
        layers.push(ImageLayer::single_frame(i, format!("{i}.png"), id, 2, 2));
    }
    LottieDocument {
        version: LOTTIE_VERSION.to_string(),
        frame_rate: 24,
        in_point: 0,
        out_point: frames,
        width: 2,
        height: 2,
        name: DEFAULT_DOCUMENT_NAME.to_string(),
        ddd: 0,
        assets,
        layers,
        markers: Vec::new(),
    }
}

#[test]
fn well_formed_document_validates() {
    let d = doc(3);
    d.validate().unwrap();
    assert_eq!(d.frame_count(), 3);
    assert_eq!(d.layer_window(2), Some(FrameRange::single(FrameIndex(2))));
    assert_eq!(d.layer_at(FrameIndex(1)).map(|l| l.name.as_str()), Some("1.png"));
    assert!(d.layer_at(FrameIndex(3)).is_none());
    assert!(d.asset("image_2").is_some());
}

#[test]
fn count_mismatch_is_rejected() {
    let mut d = doc(3);
    d.out_point = 4;
    assert!(matches!(d.validate(), Err(LottieSeqError::Validation(_))));
}

#[test]
fn gap_in_windows_is_rejected() {
    let mut d = doc(3);
    d.layers[1].in_point = 2;
    d.layers[1].out_point = 3;
    let err = d.validate().unwrap_err();
    assert!(err.to_string().contains("layer #1 window"));
}

#[test]
fn shared_or_dangling_asset_references_are_rejected() {
    let mut d = doc(2);
    d.layers[1].ref_id = "image_0".to_string();
    assert!(d.validate().unwrap_err().to_string().contains("referenced by"));

    let mut d = doc(2);
    d.layers[0].ref_id = "missing".to_string();
    assert!(d.validate().unwrap_err().to_string().contains("unknown asset"));

    let mut d = doc(2);
    d.assets[1].id = "image_0".to_string();
    assert!(d.validate().unwrap_err().to_string().contains("duplicate asset id"));
}

#[test]
fn external_asset_paths_are_rejected() {
    let mut d = doc(1);
    d.assets[0].path = "images/img_0.png".to_string();
    d.assets[0].embedded = 0;
    assert!(d.validate().unwrap_err().to_string().contains("data URI"));
}

#[test]
fn json_roundtrip_and_invalid_json() {
    let d = doc(2);
    let json = d.to_json_string(true).unwrap();
    assert_eq!(LottieDocument::from_json_str(&json).unwrap(), d);

    let err = LottieDocument::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, LottieSeqError::Serde(_)));
    assert!(err.to_string().contains("invalid Lottie animation JSON"));
}

#[test]
fn from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("animation.json");
    std::fs::write(&path, doc(1).to_json_string(false).unwrap()).unwrap();
    assert_eq!(LottieDocument::from_path(&path).unwrap().frame_count(), 1);
}
