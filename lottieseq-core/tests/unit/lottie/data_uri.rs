use super::*;

#[test]
fn encode_uses_kind_mime() {
    assert_eq!(
        encode_data_uri(ImageKind::Png, b"abc"),
        "data:image/png;base64,YWJj"
    );
    assert!(encode_data_uri(ImageKind::Webp, b"").starts_with("data:image/webp;base64,"));
}

#[test]
fn decode_splits_mime_and_payload() {
    let (mime, bytes) = decode_data_uri("data:image/jpeg;base64,YWJj").unwrap();
    assert_eq!(mime, "image/jpeg");
    assert_eq!(bytes, b"abc");
}

#[test]
fn decode_rejects_non_base64_forms() {
    assert!(decode_data_uri("images/img_0.png").is_err());
    assert!(decode_data_uri("data:image/png;base64").is_err());
    assert!(decode_data_uri("data:text/plain,hello").is_err());
    assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
}
