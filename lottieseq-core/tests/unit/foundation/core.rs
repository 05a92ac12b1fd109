use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn single_frame_window_is_one_frame_long() {
    let r = FrameRange::single(FrameIndex(7));
    assert_eq!(r.start, FrameIndex(7));
    assert_eq!(r.end, FrameIndex(8));
    assert_eq!(r.len_frames(), 1);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(2)).is_err());
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap().is_empty());
}

#[test]
fn fps_rejects_zero_and_clamps_boundary_values() {
    assert!(Fps::new(0).is_err());
    assert_eq!(Fps::new(30).unwrap().get(), 30);
    assert_eq!(Fps::clamped(0).get(), 1);
    assert_eq!(Fps::clamped(-12).get(), 1);
    assert_eq!(Fps::clamped(240).get(), 60);
    assert_eq!(Fps::clamped(24).get(), 24);
}

#[test]
fn fps_parse_clamped_accepts_padded_integers() {
    assert_eq!(Fps::parse_clamped(" 12 ").unwrap().get(), 12);
    assert_eq!(Fps::parse_clamped("120").unwrap().get(), 60);
    assert!(matches!(
        Fps::parse_clamped("fast"),
        Err(LottieSeqError::Parameter(_))
    ));
}

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(24).unwrap();
    let secs = fps.frames_to_secs(123);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
    assert_eq!(fps.secs_to_frames_floor(-1.0), 0);
}
