use super::*;
use crate::batch::runner::BatchOptions;

fn png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = DecodedImage::from_rgba(
        "src.png",
        image::RgbaImage::from_pixel(w, h, image::Rgba(rgba)),
    );
    encode_image(&img, ImageKind::Png).unwrap()
}

fn zip(entries: Vec<ArchiveEntry>) -> Vec<u8> {
    crate::archive::container::write_archive(&entries).unwrap()
}

fn brighter() -> AdjustmentParameters {
    AdjustmentParameters {
        exposure: 0.2,
        ..AdjustmentParameters::default()
    }
}

#[test]
fn one_undecodable_entry_is_contained() {
    let archive = zip(vec![
        ArchiveEntry::file("a.png", png(2, 2, [10, 20, 30, 255])),
        ArchiveEntry::file("b.png", b"not a png".to_vec()),
        ArchiveEntry::file("c.png", png(2, 2, [90, 80, 70, 255])),
    ]);

    let out = process_archive(
        &archive,
        &brighter(),
        &BatchRunner::sequential(),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(out.report.succeeded, vec!["a.png", "c.png"]);
    assert_eq!(out.report.failures.len(), 1);
    assert_eq!(out.report.failures[0].name, "b.png");
    assert!(out.report.failures[0].reason.contains("b.png"));

    let written = read_archive(&out.archive).unwrap();
    let names: Vec<&str> = written.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "c.png"]);
}

#[test]
fn damaged_member_does_not_abort_the_batch() {
    let entries = vec![
        ArchiveEntry::file("a.png", png(2, 2, [10, 20, 30, 255])),
        ArchiveEntry::file("b.png", png(3, 3, [40, 50, 60, 255])),
        ArchiveEntry::file("c.png", png(2, 2, [90, 80, 70, 255])),
    ];
    let archive = crate::archive::container::archive_with_corrupt_entry(&entries, "b.png");

    let out = process_archive(
        &archive,
        &brighter(),
        &BatchRunner::sequential(),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(out.report.succeeded, vec!["a.png", "c.png"]);
    assert_eq!(out.report.failures.len(), 1);
    assert_eq!(out.report.failures[0].name, "b.png");
    assert!(out.report.failures[0].reason.contains("unreadable"));

    let written = read_archive(&out.archive).unwrap();
    let names: Vec<&str> = written.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "c.png"]);
}

#[test]
fn outputs_keep_names_and_formats() {
    let archive = zip(vec![
        ArchiveEntry::dir("shots/"),
        ArchiveEntry::file("shots/10.png", png(3, 2, [0, 0, 0, 128])),
        ArchiveEntry::file("shots/2.webp", {
            let img = DecodedImage::from_rgba(
                "x.webp",
                image::RgbaImage::from_pixel(3, 2, image::Rgba([5, 5, 5, 255])),
            );
            encode_image(&img, ImageKind::Webp).unwrap()
        }),
        ArchiveEntry::file("notes.txt", b"skip me".to_vec()),
    ]);

    let runner = BatchRunner::new(&BatchOptions::default()).unwrap();
    let out = process_archive(&archive, &brighter(), &runner, &CancelToken::new()).unwrap();
    out.report.ensure_complete().unwrap();

    let written = read_archive(&out.archive).unwrap();
    let names: Vec<&str> = written.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["shots/2.webp", "shots/10.png"]);

    // lossless formats round-trip the adjusted pixels exactly
    let png_out = decode_image("shots/10.png", &written[1].bytes).unwrap();
    assert_eq!(&png_out.pixels()[..4], &[51, 51, 51, 128]);
    let webp_out = decode_image("shots/2.webp", &written[0].bytes).unwrap();
    assert_eq!(&webp_out.pixels()[..4], &[56, 56, 56, 255]);
}

#[test]
fn archive_without_images_is_input_error() {
    let archive = zip(vec![ArchiveEntry::file("readme.md", b"# hi".to_vec())]);
    let err = process_archive(
        &archive,
        &brighter(),
        &BatchRunner::sequential(),
        &CancelToken::new(),
    )
    .unwrap_err();
    assert!(matches!(err, LottieSeqError::Input(_)));
}

#[test]
fn preview_uses_first_image_in_natural_order() {
    let entries = vec![
        ArchiveEntry::file("f10.png", png(1, 1, [200, 200, 200, 255])),
        ArchiveEntry::file("F2.PNG", png(1, 1, [100, 100, 100, 255])),
        ArchiveEntry::file("a.txt", Vec::new()),
    ];
    let preview = preview_first(&entries, &brighter()).unwrap();
    assert_eq!(preview.name(), "F2.PNG");
    assert_eq!(preview.pixels(), &[151, 151, 151, 255]);
}

#[test]
fn preview_without_images_is_input_error() {
    let err = preview_first(&[ArchiveEntry::dir("empty/")], &brighter()).unwrap_err();
    assert!(matches!(err, LottieSeqError::Input(_)));
}
