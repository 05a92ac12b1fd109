use super::*;

#[test]
fn write_then_read_preserves_names_order_and_dirs() {
    let entries = vec![
        ArchiveEntry::dir("frames/"),
        ArchiveEntry::file("frames/b 10.png", vec![1, 2, 3]),
        ArchiveEntry::file("frames/b 2.png", vec![4]),
        ArchiveEntry::file("readme.txt", b"hello".to_vec()),
    ];
    let bytes = write_archive(&entries).unwrap();
    let back = read_archive(&bytes).unwrap();
    assert_eq!(back, entries);
}

#[test]
fn entry_kind_ignores_directories() {
    assert_eq!(
        ArchiveEntry::file("x.PNG", Vec::new()).kind(),
        Some(ImageKind::Png)
    );
    assert_eq!(ArchiveEntry::dir("x.png/").kind(), None);
    assert_eq!(ArchiveEntry::file("x.gif", Vec::new()).kind(), None);
}

#[test]
fn malformed_archive_is_input_error() {
    let err = read_archive(b"PK\x03\x04 definitely not a zip").unwrap_err();
    assert!(matches!(err, LottieSeqError::Input(_)));
    assert!(err.to_string().contains("malformed archive"));
}

#[test]
fn identical_entries_produce_identical_archives() {
    let entries = vec![ArchiveEntry::file("a.png", vec![7; 32])];
    assert_eq!(
        write_archive(&entries).unwrap(),
        write_archive(&entries).unwrap()
    );
}

#[test]
fn damaged_member_is_kept_with_its_read_error() {
    let entries = vec![
        ArchiveEntry::file("a.png", vec![1; 16]),
        ArchiveEntry::file("b.png", (0..64).collect()),
        ArchiveEntry::file("c.png", vec![3; 16]),
    ];
    let bytes = archive_with_corrupt_entry(&entries, "b.png");

    let back = read_archive(&bytes).unwrap();
    let names: Vec<&str> = back.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    assert_eq!(back[0], entries[0]);
    assert_eq!(back[2], entries[2]);

    assert!(back[1].read_error.is_some());
    let err = back[1].contents().unwrap_err();
    assert!(matches!(err, LottieSeqError::Input(_)));
    assert!(err.to_string().contains("b.png"));
}

#[test]
fn unreadable_entries_cannot_be_written() {
    let err = write_archive(&[ArchiveEntry::unreadable("x.png", "bad crc")]).unwrap_err();
    assert!(matches!(err, LottieSeqError::Input(_)));
}
