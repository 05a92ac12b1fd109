use super::*;

fn sorted(names: &[&str]) -> Vec<String> {
    let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    v.sort_by(|a, b| natural_cmp(a, b));
    v
}

#[test]
fn digit_runs_compare_numerically() {
    assert_eq!(
        sorted(&["f2.png", "f10.png", "f1.png"]),
        vec!["f1.png", "f2.png", "f10.png"]
    );
    assert_eq!(
        sorted(&["img10.png", "img2.png", "img100.png", "img9.png"]),
        vec!["img2.png", "img9.png", "img10.png", "img100.png"]
    );
}

#[test]
fn letters_compare_case_insensitively() {
    assert_eq!(natural_cmp("Apple.png", "banana.png"), Ordering::Less);
    assert_eq!(natural_cmp("apple.png", "Banana.png"), Ordering::Less);
    assert_eq!(
        sorted(&["B2.png", "a10.png", "A3.png"]),
        vec!["A3.png", "a10.png", "B2.png"]
    );
}

#[test]
fn ties_fall_back_to_byte_order() {
    assert_eq!(natural_cmp("F1.png", "f1.png"), Ordering::Less);
    assert_eq!(natural_cmp("f01.png", "f1.png"), Ordering::Less);
    assert_eq!(natural_cmp("f1.png", "f1.png"), Ordering::Equal);
}

#[test]
fn long_digit_runs_do_not_overflow() {
    let small = "frame_99999999999999999999999.png";
    let big = "frame_100000000000000000000000.png";
    assert_eq!(natural_cmp(small, big), Ordering::Less);
}

#[test]
fn prefixes_sort_first_and_paths_participate() {
    assert_eq!(natural_cmp("frame", "frame1"), Ordering::Less);
    assert_eq!(
        sorted(&["seq2/f1.png", "seq10/f1.png", "seq2/f10.png"]),
        vec!["seq2/f1.png", "seq2/f10.png", "seq10/f1.png"]
    );
}
