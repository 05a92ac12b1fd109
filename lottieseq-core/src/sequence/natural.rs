use std::{cmp::Ordering, iter::Peekable, str::Chars};

/// Natural (numeric-aware) ordering of file names.
///
/// Runs of ASCII digits compare by numeric value, so `img2.png < img10.png`. Everything
/// else compares case-insensitively. Names that are equal under those rules fall back to
/// byte order, which keeps the ordering total and deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_cmp_folded(a, b).then_with(|| a.as_bytes().cmp(b.as_bytes()))
}

fn natural_cmp_folded(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        let (x, y) = match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => (x, y),
        };

        if x.is_ascii_digit() && y.is_ascii_digit() {
            let xs = take_digits(&mut ai);
            let ys = take_digits(&mut bi);
            let ord = cmp_digit_runs(&xs, &ys);
            if ord != Ordering::Equal {
                return ord;
            }
            continue;
        }

        let ord = fold(x).cmp(&fold(y));
        if ord != Ordering::Equal {
            return ord;
        }
        ai.next();
        bi.next();
    }
}

fn take_digits(it: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = it.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

// Arbitrary-length numeric comparison on decimal strings.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/natural.rs"]
mod tests;
