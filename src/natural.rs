use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+|\D+").unwrap());

/// Natural string order: digit runs compare by numeric value, everything
/// else case-insensitively, so `"2" < "10"` and `"1.2" < "1.10"`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = TOKEN_RE.find_iter(a);
    let mut right = TOKEN_RE.find_iter(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = compare_tokens(l.as_str(), r.as_str());
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn compare_tokens(l: &str, r: &str) -> Ordering {
    let l_digits = l.as_bytes()[0].is_ascii_digit();
    let r_digits = r.as_bytes()[0].is_ascii_digit();
    match (l_digits, r_digits) {
        (true, true) => {
            let l_trim = l.trim_start_matches('0');
            let r_trim = r.trim_start_matches('0');
            l_trim
                .len()
                .cmp(&r_trim.len())
                .then_with(|| l_trim.cmp(r_trim))
        }
        // Digits sort ahead of punctuation and letters.
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => l.to_lowercase().cmp(&r.to_lowercase()),
    }
}

/// Number of dot-separated segments, ignoring a leading `-`.
pub fn level_of(label: &str) -> usize {
    label.strip_prefix('-').unwrap_or(label).split('.').count()
}

/// Pads `label` with `.0` segments up to `max_level + 1` segments so leaves
/// at shallow levels sort against deeper siblings of the same ancestor.
pub fn virtual_key(label: &str, max_level: usize) -> String {
    let (sign, base) = match label.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", label),
    };
    let mut key = String::with_capacity(base.len() + 2 * (max_level + 1));
    key.push_str(sign);
    key.push_str(base);
    for _ in level_of(base)..=max_level {
        key.push_str(".0");
    }
    key
}
