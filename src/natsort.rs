use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

fn digit_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("static regex"))
}

fn is_decimal_digit(c: char) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^\d$").expect("static regex"));
    re.is_match(c.encode_utf8(&mut [0u8; 4]))
}

/// Unicode の10進数字（全角数字など）の値
///
/// 10進数字は 0〜9 が連続した区画に並ぶので、区画の先頭からの位置で値が決まる。
pub fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut code = c as u32;
    let mut offset = 0u32;
    while offset < 100 {
        let Some(prev) = code.checked_sub(1).and_then(char::from_u32) else {
            break;
        };
        if !is_decimal_digit(prev) {
            break;
        }
        code -= 1;
        offset += 1;
    }
    Some(offset % 10)
}

/// 10進数字を ASCII の数字に置き換える。それ以外の文字はそのまま
pub fn to_ascii_digits(s: &str) -> String {
    s.chars()
        .map(|c| match decimal_value(c) {
            Some(d) if !c.is_ascii_digit() => char::from_digit(d, 10).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// 数字列。先頭の 0 を除いた桁数 → 桁の辞書順で比較するので桁あふれしない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digits(String);

impl Digits {
    fn new(run: &str) -> Self {
        let ascii = to_ascii_digits(run);
        Digits(ascii.trim_start_matches('0').to_string())
    }
}

impl Ord for Digits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPart {
    Text(String),
    Number(Digits),
}

/// 自然順ソート用のキー
///
/// 文字列部分（小文字化）と数字部分が必ず `Text, Number, Text, ...` の順に交互に並ぶ。
/// 先頭・末尾の文字列部分は空になり得る。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<KeyPart>);

pub fn natural_sort_key(name: &str) -> NaturalKey {
    let mut parts = Vec::new();
    let mut last = 0;
    for m in digit_runs().find_iter(name) {
        parts.push(KeyPart::Text(name[last..m.start()].to_lowercase()));
        parts.push(KeyPart::Number(Digits::new(m.as_str())));
        last = m.end();
    }
    parts.push(KeyPart::Text(name[last..].to_lowercase()));
    NaturalKey(parts)
}

/// page_2 < page_10 となるように並べ替える
pub fn sort_naturally(names: &mut [String]) {
    names.sort_by_cached_key(|n| natural_sort_key(n));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numbers_compare_numerically() {
        assert!(natural_sort_key("p2.pdf") < natural_sort_key("p10.pdf"));
        assert!(natural_sort_key("page_9") < natural_sort_key("page_10"));
    }

    #[test]
    fn full_width_numbers_compare_numerically() {
        assert!(natural_sort_key("p２.pdf") < natural_sort_key("p１０.pdf"));
        assert_eq!(natural_sort_key("p１０.pdf"), natural_sort_key("p10.pdf"));
        assert!(natural_sort_key("p9.pdf") < natural_sort_key("p１０.pdf"));

        let mut names = vec!["p１０.pdf".to_string(), "p２.pdf".to_string()];
        sort_naturally(&mut names);
        assert_eq!(names, vec!["p２.pdf", "p１０.pdf"]);
    }

    #[test]
    fn decimal_values_of_unicode_digits() {
        assert_eq!(decimal_value('7'), Some(7));
        assert_eq!(decimal_value('０'), Some(0));
        assert_eq!(decimal_value('９'), Some(9));
        assert_eq!(decimal_value('٣'), Some(3));
        assert_eq!(decimal_value('²'), None);
        assert_eq!(decimal_value('a'), None);
        assert_eq!(to_ascii_digits("Ａ１２-3"), "Ａ12-3");
    }

    #[test]
    fn text_compares_case_insensitively() {
        assert_eq!(natural_sort_key("Scan.PDF"), natural_sort_key("scan.pdf"));
        assert!(natural_sort_key("Apple.pdf") < natural_sort_key("banana.pdf"));
    }

    #[test]
    fn leading_zeros_do_not_change_value() {
        assert_eq!(natural_sort_key("p007.pdf"), natural_sort_key("p7.pdf"));
        assert!(natural_sort_key("p007.pdf") < natural_sort_key("p10.pdf"));
    }

    #[test]
    fn very_long_digit_runs_do_not_overflow() {
        let small = "x99999999999999999999999999999999.pdf";
        let big = "x100000000000000000000000000000000.pdf";
        assert!(natural_sort_key(small) < natural_sort_key(big));
    }

    #[test]
    fn sorts_a_listing() {
        let mut names: Vec<String> = ["p10.pdf", "P1.pdf", "p2.pdf", "a.pdf"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_naturally(&mut names);
        assert_eq!(names, vec!["a.pdf", "P1.pdf", "p2.pdf", "p10.pdf"]);
    }

    proptest! {
        #[test]
        fn embedded_numbers_order_numerically(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let ka = natural_sort_key(&format!("scan_{a}.pdf"));
            let kb = natural_sort_key(&format!("scan_{b}.pdf"));
            prop_assert_eq!(ka.cmp(&kb), a.cmp(&b));
        }
    }
}
