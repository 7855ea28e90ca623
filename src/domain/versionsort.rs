//! Version-aware ordering of tag names
//!
//! Mirrors `git tag --sort=version:refname` with `versionsort.suffix`
//! configured: digit runs compare as numbers, so `v1.10.0` sorts after
//! `v1.2.0`, and a configured prerelease suffix such as `-RC` sorts before
//! the bare release with the same base.

use std::cmp::Ordering;

/// Prerelease suffixes recognised when none are configured, earliest first
pub const DEFAULT_PRERELEASE_SUFFIXES: [&str; 2] = ["-M", "-RC"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSort {
    suffixes: Vec<String>,
}

impl VersionSort {
    /// Create an ordering with the given prerelease suffixes.
    ///
    /// Suffixes are matched case-insensitively. Their order is significant:
    /// a suffix listed earlier sorts before one listed later.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VersionSort {
            suffixes: suffixes
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty())
                .collect(),
        }
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Compare two tag names
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let (base_a, suffix_a) = self.split(a);
        let (base_b, suffix_b) = self.split(b);

        natural_cmp(base_a, base_b)
            .then_with(|| match (suffix_a, suffix_b) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some((i, rest_a)), Some((j, rest_b))) => {
                    i.cmp(&j).then_with(|| natural_cmp(rest_a, rest_b))
                }
            })
            .then_with(|| a.cmp(b))
    }

    /// Sort tags ascending, oldest release first
    pub fn sort<S: AsRef<str>>(&self, tags: &mut [S]) {
        tags.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }

    /// Highest tag in version order
    pub fn latest<'a, S: AsRef<str>>(&self, tags: &'a [S]) -> Option<&'a str> {
        tags.iter()
            .map(|t| t.as_ref())
            .max_by(|a, b| self.compare(a, b))
    }

    /// Split a tag into its base and, when a configured suffix appears after
    /// the first digit, the suffix index and the text following it.
    fn split<'t>(&self, tag: &'t str) -> (&'t str, Option<(usize, &'t str)>) {
        let body = strip_v(tag);
        let lower = body.to_ascii_lowercase();

        let first_digit = match lower.find(|c: char| c.is_ascii_digit()) {
            Some(idx) => idx,
            None => return (body, None),
        };

        let mut found: Option<(usize, usize, usize)> = None;
        for (index, suffix) in self.suffixes.iter().enumerate() {
            let needle = suffix.to_ascii_lowercase();
            if let Some(offset) = lower[first_digit..].find(&needle) {
                let pos = first_digit + offset;
                let better = match found {
                    None => true,
                    Some((best_pos, _, best_len)) => {
                        pos < best_pos || (pos == best_pos && needle.len() > best_len)
                    }
                };
                if better {
                    found = Some((pos, index, needle.len()));
                }
            }
        }

        match found {
            Some((pos, index, len)) => (&body[..pos], Some((index, &body[pos + len..]))),
            None => (body, None),
        }
    }
}

impl Default for VersionSort {
    fn default() -> Self {
        VersionSort::new(DEFAULT_PRERELEASE_SUFFIXES)
    }
}

fn strip_v(tag: &str) -> &str {
    tag.strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag)
}

/// Alternating runs of ASCII digits and other characters
fn chunks(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut previous: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let digit = c.is_ascii_digit();
        if previous.is_some_and(|p| p != digit) {
            out.push(&text[start..i]);
            start = i;
        }
        previous = Some(digit);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

fn is_digit_run(chunk: &str) -> bool {
    chunk.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

fn compare_chunk(a: &str, b: &str) -> Ordering {
    match (is_digit_run(a), is_digit_run(b)) {
        // Compare by magnitude without parsing so arbitrarily long runs work
        (true, true) => {
            let a = a.trim_start_matches('0');
            let b = b.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        }
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (x, y) in left.iter().zip(right.iter()) {
        let ord = compare_chunk(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(tags: &[&str]) -> Vec<String> {
        let mut tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        VersionSort::default().sort(&mut tags);
        tags
    }

    #[test]
    fn test_numeric_not_lexical() {
        assert_eq!(
            sorted(&["v1.10.0", "v1.2.0", "v1.9.3"]),
            vec!["v1.2.0", "v1.9.3", "v1.10.0"]
        );
    }

    #[test]
    fn test_prerelease_before_release() {
        assert_eq!(
            sorted(&["v1.0.0", "v1.0.0-RC", "v0.9.0"]),
            vec!["v0.9.0", "v1.0.0-RC", "v1.0.0"]
        );
    }

    #[test]
    fn test_prerelease_suffix_order_and_iteration() {
        assert_eq!(
            sorted(&["1.0.0", "1.0.0-RC2", "1.0.0-M1", "1.0.0-RC10", "1.0.0-RC1"]),
            vec!["1.0.0-M1", "1.0.0-RC1", "1.0.0-RC2", "1.0.0-RC10", "1.0.0"]
        );
    }

    #[test]
    fn test_suffix_match_is_case_insensitive() {
        let sort = VersionSort::default();
        assert_eq!(sort.compare("v2.0.0-rc.1", "v2.0.0"), Ordering::Less);
    }

    #[test]
    fn test_unconfigured_suffix_sorts_after_release() {
        let sort = VersionSort::default();
        assert_eq!(sort.compare("1.0.0-beta", "1.0.0"), Ordering::Greater);

        let sort = VersionSort::new(["-beta"]);
        assert_eq!(sort.compare("1.0.0-beta", "1.0.0"), Ordering::Less);
    }

    #[test]
    fn test_prefix_is_ignored_with_raw_tie_break() {
        let sort = VersionSort::default();
        assert_eq!(sort.compare("v1.2.0", "1.10.0"), Ordering::Less);
        assert_ne!(sort.compare("v1.0.0", "1.0.0"), Ordering::Equal);
    }

    #[test]
    fn test_suffix_before_first_digit_is_ignored() {
        let sort = VersionSort::default();
        assert_eq!(sort.split("app-Mx-1.0"), ("app-Mx-1.0", None));
    }

    #[test]
    fn test_huge_numbers_compare() {
        let sort = VersionSort::default();
        assert_eq!(
            sort.compare("1.0.99999999999999999999999", "1.0.100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_latest() {
        let sort = VersionSort::default();
        let tags = ["v1.0.0", "v1.0.1", "v1.0.1-RC3"];
        assert_eq!(sort.latest(&tags), Some("v1.0.1"));

        let empty: [&str; 0] = [];
        assert_eq!(sort.latest(&empty), None);
    }
}
