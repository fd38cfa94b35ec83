//! Dotted version comparison.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*v?(\d+(?:\.\d+)*)").expect("VERSION_REGEX must compile")
});

/// Numeric components of the leading dotted version in `s`.
///
/// `"7.2.3-1ubuntu"` → `[7, 2, 3]`; `None` when `s` does not start with a
/// number.
pub fn version_parts(s: &str) -> Option<Vec<u64>> {
    let caps = VERSION_REGEX.captures(s)?;
    Some(
        caps[1]
            .split('.')
            .map(|part| part.parse().unwrap_or(u64::MAX))
            .collect(),
    )
}

/// Recommended versions are written like `7.1.x`; the `x` stands for zero.
pub fn minimum_version(recommended: &str) -> Option<Vec<u64>> {
    version_parts(&recommended.replace('x', "0"))
}

/// Compare component-wise, missing components counting as zero.
pub fn compare_parts(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let l = a.get(i).copied().unwrap_or(0);
        let r = b.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_leading_version() {
        assert_eq!(version_parts("7.2.3-1ubuntu"), Some(vec![7, 2, 3]));
        assert_eq!(version_parts("v8.1"), Some(vec![8, 1]));
        assert_eq!(version_parts("unknown"), None);
    }

    #[test]
    fn x_means_zero() {
        assert_eq!(minimum_version("7.1.x, 7.2.x (dev)"), Some(vec![7, 1, 0]));
    }

    #[test]
    fn missing_components_are_zero() {
        assert_eq!(compare_parts(&[7, 1], &[7, 1, 0]), Ordering::Equal);
        assert_eq!(compare_parts(&[7, 1, 5], &[7, 1, 0]), Ordering::Greater);
        assert_eq!(compare_parts(&[7, 0, 9], &[7, 1, 0]), Ordering::Less);
        assert_eq!(compare_parts(&[10], &[9, 9]), Ordering::Greater);
    }
}
