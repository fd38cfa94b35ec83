//! Error-reporting bitmask names.

/// Every error level set.
pub const E_ALL: i64 = 32767;
pub const E_NOTICE: i64 = 8;

/// The recommended level, written the way it appears in the catalog.
pub const RECOMMENDED_LEVEL: &str = "E_ALL & ~E_NOTICE";

const LEVELS: &[(i64, &str)] = &[
    (1, "E_ERROR"),
    (2, "E_WARNING"),
    (4, "E_PARSE"),
    (8, "E_NOTICE"),
    (16, "E_CORE_ERROR"),
    (32, "E_CORE_WARNING"),
    (64, "E_COMPILE_ERROR"),
    (128, "E_COMPILE_WARNING"),
    (256, "E_USER_ERROR"),
    (512, "E_USER_WARNING"),
    (1024, "E_USER_NOTICE"),
    (2048, "E_STRICT"),
    (4096, "E_RECOVERABLE_ERROR"),
    (8192, "E_DEPRECATED"),
    (16384, "E_USER_DEPRECATED"),
];

/// Symbolic names of the levels set in `mask`.
///
/// A mask with every level set is named `E_ALL` alone.
pub fn level_names(mask: i64) -> Vec<&'static str> {
    if mask & E_ALL == E_ALL {
        return vec!["E_ALL"];
    }
    LEVELS
        .iter()
        .filter(|(bit, _)| mask & bit == *bit)
        .map(|(_, name)| *name)
        .collect()
}

/// `"E_WARNING | E_ERROR (3)"` style rendering of a mask.
pub fn describe(mask: i64, raw: &str) -> String {
    let names = level_names(mask);
    if names.is_empty() {
        format!("({})", raw)
    } else {
        format!("{} ({})", names.join(" | "), raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_levels_collapse_to_e_all() {
        assert_eq!(level_names(E_ALL), vec!["E_ALL"]);
    }

    #[test]
    fn recommended_mask_value() {
        assert_eq!(E_ALL & !E_NOTICE, 32759);
        let names = level_names(32759);
        assert_eq!(names.len(), 14);
        assert!(!names.contains(&"E_NOTICE"));
    }

    #[test]
    fn describe_lists_set_levels() {
        assert_eq!(describe(3, "3"), "E_ERROR | E_WARNING (3)");
        assert_eq!(describe(0, "0"), "(0)");
    }
}
