//! Lenient version comparison for picker floors.
//!
//! Registry version lists mix plain releases with pre-release tags
//! (`2.0.0-beta.1`) and occasional garbage. The pickers only need a floor
//! check, so this compares the leading dotted numeric components and treats
//! anything unparsable as below every floor.

/// Numeric components of a version string, pre-release suffix stripped.
fn numeric_parts(version: &str) -> Option<Vec<u64>> {
    let core = version
        .trim()
        .trim_start_matches('v')
        .split(['-', '+'])
        .next()?;
    core.split('.').map(|part| part.parse().ok()).collect()
}

/// Whether `version` is at or above `floor`.
///
/// Pre-release suffixes are ignored: `3.2.0-beta.1` passes a `3.2.0` floor.
pub fn at_least(version: &str, floor: &str) -> bool {
    let (Some(version), Some(floor)) = (numeric_parts(version), numeric_parts(floor)) else {
        return false;
    };

    for i in 0..version.len().max(floor.len()) {
        let v = version.get(i).copied().unwrap_or(0);
        let f = floor.get(i).copied().unwrap_or(0);
        if v != f {
            return v > f;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ordering() {
        assert!(at_least("3.2.0", "3.2.0"));
        assert!(at_least("3.2.1", "3.2.0"));
        assert!(at_least("3.10.0", "3.2.0"));
        assert!(!at_least("3.1.9", "3.2.0"));
        assert!(!at_least("2.7.16", "3.2.0"));
    }

    #[test]
    fn test_uneven_lengths() {
        assert!(at_least("3.3", "3.2.0"));
        assert!(!at_least("3", "3.2.0"));
    }

    #[test]
    fn test_prerelease_and_prefix() {
        assert!(at_least("3.2.0-beta.1", "3.2.0"));
        assert!(at_least("v3.4.0", "3.2.0"));
        assert!(at_least("2.0.0+build.5", "2.0.0"));
    }

    #[test]
    fn test_garbage_excluded() {
        assert!(!at_least("latest", "3.2.0"));
        assert!(!at_least("", "3.2.0"));
        assert!(!at_least("3.x", "3.2.0"));
    }
}
