//! Runtime settings from `.env` / environment.
//!
//! | variable            | default   | meaning                                  |
//! |---------------------|-----------|------------------------------------------|
//! | `RTK_CURRENCY`      | `€`       | currency symbol used in ROI output       |
//! | `RTK_SOLUTIONS_CSV` | (unset)   | catalog CSV used when `--file` is absent |
//! | `RTK_DEBUG_DIR`     | `debug`   | where debug bundles are written          |

use std::path::PathBuf;

pub const DEFAULT_CURRENCY: &str = "€";
pub const DEFAULT_DEBUG_DIR: &str = "debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub currency: String,
    pub solutions_csv: Option<PathBuf>,
    pub debug_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            solutions_csv: None,
            debug_dir: PathBuf::from(DEFAULT_DEBUG_DIR),
        }
    }
}

impl Settings {
    /// Load `.env` (if present), then read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            currency: get("RTK_CURRENCY").unwrap_or(defaults.currency),
            solutions_csv: get("RTK_SOLUTIONS_CSV").map(PathBuf::from),
            debug_dir: get("RTK_DEBUG_DIR").map(PathBuf::from).unwrap_or(defaults.debug_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_when_unset_or_blank() {
        let env: HashMap<&str, &str> = HashMap::from([("RTK_CURRENCY", "  ")]);
        let settings = Settings::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn reads_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("RTK_CURRENCY", "$"),
            ("RTK_SOLUTIONS_CSV", "data/solutions.csv"),
            ("RTK_DEBUG_DIR", "/tmp/rtk"),
        ]);
        let settings = Settings::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(settings.currency, "$");
        assert_eq!(settings.solutions_csv, Some(PathBuf::from("data/solutions.csv")));
        assert_eq!(settings.debug_dir, PathBuf::from("/tmp/rtk"));
    }
}
