//! Origin allow-list.
//!
//! # Design Decisions
//! - Exact string match only; no patterns, no case folding
//! - Insertion order preserved for logging, duplicates dropped
//! - Immutable after construction (shared via Arc without locks)

/// Ordered set of fully-qualified origins permitted to receive a
/// non-wildcard CORS grant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    origins: Vec<String>,
}

impl AllowList {
    /// Build an allow-list, keeping the first occurrence of each origin.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for origin in origins {
            let origin = origin.into();
            if !list.contains(&origin) {
                list.push(origin);
            }
        }
        Self { origins: list }
    }

    /// Returns true if `origin` is an exact member.
    pub fn contains(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}
