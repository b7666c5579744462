//! Session-scoped unique names for units without a label in the file

/// Hands out names that are unique within one load session.
///
/// Names are `<prefix>_<n>` with `n` a monotonic counter starting at 1, so
/// uniqueness never depends on hashing or randomness.
#[derive(Debug, Clone, Default)]
pub struct UnitIdGenerator {
    last: u64,
}

impl UnitIdGenerator {
    /// Create a generator whose first id is 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id in the session
    #[inline]
    pub fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// Next name for the given prefix, e.g. `unknown_3`
    pub fn next_name(&mut self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.next_id())
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let mut ids = UnitIdGenerator::new();
        let names: HashSet<String> = (0..1000).map(|_| ids.next_name("unknown")).collect();
        assert_eq!(names.len(), 1000);
        assert_eq!(ids.issued(), 1000);
    }

    #[test]
    fn test_name_format() {
        let mut ids = UnitIdGenerator::new();
        assert_eq!(ids.next_name("comment"), "comment_1");
        assert_eq!(ids.next_name("unknown"), "unknown_2");
    }
}
