//! Side-by-side comparison selection.

use crate::defaults::COMPARISON_CAPACITY;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    Duplicate(String),
    Capacity { capacity: usize },
}

impl fmt::Display for ComparisonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonError::Duplicate(name) => {
                write!(f, "{} is already in the comparison", name)
            }
            ComparisonError::Capacity { capacity } => {
                write!(f, "Maximum {} players can be compared at once", capacity)
            }
        }
    }
}

impl std::error::Error for ComparisonError {}

/// Insertion-ordered, duplicate-free list of player names with a fixed
/// capacity. It does not look names up; callers only add resolvable names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComparisonSet {
    names: Vec<String>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str) -> Result<(), ComparisonError> {
        if self.contains(name) {
            return Err(ComparisonError::Duplicate(name.to_string()));
        }
        if self.is_full() {
            return Err(ComparisonError::Capacity {
                capacity: COMPARISON_CAPACITY,
            });
        }
        self.names.push(name.to_string());
        Ok(())
    }

    /// Returns whether `name` was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_full(&self) -> bool {
        self.names.len() >= COMPARISON_CAPACITY
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> ComparisonSet {
        let mut set = ComparisonSet::new();
        for name in ["a", "b", "c"] {
            set.add(name).unwrap();
        }
        set
    }

    #[test]
    fn keeps_insertion_order() {
        assert_eq!(full().names(), ["a", "b", "c"]);
    }

    #[test]
    fn fourth_name_is_rejected() {
        let mut set = full();
        assert_eq!(set.add("d"), Err(ComparisonError::Capacity { capacity: 3 }));
        assert_eq!(set, full());
    }

    #[test]
    fn duplicate_is_rejected_before_capacity() {
        let mut set = full();
        assert_eq!(set.add("b"), Err(ComparisonError::Duplicate("b".to_string())));
        assert_eq!(set.names(), ["a", "b", "c"]);

        let mut partial = ComparisonSet::new();
        partial.add("a").unwrap();
        assert!(partial.add("a").is_err());
        assert_eq!(partial.len(), 1);
    }

    #[test]
    fn remove_is_a_noop_for_unknown_names() {
        let mut set = full();
        assert!(!set.remove("zzz"));
        assert!(set.remove("b"));
        assert_eq!(set.names(), ["a", "c"]);
        set.add("d").unwrap();
        assert_eq!(set.names(), ["a", "c", "d"]);
    }

    #[test]
    fn clear_then_refill() {
        let mut set = full();
        set.clear();
        assert!(set.is_empty());
        for name in ["x", "y", "z"] {
            assert!(set.add(name).is_ok());
        }
        assert!(set.is_full());
    }

    #[test]
    fn errors_read_well() {
        assert_eq!(
            ComparisonError::Capacity { capacity: 3 }.to_string(),
            "Maximum 3 players can be compared at once"
        );
    }
}
