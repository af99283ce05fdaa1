use serde::{Deserialize, Serialize};

/// The latest known value of one data source, and whether it came from this cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reading<T> {
    /// Fetched successfully this cycle.
    Fresh(T),
    /// This cycle's fetch failed; the value is carried over from an earlier one.
    Stale(T),
    /// Never fetched successfully.
    Absent,
}

impl<T> Default for Reading<T> {
    fn default() -> Self {
        Reading::Absent
    }
}

impl<T> Reading<T> {
    /// Moves to the next cycle: a new value replaces whatever was held,
    /// a failed fetch keeps the old value but marks it stale.
    pub fn advance(self, fetched: Option<T>) -> Self {
        match (fetched, self) {
            (Some(value), _) => Reading::Fresh(value),
            (None, Reading::Fresh(old) | Reading::Stale(old)) => Reading::Stale(old),
            (None, Reading::Absent) => Reading::Absent,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Reading::Fresh(value) | Reading::Stale(value) => Some(value),
            Reading::Absent => None,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, Reading::Fresh(_))
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Reading::Stale(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_always_yields_fresh() {
        assert_eq!(Reading::Absent.advance(Some(1)), Reading::Fresh(1));
        assert_eq!(Reading::Stale(1).advance(Some(2)), Reading::Fresh(2));
        assert_eq!(Reading::Fresh(1).advance(Some(2)), Reading::Fresh(2));
    }

    #[test]
    fn failure_keeps_previous_value_as_stale() {
        assert_eq!(Reading::Fresh(1).advance(None), Reading::Stale(1));
        assert_eq!(Reading::Stale(1).advance(None), Reading::Stale(1));
        assert_eq!(Reading::<i32>::Absent.advance(None), Reading::Absent);
    }

    #[test]
    fn value_is_visible_unless_absent() {
        assert_eq!(Reading::Fresh(3).value(), Some(&3));
        assert_eq!(Reading::Stale(3).value(), Some(&3));
        assert_eq!(Reading::<i32>::Absent.value(), None);
        assert!(Reading::Stale(3).is_stale());
        assert!(!Reading::<i32>::Absent.is_stale());
    }
}
