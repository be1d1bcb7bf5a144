use crate::foundation::error::{ScrollyError, ScrollyResult};

/// Steps to run when the active step moves from `from` to `to`: every step after `from` up to and
/// including `to`, walking in the direction of travel. Empty when `from == to`.
pub fn scrolled_sections(from: usize, to: usize) -> Vec<usize> {
    if to >= from {
        (from + 1..=to).collect()
    } else {
        (to..from).rev().collect()
    }
}

/// Active-step tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollState {
    current: usize,
    count: usize,
}

impl ScrollState {
    /// Tracker over `count` steps, resting on step 0.
    pub fn new(count: usize) -> Self {
        Self { current: 0, count }
    }

    /// Active step.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of steps.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Make `to` active and return the steps crossed on the way.
    pub fn transition(&mut self, to: usize) -> ScrollyResult<Vec<usize>> {
        if to >= self.count {
            return Err(ScrollyError::validation(format!(
                "step index {to} out of range (0..{})",
                self.count
            )));
        }
        let crossed = scrolled_sections(self.current, to);
        self.current = to;
        Ok(crossed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_walk_in_travel_order() {
        assert_eq!(scrolled_sections(1, 4), [2, 3, 4]);
        assert_eq!(scrolled_sections(4, 1), [3, 2, 1]);
        assert_eq!(scrolled_sections(0, 1), [1]);
        assert_eq!(scrolled_sections(1, 0), [0]);
        assert!(scrolled_sections(2, 2).is_empty());
    }

    #[test]
    fn transition_updates_current_and_rejects_out_of_range() {
        let mut s = ScrollState::new(5);
        assert_eq!(s.transition(3).unwrap(), [1, 2, 3]);
        assert_eq!(s.current(), 3);
        assert!(s.transition(3).unwrap().is_empty());
        assert!(s.transition(5).is_err());
        assert_eq!(s.current(), 3);
    }
}
