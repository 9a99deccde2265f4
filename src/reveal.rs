//! One-shot notifications and staggered scroll reveals

use std::collections::HashSet;
use std::hash::Hash;

use crate::consts::REVEAL_STAGGER_MS;

/// Lets each key through exactly once
#[derive(Debug, Clone)]
pub struct NotifyOnce<K> {
    fired: HashSet<K>,
}

impl<K: Eq + Hash> Default for NotifyOnce<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> NotifyOnce<K> {
    pub fn new() -> Self {
        Self {
            fired: HashSet::new(),
        }
    }

    /// True the first time `key` is seen, false afterwards
    pub fn fire(&mut self, key: K) -> bool {
        self.fired.insert(key)
    }
}

/// Position of `target` among the revealable siblings
///
/// `revealable` flags every child of the parent in document order.
pub fn sibling_index(revealable: &[bool], target: usize) -> Option<usize> {
    if !revealable.get(target).copied().unwrap_or(false) {
        return None;
    }
    Some(revealable[..target].iter().filter(|r| **r).count())
}

/// Delay before revealing an element; unknown positions reveal at once
pub fn stagger_delay_ms(index: Option<usize>) -> u32 {
    index
        .map(|i| (i as u32).saturating_mul(REVEAL_STAGGER_MS))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_once() {
        let mut gate = NotifyOnce::new();
        assert!(gate.fire(3));
        assert!(!gate.fire(3));
        assert!(gate.fire(4));
        assert!(!gate.fire(4));
        // Other keys are unaffected by earlier fires
        assert!(gate.fire(5));
    }

    #[test]
    fn test_sibling_index_skips_plain_children() {
        let kids = [true, false, true, true, false];
        assert_eq!(sibling_index(&kids, 0), Some(0));
        assert_eq!(sibling_index(&kids, 2), Some(1));
        assert_eq!(sibling_index(&kids, 3), Some(2));
        assert_eq!(sibling_index(&kids, 1), None);
        assert_eq!(sibling_index(&kids, 9), None);
    }

    #[test]
    fn test_stagger_delay() {
        assert_eq!(stagger_delay_ms(None), 0);
        assert_eq!(stagger_delay_ms(Some(0)), 0);
        assert_eq!(stagger_delay_ms(Some(3)), 270);
    }
}
