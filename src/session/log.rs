//! Bounded combat log, newest entry first

use std::collections::VecDeque;

/// Combat log that drops its oldest entry once full
#[derive(Debug, Clone)]
pub struct CombatLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl CombatLog {
    /// Create an empty log holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Prepend an entry, dropping the oldest past capacity
    pub fn record(&mut self, message: impl Into<String>) {
        self.entries.push_front(message.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Entries newest first
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = CombatLog::new(10);
        log.record("first");
        log.record("second");

        assert_eq!(log.latest(), Some("second"));
        assert_eq!(log.to_vec(), vec!["second", "first"]);
    }

    #[test]
    fn test_bounded_to_most_recent() {
        let mut log = CombatLog::new(100);
        for i in 0..150 {
            log.record(format!("entry {}", i));
        }

        assert_eq!(log.len(), 100);
        let entries = log.to_vec();
        assert_eq!(entries[0], "entry 149");
        assert_eq!(entries[99], "entry 50");
        for (offset, entry) in entries.iter().enumerate() {
            assert_eq!(*entry, format!("entry {}", 149 - offset));
        }
    }

    #[test]
    fn test_clear() {
        let mut log = CombatLog::new(3);
        log.record("a");
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.latest(), None);
        assert_eq!(log.capacity(), 3);
    }
}
