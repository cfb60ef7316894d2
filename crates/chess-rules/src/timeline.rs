//! Append-and-rewind history container.

/// An ordered history of `T` with a movable head cursor.
///
/// The head is `None` before any entry, or `Some(i)` pointing at the
/// current entry. Rewinding moves the head backward without deleting
/// anything; pushing while rewound first truncates everything after the
/// head, so the abandoned future is discarded rather than branched.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    entries: Vec<T>,
    head: Option<usize>,
}

impl<T> Timeline<T> {
    /// Creates an empty timeline with the head before any entry.
    pub const fn new() -> Self {
        Timeline {
            entries: Vec::new(),
            head: None,
        }
    }

    /// Appends a value and moves the head onto it, truncating any entries
    /// after the previous head first.
    pub fn push(&mut self, value: T) {
        let keep = match self.head {
            Some(head) => head + 1,
            None => 0,
        };
        self.entries.truncate(keep);
        self.entries.push(value);
        self.head = Some(self.entries.len() - 1);
    }

    /// Returns the entry under the head, if any.
    pub fn current(&self) -> Option<&T> {
        self.head.map(|head| &self.entries[head])
    }

    /// Returns the entry at `index` if it is at or before the head.
    pub fn get(&self, index: usize) -> Option<&T> {
        match self.head {
            Some(head) if index <= head => Some(&self.entries[index]),
            _ => None,
        }
    }

    /// Returns all entries from the start through the head.
    pub fn past(&self) -> &[T] {
        match self.head {
            Some(head) => &self.entries[..=head],
            None => &[],
        }
    }

    /// Returns the head position, or `None` while before any entry.
    pub fn head_index(&self) -> Option<usize> {
        self.head
    }

    /// Number of entries from the start through the head.
    pub fn len(&self) -> usize {
        match self.head {
            Some(head) => head + 1,
            None => 0,
        }
    }

    /// Returns true if the head is before any entry.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Moves the head backward onto `index`. Fails if `index` is not at or
    /// before the current head.
    pub fn rewind_to(&mut self, index: usize) -> bool {
        match self.head {
            Some(head) if index <= head => {
                self.head = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Moves the head to before any entry. Fails if it is already there.
    pub fn rewind_to_start(&mut self) -> bool {
        if self.head.is_none() {
            return false;
        }
        self.head = None;
        true
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_read() {
        let mut timeline = Timeline::new();
        assert!(timeline.is_empty());
        assert_eq!(timeline.current(), None);

        timeline.push(10);
        timeline.push(20);
        timeline.push(30);
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.current(), Some(&30));
        assert_eq!(timeline.get(0), Some(&10));
        assert_eq!(timeline.get(3), None);
        assert_eq!(timeline.past(), &[10, 20, 30]);
    }

    #[test]
    fn rewind_keeps_entries() {
        let mut timeline = Timeline::new();
        timeline.push('a');
        timeline.push('b');
        timeline.push('c');

        assert!(timeline.rewind_to(0));
        assert_eq!(timeline.current(), Some(&'a'));
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.past(), &['a']);
        // Entries after the head are retained but unreadable.
        assert_eq!(timeline.get(1), None);
    }

    #[test]
    fn rewind_rejects_forward_and_out_of_range() {
        let mut timeline = Timeline::new();
        timeline.push(1);
        timeline.push(2);
        assert!(timeline.rewind_to(0));
        assert!(!timeline.rewind_to(1)); // forward
        assert!(!timeline.rewind_to(5)); // past the end

        let mut empty: Timeline<i32> = Timeline::new();
        assert!(!empty.rewind_to(0));
        assert!(!empty.rewind_to_start());
    }

    #[test]
    fn push_after_rewind_rewrites_the_future() {
        let mut timeline = Timeline::new();
        timeline.push(1);
        timeline.push(2);
        timeline.push(3);

        timeline.rewind_to(0);
        timeline.push(99);
        assert_eq!(timeline.past(), &[1, 99]);
        assert_eq!(timeline.current(), Some(&99));
    }

    #[test]
    fn rewind_to_start_then_push() {
        let mut timeline = Timeline::new();
        timeline.push(1);
        timeline.push(2);

        assert!(timeline.rewind_to_start());
        assert!(timeline.is_empty());
        assert_eq!(timeline.current(), None);

        timeline.push(7);
        assert_eq!(timeline.past(), &[7]);
    }
}
