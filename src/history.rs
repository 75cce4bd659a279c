use std::collections::VecDeque;

/// Fixed-capacity FIFO of the departments most recently seated in a room.
///
/// Pushing onto a full window evicts the oldest entry. A window with
/// capacity 0 never remembers anything.
#[derive(Debug, Clone)]
pub struct DepartmentHistory {
    capacity: usize,
    recent: VecDeque<String>,
}

impl DepartmentHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            recent: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, department: &str) {
        if self.capacity == 0 {
            return;
        }
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(department.to_string());
    }

    pub fn contains(&self, department: &str) -> bool {
        self.recent.iter().any(|d| d == department)
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_entry_is_evicted() {
        let mut history = DepartmentHistory::new(2);
        history.push("CSE");
        history.push("ECE");
        history.push("ME");

        assert_eq!(history.len(), 2);
        assert!(!history.contains("CSE"));
        assert!(history.contains("ECE"));
        assert!(history.contains("ME"));
    }

    #[test]
    fn test_zero_capacity_remembers_nothing() {
        let mut history = DepartmentHistory::new(0);
        history.push("CSE");
        assert_eq!(history.len(), 0);
        assert!(!history.contains("CSE"));
        assert_eq!(history.capacity(), 0);
    }

    #[test]
    fn test_repeated_department_still_counts_once_per_push() {
        let mut history = DepartmentHistory::new(3);
        history.push("CSE");
        history.push("CSE");
        assert_eq!(history.len(), 2);
        history.push("IT");
        history.push("ME");
        assert_eq!(history.len(), 3);
        assert!(history.contains("CSE"));
        history.push("EE");
        assert!(!history.contains("CSE"));
    }
}
