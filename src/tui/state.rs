//! Shared state definitions for TUI lists.
//!
//! Row selection in the page table and the cursor in each filter list use
//! the same navigation behavior.

/// Trait for list-based navigation state.
pub trait ListNavigation {
    /// Get the current selection index.
    fn selected(&self) -> usize;

    /// Set the selection index.
    fn set_selected(&mut self, idx: usize);

    /// Get the total number of items.
    fn total(&self) -> usize;

    /// Set the total number of items.
    fn set_total(&mut self, total: usize);

    /// Move selection to the next item.
    fn select_next(&mut self) {
        let total = self.total();
        let selected = self.selected();
        if total > 0 && selected < total.saturating_sub(1) {
            self.set_selected(selected + 1);
        }
    }

    /// Move selection to the previous item.
    fn select_prev(&mut self) {
        let selected = self.selected();
        if selected > 0 {
            self.set_selected(selected - 1);
        }
    }

    /// Ensure selection is within valid bounds.
    fn clamp_selection(&mut self) {
        let total = self.total();
        let selected = self.selected();
        if total == 0 {
            self.set_selected(0);
        } else if selected >= total {
            self.set_selected(total.saturating_sub(1));
        }
    }

    /// Move to the first item.
    fn go_first(&mut self) {
        self.set_selected(0);
    }

    /// Move to the last item.
    fn go_last(&mut self) {
        let total = self.total();
        if total > 0 {
            self.set_selected(total.saturating_sub(1));
        }
    }
}

/// Base state for simple list navigation.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub selected: usize,
    pub total: usize,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_total(total: usize) -> Self {
        Self { selected: 0, total }
    }

    /// Update the total and pull the selection back in range.
    pub fn resize(&mut self, total: usize) {
        self.total = total;
        self.clamp_selection();
    }
}

impl ListNavigation for ListState {
    fn selected(&self) -> usize {
        self.selected
    }

    fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
    }

    fn total(&self) -> usize {
        self.total
    }

    fn set_total(&mut self, total: usize) {
        self.total = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_bounds() {
        let mut state = ListState::with_total(3);
        state.select_prev();
        assert_eq!(state.selected, 0);
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 2);
        state.go_first();
        assert_eq!(state.selected, 0);
        state.go_last();
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_resize_clamps() {
        let mut state = ListState::with_total(10);
        state.go_last();
        state.resize(4);
        assert_eq!(state.selected, 3);
        state.resize(0);
        assert_eq!(state.selected, 0);
    }
}
