//! Selection movement for ratatui tables.

use ratatui::widgets::TableState;

/// Rows moved by page up/down
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Common selection moves on a [`TableState`]. All moves clamp to the table
/// bounds and leave an empty table unselected.
pub trait TableStateExt {
    fn move_up_by(&mut self, count: usize, total_rows: usize);

    fn move_down_by(&mut self, count: usize, total_rows: usize);

    fn select_first_row(&mut self, total_rows: usize);

    fn select_last_row(&mut self, total_rows: usize);

    /// Selected index, selecting the first row if nothing is selected yet.
    fn selected_or_first(&mut self, total_rows: usize) -> Option<usize>;
}

impl TableStateExt for TableState {
    fn move_up_by(&mut self, count: usize, total_rows: usize) {
        if total_rows == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0);
        self.select(Some(current.saturating_sub(count)));
    }

    fn move_down_by(&mut self, count: usize, total_rows: usize) {
        if total_rows == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0);
        self.select(Some((current + count).min(total_rows - 1)));
    }

    fn select_first_row(&mut self, total_rows: usize) {
        if total_rows > 0 {
            self.select(Some(0));
        }
    }

    fn select_last_row(&mut self, total_rows: usize) {
        if total_rows > 0 {
            self.select(Some(total_rows - 1));
        }
    }

    fn selected_or_first(&mut self, total_rows: usize) -> Option<usize> {
        if total_rows == 0 {
            return None;
        }
        match self.selected() {
            Some(i) if i < total_rows => Some(i),
            _ => {
                self.select(Some(0));
                Some(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_clamps() {
        let mut state = TableState::default();
        state.select(Some(5));
        state.move_up_by(3, 10);
        assert_eq!(state.selected(), Some(2));
        state.move_up_by(10, 10);
        assert_eq!(state.selected(), Some(0));
        state.move_down_by(DEFAULT_PAGE_SIZE, 4);
        assert_eq!(state.selected(), Some(3));
    }

    #[test]
    fn test_first_last() {
        let mut state = TableState::default();
        state.select_last_row(7);
        assert_eq!(state.selected(), Some(6));
        state.select_first_row(7);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_empty_table_stays_unselected() {
        let mut state = TableState::default();
        state.move_down_by(1, 0);
        state.select_last_row(0);
        assert_eq!(state.selected(), None);
        assert_eq!(state.selected_or_first(0), None);
    }

    #[test]
    fn test_selected_or_first() {
        let mut state = TableState::default();
        assert_eq!(state.selected_or_first(3), Some(0));
        state.select(Some(2));
        assert_eq!(state.selected_or_first(3), Some(2));
        // Stale selection past the end falls back to the first row
        state.select(Some(9));
        assert_eq!(state.selected_or_first(3), Some(0));
    }
}
