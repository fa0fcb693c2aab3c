pub mod keymap;
pub mod render;

use keymap::FocusZone;

/// Presentation state owned by the terminal, not by the core: which zone has
/// the keyboard and which grid card the cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    pub zone: FocusZone,
    pub selected: usize,
}

impl UiState {
    /// Keeps the grid cursor on an existing card.
    pub fn clamp_selection(&mut self, card_count: usize) {
        if card_count == 0 {
            self.selected = 0;
        } else if self.selected >= card_count {
            self.selected = card_count - 1;
        }
    }

    /// Moves the grid cursor by `delta`, stopping at either end.
    pub fn move_selection(&mut self, delta: isize, card_count: usize) {
        if card_count == 0 {
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, card_count as isize - 1) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::UiState;

    #[test]
    fn selection_stays_in_bounds() {
        let mut ui = UiState::default();
        ui.move_selection(-1, 3);
        assert_eq!(ui.selected, 0);
        ui.move_selection(5, 3);
        assert_eq!(ui.selected, 2);
        ui.clamp_selection(1);
        assert_eq!(ui.selected, 0);
        ui.move_selection(1, 0);
        assert_eq!(ui.selected, 0);
    }
}
