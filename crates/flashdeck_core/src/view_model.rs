use crate::{CardId, ControlVisibility, DisplayMode, StatusMessage};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub topic: String,
    pub generate_enabled: bool,
    pub status: Option<StatusMessage>,
    pub mode: DisplayMode,
    pub mode_toggle_label: &'static str,
    pub cards: Vec<CardView>,
    pub controls: ControlVisibility,
    /// "3 of 10" style label, focus mode only.
    pub counter_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub card_id: CardId,
    pub emoji: String,
    pub term: String,
    pub definition: String,
    pub flipped: bool,
    pub removing: bool,
    pub active: bool,
}

impl AppViewModel {
    pub fn active_card(&self) -> Option<&CardView> {
        self.cards.iter().find(|card| card.active)
    }
}
