use crate::view_model::{AppViewModel, CardView};
use crate::{CardContent, DisplayMode, ViewState};

pub type RequestId = u64;

pub const EMPTY_TOPIC_MESSAGE: &str = "Please enter a topic or a list of terms.";
pub const GENERATING_MESSAGE: &str = "Generating flashcards...";
pub const NO_FLASHCARDS_MESSAGE: &str =
    "No flashcards could be generated. Try a different topic or check your term: definition format.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "Something went wrong while generating flashcards. Please try again.";

/// Why a generation request produced no cards, as far as the user is told.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationFailure {
    /// Input or model output held no usable lines.
    NoFlashcards,
    /// The service call itself failed.
    Failed,
}

impl GenerationFailure {
    pub fn user_message(self) -> &'static str {
        match self {
            GenerationFailure::NoFlashcards => NO_FLASHCARDS_MESSAGE,
            GenerationFailure::Failed => GENERATION_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

impl StatusMessage {
    fn info(text: &str) -> Self {
        Self {
            severity: Severity::Info,
            text: text.to_string(),
        }
    }

    fn error(text: &str) -> Self {
        Self {
            severity: Severity::Error,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    topic: String,
    /// Request currently in flight; the generate control is disabled while set.
    pending_request: Option<RequestId>,
    next_request_id: RequestId,
    status: Option<StatusMessage>,
    cards: ViewState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let controls = self.cards.controls();
        AppViewModel {
            topic: self.topic.clone(),
            generate_enabled: self.pending_request.is_none(),
            status: self.status.clone(),
            mode: self.cards.mode(),
            mode_toggle_label: match self.cards.mode() {
                DisplayMode::Grid => "Focus mode",
                DisplayMode::Focus => "Grid view",
            },
            cards: self
                .cards
                .cards()
                .iter()
                .map(|card| CardView {
                    card_id: card.id(),
                    emoji: card.content().emoji.clone(),
                    term: card.content().term.clone(),
                    definition: card.content().definition.clone(),
                    flipped: card.is_flipped(),
                    removing: card.is_removing(),
                    active: card.is_active(),
                })
                .collect(),
            counter_label: controls
                .counter
                .map(|(position, count)| format!("{position} of {count}")),
            controls,
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.cards
    }

    pub fn is_generating(&self) -> bool {
        self.pending_request.is_some()
    }

    /// Returns whether anything changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn cards_mut(&mut self) -> &mut ViewState {
        &mut self.cards
    }

    pub(crate) fn set_topic(&mut self, topic: String) {
        if self.topic != topic {
            self.topic = topic;
            self.mark_dirty();
        }
    }

    pub(crate) fn topic(&self) -> &str {
        &self.topic
    }

    pub(crate) fn show_empty_topic_hint(&mut self) {
        self.status = Some(StatusMessage::error(EMPTY_TOPIC_MESSAGE));
        self.mark_dirty();
    }

    /// Clears the previous deck and disables generation until the returned
    /// request finishes.
    pub(crate) fn begin_generation(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending_request = Some(request_id);
        self.cards.reset();
        self.status = Some(StatusMessage::info(GENERATING_MESSAGE));
        self.mark_dirty();
        request_id
    }

    /// Returns false for a request that is not the one in flight.
    pub(crate) fn finish_generation(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<CardContent>, GenerationFailure>,
    ) -> bool {
        if self.pending_request != Some(request_id) {
            return false;
        }
        self.pending_request = None;
        match result {
            Ok(cards) if !cards.is_empty() => {
                self.cards.add_cards(cards);
                self.status = None;
            }
            Ok(_) => {
                self.status = Some(StatusMessage::error(NO_FLASHCARDS_MESSAGE));
            }
            Err(failure) => {
                self.status = Some(StatusMessage::error(failure.user_message()));
            }
        }
        self.mark_dirty();
        true
    }
}
