//! Flashdeck core: pure card view-state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;
mod view_state;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, GenerationFailure, RequestId, Severity, StatusMessage, EMPTY_TOPIC_MESSAGE,
    GENERATING_MESSAGE, GENERATION_FAILED_MESSAGE, NO_FLASHCARDS_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, CardView};
pub use view_state::{
    CardContent, CardHandle, CardId, ControlVisibility, Direction, DisplayMode, ViewState,
};
