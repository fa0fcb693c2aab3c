#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the topic input box.
    InputChanged(String),
    /// User clicked Generate.
    GenerateClicked,
    /// Engine completion for a generation request.
    GenerationFinished {
        request_id: crate::RequestId,
        result: Result<Vec<crate::CardContent>, crate::GenerationFailure>,
    },
    /// User clicked a card body.
    CardClicked(crate::CardId),
    /// User clicked a card's delete control.
    DeleteClicked(crate::CardId),
    /// The removal delay for a card has elapsed.
    RemovalFinished(crate::CardId),
    /// User clicked the grid/focus mode switch.
    ToggleModeClicked,
    NextClicked,
    PrevClicked,
    /// User clicked Shuffle. The platform supplies the seed.
    ShuffleClicked { seed: u64 },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
