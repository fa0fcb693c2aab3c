#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run one generation request for the given topic text.
    Generate {
        request_id: crate::RequestId,
        topic: String,
    },
    /// Play the removal delay for a card, then report `Msg::RemovalFinished`.
    ScheduleRemoval { card_id: crate::CardId },
}
