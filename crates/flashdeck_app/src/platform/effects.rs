use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use flashdeck_core::{CardContent, Effect, GenerationFailure, Msg};
use flashdeck_engine::{EngineEvent, EngineHandle, FlashcardRecord, GenerationError};
use flashdeck_logging::{deck_debug, deck_warn};

use super::config::AppConfig;

/// Executes effects produced by `update` and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
    removal_delay: Duration,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, msg_tx: mpsc::Sender<Msg>) -> std::io::Result<Self> {
        let engine = EngineHandle::new(config.generator.clone())?;
        Ok(Self {
            engine,
            msg_tx,
            removal_delay: config.removal_delay,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Generate { request_id, topic } => {
                    deck_debug!("Dispatching generation request {}", request_id);
                    self.engine.generate(request_id, topic);
                }
                Effect::ScheduleRemoval { card_id } => {
                    // One timer per scheduled removal; `update` only emits this
                    // once per card.
                    let msg_tx = self.msg_tx.clone();
                    let delay = self.removal_delay;
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = msg_tx.send(Msg::RemovalFinished(card_id));
                    });
                    deck_debug!("Scheduled removal of card {}", card_id);
                }
            }
        }
    }

    /// Drains finished engine work as messages for `update`.
    pub fn poll_engine(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::GenerationCompleted { request_id, result } => {
                    inbox.push(Msg::GenerationFinished {
                        request_id,
                        result: result.map(to_cards).map_err(|err| {
                            deck_warn!("Request {} produced no cards: {}", request_id, err);
                            map_failure(&err)
                        }),
                    });
                }
            }
        }
        inbox
    }
}

fn to_cards(records: Vec<FlashcardRecord>) -> Vec<CardContent> {
    records
        .into_iter()
        .map(|record| CardContent::new(record.emoji, record.term, record.definition))
        .collect()
}

fn map_failure(err: &GenerationError) -> GenerationFailure {
    match err {
        GenerationError::EmptyTopic | GenerationError::Validation | GenerationError::NoFlashcards => {
            GenerationFailure::NoFlashcards
        }
        GenerationError::Service(_) => GenerationFailure::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_engine::{ServiceError, ServiceFailure};

    #[test]
    fn engine_errors_collapse_to_two_user_facing_failures() {
        assert_eq!(
            map_failure(&GenerationError::Validation),
            GenerationFailure::NoFlashcards
        );
        assert_eq!(
            map_failure(&GenerationError::NoFlashcards),
            GenerationFailure::NoFlashcards
        );
        assert_eq!(
            map_failure(&GenerationError::Service(ServiceError::new(
                ServiceFailure::HttpStatus(500),
                "boom"
            ))),
            GenerationFailure::Failed
        );
    }

    #[test]
    fn records_keep_order_when_converted() {
        let cards = to_cards(vec![
            FlashcardRecord {
                emoji: "🐱".to_string(),
                term: "Cat".to_string(),
                definition: "feline".to_string(),
            },
            FlashcardRecord {
                emoji: "🐶".to_string(),
                term: "Dog".to_string(),
                definition: "canine".to_string(),
            },
        ]);
        assert_eq!(
            cards,
            vec![
                CardContent::new("🐱", "Cat", "feline"),
                CardContent::new("🐶", "Dog", "canine"),
            ]
        );
    }
}
