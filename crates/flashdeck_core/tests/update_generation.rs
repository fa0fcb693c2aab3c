use std::sync::Once;

use flashdeck_core::{
    update, AppState, CardContent, Effect, GenerationFailure, Msg, Severity, EMPTY_TOPIC_MESSAGE,
    GENERATING_MESSAGE, GENERATION_FAILED_MESSAGE, NO_FLASHCARDS_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(flashdeck_logging::initialize_for_tests);
}

fn request_generation(state: AppState, topic: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(topic.to_string()));
    update(state, Msg::GenerateClicked)
}

fn pet_cards() -> Vec<CardContent> {
    vec![
        CardContent::new("🐱", "Cat", "A small domesticated feline"),
        CardContent::new("🐶", "Dog", "A domesticated canine"),
    ]
}

#[test]
fn generate_emits_effect_with_trimmed_topic_and_disables_control() {
    init_logging();
    let (mut state, effects) = request_generation(AppState::new(), "  Photosynthesis \n");

    assert_eq!(
        effects,
        vec![Effect::Generate {
            request_id: 1,
            topic: "Photosynthesis".to_string(),
        }]
    );
    let view = state.view();
    assert!(!view.generate_enabled);
    assert_eq!(view.status.unwrap().text, GENERATING_MESSAGE);
    assert!(state.consume_dirty());
}

#[test]
fn blank_topic_shows_hint_without_request() {
    init_logging();
    let (state, effects) = request_generation(AppState::new(), "   \n ");

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.generate_enabled);
    let status = view.status.expect("hint shown");
    assert_eq!(status.text, EMPTY_TOPIC_MESSAGE);
    assert_eq!(status.severity, Severity::Error);
}

#[test]
fn second_generate_while_in_flight_is_ignored() {
    init_logging();
    let (state, _) = request_generation(AppState::new(), "Rust");
    let (state, effects) = update(state, Msg::GenerateClicked);

    assert!(effects.is_empty());
    assert!(state.is_generating());
}

#[test]
fn successful_generation_adds_cards_in_order_and_reenables() {
    init_logging();
    let (state, _) = request_generation(AppState::new(), "pets");
    let (state, effects) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: Ok(pet_cards()),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.generate_enabled);
    assert_eq!(view.status, None);
    let terms: Vec<_> = view.cards.iter().map(|card| card.term.as_str()).collect();
    assert_eq!(terms, vec!["Cat", "Dog"]);
    assert_eq!(view.cards[0].emoji, "🐱");
    assert!(view.cards.iter().all(|card| !card.flipped && !card.active));
    assert!(view.controls.show_mode_toggle);
    assert!(view.controls.show_shuffle);
    assert!(!view.controls.show_navigation);
}

#[test]
fn failures_map_to_generic_messages_and_reenable() {
    init_logging();
    for (failure, expected) in [
        (GenerationFailure::NoFlashcards, NO_FLASHCARDS_MESSAGE),
        (GenerationFailure::Failed, GENERATION_FAILED_MESSAGE),
    ] {
        let (state, _) = request_generation(AppState::new(), "pets");
        let (state, _) = update(
            state,
            Msg::GenerationFinished {
                request_id: 1,
                result: Err(failure),
            },
        );

        let view = state.view();
        assert!(view.generate_enabled);
        assert!(view.cards.is_empty());
        let status = view.status.expect("error shown");
        assert_eq!(status.text, expected);
        assert_eq!(status.severity, Severity::Error);
    }
}

#[test]
fn empty_success_is_treated_as_no_flashcards() {
    init_logging();
    let (state, _) = request_generation(AppState::new(), "pets");
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: Ok(Vec::new()),
        },
    );

    assert_eq!(state.view().status.unwrap().text, NO_FLASHCARDS_MESSAGE);
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, _) = request_generation(AppState::new(), "pets");
    let (mut state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: 41,
            result: Ok(pet_cards()),
        },
    );

    assert!(state.is_generating());
    assert!(state.view().cards.is_empty());
    state.consume_dirty();

    let (mut state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: Ok(pet_cards()),
        },
    );
    assert!(state.consume_dirty());
    assert_eq!(state.view().cards.len(), 2);
}

#[test]
fn new_generation_clears_previous_deck_and_focus() {
    init_logging();
    let (state, _) = request_generation(AppState::new(), "pets");
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: Ok(pet_cards()),
        },
    );
    let (state, _) = update(state, Msg::ToggleModeClicked);
    assert!(state.view().controls.show_navigation);

    let (state, effects) = update(state, Msg::GenerateClicked);
    assert_eq!(
        effects,
        vec![Effect::Generate {
            request_id: 2,
            topic: "pets".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.cards.is_empty());
    assert!(!view.controls.show_navigation);
    assert!(!view.controls.show_mode_toggle);
    assert_eq!(view.counter_label, None);
}
