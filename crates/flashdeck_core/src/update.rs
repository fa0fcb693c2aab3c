use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{AppState, Direction, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_topic(text);
            Vec::new()
        }
        Msg::GenerateClicked => {
            // The generate control stays disabled until the request in flight
            // reports back, so overlapping requests are never issued.
            if state.is_generating() {
                return (state, Vec::new());
            }
            let topic = state.topic().trim().to_string();
            if topic.is_empty() {
                state.show_empty_topic_hint();
                return (state, Vec::new());
            }
            let request_id = state.begin_generation();
            vec![Effect::Generate { request_id, topic }]
        }
        Msg::GenerationFinished { request_id, result } => {
            state.finish_generation(request_id, result);
            Vec::new()
        }
        Msg::CardClicked(card_id) => {
            if state.cards_mut().toggle_flip(card_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DeleteClicked(card_id) => {
            if state.cards_mut().begin_removal(card_id) {
                state.mark_dirty();
                vec![Effect::ScheduleRemoval { card_id }]
            } else {
                Vec::new()
            }
        }
        Msg::RemovalFinished(card_id) => {
            if state.cards_mut().remove_card(card_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ToggleModeClicked => {
            let before = state.view_state().mode();
            state.cards_mut().toggle_mode();
            if state.view_state().mode() != before {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NextClicked => navigate(&mut state, Direction::Next),
        Msg::PrevClicked => navigate(&mut state, Direction::Prev),
        Msg::ShuffleClicked { seed } => {
            if state.view_state().len() > 1 {
                let mut rng = StdRng::seed_from_u64(seed);
                state.cards_mut().shuffle(&mut rng);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn navigate(state: &mut AppState, direction: Direction) -> Vec<Effect> {
    if state.view_state().len() > 1 {
        state.cards_mut().navigate(direction);
        state.mark_dirty();
    }
    Vec::new()
}
