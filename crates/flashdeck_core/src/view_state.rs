use rand::Rng;

pub type CardId = u64;

/// What a card shows: emoji and term on the front, definition on the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardContent {
    pub emoji: String,
    pub term: String,
    pub definition: String,
}

impl CardContent {
    pub fn new(
        emoji: impl Into<String>,
        term: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            emoji: emoji.into(),
            term: term.into(),
            definition: definition.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Grid,
    Focus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// A rendered card plus its transient presentation flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHandle {
    id: CardId,
    content: CardContent,
    flipped: bool,
    removing: bool,
    active: bool,
}

impl CardHandle {
    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn content(&self) -> &CardContent {
        &self.content
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_removing(&self) -> bool {
        self.removing
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Derived state, recomputed after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlVisibility {
    pub show_mode_toggle: bool,
    pub show_shuffle: bool,
    pub show_navigation: bool,
    /// `(position, count)` with a 1-based position; only set in focus mode.
    pub counter: Option<(usize, usize)>,
}

/// Card collection, display mode and focus position.
///
/// Invariants:
/// - with no cards the mode is [`DisplayMode::Grid`] and the focused index is 0;
/// - in focus mode with cards, `focused_index < cards.len()` and exactly that
///   card is active;
/// - in grid mode no card is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    mode: DisplayMode,
    focused_index: usize,
    cards: Vec<CardHandle>,
    next_id: CardId,
    controls: ControlVisibility,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub fn cards(&self) -> &[CardHandle] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn controls(&self) -> ControlVisibility {
        self.controls
    }

    pub fn card(&self, id: CardId) -> Option<&CardHandle> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Card ids are never reused, so stale handles from before a reset stay
    /// harmless.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.mode = DisplayMode::Grid;
        self.focused_index = 0;
        self.recompute();
    }

    pub fn add_cards<I>(&mut self, contents: I) -> Vec<CardId>
    where
        I: IntoIterator<Item = CardContent>,
    {
        let mut added = Vec::new();
        for content in contents {
            self.next_id += 1;
            let id = self.next_id;
            self.cards.push(CardHandle {
                id,
                content,
                flipped: false,
                removing: false,
                active: false,
            });
            added.push(id);
        }
        self.recompute();
        added
    }

    /// Returns false when `id` is unknown.
    pub fn remove_card(&mut self, id: CardId) -> bool {
        let Some(position) = self.position_of(id) else {
            return false;
        };
        self.cards.remove(position);
        if self.cards.is_empty() {
            self.reset();
            return true;
        }
        if self.focused_index >= self.cards.len() {
            self.focused_index = self.cards.len() - 1;
        }
        self.recompute();
        true
    }

    /// Marks a card as being removed. Returns false if the card is unknown or
    /// a removal is already pending for it.
    pub fn begin_removal(&mut self, id: CardId) -> bool {
        match self.cards.iter_mut().find(|card| card.id == id) {
            Some(card) if !card.removing => {
                card.removing = true;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_mode(&mut self) {
        match self.mode {
            DisplayMode::Grid => {
                if self.cards.is_empty() {
                    return;
                }
                self.mode = DisplayMode::Focus;
                self.focused_index = 0;
            }
            DisplayMode::Focus => {
                self.mode = DisplayMode::Grid;
                for card in &mut self.cards {
                    card.flipped = false;
                }
            }
        }
        self.recompute();
    }

    pub fn navigate(&mut self, direction: Direction) {
        let count = self.cards.len();
        if count < 2 {
            return;
        }
        if let Some(card) = self.cards.get_mut(self.focused_index) {
            card.flipped = false;
        }
        self.focused_index = match direction {
            Direction::Next => (self.focused_index + 1) % count,
            Direction::Prev => (self.focused_index + count - 1) % count,
        };
        self.recompute();
    }

    /// Fisher-Yates over the display order. The focused index keeps its
    /// numeric value and now points at whichever card landed there.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.random_range(0..=i);
            self.cards.swap(i, j);
        }
        self.recompute();
    }

    /// Returns false when `id` is unknown.
    pub fn toggle_flip(&mut self, id: CardId) -> bool {
        let Some(card) = self.cards.iter_mut().find(|card| card.id == id) else {
            return false;
        };
        card.flipped = !card.flipped;
        self.recompute();
        true
    }

    fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    fn recompute(&mut self) {
        if self.cards.is_empty() {
            self.mode = DisplayMode::Grid;
            self.focused_index = 0;
        }
        let has_cards = !self.cards.is_empty();
        let focus = self.mode == DisplayMode::Focus && has_cards;

        for (index, card) in self.cards.iter_mut().enumerate() {
            card.active = focus && index == self.focused_index;
        }

        self.controls = ControlVisibility {
            show_mode_toggle: has_cards,
            show_shuffle: has_cards,
            show_navigation: focus,
            counter: focus.then(|| (self.focused_index + 1, self.cards.len())),
        };
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn deck(terms: &[&str]) -> (ViewState, Vec<CardId>) {
        let mut state = ViewState::new();
        let ids = state.add_cards(
            terms
                .iter()
                .map(|term| CardContent::new("📝", *term, format!("{term} definition"))),
        );
        (state, ids)
    }

    fn terms(state: &ViewState) -> Vec<String> {
        state
            .cards()
            .iter()
            .map(|card| card.content().term.clone())
            .collect()
    }

    #[test]
    fn add_cards_keeps_order_and_starts_face_up() {
        let (state, ids) = deck(&["a", "b", "c"]);
        assert_eq!(ids.len(), 3);
        assert_eq!(terms(&state), vec!["a", "b", "c"]);
        assert!(state.cards().iter().all(|card| !card.is_flipped()));
        assert_eq!(state.mode(), DisplayMode::Grid);
    }

    #[test]
    fn controls_follow_card_presence_and_mode() {
        let mut state = ViewState::new();
        assert_eq!(state.controls(), ControlVisibility::default());

        state.add_cards([CardContent::new("🐱", "Cat", "feline")]);
        let controls = state.controls();
        assert!(controls.show_mode_toggle);
        assert!(controls.show_shuffle);
        assert!(!controls.show_navigation);
        assert_eq!(controls.counter, None);

        state.toggle_mode();
        let controls = state.controls();
        assert!(controls.show_navigation);
        assert_eq!(controls.counter, Some((1, 1)));
    }

    #[test]
    fn entering_focus_resets_index_and_marks_one_active() {
        let (mut state, _) = deck(&["a", "b", "c"]);
        state.toggle_mode();
        state.navigate(Direction::Next);
        state.navigate(Direction::Next);
        assert_eq!(state.focused_index(), 2);

        state.toggle_mode();
        assert!(state.cards().iter().all(|card| !card.is_active()));
        state.toggle_mode();
        assert_eq!(state.focused_index(), 0);
        let active: Vec<_> = state.cards().iter().map(CardHandle::is_active).collect();
        assert_eq!(active, vec![true, false, false]);
    }

    #[test]
    fn leaving_focus_unflips_every_card() {
        let (mut state, ids) = deck(&["a", "b"]);
        state.toggle_flip(ids[0]);
        state.toggle_mode();
        state.toggle_flip(ids[1]);
        state.toggle_mode();
        assert!(state.cards().iter().all(|card| !card.is_flipped()));
    }

    #[test]
    fn toggle_mode_with_no_cards_stays_in_grid() {
        let mut state = ViewState::new();
        state.toggle_mode();
        assert_eq!(state.mode(), DisplayMode::Grid);
        assert!(!state.controls().show_navigation);
    }

    #[test]
    fn navigate_wraps_in_both_directions() {
        let (mut state, _) = deck(&["a", "b", "c"]);
        state.toggle_mode();

        state.navigate(Direction::Prev);
        assert_eq!(state.focused_index(), 2);
        assert_eq!(state.controls().counter, Some((3, 3)));

        state.navigate(Direction::Next);
        assert_eq!(state.focused_index(), 0);
    }

    #[test]
    fn navigate_unflips_the_card_being_left() {
        let (mut state, ids) = deck(&["a", "b"]);
        state.toggle_mode();
        state.toggle_flip(ids[0]);
        state.navigate(Direction::Next);
        assert!(!state.card(ids[0]).unwrap().is_flipped());
        assert!(state.card(ids[1]).unwrap().is_active());
    }

    #[test]
    fn navigate_is_noop_below_two_cards() {
        let (mut state, ids) = deck(&["only"]);
        state.toggle_mode();
        state.toggle_flip(ids[0]);
        let before = state.clone();

        state.navigate(Direction::Next);
        state.navigate(Direction::Prev);
        assert_eq!(state, before);

        let mut empty = ViewState::new();
        let before = empty.clone();
        empty.navigate(Direction::Next);
        assert_eq!(empty, before);
    }

    #[test]
    fn removing_last_card_forces_grid() {
        let (mut state, ids) = deck(&["a"]);
        state.toggle_mode();
        assert!(state.remove_card(ids[0]));
        assert!(state.is_empty());
        assert_eq!(state.mode(), DisplayMode::Grid);
        assert_eq!(state.focused_index(), 0);
        assert_eq!(state.controls(), ControlVisibility::default());
    }

    #[test]
    fn removing_focused_tail_card_clamps_index() {
        let (mut state, ids) = deck(&["a", "b", "c"]);
        state.toggle_mode();
        state.navigate(Direction::Prev);
        assert_eq!(state.focused_index(), 2);

        state.remove_card(ids[2]);
        assert_eq!(state.focused_index(), 1);
        assert_eq!(state.mode(), DisplayMode::Focus);
        assert!(state.card(ids[1]).unwrap().is_active());
        assert_eq!(state.controls().counter, Some((2, 2)));
    }

    #[test]
    fn remove_unknown_card_is_noop() {
        let (mut state, _) = deck(&["a"]);
        let before = state.clone();
        assert!(!state.remove_card(999));
        assert_eq!(state, before);
    }

    #[test]
    fn begin_removal_debounces_per_card() {
        let (mut state, ids) = deck(&["a", "b"]);
        assert!(state.begin_removal(ids[0]));
        assert!(!state.begin_removal(ids[0]));
        assert!(state.begin_removal(ids[1]));
        assert!(!state.begin_removal(42));
        assert!(state.card(ids[0]).unwrap().is_removing());
    }

    #[test]
    fn shuffle_is_a_permutation_for_any_size() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in 0..8 {
            let names: Vec<String> = (0..size).map(|n| format!("t{n}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let (mut state, mut ids) = deck(&refs);

            state.shuffle(&mut rng);

            let mut after: Vec<CardId> = state.cards().iter().map(CardHandle::id).collect();
            after.sort_unstable();
            ids.sort_unstable();
            assert_eq!(after, ids, "size {size}");
        }
    }

    #[test]
    fn shuffle_keeps_mode_and_index() {
        let (mut state, _) = deck(&["a", "b", "c", "d"]);
        state.toggle_mode();
        state.navigate(Direction::Next);

        state.shuffle(&mut StdRng::seed_from_u64(3));
        assert_eq!(state.mode(), DisplayMode::Focus);
        assert_eq!(state.focused_index(), 1);
        assert!(state.cards()[1].is_active());
    }

    #[test]
    fn toggle_flip_touches_only_one_card() {
        let (mut state, ids) = deck(&["a", "b"]);
        assert!(state.toggle_flip(ids[1]));
        assert!(!state.card(ids[0]).unwrap().is_flipped());
        assert!(state.card(ids[1]).unwrap().is_flipped());
        assert!(state.toggle_flip(ids[1]));
        assert!(!state.card(ids[1]).unwrap().is_flipped());
    }

    #[test]
    fn duplicate_terms_are_kept() {
        let (state, ids) = deck(&["Cat", "Cat"]);
        assert_eq!(state.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }
}
