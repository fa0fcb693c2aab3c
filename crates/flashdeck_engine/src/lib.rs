//! Flashdeck engine: text generation, response parsing and the background
//! worker that runs generation requests.
mod engine;
mod generator;
mod parse;
mod pipeline;
mod prompt;
mod types;

pub use engine::EngineHandle;
pub use generator::{
    GeminiGenerator, GeneratorSettings, TextGenerator, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use parse::{
    build_records, parse_flashcard_lines, parse_flashcards, parse_term_definitions,
    parse_term_lines, EmojiAssignment, InputMode, LineOutcome, FALLBACK_EMOJI,
};
pub use pipeline::generate_flashcards;
pub use prompt::{emoji_prompt, flashcards_prompt};
pub use types::{
    EngineEvent, FlashcardRecord, GenerationError, RequestId, ServiceError, ServiceFailure,
    TermDefinitionPair,
};
