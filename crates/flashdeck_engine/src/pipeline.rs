use flashdeck_logging::{deck_info, deck_warn};

use crate::parse::{build_records, parse_flashcards, parse_term_definitions, EmojiAssignment};
use crate::prompt::{emoji_prompt, flashcards_prompt};
use crate::{FlashcardRecord, GenerationError, InputMode, TextGenerator};

/// Turns one topic entry into flashcards.
///
/// Key-value input (`term: definition` lines) is validated locally before a
/// single emoji lookup is issued; anything else is sent to the model for full
/// generation. An empty result is always an error.
pub async fn generate_flashcards(
    generator: &dyn TextGenerator,
    topic: &str,
) -> Result<Vec<FlashcardRecord>, GenerationError> {
    if topic.trim().is_empty() {
        return Err(GenerationError::EmptyTopic);
    }

    let records = match InputMode::detect(topic) {
        InputMode::KeyValue => from_term_list(generator, topic).await?,
        InputMode::FreeForm => from_topic(generator, topic.trim()).await?,
    };

    if records.is_empty() {
        deck_warn!("Generation produced no flashcards");
        return Err(GenerationError::NoFlashcards);
    }
    deck_info!("Generated {} flashcards", records.len());
    Ok(records)
}

async fn from_term_list(
    generator: &dyn TextGenerator,
    input: &str,
) -> Result<Vec<FlashcardRecord>, GenerationError> {
    let pairs = parse_term_definitions(input);
    // `InputMode::detect` only routes here when some line has a colon, and
    // every such line yields a pair; this stays unreachable from
    // `generate_flashcards`.
    if pairs.is_empty() {
        return Err(GenerationError::Validation);
    }

    let response = generator.generate(&emoji_prompt(&pairs)).await?;
    let emojis = EmojiAssignment::resolve(pairs.iter().map(|pair| pair.term.as_str()), &response);
    if emojis.len() < pairs.len() {
        deck_info!(
            "Emoji lookup matched {} of {} terms; using fallback for the rest",
            emojis.len(),
            pairs.len()
        );
    }
    Ok(build_records(pairs, &emojis))
}

async fn from_topic(
    generator: &dyn TextGenerator,
    topic: &str,
) -> Result<Vec<FlashcardRecord>, GenerationError> {
    let response = generator.generate(&flashcards_prompt(topic)).await?;
    Ok(parse_flashcards(&response))
}
