use crate::TermDefinitionPair;

/// Asks for one `Term: Emoji` line per term, terms verbatim and in order.
pub fn emoji_prompt(pairs: &[TermDefinitionPair]) -> String {
    let terms = pairs
        .iter()
        .map(|pair| pair.term.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Pick one emoji that best represents each of the following terms.\n\
         Return exactly one line per term, in the same order, formatted as \"Term: Emoji\".\n\
         Write every term exactly as given, with the same spelling and capitalization.\n\
         Do not add numbering, headings, explanations or any other text.\n\
         \n\
         Terms:\n\
         {terms}"
    )
}

/// Asks for `emoji: term: definition` lines about `topic`.
pub fn flashcards_prompt(topic: &str) -> String {
    format!(
        "Generate a list of flashcards for the topic \"{topic}\".\n\
         Return one flashcard per line, formatted as \"emoji: term: definition\".\n\
         Write each definition in the same language as the topic and keep it concise.\n\
         Do not add numbering, headings, explanations or any other text."
    )
}
