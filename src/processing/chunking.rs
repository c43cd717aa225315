//! Word-budget chunking that respects the downstream model's input limit.
//!
//! The abstractive model truncates inputs past a fixed token budget, so long documents are
//! split into sentence groups first and summarized group by group. Word counts stand in
//! for token counts; the budget is sized conservatively enough that the difference does
//! not matter in practice.

use super::types::ChunkingError;

/// Default word budget per chunk.
pub const DEFAULT_MAX_WORDS: usize = 900;

/// Split text into sentence groups whose word counts stay below `max_words`.
///
/// Fragments come from splitting on the literal period and are re-terminated with a
/// period as they are appended. A fragment joins the running chunk while the combined
/// word count stays strictly below the budget; otherwise the current chunk is finalized
/// and the fragment starts a new one. A single sentence above the budget therefore lands
/// alone in an oversized chunk, which the model host truncates.
///
/// Returns an empty vector for whitespace-only input.
pub fn chunk_text(text: &str, max_words: usize) -> Result<Vec<String>, ChunkingError> {
    if max_words == 0 {
        return Err(ChunkingError::InvalidWordBudget);
    }
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for fragment in text.split('.') {
        if fragment.trim().is_empty() {
            continue;
        }
        if count_words(&current) + count_words(fragment) < max_words {
            current.push_str(fragment);
            current.push('.');
        } else {
            push_chunk(&mut chunks, &current);
            current = format!("{fragment}.");
        }
    }
    push_chunk(&mut chunks, &current);

    Ok(chunks)
}

fn push_chunk(chunks: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

pub(crate) fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
