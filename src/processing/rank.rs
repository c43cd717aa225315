//! Extractive sentence ranking over a TF-IDF statistic.
//!
//! Sentences act as the corpus: the vocabulary is built from unigrams and bigrams across
//! all candidate sentences, each sentence's term weights are L2-normalized, and a sentence
//! scores the sum of its normalized weights. The result is computed for internal reporting
//! only; the HTTP response never includes it.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Minimum sentence length (in characters, after trimming) to qualify for ranking.
const MIN_SENTENCE_CHARS: usize = 21;

/// Select the `keep` highest-scoring sentences and join them with `". "`.
///
/// Sentences come from splitting on the literal period; fragments shorter than 21
/// characters are discarded. When no more than `keep` sentences qualify, all of them are
/// returned in original order and no ranking happens.
///
/// Ranked output is ordered by descending score, ties broken by descending sentence text.
/// Pass `document_order` to re-sort the selected sentences into their original positions
/// instead.
pub fn extractive_summary(text: &str, keep: usize, document_order: bool) -> String {
    let sentences: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| s.len() >= MIN_SENTENCE_CHARS)
        .collect();

    if sentences.len() <= keep {
        return sentences.join(". ");
    }

    let scores = tfidf_scores(&sentences);
    let mut ranked: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| sentences[b.0].cmp(sentences[a.0]))
    });

    let mut selected: Vec<usize> = ranked.into_iter().take(keep).map(|(idx, _)| idx).collect();
    if document_order {
        selected.sort_unstable();
    }

    selected
        .into_iter()
        .map(|idx| sentences[idx])
        .collect::<Vec<_>>()
        .join(". ")
}

/// Score each sentence as the sum of its L2-normalized TF-IDF weights.
fn tfidf_scores(sentences: &[&str]) -> Vec<f64> {
    let terms: Vec<Vec<String>> = sentences
        .iter()
        .map(|sentence| ngram_terms(&tokenize(sentence)))
        .collect();
    let idf = compute_idf(&terms);

    terms
        .iter()
        .map(|sentence_terms| {
            if sentence_terms.is_empty() {
                return 0.0;
            }

            let mut tf: HashMap<&str, f64> = HashMap::new();
            for term in sentence_terms {
                *tf.entry(term.as_str()).or_insert(0.0) += 1.0;
            }

            let weights: Vec<f64> = tf
                .iter()
                .map(|(term, count)| count * idf.get(*term).copied().unwrap_or(0.0))
                .collect();
            let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                weights.iter().sum::<f64>() / norm
            } else {
                0.0
            }
        })
        .collect()
}

/// Lowercased alphanumeric tokens of at least two characters.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Expand a token sequence into its unigram and bigram terms.
fn ngram_terms(tokens: &[String]) -> Vec<String> {
    let mut terms = tokens.to_vec();
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

/// Smoothed inverse document frequency over the sentence corpus.
fn compute_idf(documents: &[Vec<String>]) -> HashMap<String, f64> {
    let n = documents.len() as f64;
    let mut document_freq: HashMap<&str, usize> = HashMap::new();

    for doc in documents {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            *document_freq.entry(term).or_insert(0) += 1;
        }
    }

    document_freq
        .into_iter()
        .map(|(term, df)| {
            let idf = ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0;
            (term.to_string(), idf)
        })
        .collect()
}
