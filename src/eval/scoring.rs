//! Answer matching for a single question.

use unicode_normalization::UnicodeNormalization;

/// 1 if any reference answer occurs in any candidate text, else 0.
///
/// Answers are trimmed and lower-cased, texts are lower-cased; the match is a
/// plain substring test. An empty answer therefore matches any text.
pub fn instance_score<A, T>(answers: &[A], texts: &[T]) -> u32
where
    A: AsRef<str>,
    T: AsRef<str>,
{
    let texts: Vec<String> = texts.iter().map(|t| t.as_ref().to_lowercase()).collect();
    let hit = answers.iter().any(|answer| {
        let answer = answer.as_ref().trim().to_lowercase();
        texts.iter().any(|text| text.contains(answer.as_str()))
    });
    u32::from(hit)
}

/// Canonical decomposition (NFD) of a question before it is ranked.
pub fn normalize_question(question: &str) -> String {
    question.nfd().collect()
}
