//! Sentence splitter.
//!
//! Deterministic segmentation of chapter plain text into an ordered sentence
//! sequence. Splits on terminal punctuation with guards against common
//! abbreviations and decimal numbers, so "Mr. Smith" and "3.14" stay intact.
//! Chapter boundaries are never crossed: the splitter only ever sees one
//! chapter's text.

use crate::align::types::Sentence;
use crate::text::normalize::normalize;

/// Abbreviations whose trailing period does not end a sentence. Compared
/// case-insensitively against the word preceding the period.
const ABBREVIATIONS: [&str; 14] = [
    "mr", "mrs", "ms", "dr", "st", "prof", "sr", "jr", "vs", "etc", "no", "vol", "col", "gen",
];

/// Split one chapter's plain text into ordered sentences.
///
/// `raw_text` preserves the original text verbatim (trimmed of surrounding
/// whitespace); indices are 0-based and chapter-relative. Sentences whose
/// normalized form is empty (pure punctuation) are still emitted so indices
/// stay aligned with what a reader sees, but they never match any audio.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '!' || c == '?' || (c == '.' && is_sentence_period(&chars, i)) {
            // Attach any closing quotes or brackets to the current sentence.
            let mut end = i + 1;
            while end < chars.len() && is_closer(chars[end]) {
                end += 1;
            }
            push_sentence(&mut sentences, &chars[start..end]);
            start = end;
            i = end;
        } else {
            i += 1;
        }
    }
    if start < chars.len() {
        push_sentence(&mut sentences, &chars[start..]);
    }
    sentences
}

fn push_sentence(sentences: &mut Vec<Sentence>, chars: &[char]) {
    let raw: String = chars.iter().collect();
    let raw = raw.trim();
    if raw.is_empty() {
        return;
    }
    sentences.push(Sentence {
        index: sentences.len(),
        raw_text: raw.to_string(),
        normalized_text: normalize(raw),
    });
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

/// Whether the period at `idx` terminates a sentence, as opposed to ending an
/// abbreviation or sitting inside a decimal number.
fn is_sentence_period(chars: &[char], idx: usize) -> bool {
    // Decimal number: digit on both sides.
    let prev_digit = idx > 0 && chars[idx - 1].is_ascii_digit();
    let next_digit = idx + 1 < chars.len() && chars[idx + 1].is_ascii_digit();
    if prev_digit && next_digit {
        return false;
    }

    // Collect the word immediately before the period.
    let mut word_start = idx;
    while word_start > 0 && chars[word_start - 1].is_alphabetic() {
        word_start -= 1;
    }
    let word: String = chars[word_start..idx].iter().collect::<String>().to_lowercase();
    if ABBREVIATIONS.contains(&word.as_str()) {
        return false;
    }

    // Initials like "J. K. Rowling": single capital letter before the period.
    if word.chars().count() == 1 && chars[word_start].is_uppercase() {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(sentences: &[Sentence]) -> Vec<&str> {
        sentences.iter().map(|s| s.raw_text.as_str()).collect()
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let sentences = split_sentences("Hello world! This is a test. Another sentence?");
        assert_eq!(
            raw(&sentences),
            vec!["Hello world!", "This is a test.", "Another sentence?"]
        );
    }

    #[test]
    fn indices_are_ordered_and_stable() {
        let sentences = split_sentences("One. Two. Three.");
        let indices: Vec<usize> = sentences.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn guards_against_abbreviations() {
        let sentences = split_sentences("Mr. Smith went home. He slept.");
        assert_eq!(raw(&sentences), vec!["Mr. Smith went home.", "He slept."]);
    }

    #[test]
    fn guards_against_decimals() {
        let sentences = split_sentences("Pi is about 3.14 in value. Indeed.");
        assert_eq!(
            raw(&sentences),
            vec!["Pi is about 3.14 in value.", "Indeed."]
        );
    }

    #[test]
    fn guards_against_initials() {
        let sentences = split_sentences("J. K. Rowling wrote it. True story.");
        assert_eq!(
            raw(&sentences),
            vec!["J. K. Rowling wrote it.", "True story."]
        );
    }

    #[test]
    fn closing_quote_stays_with_sentence() {
        let sentences = split_sentences("\"Stop!\" she cried. He stopped.");
        assert_eq!(raw(&sentences), vec!["\"Stop!\"", "she cried.", "He stopped."]);
    }

    #[test]
    fn trailing_text_without_terminator_is_kept() {
        let sentences = split_sentences("A full sentence. and a dangling fragment");
        assert_eq!(
            raw(&sentences),
            vec!["A full sentence.", "and a dangling fragment"]
        );
    }

    #[test]
    fn empty_text_yields_no_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n  ").is_empty());
    }

    #[test]
    fn normalized_text_is_populated() {
        let sentences = split_sentences("The cat sat.");
        assert_eq!(sentences[0].normalized_text, "the cat sat");
    }
}
