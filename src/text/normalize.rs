//! Token stream normalizer.
//!
//! Canonicalizes transcribed words and ebook sentences into a comparable
//! lexical form so fuzzy similarity is robust to transcription noise. Must be
//! applied identically to both sides of the comparison.

/// Normalize text into its canonical comparable form.
///
/// Lowercases, turns apostrophes into spaces (so "don't" and "don t" compare
/// equal), strips punctuation that carries no phonetic information, collapses
/// whitespace, and expands standalone integers 0-99 into their spoken word
/// forms ("42" becomes "forty two") to match likely ASR output.
///
/// Pure and deterministic; empty input yields empty output.
pub fn normalize(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\'' | '\u{2019}' => cleaned.push(' '),
            c if c.is_alphanumeric() => {
                for lower in c.to_lowercase() {
                    cleaned.push(lower);
                }
            }
            _ => cleaned.push(' '),
        }
    }

    let mut out = String::with_capacity(cleaned.len());
    for word in cleaned.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        match expand_number(word) {
            Some(spoken) => out.push_str(&spoken),
            None => out.push_str(word),
        }
    }
    out
}

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Spoken form of a standalone integer 0-99. Larger numbers and mixed
/// alphanumerics are left alone; ASR output for those is too variable to
/// guess.
fn expand_number(word: &str) -> Option<String> {
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u32 = word.parse().ok()?;
    if n >= 100 {
        return None;
    }
    let spoken = if n < 20 {
        ONES[n as usize].to_string()
    } else {
        let tens = TENS[(n / 10) as usize];
        let ones = n % 10;
        if ones == 0 {
            tens.to_string()
        } else {
            format!("{} {}", tens, ONES[ones as usize])
        }
    };
    Some(spoken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize("The cat sat."), "the cat sat");
        assert_eq!(normalize("Hello, World!"), "hello world");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  a \t b \n c  "), "a b c");
    }

    #[test]
    fn apostrophes_become_spaces() {
        assert_eq!(normalize("don't"), "don t");
        assert_eq!(normalize("it\u{2019}s"), "it s");
    }

    #[test]
    fn empty_in_empty_out() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("..."), "");
    }

    #[test]
    fn expands_small_numbers() {
        assert_eq!(normalize("Chapter 7"), "chapter seven");
        assert_eq!(normalize("42 things"), "forty two things");
        assert_eq!(normalize("20"), "twenty");
    }

    #[test]
    fn leaves_large_numbers_alone() {
        assert_eq!(normalize("1818"), "1818");
        assert_eq!(normalize("100"), "100");
    }

    #[test]
    fn deterministic_for_identical_input() {
        let text = "Mr. O'Brien read 12 pages!";
        assert_eq!(normalize(text), normalize(text));
    }

    #[test]
    fn token_and_sentence_sides_agree() {
        // The same words must canonicalize identically whether they arrive as
        // single ASR tokens or as part of a sentence.
        let tokens = ["The", "cat", "sat"];
        let joined: Vec<String> = tokens.iter().map(|t| normalize(t)).collect();
        assert_eq!(joined.join(" "), normalize("The cat sat."));
    }
}
