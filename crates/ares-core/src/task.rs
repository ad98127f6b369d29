//! Keyword-based task detection for model routing.
//!
//! This is intentionally simple pattern matching, not a trained classifier:
//! an ordered list of keyword rules evaluated top-down, stopping at the first
//! match. Code indicators outrank math indicators, which outrank creative
//! indicators; anything else is general. Matching is case-insensitive.

use std::fmt;

/// Coarse category of user intent, used only to pick a backend model.
/// Derived per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    Code,
    Math,
    Creative,
    General,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Code => write!(f, "code"),
            TaskType::Math => write!(f, "math"),
            TaskType::Creative => write!(f, "creative"),
            TaskType::General => write!(f, "general"),
        }
    }
}

// Keywords ending in a space or dot match constructs like `def foo` or
// `console.log` without also firing on the bare word.
const CODE_KEYWORDS: &[&str] = &[
    "code", "function", "def ", "class ", "import ", "console.", "for ", "while ",
];

const MATH_KEYWORDS: &[&str] = &["calculate", "math", "equation", "solve", "formula", "compute"];

const MATH_CHARS: &[char] = &['+', '-', '*', '/', '(', ')', '=', '%', '^'];

const CREATIVE_KEYWORDS: &[&str] = &["story", "write", "poem", "creative", "fiction", "narrative"];

/// Classify a message into a task category.
///
/// Rules in priority order, first match wins:
///
/// 1. a code keyword (word-boundary match) → [`TaskType::Code`]
/// 2. a math keyword, a digit, or an arithmetic operator → [`TaskType::Math`]
/// 3. a creative keyword → [`TaskType::Creative`]
/// 4. otherwise → [`TaskType::General`]
pub fn classify(message: &str) -> TaskType {
    let msg = message.to_lowercase();

    if CODE_KEYWORDS.iter().any(|k| contains_keyword(&msg, k)) {
        return TaskType::Code;
    }
    if MATH_KEYWORDS.iter().any(|k| contains_keyword(&msg, k))
        || msg
            .chars()
            .any(|c| c.is_ascii_digit() || MATH_CHARS.contains(&c))
    {
        return TaskType::Math;
    }
    if CREATIVE_KEYWORDS.iter().any(|k| contains_keyword(&msg, k)) {
        return TaskType::Creative;
    }
    TaskType::General
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Word-boundary keyword search.
///
/// The match must not butt up against a word character on the left. On the
/// right, a keyword ending in a word character must be followed by a non-word
/// character or the end of input, while a keyword ending in a space or dot
/// must be followed by a word character (`"def "` matches `def foo`, not a
/// trailing `def ` at the end of a message).
///
/// Keywords are ASCII, so the scan works on bytes; multi-byte characters in
/// the haystack count as non-word neighbors.
fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    let hay = haystack.as_bytes();
    let pat = keyword.as_bytes();
    if pat.is_empty() || hay.len() < pat.len() {
        return false;
    }

    for (start, window) in hay.windows(pat.len()).enumerate() {
        if window != pat {
            continue;
        }
        let end = start + pat.len();
        let before_ok = start == 0 || !is_word_byte(hay[start - 1]);
        let after_ok = if is_word_byte(pat[pat.len() - 1]) {
            end == hay.len() || !is_word_byte(hay[end])
        } else {
            end < hay.len() && is_word_byte(hay[end])
        };
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_keywords_detected() {
        assert_eq!(classify("review my code please"), TaskType::Code);
        assert_eq!(classify("what does this function do"), TaskType::Code);
        assert_eq!(classify("def fibonacci(n):"), TaskType::Code);
        assert_eq!(classify("why is console.log empty"), TaskType::Code);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("CODE"), TaskType::Code);
        assert_eq!(classify("Fix My Code"), TaskType::Code);
        assert_eq!(classify("SOLVE THIS RIDDLE"), TaskType::Math);
    }

    #[test]
    fn digits_and_operators_are_math() {
        assert_eq!(classify("2+2="), TaskType::Math);
        assert_eq!(classify("what is seven % three"), TaskType::Math);
        assert_eq!(classify("room 101"), TaskType::Math);
    }

    #[test]
    fn math_keywords_detected() {
        assert_eq!(classify("compute the answer"), TaskType::Math);
        assert_eq!(classify("is there a formula"), TaskType::Math);
    }

    #[test]
    fn code_outranks_math() {
        assert_eq!(classify("calculate this function"), TaskType::Code);
        assert_eq!(classify("solve this code puzzle"), TaskType::Code);
    }

    #[test]
    fn math_outranks_creative() {
        assert_eq!(classify("write an equation"), TaskType::Math);
    }

    #[test]
    fn creative_keywords_detected() {
        assert_eq!(classify("tell me a story"), TaskType::Creative);
        assert_eq!(classify("a poem about the sea"), TaskType::Creative);
    }

    #[test]
    fn everything_else_is_general() {
        assert_eq!(classify("hello there"), TaskType::General);
        assert_eq!(classify(""), TaskType::General);
        assert_eq!(classify("how are you today"), TaskType::General);
    }

    #[test]
    fn keywords_require_word_boundaries() {
        // "encode" contains "code" but not as a word.
        assert_eq!(classify("please encode this string"), TaskType::General);
        // "therefor it" contains "for " but runs into the preceding word.
        assert_eq!(classify("therefor it remains"), TaskType::General);
    }

    #[test]
    fn trailing_space_keywords_need_a_following_word() {
        // "for " mid-sentence matches; a dangling "for " at the end does not.
        assert_eq!(classify("a gift for you"), TaskType::Code);
        assert_eq!(classify("what is it for "), TaskType::General);
        // "console." needs a member access after the dot.
        assert_eq!(classify("check the console."), TaskType::General);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(TaskType::Code.to_string(), "code");
        assert_eq!(TaskType::General.to_string(), "general");
    }
}
