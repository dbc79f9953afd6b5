use std::sync::OnceLock;

use regex::Regex;

use crate::model::Candidate;

/// Scripts written without spaces between words. Each of their characters
/// becomes a token on its own.
const DENSE_SCRIPT_PATTERN: &str =
    r"^[\p{Script=Han}\p{Script=Hiragana}\p{Script=Katakana}\p{Script=Thai}\p{Script=Arabic}\p{Script=Hangul}]$";

static DENSE_SCRIPT: OnceLock<Regex> = OnceLock::new();

fn is_dense_script(ch: char) -> bool {
    let regex = DENSE_SCRIPT
        .get_or_init(|| Regex::new(DENSE_SCRIPT_PATTERN).expect("dense script pattern is valid"));
    let mut buf = [0_u8; 4];
    regex.is_match(ch.encode_utf8(&mut buf))
}

/// Splits a query into lowercase, script-homogeneous tokens.
///
/// Whitespace separates parts; inside a part every dense-script character is
/// its own token and runs of other characters are kept together.
pub fn tokenize(query: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for part in query.split_whitespace() {
        let mut run = String::new();
        for ch in part.chars() {
            if is_dense_script(ch) {
                if !run.is_empty() {
                    tokens.push(std::mem::take(&mut run).to_lowercase());
                }
                tokens.push(ch.to_lowercase().collect());
            } else {
                run.push(ch);
            }
        }
        if !run.is_empty() {
            tokens.push(run.to_lowercase());
        }
    }

    tokens.retain(|token| !token.is_empty());
    tokens
}

/// Keeps the candidates that contain every query token, in their original
/// order. A query without tokens keeps everything.
pub fn fuzzy_filter<T>(query: &str, candidates: &[T]) -> Vec<T>
where
    T: AsRef<str> + Clone,
{
    retain_matching(&tokenize(query), candidates, |candidate| {
        candidate.as_ref().to_string()
    })
}

pub fn fuzzy_matches(query: &str, text: &str) -> bool {
    !fuzzy_filter(query, &[text]).is_empty()
}

/// Filters typed records by their title and URL.
pub fn filter_candidates<T>(query: &str, items: &[T]) -> Vec<T>
where
    T: Candidate + Clone,
{
    retain_matching(&tokenize(query), items, T::haystack)
}

fn retain_matching<T, F>(tokens: &[String], items: &[T], haystack: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    if tokens.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| contains_all(&haystack(*item).to_lowercase(), tokens))
        .cloned()
        .collect()
}

fn contains_all(lowered: &str, tokens: &[String]) -> bool {
    tokens.iter().all(|token| lowered.contains(token.as_str()))
}
