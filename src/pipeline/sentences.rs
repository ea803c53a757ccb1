//! Punctuation-based sentence splitting.
//!
//! A boundary falls right after `.`, `?` or `!` when the next character is
//! whitespace. Abbreviations ("Dr. Rao"), decimals followed by a space and
//! quoted punctuation are not special-cased, so they over-split. Bullet
//! boundaries depend on this exact behaviour.

/// Split a block of text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '?' | '!') {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek() {
            if next.is_whitespace() {
                push_trimmed(&mut sentences, &text[start..next_idx]);
                start = next_idx;
            }
        }
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece);
    }
}
