use crate::domain::model::{ContentBlock, RichTextNode};

pub const WORDS_PER_MINUTE: u64 = 200;

/// Plain text of a rich-text body: node texts joined by a single space, spans ignored.
pub fn as_text(body: &[RichTextNode]) -> String {
    body.iter()
        .map(|node| node.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace-separated tokens. Empty and whitespace-only input count zero words.
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Heading and body words of every block, in block order.
pub fn total_words(content: &[ContentBlock]) -> u64 {
    content.iter().fold(0, |acc, block| {
        let mut words = acc;
        if !block.heading.is_empty() {
            words += word_count(&block.heading);
        }
        if !block.body.is_empty() {
            words += word_count(&as_text(&block.body));
        }
        words
    })
}

/// Whole minutes at 200 words per minute, rounded up.
pub fn reading_time_minutes(content: &[ContentBlock]) -> u64 {
    minutes_for_words(total_words(content))
}

pub fn minutes_for_words(words: u64) -> u64 {
    words.div_ceil(WORDS_PER_MINUTE)
}
