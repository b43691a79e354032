//! Delimited line splitting for feed rows
//!
//! Quotes toggle a span in which the delimiter is literal. The quote
//! characters themselves are dropped and no escape sequences are recognised,
//! so unbalanced quotes simply leave the rest of the line in the final field.

use crate::constants::{FIELD_DELIMITER, QUOTE_CHAR};

/// Split a line on the feed delimiter, honouring quoted spans
///
/// Every field is trimmed. The result always holds at least one element
/// because the trailing field is pushed even when empty.
pub fn split_line(line: &str) -> Vec<String> {
    split_line_with(line, FIELD_DELIMITER)
}

/// Split a line on an arbitrary delimiter, honouring quoted spans
pub fn split_line_with(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == QUOTE_CHAR {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }

    fields.push(current.trim().to_string());
    fields
}
