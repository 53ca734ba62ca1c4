//! Scanner helpers for the literal and phrase forms of one source line.

use crate::error::{CompileError, CompileResult};
use crate::lexer::cursor::Cursor;
use crate::lexer::token::{Token, TokenKind, TokenValue};
use crate::lexer::vocabulary::{ORDINAL_SUFFIXES, TEMPERATURE_SCALES, is_key_phrase};

/// Returns `true` for characters that may continue a word.
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Returns `true` for whitespace that does not end a line.
pub(crate) fn is_horizontal_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r')
}

/// Skips spaces, tabs, and carriage returns.
pub(crate) fn skip_horizontal_whitespace(cursor: &mut Cursor, input: &str) {
    let _ = cursor.advance_while(input, is_horizontal_whitespace);
}

/// Scans an integer literal and classifies it by its suffix.
///
/// `5.` is a step label, `230C` a temperature, `3rd` an ordinal and a bare
/// `5` a number. Any other suffix is rejected.
pub(crate) fn scan_number(cursor: &mut Cursor, input: &str) -> CompileResult<Token> {
    let start = cursor.location();
    let digits = cursor.advance_while(input, |ch| ch.is_ascii_digit());
    let value: i64 = digits
        .parse()
        .map_err(|_| CompileError::lexical("number too large", Some(start)))?;

    if cursor.peek_char(input) == Some('.') {
        let _ = cursor.advance_char(input);
        return Ok(Token::new(
            TokenKind::StepLabel,
            TokenValue::Integer(value),
            start,
        ));
    }

    let suffix_location = cursor.location();
    let suffix = cursor.advance_while(input, is_word_char);
    if suffix.is_empty() {
        return Ok(Token::new(
            TokenKind::Number,
            TokenValue::Integer(value),
            start,
        ));
    }
    if TEMPERATURE_SCALES.contains(&suffix) {
        return Ok(Token::new(
            TokenKind::Temperature,
            TokenValue::Text(format!("{value}{suffix}")),
            start,
        ));
    }
    if ORDINAL_SUFFIXES.contains(&suffix) {
        return Ok(Token::new(
            TokenKind::Ordinal,
            TokenValue::Integer(value),
            start,
        ));
    }

    Err(CompileError::lexical(
        format!("unknown number suffix \"{suffix}\""),
        Some(suffix_location),
    ))
}

/// Scans a maximal run of same-case words.
///
/// Lowercase runs must spell a known key phrase; Title Case runs are
/// identifiers. Inner whitespace collapses to one space.
pub(crate) fn scan_phrase(cursor: &mut Cursor, input: &str) -> CompileResult<Token> {
    let start = cursor.location();
    let lowercase = cursor
        .peek_char(input)
        .is_some_and(|ch| ch.is_ascii_lowercase());

    let mut words = Vec::new();
    loop {
        words.push(cursor.advance_while(input, is_word_char));
        skip_horizontal_whitespace(cursor, input);
        match cursor.peek_char(input) {
            Some(ch) if ch.is_ascii_alphabetic() && ch.is_ascii_lowercase() == lowercase => {}
            _ => break,
        }
    }

    let phrase = words.join(" ");
    if !lowercase {
        return Ok(Token::new(
            TokenKind::Identifier,
            TokenValue::Text(phrase),
            start,
        ));
    }
    if is_key_phrase(&phrase) {
        return Ok(Token::new(
            TokenKind::KeyPhrase,
            TokenValue::Text(phrase),
            start,
        ));
    }

    Err(CompileError::lexical(
        format!("unknown key phrase \"{phrase}\"; identifiers must be Title Case"),
        Some(start),
    ))
}

/// Scans a double-quoted string. Escapes are not recognised.
pub(crate) fn scan_string(cursor: &mut Cursor, input: &str) -> CompileResult<Token> {
    let start = cursor.location();
    let _ = cursor.advance_char(input);
    let body_start = cursor.byte_offset();

    loop {
        match cursor.peek_char(input) {
            Some('"') => break,
            Some('\n') | None => {
                return Err(CompileError::lexical("unterminated string", Some(start)));
            }
            Some(_) => {
                let _ = cursor.advance_char(input);
            }
        }
    }

    let text = input[body_start..cursor.byte_offset()].to_string();
    let _ = cursor.advance_char(input);
    Ok(Token::new(TokenKind::String, TokenValue::Text(text), start))
}
