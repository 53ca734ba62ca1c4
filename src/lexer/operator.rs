//! Single-character operator scanning.

use crate::lexer::token::TokenKind;

/// Maps an operator character to its token kind.
pub(crate) fn operator_kind(ch: char) -> Option<TokenKind> {
    match ch {
        ',' => Some(TokenKind::Comma),
        ':' => Some(TokenKind::Colon),
        _ => None,
    }
}
