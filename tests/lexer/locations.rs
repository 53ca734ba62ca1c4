use muffin::lexer::{Location, TokenKind, tokenize};

#[test]
fn tokens_carry_line_column_and_offset() {
    let tokens = tokenize("Muffin recipe\n  1. serves 1\n").expect("scan");
    let located: Vec<(TokenKind, Location)> = tokens
        .iter()
        .map(|token| (token.kind, token.location))
        .collect();

    assert_eq!(
        located,
        vec![
            (TokenKind::Identifier, Location::new(1, 1, 0)),
            (TokenKind::KeyPhrase, Location::new(1, 8, 7)),
            (TokenKind::Newline, Location::new(1, 14, 13)),
            (TokenKind::StepLabel, Location::new(2, 3, 16)),
            (TokenKind::KeyPhrase, Location::new(2, 6, 19)),
            (TokenKind::Number, Location::new(2, 13, 26)),
            (TokenKind::Newline, Location::new(2, 14, 27)),
            (TokenKind::EndOfInput, Location::new(3, 1, 28)),
        ]
    );
}

#[test]
fn offsets_count_characters_not_bytes() {
    let tokens = tokenize("\"é\" brand Flour").expect("scan");
    assert_eq!(tokens[1].location, Location::new(1, 5, 4));
}

#[test]
fn location_displays_as_line_and_column() {
    assert_eq!(Location::new(4, 12, 80).to_string(), "4:12");
    assert_eq!(Location::default(), Location::start());
}
