use muffin::lexer::{TokenKind, tokenize};

fn collect_tokens(input: &str) -> Vec<(TokenKind, String)> {
    tokenize(input)
        .expect("scan should succeed")
        .into_iter()
        .filter(|token| !matches!(token.kind, TokenKind::Newline | TokenKind::EndOfInput))
        .map(|token| {
            let text = match token.integer() {
                Some(value) => value.to_string(),
                None => token.text().unwrap_or_default().to_string(),
            };
            (token.kind, text)
        })
        .collect()
}

#[test]
fn title_case_run_is_one_identifier() {
    assert_eq!(
        collect_tokens("Foo Bar Baz"),
        vec![(TokenKind::Identifier, "Foo Bar Baz".to_string())]
    );
}

#[test]
fn case_change_ends_a_phrase() {
    assert_eq!(
        collect_tokens("add Flour into 2nd Mixing Bowl"),
        vec![
            (TokenKind::KeyPhrase, "add".to_string()),
            (TokenKind::Identifier, "Flour".to_string()),
            (TokenKind::KeyPhrase, "into".to_string()),
            (TokenKind::Ordinal, "2".to_string()),
            (TokenKind::Identifier, "Mixing Bowl".to_string()),
        ]
    );
}

#[test]
fn predicate_line_splits_at_comma() {
    assert_eq!(
        collect_tokens("if Cake Mold is not empty, go back to step 2"),
        vec![
            (TokenKind::KeyPhrase, "if".to_string()),
            (TokenKind::Identifier, "Cake Mold".to_string()),
            (TokenKind::KeyPhrase, "is not empty".to_string()),
            (TokenKind::Comma, String::new()),
            (TokenKind::KeyPhrase, "go back to step".to_string()),
            (TokenKind::Number, "2".to_string()),
        ]
    );
}

#[test]
fn identifiers_may_contain_digits_and_underscores() {
    assert_eq!(
        collect_tokens("Sugar_2 Cane"),
        vec![(TokenKind::Identifier, "Sugar_2 Cane".to_string())]
    );
}
