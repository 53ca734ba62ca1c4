use muffin::lexer::{Lexer, TokenKind};

#[test]
fn end_of_input_is_sticky() {
    let mut lexer = Lexer::new("serves 1");
    let mut end = lexer.next_token().expect("scan");
    while end.kind != TokenKind::EndOfInput {
        end = lexer.next_token().expect("scan");
    }
    assert_eq!(end.location.offset, 8);

    for _ in 0..4 {
        let again = lexer.next_token().expect("scan");
        assert_eq!(again, end);
    }
}

#[test]
fn iterator_yields_end_once_then_stops() {
    let tokens: Vec<_> = Lexer::new("serves 1\n").collect();
    assert_eq!(tokens.len(), 4);
    assert!(matches!(
        tokens.last(),
        Some(Ok(token)) if token.kind == TokenKind::EndOfInput
    ));
}

#[test]
fn lexing_is_lazy_up_to_the_failing_line() {
    let mut lexer = Lexer::new("Muffin recipe\ningredients\n  ?\n");
    assert_eq!(lexer.next_token().expect("scan").kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().expect("scan").kind, TokenKind::KeyPhrase);
    assert_eq!(lexer.next_token().expect("scan").kind, TokenKind::Newline);
    assert_eq!(lexer.next_token().expect("scan").kind, TokenKind::KeyPhrase);
    assert_eq!(lexer.next_token().expect("scan").kind, TokenKind::Newline);

    let error = lexer.next_token().expect_err("line 3 is invalid");
    assert_eq!(error.message(), "invalid character \"?\"");
    assert_eq!(lexer.next_token().expect_err("error is sticky"), error);
}

#[test]
fn iterator_stops_after_first_error() {
    let results: Vec<_> = Lexer::new("5\n@\n6\n").collect();
    assert_eq!(results.len(), 3);
    assert!(results[..2].iter().all(Result::is_ok));
    assert!(results[2].is_err());
}

#[test]
fn restart_rewinds_to_first_token() {
    let mut lexer = Lexer::new("Muffin recipe\n");
    let first = lexer.next_token().expect("scan");
    let _ = lexer.next_token().expect("scan");
    lexer.restart();
    assert_eq!(lexer.next_token().expect("scan"), first);
    assert_eq!(lexer.input(), "Muffin recipe\n");

    let replayed: Vec<_> = {
        lexer.restart();
        lexer.by_ref().collect()
    };
    assert_eq!(replayed.len(), 4);
}
