use muffin::lexer::{Lexer, TokenKind};
use muffin::parser::TokenStream;

fn make_stream(input: &str) -> TokenStream<'_> {
    TokenStream::new(Lexer::new(input))
}

#[test]
fn peek_is_non_consuming_and_next_consumes() {
    let mut stream = make_stream("add Flour\n");

    assert_eq!(stream.peek().expect("peek").text(), Some("add"));
    assert_eq!(stream.peek().expect("peek").text(), Some("add"));
    assert_eq!(stream.next().expect("next").text(), Some("add"));
    assert_eq!(stream.peek().expect("peek").text(), Some("Flour"));
}

#[test]
fn expect_accepts_listed_kinds() {
    let mut stream = make_stream("5.\n");
    let token = stream
        .expect(&[TokenKind::EndOfInput, TokenKind::StepLabel])
        .expect("step label is listed");
    assert_eq!(token.integer(), Some(5));
}

#[test]
fn expect_failure_lists_alternatives() {
    let mut stream = make_stream(", Flour\n");
    match stream.expect(&[TokenKind::EndOfInput, TokenKind::Identifier, TokenKind::StepLabel]) {
        Err(error) => {
            assert_eq!(
                error.message(),
                "expecting end of input, identifier or step label, not comma"
            );
            assert_eq!(error.location().map(|location| location.column), Some(1));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn expect_key_phrase_checks_the_text() {
    let mut stream = make_stream("is empty ,");
    let token = stream
        .expect_key_phrase(&["is empty", "is not empty"])
        .expect("listed phrase");
    assert!(token.is_key_phrase("is empty"));

    let mut stream = make_stream("from Bowl");
    match stream.expect_key_phrase(&["into"]) {
        Err(error) => assert_eq!(error.message(), "expecting \"into\", not \"from\""),
        other => panic!("unexpected result: {other:?}"),
    }

    let mut stream = make_stream("Bowl");
    match stream.expect_key_phrase(&["into"]) {
        Err(error) => assert_eq!(error.message(), "expecting key phrase, not identifier"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn consume_if_leaves_unmatched_tokens() {
    let mut stream = make_stream("in grill mode\n");
    let skipped = stream
        .consume_if(|token| token.kind == TokenKind::Newline)
        .expect("consume_if");
    assert!(skipped.is_none());

    let taken = stream
        .consume_if(|token| token.kind == TokenKind::KeyPhrase)
        .expect("consume_if");
    let taken = taken.expect("key phrase is taken");
    assert!(taken.is_key_phrase("in grill mode"));
    assert_eq!(stream.next().expect("next").kind, TokenKind::Newline);
}
