use serde_json::Value;
use toksub_parser::{TokenContext, TokenParser, ORIGINAL_TOKEN_KEY};

fn test_parser() -> TokenParser {
    let mut parser = TokenParser::new();
    parser.register("img", |context: &TokenContext| {
        let ids = context.get("ids").and_then(Value::as_str).unwrap_or("");
        format!(r#"<img data-ids="{}">"#, ids)
    });
    parser.register("hr", |_: &TokenContext| "<hr>".to_string());
    parser
}

#[test]
fn test_mixed_document() {
    let parser = test_parser();
    let mut context = TokenContext::new();

    let input = "Intro text.\n[[img ids=\"1,2\"]]\nMore text [[hr]] end.";
    let output = parser.replace_tokens(input, &mut context);

    assert_eq!(
        output,
        "Intro text.\n<img data-ids=\"1,2\">\nMore text <hr> end."
    );
}

#[test]
fn test_unhandled_and_malformed_tokens_survive() {
    let parser = test_parser();
    let mut context = TokenContext::new();

    // [[video]] has no handler; [[img ids=1]] is malformed (unquoted value).
    let input = r#"[[video ids="3"]] and [[img ids=1]]"#;
    assert_eq!(parser.replace_tokens(input, &mut context), input);
}

#[test]
fn test_handler_sees_merged_context() {
    let mut parser = TokenParser::new();
    parser.register("img", |context: &TokenContext| {
        let site = context.get("site").and_then(Value::as_str).unwrap_or("");
        let width = context.get("width").and_then(Value::as_str).unwrap_or("");
        let original = context
            .get(ORIGINAL_TOKEN_KEY)
            .and_then(Value::as_str)
            .unwrap_or("");
        format!("{}|{}|{}", site, width, original)
    });

    let mut context = TokenContext::new();
    context.insert("site".into(), Value::String("example.org".into()));

    let output = parser.replace_tokens(r#"[[img width="200"]]"#, &mut context);
    assert_eq!(output, r#"example.org|200|[[img width="200"]]"#);
}

#[test]
fn test_single_pass_substitution() {
    let parser = test_parser();
    let mut context = TokenContext::new();

    // A handler emitting token-shaped text must not trigger a second pass.
    let mut parser2 = TokenParser::new();
    parser2.register("outer", |_: &TokenContext| "[[hr]]".to_string());
    assert_eq!(
        parser2.replace_tokens("[[outer]]", &mut context),
        "[[hr]]"
    );

    // Even when the inner tag has a handler in the same parser.
    let output = parser.replace_tokens(r#"[[img ids="[[hr]]"]]"#, &mut context);
    assert_eq!(output, r#"<img data-ids="[[hr]]">"#);
}
