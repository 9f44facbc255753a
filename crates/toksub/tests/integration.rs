use serde_json::json;
use toksub::{render_tokens, HtmlEngine, ImgHandler, TokenContext, TokenParser};

fn image_context() -> TokenContext {
    let mut context = TokenContext::new();
    context.insert(
        "object_images".to_string(),
        json!([
            {"id": 1, "url": "/media/a.jpg"},
            {"id": 2, "url": "/media/b.jpg", "alt": "B"},
        ]),
    );
    context
}

#[test]
fn test_article_body_rendering() {
    let mut context = image_context();

    let body = "First paragraph.\n\n\
                [[img ids=\"1,2\" wrapper=\"figure\" class=\"gallery\"]]\n\n\
                Second paragraph.";
    let html = render_tokens(body, &mut context);

    assert_eq!(
        html,
        "First paragraph.\n\n\
         <figure class=\"gallery\"><img src=\"/media/a.jpg\"><img src=\"/media/b.jpg\" alt=\"B\"></figure>\n\n\
         Second paragraph."
    );
}

#[test]
fn test_broken_tokens_stay_visible() {
    let mut context = image_context();

    // Unknown tag, malformed attribute, bad id list: all pass through.
    for text in [
        r#"[[video ids="3"]]"#,
        r#"[[img ids=1]]"#,
        r#"[[img ids="one,two"]]"#,
    ] {
        assert_eq!(render_tokens(text, &mut context), text, "input: {}", text);
    }
}

#[test]
fn test_attribute_allow_list_applies_before_dispatch() {
    let mut context = image_context();

    // onclick is not in the allow-list, so it never reaches the template
    // context; the token still renders.
    let html = render_tokens(r#"[[img ids="1" onclick="evil()"]]"#, &mut context);
    assert_eq!(html, r#"<img src="/media/a.jpg">"#);
    assert!(!context.contains_key("onclick"));
}

#[test]
fn test_custom_parser_with_img_handler() {
    let mut parser = TokenParser::new();
    parser.register("img", ImgHandler::new().unwrap());

    let mut context = image_context();
    let html = parser.replace_tokens(r#"[[img ids="2"]]"#, &mut context);
    assert_eq!(html, r#"<img src="/media/b.jpg" alt="B">"#);
}

#[test]
fn test_custom_handler_with_custom_template() {
    let mut engine = HtmlEngine::new().unwrap();
    engine
        .add_template(
            "figure.html",
            r#"<figure data-ids="{{ ids }}"></figure>"#,
        )
        .unwrap();

    let mut parser = TokenParser::new();
    parser.register("figure", move |context: &TokenContext| {
        engine
            .render_named("figure.html", context)
            .unwrap_or_default()
    });

    let mut context = TokenContext::new();
    let html = parser.replace_tokens(r#"[[figure ids="1,2"]]"#, &mut context);
    assert_eq!(html, r#"<figure data-ids="1,2"></figure>"#);
}
