// tests/article_tests.rs

use richtext_code_blocks::{
    code_blocks::CodeBlockService, error::AppError, models::article::Article,
};

fn article(body: Option<&str>) -> Article {
    Article {
        id: 1,
        title: "Tables in HTML".to_string(),
        body: body.map(str::to_string),
        updated_at: None,
    }
}

#[test]
fn before_save_stores_cleaned_body() {
    let service = CodeBlockService::default();
    let mut article = article(Some(
        "<p>Example</p><pre>&lt;p style=\"x\"&gt;hi&lt;/p&gt;&lt;script&gt;x()&lt;/script&gt;</pre>",
    ));

    article.before_save(&service).expect("valid body");

    assert_eq!(
        article.body.as_deref(),
        Some("<p>Example</p><pre>&lt;p&gt;hi&lt;/p&gt;</pre>")
    );
    assert!(article.updated_at.is_some());
}

#[test]
fn before_save_rejects_malformed_code_blocks() {
    let service = CodeBlockService::default();
    let body = "<pre>&lt;td&gt;</pre>";
    let mut article = article(Some(body));

    let err = article.before_save(&service).unwrap_err();

    match err {
        AppError::ValidationFailed(message) => {
            assert_eq!(message, "Advanced Code Blocks: Opening and ending tag mismatch");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(article.body.as_deref(), Some(body));
    assert!(article.updated_at.is_none());
}

#[test]
fn before_save_skips_missing_or_empty_body() {
    let service = CodeBlockService::default();

    let mut missing = article(None);
    missing.before_save(&service).expect("nothing to validate");
    assert!(missing.body.is_none());
    assert!(missing.updated_at.is_none());

    let mut empty = article(Some(""));
    empty.before_save(&service).expect("nothing to validate");
    assert_eq!(empty.body.as_deref(), Some(""));
    assert!(empty.updated_at.is_none());
}

#[test]
fn error_label_is_configurable() {
    let service = CodeBlockService::default().with_error_label("Code: ");

    let err = service.prepare_for_save("<pre>&lt;td&gt;</pre>").unwrap_err();

    assert_eq!(err.to_string(), "Code: Opening and ending tag mismatch");
}

#[test]
fn formatted_body_renders_code_blocks() {
    let service = CodeBlockService::default();

    let with_code = article(Some("<pre>&lt;h1&gt;Title&lt;/h1&gt;</pre>"));
    assert_eq!(
        with_code.formatted_body(&service),
        "<div class=\"advanced-code-block\"><h1>Title</h1></div>"
    );

    assert_eq!(article(None).formatted_body(&service), "");
}

#[test]
fn article_round_trips_through_json() {
    let json = r#"{"id":7,"title":"t","body":"<p>x</p>","updated_at":null}"#;

    let article: Article = serde_json::from_str(json).expect("deserialize");

    assert_eq!(article.id, 7);
    assert_eq!(article.body.as_deref(), Some("<p>x</p>"));
}
