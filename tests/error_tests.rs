// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use namelizer::error::AppError;

#[test]
fn test_error_kinds() {
    assert_eq!(AppError::Config("x".to_string()).kind(), "config");
    assert_eq!(AppError::Auth("x".to_string()).kind(), "auth");
    assert_eq!(AppError::Api("x".to_string()).kind(), "api");
    assert_eq!(AppError::Enrichment("x".to_string()).kind(), "enrichment");
    assert_eq!(AppError::Template("x".to_string()).kind(), "template");
    assert_eq!(AppError::State("x".to_string()).kind(), "state");
    assert_eq!(AppError::Internal(anyhow::anyhow!("x")).kind(), "internal");
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = AppError::Api("HTTP 500 Internal Server Error: oops".to_string());
    assert_eq!(
        err.to_string(),
        "Strava API error: HTTP 500 Internal Server Error: oops"
    );

    let err = AppError::Config("Missing required key: client_id".to_string());
    assert!(err.to_string().contains("client_id"));
}

#[test]
fn test_template_errors_convert() {
    let env = minijinja::Environment::new();
    let jinja_err = env.template_from_str("{{ unclosed").unwrap_err();

    let err: AppError = jinja_err.into();
    assert_eq!(err.kind(), "template");
}
