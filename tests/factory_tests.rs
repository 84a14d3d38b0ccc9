use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use openai_factory::{
    DynHttpClient, Factory, MockHttpClient, NoDiscovery, OpenAiError, TransportConfig,
};

fn factory_with_mock() -> (Factory, Arc<MockHttpClient>) {
    let mock = Arc::new(MockHttpClient::new());
    let factory = Factory::new().with_shared_http_client(mock.clone());
    (factory, mock)
}

fn config_of(factory: &Factory) -> TransportConfig {
    factory.make().expect("client builds").config().clone()
}

#[test]
fn defaults_without_any_setter() {
    let (factory, _) = factory_with_mock();
    let config = config_of(&factory);

    assert_eq!(config.base_uri().as_str(), "https://api.openai.com/v1");
    assert_eq!(config.headers().len(), 1);
    assert_eq!(config.headers().get("Content-Type"), Some("application/json"));
    assert!(config.headers().get("Authorization").is_none());
    assert!(config.query_params().is_empty());
}

#[test]
fn base_url_override() {
    let (factory, _) = factory_with_mock();
    let config = config_of(&factory.with_base_url("https://example.com/v2"));
    assert_eq!(config.base_uri().as_str(), "https://example.com/v2");
}

#[test]
fn base_url_without_scheme_uses_https() {
    let (factory, _) = factory_with_mock();
    let config = config_of(&factory.with_base_url("my-proxy.internal/openai/v1"));
    assert_eq!(config.base_uri().as_str(), "https://my-proxy.internal/openai/v1");
}

#[test]
fn uppercase_scheme_base_url_is_accepted() {
    let (factory, _) = factory_with_mock();
    let config = config_of(&factory.clone().with_base_url("HTTPS://example.com/v2"));
    assert_eq!(config.base_uri().as_str(), "https://example.com/v2");

    let config = config_of(&factory.with_base_url("Http://localhost:8080/v1"));
    assert_eq!(config.base_uri().as_str(), "http://localhost:8080/v1");
}

#[test]
fn api_key_becomes_bearer_authorization() {
    let (factory, _) = factory_with_mock();
    let config = config_of(&factory.with_api_key("sk-1"));
    assert_eq!(config.headers().get("Authorization"), Some("Bearer sk-1"));
}

#[test]
fn later_api_key_overwrites_earlier() {
    let (factory, _) = factory_with_mock();
    let config = config_of(&factory.with_api_key("sk-old").with_api_key("sk-new"));
    assert_eq!(config.headers().get("Authorization"), Some("Bearer sk-new"));
}

#[test]
fn header_last_write_wins() {
    let (factory, _) = factory_with_mock();
    let config = config_of(
        &factory
            .with_http_header("X", "a")
            .with_http_header("X", "b"),
    );
    let values: Vec<_> = config
        .headers()
        .iter()
        .filter(|(name, _)| *name == "X")
        .collect();
    assert_eq!(values, vec![("X", "b")]);
}

#[test]
fn query_param_last_write_wins() {
    let (factory, _) = factory_with_mock();
    let config = config_of(
        &factory
            .with_query_param("api-version", "1")
            .with_query_param("api-version", "2"),
    );
    assert_eq!(config.query_params().len(), 1);
    assert_eq!(config.query_params().get("api-version"), Some("2"));
}

#[test]
fn custom_authorization_header_wins_over_api_key() {
    let (factory, _) = factory_with_mock();
    let config = config_of(
        &factory
            .with_http_header("Authorization", "custom")
            .with_api_key("sk-1"),
    );
    assert_eq!(config.headers().get("Authorization"), Some("custom"));
}

#[test]
fn custom_content_type_wins_over_default() {
    let (factory, _) = factory_with_mock();
    let config = config_of(&factory.with_http_header("content-type", "text/plain"));
    assert_eq!(config.headers().get("Content-Type"), Some("text/plain"));
    assert_eq!(config.headers().len(), 1);
}

#[test]
fn empty_api_key_is_invalid_credential() {
    let (factory, _) = factory_with_mock();
    let err = factory.with_api_key("").make().unwrap_err();
    assert!(matches!(err, OpenAiError::InvalidCredential(_)));
}

#[test]
fn malformed_base_url_is_invalid_base_uri() {
    let (factory, _) = factory_with_mock();
    let err = factory.with_base_url("https://").make().unwrap_err();
    assert!(matches!(err, OpenAiError::InvalidBaseUri { .. }));
}

#[test]
fn missing_client_without_discovery_fails() {
    let err = Factory::new()
        .with_api_key("sk-1")
        .with_discovery(NoDiscovery)
        .make()
        .unwrap_err();
    assert!(matches!(err, OpenAiError::NoHttpClientAvailable));
}

#[test]
fn credential_error_is_reported_before_missing_client() {
    let err = Factory::new()
        .with_api_key("")
        .with_discovery(NoDiscovery)
        .make()
        .unwrap_err();
    assert!(matches!(err, OpenAiError::InvalidCredential(_)));
}

#[test]
fn discovery_is_used_only_when_no_client_injected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let discovery = move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Some(Arc::new(MockHttpClient::new()) as DynHttpClient)
    };

    let factory = Factory::new().with_discovery(discovery);
    factory.make().expect("discovered client");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    factory
        .clone()
        .with_http_client(MockHttpClient::new())
        .make()
        .expect("injected client");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn organization_header_absent_by_default_and_set_on_request() {
    let (factory, _) = factory_with_mock();
    assert!(!config_of(&factory).headers().contains("OpenAI-Organization"));

    let config = config_of(&factory.with_organization("org-123"));
    assert_eq!(config.headers().get("OpenAI-Organization"), Some("org-123"));
}

#[test]
fn clearing_organization_removes_header() {
    let (factory, _) = factory_with_mock();
    let config = config_of(&factory.with_organization("org-123").clear_organization());
    assert!(!config.headers().contains("OpenAI-Organization"));
}

#[test]
fn setter_order_does_not_matter() {
    let (factory, _) = factory_with_mock();
    let a = config_of(
        &factory
            .clone()
            .with_api_key("sk-1")
            .with_organization("org-1")
            .with_base_url("https://example.com/v1")
            .with_http_header("X-A", "1")
            .with_http_header("X-B", "2")
            .with_query_param("p", "q"),
    );
    let b = config_of(
        &factory
            .with_query_param("p", "q")
            .with_http_header("X-B", "2")
            .with_base_url("https://example.com/v1")
            .with_http_header("X-A", "1")
            .with_organization("org-1")
            .with_api_key("sk-1"),
    );
    assert_eq!(a, b);
}

#[test]
fn repeated_make_yields_equal_independent_clients() {
    let (factory, _) = factory_with_mock();
    let factory = factory
        .with_api_key("sk-1")
        .with_http_header("X-Trace", "on")
        .with_query_param("api-version", "2024-02-01");

    let first = factory.make().unwrap();
    let second = factory.make().unwrap();

    assert_eq!(first.config(), second.config());
    assert!(!std::ptr::eq(first.config(), second.config()));
}

#[test]
fn repeated_make_with_discovery_yields_equal_configs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let factory = Factory::new()
        .with_api_key("sk-1")
        .with_discovery(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(Arc::new(MockHttpClient::new()) as DynHttpClient)
        });

    let first = factory.make().unwrap();
    let second = factory.make().unwrap();

    assert_eq!(first.config(), second.config());
    assert!(!std::ptr::eq(first.config(), second.config()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
