//! HttpBackend against a mock Elasticsearch endpoint.

use mockito::Matcher;
use serde_json::json;
use symscout::backend::{HttpBackend, SearchBackend};
use symscout::config::Config;
use symscout::console::SearchConsole;
use symscout::error::SearchError;

fn config_for(server: &mockito::ServerGuard) -> Config {
    let mut config = Config::default();
    config.backend_url = server.url();
    config
}

#[test]
fn test_search_posts_to_index_with_size() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/betterdocs/_search")
        .match_query(Matcher::UrlEncoded("size".into(), "50".into()))
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "query": { "bool": { "must": [{ "wildcard": { "custom.tokens.importName": "*Foo" } }] } }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "hits": { "hits": [{
                    "_id": "1",
                    "_score": 1.0,
                    "_source": {
                        "file": "repo1/module/Foo.java",
                        "tokens": [{ "importName": "Foo", "lineNumbers": [10, 20] }]
                    }
                }] }
            })
            .to_string(),
        )
        .create();

    let config = config_for(&server);
    let backend = HttpBackend::new(&config).unwrap();
    let console = SearchConsole::new(config, backend);
    let outcome = console.search("Foo", false).unwrap();

    mock.assert();
    assert_eq!(outcome.files.len(), 1);
    assert_eq!(outcome.files[0].lines, vec![10, 20]);
}

#[test]
fn test_lookup_reads_file_content() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/sourcefile/_search")
        .match_query(Matcher::UrlEncoded("size".into(), "1".into()))
        .match_body(Matcher::Json(json!({
            "query": { "term": { "typesourcefile.fileName": "a/b/C.java" } }
        })))
        .with_status(200)
        .with_body(r#"{"hits":{"hits":[{"_source":{"file":"a/b/C.java","fileContent":"class C {}"}}]}}"#)
        .create();

    let backend = HttpBackend::new(&config_for(&server)).unwrap();
    let body = symscout::query::file_lookup_body("typesourcefile.fileName", "a/b/C.java");
    let hits = backend.search("sourcefile", &body, 1).unwrap();

    mock.assert();
    assert_eq!(hits[0].source.file_content.as_deref(), Some("class C {}"));
}

#[test]
fn test_error_status_is_reported() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/betterdocs/_search")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("index_not_found_exception")
        .create();

    let backend = HttpBackend::new(&config_for(&server)).unwrap();
    let err = backend.search("betterdocs", &json!({}), 10).unwrap_err();
    match err {
        SearchError::BackendStatus { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("index_not_found"));
        }
        other => panic!("expected BackendStatus, got {:?}", other),
    }
}

#[test]
fn test_unexpected_body_is_invalid_response() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/betterdocs/_search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"acknowledged":true}"#)
        .create();

    let backend = HttpBackend::new(&config_for(&server)).unwrap();
    let err = backend.search("betterdocs", &json!({}), 10).unwrap_err();
    assert_eq!(err.error_code(), "SCT-E003");
}

#[test]
fn test_unreachable_backend() {
    let mut config = Config::default();
    // Port 9 (discard) is closed on test machines
    config.backend_url = "127.0.0.1:9".to_string();
    let backend = HttpBackend::new(&config).unwrap();
    assert_eq!(backend.base_url(), "http://127.0.0.1:9");
    let err = backend.search("betterdocs", &json!({}), 10).unwrap_err();
    assert!(matches!(err, SearchError::BackendUnavailable { .. }));
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = Config::default();
    config.result_size = 0;
    assert!(HttpBackend::new(&config).is_err());
}
