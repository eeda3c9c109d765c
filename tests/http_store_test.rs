use anyhow::Result;
use gesture_resolver::config::{ResolverConfig, StoreConfig};
use gesture_resolver::domain::model::{GestureKind, OsScope};
use gesture_resolver::{ConfigResolver, HttpBindingStore, ResolverError};
use httpmock::prelude::*;

fn row(code: &str, action_id: u64, value: &str, os: &str, priority: i32) -> serde_json::Value {
    serde_json::json!({
        "gestureCode": code,
        "gestureName": code,
        "gestureKind": "dynamic",
        "actionId": action_id,
        "actionType": "hotkey",
        "actionValue": value,
        "actionOsScope": os,
        "actionDescription": null,
        "actionPayload": null,
        "priority": priority
    })
}

#[tokio::test]
async fn test_http_store_rows_are_resolved() -> Result<()> {
    let server = MockServer::start();

    // 存儲端回傳未排序的候選資料，由解析器重新排序
    let store_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/candidates")
            .query_param("username", "alice")
            .query_param("os", "windows");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                row("swipe_left", 2, "alt+left", "any", 0),
                row("swipe_left", 1, "ctrl+left", "windows", 0),
                row("zoom_in", 5, "ctrl+plus", "ANY", 1),
            ]));
    });

    let store = HttpBindingStore::new(server.url("/candidates"))?;
    let resolver = ConfigResolver::new(store);
    let config = resolver
        .resolve_configuration(Some("alice"), None, Some("Windows"))
        .await?;

    store_mock.assert();
    assert_eq!(config.os, "windows");
    let codes: Vec<_> = config.mappings.iter().map(|m| m.gesture_code.as_str()).collect();
    assert_eq!(codes, vec!["zoom_in", "swipe_left"]);

    let swipe = config.action_for("swipe_left").unwrap();
    assert_eq!(swipe.value, "ctrl+left");
    assert_eq!(swipe.os_scope, OsScope::Windows);
    assert_eq!(config.action_for("zoom_in").unwrap().os_scope, OsScope::Any);
    Ok(())
}

#[tokio::test]
async fn test_http_store_failure_is_surfaced() -> Result<()> {
    let server = MockServer::start();
    let store_mock = server.mock(|when, then| {
        when.method(GET).path("/candidates");
        then.status(503).body("database offline");
    });

    let resolver = ConfigResolver::new(HttpBindingStore::new(server.url("/candidates"))?);
    let err = resolver
        .resolve_configuration(None, None, None)
        .await
        .unwrap_err();

    // 只請求一次，不重試
    store_mock.assert_hits(1);
    match err {
        ResolverError::StoreUnavailable { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "database offline");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_http_store_malformed_row_fails_fast() -> Result<()> {
    let server = MockServer::start();
    let mut broken = row("swipe_left", 1, "alt+left", "any", 0);
    broken["actionValue"] = serde_json::Value::Null;

    server.mock(|when, then| {
        when.method(GET).path("/candidates");
        then.status(200).json_body(serde_json::json!([broken]));
    });

    let resolver = ConfigResolver::new(HttpBindingStore::new(server.url("/candidates"))?);
    let err = resolver
        .resolve_configuration(None, None, Some("linux"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ResolverError::MalformedCandidate { ref field, .. } if field == "actionValue"
    ));
    Ok(())
}

#[tokio::test]
async fn test_http_store_accepts_mixed_case_enums() -> Result<()> {
    let server = MockServer::start();
    let mut mixed = row("swipe_left", 1, "alt+left", "ANY", 0);
    mixed["gestureKind"] = "Dynamic".into();
    mixed["actionType"] = "HOTKEY".into();

    server.mock(|when, then| {
        when.method(GET).path("/candidates");
        then.status(200).json_body(serde_json::json!([mixed]));
    });

    let resolver = ConfigResolver::new(HttpBindingStore::new(server.url("/candidates"))?);
    let config = resolver.resolve_configuration(None, None, None).await?;

    assert_eq!(config.mappings.len(), 1);
    assert_eq!(config.mappings[0].gesture_kind, Some(GestureKind::Dynamic));
    assert_eq!(config.mappings[0].action.os_scope, OsScope::Any);
    Ok(())
}

#[tokio::test]
async fn test_http_store_unknown_gesture_kind_is_malformed() -> Result<()> {
    let server = MockServer::start();
    let mut unknown = row("swipe_left", 1, "alt+left", "any", 0);
    unknown["gestureKind"] = "wave".into();

    server.mock(|when, then| {
        when.method(GET).path("/candidates");
        then.status(200).json_body(serde_json::json!([unknown]));
    });

    let resolver = ConfigResolver::new(HttpBindingStore::new(server.url("/candidates"))?);
    let err = resolver
        .resolve_configuration(None, None, None)
        .await
        .unwrap_err();

    // 不支援的手勢種類屬於資料損毀，而非序列化錯誤
    assert!(matches!(
        err,
        ResolverError::MalformedCandidate { ref field, .. } if field == "gestureKind"
    ));
    Ok(())
}

#[tokio::test]
async fn test_http_store_row_without_priority_is_malformed() -> Result<()> {
    let server = MockServer::start();
    let mut unranked = row("swipe_left", 1, "f13", "any", 0);
    if let Some(fields) = unranked.as_object_mut() {
        fields.remove("priority");
    }

    server.mock(|when, then| {
        when.method(GET).path("/candidates");
        then.status(200).json_body(serde_json::json!([
            row("swipe_left", 2, "alt+left", "any", -1),
            unranked,
        ]));
    });

    let resolver = ConfigResolver::new(HttpBindingStore::new(server.url("/candidates"))?);
    let err = resolver
        .resolve_configuration(None, None, None)
        .await
        .unwrap_err();

    // 缺少優先序的資料列不會被當成 0
    assert!(matches!(
        err,
        ResolverError::MalformedCandidate { ref field, .. } if field == "priority"
    ));
    Ok(())
}

#[tokio::test]
async fn test_store_built_from_config_sends_headers() -> Result<()> {
    let server = MockServer::start();
    let store_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/candidates")
            .header("x-api-key", "secret")
            .query_param("application", "chrome.exe");
        then.status(200).json_body(serde_json::json!([]));
    });

    let toml_content = format!(
        r#"
[store]
type = "http"
endpoint = "{}"
timeout_seconds = 3
headers = {{ "x-api-key" = "secret" }}
"#,
        server.url("/candidates")
    );

    let config = ResolverConfig::from_toml_str(&toml_content)?;
    let resolver = ConfigResolver::new(config.build_store()?);
    let resolved = resolver
        .resolve_configuration(None, Some("chrome.exe"), None)
        .await?;

    store_mock.assert();
    assert!(resolved.mappings.is_empty());

    // 未設定 endpoint 的 http 存儲無法建立
    let mut missing = ResolverConfig::with_store(StoreConfig::http("http://unused"));
    missing.store.endpoint = None;
    assert!(missing.build_store().is_err());
    Ok(())
}
