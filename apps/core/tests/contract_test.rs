use spotlight_core::classifier::Classification;
use spotlight_core::config::Config;
use spotlight_core::contract::{
    ClassifyRequest, ClockRequest, CoreRequest, CoreResponse, EvaluateRequest, FilterRequest,
    RemoveCustomSearchRequest,
};
use spotlight_core::core_service::{CoreService, ServiceError};
use spotlight_core::model::{CustomSearch, Tab};
use spotlight_core::session::StaticBrowserData;
use spotlight_core::settings::Settings;

fn service() -> CoreService {
    CoreService::with_settings(Config::default(), Settings::default()).unwrap()
}

#[test]
fn serializes_and_deserializes_classify_request() {
    let request = CoreRequest::Classify(ClassifyRequest {
        query: "aichat hello".to_string(),
    });

    let encoded = serde_json::to_string(&request).unwrap();
    assert!(encoded.contains("\"kind\":\"classify\""));
    let decoded: CoreRequest = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, request);
}

#[test]
fn handles_classify_command() {
    let response = service()
        .handle_command(CoreRequest::Classify(ClassifyRequest {
            query: "search rust traits".into(),
        }))
        .unwrap();

    match response {
        CoreResponse::Classify(Classification::CustomSearch { engine, term }) => {
            assert_eq!(engine.keyword, "search");
            assert_eq!(term, "rust traits");
            assert_eq!(
                engine.search_url(&term).as_deref(),
                Some("https://www.google.com/search?q=rust%20traits")
            );
        }
        other => panic!("expected custom search classification, got {other:?}"),
    }
}

#[test]
fn handles_evaluate_command_and_round_trips_response() {
    let request = CoreRequest::Evaluate(EvaluateRequest {
        query: "inbox".into(),
        data: StaticBrowserData {
            tabs: vec![Tab {
                id: 7,
                window_id: 1,
                title: "Inbox (3)".into(),
                url: "https://mail.example.com".into(),
                fav_icon_url: None,
            }],
            ..Default::default()
        },
    });

    let response = service().handle_command(request).unwrap();
    let encoded = serde_json::to_string(&response).unwrap();
    let decoded: CoreResponse = serde_json::from_str(&encoded).unwrap();
    match decoded {
        CoreResponse::Evaluate(outcome) => {
            assert_eq!(outcome.tabs.len(), 1);
            assert_eq!(outcome.tabs[0].id, 7);
        }
        other => panic!("expected evaluate response, got {other:?}"),
    }
}

#[test]
fn handles_filter_command() {
    let response = service()
        .handle_command(CoreRequest::Filter(FilterRequest {
            query: "中 code".into(),
            candidates: vec!["中文code示例".into(), "other".into()],
        }))
        .unwrap();
    match response {
        CoreResponse::Filter(payload) => assert_eq!(payload.matches, vec!["中文code示例"]),
        other => panic!("expected filter response, got {other:?}"),
    }
}

#[test]
fn clock_rejects_out_of_range_timestamp() {
    let error = service()
        .handle_command(CoreRequest::Clock(ClockRequest {
            now_epoch_secs: Some(i64::MAX),
        }))
        .unwrap_err();
    assert!(matches!(error, ServiceError::InvalidRequest(_)));
}

#[test]
fn custom_search_edits_take_effect_for_classification() {
    let mut service = service();
    service
        .handle_command(CoreRequest::AddCustomSearch(CustomSearch::new(
            "wiki",
            "https://en.wikipedia.org/w/index.php?search=%s",
            "Wikipedia",
        )))
        .unwrap();
    assert!(matches!(
        service.classify("wiki ferris"),
        Classification::CustomSearch { .. }
    ));

    service
        .handle_command(CoreRequest::RemoveCustomSearch(RemoveCustomSearchRequest {
            keyword: "wiki".into(),
        }))
        .unwrap();
    assert!(matches!(
        service.classify("wiki ferris"),
        Classification::DefaultSearch { .. }
    ));

    let error = service
        .handle_command(CoreRequest::RemoveCustomSearch(RemoveCustomSearchRequest {
            keyword: "wiki".into(),
        }))
        .unwrap_err();
    assert!(matches!(error, ServiceError::NotFound(_)));
}

#[test]
fn rejects_invalid_settings_at_construction() {
    let mut settings = Settings::default();
    settings.translate_keyword = String::new();
    assert!(CoreService::with_settings(Config::default(), settings).is_err());
}

#[test]
fn failed_settings_save_leaves_engines_unchanged() {
    let unique = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let blocker = std::env::temp_dir().join(format!("spotlight-blocker-{unique}"));
    std::fs::write(&blocker, b"not a directory").unwrap();

    let config = Config {
        settings_path: blocker.join("settings.json"),
        ..Default::default()
    };
    let mut service = CoreService::new(config).unwrap();

    let error = service
        .handle_command(CoreRequest::AddCustomSearch(CustomSearch::new(
            "ddg",
            "https://duckduckgo.com/?q=%s",
            "DuckDuckGo",
        )))
        .unwrap_err();
    assert!(matches!(error, ServiceError::Settings(_)));
    assert!(matches!(
        service.classify("ddg rust"),
        Classification::DefaultSearch { .. }
    ));
    assert_eq!(service.settings().custom_searches.len(), 1);

    let error = service
        .handle_command(CoreRequest::RemoveCustomSearch(RemoveCustomSearchRequest {
            keyword: "search".into(),
        }))
        .unwrap_err();
    assert!(matches!(error, ServiceError::Settings(_)));
    assert!(matches!(
        service.classify("search rust"),
        Classification::CustomSearch { .. }
    ));

    std::fs::remove_file(&blocker).unwrap();
}
