use asset_search_tools::{
    AssetSearchInput, AssetSearchTools, NO_MATCHING_ASSETS, SEARCH_FAILED, SearchReply,
    search_assets,
};
use fofa_async::FofaConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_tools(uri: &str) -> AssetSearchTools {
    AssetSearchTools::with_config(
        FofaConfig::new()
            .with_api_base(uri)
            .with_api_key("test-api-key"),
    )
}

fn input_for_domain(domain: &str) -> AssetSearchInput {
    serde_json::from_value(serde_json::json!({ "domain": domain })).unwrap()
}

#[tokio::test]
async fn two_rows_format_as_two_blocks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": false,
            "results": [
                ["www.example.com", "93.184.216.34", "443"],
                ["example.com", "93.184.216.34", "80"]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tools = test_tools(&server.uri());
    let reply = search_assets(&tools, input_for_domain("example.com"))
        .await
        .unwrap();

    let text = match reply {
        SearchReply::Report(text) => text,
        other => panic!("expected a report, got {other:?}"),
    };
    assert_eq!(
        text,
        "Host: www.example.com\nAddress: 93.184.216.34\nPort: 443\n\n\
         Host: example.com\nAddress: 93.184.216.34\nPort: 80\n"
    );
    // Exactly one blank line between blocks
    assert_eq!(text.matches("\n\n").count(), 1);
}

#[tokio::test]
async fn empty_results_reply_no_matching_assets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": false,
            "results": []
        })))
        .mount(&server)
        .await;

    let tools = test_tools(&server.uri());
    let reply = search_assets(&tools, AssetSearchInput::default())
        .await
        .unwrap();

    assert_eq!(reply, SearchReply::Failed(NO_MATCHING_ASSETS));
}

#[tokio::test]
async fn missing_results_key_replies_no_matching_assets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": true,
            "errmsg": "[820031] API query limit reached"
        })))
        .mount(&server)
        .await;

    let tools = test_tools(&server.uri());
    let reply = search_assets(&tools, AssetSearchInput::default())
        .await
        .unwrap();

    assert_eq!(reply, SearchReply::Failed(NO_MATCHING_ASSETS));
}

#[tokio::test]
async fn server_error_replies_search_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/all"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let tools = test_tools(&server.uri());
    let reply = search_assets(&tools, AssetSearchInput::default())
        .await
        .unwrap();

    assert_eq!(reply, SearchReply::Failed(SEARCH_FAILED));
}

#[tokio::test]
async fn unreachable_endpoint_replies_search_failed() {
    // Nothing listens here; the connect error must collapse into the
    // sentinel reply, never a fault.
    let tools = test_tools("http://127.0.0.1:1");

    let reply = search_assets(&tools, AssetSearchInput::default())
        .await
        .unwrap();

    assert_eq!(reply, SearchReply::Failed(SEARCH_FAILED));
}

#[tokio::test]
async fn malformed_row_is_a_hard_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": false,
            "results": [["www.example.com", "93.184.216.34"]]
        })))
        .mount(&server)
        .await;

    let tools = test_tools(&server.uri());
    let err = search_assets(&tools, AssetSearchInput::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("malformed asset record"));
}
