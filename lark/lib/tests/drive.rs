//! Drive operations against a local wiremock server.

use lark_lib::drive::{
    BatchUpdateDocxBlockReq, BlockUpdate, ConvertDocxBlockReq, CreateDocxDescendantReq,
    CreateWhiteboardPlantUmlReq, DownloadWhiteboardImageReq, IdType,
};
use lark_lib::{ApiClient, ApiError, ConfigError, MethodOptions, StaticTokenProvider};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::builder(Url::parse(&server.uri()).unwrap())
        .token_provider(StaticTokenProvider::new().tenant("t-abc").user("u-abc"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_convert_docx_block_returns_blocks() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/open-apis/docx/v1/documents/blocks/convert"))
        .and(header("authorization", "Bearer u-abc"))
        .and(header("x-tenant-access-token", "t-abc"))
        .and(body_json(json!({"content_type": "markdown", "content": "# Title"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "success",
            "data": {
                "first_level_block_ids": ["tmp1"],
                "blocks": [{"block_id": "tmp1", "block_type": 3}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server)
        .drive()
        .convert_docx_block(&ConvertDocxBlockReq::markdown("# Title"), None)
        .await
        .unwrap();

    let data = reply.data.unwrap();
    assert_eq!(data.first_level_block_ids, vec!["tmp1"]);
    assert_eq!(data.blocks[0]["block_type"], 3);
}

#[tokio::test]
async fn test_create_docx_descendant_resolves_both_placeholders() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/open-apis/docx/v1/documents/doxA/blocks/blkB/descendant"))
        .and(query_param("document_revision_id", "-1"))
        .and(body_json(json!({
            "children_id": ["tmp1"],
            "descendants": [{"block_id": "tmp1"}],
            "index": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {
                "children": [{"block_id": "real1", "block_type": 2}],
                "block_id_relations": [{"temporary_block_id": "tmp1", "block_id": "real1"}],
                "document_revision_id": 12
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateDocxDescendantReq::new("doxA", "blkB")
        .revision(-1)
        .index(0)
        .children(vec!["tmp1".to_string()], vec![json!({"block_id": "tmp1"})]);

    let data = client(&server)
        .drive()
        .create_docx_descendant(&request, None)
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(data.document_revision_id, 12);
    assert_eq!(data.resolve("tmp1"), Some("real1"));
}

#[tokio::test]
async fn test_create_docx_descendant_without_block_id_is_rejected_locally() {
    let server = MockServer::start().await;

    let request = CreateDocxDescendantReq::new("doxA", "");
    let err = client(&server)
        .drive()
        .create_docx_descendant(&request, None)
        .await
        .unwrap_err();

    match err {
        ApiError::Config(ConfigError::UnresolvedPathParam { name, operation }) => {
            assert_eq!(name, "block_id");
            assert_eq!(operation, "Drive#CreateDocxDescendant");
        }
        other => panic!("expected unresolved path param, got {other:?}"),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_batch_update_sends_only_provided_query_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/open-apis/docx/v1/documents/doxA/blocks/batch_update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {"document_revision_id": 3, "client_token": "ct-1"}
        })))
        .mount(&server)
        .await;

    let request = BatchUpdateDocxBlockReq::new("doxA")
        .client_token("ct-1")
        .user_id_type(IdType::UserId)
        .update(BlockUpdate::new("blk1").update_text(json!({"elements": []})));

    let data = client(&server)
        .drive()
        .batch_update_docx_block(&request, None)
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(data.document_revision_id, 3);

    let received = server.received_requests().await.unwrap();
    let pairs: Vec<(String, String)> = received[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("client_token".to_string(), "ct-1".to_string()),
            ("user_id_type".to_string(), "user_id".to_string()),
        ]
    );

    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(
        body,
        json!({"requests": [{"block_id": "blk1", "update_text": {"elements": []}}]})
    );
}

#[tokio::test]
async fn test_plantuml_domain_error_keeps_code_and_log_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/open-apis/board/v1/whiteboards/wb1/nodes/plantuml"))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header("x-tt-logid", "20260101xyz")
                .set_body_json(json!({
                    "code": 1254001,
                    "msg": "invalid param",
                    "error": {"log_id": "20260101xyz"}
                })),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .drive()
        .create_whiteboard_plantuml(&CreateWhiteboardPlantUmlReq::new("wb1", "@startuml\n@enduml"), None)
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(1254001));
    let ApiError::Domain(domain) = err else {
        panic!("expected domain error");
    };
    assert_eq!(domain.msg, "invalid param");
    assert_eq!(domain.meta.status, 400);
    assert_eq!(domain.log_id(), Some("20260101xyz"));
}

#[tokio::test]
async fn test_plantuml_success_has_empty_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/open-apis/board/v1/whiteboards/wb1/nodes/plantuml"))
        .and(body_json(json!({
            "plant_uml_code": "@startuml\nA -> B\n@enduml",
            "style_type": 2,
            "syntax_type": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "msg": "", "data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server)
        .drive()
        .create_whiteboard_plantuml(
            &CreateWhiteboardPlantUmlReq::new("wb1", "@startuml\nA -> B\n@enduml"),
            None,
        )
        .await
        .unwrap();
    assert!(reply.data.is_some());
}

#[tokio::test]
async fn test_download_whiteboard_image_returns_bytes_and_filename() {
    let server = MockServer::start().await;
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

    Mock::given(method("GET"))
        .and(path("/open-apis/board/v1/whiteboards/wb1/download_as_image"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"board.png\"")
                .set_body_raw(png.clone(), "image/png"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server)
        .drive()
        .download_whiteboard_image(&DownloadWhiteboardImageReq::new("wb1"), None)
        .await
        .unwrap();

    let file = reply.data.unwrap();
    assert_eq!(file.filename, "board.png");
    assert_eq!(file.content.as_ref(), png.as_slice());
    assert_eq!(file.content_type.as_deref(), Some("image/png"));

    let received = server.received_requests().await.unwrap();
    assert!(received[0].body.is_empty());
}

#[tokio::test]
async fn test_download_whiteboard_image_json_error_is_domain_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/board/v1/whiteboards/wb1/download_as_image"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 1770032, "msg": "forbidden"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .drive()
        .download_whiteboard_image(&DownloadWhiteboardImageReq::new("wb1"), None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(1770032));
}

#[tokio::test]
async fn test_per_call_user_token_overrides_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("authorization", "Bearer u-override"))
        .and(header("x-tenant-access-token", "t-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1u8, 2, 3], "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let options = MethodOptions::new().user_access_token("u-override");
    let reply = client(&server)
        .drive()
        .download_whiteboard_image(&DownloadWhiteboardImageReq::new("wb1"), Some(&options))
        .await
        .unwrap();

    let file = reply.data.unwrap();
    assert_eq!(file.filename, "");
    assert_eq!(file.len(), 3);
}

#[tokio::test]
async fn test_concurrent_calls_to_different_operations() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/open-apis/docx/v1/documents/blocks/convert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {"first_level_block_ids": ["a"], "blocks": []}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/open-apis/board/v1/whiteboards/wb1/nodes/plantuml"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": {}})))
        .mount(&server)
        .await;

    let client = client(&server);
    let drive = client.drive();
    let convert = ConvertDocxBlockReq::markdown("text");
    let plantuml = CreateWhiteboardPlantUmlReq::new("wb1", "@startuml\n@enduml");

    let (converted, drawn) = tokio::join!(
        drive.convert_docx_block(&convert, None),
        drive.create_whiteboard_plantuml(&plantuml, None),
    );

    assert_eq!(converted.unwrap().data.unwrap().first_level_block_ids, vec!["a"]);
    assert!(drawn.is_ok());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
