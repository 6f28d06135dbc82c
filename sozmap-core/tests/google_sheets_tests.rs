//! GoogleSheets against a mocked Drive/Sheets API

use httpmock::prelude::*;
use serde_json::json;
use sozmap_core::sheets::{Endpoints, GoogleSheets, SheetSource, StaticToken};
use sozmap_core::{map_rows, SheetError};
use std::sync::Arc;

fn client(server: &MockServer) -> GoogleSheets {
    GoogleSheets::with_endpoints(
        Arc::new(StaticToken::new("test-token")),
        Endpoints::single(server.base_url()),
    )
}

async fn mock_drive_found(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/drive/v3/files")
                .query_param_exists("q")
                .header("authorization", "Bearer test-token");
            then.status(200).json_body(json!({
                "files": [{ "id": "sheet-123", "name": "Söz Xəritəsi" }]
            }));
        })
        .await
}

async fn mock_metadata(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v4/spreadsheets/sheet-123");
            then.status(200).json_body(json!({
                "sheets": [
                    { "properties": { "sheetId": 0, "title": "Sheet1", "index": 0 } },
                    { "properties": { "sheetId": 781, "title": "newbrand", "index": 1 } }
                ]
            }));
        })
        .await
}

#[tokio::test]
async fn test_fetch_records_end_to_end() {
    let server = MockServer::start_async().await;
    let drive = mock_drive_found(&server).await;
    let meta = mock_metadata(&server).await;
    let values = server
        .mock_async(|when, then| {
            when.method(GET)
                .path_contains("/v4/spreadsheets/sheet-123/values/")
                .query_param("valueRenderOption", "FORMATTED_VALUE");
            then.status(200).json_body(json!({
                "range": "newbrand!A1:L4",
                "majorDimension": "ROWS",
                "values": [
                    ["kök", "söz", "word", "növ", "type"],
                    ["ana", "ana", "mother", "isim", "noun"],
                    ["ata", "ata", 7],
                    ["ana", "anaç"]
                ]
            }));
        })
        .await;

    let sheets = client(&server);
    let rows = sheets
        .fetch_records("Söz Xəritəsi", "newbrand")
        .await
        .unwrap();

    drive.assert_async().await;
    meta.assert_async().await;
    values.assert_async().await;

    let nodes = map_rows(&rows);
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0].id, "ana");
    assert_eq!(nodes[0].en_word, "mother");
    assert_eq!(nodes[0].en_word_type, "noun");
    assert_eq!(nodes[1].en_word, "7");
    assert_eq!(nodes[1].az_word_type, "");
    assert_eq!(nodes[2].kok, "ana");
    assert_eq!(nodes[2].id, "anaç");
    assert_eq!(nodes[2].azerbaijani_sentences, "");
}

#[tokio::test]
async fn test_spreadsheet_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/drive/v3/files");
            then.status(200).json_body(json!({ "files": [] }));
        })
        .await;

    let err = client(&server)
        .fetch_records("Missing Sheet", "newbrand")
        .await
        .unwrap_err();

    assert!(matches!(err, SheetError::SpreadsheetNotFound(ref t) if t == "Missing Sheet"));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_worksheet_not_found() {
    let server = MockServer::start_async().await;
    mock_drive_found(&server).await;
    mock_metadata(&server).await;

    let err = client(&server)
        .fetch_records("Söz Xəritəsi", "oldbrand")
        .await
        .unwrap_err();

    assert!(matches!(err, SheetError::WorksheetNotFound(ref t) if t == "oldbrand"));
}

#[tokio::test]
async fn test_upstream_error_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/drive/v3/files");
            then.status(403).json_body(json!({
                "error": {
                    "code": 403,
                    "message": "The caller does not have permission",
                    "status": "PERMISSION_DENIED"
                }
            }));
        })
        .await;

    let err = client(&server)
        .fetch_records("Söz Xəritəsi", "newbrand")
        .await
        .unwrap_err();

    match err {
        SheetError::Upstream { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "The caller does not have permission");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_worksheet() {
    let server = MockServer::start_async().await;
    mock_drive_found(&server).await;
    mock_metadata(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path_contains("/v4/spreadsheets/sheet-123/values/");
            then.status(200).json_body(json!({
                "range": "newbrand!A1:Z1000",
                "majorDimension": "ROWS"
            }));
        })
        .await;

    let rows = client(&server)
        .fetch_records("Söz Xəritəsi", "newbrand")
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_malformed_payload() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/drive/v3/files");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let err = client(&server)
        .fetch_records("Söz Xəritəsi", "newbrand")
        .await
        .unwrap_err();
    assert!(matches!(err, SheetError::Malformed(_)));
}
