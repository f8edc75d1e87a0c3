// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use anyhow::Result;
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use reqdocs_core::{Context, ErrorKind};
use reqdocs_google_docs::{ApiClient, Config, RequestOptions, StaticCredentialProvider};

use crate::mock::*;

fn client(http: &MockHttpSend, config: Config) -> ApiClient {
    let ctx = Context::new().with_http_send(http.clone());
    let provider = StaticCredentialProvider::new(
        json!({
            "email": "bot@project.iam.gserviceaccount.com",
            "privateKey": PRIVATE_KEY,
        })
        .to_string(),
    );
    ApiClient::new(ctx, config, provider)
}

fn list_files() -> RequestOptions {
    RequestOptions::get("")
        .with_uri(DRIVE_FILES)
        .with_query("q", "mimeType = 'application/vnd.google-apps.document'")
}

#[tokio::test]
async fn test_collects_pages_in_order() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let http = MockHttpSend::new()
        .token("ya29.test")
        .reply_json(
            DRIVE_FILES,
            json!({"files": [{"id": "a"}, {"id": "b"}], "nextPageToken": "t1"}),
        )
        .reply_json(
            DRIVE_FILES,
            json!({"files": [{"id": "c"}], "nextPageToken": "t2"}),
        )
        .reply_json(DRIVE_FILES, json!({"files": [{"id": "d"}]}));

    let items = client(&http, Config::new())
        .request_all_items("files", &list_files())
        .await?;
    assert_eq!(
        items,
        vec![
            json!({"id": "a"}),
            json!({"id": "b"}),
            json!({"id": "c"}),
            json!({"id": "d"}),
        ]
    );

    let pages = http.requests_to(DRIVE_FILES);
    assert_eq!(pages.len(), 3);
    for page in &pages {
        let query = page.query();
        assert_eq!(query["maxResults"], "100");
        assert_eq!(query["pageSize"], "100");
        assert_eq!(
            query["q"],
            "mimeType = 'application/vnd.google-apps.document'"
        );
    }
    assert_eq!(pages[0].query().get("pageToken"), None);
    assert_eq!(pages[1].query()["pageToken"], "t1");
    assert_eq!(pages[2].query()["pageToken"], "t2");

    // Tokens are not cached, every page exchanges a new one.
    assert_eq!(http.requests_to(TOKEN_URL).len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_empty_token_stops() -> Result<()> {
    let http = MockHttpSend::new()
        .token("ya29.test")
        .reply_json(
            DRIVE_FILES,
            json!({"files": [{"id": "a"}], "nextPageToken": ""}),
        )
        .reply_json(DRIVE_FILES, json!({"files": [{"id": "never"}]}));

    let items = client(&http, Config::new())
        .request_all_items("files", &list_files())
        .await?;
    assert_eq!(items, vec![json!({"id": "a"})]);
    assert_eq!(http.requests_to(DRIVE_FILES).len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_null_token_stops() -> Result<()> {
    let http = MockHttpSend::new()
        .token("ya29.test")
        .reply_json(
            DRIVE_FILES,
            json!({"files": [{"id": "a"}], "nextPageToken": null}),
        )
        .reply_json(DRIVE_FILES, json!({"files": [{"id": "never"}]}));

    let items = client(&http, Config::new())
        .request_all_items("files", &list_files())
        .await?;
    assert_eq!(items.len(), 1);
    assert_eq!(http.requests_to(DRIVE_FILES).len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_missing_field_contributes_nothing() -> Result<()> {
    let http = MockHttpSend::new()
        .token("ya29.test")
        .reply_json(DRIVE_FILES, json!({"nextPageToken": "t1"}))
        .reply_json(DRIVE_FILES, json!({"files": null, "nextPageToken": "t2"}))
        .reply_json(DRIVE_FILES, json!({"files": [{"id": "a"}]}));

    let items = client(&http, Config::new())
        .request_all_items("files", &list_files())
        .await?;
    assert_eq!(items, vec![json!({"id": "a"})]);
    assert_eq!(http.requests_to(DRIVE_FILES).len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_non_array_field_is_api_error() {
    let http = MockHttpSend::new()
        .token("ya29.test")
        .reply_json(DRIVE_FILES, json!({"files": {"id": "a"}}));

    let err = client(&http, Config::new())
        .request_all_items("files", &list_files())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.node(), Some("Google Docs"));
}

#[tokio::test]
async fn test_failure_discards_items() {
    let http = MockHttpSend::new()
        .token("ya29.test")
        .reply_json(
            DRIVE_FILES,
            json!({"files": [{"id": "a"}], "nextPageToken": "t1"}),
        )
        .reply(
            DRIVE_FILES,
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": {"message": "Backend Error"}}"#,
        );

    let err = client(&http, Config::new())
        .request_all_items("files", &list_files())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.message(), "Backend Error");
}

#[tokio::test]
async fn test_max_pages_stops_endless_stream() {
    let http = MockHttpSend::new().token("ya29.test").reply_json(
        DRIVE_FILES,
        json!({"files": [{"id": "again"}], "nextPageToken": "same"}),
    );

    let err = client(&http, Config::new().with_max_pages(3))
        .request_all_items("files", &list_files())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(http.requests_to(DRIVE_FILES).len(), 3);
}

#[tokio::test]
async fn test_max_pages_allows_finished_stream() -> Result<()> {
    let http = MockHttpSend::new()
        .token("ya29.test")
        .reply_json(
            DRIVE_FILES,
            json!({"files": [{"id": "a"}], "nextPageToken": "t1"}),
        )
        .reply_json(DRIVE_FILES, json!({"files": [{"id": "b"}]}));

    let items = client(&http, Config::new().with_max_pages(2))
        .request_all_items("files", &list_files())
        .await?;
    assert_eq!(items.len(), 2);

    Ok(())
}
