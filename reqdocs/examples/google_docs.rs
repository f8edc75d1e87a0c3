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
use reqdocs::google_docs::{default_client, extract_id, RequestOptions};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://docs.google.com/document/d/abc123/edit".to_string());
    let Some(id) = extract_id(&url) else {
        anyhow::bail!("not a google docs url: {url}");
    };

    let client = default_client();

    let doc = client
        .request(&RequestOptions::get(format!("/documents/{id}")))
        .await?;
    println!("title: {}", doc["title"]);

    // List every document the account can see through the Drive API.
    let files = client
        .request_all_items(
            "files",
            &RequestOptions::get("")
                .with_uri("https://www.googleapis.com/drive/v3/files")
                .with_query("q", "mimeType = 'application/vnd.google-apps.document'"),
        )
        .await?;
    println!("documents: {}", files.len());

    client
        .request(
            &RequestOptions::post(format!("/documents/{id}:batchUpdate")).with_body(json!({
                "requests": [{"insertText": {"text": "Hello\n", "location": {"index": 1}}}]
            })),
        )
        .await?;

    Ok(())
}
