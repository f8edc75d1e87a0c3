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

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static DOCUMENT_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https://docs\.google\.com/document/d/([a-zA-Z0-9_-]+)/")
        .expect("document url pattern must be valid")
});

/// Check if `value` is a JSON object with at least one key.
pub fn has_keys(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| !obj.is_empty())
}

/// Extract the document id from a Google Docs url.
///
/// The dots of `docs.google.com` only match literal dots, so look-alike hosts such as
/// `docsxgoogle.com` are rejected. The id must be followed by a `/`.
///
/// ```
/// use reqdocs_google_docs::extract_id;
///
/// assert_eq!(
///     extract_id("https://docs.google.com/document/d/abc123/edit"),
///     Some("abc123")
/// );
/// assert_eq!(extract_id("https://example.com"), None);
/// ```
pub fn extract_id(url: &str) -> Option<&str> {
    DOCUMENT_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Uppercase the first character of `s`.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
