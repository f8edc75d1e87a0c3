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

// Env values used by the Google Docs service.
pub const GOOGLE_DOCS_AUTHENTICATION: &str = "GOOGLE_DOCS_AUTHENTICATION";
pub const GOOGLE_DOCS_API_BASE: &str = "GOOGLE_DOCS_API_BASE";
pub const GOOGLE_DOCS_TOKEN_URL: &str = "GOOGLE_DOCS_TOKEN_URL";
pub const GOOGLE_DOCS_MAX_PAGES: &str = "GOOGLE_DOCS_MAX_PAGES";
pub const GOOGLE_DOCS_CREDENTIAL: &str = "GOOGLE_DOCS_CREDENTIAL";
pub const GOOGLE_DOCS_SERVICE_ACCOUNT_EMAIL: &str = "GOOGLE_DOCS_SERVICE_ACCOUNT_EMAIL";
pub const GOOGLE_DOCS_DELEGATED_EMAIL: &str = "GOOGLE_DOCS_DELEGATED_EMAIL";
pub const GOOGLE_DOCS_PRIVATE_KEY: &str = "GOOGLE_DOCS_PRIVATE_KEY";

pub const DEFAULT_API_BASE: &str = "https://docs.googleapis.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Scopes requested for every service account token.
pub const DEFAULT_SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/documents",
    "https://www.googleapis.com/auth/drive",
    "https://www.googleapis.com/auth/drive.file",
];

pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
pub const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Name of the OAuth2 credential handed to the delegated helper.
pub const OAUTH2_CREDENTIAL_TYPE: &str = "googleDocsOAuth2Api";

pub const DEFAULT_NODE_NAME: &str = "Google Docs";

// Pagination
pub const NEXT_PAGE_TOKEN: &str = "nextPageToken";
pub const PAGE_TOKEN: &str = "pageToken";
pub const PAGE_SIZE_PARAMS: [&str; 2] = ["maxResults", "pageSize"];
pub const PAGE_SIZE: &str = "100";

pub const ASSERTION_LIFETIME_SECS: u64 = 3600;
