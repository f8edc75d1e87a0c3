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

use async_trait::async_trait;
use log::debug;

use reqdocs_core::{Context, ProvideCredential, Result};

use crate::credential::ServiceAccount;

#[derive(Clone)]
enum Content {
    Json(String),
    Base64(String),
}

/// StaticCredentialProvider parses a service account from content it was given.
#[derive(Clone)]
pub struct StaticCredentialProvider {
    content: Content,
}

impl std::fmt::Debug for StaticCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoding = match self.content {
            Content::Json(_) => "json",
            Content::Base64(_) => "base64",
        };
        f.debug_struct("StaticCredentialProvider")
            .field("content", &encoding)
            .finish()
    }
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider from JSON content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Content::Json(content.into()),
        }
    }

    /// Create a new StaticCredentialProvider from base64 encoded JSON content.
    ///
    /// The content is decoded when a credential is requested.
    pub fn from_base64(content: impl Into<String>) -> Self {
        Self {
            content: Content::Base64(content.into()),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = ServiceAccount;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        debug!("loading service account from static content");

        let sa = match &self.content {
            Content::Json(content) => ServiceAccount::from_slice(content.as_bytes()),
            Content::Base64(content) => ServiceAccount::from_base64(content),
        }
        .inspect_err(|err| debug!("failed to parse service account from content: {err:?}"))?;

        Ok(Some(sa))
    }
}
