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

use std::fmt::{self, Debug};

use reqdocs_core::hash::base64_decode;
use reqdocs_core::time::{now, DateTime};
use reqdocs_core::utils::Redact;
use reqdocs_core::{Error, Result, SigningCredential};
use serde::Deserialize;

/// ServiceAccount holds the identity used to sign token assertions.
///
/// Both the workflow credential shape (`email`, `delegatedEmail`, `privateKey`) and the
/// Google key file shape (`client_email`, `private_key`) deserialize into it.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    /// The service account email, used as the assertion issuer.
    #[serde(alias = "client_email")]
    pub email: String,
    /// The user to impersonate through domain-wide delegation.
    #[serde(default, rename = "delegatedEmail", alias = "delegated_email")]
    pub delegated_email: Option<String>,
    /// PEM encoded RSA private key.
    #[serde(rename = "privateKey", alias = "private_key")]
    pub private_key: String,
}

impl ServiceAccount {
    /// Create a service account without delegation.
    pub fn new(email: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            delegated_email: None,
            private_key: private_key.into(),
        }
    }

    /// Impersonate `email` when requesting tokens.
    pub fn with_delegated_email(mut self, email: impl Into<String>) -> Self {
        self.delegated_email = Some(email.into());
        self
    }

    /// The identity tokens are issued for.
    ///
    /// An empty delegated email counts as absent.
    pub fn subject(&self) -> &str {
        match self.delegated_email.as_deref() {
            Some(delegated) if !delegated.is_empty() => delegated,
            _ => &self.email,
        }
    }

    /// Parse a service account from JSON content.
    pub fn from_slice(v: &[u8]) -> Result<Self> {
        serde_json::from_slice(v).map_err(|e| {
            Error::credential_invalid("failed to parse service account credential").with_source(e)
        })
    }

    /// Parse a service account from base64-encoded JSON content.
    pub fn from_base64(content: &str) -> Result<Self> {
        let decoded = base64_decode(content)?;
        Self::from_slice(&decoded)
    }
}

impl Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("email", &self.email)
            .field("delegated_email", &self.delegated_email)
            .field("private_key", &Redact::from(&self.private_key))
            .finish()
    }
}

impl SigningCredential for ServiceAccount {
    fn is_valid(&self) -> bool {
        !self.email.is_empty() && !self.private_key.is_empty()
    }
}

/// Token represents an OAuth2 access token.
///
/// Tokens are used for a single request and never cached.
#[derive(Clone, Default)]
pub struct Token {
    /// The access token.
    pub access_token: String,
    /// The expiration time of the token, when the endpoint reported one.
    pub expires_at: Option<DateTime>,
}

impl Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl SigningCredential for Token {
    fn is_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }

        match self.expires_at {
            Some(expires_at) => now() < expires_at,
            None => true,
        }
    }
}
