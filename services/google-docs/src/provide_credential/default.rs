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

use reqdocs_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

use super::{EnvCredentialProvider, StaticCredentialProvider};
use crate::config::Config;
use crate::credential::ServiceAccount;

/// DefaultCredentialProvider tries the usual sources of a service account in order:
///
/// 1. Base64 content from [`Config::credential_content`]
/// 2. Environment variables, see [`EnvCredentialProvider`]
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<ServiceAccount>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a provider that only reads the environment.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create a provider for `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut chain = ProvideCredentialChain::new();
        if let Some(content) = &config.credential_content {
            chain = chain.push(StaticCredentialProvider::from_base64(content.clone()));
        }
        chain = chain.push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<ServiceAccount>) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = ServiceAccount;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GOOGLE_DOCS_PRIVATE_KEY, GOOGLE_DOCS_SERVICE_ACCOUNT_EMAIL};
    use reqdocs_core::hash::base64_encode;
    use reqdocs_core::StaticEnv;
    use std::collections::HashMap;

    fn env_ctx() -> Context {
        Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (
                    GOOGLE_DOCS_SERVICE_ACCOUNT_EMAIL.to_string(),
                    "env@example.com".to_string(),
                ),
                (GOOGLE_DOCS_PRIVATE_KEY.to_string(), "key".to_string()),
            ]),
        })
    }

    #[tokio::test]
    async fn test_default_without_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let provider = DefaultCredentialProvider::new();
        let sa = provider
            .provide_credential(&Context::new())
            .await
            .expect("load must succeed");
        assert!(sa.is_none());
    }

    #[tokio::test]
    async fn test_default_with_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let provider = DefaultCredentialProvider::new();
        let sa = provider
            .provide_credential(&env_ctx())
            .await
            .expect("load must succeed")
            .expect("credential must exist");
        assert_eq!(sa.email, "env@example.com");
    }

    #[tokio::test]
    async fn test_default_prefers_config_content() {
        let _ = env_logger::builder().is_test(true).try_init();

        let content = base64_encode(
            br#"{"client_email": "config@example.com", "private_key": "key"}"#,
        );
        let provider =
            DefaultCredentialProvider::from_config(&Config::new().with_credential_content(content));
        let sa = provider
            .provide_credential(&env_ctx())
            .await
            .expect("load must succeed")
            .expect("credential must exist");
        assert_eq!(sa.email, "config@example.com");
    }

    #[tokio::test]
    async fn test_default_skips_broken_config_content() {
        let _ = env_logger::builder().is_test(true).try_init();

        let provider = DefaultCredentialProvider::from_config(
            &Config::new().with_credential_content("not base64 at all!"),
        );
        let sa = provider
            .provide_credential(&env_ctx())
            .await
            .expect("load must succeed")
            .expect("credential must exist");
        assert_eq!(sa.email, "env@example.com");
    }
}
