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

use std::fmt;
use std::str::FromStr;

use log::warn;
use reqdocs_core::{Context, Error, Result};

use crate::constants::*;

/// How requests are authorized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthenticationMethod {
    /// Sign an assertion with a service account key and exchange it for a token.
    #[default]
    ServiceAccount,
    /// Hand the request to the delegated OAuth2 helper of the context.
    OAuth2,
}

impl FromStr for AuthenticationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "serviceAccount" | "service_account" => Ok(Self::ServiceAccount),
            "oAuth2" | "oauth2" => Ok(Self::OAuth2),
            v => Err(Error::config_invalid(format!(
                "unknown authentication method: {v}"
            ))),
        }
    }
}

impl fmt::Display for AuthenticationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceAccount => f.write_str("serviceAccount"),
            Self::OAuth2 => f.write_str("oAuth2"),
        }
    }
}

/// Config carries all the configuration for Google Docs requests.
#[derive(Clone, Debug)]
pub struct Config {
    /// Authorization strategy used for every request.
    pub authentication: AuthenticationMethod,
    /// Base uri that endpoints are appended to.
    pub api_base: String,
    /// OAuth2 token endpoint, also used as the assertion audience.
    pub token_url: String,
    /// Scopes requested for service account tokens.
    pub scopes: Vec<String>,
    /// Upper bound on pages fetched by a paginated request.
    ///
    /// `None` follows continuation tokens for as long as the server returns them.
    pub max_pages: Option<usize>,
    /// Base64 encoded service account JSON.
    pub credential_content: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            authentication: AuthenticationMethod::default(),
            api_base: DEFAULT_API_BASE.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            max_pages: None,
            credential_content: None,
        }
    }
}

impl Config {
    /// Create a new config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authentication method.
    pub fn with_authentication(mut self, authentication: AuthenticationMethod) -> Self {
        self.authentication = authentication;
        self
    }

    /// Set the api base uri.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the token endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Set the requested scopes.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Limit the number of pages a paginated request may fetch.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Set base64 encoded service account content.
    pub fn with_credential_content(mut self, content: impl Into<String>) -> Self {
        self.credential_content = Some(content.into());
        self
    }

    /// Load config from environment variables.
    ///
    /// Invalid values are logged and replaced by their defaults.
    pub fn from_env(ctx: &Context) -> Self {
        Self::try_from_env(ctx).unwrap_or_else(|err| {
            warn!("invalid google docs config in env, falling back to defaults: {err}");
            Self::default()
        })
    }

    /// Load config from environment variables, failing on invalid values.
    pub fn try_from_env(ctx: &Context) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(v) = ctx.env_var(GOOGLE_DOCS_AUTHENTICATION) {
            cfg.authentication = v.parse()?;
        }

        if let Some(v) = ctx.env_var(GOOGLE_DOCS_API_BASE) {
            cfg = cfg.with_api_base(v);
        }

        if let Some(v) = ctx.env_var(GOOGLE_DOCS_TOKEN_URL) {
            cfg.token_url = v;
        }

        if let Some(v) = ctx.env_var(GOOGLE_DOCS_MAX_PAGES) {
            let max_pages = v.parse::<usize>().map_err(|e| {
                Error::config_invalid(format!("invalid {GOOGLE_DOCS_MAX_PAGES}: {v}"))
                    .with_source(e)
            })?;
            cfg.max_pages = Some(max_pages);
        }

        if let Some(v) = ctx.env_var(GOOGLE_DOCS_CREDENTIAL) {
            cfg.credential_content = Some(v);
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqdocs_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;
    use test_case::test_case;

    fn ctx_with_env(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test_case("serviceAccount", AuthenticationMethod::ServiceAccount ; "workflow service account")]
    #[test_case("service_account", AuthenticationMethod::ServiceAccount ; "snake service account")]
    #[test_case("oAuth2", AuthenticationMethod::OAuth2 ; "workflow oauth2")]
    #[test_case("oauth2", AuthenticationMethod::OAuth2 ; "lower oauth2")]
    fn test_parse_authentication(input: &str, expected: AuthenticationMethod) {
        assert_eq!(input.parse::<AuthenticationMethod>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_authentication() {
        let err = "apiKey".parse::<AuthenticationMethod>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_default() {
        let cfg = Config::new();
        assert_eq!(cfg.authentication, AuthenticationMethod::ServiceAccount);
        assert_eq!(cfg.api_base, "https://docs.googleapis.com/v1");
        assert_eq!(cfg.token_url, "https://oauth2.googleapis.com/token");
        assert_eq!(cfg.scopes.len(), 3);
        assert_eq!(cfg.max_pages, None);
    }

    #[test]
    fn test_from_env() {
        let ctx = ctx_with_env(&[
            (GOOGLE_DOCS_AUTHENTICATION, "oAuth2"),
            (GOOGLE_DOCS_API_BASE, "http://127.0.0.1:8080/v1/"),
            (GOOGLE_DOCS_TOKEN_URL, "http://127.0.0.1:8080/token"),
            (GOOGLE_DOCS_MAX_PAGES, "5"),
            (GOOGLE_DOCS_CREDENTIAL, "e30="),
        ]);

        let cfg = Config::try_from_env(&ctx).unwrap();
        assert_eq!(cfg.authentication, AuthenticationMethod::OAuth2);
        assert_eq!(cfg.api_base, "http://127.0.0.1:8080/v1");
        assert_eq!(cfg.token_url, "http://127.0.0.1:8080/token");
        assert_eq!(cfg.max_pages, Some(5));
        assert_eq!(cfg.credential_content.as_deref(), Some("e30="));
    }

    #[test]
    fn test_from_env_invalid_falls_back() {
        let ctx = ctx_with_env(&[(GOOGLE_DOCS_MAX_PAGES, "many")]);

        let err = Config::try_from_env(&ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let cfg = Config::from_env(&ctx);
        assert_eq!(cfg.max_pages, None);
    }
}
