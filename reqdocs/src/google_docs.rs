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


//! Google Docs support with convenience APIs.

pub use reqdocs_google_docs::*;

#[cfg(feature = "default-context")]
use crate::default_context;

/// Create an [`ApiClient`] with the default setup:
///
/// - Default context (reqwest HTTP client, OS environment)
/// - [`Config`] loaded from `GOOGLE_DOCS_*` environment variables
/// - [`DefaultCredentialProvider`] for that config
///
/// # Customization
///
/// ```no_run
/// use reqdocs::google_docs::{default_client_with_config, AuthenticationMethod, Config};
///
/// let client = default_client_with_config(
///     Config::new()
///         .with_authentication(AuthenticationMethod::ServiceAccount)
///         .with_max_pages(50),
/// );
/// ```
#[cfg(feature = "default-context")]
pub fn default_client() -> ApiClient {
    let config = Config::from_env(&default_context());
    default_client_with_config(config)
}

/// Create an [`ApiClient`] on the default context for `config`.
#[cfg(feature = "default-context")]
pub fn default_client_with_config(config: Config) -> ApiClient {
    let provider = DefaultCredentialProvider::from_config(&config);
    ApiClient::new(default_context(), config, provider)
}
