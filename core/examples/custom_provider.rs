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

use std::collections::HashMap;

use async_trait::async_trait;
use reqdocs_core::{
    Context, Error, ProvideCredential, ProvideCredentialChain, Result, SigningCredential,
    StaticEnv,
};

// A credential made of an api key.
#[derive(Clone, Debug)]
struct ApiKey(String);

impl SigningCredential for ApiKey {
    fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }
}

// Reads the key from an env var, nothing when it is unset.
#[derive(Debug)]
struct EnvApiKey(&'static str);

#[async_trait]
impl ProvideCredential for EnvApiKey {
    type Credential = ApiKey;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(ctx.env_var(self.0).map(ApiKey))
    }
}

// Always fails, the chain logs it and moves on.
#[derive(Debug)]
struct Broken;

#[async_trait]
impl ProvideCredential for Broken {
    type Credential = ApiKey;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Err(Error::credential_invalid("key file is corrupted"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::from([("SECONDARY_API_KEY".to_string(), "key-2".to_string())]),
    });

    let chain = ProvideCredentialChain::new()
        .push(EnvApiKey("PRIMARY_API_KEY"))
        .push(Broken)
        .push(EnvApiKey("SECONDARY_API_KEY"));

    match chain.provide_credential(&ctx).await? {
        Some(key) if key.is_valid() => println!("loaded api key: {}", key.0),
        _ => println!("no api key found"),
    }

    Ok(())
}
