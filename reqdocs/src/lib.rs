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


//! Authenticated and paginated requests against the Google Docs API.
//!
//! This crate re-exports [`reqdocs_core`] and the service crates behind features:
//!
//! - `default-context`: [`default_context`] backed by reqwest and the OS environment.
//! - `google-docs`: the [`google_docs`] module.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> reqdocs::Result<()> {
//! use reqdocs::google_docs::RequestOptions;
//!
//! let client = reqdocs::google_docs::default_client();
//! let doc = client
//!     .request(&RequestOptions::get("/documents/abc123"))
//!     .await?;
//! println!("{}", doc["title"]);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use reqdocs_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;

#[cfg(feature = "google-docs")]
pub mod google_docs;
