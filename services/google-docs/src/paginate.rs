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

use log::debug;
use serde_json::Value;

use reqdocs_core::{Error, Result};

use crate::constants::{NEXT_PAGE_TOKEN, PAGE_SIZE, PAGE_SIZE_PARAMS, PAGE_TOKEN};
use crate::request::{ApiClient, RequestOptions};

impl ApiClient {
    /// Fetch every page of a listing and collect the items stored under `property`.
    ///
    /// Each request asks for 100 items per page. The `nextPageToken` of a response is sent
    /// back as `pageToken` until the server returns no token, a `null` one or an empty one.
    /// A `null` token counts as omitted.
    ///
    /// A page without `property` contributes nothing. Items are returned in fetch order,
    /// and a failing page fails the whole call.
    pub async fn request_all_items(
        &self,
        property: &str,
        opts: &RequestOptions,
    ) -> Result<Vec<Value>> {
        let mut opts = PAGE_SIZE_PARAMS
            .iter()
            .fold(opts.clone(), |opts, key| opts.with_query(*key, PAGE_SIZE));
        let mut items = Vec::new();
        let mut pages = 0;

        loop {
            let mut page = self.request(&opts).await?;
            pages += 1;

            match page.get_mut(property).map(Value::take) {
                None | Some(Value::Null) => {}
                Some(Value::Array(values)) => items.extend(values),
                Some(_) => {
                    return Err(Error::api(
                        &self.node().name,
                        Error::unexpected(format!(
                            "field {property} of page {pages} is not an array"
                        )),
                    ));
                }
            }

            let token = match page.get(NEXT_PAGE_TOKEN) {
                None | Some(Value::Null) => break,
                Some(Value::String(token)) => token.clone(),
                Some(token) => token.to_string(),
            };
            if token.is_empty() {
                break;
            }

            if self.config().max_pages.is_some_and(|max| pages >= max) {
                return Err(Error::api(
                    &self.node().name,
                    Error::unexpected(format!(
                        "stopped after {pages} pages with more results pending"
                    )),
                ));
            }

            debug!("fetching page {} of {property}", pages + 1);
            opts = opts.with_query(PAGE_TOKEN, token);
        }

        debug!("collected {} {property} from {pages} pages", items.len());
        Ok(items)
    }
}
