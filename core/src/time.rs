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

//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime with the current time.
#[inline]
pub fn now() -> DateTime {
    Utc::now()
}

/// Seconds since the Unix epoch for the given time.
#[inline]
pub fn unix_timestamp(t: DateTime) -> u64 {
    // Times before the epoch do not occur for issued tokens.
    t.timestamp().max(0) as u64
}

/// Parse a Unix timestamp in seconds back into a DateTime.
pub fn from_unix_timestamp(secs: u64) -> Option<DateTime> {
    DateTime::from_timestamp(i64::try_from(secs).ok()?, 0)
}
