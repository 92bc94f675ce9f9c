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

use s3sign_core::time::{format_date, format_iso8601, DateTime};

/// The two timestamps of one signing operation.
///
/// Both are derived from the same instant, so the date in the credential
/// scope can never drift from the one in `x-amz-date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dates {
    /// `YYYYMMDD`
    pub short: String,
    /// `YYYYMMDD'T'HHMMSS'Z'`
    pub long: String,
}

impl Dates {
    /// Format both timestamps from one instant.
    pub fn new(time: DateTime) -> Self {
        Self {
            short: format_date(time),
            long: format_iso8601(time),
        }
    }
}
