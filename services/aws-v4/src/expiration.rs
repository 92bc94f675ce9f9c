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

use std::time::Duration;

use s3sign_core::{Error, Result};

use crate::constants::MAX_PRESIGN_EXPIRES_SECS;

/// Lifetime of a presigned url, between 1 second and 7 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Expiration(u64);

impl Expiration {
    /// Create an expiration of `secs` seconds.
    pub fn from_secs(secs: u64) -> Result<Self> {
        if secs == 0 || secs > MAX_PRESIGN_EXPIRES_SECS {
            return Err(Error::request_invalid(format!(
                "presign expiration must be within 1..={MAX_PRESIGN_EXPIRES_SECS} seconds, got {secs}"
            )));
        }

        Ok(Self(secs))
    }

    /// Seconds as they appear in `X-Amz-Expires`.
    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl TryFrom<Duration> for Expiration {
    type Error = Error;

    fn try_from(d: Duration) -> Result<Self> {
        Self::from_secs(d.as_secs())
    }
}
