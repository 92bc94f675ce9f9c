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

use std::fmt::{Debug, Formatter};

use s3sign_core::utils::Redact;
use serde::{Deserialize, Serialize};

use crate::Region;

/// Config for the signer.
///
/// Config only carries values that are already resolved. Loading them from
/// the environment or shared credential files is up to the caller.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `access_key_id` will be used as the access key of the credential.
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be used as the secret key of the credential.
    pub secret_access_key: Option<String>,
    /// `session_token` is only present for temporary credentials.
    pub session_token: Option<String>,
    /// `region` the requests are signed for.
    pub region: Option<Region>,
    /// `service` the requests are signed for, `s3` if not set.
    pub service: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("region", &self.region)
            .field("service", &self.service)
            .finish()
    }
}
