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

use http::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::constants::X_AMZ_ACL;

/// Canned ACLs that can be requested with the `x-amz-acl` header.
///
/// Add the header before signing so it is covered by the signature.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredefinedAcl {
    /// Leave the ACL to the bucket default, no header is sent.
    #[default]
    Default,
    /// Owner gets full control.
    Private,
    /// Everyone gets read access.
    PublicRead,
    /// Everyone gets read and write access.
    PublicReadWrite,
    /// EC2 gets read access to bundled AMIs.
    AwsExecRead,
    /// Authenticated users get read access.
    AuthenticatedRead,
    /// Bucket owner gets read access to the object.
    BucketOwnerRead,
    /// Bucket owner gets full control of the object.
    BucketOwnerFullControl,
    /// Bucket only, not applicable to object requests.
    LogDeliveryWrite,
}

impl PredefinedAcl {
    /// Value of the `x-amz-acl` header, if this ACL sends one.
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            PredefinedAcl::Default | PredefinedAcl::LogDeliveryWrite => None,
            PredefinedAcl::Private => Some("private"),
            PredefinedAcl::PublicRead => Some("public-read"),
            PredefinedAcl::PublicReadWrite => Some("public-read-write"),
            PredefinedAcl::AwsExecRead => Some("aws-exec-read"),
            PredefinedAcl::AuthenticatedRead => Some("authenticated-read"),
            PredefinedAcl::BucketOwnerRead => Some("bucket-owner-read"),
            PredefinedAcl::BucketOwnerFullControl => Some("bucket-owner-full-control"),
        }
    }

    /// Insert `x-amz-acl` into `headers`.
    pub fn apply(&self, headers: &mut HeaderMap) {
        if let Some(v) = self.header_value() {
            headers.insert(X_AMZ_ACL, HeaderValue::from_static(v));
        }
    }
}
