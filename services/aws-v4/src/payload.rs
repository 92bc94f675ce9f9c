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

use bytes::Bytes;
use s3sign_core::hash::{base64_md5, hex_sha256};

use crate::constants::{EMPTY_STRING_SHA256, UNSIGNED_PAYLOAD};

/// Body of the request being signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Body content that is hashed into the signature.
    Bytes(Bytes),
    /// No body at all.
    Empty,
    /// Body is not hashed; the signature covers `UNSIGNED-PAYLOAD` instead.
    Unsigned,
}

impl Payload {
    /// Value of `x-amz-content-sha256` and the last line of the canonical request.
    pub fn digest(&self) -> String {
        match self {
            Payload::Bytes(bs) => hex_sha256(bs),
            Payload::Empty => EMPTY_STRING_SHA256.to_string(),
            Payload::Unsigned => UNSIGNED_PAYLOAD.to_string(),
        }
    }

    /// Body bytes, empty for both `Empty` and `Unsigned`.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Bytes(bs) => bs,
            Payload::Empty | Payload::Unsigned => &[],
        }
    }

    /// Length to announce in `Content-Length`, unknown for unsigned payloads.
    pub fn content_length(&self) -> Option<u64> {
        match self {
            Payload::Bytes(bs) => Some(bs.len() as u64),
            Payload::Empty => Some(0),
            Payload::Unsigned => None,
        }
    }

    /// `Content-MD5` of the body, unknown for unsigned payloads.
    pub fn content_md5(&self) -> Option<String> {
        match self {
            Payload::Bytes(_) | Payload::Empty => Some(base64_md5(self.as_bytes())),
            Payload::Unsigned => None,
        }
    }

    /// Check if this payload is signed as `UNSIGNED-PAYLOAD`.
    pub fn is_unsigned(&self) -> bool {
        matches!(self, Payload::Unsigned)
    }
}

impl From<Bytes> for Payload {
    fn from(bs: Bytes) -> Self {
        if bs.is_empty() {
            Payload::Empty
        } else {
            Payload::Bytes(bs)
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bs: Vec<u8>) -> Self {
        Bytes::from(bs).into()
    }
}

impl From<&'static str> for Payload {
    fn from(s: &'static str) -> Self {
        Bytes::from_static(s.as_bytes()).into()
    }
}
