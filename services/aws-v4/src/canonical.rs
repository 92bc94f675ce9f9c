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

use std::fmt::{Display, Formatter};

use http::header;
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet};
use s3sign_core::{Result, SigningRequest};

use crate::constants::{AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET};

/// Percent encode `input`, leaving alphanumerics and every character not in
/// `set` untouched. Escapes use uppercase hex.
///
/// Use [`AWS_URI_ENCODE_SET`] for paths and [`AWS_QUERY_ENCODE_SET`] for a
/// single query name or value.
pub fn uri_encode(input: &str, set: &'static AsciiSet) -> String {
    utf8_percent_encode(input, set).to_string()
}

/// The canonical form of a request as defined by SigV4.
///
/// ```text
/// <method>
/// <canonical uri>
/// <canonical query>
/// <canonical headers, one per line>
///
/// <signed headers>
/// <payload digest>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: Method,
    uri: String,
    query: String,
    headers: Vec<(String, String)>,
    signed_headers: String,
    payload_digest: String,
}

impl CanonicalRequest {
    /// Build the canonical request of `req`, signed over `payload_digest`.
    pub fn build(req: &SigningRequest, payload_digest: &str) -> Result<Self> {
        let uri = uri_encode(&req.path_percent_decoded()?, &AWS_URI_ENCODE_SET);

        let query = {
            let mut pairs = req
                .query
                .iter()
                .map(|(k, v)| {
                    (
                        uri_encode(k, &AWS_QUERY_ENCODE_SET),
                        uri_encode(v, &AWS_QUERY_ENCODE_SET),
                    )
                })
                .collect::<Vec<_>>();
            // Sort via encoded name, then value.
            pairs.sort();

            pairs
                .into_iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&")
        };

        let mut headers = Vec::with_capacity(req.headers.keys_len());
        for name in req.headers.keys() {
            if name == header::AUTHORIZATION {
                continue;
            }

            // Repeated headers are folded into one comma separated value.
            let values = req
                .headers
                .get_all(name)
                .iter()
                .map(SigningRequest::header_value_normalize)
                .collect::<Result<Vec<_>>>()?;
            headers.push((name.as_str().to_string(), values.join(",")));
        }
        // HeaderName is always lowercase, so sorting the names is enough.
        headers.sort();

        let signed_headers = headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";");

        Ok(CanonicalRequest {
            method: req.method.clone(),
            uri,
            query,
            headers,
            signed_headers,
            payload_digest: payload_digest.to_string(),
        })
    }

    /// Canonical URI, `/` for an empty path.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Canonical query string, empty if there is no query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Sorted `name;name` list of every header covered by the signature.
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.uri)?;
        writeln!(f, "{}", self.query)?;
        for (k, v) in &self.headers {
            writeln!(f, "{k}:{v}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.signed_headers)?;
        write!(f, "{}", self.payload_digest)
    }
}
