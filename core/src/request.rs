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

use std::borrow::Cow;

use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;
use percent_encoding::percent_decode_str;

use crate::{Error, Result};

/// Signing context for request.
///
/// Holds the pieces of a request that go into a signature: the method,
/// the host, the raw path, the decoded query pairs and the headers.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP host (with port if the url carries one), `None` for origin-form urls.
    pub host: Option<String>,
    /// HTTP path, still percent encoded as it appeared in the url.
    pub path: String,
    /// HTTP query parameters, percent decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Decompose a url into a signing context.
    ///
    /// Both absolute urls (`https://host/path?query`) and origin-form urls
    /// (`/path?query`) are accepted.
    pub fn new(method: Method, url: &str, headers: HeaderMap) -> Result<Self> {
        let uri: Uri = url.parse()?;

        let host = uri.authority().map(|authority| {
            // Userinfo is never part of the host header.
            let s = authority.as_str();
            match s.rsplit_once('@') {
                Some((_, host)) => host.to_string(),
                None => s.to_string(),
            }
        });

        let query = match uri.query() {
            Some(q) => Self::query_decode(q)?,
            None => Vec::new(),
        };

        Ok(SigningRequest {
            method,
            host,
            path: uri.path().to_string(),
            query,
            headers,
        })
    }

    /// Split a raw query into percent decoded pairs.
    ///
    /// Unlike `application/x-www-form-urlencoded`, a literal `+` stays a `+`.
    fn query_decode(query: &str) -> Result<Vec<(String, String)>> {
        query
            .split('&')
            .filter(|v| !v.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                Ok((Self::percent_decode(k)?, Self::percent_decode(v)?))
            })
            .collect()
    }

    fn percent_decode(s: &str) -> Result<String> {
        percent_decode_str(s)
            .decode_utf8()
            .map(Cow::into_owned)
            .map_err(|e| {
                Error::invalid_url(format!("url component {s:?} is not valid utf-8"))
                    .with_source(e)
            })
    }

    /// Get the path percent decoded.
    ///
    /// Empty paths are returned as `/`.
    pub fn path_percent_decoded(&self) -> Result<Cow<'_, str>> {
        if self.path.is_empty() {
            return Ok(Cow::Borrowed("/"));
        }

        percent_decode_str(&self.path).decode_utf8().map_err(|e| {
            Error::invalid_url(format!("path {:?} is not valid utf-8", self.path)).with_source(e)
        })
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Get header names as sorted vector.
    pub fn header_name_to_vec_sorted(&self) -> Vec<&str> {
        let mut h = self
            .headers
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<&str>>();
        h.sort_unstable();

        h
    }

    /// Normalize header value.
    ///
    /// Leading and trailing spaces are trimmed, and runs of inner spaces are
    /// collapsed into one.
    pub fn header_value_normalize(v: &HeaderValue) -> Result<String> {
        let s = v.to_str()?;

        let mut normalized = String::with_capacity(s.len());
        for (idx, word) in s.split(' ').filter(|w| !w.is_empty()).enumerate() {
            if idx > 0 {
                normalized.push(' ');
            }
            normalized.push_str(word);
        }

        Ok(normalized)
    }
}
