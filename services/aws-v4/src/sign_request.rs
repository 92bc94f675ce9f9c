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

use std::fmt::Write;

use http::request::Parts;
use http::{header, HeaderMap, HeaderValue, Method};
use log::debug;
use s3sign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use s3sign_core::time::{now, DateTime};
use s3sign_core::{Error, Result, SigningRequest};

use crate::canonical::{uri_encode, CanonicalRequest};
use crate::constants::{
    ALGORITHM, AWS4_REQUEST, AWS_QUERY_ENCODE_SET, CONTENT_MD5, S3_SERVICE, UNSIGNED_PAYLOAD,
    X_AMZ_ALGORITHM_QUERY, X_AMZ_CONTENT_SHA_256, X_AMZ_CREDENTIAL_QUERY, X_AMZ_DATE,
    X_AMZ_DATE_QUERY, X_AMZ_EXPIRES_QUERY, X_AMZ_SECURITY_TOKEN, X_AMZ_SECURITY_TOKEN_QUERY,
    X_AMZ_SIGNATURE_QUERY, X_AMZ_SIGNED_HEADERS_QUERY,
};
use crate::{Config, Credential, Dates, Expiration, Payload, Region};

/// RequestSigner that implement AWS SigV4 for S3.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer holds nothing but its credential, region and service, so one
/// instance can be shared by any number of threads.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
    region: Region,
    service: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for S3 in `region`.
    pub fn new(credential: Credential, region: Region) -> Self {
        Self {
            credential,
            region,
            service: S3_SERVICE.to_string(),

            time: None,
        }
    }

    /// Create a new signer from config.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let mut credential = Credential::new(
            cfg.access_key_id.clone().unwrap_or_default(),
            cfg.secret_access_key.clone().unwrap_or_default(),
        );
        if !credential.is_valid() {
            return Err(Error::config_invalid(
                "access_key_id and secret_access_key are required",
            ));
        }
        if let Some(token) = &cfg.session_token {
            credential = credential.with_session_token(token);
        }

        let region = cfg
            .region
            .ok_or_else(|| Error::config_invalid("region is required"))?;

        let signer = Self::new(credential, region);
        Ok(match &cfg.service {
            Some(service) => signer.with_service(service),
            None => signer,
        })
    }

    /// Sign for another service than `s3`.
    pub fn with_service(mut self, service: &str) -> Self {
        self.service = service.to_string();
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Get the region of this signer.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Get the service of this signer.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Build the final headers of a request.
    ///
    /// The returned map contains the caller headers plus `x-amz-date`, `host`,
    /// `authorization` and, depending on the service, payload and credential,
    /// `x-amz-content-sha256`, `x-amz-security-token`, `content-md5`,
    /// `content-length` and `content-type`.
    pub fn prepare(
        &self,
        method: &Method,
        url: &str,
        headers: &HeaderMap,
        payload: &Payload,
    ) -> Result<HeaderMap> {
        let dates = Dates::new(self.time.unwrap_or_else(now));
        let mut req = SigningRequest::new(method.clone(), url, headers.clone())?;

        let body_digest = payload.digest();
        self.canonicalize_header(&mut req, &dates, payload, &body_digest)?;

        let creq = CanonicalRequest::build(&req, &body_digest)?;
        let signature = self.calculate(&creq, &dates);

        let mut authorization = HeaderValue::from_str(&format!(
            "{ALGORITHM} Credential={}/{}, SignedHeaders={}, Signature={}",
            self.credential.access_key_id,
            credential_scope(&dates, self.region, &self.service),
            creq.signed_headers(),
            signature
        ))?;
        authorization.set_sensitive(true);
        req.headers.insert(header::AUTHORIZATION, authorization);

        if is_write(method) {
            append_content_headers(&mut req, payload)?;
        }

        Ok(req.headers)
    }

    /// Signing request with header.
    ///
    /// The headers of `parts` are replaced by the prepared headers only if
    /// signing succeeds.
    pub fn sign(&self, parts: &mut Parts, payload: &Payload) -> Result<()> {
        let url = parts.uri.to_string();
        parts.headers = self.prepare(&parts.method, &url, &parts.headers, payload)?;
        Ok(())
    }

    /// Build a presigned url that is valid for `expires`.
    ///
    /// The payload is always signed as `UNSIGNED-PAYLOAD`. The returned url
    /// carries the signature in `X-Amz-Signature`.
    pub fn presign(
        &self,
        method: &Method,
        url: &str,
        headers: &HeaderMap,
        expires: Expiration,
    ) -> Result<String> {
        // Query parameters must go before the fragment, which is never sent.
        let (url, fragment) = match url.split_once('#') {
            Some((url, fragment)) => (url, Some(fragment)),
            None => (url, None),
        };

        let dates = Dates::new(self.time.unwrap_or_else(now));
        let mut req = SigningRequest::new(method.clone(), url, headers.clone())?;
        insert_host(&mut req, self.region)?;

        let signed_headers = req
            .header_name_to_vec_sorted()
            .into_iter()
            .filter(|k| *k != header::AUTHORIZATION)
            .collect::<Vec<_>>()
            .join(";");

        let mut params = vec![
            (X_AMZ_ALGORITHM_QUERY, ALGORITHM.to_string()),
            (
                X_AMZ_CREDENTIAL_QUERY,
                format!(
                    "{}/{}",
                    self.credential.access_key_id,
                    credential_scope(&dates, self.region, &self.service)
                ),
            ),
            (X_AMZ_DATE_QUERY, dates.long.clone()),
            (X_AMZ_EXPIRES_QUERY, expires.as_secs().to_string()),
            (X_AMZ_SIGNED_HEADERS_QUERY, signed_headers),
        ];
        if let Some(token) = &self.credential.session_token {
            params.push((X_AMZ_SECURITY_TOKEN_QUERY, token.clone()));
        }
        for (k, v) in &params {
            req.query_push(*k, v.as_str());
        }

        let creq = CanonicalRequest::build(&req, UNSIGNED_PAYLOAD)?;
        let signature = self.calculate(&creq, &dates);
        params.push((X_AMZ_SIGNATURE_QUERY, signature));

        let mut presigned = url.to_string();
        let mut sep = match url.split_once('?') {
            None => "?",
            Some((_, q)) if q.is_empty() || q.ends_with('&') => "",
            Some(_) => "&",
        };
        for (k, v) in params {
            write!(presigned, "{sep}{k}={}", uri_encode(&v, &AWS_QUERY_ENCODE_SET))?;
            sep = "&";
        }
        if let Some(fragment) = fragment {
            write!(presigned, "#{fragment}")?;
        }

        Ok(presigned)
    }

    /// Signing request with query.
    ///
    /// The uri of `parts` is replaced by the presigned url.
    pub fn presign_request(&self, parts: &mut Parts, expires: Expiration) -> Result<()> {
        let url = parts.uri.to_string();
        let presigned = self.presign(&parts.method, &url, &parts.headers, expires)?;
        parts.uri = presigned.parse()?;
        Ok(())
    }

    fn canonicalize_header(
        &self,
        req: &mut SigningRequest,
        dates: &Dates,
        payload: &Payload,
        body_digest: &str,
    ) -> Result<()> {
        req.headers
            .insert(X_AMZ_DATE, HeaderValue::from_str(&dates.long)?);
        insert_host(req, self.region)?;

        // Unsigned payloads must announce themselves for every service.
        if payload.is_unsigned() || self.service == S3_SERVICE {
            req.headers
                .insert(X_AMZ_CONTENT_SHA_256, HeaderValue::from_str(body_digest)?);
        }

        // Insert X_AMZ_SECURITY_TOKEN header if security token exists.
        if let Some(token) = &self.credential.session_token {
            let mut value = HeaderValue::from_str(token)?;
            // Set token value sensitive to valid leaking.
            value.set_sensitive(true);

            req.headers.insert(X_AMZ_SECURITY_TOKEN, value);
        }

        Ok(())
    }

    fn calculate(&self, creq: &CanonicalRequest, dates: &Dates) -> String {
        let creq = creq.to_string();
        debug!("calculated canonical request: {creq}");

        signature(
            &creq,
            dates,
            &self.credential,
            self.region,
            &self.service,
        )
    }
}

/// Calculate the signature of a canonical request.
pub fn signature(
    canonical_request: &str,
    dates: &Dates,
    cred: &Credential,
    region: Region,
    service: &str,
) -> String {
    let scope = credential_scope(dates, region, service);
    debug!("calculated scope: {scope}");

    let string_to_sign = string_to_sign(canonical_request, dates, &scope);
    debug!("calculated string to sign: {string_to_sign}");

    let signing_key = signing_key(&cred.secret_access_key, dates, region, service);
    hex_hmac_sha256(&signing_key, string_to_sign.as_bytes())
}

/// Scope: "20220313/<region>/<service>/aws4_request"
pub fn credential_scope(dates: &Dates, region: Region, service: &str) -> String {
    format!("{}/{}/{}/{AWS4_REQUEST}", dates.short, region.code(), service)
}

/// StringToSign:
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/<service>/aws4_request
/// <hashed_canonical_request>
/// ```
pub fn string_to_sign(canonical_request: &str, dates: &Dates, scope: &str) -> String {
    format!(
        "{ALGORITHM}\n{}\n{scope}\n{}",
        dates.long,
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Derive the signing key of one day, region and service.
pub fn signing_key(secret: &str, dates: &Dates, region: Region, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), dates.short.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.code().as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes())
}

fn is_write(method: &Method) -> bool {
    method == Method::PUT || method == Method::POST
}

/// Insert HOST header if not present.
fn insert_host(req: &mut SigningRequest, region: Region) -> Result<()> {
    if req.headers.contains_key(header::HOST) {
        return Ok(());
    }

    let host = match &req.host {
        Some(host) => HeaderValue::from_str(host)?,
        None => HeaderValue::from_str(&region.host())?,
    };
    req.headers.insert(header::HOST, host);
    Ok(())
}

/// Headers of write requests that are added after signing.
///
/// Values supplied by the caller were signed and are kept as is.
fn append_content_headers(req: &mut SigningRequest, payload: &Payload) -> Result<()> {
    if !req.headers.contains_key(CONTENT_MD5) {
        if let Some(md5) = payload.content_md5() {
            req.headers
                .insert(CONTENT_MD5, HeaderValue::from_str(&md5)?);
        }
    }

    if !req.headers.contains_key(header::CONTENT_LENGTH) {
        if let Some(len) = payload.content_length() {
            req.headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
        }
    }

    if !req.headers.contains_key(header::CONTENT_TYPE) {
        if let Some(ct) = content_type_from_path(&req.path_percent_decoded()?) {
            req.headers
                .insert(header::CONTENT_TYPE, HeaderValue::from_str(ct.as_ref())?);
        }
    }

    Ok(())
}

/// Guess content type from the file extension of the path.
///
/// This is a lookup on the extension only, the content is never inspected.
fn content_type_from_path(path: &str) -> Option<mime::Mime> {
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }

    let mime = match ext.to_ascii_lowercase().as_str() {
        "txt" | "text" => mime::TEXT_PLAIN,
        "htm" | "html" => mime::TEXT_HTML,
        "css" => mime::TEXT_CSS,
        "csv" => mime::TEXT_CSV,
        "xml" => mime::TEXT_XML,
        "js" | "mjs" => mime::TEXT_JAVASCRIPT,
        "json" => mime::APPLICATION_JSON,
        "pdf" => mime::APPLICATION_PDF,
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "bmp" => mime::IMAGE_BMP,
        "svg" => mime::IMAGE_SVG,
        "woff" => mime::FONT_WOFF,
        "woff2" => mime::FONT_WOFF2,
        _ => mime::APPLICATION_OCTET_STREAM,
    };
    Some(mime)
}
