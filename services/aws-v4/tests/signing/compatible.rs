//! Compare our output with the official `aws-sigv4` signer.

use std::time::{Duration, SystemTime};

use super::s3_example_time;
use anyhow::Result;
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    PayloadChecksumKind, PercentEncodingMode, SignableBody, SignableRequest, SignatureLocation,
    SigningSettings,
};
use aws_sigv4::sign::v4;
use http::{header, HeaderValue, Method, Request};
use pretty_assertions::assert_eq;
use s3sign_aws_v4::{Credential, Expiration, Payload, Region, RequestSigner};

/// (name, request_builder)
type TestCase = (&'static str, fn() -> Request<&'static str>);

fn test_cases() -> Vec<TestCase> {
    vec![
        ("get_request", test_get_request),
        ("get_request_with_sse", test_get_request_with_sse),
        ("get_request_with_query", test_get_request_with_query),
        ("get_request_virtual_host", test_get_request_virtual_host),
        (
            "get_request_with_query_virtual_host",
            test_get_request_with_query_virtual_host,
        ),
        ("put_request", test_put_request),
        ("put_request_virtual_host", test_put_request_virtual_host),
    ]
}

fn test_get_request() -> Request<&'static str> {
    let mut req = Request::new("");
    *req.method_mut() = Method::GET;
    *req.uri_mut() = "http://127.0.0.1:9000/hello"
        .parse()
        .expect("url must be valid");

    req
}

fn test_get_request_with_sse() -> Request<&'static str> {
    let mut req = test_get_request();
    for (k, v) in [
        ("x-amz-server-side-encryption", "a"),
        ("x-amz-server-side-encryption-customer-algorithm", "b"),
        ("x-amz-server-side-encryption-customer-key", "c"),
        ("x-amz-server-side-encryption-customer-key-md5", "d"),
        ("x-amz-server-side-encryption-aws-kms-key-id", "e"),
    ] {
        req.headers_mut().insert(k, HeaderValue::from_static(v));
    }

    req
}

fn test_get_request_with_query() -> Request<&'static str> {
    let mut req = Request::new("");
    *req.method_mut() = Method::GET;
    *req.uri_mut() = "http://127.0.0.1:9000/hello?list-type=2&max-keys=3&prefix=CI/&start-after=ExampleGuide.pdf"
        .parse()
        .expect("url must be valid");

    req
}

fn test_get_request_virtual_host() -> Request<&'static str> {
    let mut req = Request::new("");
    *req.method_mut() = Method::GET;
    *req.uri_mut() = "http://hello.s3.test.example.com"
        .parse()
        .expect("url must be valid");

    req
}

fn test_get_request_with_query_virtual_host() -> Request<&'static str> {
    let mut req = Request::new("");
    *req.method_mut() = Method::GET;
    *req.uri_mut() = "http://hello.s3.test.example.com?list-type=2&max-keys=3&prefix=CI/&start-after=ExampleGuide.pdf"
        .parse()
        .expect("url must be valid");

    req
}

fn test_put_request() -> Request<&'static str> {
    let content = "Hello,World!";
    let mut req = Request::new(content);
    *req.method_mut() = Method::PUT;
    *req.uri_mut() = "http://127.0.0.1:9000/hello"
        .parse()
        .expect("url must be valid");
    req.headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(content.len()));

    req
}

fn test_put_request_virtual_host() -> Request<&'static str> {
    let content = "Hello,World!";
    let mut req = Request::new(content);
    *req.method_mut() = Method::PUT;
    *req.uri_mut() = "http://hello.s3.test.example.com"
        .parse()
        .expect("url must be valid");
    req.headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(content.len()));

    req
}

fn signer(token: Option<&str>) -> RequestSigner {
    let mut cred = Credential::new("access_key_id", "secret_access_key");
    if let Some(token) = token {
        cred = cred.with_session_token(token);
    }

    RequestSigner::new(cred, Region::UsEast1).with_time(s3_example_time())
}

/// Sign `req` in place with `aws-sigv4`.
fn aws_sign(
    req: &mut Request<&'static str>,
    ss: SigningSettings,
    body: SignableBody<'_>,
    token: Option<&str>,
) -> Result<()> {
    let id = Credentials::new(
        "access_key_id",
        "secret_access_key",
        token.map(|v| v.to_string()),
        None,
        "hardcoded-credentials",
    )
    .into();
    let sp = v4::SigningParams::builder()
        .identity(&id)
        .region("us-east-1")
        .name("s3")
        .time(SystemTime::from(s3_example_time()))
        .settings(ss)
        .build()
        .expect("signing params must be valid");

    let output = aws_sigv4::http_request::sign(
        SignableRequest::new(
            req.method().as_str(),
            req.uri().to_string(),
            req.headers()
                .iter()
                .map(|(k, v)| (k.as_str(), std::str::from_utf8(v.as_bytes()).unwrap())),
            body,
        )
        .unwrap(),
        &sp.into(),
    )?;
    let (aws_sig, _) = output.into_parts();
    aws_sig.apply_to_request_http1x(req);
    Ok(())
}

fn calculate(req_fn: fn() -> Request<&'static str>, token: Option<&str>) -> Result<()> {
    let mut expected = req_fn();
    let body: &'static str = *expected.body();
    let mut ss = SigningSettings::default();
    ss.percent_encoding_mode = PercentEncodingMode::Single;
    ss.payload_checksum_kind = PayloadChecksumKind::XAmzSha256;
    aws_sign(&mut expected, ss, SignableBody::Bytes(body.as_bytes()), token)?;

    let req = req_fn();
    let payload = Payload::from(req.body().as_bytes().to_vec());
    let (mut parts, _) = req.into_parts();
    signer(token).sign(&mut parts, &payload)?;

    for name in [
        header::AUTHORIZATION.as_str(),
        "x-amz-date",
        "x-amz-content-sha256",
        "x-amz-security-token",
    ] {
        assert_eq!(
            expected.headers().get(name),
            parts.headers.get(name),
            "{} {} header {name} mismatch",
            parts.method,
            parts.uri
        );
    }
    Ok(())
}

fn calculate_in_query(req_fn: fn() -> Request<&'static str>, token: Option<&str>) -> Result<()> {
    let mut expected = req_fn();
    let mut ss = SigningSettings::default();
    ss.percent_encoding_mode = PercentEncodingMode::Single;
    ss.signature_location = SignatureLocation::QueryParams;
    ss.expires_in = Some(Duration::from_secs(3600));
    aws_sign(&mut expected, ss, SignableBody::UnsignedPayload, token)?;

    let (mut parts, _) = req_fn().into_parts();
    signer(token).presign_request(&mut parts, Expiration::from_secs(3600)?)?;

    fn format_query(uri: &http::Uri) -> Vec<String> {
        let mut query = uri
            .query()
            .unwrap_or_default()
            .split('&')
            .map(|v| v.to_string())
            .collect::<Vec<_>>();
        query.sort();
        query
    }

    assert_eq!(
        format_query(expected.uri()),
        format_query(&parts.uri),
        "{} {} query mismatch",
        parts.method,
        expected.uri()
    );
    Ok(())
}

#[test]
fn test_compatible_with_aws_sigv4() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    for (name, req) in test_cases() {
        calculate(req, None).unwrap_or_else(|err| panic!("calculate {name} should pass: {err:?}"));
        calculate_in_query(req, None)
            .unwrap_or_else(|err| panic!("calculate_in_query {name} should pass: {err:?}"));
        calculate(req, Some("security_token")).unwrap_or_else(|err| {
            panic!("calculate with token {name} should pass: {err:?}")
        });
        calculate_in_query(req, Some("security_token")).unwrap_or_else(|err| {
            panic!("calculate_in_query with token {name} should pass: {err:?}")
        });
    }
    Ok(())
}
