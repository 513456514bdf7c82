use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;

use crate::{Error, Result, TransportError};

pub use reqwest::{Method, StatusCode};
pub use url::Url;

/// An outbound HTTP request, ready to be sent by an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP verb.
    pub method: Method,
    /// The fully qualified URL, credentials included in its userinfo
    /// component.
    pub url: Url,
    /// Outbound headers, in insertion order.
    pub headers: Vec<(String, String)>,
    /// The JSON body, if any.
    pub body: Option<String>,
}

/// A raw HTTP response, handed back to the caller unmodified.
///
/// The client never interprets the status code; inspecting the response is
/// the caller's job.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// Creates a response. Mostly useful for [`HttpTransport`]
    /// implementations.
    pub fn new(status: StatusCode, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Response {
            status,
            headers,
            body,
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// All response headers, in the order the transport reported them.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The first header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The raw response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The response body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs a single HTTP exchange.
///
/// Implementations should fail with [`TransportError`] only when no response
/// could be obtained at all; an HTTP error status is still a [`Response`].
pub trait HttpTransport {
    /// Sends the request and returns the raw response.
    fn send(&self, request: &Request) -> std::result::Result<Response, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn send(&self, request: &Request) -> std::result::Result<Response, TransportError> {
        (**self).send(request)
    }
}

/// Constructs [`Request`]s from their parts.
///
/// A custom factory is the place to stamp extra headers on every outbound
/// request without touching the transport.
pub trait MessageFactory {
    /// Builds a request from verb, URL, headers and optional body.
    fn create_request(
        &self,
        method: Method,
        url: Url,
        headers: Vec<(String, String)>,
        body: Option<String>,
    ) -> Request;
}

impl<T: MessageFactory + ?Sized> MessageFactory for Arc<T> {
    fn create_request(
        &self,
        method: Method,
        url: Url,
        headers: Vec<(String, String)>,
        body: Option<String>,
    ) -> Request {
        (**self).create_request(method, url, headers, body)
    }
}

/// The message factory used when none is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessageFactory;

impl MessageFactory for DefaultMessageFactory {
    fn create_request(
        &self,
        method: Method,
        url: Url,
        headers: Vec<(String, String)>,
        body: Option<String>,
    ) -> Request {
        Request {
            method,
            url,
            headers,
            body,
        }
    }
}

/// The transport used when none is injected, backed by a blocking reqwest
/// client.
///
/// Bodied requests are sent with `Content-Type: application/json`, an
/// addition over the engine's minimal wire format, which requires no
/// content type.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Builds the default transport, failing with
    /// [`Error::TransportUnavailable`] when the underlying client cannot be
    /// constructed (for example, no usable TLS backend).
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(Error::TransportUnavailable)?;
        Ok(ReqwestTransport { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &Request) -> std::result::Result<Response, TransportError> {
        // reqwest ignores the userinfo component, so lift the embedded
        // credentials into basic auth and send the URL without them.
        let mut url = request.url.clone();
        let user = request.url.username().to_owned();
        let password = request.url.password().map(ToOwned::to_owned);
        let _ = url.set_username("");
        let _ = url.set_password(None);

        let mut builder = self.client.request(request.method.clone(), url);
        if !user.is_empty() || password.is_some() {
            builder = builder.basic_auth(user, password);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes()?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let response = Response::new(
            StatusCode::OK,
            vec![("Content-Type".to_owned(), "application/json".to_owned())],
            b"{}".to_vec(),
        );
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn text_replaces_invalid_utf8() {
        let response = Response::new(StatusCode::OK, vec![], vec![b'o', b'k', 0xff]);
        assert_eq!(response.text(), "ok\u{fffd}");
    }
}
