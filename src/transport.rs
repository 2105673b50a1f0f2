use std::fmt::Write as _;

use reqwest::blocking::{Client as HttpClient, Request, Response};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use tracing::debug;

// ---------------------------------------------------------------------------
// Transport capability
// ---------------------------------------------------------------------------

/// Capability to carry a built request over the wire.
///
/// The client talks to the network only through this trait, so middleware
/// can be layered by wrapping one implementation in another (see
/// [`AuthTransport`]) and tests can substitute their own stack.
pub trait Transport: Send + Sync {
    /// Send the request and return the raw response.
    ///
    /// Implementations must not interpret the response: any status code is
    /// a successful send, and `Err` is reserved for failure to obtain a
    /// response at all.
    fn send(&self, req: Request) -> reqwest::Result<Response>;
}

// ---------------------------------------------------------------------------
// Concrete transport over reqwest
// ---------------------------------------------------------------------------

/// Plain transport backed by a blocking `reqwest` client.
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new() -> reqwest::Result<Self> {
        Ok(Self {
            http: HttpClient::builder().build()?,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, req: Request) -> reqwest::Result<Response> {
        self.http.execute(req)
    }
}

// ---------------------------------------------------------------------------
// Authenticating decorator
// ---------------------------------------------------------------------------

/// Decorator that stamps `Authorization: Bearer <key>` onto every outgoing
/// request before delegating to the wrapped transport.
///
/// Also dumps the outgoing request and the incoming response head at
/// `debug` level.  Transport failures from the inner transport propagate
/// unchanged; nothing is retried or classified here.
pub struct AuthTransport<T> {
    inner: T,
    bearer: HeaderValue,
}

impl<T: Transport> AuthTransport<T> {
    /// Wrap `inner`, authenticating with `api_key`.  An empty key is
    /// allowed and produces an empty bearer value; the server rejects it,
    /// not the client.
    pub fn new(inner: T, api_key: &str) -> Result<Self, reqwest::header::InvalidHeaderValue> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))?;
        bearer.set_sensitive(true);
        Ok(Self { inner, bearer })
    }
}

impl<T: Transport> Transport for AuthTransport<T> {
    fn send(&self, mut req: Request) -> reqwest::Result<Response> {
        req.headers_mut()
            .insert(AUTHORIZATION, self.bearer.clone());

        debug!("request\n\n{}\n", dump_request(&req));

        let resp = self.inner.send(req)?;

        debug!("response\n\n{}\n", dump_response(&resp));

        Ok(resp)
    }
}

/// Render the request line, headers and body (when held in memory) for the
/// diagnostic dump.
fn dump_request(req: &Request) -> String {
    let mut out = format!("{} {}\n", req.method(), req.url());
    for (name, value) in req.headers() {
        let shown = if value.is_sensitive() {
            "<redacted>"
        } else {
            value.to_str().unwrap_or("<binary>")
        };
        let _ = writeln!(out, "{name}: {shown}");
    }
    if let Some(bytes) = req.body().and_then(|b| b.as_bytes()) {
        let _ = write!(out, "\n{}", String::from_utf8_lossy(bytes));
    }
    out
}

/// Render the response head.  The body stays on the wire; consuming it
/// belongs to the dispatcher.
fn dump_response(resp: &Response) -> String {
    let mut out = format!("{:?} {}\n", resp.version(), resp.status());
    for (name, value) in resp.headers() {
        let _ = writeln!(out, "{name}: {}", value.to_str().unwrap_or("<binary>"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[test]
    fn empty_key_yields_empty_bearer() {
        let transport = AuthTransport::new(NoopTransport, "").unwrap();
        assert_eq!(transport.bearer.to_str().unwrap(), "Bearer ");
    }

    #[test]
    fn rejects_non_ascii_key() {
        assert!(AuthTransport::new(NoopTransport, "line\nbreak").is_err());
    }

    #[test]
    fn request_dump_redacts_auth_header() {
        let mut req = Request::new(
            Method::GET,
            "https://api.cloudcraft.co/blueprint".parse().unwrap(),
        );
        let mut bearer = HeaderValue::from_static("Bearer topsecret");
        bearer.set_sensitive(true);
        req.headers_mut().insert(AUTHORIZATION, bearer);

        let dump = dump_request(&req);
        assert!(dump.starts_with("GET https://api.cloudcraft.co/blueprint"));
        assert!(dump.contains("authorization: <redacted>"));
        assert!(!dump.contains("topsecret"));
    }

    struct NoopTransport;

    impl Transport for NoopTransport {
        fn send(&self, _req: Request) -> reqwest::Result<Response> {
            unreachable!("never sent in these tests")
        }
    }
}
