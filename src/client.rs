use reqwest::blocking::{Body, Request};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};
use crate::models::{Blueprint, BlueprintList};
use crate::transport::{AuthTransport, HttpTransport, Transport};

const BASE_URL: &str = "https://api.cloudcraft.co/";

// ---------------------------------------------------------------------------
// Response metadata
// ---------------------------------------------------------------------------

/// Status and headers of an API response, returned alongside the decoded
/// value (or inside [`Error::Api`]) so callers can inspect the exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// A Client manages communication with the Cloudcraft API.
///
/// ```no_run
/// use cloudcraft_client::Client;
///
/// let client = Client::new("my-api-key").unwrap();
/// let (blueprints, _) = client.blueprints().list().unwrap();
/// for bp in &blueprints {
///     println!("{:?}: {:?}", bp.id, bp.name);
/// }
/// ```
pub struct Client {
    transport: Box<dyn Transport>,
    base_url: Url,
    user_agent: String,
}

impl Client {
    /// Create a client authenticating with `api_key`.
    ///
    /// The default transport stack is [`HttpTransport`] wrapped in
    /// [`AuthTransport`], which stamps the bearer header onto every
    /// request.  An empty key is sent as-is; the server rejects it.
    pub fn new(api_key: &str) -> Result<Self> {
        let transport = AuthTransport::new(HttpTransport::new()?, api_key)?;
        Ok(Self::with_transport(Box::new(transport)))
    }

    /// Create a client from the `CLOUDCRAFT_API_KEY` environment variable.
    /// An unset variable behaves like an empty key.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("CLOUDCRAFT_API_KEY").unwrap_or_default();
        Self::new(&api_key)
    }

    /// Create a client over a caller-supplied transport stack.  The given
    /// transport is used as-is: supply your own [`AuthTransport`] layer if
    /// the requests need authentication.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        // The default endpoint is a known-good constant.
        let base_url = Url::parse(BASE_URL).expect("default base URL");
        Self {
            transport,
            base_url,
            user_agent: format!("cloudcraft-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Point the client at a different endpoint, e.g. a local mock server
    /// in tests.  End the URL with a trailing slash so relative paths
    /// append instead of replacing the last segment.
    pub fn set_base_url(&mut self, base_url: Url) {
        self.base_url = base_url;
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an API request.  `path` is resolved relative to the base URL
    /// and should not start with a slash, or resolution jumps back to the
    /// host root.  If `body` is given it is JSON-encoded and the request
    /// gets `Content-Type: application/json`; serde_json leaves `<`, `>`
    /// and `&` unescaped, matching the wire format.
    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.base_url.join(path)?;
        let mut req = Request::new(method, url);

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)?;
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            *req.body_mut() = Some(Body::from(bytes));
        }
        if !self.user_agent.is_empty() {
            req.headers_mut()
                .insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        }

        Ok(req)
    }

    /// Send an API request and decode the response body into `T`.
    ///
    /// The body is read in full before any decoding, on every path, so the
    /// underlying connection is always drained.  A status >= 400 becomes
    /// [`Error::Api`]; a malformed error envelope is swallowed and yields
    /// a zero-valued one, since the status alone already establishes the
    /// failure.  A malformed body on a success status is an error and the
    /// response metadata is discarded with it.
    pub fn execute<T: DeserializeOwned>(&self, req: Request) -> Result<(T, ApiResponse)> {
        let resp = self.transport.send(req)?;

        let response = ApiResponse {
            status: resp.status(),
            headers: resp.headers().clone(),
        };
        let body = resp.bytes()?;

        if response.status.as_u16() >= 400 {
            let error = serde_json::from_slice(&body).unwrap_or_default();
            return Err(Error::Api { error, response });
        }

        let value = serde_json::from_slice(&body)?;
        Ok((value, response))
    }

    // -- resource accessors --------------------------------------------------

    pub fn blueprints(&self) -> BlueprintsClient<'_> {
        BlueprintsClient { client: self }
    }
}

// ---------------------------------------------------------------------------
// Blueprints
// ---------------------------------------------------------------------------

/// Accessor for the blueprint endpoints of the Cloudcraft API.
///
/// Cloudcraft API docs: <https://developers.cloudcraft.co/>
pub struct BlueprintsClient<'a> {
    client: &'a Client,
}

impl BlueprintsClient<'_> {
    /// List the blueprints visible to the authenticated user, in the order
    /// the server returned them.
    pub fn list(&self) -> Result<(Vec<Blueprint>, ApiResponse)> {
        let req = self
            .client
            .new_request(Method::GET, "blueprint", None::<&()>)?;
        let (root, resp): (BlueprintList, _) = self.client.execute(req)?;
        Ok((root.blueprints, resp))
    }

    /// Get a single blueprint by ID.
    pub fn get(&self, id: &str) -> Result<(Blueprint, ApiResponse)> {
        let req = self
            .client
            .new_request(Method::GET, &format!("blueprint/{id}"), None::<&()>)?;
        self.client.execute(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UnreachableTransport;

    impl Transport for UnreachableTransport {
        fn send(&self, _req: Request) -> reqwest::Result<reqwest::blocking::Response> {
            unreachable!("request-building tests never hit the wire")
        }
    }

    fn offline_client() -> Client {
        Client::with_transport(Box::new(UnreachableTransport))
    }

    #[test]
    fn relative_path_appends_to_base() {
        let client = offline_client();
        let req = client
            .new_request(Method::GET, "blueprint", None::<&()>)
            .unwrap();
        assert_eq!(req.url().as_str(), "https://api.cloudcraft.co/blueprint");
    }

    #[test]
    fn relative_path_appends_below_base_path() {
        let mut client = offline_client();
        client.set_base_url("http://127.0.0.1:9999/api/".parse().unwrap());
        let req = client
            .new_request(Method::GET, "blueprint/42", None::<&()>)
            .unwrap();
        assert_eq!(req.url().as_str(), "http://127.0.0.1:9999/api/blueprint/42");
    }

    #[test]
    fn leading_slash_resolves_from_host_root() {
        let mut client = offline_client();
        client.set_base_url("http://127.0.0.1:9999/api/".parse().unwrap());
        let req = client
            .new_request(Method::GET, "/blueprint", None::<&()>)
            .unwrap();
        // Different semantics: the base path is dropped.
        assert_eq!(req.url().as_str(), "http://127.0.0.1:9999/blueprint");
    }

    #[test]
    fn unparseable_path_is_a_url_error() {
        let client = offline_client();
        let err = client
            .new_request(Method::GET, "http://[::invalid", None::<&()>)
            .unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn body_sets_content_type_and_stays_unescaped() {
        let client = offline_client();
        let body = serde_json::json!({ "name": "<a&b>" });
        let req = client
            .new_request(Method::POST, "blueprint", Some(&body))
            .unwrap();

        assert_eq!(
            req.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = req.body().unwrap().as_bytes().unwrap();
        let text = std::str::from_utf8(bytes).unwrap();
        assert!(text.contains("<a&b>"), "HTML escaping must be off: {text}");
    }

    #[test]
    fn no_body_means_no_content_type() {
        let client = offline_client();
        let req = client
            .new_request(Method::GET, "blueprint", None::<&()>)
            .unwrap();
        assert!(req.headers().get(CONTENT_TYPE).is_none());
        assert!(req.body().is_none());
    }

    #[test]
    fn user_agent_is_always_set() {
        let client = offline_client();
        let req = client
            .new_request(Method::GET, "blueprint", None::<&()>)
            .unwrap();
        assert_eq!(
            req.headers().get(USER_AGENT).unwrap().to_str().unwrap(),
            format!("cloudcraft-client/{}", env!("CARGO_PKG_VERSION"))
        );
    }
}
