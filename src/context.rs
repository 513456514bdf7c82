/// End-user request context forwarded to the engine when
/// [`forward_client_info`](crate::ClientConfiguration::forward_client_info)
/// is enabled.
///
/// The embedding application fills this in from its own incoming HTTP
/// request. Nothing is read from process-wide state: a context that is never
/// supplied simply means the client is running outside a web request (a CLI
/// tool, a batch job) and only the interface diagnostic header is sent.
///
/// # Examples
/// ```
/// # use gravity_client::CallerContext;
/// let context = CallerContext::new()
///     .remote_addr("203.0.113.7")
///     .user_agent("Mozilla/5.0")
///     .original_request_uri(CallerContext::request_uri_from_parts(
///         true, "shop.example.com", None, 443, "/products/42",
///     ));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallerContext {
    pub(crate) remote_addr: Option<String>,
    pub(crate) referer: Option<String>,
    pub(crate) user_agent: Option<String>,
    pub(crate) accept_language: Option<String>,
    pub(crate) original_request_uri: Option<String>,
    pub(crate) interface_name: Option<String>,
}

impl CallerContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// The end user's IP address, sent as `X-Forwarded-For`.
    pub fn remote_addr(mut self, remote_addr: impl Into<String>) -> Self {
        self.remote_addr = Some(remote_addr.into());
        self
    }

    /// The end user's referer, sent as `X-Original-Referer`.
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// The end user's user agent, sent as `X-Device-User-Agent`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The end user's accept-language, sent as `X-Device-Accept-Language`.
    pub fn accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.accept_language = Some(accept_language.into());
        self
    }

    /// The URI of the request this client call is embedded in, sent as
    /// `X-Original-RequestUri`. See
    /// [`request_uri_from_parts`](CallerContext::request_uri_from_parts).
    pub fn original_request_uri(mut self, uri: impl Into<String>) -> Self {
        self.original_request_uri = Some(uri.into());
        self
    }

    /// Names the runtime interface, sent as `X-Client-Interface` when no
    /// original request URI is available. Defaults to `cli`.
    pub fn interface_name(mut self, interface_name: impl Into<String>) -> Self {
        self.interface_name = Some(interface_name.into());
        self
    }

    /// Composes the original request URI from the parts an HTTP server
    /// framework exposes: scheme from `secure`, the forwarded host when the
    /// application sits behind a proxy, the port unless it is standard for
    /// the scheme, and the request path.
    pub fn request_uri_from_parts(
        secure: bool,
        host: &str,
        forwarded_host: Option<&str>,
        port: u16,
        path: &str,
    ) -> String {
        let scheme = if secure { "https" } else { "http" };
        let host = forwarded_host.unwrap_or(host);
        let standard_port = if secure { 443 } else { 80 };
        if port == standard_port {
            format!("{scheme}://{host}{path}")
        } else {
            format!("{scheme}://{host}:{port}{path}")
        }
    }
}
