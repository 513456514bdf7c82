use url::Url;

use crate::{
    entities::{Event, Item, RecommendationContext, User},
    plugins, request,
    transport::{
        DefaultMessageFactory, HttpTransport, MessageFactory, Method, ReqwestTransport, Response,
    },
    CallerContext, ClientConfiguration, Error, Result,
};

/// The recommendation engine client.
///
/// Each public method maps to one remote method of the engine and returns
/// the raw HTTP [`Response`] for the caller to inspect; the client never
/// interprets status codes or parses response bodies.
///
/// # Examples
/// ```no_run
/// # use gravity_client::{ClientConfiguration, Event, GravityClient};
/// # fn main() -> gravity_client::Result<()> {
/// let client = GravityClient::new(ClientConfiguration::new(
///     "user",
///     "password",
///     "https://example.com/grrec",
/// ))?;
///
/// let mut event = Event::new(gravity_client::event_type::VIEW);
/// event.item_id = Some("item-1".to_owned());
/// event.cookie_id = Some("cookie-1".to_owned());
/// client.add_event(&event, true)?;
/// # Ok(())
/// # }
/// ```
pub struct GravityClient {
    config: ClientConfiguration,
    transport: Box<dyn HttpTransport>,
    message_factory: Box<dyn MessageFactory>,
    caller_context: Option<CallerContext>,
}

impl GravityClient {
    /// Creates a client with the default reqwest-backed transport.
    ///
    /// Fails before any I/O with [`Error::InvalidConfiguration`] when the
    /// configuration is invalid, or [`Error::TransportUnavailable`] when the
    /// default transport cannot be built.
    pub fn new(config: ClientConfiguration) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Self::with_collaborators(config, transport, DefaultMessageFactory)
    }

    /// Creates a client with injected transport and message factory
    /// collaborators.
    pub fn with_collaborators(
        config: ClientConfiguration,
        transport: impl HttpTransport + 'static,
        message_factory: impl MessageFactory + 'static,
    ) -> Result<Self> {
        config.validate_or_fail()?;
        Ok(GravityClient {
            config,
            transport: Box::new(transport),
            message_factory: Box::new(message_factory),
            caller_context: None,
        })
    }

    /// Attaches the end-user context used by client info forwarding.
    ///
    /// Without a context, a client with forwarding enabled only sends the
    /// runtime interface diagnostic header.
    pub fn caller_context(mut self, context: CallerContext) -> Self {
        self.caller_context = Some(context);
        self
    }

    /// Adds an event to the engine.
    ///
    /// An asynchronous call returns right after input checking; a
    /// synchronous call returns only once the data is saved.
    pub fn add_event(&self, event: &Event, async_call: bool) -> Result<Response> {
        self.add_events(std::slice::from_ref(event), async_call)
    }

    /// Adds multiple events to the engine.
    pub fn add_events(&self, events: &[Event], async_call: bool) -> Result<Response> {
        self.send_request(
            "addEvents",
            Method::POST,
            &[("async", flag(async_call))],
            Some(serde_json::to_string(events)?),
        )
    }

    /// Adds an item to the engine. An existing item with the same `itemId`
    /// is replaced entirely, name/values included.
    pub fn add_item(&self, item: &Item, async_call: bool) -> Result<Response> {
        self.add_items(std::slice::from_ref(item), async_call)
    }

    /// Adds multiple items to the engine.
    pub fn add_items(&self, items: &[Item], async_call: bool) -> Result<Response> {
        self.send_request(
            "addItems",
            Method::POST,
            &[("async", flag(async_call))],
            Some(serde_json::to_string(items)?),
        )
    }

    /// Updates an existing item. Name/value pairs are merged, except that
    /// providing a name replaces all of its values; the `hidden` field must
    /// always be specified.
    pub fn update_item(&self, item: &Item) -> Result<Response> {
        self.update_items(std::slice::from_ref(item))
    }

    /// Updates multiple existing items.
    pub fn update_items(&self, items: &[Item]) -> Result<Response> {
        self.send_request(
            "updateItems",
            Method::POST,
            &[],
            Some(serde_json::to_string(items)?),
        )
    }

    /// Adds a user to the engine. An existing user with the same `userId` is
    /// replaced entirely.
    pub fn add_user(&self, user: &User, async_call: bool) -> Result<Response> {
        self.add_users(std::slice::from_ref(user), async_call)
    }

    /// Adds multiple users to the engine.
    pub fn add_users(&self, users: &[User], async_call: bool) -> Result<Response> {
        self.send_request(
            "addUsers",
            Method::POST,
            &[("async", flag(async_call))],
            Some(serde_json::to_string(users)?),
        )
    }

    /// Retrieves user metadata by user identifier.
    pub fn get_user_by_user_id(&self, user_id: &str) -> Result<Response> {
        self.send_request("getUser", Method::GET, &[("userId", user_id.to_owned())], None)
    }

    /// Retrieves user metadata, when a user can be recognized from the
    /// given cookie identifier.
    pub fn get_user_by_cookie_id(&self, cookie_id: &str) -> Result<Response> {
        self.send_request(
            "getUser",
            Method::GET,
            &[("cookieId", cookie_id.to_owned())],
            None,
        )
    }

    /// Retrieves the full event history associated with a user identifier.
    pub fn get_events_by_user_id(&self, user_id: &str) -> Result<Response> {
        self.send_request(
            "getEvents",
            Method::GET,
            &[("userId", user_id.to_owned())],
            None,
        )
    }

    /// Retrieves the full event history associated with a cookie identifier.
    pub fn get_events_by_cookie_id(&self, cookie_id: &str) -> Result<Response> {
        self.send_request(
            "getEvents",
            Method::GET,
            &[("cookieId", cookie_id.to_owned())],
            None,
        )
    }

    /// Deletes the full event history assigned to the given cookie
    /// identifier.
    pub fn opt_out_cookie(&self, cookie_id: &str) -> Result<Response> {
        self.send_request(
            "optOut",
            Method::GET,
            &[("cookieId", cookie_id.to_owned())],
            None,
        )
    }

    /// Deletes the full event history and metadata assigned to the given
    /// user identifier.
    pub fn opt_out_user_id(&self, user_id: &str) -> Result<Response> {
        self.send_request("optOut", Method::GET, &[("userId", user_id.to_owned())], None)
    }

    /// Requests recommended items for the given scenario context.
    ///
    /// `user_id` identifies the logged-in user, empty when nobody is logged
    /// in; `cookie_id` should be a permanent identifier for the end user's
    /// computer and should always be specified. `None` context leaves the
    /// scenario entirely to the server.
    pub fn get_item_recommendation(
        &self,
        user_id: &str,
        cookie_id: &str,
        context: Option<&RecommendationContext>,
    ) -> Result<Response> {
        self.send_request(
            "getItemRecommendation",
            Method::POST,
            &[
                ("userId", user_id.to_owned()),
                ("cookieId", cookie_id.to_owned()),
            ],
            context.map(serde_json::to_string).transpose()?,
        )
    }

    /// Requests recommendations for multiple scenarios in one call.
    ///
    /// Every context's `userId` and `cookieId` are overwritten with this
    /// call's arguments before the request is sent, whatever they held.
    pub fn get_item_recommendation_bulk(
        &self,
        user_id: &str,
        cookie_id: &str,
        mut contexts: Vec<RecommendationContext>,
    ) -> Result<Response> {
        for context in &mut contexts {
            context.user_id = Some(user_id.to_owned());
            context.cookie_id = Some(cookie_id.to_owned());
        }
        self.send_request(
            "getItemRecommendationBulk",
            Method::POST,
            &[
                ("userId", user_id.to_owned()),
                ("cookieId", cookie_id.to_owned()),
            ],
            Some(serde_json::to_string(&contexts)?),
        )
    }

    /// Side-effect-free liveness check; the engine answers `Hello <name>`.
    pub fn test(&self, name: &str) -> Result<Response> {
        self.send_request("test", Method::GET, &[("name", name.to_owned())], None)
    }

    fn send_request(
        &self,
        method_name: &str,
        http_method: Method,
        query_params: &[(&str, String)],
        body: Option<String>,
    ) -> Result<Response> {
        let raw_url = request::build_url(&self.config.remote_url, method_name, query_params);
        log::debug!(target: "gravity",
            method_name,
            url = raw_url.as_str();
            "dispatching request",
        );

        let mut url = Url::parse(&raw_url).map_err(Error::InvalidRemoteUrl)?;
        let credentials_accepted = url.set_username(&self.config.user).is_ok()
            && url.set_password(Some(&self.config.password)).is_ok();
        if !credentials_accepted {
            return Err(Error::CredentialsNotSupported);
        }

        let plugins = plugins::compose(&self.config, method_name, self.caller_context.as_ref());
        let request = self
            .message_factory
            .create_request(http_method, url, Vec::new(), body);

        let response = plugins::execute(&plugins, self.transport.as_ref(), request)?;
        Ok(response)
    }
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_owned()
}
