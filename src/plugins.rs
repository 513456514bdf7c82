//! Per-call request middleware.
//!
//! Each call composes a fresh plugin list from the configuration: a header
//! forwarding plugin when client info forwarding is enabled, and a retry
//! plugin when the called method is eligible. The list is applied as a single
//! wrapper around the transport for that one call; no state survives between
//! calls.

use crate::{
    transport::{HttpTransport, Request, Response},
    CallerContext, ClientConfiguration, TransportError,
};

pub(crate) const X_FORWARDED_FOR: &str = "X-Forwarded-For";
pub(crate) const X_ORIGINAL_REFERER: &str = "X-Original-Referer";
pub(crate) const X_DEVICE_USER_AGENT: &str = "X-Device-User-Agent";
pub(crate) const X_DEVICE_ACCEPT_LANGUAGE: &str = "X-Device-Accept-Language";
pub(crate) const X_ORIGINAL_REQUEST_URI: &str = "X-Original-RequestUri";
pub(crate) const X_CLIENT_INTERFACE: &str = "X-Client-Interface";

/// Interface name reported when the embedding application supplied no
/// caller context at all.
const DEFAULT_INTERFACE: &str = "cli";

#[derive(Debug)]
pub(crate) enum Plugin {
    AppendHeaders(Vec<(String, String)>),
    Retry(u32),
}

/// Builds the plugin list for one call of `method_name`.
pub(crate) fn compose(
    config: &ClientConfiguration,
    method_name: &str,
    context: Option<&CallerContext>,
) -> Vec<Plugin> {
    let mut plugins = Vec::new();

    if config.forward_client_info {
        plugins.push(Plugin::AppendHeaders(forwarding_headers(context)));
    }
    if config.retry_methods.contains(method_name) {
        plugins.push(Plugin::Retry(config.retry.max(0) as u32));
    }

    plugins
}

fn forwarding_headers(context: Option<&CallerContext>) -> Vec<(String, String)> {
    let mut headers = Vec::new();

    let Some(context) = context else {
        // Not embedded in a web request; identify the runtime interface for
        // debugging purposes.
        return vec![(X_CLIENT_INTERFACE.to_owned(), DEFAULT_INTERFACE.to_owned())];
    };

    if let Some(remote_addr) = &context.remote_addr {
        headers.push((X_FORWARDED_FOR.to_owned(), remote_addr.clone()));
    }
    if let Some(referer) = &context.referer {
        headers.push((X_ORIGINAL_REFERER.to_owned(), referer.clone()));
    }
    if let Some(user_agent) = &context.user_agent {
        headers.push((X_DEVICE_USER_AGENT.to_owned(), user_agent.clone()));
    }
    if let Some(accept_language) = &context.accept_language {
        headers.push((X_DEVICE_ACCEPT_LANGUAGE.to_owned(), accept_language.clone()));
    }

    match &context.original_request_uri {
        Some(uri) => headers.push((X_ORIGINAL_REQUEST_URI.to_owned(), uri.clone())),
        None => {
            let interface = context
                .interface_name
                .as_deref()
                .unwrap_or(DEFAULT_INTERFACE);
            headers.push((X_CLIENT_INTERFACE.to_owned(), interface.to_owned()));
        }
    }

    headers
}

/// Applies the plugin list around one transport send.
///
/// Retry attempts run inline: on a transport-level failure the same request
/// is sent again, up to the configured number of extra attempts, and the
/// last failure is propagated unchanged.
pub(crate) fn execute(
    plugins: &[Plugin],
    transport: &dyn HttpTransport,
    mut request: Request,
) -> std::result::Result<Response, TransportError> {
    let mut retries = 0;
    for plugin in plugins {
        match plugin {
            Plugin::AppendHeaders(headers) => request.headers.extend(headers.iter().cloned()),
            Plugin::Retry(count) => retries = *count,
        }
    }

    let mut attempt = 0;
    loop {
        match transport.send(&request) {
            Ok(response) => return Ok(response),
            Err(error) if attempt < retries => {
                attempt += 1;
                log::debug!(target: "gravity",
                    attempt,
                    retries;
                    "retrying after transport failure: {error}",
                );
            }
            Err(error) => return Err(error),
        }
    }
}
