use std::collections::{BTreeMap, HashSet};

use crate::{Error, Result};

/// Connection and behavior settings for
/// [`GravityClient`](crate::GravityClient).
///
/// The configuration is immutable once a client takes ownership of it; the
/// builder-style setters consume and return the value.
///
/// # Examples
/// ```
/// # use gravity_client::ClientConfiguration;
/// let config = ClientConfiguration::new("user", "password", "https://example.com/grrec")
///     .retry(3)
///     .forward_client_info(false);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfiguration {
    pub(crate) user: String,
    pub(crate) password: String,
    pub(crate) remote_url: String,
    pub(crate) retry_methods: HashSet<String>,
    pub(crate) retry: i32,
    pub(crate) forward_client_info: bool,
}

/// Remote methods retried after a communication error unless overridden with
/// [`ClientConfiguration::retry_methods`].
const DEFAULT_RETRY_METHODS: [&str; 4] =
    ["addUsers", "addItems", "addEvents", "getItemRecommendation"];

impl ClientConfiguration {
    /// Creates a configuration with the given credentials and server URL.
    ///
    /// Retrying starts disabled (`retry` 0) and client info forwarding
    /// starts enabled.
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        remote_url: impl Into<String>,
    ) -> Self {
        ClientConfiguration {
            user: user.into(),
            password: password.into(),
            remote_url: remote_url.into(),
            retry_methods: DEFAULT_RETRY_METHODS
                .iter()
                .map(|method| (*method).to_owned())
                .collect(),
            retry: 0,
            forward_client_info: true,
        }
    }

    /// Replaces the set of remote method names eligible for retry.
    ///
    /// The caller is responsible for listing only methods that are safe to
    /// send again after a communication error.
    pub fn retry_methods(
        mut self,
        methods: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.retry_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the number of extra attempts after a transport failure, for the
    /// methods listed in [`retry_methods`](ClientConfiguration::retry_methods).
    /// 0 disables retrying.
    pub fn retry(mut self, retry: i32) -> Self {
        self.retry = retry;
        self
    }

    /// Enables or disables forwarding the end user's IP, referer, user agent
    /// and accept-language to the engine.
    pub fn forward_client_info(mut self, forward_client_info: bool) -> Self {
        self.forward_client_info = forward_client_info;
        self
    }

    /// Returns the validation errors, keyed by field name.
    ///
    /// Note that the retry count is only checked when at least one method is
    /// configured for retry, matching the remote protocol's reference
    /// client. A negative count with an empty method set passes validation.
    pub fn validate(&self) -> BTreeMap<&'static str, String> {
        let mut errors = BTreeMap::new();

        if self.user.is_empty() {
            errors.insert("user", "User must be provided!".to_owned());
        }
        if self.password.is_empty() {
            errors.insert("password", "Password cannot be empty!".to_owned());
        }
        if !self.retry_methods.is_empty() && self.retry < 0 {
            errors.insert("retry", "Retry must be a positive integer!".to_owned());
        }
        if self.remote_url.is_empty() {
            errors.insert("remoteUrl", "Remote URL must be specified.".to_owned());
        }

        errors
    }

    /// True if [`validate`](ClientConfiguration::validate) reports no errors.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Fails with [`Error::InvalidConfiguration`] listing every violated
    /// field when the configuration is invalid.
    pub fn validate_or_fail(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }

        let message = errors
            .iter()
            .map(|(field, message)| format!("[{field}]: {message}"))
            .collect::<Vec<_>>()
            .join(" ");
        Err(Error::InvalidConfiguration(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ClientConfiguration {
        ClientConfiguration::new("user", "secret", "https://example.com/grrec")
    }

    #[test]
    fn default_configuration_is_valid() {
        let config = valid();
        assert!(config.validate().is_empty());
        assert!(config.is_valid());
        assert!(config.validate_or_fail().is_ok());
    }

    #[test]
    fn empty_fields_are_flagged() {
        let config = ClientConfiguration::new("", "", "");
        let errors = config.validate();
        assert_eq!(
            errors.keys().collect::<Vec<_>>(),
            [&"password", &"remoteUrl", &"user"]
        );
        assert!(!config.is_valid());
    }

    #[test]
    fn negative_retry_is_flagged_when_methods_are_configured() {
        let errors = valid().retry(-2).validate();
        assert_eq!(errors.keys().collect::<Vec<_>>(), [&"retry"]);
    }

    #[test]
    fn negative_retry_passes_without_retry_methods() {
        // Matches the reference client: the retry count is not checked when
        // no method is configured for retry.
        let config = valid().retry_methods(Vec::<String>::new()).retry(-2);
        assert!(config.is_valid());
    }

    #[test]
    fn validate_or_fail_reports_every_field() {
        let config = ClientConfiguration::new("", "", "https://example.com");
        let error = config.validate_or_fail().unwrap_err();
        let message = error.to_string();
        assert!(message.contains("[user]"), "{message}");
        assert!(message.contains("[password]"), "{message}");
        assert!(!message.contains("[remoteUrl]"), "{message}");
    }
}
