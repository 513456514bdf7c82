use url::form_urlencoded;

/// The client version string, reported to the engine in every request's
/// `_v` query parameter.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds the fully qualified URL for a remote method call.
///
/// The query string always starts with `method=<method_name>`, followed by
/// the caller-supplied parameters in their given order, with `_v=<VERSION>`
/// last. Keys and values are urlencoded with
/// `application/x-www-form-urlencoded` semantics (space becomes `+`),
/// matching what the engine expects on the wire.
pub(crate) fn build_url(
    base_url: &str,
    method_name: &str,
    query_params: &[(&str, String)],
) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("method", method_name);
    for (name, value) in query_params {
        serializer.append_pair(name, value);
    }
    serializer.append_pair("_v", VERSION);

    format!("{}/{}?{}", base_url, method_name, serializer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_follow_the_method_parameter() {
        assert_eq!(
            build_url("https://h/x", "getUser", &[("cookieId", "c".to_owned())]),
            format!("https://h/x/getUser?method=getUser&cookieId=c&_v={VERSION}")
        );
    }

    #[test]
    fn version_comes_last_without_params() {
        assert_eq!(
            build_url("https://h/x", "test", &[]),
            format!("https://h/x/test?method=test&_v={VERSION}")
        );
    }

    #[test]
    fn caller_order_is_preserved() {
        let url = build_url(
            "https://h/x",
            "getItemRecommendation",
            &[("userId", "u".to_owned()), ("cookieId", "c".to_owned())],
        );
        assert_eq!(
            url,
            format!(
                "https://h/x/getItemRecommendation\
                 ?method=getItemRecommendation&userId=u&cookieId=c&_v={VERSION}"
            )
        );
    }

    #[test]
    fn values_are_urlencoded() {
        let url = build_url(
            "https://h/x",
            "test",
            &[("name", "a b&c=d".to_owned())],
        );
        assert_eq!(
            url,
            format!("https://h/x/test?method=test&name=a+b%26c%3Dd&_v={VERSION}")
        );
    }
}
