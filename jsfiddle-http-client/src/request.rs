//! Request and result types for the fetch and publish operations

use crate::error::FiddleError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const FETCH_ARGUMENT_MESSAGE: &str = "First argument must be a string or an object.";
const PUBLISH_ARGUMENT_MESSAGE: &str = "First argument must be an object.";

/// Characters besides ASCII alphanumerics that pass through a URL path unescaped
const PATH_SAFE: &str = "-._~!$&'()*+,;=:@";

/// Fiddle identifier in the form `"<id>"` or `"<id>/<version>"`
///
/// The identifier is used verbatim as the URL path below the base endpoint, so
/// it may only hold characters a path carries unescaped and no `.`/`..` segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FiddleId(String);

impl FiddleId {
    /// Create an identifier, rejecting anything that would not reach the URL verbatim
    pub fn new(id: impl Into<String>) -> Result<Self, FiddleError> {
        let id = id.into();
        if id.is_empty() {
            return Err(FiddleError::InvalidArgument(
                "Fiddle identifier must not be empty.".to_string(),
            ));
        }
        if let Some(c) = id
            .chars()
            .find(|&c| !(c.is_ascii_alphanumeric() || c == '/' || PATH_SAFE.contains(c)))
        {
            return Err(FiddleError::InvalidArgument(format!(
                "Fiddle identifier contains {:?}, which cannot be used in a URL path as is.",
                c
            )));
        }
        if id.split('/').any(|segment| segment == "." || segment == "..") {
            return Err(FiddleError::InvalidArgument(
                "Fiddle identifier must not contain '.' or '..' segments.".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// The identifier as given
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments of the identifier, in order
    pub(crate) fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl std::fmt::Display for FiddleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What to fetch: an identifier, or a structured descriptor
///
/// Descriptors are accepted at the type level but every fetch with one fails
/// with [`FiddleError::NotImplemented`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    /// Plain identifier, `"<id>"` or `"<id>/<version>"`
    Id(FiddleId),
    /// Structured descriptor (unsupported)
    Descriptor(Map<String, Value>),
}

impl FetchRequest {
    /// Build an identifier request from a string
    pub fn id(id: impl Into<String>) -> Result<Self, FiddleError> {
        FiddleId::new(id).map(FetchRequest::Id)
    }
}

impl From<FiddleId> for FetchRequest {
    fn from(id: FiddleId) -> Self {
        FetchRequest::Id(id)
    }
}

impl TryFrom<Value> for FetchRequest {
    type Error = FiddleError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(id) => FetchRequest::id(id),
            Value::Object(map) => Ok(FetchRequest::Descriptor(map)),
            _ => Err(FiddleError::InvalidArgument(
                FETCH_ARGUMENT_MESSAGE.to_string(),
            )),
        }
    }
}

/// The panes and resources of a fetched fiddle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fiddle {
    /// Markup pane
    pub html: String,
    /// Script pane
    pub js: String,
    /// Style pane
    pub css: String,
    /// Linked resource URLs, in document order
    pub resources: Vec<String>,
}

/// Payload for publishing a new fiddle
///
/// Every field is optional; missing fields are sent as empty form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishRequest {
    /// Fiddle title
    pub title: Option<String>,
    /// Markup pane
    pub html: Option<String>,
    /// Script pane
    pub js: Option<String>,
    /// Style pane
    pub css: Option<String>,
}

impl PublishRequest {
    /// The four form fields, in wire order
    pub(crate) fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("title", self.title.as_deref().unwrap_or_default()),
            ("html", self.html.as_deref().unwrap_or_default()),
            ("js", self.js.as_deref().unwrap_or_default()),
            ("css", self.css.as_deref().unwrap_or_default()),
        ]
    }
}

/// Read one payload field: strings as is, null as absent, anything else as JSON text
fn field_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl TryFrom<Value> for PublishRequest {
    type Error = FiddleError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = value else {
            return Err(FiddleError::InvalidArgument(
                PUBLISH_ARGUMENT_MESSAGE.to_string(),
            ));
        };

        Ok(PublishRequest {
            title: field_text(&map, "title"),
            html: field_text(&map, "html"),
            js: field_text(&map, "js"),
            css: field_text(&map, "css"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_string_becomes_id() {
        let request = FetchRequest::try_from(json!("abc123/4")).unwrap();
        assert_eq!(request, FetchRequest::Id(FiddleId::new("abc123/4").unwrap()));
    }

    #[test]
    fn test_object_becomes_descriptor() {
        let request = FetchRequest::try_from(json!({ "id": "abc123" })).unwrap();
        assert!(matches!(request, FetchRequest::Descriptor(map) if map.contains_key("id")));
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let result = FetchRequest::try_from(json!(""));
        assert!(matches!(result, Err(FiddleError::InvalidArgument(_))));
    }

    #[test]
    fn test_identifier_with_url_syntax_rejected() {
        for id in ["abc/3?x=1", "abc#frag", "a%20b", "a b", "caf\u{e9}", "a\\b"] {
            let result = FiddleId::new(id);
            assert!(
                matches!(result, Err(FiddleError::InvalidArgument(_))),
                "{:?} should be rejected",
                id
            );
        }
    }

    #[test]
    fn test_dot_segments_rejected() {
        for id in ["../x", "abc/..", "./abc", "abc/./2"] {
            assert!(matches!(FiddleId::new(id), Err(FiddleError::InvalidArgument(_))), "{}", id);
        }
        // dots inside a segment are fine
        assert!(FiddleId::new("abc.def/1").is_ok());
        assert!(FiddleId::new("...").is_ok());
    }

    #[test]
    fn test_identifier_segments() {
        let id = FiddleId::new("user/abc123/2").unwrap();
        assert_eq!(id.segments().collect::<Vec<_>>(), vec!["user", "abc123", "2"]);
        assert_eq!(id.to_string(), "user/abc123/2");
    }

    #[test]
    fn test_publish_request_from_object() {
        let request = PublishRequest::try_from(json!({
            "title": "t",
            "html": "<b>",
            "js": null,
            "css": 12,
        }))
        .unwrap();

        assert_eq!(request.title.as_deref(), Some("t"));
        assert_eq!(request.html.as_deref(), Some("<b>"));
        assert_eq!(request.js, None);
        assert_eq!(request.css.as_deref(), Some("12"));
    }

    #[test]
    fn test_form_fields_fill_missing_with_empty() {
        let request = PublishRequest {
            title: Some("t".to_string()),
            ..Default::default()
        };
        assert_eq!(
            request.form_fields(),
            [("title", "t"), ("html", ""), ("js", ""), ("css", "")]
        );
    }

    #[test]
    fn test_publish_request_deserializes_partial_json() {
        let request: PublishRequest = serde_json::from_str(r#"{"js":"alert(1)"}"#).unwrap();
        assert_eq!(request.js.as_deref(), Some("alert(1)"));
        assert_eq!(request.title, None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn prop_non_string_non_object_is_rejected(
            value in prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::from),
                any::<i64>().prop_map(Value::from),
                any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(Value::from),
                prop::collection::vec(any::<i32>(), 0..4).prop_map(Value::from),
            ],
        ) {
            let fetch = FetchRequest::try_from(value.clone());
            let is_invalid_argument = matches!(fetch, Err(FiddleError::InvalidArgument(_)));
            prop_assert!(is_invalid_argument);

            let publish = PublishRequest::try_from(value);
            let is_invalid_argument = matches!(publish, Err(FiddleError::InvalidArgument(_)));
            prop_assert!(is_invalid_argument);
        }
    }
}
