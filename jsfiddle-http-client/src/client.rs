//! JSFiddle HTTP client implementation

use crate::entities::decode_html_entities;
use crate::error::FiddleError;
use crate::parser::EmbedParser;
use crate::request::{FetchRequest, Fiddle, PublishRequest};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://jsfiddle.net/";
const DEFAULT_PUBLISH_PATH: &str = "api/post";
const DEFAULT_FRAMEWORK_NAME: &str = "Vue";
const DEFAULT_FRAMEWORK_VERSION: &str = "2.2.1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const EMBED_SEGMENT: &str = "embedded";

/// Completion callback for [`FiddleClient::get_fiddle`] and [`FiddleClient::save_fiddle`]
///
/// Called exactly once with either the result or the error of the call.
pub type Callback<T> = Box<dyn FnOnce(Result<T, FiddleError>)>;

/// Client/version pair that ends the publish endpoint path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framework {
    /// Client segment, e.g. `Vue`
    pub name: String,
    /// Version segment, e.g. `2.2.1`
    pub version: String,
}

impl Default for Framework {
    fn default() -> Self {
        Self {
            name: DEFAULT_FRAMEWORK_NAME.to_string(),
            version: DEFAULT_FRAMEWORK_VERSION.to_string(),
        }
    }
}

/// The main JSFiddle HTTP client
///
/// Fetches existing fiddles by scraping their embed page and publishes new
/// ones through the form-encoded post endpoint. Every call issues exactly one
/// request and never retries.
///
/// # Example
///
/// ```no_run
/// use jsfiddle_http_client::{FetchRequest, FiddleClient, PublishRequest};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FiddleClient::new()?;
///
/// let fiddle = client.fetch(&FetchRequest::id("zfkgt0vr/3")?)?;
/// println!("{}", fiddle.js);
///
/// let body = client.publish(&PublishRequest {
///     title: Some("Hello".to_string()),
///     html: Some("<b>hi</b>".to_string()),
///     ..Default::default()
/// })?;
/// println!("{}", body);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct FiddleClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    publish_path: String,
    framework: Framework,
    parser: EmbedParser,
}

impl FiddleClient {
    /// Create a client for jsfiddle.net with default settings
    ///
    /// # Errors
    ///
    /// Returns `FiddleError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, FiddleError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use jsfiddle_http_client::FiddleClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = FiddleClient::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .framework("React", "18.2.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> FiddleClientBuilder {
        FiddleClientBuilder::new()
    }

    /// Base URL every request is resolved against
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Append path segments below the base URL
    fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<reqwest::Url, FiddleError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FiddleError::ClientInit("Cannot modify base URL path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of the embed page for an identifier
    fn embed_url(&self, request: &FetchRequest) -> Result<reqwest::Url, FiddleError> {
        match request {
            FetchRequest::Id(id) => self.endpoint(id.segments().chain([EMBED_SEGMENT])),
            FetchRequest::Descriptor(_) => Err(FiddleError::NotImplemented),
        }
    }

    /// URL of the publish endpoint
    fn publish_url(&self) -> Result<reqwest::Url, FiddleError> {
        let segments = self
            .publish_path
            .split('/')
            .filter(|s| !s.is_empty())
            .chain([self.framework.name.as_str(), self.framework.version.as_str()]);
        self.endpoint(segments)
    }

    /// Fetch the panes and resources of an existing fiddle
    ///
    /// Issues one GET against `<base>/<identifier>/embedded` and reads the
    /// first three `<pre>` blocks as the JS, HTML and CSS panes.
    ///
    /// # Errors
    ///
    /// * `FiddleError::NotImplemented` - the request is a descriptor (no request is made)
    /// * `FiddleError::Request` - transport error, unchanged
    /// * `FiddleError::Status` - the page answered with a status other than 200
    pub fn fetch(&self, request: &FetchRequest) -> Result<Fiddle, FiddleError> {
        let url = self.embed_url(request)?;
        debug!(url = %url, "fetching embed page");

        let response = self.client.get(url).send()?;
        let status = response.status();
        debug!(status = status.as_u16(), "embed page responded");

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "embed page request failed");
            return Err(FiddleError::Status {
                status_code: status.as_u16(),
                message: format!(
                    "The page responded with a status code other than 200: {}",
                    status.as_u16()
                ),
            });
        }

        let html = response.text()?;
        Ok(self.parser.parse_embed_page(&html))
    }

    /// Publish a new fiddle
    ///
    /// Issues one form-encoded POST carrying `title`, `html`, `js` and `css`
    /// and returns the response body with HTML entities decoded. Repeated
    /// calls may create distinct fiddles.
    ///
    /// # Errors
    ///
    /// * `FiddleError::Request` - transport error, unchanged
    /// * `FiddleError::Status` - the endpoint answered with a status other than 200
    pub fn publish(&self, request: &PublishRequest) -> Result<String, FiddleError> {
        let url = self.publish_url()?;
        debug!(url = %url, "publishing fiddle");

        let response = self.client.post(url).form(&request.form_fields()).send()?;
        let status = response.status();
        debug!(status = status.as_u16(), "publish endpoint responded");

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "publish request failed");
            return Err(FiddleError::Status {
                status_code: status.as_u16(),
                message: format!(
                    "{} responded with a status code other than 200: {}",
                    self.base_url.host_str().unwrap_or("server"),
                    status.as_u16()
                ),
            });
        }

        let body = response.text()?;
        Ok(decode_html_entities(&body).into_owned())
    }

    /// Callback-style fetch over a dynamic argument
    ///
    /// `options` must be a JSON string (identifier) or object (descriptor);
    /// anything else is reported through the callback as
    /// `FiddleError::InvalidArgument` without touching the network. A missing
    /// callback is replaced by a no-op.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use jsfiddle_http_client::{Fiddle, FiddleClient, FiddleError};
    /// use serde_json::json;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = FiddleClient::new()?;
    /// client.get_fiddle(
    ///     json!("zfkgt0vr/3"),
    ///     Some(Box::new(|result: Result<Fiddle, FiddleError>| match result {
    ///         Ok(fiddle) => println!("{}", fiddle.html),
    ///         Err(e) => eprintln!("{}", e),
    ///     })),
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_fiddle(&self, options: Value, callback: Option<Callback<Fiddle>>) {
        let callback = callback.unwrap_or_else(|| Box::new(|_| {}));
        let result = FetchRequest::try_from(options).and_then(|request| self.fetch(&request));
        callback(result);
    }

    /// Callback-style publish over a dynamic argument
    ///
    /// `options` must be a JSON object; anything else is reported through the
    /// callback as `FiddleError::InvalidArgument` without touching the network.
    pub fn save_fiddle(&self, options: Value, callback: Option<Callback<String>>) {
        let callback = callback.unwrap_or_else(|| Box::new(|_| {}));
        let result = PublishRequest::try_from(options).and_then(|request| self.publish(&request));
        callback(result);
    }
}

/// Builder for configuring a JSFiddle HTTP client
///
/// The endpoint constants are plain settings here so tests can point the
/// client at a local mock server.
///
/// # Example
///
/// ```no_run
/// use jsfiddle_http_client::FiddleClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FiddleClient::builder()
///     .base_url("http://localhost:1234")?
///     .publish_path("api/post")
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(10))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FiddleClientBuilder {
    base_url: Option<reqwest::Url>,
    publish_path: Option<String>,
    framework: Option<Framework>,
    timeout: Option<Duration>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl FiddleClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            publish_path: None,
            framework: None,
            timeout: None,
            client_builder: None,
        }
    }

    /// Set a custom base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, FiddleError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set the API path of the publish endpoint (default `api/post`)
    pub fn publish_path(mut self, path: impl Into<String>) -> Self {
        self.publish_path = Some(path.into());
        self
    }

    /// Set the client/version segments that end the publish path (default `Vue/2.2.1`)
    pub fn framework(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.framework = Some(Framework {
            name: name.into(),
            version: version.into(),
        });
        self
    }

    /// Set the request timeout (default 30 seconds)
    ///
    /// Applied on top of any builder given to [`client_builder`](Self::client_builder).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom HTTP client builder (timeouts, proxies, etc.)
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the client with the configured settings
    ///
    /// # Errors
    ///
    /// Returns `FiddleError::ClientInit` if the HTTP client cannot be initialized.
    pub fn build(self) -> Result<FiddleClient, FiddleError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| FiddleError::ClientInit(e.to_string()))?,
        };
        let builder = match (self.client_builder, self.timeout) {
            (Some(builder), Some(timeout)) => builder.timeout(timeout),
            (Some(builder), None) => builder,
            (None, timeout) => reqwest::blocking::Client::builder()
                .use_rustls_tls()
                .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT)),
        };
        let client = builder
            .build()
            .map_err(|e| FiddleError::ClientInit(e.to_string()))?;

        Ok(FiddleClient {
            client,
            base_url,
            publish_path: self
                .publish_path
                .unwrap_or_else(|| DEFAULT_PUBLISH_PATH.to_string()),
            framework: self.framework.unwrap_or_default(),
            parser: EmbedParser::new(),
        })
    }
}

impl Default for FiddleClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
