//! HTML character reference decoding

use std::borrow::Cow;

/// Reverse HTML character-entity escaping
///
/// Decodes every named reference in the HTML5 table as well as decimal
/// (`&#60;`) and hexadecimal (`&#x3C;`) references in a single pass. Unknown
/// names are copied through unchanged. Text without `&` is borrowed as is.
///
/// # Example
///
/// ```
/// use jsfiddle_http_client::decode_html_entities;
///
/// assert_eq!(decode_html_entities("&lt;b&gt;"), "<b>");
/// assert_eq!(decode_html_entities("caf&eacute; &#x27;hi&#39;"), "café 'hi'");
/// ```
pub fn decode_html_entities(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}
