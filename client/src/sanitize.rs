use std::borrow::Cow;

/// Makes a file name safe to use as a single URL path segment.
///
/// Same rule as JavaScript's `encodeURIComponent`: ASCII letters, digits and
/// `- _ . ! ~ * ' ( )` pass through, every other byte of the UTF-8 encoding
/// is percent-encoded. `/` is encoded too, so the name never adds segments.
#[must_use]
pub fn sanitize_name_for_uri(name: &str) -> Cow<'_, str> {
    url_escape::encode_component(name)
}
