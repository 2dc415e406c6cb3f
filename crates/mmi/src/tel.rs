//! `tel:` URI construction
//!
//! The composed code is normalised (`+` becomes the `00` international
//! prefix) and percent-encoded with the same unreserved set as Android's
//! `Uri.encode`, so `*` stays literal and `#` becomes `%23`.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

/// Characters left unescaped besides ASCII alphanumerics
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'-')
    .remove(b'!')
    .remove(b'.')
    .remove(b'~')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*');

pub const TEL_SCHEME: &str = "tel";

/// Replace every `+` with `00`
pub fn normalize_number(code: &str) -> String {
    code.replace('+', "00")
}

/// Percent-encode for use in a `tel:` URI
pub fn encode(code: &str) -> String {
    utf8_percent_encode(code, URI_ENCODE_SET).to_string()
}

/// A `tel:` URI ready for a call intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelUri {
    encoded: String,
}

impl TelUri {
    /// Build the URI for a composed code
    pub fn for_code(code: &str) -> Self {
        let encoded = encode(&normalize_number(code));
        debug!("Encoded URI: {}:{}", TEL_SCHEME, encoded);
        Self { encoded }
    }

    /// The encoded scheme-specific part
    pub fn encoded_number(&self) -> &str {
        &self.encoded
    }

    pub fn as_uri(&self) -> String {
        format!("{}:{}", TEL_SCHEME, self.encoded)
    }
}

impl fmt::Display for TelUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", TEL_SCHEME, self.encoded)
    }
}
