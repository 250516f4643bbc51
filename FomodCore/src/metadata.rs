//! Designer metadata side channel
//!
//! Designer-only state (a renamed display name, the user's sibling order) is
//! persisted inside the document as an XML comment:
//!
//! ```text
//! <!--<designer.metadata.do.not.edit> {"name":"Boss","user_sort":"0000005"}-->
//! ```
//!
//! Installers ignore comments, so the payload is invisible to the format's
//! consumers. Decoding never fails loudly: a malformed payload is treated as
//! if the comment were absent.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;

/// Prefix identifying a metadata comment.
pub const METADATA_SENTINEL: &str = "<designer.metadata.do.not.edit>";

/// Metadata key holding a display name override.
pub const NAME_KEY: &str = "name";

/// Metadata key holding the user sort key.
pub const USER_SORT_KEY: &str = "user_sort";

/// User sort key of a node that was never reordered.
pub const DEFAULT_USER_SORT: &str = "0000000";

const USER_SORT_WIDTH: usize = DEFAULT_USER_SORT.len();
const USER_SORT_MAX: u32 = 9_999_999;

/// Opaque key/value map carried by a node. Unknown keys survive a round trip.
pub type Metadata = IndexMap<String, Value>;

/// Whether a comment's text is a metadata payload (well-formed or not).
#[must_use]
pub fn is_metadata_comment(text: &str) -> bool {
    text.trim_start().starts_with(METADATA_SENTINEL)
}

/// Build the comment text for `metadata`.
///
/// `--` may not appear inside an XML comment, so it is written as `-\u002d`,
/// which JSON decodes back to the same string.
pub fn encode(metadata: &Metadata) -> Result<String> {
    let json = serde_json::to_string(metadata)?;
    Ok(format!("{METADATA_SENTINEL} {}", json.replace("--", "-\\u002d")))
}

/// Decode a comment's text. `None` when it is not a metadata comment or its
/// payload is not a JSON object.
#[must_use]
pub fn decode(text: &str) -> Option<Metadata> {
    let payload = text.trim().strip_prefix(METADATA_SENTINEL)?;
    match serde_json::from_str::<Metadata>(payload.trim()) {
        Ok(metadata) => Some(metadata),
        Err(err) => {
            tracing::debug!("Ignoring malformed metadata comment: {}", err);
            None
        }
    }
}

/// Format a sibling position as a user sort key.
#[must_use]
pub fn user_sort_key(position: u32) -> String {
    format!("{:0width$}", position.min(USER_SORT_MAX), width = USER_SORT_WIDTH)
}

/// Read a user sort key out of a metadata value.
///
/// Hand-edited files sometimes carry a bare number; both forms are accepted.
#[must_use]
pub fn parse_user_sort(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => {
            s.parse::<u32>().ok().map(user_sort_key)
        }
        Value::Number(n) => n
            .as_u64()
            .map(|n| user_sort_key(u32::try_from(n).unwrap_or(USER_SORT_MAX))),
        _ => None,
    }
}
