//! Text framing for QLC+ websocket messages.
//!
//! Wire format:
//! ```text
//! request:  <prefix>            (no value)
//!           <prefix>|<value>
//! response: <prefix>|<payload>
//! ```
//! `<prefix>` is either a fixed command such as `QLC+API|getWidgetStatus` or a
//! widget ID.  The controller echoes the prefix at the start of its reply, and
//! that echo is the only thing that ties a reply to its request.

use thiserror::Error;

use crate::protocol::messages::FIELD_SEPARATOR;

/// Errors raised when a message does not follow the framing rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// A request was built with an empty command/ID prefix.
    #[error("request prefix must not be empty")]
    EmptyPrefix,

    /// The response echoed the request prefix zero times or more than once.
    #[error(
        "unexpected response {response:?} to message {sent:?}: \
         prefix {prefix:?} found {occurrences} times, expected exactly once"
    )]
    EchoCount {
        sent: String,
        response: String,
        prefix: String,
        occurrences: usize,
    },

    /// The prefix occurs once but the response does not start with `<prefix>|`.
    #[error(
        "unexpected response {response:?} to message {sent:?}: prefix {prefix:?} is not leading"
    )]
    EchoNotLeading {
        sent: String,
        response: String,
        prefix: String,
    },

    /// The widget listing has an odd number of fields, so the last ID has no name.
    #[error("malformed widget listing: unpaired trailing token {token:?}")]
    UnpairedListingToken { token: String },

    /// The controller answered with a binary frame instead of a text frame.
    #[error("unexpected binary frame ({len} bytes) in reply to message {sent:?}")]
    BinaryFrame { sent: String, len: usize },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Builds the outbound text frame for `prefix` and an optional `value`.
///
/// An empty `value` means "no value segment": the frame is just the prefix.
///
/// # Errors
///
/// Returns [`ProtocolError::EmptyPrefix`] if `prefix` is empty.
///
/// # Examples
///
/// ```rust
/// use qlc_core::compose_request;
///
/// assert_eq!(compose_request("QLC+API|getWidgetsList", "").unwrap(), "QLC+API|getWidgetsList");
/// assert_eq!(compose_request("7", "255").unwrap(), "7|255");
/// ```
pub fn compose_request(prefix: &str, value: &str) -> Result<String, ProtocolError> {
    if prefix.is_empty() {
        return Err(ProtocolError::EmptyPrefix);
    }
    if value.is_empty() {
        return Ok(prefix.to_string());
    }
    Ok(format!("{prefix}{FIELD_SEPARATOR}{value}"))
}

/// Checks that `response` answers a request sent with `prefix` and returns
/// the payload that follows the echoed `<prefix>|`.
///
/// `sent` is the full message that went out; it is only used in error
/// reports.  A response equal to the bare prefix yields an empty payload.
///
/// The echo check is a plain substring count, so a payload that happens to
/// repeat the prefix (for example writing `100` to widget `1`) is rejected.
///
/// # Errors
///
/// - [`ProtocolError::EchoCount`] if `prefix` does not occur exactly once.
/// - [`ProtocolError::EchoNotLeading`] if it occurs once but not as the
///   leading field.
///
/// # Examples
///
/// ```rust
/// use qlc_core::unwrap_response;
///
/// assert_eq!(unwrap_response("X", "X|7", "X|3").unwrap(), "3");
/// assert!(unwrap_response("X", "X|7", "Y|3").is_err());
/// ```
pub fn unwrap_response<'a>(
    prefix: &str,
    sent: &str,
    response: &'a str,
) -> Result<&'a str, ProtocolError> {
    if prefix.is_empty() {
        return Err(ProtocolError::EmptyPrefix);
    }

    // Overlapping echoes count separately: "X|X|X" holds "X|X" twice.
    let occurrences = response
        .char_indices()
        .filter(|(i, _)| response[*i..].starts_with(prefix))
        .count();
    if occurrences != 1 {
        return Err(ProtocolError::EchoCount {
            sent: sent.to_string(),
            response: response.to_string(),
            prefix: prefix.to_string(),
            occurrences,
        });
    }

    let not_leading = || ProtocolError::EchoNotLeading {
        sent: sent.to_string(),
        response: response.to_string(),
        prefix: prefix.to_string(),
    };

    let rest = response.strip_prefix(prefix).ok_or_else(not_leading)?;
    if rest.is_empty() {
        return Ok(rest);
    }
    rest.strip_prefix(FIELD_SEPARATOR).ok_or_else(not_leading)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::{GET_WIDGETS_LIST, GET_WIDGET_STATUS};

    #[test]
    fn test_compose_without_value_is_bare_prefix() {
        let msg = compose_request(GET_WIDGETS_LIST, "").unwrap();
        assert_eq!(msg, "QLC+API|getWidgetsList");
    }

    #[test]
    fn test_compose_with_value_appends_separator_and_value() {
        let msg = compose_request(GET_WIDGET_STATUS, "12").unwrap();
        assert_eq!(msg, "QLC+API|getWidgetStatus|12");
    }

    #[test]
    fn test_compose_rejects_empty_prefix() {
        assert_eq!(compose_request("", "1"), Err(ProtocolError::EmptyPrefix));
    }

    #[test]
    fn test_unwrap_strips_echoed_prefix() {
        // Arrange: request "X|7" answered with "X|3"
        let sent = compose_request("X", "7").unwrap();

        // Act
        let payload = unwrap_response("X", &sent, "X|3").unwrap();

        // Assert
        assert_eq!(payload, "3");
    }

    #[test]
    fn test_unwrap_keeps_pipes_inside_payload() {
        let payload = unwrap_response(
            GET_WIDGETS_LIST,
            GET_WIDGETS_LIST,
            "QLC+API|getWidgetsList|1|A|2|B",
        )
        .unwrap();
        assert_eq!(payload, "1|A|2|B");
    }

    #[test]
    fn test_unwrap_bare_prefix_gives_empty_payload() {
        let payload = unwrap_response("5", "5|1", "5").unwrap();
        assert_eq!(payload, "");
    }

    #[test]
    fn test_unwrap_missing_prefix_is_echo_count_zero() {
        let err = unwrap_response("X", "X|7", "Y|3").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::EchoCount { occurrences: 0, .. }
        ));
    }

    #[test]
    fn test_unwrap_repeated_prefix_is_echo_count_two() {
        let err = unwrap_response("X", "X|7", "X|X").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::EchoCount { occurrences: 2, .. }
        ));
    }

    #[test]
    fn test_unwrap_overlapping_prefix_is_echo_count_two() {
        // "X|X" starts at offsets 0 and 2 of "X|X|X".
        let err = unwrap_response("X|X", "X|X", "X|X|X").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::EchoCount { occurrences: 2, .. }
        ));
    }

    #[test]
    fn test_unwrap_value_repeating_widget_id_is_rejected() {
        // Writing 100 to widget 1: the echo "1|100" contains "1" twice.
        let err = unwrap_response("1", "1|100", "1|100").unwrap_err();
        assert!(matches!(err, ProtocolError::EchoCount { occurrences: 2, .. }));
    }

    #[test]
    fn test_unwrap_single_non_leading_prefix_is_rejected() {
        let err = unwrap_response("X", "X|7", "Y|X").unwrap_err();
        assert!(matches!(err, ProtocolError::EchoNotLeading { .. }));
    }

    #[test]
    fn test_unwrap_prefix_without_separator_is_rejected() {
        let err = unwrap_response("X", "X|7", "X7").unwrap_err();
        assert!(matches!(err, ProtocolError::EchoNotLeading { .. }));
    }

    #[test]
    fn test_echo_count_error_names_sent_message_and_response() {
        let err = unwrap_response("X", "X|7", "nothing").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("\"X|7\""), "got: {text}");
        assert!(text.contains("\"nothing\""), "got: {text}");
    }
}
