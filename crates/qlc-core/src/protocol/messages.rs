//! Command keywords and fixed parameters of the QLC+ websocket API.
//!
//! QLC+ has no message IDs and no name-based addressing.  A request is either
//! one of the fixed `QLC+API|…` commands below, or a bare widget ID followed by
//! the value to write:
//!
//! ```text
//! QLC+API|getWidgetsList          list every widget as ID|Name|ID|Name…
//! QLC+API|getWidgetStatus|<id>    read the current value of one widget
//! <id>|<value>                    write a value to one widget
//! ```

use std::time::Duration;

/// Separator between fields of a request or response frame.
pub const FIELD_SEPARATOR: char = '|';

/// Path of the websocket endpoint on the QLC+ web server.
pub const WEBSOCKET_PATH: &str = "/qlcplusWS";

/// Command that returns the flat `ID|Name|ID|Name…` widget listing.
pub const GET_WIDGETS_LIST: &str = "QLC+API|getWidgetsList";

/// Command that returns the status of the widget whose ID follows it.
pub const GET_WIDGET_STATUS: &str = "QLC+API|getWidgetStatus";

/// Deadline applied separately to the write and to the read of one exchange.
///
/// QLC+ sends no reply at all when a widget is set to the value it already
/// has, so this deadline is also how long such a write takes to fail.
pub const DEFAULT_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_command_shares_api_namespace_with_list_command() {
        // Both fixed commands live under the same `QLC+API` namespace.
        let list_ns = GET_WIDGETS_LIST.split(FIELD_SEPARATOR).next();
        let status_ns = GET_WIDGET_STATUS.split(FIELD_SEPARATOR).next();
        assert_eq!(list_ns, Some("QLC+API"));
        assert_eq!(list_ns, status_ns);
    }

    #[test]
    fn test_default_timeout_is_10s() {
        assert_eq!(DEFAULT_EXCHANGE_TIMEOUT, Duration::from_secs(10));
    }

    #[test]
    fn test_websocket_path_is_absolute() {
        assert!(WEBSOCKET_PATH.starts_with('/'));
    }
}
