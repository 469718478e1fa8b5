//! Protocol module containing the command constants and the text framing rules.

pub mod codec;
pub mod messages;

pub use codec::{compose_request, unwrap_response, ProtocolError};
pub use messages::*;
