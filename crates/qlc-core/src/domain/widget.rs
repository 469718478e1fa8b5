//! Widget directory: the ID → name table of a QLC+ virtual console.
//!
//! QLC+ answers `QLC+API|getWidgetsList` with one flat, pipe-separated list
//! that alternates IDs and names:
//!
//! ```text
//! 0|Master fader|1|Blackout|4|Chase speed
//! ```
//!
//! [`parse_widget_listing`] turns that payload into a [`WidgetDirectory`].
//!
//! # Identity rules
//!
//! - IDs are the authoritative identity.  A repeated ID overwrites the name
//!   stored for it (last write wins) but keeps its original position.
//! - Names are not unique.  [`WidgetDirectory::resolve_id`] returns the first
//!   widget, in the order the controller listed them, whose name matches.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::protocol::codec::ProtocolError;
use crate::protocol::messages::FIELD_SEPARATOR;

/// One addressable control (fader, button, slider…) in the virtual console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    /// Opaque controller-assigned identifier.
    pub id: String,
    /// Display name shown in the QLC+ UI.
    pub name: String,
}

/// Widgets in controller order, indexed by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetDirectory {
    widgets: Vec<Widget>,
    /// Position of each ID inside `widgets`.
    index: HashMap<String, usize>,
}

impl WidgetDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a widget, or renames it if the ID is already present.
    ///
    /// Returns the previous name when the ID was already known.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) -> Option<String> {
        let id = id.into();
        let name = name.into();
        match self.index.get(&id) {
            Some(&pos) => Some(std::mem::replace(&mut self.widgets[pos].name, name)),
            None => {
                self.index.insert(id.clone(), self.widgets.len());
                self.widgets.push(Widget { id, name });
                None
            }
        }
    }

    /// Number of distinct widget IDs.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns `true` if the controller listed no widgets.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Looks up the display name of `id`.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.index
            .get(id)
            .map(|&pos| self.widgets[pos].name.as_str())
    }

    /// Returns the ID of the first widget named exactly `name`.
    ///
    /// `None` means no widget has that name.  This is distinct from
    /// `Some("")`, a widget whose ID happens to be empty.
    pub fn resolve_id(&self, name: &str) -> Option<&str> {
        self.widgets
            .iter()
            .find(|w| w.name == name)
            .map(|w| w.id.as_str())
    }

    /// Widgets in the order the controller listed them.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Iterates over the widgets in controller order.
    pub fn iter(&self) -> std::slice::Iter<'_, Widget> {
        self.widgets.iter()
    }
}

impl<'a> IntoIterator for &'a WidgetDirectory {
    type Item = &'a Widget;
    type IntoIter = std::slice::Iter<'a, Widget>;

    fn into_iter(self) -> Self::IntoIter {
        self.widgets.iter()
    }
}

/// Parses the payload of a `getWidgetsList` reply (the echoed command already
/// stripped) into a [`WidgetDirectory`].
///
/// An empty payload is an empty directory.
///
/// # Errors
///
/// Returns [`ProtocolError::UnpairedListingToken`] when the payload has an odd
/// number of fields, i.e. the last ID has no name.
///
/// # Examples
///
/// ```rust
/// use qlc_core::parse_widget_listing;
///
/// let dir = parse_widget_listing("1|Fader1|2|Fader2").unwrap();
/// assert_eq!(dir.len(), 2);
/// assert_eq!(dir.resolve_id("Fader2"), Some("2"));
/// ```
pub fn parse_widget_listing(payload: &str) -> Result<WidgetDirectory, ProtocolError> {
    let mut directory = WidgetDirectory::new();
    if payload.is_empty() {
        return Ok(directory);
    }

    let mut fields = payload.split(FIELD_SEPARATOR);
    while let Some(id) = fields.next() {
        let Some(name) = fields.next() else {
            return Err(ProtocolError::UnpairedListingToken {
                token: id.to_string(),
            });
        };
        if let Some(previous) = directory.insert(id, name) {
            debug!("widget {id:?} listed twice: {previous:?} replaced by {name:?}");
        }
    }

    Ok(directory)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
