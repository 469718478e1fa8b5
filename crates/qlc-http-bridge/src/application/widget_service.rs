//! WidgetService: name-based addressing on top of ID-based exchanges.
//!
//! QLC+ only understands widget IDs.  To act on a widget by name the service
//! first fetches the full listing, scans it for the name, and then issues a
//! second, independent exchange with the ID it found.
//!
//! # Accepted race
//!
//! The two exchanges are not atomic.  If a widget is renamed, deleted or
//! re-created between the lookup and the action, the action targets a stale
//! ID.  The protocol offers no name-addressed write, so nothing here tries to
//! prevent that.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use qlc_core::{parse_widget_listing, WidgetDirectory, GET_WIDGETS_LIST, GET_WIDGET_STATUS};

use crate::application::exchange::{ControllerError, ControllerExchange};

/// Errors returned by [`WidgetService`] operations.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The exchange with QLC+ failed.  Propagated unchanged.
    #[error(transparent)]
    Controller(#[from] ControllerError),

    /// No widget in the listing has this name.
    #[error("no widget named {name:?}")]
    WidgetNotFound { name: String },
}

/// Widget operations against one controller.
///
/// Holds no connection: every call opens its own exchange(s) through the
/// injected [`ControllerExchange`].  Cloning is cheap.
#[derive(Clone)]
pub struct WidgetService {
    controller: Arc<dyn ControllerExchange>,
}

impl WidgetService {
    /// Creates a service that talks to the controller through `controller`.
    pub fn new(controller: Arc<dyn ControllerExchange>) -> Self {
        Self { controller }
    }

    /// Fetches every widget as an ID → name directory in controller order.
    ///
    /// # Errors
    ///
    /// Any exchange error, or a protocol error if the listing has an odd
    /// number of fields.
    pub async fn list_widgets(&self) -> Result<WidgetDirectory, WidgetError> {
        let payload = self.controller.exchange(GET_WIDGETS_LIST, "").await?;
        let directory = parse_widget_listing(&payload).map_err(ControllerError::from)?;
        debug!("controller listed {} widgets", directory.len());
        Ok(directory)
    }

    /// Returns the ID of the first widget named `name`, or `None`.
    pub async fn resolve_id(&self, name: &str) -> Result<Option<String>, WidgetError> {
        let directory = self.list_widgets().await?;
        Ok(directory.resolve_id(name).map(str::to_string))
    }

    /// Reads the current status of widget `id`.
    pub async fn get_status_by_id(&self, id: &str) -> Result<String, WidgetError> {
        Ok(self.controller.exchange(GET_WIDGET_STATUS, id).await?)
    }

    /// Resolves `name` and reads the status of the widget found.
    ///
    /// # Errors
    ///
    /// [`WidgetError::WidgetNotFound`] if no widget has that name.
    pub async fn get_status_by_name(&self, name: &str) -> Result<String, WidgetError> {
        let id = self.require_id(name).await?;
        self.get_status_by_id(&id).await
    }

    /// Writes `value` to widget `id` and returns QLC+'s echoed confirmation.
    ///
    /// If `value` equals the widget's current value QLC+ does not reply and
    /// this ends in a timeout.
    pub async fn set_status_by_id(&self, id: &str, value: &str) -> Result<String, WidgetError> {
        Ok(self.controller.exchange(id, value).await?)
    }

    /// Resolves `name` and writes `value` to the widget found.
    ///
    /// # Errors
    ///
    /// [`WidgetError::WidgetNotFound`] if no widget has that name.
    pub async fn set_status_by_name(&self, name: &str, value: &str) -> Result<String, WidgetError> {
        let id = self.require_id(name).await?;
        self.set_status_by_id(&id, value).await
    }

    async fn require_id(&self, name: &str) -> Result<String, WidgetError> {
        let id = self
            .resolve_id(name)
            .await?
            .ok_or_else(|| WidgetError::WidgetNotFound {
                name: name.to_string(),
            })?;
        debug!("resolved widget name {name:?} to id {id:?}");
        Ok(id)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
