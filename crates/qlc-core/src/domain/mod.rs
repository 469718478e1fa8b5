//! Domain entities for the QLC+ bridge.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain**.  Domain code has **no** imports from
//! network libraries, async runtimes, or HTTP frameworks, so it can be tested
//! in isolation.
//!
//! Here the domain is the widget directory: QLC+ addresses widgets only by ID,
//! and the directory is what lets the rest of the bridge address them by name.

/// Widget directory built from the controller's listing.
///
/// See [`widget::WidgetDirectory`] for the main type.
pub mod widget;
