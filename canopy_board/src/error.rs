// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Board error types.

use thiserror::Error;

use crate::widget::WidgetId;

/// Board error type.
///
/// These are the only failures that originate in the core; they are always
/// surfaced to the caller, never swallowed or retried internally.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// No widget is stored under the given id.
    #[error("widget not found: {0}")]
    NotFound(WidgetId),

    /// A widget extent was zero or negative.
    #[error("invalid geometry: {width}x{height}")]
    InvalidGeometry {
        /// The offending horizontal extent.
        width: i64,
        /// The offending vertical extent.
        height: i64,
    },
}

/// Result type for board operations.
pub type Result<T> = core::result::Result<T, Error>;
