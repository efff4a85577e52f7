// SPDX-License-Identifier: MIT

//!
//! *Part of the wider OpenTimeslider project*
//!
//! This crate injects a temporal clause into the filters of the map layers
//! drawn from a named data source, rewrites that clause whenever the current
//! date changes, and restores the original filters afterwards.  It does the
//! following:
//!
//! - Classifies existing filters into the supported [`FilterShape`]s
//! - Installs the temporal placeholder at a known position, keeping a backup
//! - Rewrites only the placeholder for each new decimal date
//! - Talks to the host renderer only through the [`RendererPort`] trait
//! - Provides [`StyleDocument`], a port over a MapLibre style JSON document
//! - Evaluates filters against feature properties
//!
//! Filters are plain [`serde_json::Value`]s, exactly as they appear in a style
//! document.
//!

mod evaluate;
mod injector;
mod port;
mod shape;
mod style;
mod temporal;

pub use evaluate::*;
pub use injector::*;
pub use port::*;
pub use shape::*;
pub use style::*;
pub use temporal::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can arise when filtering map layers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// The layer's existing filter isn't one of the supported shapes
    #[error("Layer `{layer_id}` has a filter of an unsupported shape")]
    UnsupportedFilterShape { layer_id: LayerId },

    /// The temporal clause is already installed on the layer
    #[error("The temporal filter is already installed on layer `{layer_id}`")]
    DoubleInstall { layer_id: LayerId },

    /// The installed filter no longer has the temporal clause at its position
    #[error("Layer `{layer_id}` no longer has the temporal filter in place")]
    PlaceholderMissing { layer_id: LayerId },

    /// Some layers' original filters couldn't be put back.  Their backups are
    /// kept so that restoring can be tried again.
    #[error("Failed to restore the original filters of layers: {}", join_ids(.layer_ids))]
    RestoreFailed { layer_ids: Vec<LayerId> },

    /// The style has no such data source
    #[error("There is no source named `{0}`")]
    UnknownSource(String),

    /// The style has no such layer
    #[error("There is no layer with ID `{0}`")]
    UnknownLayer(LayerId),

    /// The style document is malformed
    #[error("Invalid style document: {0}")]
    InvalidStyle(String),

    /// A filter can't be evaluated
    #[error("Unsupported filter expression: {0}")]
    UnsupportedExpression(String),

    /// Reading or writing a style document failed
    #[error("IO error: {0}")]
    Io(String),
}

fn join_ids(layer_ids: &[LayerId]) -> String {
    layer_ids
        .iter()
        .map(LayerId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<std::io::Error> for FilterError {
    fn from(error: std::io::Error) -> Self {
        FilterError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(error: serde_json::Error) -> Self {
        FilterError::InvalidStyle(error.to_string())
    }
}

/// The ID of a layer in the host renderer's style
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    /// Create a new layer ID
    pub fn from<S: ToString>(id: S) -> Self {
        LayerId(id.to_string())
    }

    /// Get the underlying `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
