// SPDX-License-Identifier: MIT

//!
//! The narrow interface to the host renderer
//!

use crate::{FilterError, LayerId};
use serde_json::Value;

/// Implementing types give read/write access to the filters of the layers in
/// a host renderer's style
pub trait RendererPort {
    /// The IDs of the layers drawn from the named data source, in style order
    fn layers_for_source(&self, source_name: &str) -> Result<Vec<LayerId>, FilterError>;

    /// The layer's current filter (`None` if it has no filter)
    fn filter(&self, layer_id: &LayerId) -> Result<Option<Value>, FilterError>;

    /// Replace the layer's filter (`None` removes it)
    fn set_filter(&mut self, layer_id: &LayerId, filter: Option<Value>) -> Result<(), FilterError>;
}

impl<P> RendererPort for &mut P
where
    P: RendererPort + ?Sized,
{
    fn layers_for_source(&self, source_name: &str) -> Result<Vec<LayerId>, FilterError> {
        (**self).layers_for_source(source_name)
    }

    fn filter(&self, layer_id: &LayerId) -> Result<Option<Value>, FilterError> {
        (**self).filter(layer_id)
    }

    fn set_filter(&mut self, layer_id: &LayerId, filter: Option<Value>) -> Result<(), FilterError> {
        (**self).set_filter(layer_id, filter)
    }
}
