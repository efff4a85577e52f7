// SPDX-License-Identifier: MIT

//!
//! A [`RendererPort`] over a MapLibre/Mapbox style JSON document
//!

use crate::{FilterError, LayerId, RendererPort};
use log::{debug, info};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A style document, with a `sources` object and a `layers` array whose
/// entries have an `id`, an optional `source` and an optional `filter`
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDocument {
    style: Value,
}

impl StyleDocument {
    /// Wrap a style if it has the required structure
    pub fn from_value(style: Value) -> Result<Self, FilterError> {
        if !style.get("sources").is_some_and(Value::is_object) {
            return Err(FilterError::InvalidStyle(String::from(
                "`sources` must be an object",
            )));
        }
        let Some(layers) = style.get("layers").and_then(Value::as_array) else {
            return Err(FilterError::InvalidStyle(String::from(
                "`layers` must be an array",
            )));
        };
        for layer in layers {
            if !layer.get("id").is_some_and(Value::is_string) {
                return Err(FilterError::InvalidStyle(String::from(
                    "every layer must have a string `id`",
                )));
            }
        }
        Ok(StyleDocument { style })
    }

    /// Load a style document from a JSON file
    pub fn load(path: &Path) -> Result<Self, FilterError> {
        info!("Loading style from {}", path.display());
        let data = fs::read_to_string(path)?;
        data.parse()
    }

    /// Save the style document to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), FilterError> {
        info!("Saving style to {}", path.display());
        fs::write(path, self.to_string_pretty()?)?;
        Ok(())
    }

    /// The style as pretty printed JSON
    pub fn to_string_pretty(&self) -> Result<String, FilterError> {
        Ok(serde_json::to_string_pretty(&self.style)?)
    }

    /// Get the underlying JSON
    pub fn as_value(&self) -> &Value {
        &self.style
    }

    /// Take the underlying JSON
    pub fn into_value(self) -> Value {
        self.style
    }

    fn layers(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.style["layers"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
    }

    fn layer(&self, layer_id: &LayerId) -> Result<&Map<String, Value>, FilterError> {
        self.layers()
            .find(|layer| layer.get("id").and_then(Value::as_str) == Some(layer_id.as_str()))
            .ok_or_else(|| FilterError::UnknownLayer(layer_id.clone()))
    }

    fn layer_mut(&mut self, layer_id: &LayerId) -> Result<&mut Map<String, Value>, FilterError> {
        self.style["layers"]
            .as_array_mut()
            .into_iter()
            .flatten()
            .filter_map(Value::as_object_mut)
            .find(|layer| layer.get("id").and_then(Value::as_str) == Some(layer_id.as_str()))
            .ok_or_else(|| FilterError::UnknownLayer(layer_id.clone()))
    }
}

impl FromStr for StyleDocument {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleDocument::from_value(serde_json::from_str(s)?)
    }
}

impl RendererPort for StyleDocument {
    fn layers_for_source(&self, source_name: &str) -> Result<Vec<LayerId>, FilterError> {
        if self.style["sources"].get(source_name).is_none() {
            return Err(FilterError::UnknownSource(source_name.to_string()));
        }
        let layer_ids: Vec<LayerId> = self
            .layers()
            .filter(|layer| layer.get("source").and_then(Value::as_str) == Some(source_name))
            .filter_map(|layer| layer.get("id").and_then(Value::as_str))
            .map(LayerId::from)
            .collect();
        debug!("{} layers use source `{source_name}`", layer_ids.len());
        Ok(layer_ids)
    }

    fn filter(&self, layer_id: &LayerId) -> Result<Option<Value>, FilterError> {
        Ok(self.layer(layer_id)?.get("filter").cloned())
    }

    fn set_filter(&mut self, layer_id: &LayerId, filter: Option<Value>) -> Result<(), FilterError> {
        let layer = self.layer_mut(layer_id)?;
        match filter {
            Some(filter) => {
                layer.insert(String::from("filter"), filter);
            }
            None => {
                layer.remove("filter");
            }
        }
        Ok(())
    }
}
