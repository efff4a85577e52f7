// SPDX-License-Identifier: MIT

//!
//! Install, rewrite and remove the temporal clause on a source's layers
//!

use crate::{FilterError, FilterShape, LayerId, RendererPort, TemporalAttributes};
use crate::shape::replace_temporal_clause;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::BTreeMap;

/// Manages the temporal clause injected into the filters of a data source's
/// layers.
///
/// The filter each layer had before [`FilterInjector::install`] is kept
/// verbatim (including "no filter") until [`FilterInjector::uninstall`].
#[derive(Debug, Clone, Default)]
pub struct FilterInjector {
    /// Which feature properties the temporal clause reads
    attributes: TemporalAttributes,

    /// The original filter of every layer the clause is installed on
    backups: BTreeMap<LayerId, Option<Value>>,
}

impl FilterInjector {
    /// Create a new injector reading the given feature properties
    pub fn new(attributes: TemporalAttributes) -> Self {
        FilterInjector {
            attributes,
            backups: BTreeMap::new(),
        }
    }

    pub fn attributes(&self) -> &TemporalAttributes {
        &self.attributes
    }

    /// The layers the temporal clause is currently installed on
    pub fn installed_layers(&self) -> impl Iterator<Item = &LayerId> {
        self.backups.keys()
    }

    pub fn is_installed(&self, layer_id: &LayerId) -> bool {
        self.backups.contains_key(layer_id)
    }

    /// Install the placeholder temporal clause into every layer drawn from the
    /// source, returning the layers installed on.
    ///
    /// Every layer is checked before any is changed, so if one has an
    /// unsupported filter, or already has the clause installed, no layer is
    /// touched.
    pub fn install<P>(&mut self, port: &mut P, source_name: &str) -> Result<Vec<LayerId>, FilterError>
    where
        P: RendererPort + ?Sized,
    {
        info!("Installing temporal filters on layers of source `{source_name}`");
        let layer_ids = port.layers_for_source(source_name)?;

        // Check every layer before changing any
        let mut planned = Vec::with_capacity(layer_ids.len());
        for layer_id in layer_ids {
            if self.is_installed(&layer_id) {
                warn!("Temporal filter already installed on `{layer_id}`");
                return Err(FilterError::DoubleInstall { layer_id });
            }
            let original = port.filter(&layer_id)?;
            let Some(shape) = FilterShape::classify(original.as_ref()) else {
                warn!("Unsupported filter on `{layer_id}`: {original:?}");
                return Err(FilterError::UnsupportedFilterShape { layer_id });
            };
            let injected = shape.with_clause(self.attributes.placeholder());
            planned.push((layer_id, original, injected));
        }

        let mut installed = Vec::with_capacity(planned.len());
        for (layer_id, original, injected) in planned {
            debug!("Layer `{layer_id}`: {original:?} -> {injected}");
            port.set_filter(&layer_id, Some(injected))?;
            self.backups.insert(layer_id.clone(), original);
            installed.push(layer_id);
        }
        Ok(installed)
    }

    /// Rewrite the temporal clause of every installed layer for the date.
    /// Applying the same date again leaves the filters unchanged.
    ///
    /// Every installed filter is checked before any is rewritten, so a layer
    /// whose clause has gone leaves all of them as they were.
    pub fn apply<P>(&self, port: &mut P, decimal_date: f64) -> Result<(), FilterError>
    where
        P: RendererPort + ?Sized,
    {
        debug!("Applying temporal filter for {decimal_date}");
        let clause = self.attributes.clause_for(decimal_date);
        let mut rewritten = Vec::with_capacity(self.backups.len());
        for layer_id in self.backups.keys() {
            let placeholder_missing = || FilterError::PlaceholderMissing {
                layer_id: layer_id.clone(),
            };
            let mut filter = port.filter(layer_id)?.ok_or_else(placeholder_missing)?;
            if !replace_temporal_clause(&mut filter, clause.clone()) {
                warn!("Temporal filter missing from `{layer_id}`: {filter}");
                return Err(placeholder_missing());
            }
            rewritten.push((layer_id, filter));
        }

        for (layer_id, filter) in rewritten {
            port.set_filter(layer_id, Some(filter))?;
        }
        Ok(())
    }

    /// Restore every installed layer's original filter.
    ///
    /// Every layer is tried.  Those that fail keep their backup (and stay
    /// installed) and are listed in the error.
    pub fn uninstall<P>(&mut self, port: &mut P) -> Result<(), FilterError>
    where
        P: RendererPort + ?Sized,
    {
        info!("Removing temporal filters from {} layers", self.backups.len());
        let mut failed = Vec::new();
        for (layer_id, original) in std::mem::take(&mut self.backups) {
            if let Err(error) = port.set_filter(&layer_id, original.clone()) {
                warn!("Failed to restore the filter of `{layer_id}`: {error}");
                failed.push(layer_id.clone());
                self.backups.insert(layer_id, original);
            }
        }
        if failed.is_empty() {
            Ok(())
        } else {
            Err(FilterError::RestoreFailed { layer_ids: failed })
        }
    }
}
