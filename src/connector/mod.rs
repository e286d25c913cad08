// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
pub mod exchange;
pub mod hive;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::common::app_config::ConnectorConfig;
use crate::exec::split::ExecConnectorSplit;
use crate::lower::error::LowerError;
use crate::protocol;

pub use exchange::{RemoteExchangeSplit, RemoteSplitTranslator};
pub use hive::{
    FileFormat, HiveBucketConversion, HiveColumnHandle, HiveColumnType, HiveConnectorSplit,
    HiveSplitTranslator,
};

pub const HIVE_CONNECTOR_ID: &str = "hive";
/// Connector id the coordinator uses for remote exchange splits.
pub const REMOTE_CONNECTOR_ID: &str = "$remote";

/// Registration and wiring failures. These surface at worker startup or
/// shutdown, never on the per-split path.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("connector {0} is already registered")]
    DuplicateConnector(String),
    #[error("connector {0} is not registered")]
    UnknownConnector(String),
    #[error("unknown translator kind for connector {id}: {kind}")]
    UnknownTranslatorKind { id: String, kind: String },
}

/// One connector's split translation: wire payload in, engine payload out.
///
/// Implementations are stateless and shared across tasks; `translate_split`
/// must not mutate anything or block.
pub trait SplitTranslator: Send + Sync {
    /// Translator kind, used in config wiring and diagnostics.
    fn name(&self) -> &'static str;

    fn translate_split(&self, split: &protocol::Split)
    -> Result<ExecConnectorSplit, LowerError>;
}

/// Connector id to translator table.
///
/// Registration and removal take `&mut self` while lookups borrow shared, so
/// a registry behind an `Arc` cannot be rewired while splits are in flight.
#[derive(Clone)]
pub struct ConnectorRegistry {
    translators: HashMap<String, Arc<dyn SplitTranslator>>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self {
            translators: HashMap::new(),
        }
    }

    /// Build the registry from the `[[connectors]]` entries of the worker
    /// config.
    pub fn from_config(connectors: &[ConnectorConfig]) -> Result<Self, RegistryError> {
        let mut registry = ConnectorRegistry::new();
        for connector in connectors {
            let Some(translator) = translator_for_kind(&connector.kind) else {
                return Err(RegistryError::UnknownTranslatorKind {
                    id: connector.id.clone(),
                    kind: connector.kind.clone(),
                });
            };
            registry.register(connector.id.clone(), translator)?;
        }
        Ok(registry)
    }

    /// Bind a connector id to a translator. An id can only be bound once;
    /// rebinding requires an explicit `unregister` first.
    pub fn register(
        &mut self,
        connector_id: impl Into<String>,
        translator: Arc<dyn SplitTranslator>,
    ) -> Result<(), RegistryError> {
        let connector_id = connector_id.into();
        if self.translators.contains_key(&connector_id) {
            return Err(RegistryError::DuplicateConnector(connector_id));
        }
        self.translators.insert(connector_id, translator);
        Ok(())
    }

    pub fn unregister(&mut self, connector_id: &str) -> Result<(), RegistryError> {
        if self.translators.remove(connector_id).is_none() {
            return Err(RegistryError::UnknownConnector(connector_id.to_string()));
        }
        Ok(())
    }

    pub fn lookup(&self, connector_id: &str) -> Result<&dyn SplitTranslator, LowerError> {
        let Some(translator) = self.translators.get(connector_id) else {
            return Err(LowerError::UnsupportedConnector(connector_id.to_string()));
        };
        Ok(translator.as_ref())
    }

    pub fn connector_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.translators.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

fn translator_for_kind(kind: &str) -> Option<Arc<dyn SplitTranslator>> {
    match kind {
        "hive" => Some(Arc::new(HiveSplitTranslator)),
        "remote" => Some(Arc::new(RemoteSplitTranslator)),
        _ => None,
    }
}

impl Default for ConnectorRegistry {
    fn default() -> Self {
        let mut registry = ConnectorRegistry::new();
        registry
            .translators
            .insert(HIVE_CONNECTOR_ID.to_string(), Arc::new(HiveSplitTranslator));
        registry.translators.insert(
            REMOTE_CONNECTOR_ID.to_string(),
            Arc::new(RemoteSplitTranslator),
        );
        registry
    }
}

impl std::fmt::Debug for ConnectorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorRegistry")
            .field("translators", &self.connector_ids())
            .finish()
    }
}
