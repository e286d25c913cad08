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
//! Coordinator split protocol.
//!
//! These are the wire shapes the coordinator sends when it assigns splits to
//! a task. The embedding worker deserializes the JSON body with `serde_json`
//! and hands the resulting [`ScheduledSplit`] to the lowering layer; nothing
//! in this crate touches raw bytes. Polymorphic payloads (`connectorSplit`,
//! `transactionHandle`) are closed `@type`-tagged unions, so an id that
//! reaches the wrong translator is a wiring bug rather than a parse surprise.

pub mod hive;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A split plus the scheduling metadata the coordinator attached to it.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSplit {
    pub sequence_id: i64,
    pub plan_node_id: String,
    pub split: Split,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub connector_id: String,
    pub transaction_handle: ConnectorTransactionHandle,
    pub connector_split: ConnectorSplit,
    #[serde(default)]
    pub lifespan: Lifespan,
    #[serde(default)]
    pub split_context: SplitContext,
}

/// Per-connector split payload, selected by the `@type` tag.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "@type")]
pub enum ConnectorSplit {
    #[serde(rename = "hive")]
    Hive(hive::HiveSplit),
    #[serde(rename = "$remote")]
    Remote(RemoteSplit),
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "@type")]
pub enum ConnectorTransactionHandle {
    #[serde(rename = "hive")]
    Hive(hive::HiveTransactionHandle),
    #[serde(rename = "$remote")]
    Remote(RemoteTransactionHandle),
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RemoteTransactionHandle {}

/// A split that reads another task's output buffer instead of storage.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSplit {
    pub location: Location,
    pub remote_source_task_id: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Location {
    pub location: String,
}

/// Driver-group scope of a split under grouped execution.
///
/// Serialized as the bare string `"TaskWide"` or `"Group<n>"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifespan {
    #[default]
    TaskWide,
    Group(i32),
}

impl fmt::Display for Lifespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifespan::TaskWide => write!(f, "TaskWide"),
            Lifespan::Group(id) => write!(f, "Group{id}"),
        }
    }
}

impl FromStr for Lifespan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "TaskWide" {
            return Ok(Lifespan::TaskWide);
        }
        let Some(group) = s.strip_prefix("Group") else {
            return Err(format!("invalid lifespan: {s}"));
        };
        group
            .parse::<i32>()
            .map(Lifespan::Group)
            .map_err(|_| format!("invalid lifespan group: {s}"))
    }
}

impl Serialize for Lifespan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Lifespan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitContext {
    #[serde(default)]
    pub cacheable: bool,
}
