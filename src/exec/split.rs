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
//! Engine-side split representation produced by lowering.

use crate::connector::exchange::RemoteExchangeSplit;
use crate::connector::hive::HiveConnectorSplit;

/// Group id of a split that is not bound to a driver group.
pub const TASK_WIDE_GROUP_ID: i32 = -1;

#[derive(Clone, Debug, PartialEq)]
pub struct ExecScheduledSplit {
    pub sequence_id: i64,
    pub plan_node_id: String,
    pub split: ExecSplit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExecSplit {
    /// Driver group the split runs under, [`TASK_WIDE_GROUP_ID`] when the
    /// task executes ungrouped.
    pub group_id: i32,
    pub connector_split: ExecConnectorSplit,
}

/// Connector-specific payload of an [`ExecSplit`].
///
/// Each registered translator produces exactly one variant; a mismatch
/// between connector id and variant never leaves the translation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum ExecConnectorSplit {
    Hive(HiveConnectorSplit),
    Remote(RemoteExchangeSplit),
}
