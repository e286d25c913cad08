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
//! Shared split fixtures for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use vivace::connector::{ConnectorRegistry, HiveConnectorSplit};
use vivace::exec::split::ExecConnectorSplit;
use vivace::lower::lower_scheduled_split;
use vivace::protocol::hive::{
    HiveFileSplit, HiveSplit, HiveTransactionHandle, Storage, StorageFormat,
};
use vivace::protocol::{
    ConnectorSplit, ConnectorTransactionHandle, Lifespan, Location, RemoteSplit,
    RemoteTransactionHandle, ScheduledSplit, Split, SplitContext,
};

pub const ORC_INPUT_FORMAT: &str = "com.facebook.hive.orc.OrcInputFormat";

/// A minimal valid assignment: one ORC file range on the `hive` connector.
pub fn hive_scheduled_split() -> ScheduledSplit {
    ScheduledSplit {
        sequence_id: 111,
        plan_node_id: "planNodeId-0".to_string(),
        split: Split {
            connector_id: "hive".to_string(),
            transaction_handle: ConnectorTransactionHandle::Hive(HiveTransactionHandle::default()),
            connector_split: ConnectorSplit::Hive(HiveSplit {
                file_split: HiveFileSplit {
                    path: "/file/path".to_string(),
                    start: 0,
                    length: 100,
                    file_size: 2048,
                    file_modified_time: 1_700_000_000,
                    custom_split_info: HashMap::new(),
                    extra_file_info: None,
                },
                storage: Storage {
                    storage_format: StorageFormat {
                        serde: String::new(),
                        input_format: ORC_INPUT_FORMAT.to_string(),
                        output_format: String::new(),
                    },
                    serde_parameters: HashMap::new(),
                },
                partition_keys: Vec::new(),
                table_bucket_number: None,
                bucket_conversion: None,
                split_weight: 0,
            }),
            lifespan: Lifespan::TaskWide,
            split_context: SplitContext::default(),
        },
    }
}

pub fn remote_scheduled_split(location: &str) -> ScheduledSplit {
    ScheduledSplit {
        sequence_id: 7,
        plan_node_id: "planNodeId-1".to_string(),
        split: Split {
            connector_id: "$remote".to_string(),
            transaction_handle: ConnectorTransactionHandle::Remote(
                RemoteTransactionHandle::default(),
            ),
            connector_split: ConnectorSplit::Remote(RemoteSplit {
                location: Location {
                    location: location.to_string(),
                },
                remote_source_task_id: "20240101_000000_00000_abcde.1.0.0".to_string(),
            }),
            lifespan: Lifespan::TaskWide,
            split_context: SplitContext::default(),
        },
    }
}

/// Mutable access to the fixture's hive payload.
pub fn hive_split_mut(scheduled: &mut ScheduledSplit) -> &mut HiveSplit {
    match &mut scheduled.split.connector_split {
        ConnectorSplit::Hive(split) => split,
        other => panic!("expected a hive connector split, got {other:?}"),
    }
}

/// Lower through a default registry and unwrap the hive payload.
pub fn lower_to_hive(scheduled: &ScheduledSplit) -> HiveConnectorSplit {
    let registry = ConnectorRegistry::default();
    let lowered = lower_scheduled_split(&registry, scheduled).expect("lower split");
    match lowered.split.connector_split {
        ExecConnectorSplit::Hive(split) => split,
        other => panic!("expected a hive exec split, got {other:?}"),
    }
}
