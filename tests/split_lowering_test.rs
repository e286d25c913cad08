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
//! Integration tests for coordinator split lowering.

use std::sync::Arc;

use arrow::datatypes::DataType;
use base64::Engine;
use vivace::connector::{ConnectorRegistry, FileFormat, HiveColumnType, RemoteSplitTranslator};
use vivace::exec::split::{ExecConnectorSplit, TASK_WIDE_GROUP_ID};
use vivace::lower::{LowerError, lower_scheduled_split};
use vivace::protocol::hive as wire;
use vivace::protocol::{Lifespan, ScheduledSplit};

use crate::common::{hive_scheduled_split, hive_split_mut, lower_to_hive, remote_scheduled_split};

mod common;

#[test]
fn test_lowers_minimal_hive_split() {
    let scheduled = hive_scheduled_split();
    let registry = ConnectorRegistry::default();
    let lowered = lower_scheduled_split(&registry, &scheduled).expect("lower split");

    assert_eq!(lowered.sequence_id, 111);
    assert_eq!(lowered.plan_node_id, "planNodeId-0");
    assert_eq!(lowered.split.group_id, TASK_WIDE_GROUP_ID);

    let ExecConnectorSplit::Hive(hive) = &lowered.split.connector_split else {
        panic!("expected a hive exec split");
    };
    assert_eq!(hive.connector_id, "hive");
    assert_eq!(hive.path, "/file/path");
    assert_eq!(hive.file_format, FileFormat::Dwrf);
    assert_eq!(hive.start, 0);
    assert_eq!(hive.length, 100);
    assert!(hive.partition_keys.is_empty());
    assert!(hive.table_bucket_number.is_none());
    assert!(hive.extra_file_info.is_none());
    assert!(hive.bucket_conversion.is_none());
    assert!(!hive.cacheable);
}

#[test]
fn test_preserves_partition_keys_including_null() {
    let mut scheduled = hive_scheduled_split();
    hive_split_mut(&mut scheduled).partition_keys = vec![
        wire::HivePartitionKey {
            name: "ds".to_string(),
            value: Some("2024-06-01".to_string()),
        },
        wire::HivePartitionKey {
            name: "nullPartitionKey".to_string(),
            value: None,
        },
    ];

    let hive = lower_to_hive(&scheduled);
    assert_eq!(hive.partition_keys.len(), 2);
    assert_eq!(
        hive.partition_keys["ds"],
        Some("2024-06-01".to_string())
    );
    // NULL stays NULL, it must not collapse to an empty string.
    assert_eq!(hive.partition_keys["nullPartitionKey"], None);
    assert_ne!(hive.partition_keys["nullPartitionKey"], Some(String::new()));
}

#[test]
fn test_rejects_duplicate_partition_keys() {
    let mut scheduled = hive_scheduled_split();
    hive_split_mut(&mut scheduled).partition_keys = vec![
        wire::HivePartitionKey {
            name: "ds".to_string(),
            value: Some("2024-06-01".to_string()),
        },
        wire::HivePartitionKey {
            name: "ds".to_string(),
            value: None,
        },
    ];

    let registry = ConnectorRegistry::default();
    let err = lower_scheduled_split(&registry, &scheduled).unwrap_err();
    assert!(matches!(err, LowerError::MalformedSplit(_)), "{err}");
}

#[test]
fn test_passes_opaque_maps_through_verbatim() {
    let mut scheduled = hive_scheduled_split();
    {
        let split = hive_split_mut(&mut scheduled);
        split
            .file_split
            .custom_split_info
            .insert("foo".to_string(), "bar".to_string());
        split.storage.serde_parameters.extend([
            ("field.delim".to_string(), "\t".to_string()),
            ("collection.delim".to_string(), ",".to_string()),
            ("mapkey.delim".to_string(), "|".to_string()),
        ]);
    }

    let hive = lower_to_hive(&scheduled);
    assert_eq!(hive.custom_split_info.len(), 1);
    assert_eq!(hive.custom_split_info["foo"], "bar");
    assert_eq!(hive.serde_parameters.len(), 3);
    assert_eq!(hive.serde_parameters["field.delim"], "\t");
    assert_eq!(hive.serde_parameters["collection.delim"], ",");
    assert_eq!(hive.serde_parameters["mapkey.delim"], "|");
}

#[test]
fn test_decodes_extra_file_info() {
    let mut scheduled = hive_scheduled_split();
    let encoded = base64::engine::general_purpose::STANDARD.encode(b"quux");
    hive_split_mut(&mut scheduled).file_split.extra_file_info = Some(encoded);

    let hive = lower_to_hive(&scheduled);
    assert_eq!(hive.extra_file_info.as_deref(), Some(b"quux".as_slice()));
}

#[test]
fn test_rejects_malformed_extra_file_info() {
    let mut scheduled = hive_scheduled_split();
    hive_split_mut(&mut scheduled).file_split.extra_file_info =
        Some("not base64!!".to_string());

    let registry = ConnectorRegistry::default();
    let err = lower_scheduled_split(&registry, &scheduled).unwrap_err();
    assert!(matches!(err, LowerError::Encoding(_)), "{err}");
}

#[test]
fn test_synthesizes_info_columns() {
    let mut scheduled = hive_scheduled_split();
    hive_split_mut(&mut scheduled).table_bucket_number = Some(42);

    let hive = lower_to_hive(&scheduled);
    assert_eq!(hive.info_columns["$path"], "/file/path");
    assert_eq!(hive.info_columns["$bucket"], "42");
    assert_eq!(hive.info_columns["$file_size"], "2048");
    assert_eq!(hive.info_columns["$file_modified_time"], "1700000000");
}

#[test]
fn test_bucket_column_is_absent_without_bucket_number() {
    let hive = lower_to_hive(&hive_scheduled_split());
    assert!(!hive.info_columns.contains_key("$bucket"));
    assert_eq!(hive.info_columns["$path"], "/file/path");
}

#[test]
fn test_translates_bucket_conversion() {
    let mut scheduled = hive_scheduled_split();
    {
        let split = hive_split_mut(&mut scheduled);
        split.table_bucket_number = Some(42);
        split.bucket_conversion = Some(wire::BucketConversion {
            table_bucket_count: 4096,
            partition_bucket_count: 512,
            bucket_column_handles: vec![wire::HiveColumnHandle {
                name: "c0".to_string(),
                hive_type: "bigint".to_string(),
                type_signature: "bigint".to_string(),
                column_type: wire::HiveColumnType::Regular,
            }],
        });
    }

    let hive = lower_to_hive(&scheduled);
    let conversion = hive.bucket_conversion.expect("bucket conversion");
    assert_eq!(conversion.table_bucket_count, 4096);
    assert_eq!(conversion.partition_bucket_count, 512);
    assert_eq!(conversion.bucket_column_handles.len(), 1);

    let handle = &conversion.bucket_column_handles[0];
    assert_eq!(handle.name, "c0");
    assert_eq!(handle.column_type, HiveColumnType::Regular);
    assert_eq!(handle.data_type, DataType::Int64);
    assert_eq!(handle.hive_type, DataType::Int64);
}

#[test]
fn test_rejects_bucket_conversion_without_bucket_number() {
    let mut scheduled = hive_scheduled_split();
    hive_split_mut(&mut scheduled).bucket_conversion = Some(wire::BucketConversion {
        table_bucket_count: 4096,
        partition_bucket_count: 512,
        bucket_column_handles: Vec::new(),
    });

    let registry = ConnectorRegistry::default();
    let err = lower_scheduled_split(&registry, &scheduled).unwrap_err();
    assert!(matches!(err, LowerError::MalformedSplit(_)), "{err}");
}

#[test]
fn test_rejects_aggregated_bucket_column() {
    let mut scheduled = hive_scheduled_split();
    {
        let split = hive_split_mut(&mut scheduled);
        split.table_bucket_number = Some(1);
        split.bucket_conversion = Some(wire::BucketConversion {
            table_bucket_count: 8,
            partition_bucket_count: 4,
            bucket_column_handles: vec![wire::HiveColumnHandle {
                name: "agg".to_string(),
                hive_type: "bigint".to_string(),
                type_signature: "bigint".to_string(),
                column_type: wire::HiveColumnType::Aggregated,
            }],
        });
    }

    let registry = ConnectorRegistry::default();
    let err = lower_scheduled_split(&registry, &scheduled).unwrap_err();
    assert!(matches!(err, LowerError::UnsupportedColumnType(_)), "{err}");
}

#[test]
fn test_rejects_unresolvable_bucket_column_signature() {
    let mut scheduled = hive_scheduled_split();
    {
        let split = hive_split_mut(&mut scheduled);
        split.table_bucket_number = Some(1);
        split.bucket_conversion = Some(wire::BucketConversion {
            table_bucket_count: 8,
            partition_bucket_count: 4,
            bucket_column_handles: vec![wire::HiveColumnHandle {
                name: "c0".to_string(),
                hive_type: "frobnicate".to_string(),
                type_signature: "frobnicate".to_string(),
                column_type: wire::HiveColumnType::Regular,
            }],
        });
    }

    let registry = ConnectorRegistry::default();
    let err = lower_scheduled_split(&registry, &scheduled).unwrap_err();
    assert!(matches!(err, LowerError::TypeMapping { .. }), "{err}");
}

#[test]
fn test_rejects_negative_file_range() {
    let mut scheduled = hive_scheduled_split();
    hive_split_mut(&mut scheduled).file_split.start = -1;

    let registry = ConnectorRegistry::default();
    let err = lower_scheduled_split(&registry, &scheduled).unwrap_err();
    assert!(matches!(err, LowerError::MalformedSplit(_)), "{err}");
}

#[test]
fn test_rejects_unsupported_input_format() {
    let mut scheduled = hive_scheduled_split();
    hive_split_mut(&mut scheduled)
        .storage
        .storage_format
        .input_format = "org.apache.hadoop.mapred.SequenceFileInputFormat".to_string();

    let registry = ConnectorRegistry::default();
    let err = lower_scheduled_split(&registry, &scheduled).unwrap_err();
    assert!(matches!(err, LowerError::UnsupportedFileFormat { .. }), "{err}");
}

#[test]
fn test_unknown_connector_is_rejected() {
    let mut scheduled = hive_scheduled_split();
    scheduled.split.connector_id = "not-a-real-connector".to_string();

    let registry = ConnectorRegistry::default();
    let err = lower_scheduled_split(&registry, &scheduled).unwrap_err();
    match err {
        LowerError::UnsupportedConnector(id) => assert_eq!(id, "not-a-real-connector"),
        other => panic!("expected unsupported connector, got {other:?}"),
    }
}

#[test]
fn test_mismatched_payload_is_an_invalid_split_type() {
    // A hive payload arriving at a connector id bound to the remote
    // translator is a wiring bug and must fail loudly.
    let mut registry = ConnectorRegistry::default();
    registry
        .register("files", Arc::new(RemoteSplitTranslator))
        .expect("register");

    let mut scheduled = hive_scheduled_split();
    scheduled.split.connector_id = "files".to_string();

    let err = lower_scheduled_split(&registry, &scheduled).unwrap_err();
    match err {
        LowerError::InvalidSplitType {
            connector_id,
            expected,
        } => {
            assert_eq!(connector_id, "files");
            assert_eq!(expected, "remote");
        }
        other => panic!("expected invalid split type, got {other:?}"),
    }
}

#[test]
fn test_same_split_lowers_to_equal_results() {
    let mut scheduled = hive_scheduled_split();
    {
        let split = hive_split_mut(&mut scheduled);
        split.table_bucket_number = Some(3);
        split.partition_keys = vec![wire::HivePartitionKey {
            name: "ds".to_string(),
            value: Some("2024-06-01".to_string()),
        }];
    }

    let registry = ConnectorRegistry::default();
    let first = lower_scheduled_split(&registry, &scheduled).expect("lower split");
    let second = lower_scheduled_split(&registry, &scheduled).expect("lower split");
    assert_eq!(first, second);
}

#[test]
fn test_group_lifespan_carries_into_group_id() {
    let mut scheduled = hive_scheduled_split();
    scheduled.split.lifespan = Lifespan::Group(7);

    let registry = ConnectorRegistry::default();
    let lowered = lower_scheduled_split(&registry, &scheduled).expect("lower split");
    assert_eq!(lowered.split.group_id, 7);
}

#[test]
fn test_cacheable_split_context_is_copied() {
    let mut scheduled = hive_scheduled_split();
    scheduled.split.split_context.cacheable = true;

    let hive = lower_to_hive(&scheduled);
    assert!(hive.cacheable);
}

#[test]
fn test_split_weight_passes_through() {
    let mut scheduled = hive_scheduled_split();
    hive_split_mut(&mut scheduled).split_weight = 250;

    let hive = lower_to_hive(&scheduled);
    assert_eq!(hive.split_weight, 250);
}

#[test]
fn test_lowers_remote_split() {
    let scheduled = remote_scheduled_split("http://10.0.0.5:8080/v1/task/t.1.0.0/results/0");
    let registry = ConnectorRegistry::default();
    let lowered = lower_scheduled_split(&registry, &scheduled).expect("lower split");

    let ExecConnectorSplit::Remote(remote) = &lowered.split.connector_split else {
        panic!("expected a remote exec split");
    };
    assert_eq!(
        remote.task_location,
        "http://10.0.0.5:8080/v1/task/t.1.0.0/results/0"
    );
}

#[test]
fn test_deserializes_coordinator_json_end_to_end() {
    let body = r#"{
        "sequenceId": 111,
        "planNodeId": "planNodeId-0",
        "split": {
            "connectorId": "hive",
            "transactionHandle": {"@type": "hive", "uuid": "3b3e5d6e-6a70-49e6-9762-8f9e25b2a781"},
            "connectorSplit": {
                "@type": "hive",
                "fileSplit": {
                    "path": "/file/path",
                    "start": 0,
                    "length": 100,
                    "fileSize": 2048,
                    "fileModifiedTime": 1700000000,
                    "customSplitInfo": {"foo": "bar"},
                    "extraFileInfo": "cXV1eA=="
                },
                "storage": {
                    "storageFormat": {
                        "serDe": "org.apache.hadoop.hive.serde2.lazy.LazySimpleSerDe",
                        "inputFormat": "org.apache.hadoop.mapred.TextInputFormat",
                        "outputFormat": "org.apache.hadoop.hive.ql.io.HiveIgnoreKeyTextOutputFormat"
                    },
                    "serdeParameters": {"field.delim": "\t"}
                },
                "partitionKeys": [{"name": "ds", "value": "2024-06-01"}],
                "tableBucketNumber": 42,
                "splitWeight": 100
            },
            "lifespan": "Group3",
            "splitContext": {"cacheable": true}
        }
    }"#;

    let scheduled: ScheduledSplit = serde_json::from_str(body).expect("deserialize body");
    let registry = ConnectorRegistry::default();
    let lowered = lower_scheduled_split(&registry, &scheduled).expect("lower split");
    assert_eq!(lowered.sequence_id, 111);
    assert_eq!(lowered.split.group_id, 3);

    let ExecConnectorSplit::Hive(hive) = &lowered.split.connector_split else {
        panic!("expected a hive exec split");
    };
    assert_eq!(hive.file_format, FileFormat::Text);
    assert_eq!(hive.extra_file_info.as_deref(), Some(b"quux".as_slice()));
    assert_eq!(hive.custom_split_info["foo"], "bar");
    assert_eq!(hive.serde_parameters["field.delim"], "\t");
    assert_eq!(hive.partition_keys["ds"], Some("2024-06-01".to_string()));
    assert_eq!(hive.info_columns["$bucket"], "42");
    assert_eq!(hive.split_weight, 100);
    assert!(hive.cacheable);
}

#[test]
fn test_wire_model_round_trips_through_json() {
    let mut scheduled = hive_scheduled_split();
    hive_split_mut(&mut scheduled).table_bucket_number = Some(9);
    scheduled.split.lifespan = Lifespan::Group(2);

    let body = serde_json::to_value(&scheduled).expect("serialize");
    assert_eq!(body["split"]["connectorSplit"]["@type"], "hive");
    assert_eq!(body["split"]["lifespan"], "Group2");

    let reparsed: ScheduledSplit =
        serde_json::from_value(body).expect("deserialize serialized form");
    let registry = ConnectorRegistry::default();
    let first = lower_scheduled_split(&registry, &scheduled).expect("lower original");
    let second = lower_scheduled_split(&registry, &reparsed).expect("lower reparsed");
    assert_eq!(first, second);
}
