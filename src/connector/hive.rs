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
//! File-table (hive) split translation.

use std::collections::HashMap;

use arrow::datatypes::DataType;
use base64::Engine;

use crate::connector::SplitTranslator;
use crate::exec::split::ExecConnectorSplit;
use crate::lower::error::LowerError;
use crate::lower::type_signature::arrow_type_from_signature;
use crate::protocol;

pub const PATH_COLUMN_NAME: &str = "$path";
pub const BUCKET_COLUMN_NAME: &str = "$bucket";
pub const FILE_SIZE_COLUMN_NAME: &str = "$file_size";
pub const FILE_MODIFIED_TIME_COLUMN_NAME: &str = "$file_modified_time";

/// Engine-side form of a file-table split.
#[derive(Clone, Debug, PartialEq)]
pub struct HiveConnectorSplit {
    pub connector_id: String,
    pub path: String,
    pub file_format: FileFormat,
    pub start: u64,
    pub length: u64,
    /// Keyed by partition column name; `None` is a NULL partition value.
    pub partition_keys: HashMap<String, Option<String>>,
    pub table_bucket_number: Option<i32>,
    pub custom_split_info: HashMap<String, String>,
    pub extra_file_info: Option<Vec<u8>>,
    pub serde_parameters: HashMap<String, String>,
    pub split_weight: i64,
    pub cacheable: bool,
    /// Synthesized columns served from split metadata rather than file data.
    pub info_columns: HashMap<String, String>,
    pub bucket_conversion: Option<HiveBucketConversion>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HiveBucketConversion {
    pub table_bucket_count: i32,
    pub partition_bucket_count: i32,
    pub bucket_column_handles: Vec<HiveColumnHandle>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HiveColumnHandle {
    pub name: String,
    pub column_type: HiveColumnType,
    pub data_type: DataType,
    pub hive_type: DataType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HiveColumnType {
    PartitionKey,
    Regular,
    Synthesized,
}

/// On-disk layout the reader has to use for the split's file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Dwrf,
    Orc,
    Parquet,
    Text,
    Json,
    Nimble,
}

fn file_format_from_storage(
    format: &protocol::hive::StorageFormat,
) -> Result<FileFormat, LowerError> {
    match format.input_format.as_str() {
        "com.facebook.hive.orc.OrcInputFormat" => Ok(FileFormat::Dwrf),
        "org.apache.hadoop.hive.ql.io.orc.OrcInputFormat" => Ok(FileFormat::Orc),
        "org.apache.hadoop.hive.ql.io.parquet.MapredParquetInputFormat"
        | "org.apache.hudi.hadoop.HoodieParquetInputFormat"
        | "org.apache.hudi.hadoop.realtime.HoodieParquetRealtimeInputFormat" => {
            Ok(FileFormat::Parquet)
        }
        "com.facebook.alpha.AlphaInputFormat" => Ok(FileFormat::Nimble),
        // Plain text containers are disambiguated by the row serde.
        "org.apache.hadoop.mapred.TextInputFormat" => match format.serde.as_str() {
            "org.apache.hadoop.hive.serde2.lazy.LazySimpleSerDe" => Ok(FileFormat::Text),
            "org.openx.data.jsonserde.JsonSerDe" => Ok(FileFormat::Json),
            _ => Err(LowerError::UnsupportedFileFormat {
                input_format: format.input_format.clone(),
                serde: format.serde.clone(),
            }),
        },
        _ => Err(LowerError::UnsupportedFileFormat {
            input_format: format.input_format.clone(),
            serde: format.serde.clone(),
        }),
    }
}

fn column_handle_from_wire(
    handle: &protocol::hive::HiveColumnHandle,
) -> Result<HiveColumnHandle, LowerError> {
    let column_type = match handle.column_type {
        protocol::hive::HiveColumnType::PartitionKey => HiveColumnType::PartitionKey,
        protocol::hive::HiveColumnType::Regular => HiveColumnType::Regular,
        protocol::hive::HiveColumnType::Synthesized => HiveColumnType::Synthesized,
        protocol::hive::HiveColumnType::Aggregated => {
            return Err(LowerError::UnsupportedColumnType("AGGREGATED"));
        }
    };
    // dataType and hiveType describe the same column; resolve the signature once.
    let data_type = arrow_type_from_signature(&handle.type_signature)?;
    Ok(HiveColumnHandle {
        name: handle.name.clone(),
        column_type,
        hive_type: data_type.clone(),
        data_type,
    })
}

fn non_negative(value: i64, field: &str) -> Result<u64, LowerError> {
    u64::try_from(value)
        .map_err(|_| LowerError::MalformedSplit(format!("negative {field}: {value}")))
}

#[derive(Clone, Debug, Default)]
pub struct HiveSplitTranslator;

impl SplitTranslator for HiveSplitTranslator {
    fn name(&self) -> &'static str {
        "hive"
    }

    fn translate_split(
        &self,
        split: &protocol::Split,
    ) -> Result<ExecConnectorSplit, LowerError> {
        let protocol::ConnectorSplit::Hive(hive_split) = &split.connector_split else {
            return Err(LowerError::InvalidSplitType {
                connector_id: split.connector_id.clone(),
                expected: self.name(),
            });
        };
        let file_split = &hive_split.file_split;

        let file_format = file_format_from_storage(&hive_split.storage.storage_format)?;
        let start = non_negative(file_split.start, "fileSplit.start")?;
        let length = non_negative(file_split.length, "fileSplit.length")?;

        let extra_file_info = match &file_split.extra_file_info {
            Some(encoded) => Some(base64::engine::general_purpose::STANDARD.decode(encoded)?),
            None => None,
        };

        let mut partition_keys = HashMap::with_capacity(hive_split.partition_keys.len());
        for key in &hive_split.partition_keys {
            if partition_keys
                .insert(key.name.clone(), key.value.clone())
                .is_some()
            {
                return Err(LowerError::MalformedSplit(format!(
                    "duplicate partition key: {}",
                    key.name
                )));
            }
        }

        let mut info_columns = HashMap::from([
            (PATH_COLUMN_NAME.to_string(), file_split.path.clone()),
            (
                FILE_SIZE_COLUMN_NAME.to_string(),
                file_split.file_size.to_string(),
            ),
            (
                FILE_MODIFIED_TIME_COLUMN_NAME.to_string(),
                file_split.file_modified_time.to_string(),
            ),
        ]);
        if let Some(bucket) = hive_split.table_bucket_number {
            info_columns.insert(BUCKET_COLUMN_NAME.to_string(), bucket.to_string());
        }

        let bucket_conversion = match &hive_split.bucket_conversion {
            Some(conversion) => {
                // Re-bucketing is meaningless without the bucket the split reads.
                if hive_split.table_bucket_number.is_none() {
                    return Err(LowerError::MalformedSplit(
                        "bucket conversion requires a table bucket number".to_string(),
                    ));
                }
                let mut handles = Vec::with_capacity(conversion.bucket_column_handles.len());
                for handle in &conversion.bucket_column_handles {
                    handles.push(column_handle_from_wire(handle)?);
                }
                Some(HiveBucketConversion {
                    table_bucket_count: conversion.table_bucket_count,
                    partition_bucket_count: conversion.partition_bucket_count,
                    bucket_column_handles: handles,
                })
            }
            None => None,
        };

        Ok(ExecConnectorSplit::Hive(HiveConnectorSplit {
            connector_id: split.connector_id.clone(),
            path: file_split.path.clone(),
            file_format,
            start,
            length,
            partition_keys,
            table_bucket_number: hive_split.table_bucket_number,
            custom_split_info: file_split.custom_split_info.clone(),
            extra_file_info,
            serde_parameters: hive_split.storage.serde_parameters.clone(),
            split_weight: hive_split.split_weight,
            cacheable: split.split_context.cacheable,
            info_columns,
            bucket_conversion,
        }))
    }
}
