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
//! Wire shapes of the file-table (hive) connector split.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One scannable section of a table: a byte range of a file plus the
/// partition, bucketing and storage metadata needed to read it.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveSplit {
    pub file_split: HiveFileSplit,
    pub storage: Storage,
    #[serde(default)]
    pub partition_keys: Vec<HivePartitionKey>,
    #[serde(default)]
    pub table_bucket_number: Option<i32>,
    #[serde(default)]
    pub bucket_conversion: Option<BucketConversion>,
    #[serde(default)]
    pub split_weight: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveFileSplit {
    pub path: String,
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub length: i64,
    #[serde(default)]
    pub file_size: i64,
    #[serde(default)]
    pub file_modified_time: i64,
    #[serde(default)]
    pub custom_split_info: HashMap<String, String>,
    /// Base64-encoded opaque reader payload.
    #[serde(default)]
    pub extra_file_info: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Storage {
    pub storage_format: StorageFormat,
    #[serde(default)]
    pub serde_parameters: HashMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageFormat {
    #[serde(default, rename = "serDe")]
    pub serde: String,
    #[serde(default)]
    pub input_format: String,
    #[serde(default)]
    pub output_format: String,
}

/// `value: None` is a SQL NULL partition value, distinct from empty string.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HivePartitionKey {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Instruction to read a partition bucketed at a coarser count than the
/// table and re-bucket rows on the listed columns.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketConversion {
    pub table_bucket_count: i32,
    pub partition_bucket_count: i32,
    #[serde(default)]
    pub bucket_column_handles: Vec<HiveColumnHandle>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveColumnHandle {
    pub name: String,
    pub hive_type: String,
    pub type_signature: String,
    pub column_type: HiveColumnType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HiveColumnType {
    PartitionKey,
    Regular,
    Synthesized,
    Aggregated,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveTransactionHandle {
    #[serde(default)]
    pub uuid: Option<String>,
}
