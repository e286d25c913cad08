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
use thiserror::Error;

/// Errors raised while lowering a coordinator split to its internal form.
///
/// Every variant fails the whole split; there is no partial lowering and no
/// local recovery. The caller reports the error against the owning task.
#[derive(Debug, Error)]
pub enum LowerError {
    /// No translator is registered for the split's connector id.
    #[error("unknown split connector: {0}")]
    UnsupportedConnector(String),

    /// The connector split payload does not match the translator bound to
    /// the connector id. This is a registration bug, not bad input data.
    #[error("connector {connector_id} received a split that is not a {expected} split")]
    InvalidSplitType {
        connector_id: String,
        expected: &'static str,
    },

    /// A type signature string could not be resolved to an internal type.
    #[error("cannot resolve type signature '{signature}': {detail}")]
    TypeMapping { signature: String, detail: String },

    /// A column handle carried a column type tag with no internal mapping.
    #[error("unsupported hive column type: {0}")]
    UnsupportedColumnType(&'static str),

    /// Base64 payload on the split failed to decode.
    #[error("malformed extra file info: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The split violates a structural invariant of its own wire type.
    #[error("malformed split: {0}")]
    MalformedSplit(String),

    /// The storage descriptor names an input format / serde combination the
    /// engine cannot read.
    #[error("unsupported storage format: input_format={input_format} serde={serde}")]
    UnsupportedFileFormat { input_format: String, serde: String },
}
