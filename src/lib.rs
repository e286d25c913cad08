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
//! Split translation for a native query execution worker.
//!
//! The coordinator assigns work to tasks as [`protocol::ScheduledSplit`]s.
//! [`lower_scheduled_split`] dispatches each one through the
//! [`ConnectorRegistry`] to the translator registered for its connector id
//! and produces the [`exec::split`] representation the engine consumes.

pub mod common;
pub mod connector;
pub mod exec;
pub mod lower;
pub mod protocol;

// Worker-style folder layout, with `vivace_*` convenience aliases.
pub use common::app_config as vivace_config;
pub use common::logging as vivace_logging;
pub use connector as vivace_connectors;

pub use connector::{ConnectorRegistry, RegistryError, SplitTranslator};
pub use exec::split::{ExecConnectorSplit, ExecScheduledSplit, ExecSplit, TASK_WIDE_GROUP_ID};
pub use lower::{LowerError, arrow_type_from_signature, lower_scheduled_split};
