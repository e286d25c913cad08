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
//! Remote exchange split translation.

use crate::connector::SplitTranslator;
use crate::exec::split::ExecConnectorSplit;
use crate::lower::error::LowerError;
use crate::protocol;

/// Engine-side form of a split that reads another task's output buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct RemoteExchangeSplit {
    pub task_location: String,
}

#[derive(Clone, Debug, Default)]
pub struct RemoteSplitTranslator;

impl SplitTranslator for RemoteSplitTranslator {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn translate_split(
        &self,
        split: &protocol::Split,
    ) -> Result<ExecConnectorSplit, LowerError> {
        let protocol::ConnectorSplit::Remote(remote) = &split.connector_split else {
            return Err(LowerError::InvalidSplitType {
                connector_id: split.connector_id.clone(),
                expected: self.name(),
            });
        };
        Ok(ExecConnectorSplit::Remote(RemoteExchangeSplit {
            task_location: remote.location.location.clone(),
        }))
    }
}
