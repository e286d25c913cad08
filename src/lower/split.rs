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
use crate::connector::ConnectorRegistry;
use crate::exec::split::{ExecScheduledSplit, ExecSplit, TASK_WIDE_GROUP_ID};
use crate::lower::error::LowerError;
use crate::protocol::{Lifespan, ScheduledSplit};
use crate::vivace_logging::debug;

/// Lower a coordinator split assignment to its engine-side form.
///
/// Dispatches on the split's connector id through `registry` and wraps the
/// translated payload with the scheduling metadata. The input is not
/// mutated; translating the same split twice yields equal results.
pub fn lower_scheduled_split(
    registry: &ConnectorRegistry,
    scheduled: &ScheduledSplit,
) -> Result<ExecScheduledSplit, LowerError> {
    let split = &scheduled.split;
    let translator = registry.lookup(&split.connector_id)?;
    let connector_split = translator.translate_split(split)?;
    let group_id = match split.lifespan {
        Lifespan::TaskWide => TASK_WIDE_GROUP_ID,
        Lifespan::Group(id) => id,
    };
    debug!(
        "lowered split: connector={} plan_node={} sequence={} group={}",
        split.connector_id, scheduled.plan_node_id, scheduled.sequence_id, group_id
    );
    Ok(ExecScheduledSplit {
        sequence_id: scheduled.sequence_id,
        plan_node_id: scheduled.plan_node_id.clone(),
        split: ExecSplit {
            group_id,
            connector_split,
        },
    })
}
