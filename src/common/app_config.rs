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
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

static CONFIG: OnceLock<VivaceConfig> = OnceLock::new();

fn default_log_level() -> String {
    "info".to_string()
}

pub fn init_from_path(path: impl AsRef<Path>) -> Result<&'static VivaceConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let cfg = VivaceConfig::load_from_file(path.as_ref())?;
    let _ = CONFIG.set(cfg);
    Ok(CONFIG.get().expect("CONFIG set"))
}

pub fn init_from_env_or_default() -> Result<&'static VivaceConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let path = config_path_from_env_or_default()?;
    let cfg = VivaceConfig::load_from_file(&path)?;
    let _ = CONFIG.set(cfg);
    Ok(CONFIG.get().expect("CONFIG set"))
}

pub fn config() -> Result<&'static VivaceConfig> {
    init_from_env_or_default()
}

fn config_path_from_env_or_default() -> Result<PathBuf> {
    if let Ok(p) = std::env::var("VIVACE_CONFIG") {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p));
        }
    }

    let default = PathBuf::from("vivace.toml");
    if default.exists() {
        return Ok(default);
    }

    Err(anyhow!(
        "missing config file: set $VIVACE_CONFIG or create ./vivace.toml"
    ))
}

#[derive(Clone, Deserialize)]
pub struct VivaceConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional full tracing EnvFilter expression.
    /// If set, this takes precedence over `log_level`.
    /// Example: "vivace=debug,hyper=off"
    #[serde(default)]
    pub log_filter: Option<String>,

    /// Connector wiring consumed by `ConnectorRegistry::from_config`.
    #[serde(default = "default_connectors")]
    pub connectors: Vec<ConnectorConfig>,
}

impl VivaceConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let cfg: VivaceConfig =
            toml::from_str(&s).with_context(|| format!("parse toml: {}", path.display()))?;
        Ok(cfg)
    }

    pub fn tracing_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(&self.log_level)
    }
}

impl Default for VivaceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_filter: None,
            connectors: default_connectors(),
        }
    }
}

/// Binds one connector id to a translator kind (`hive` or `remote`).
#[derive(Clone, Debug, Deserialize)]
pub struct ConnectorConfig {
    pub id: String,
    pub kind: String,
}

fn default_connectors() -> Vec<ConnectorConfig> {
    vec![
        ConnectorConfig {
            id: "hive".to_string(),
            kind: "hive".to_string(),
        },
        ConnectorConfig {
            id: "$remote".to_string(),
            kind: "remote".to_string(),
        },
    ]
}
