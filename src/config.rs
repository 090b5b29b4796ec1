// Copyright 2026 The wordmill authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Collection configuration, read from an optional `wordmill.toml` in
//! the collection directory.

use std::path::Path;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "wordmill.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub learn: LearnConfig,
    #[serde(default)]
    pub review: ReviewConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LearnConfig {
    /// How many new cards a single `learn` session introduces.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewConfig {
    /// Port the review server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whether the review queue is shuffled at session start.
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

fn default_batch_size() -> usize {
    20
}

fn default_port() -> u16 {
    8000
}

fn default_shuffle() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            learn: LearnConfig::default(),
            review: ReviewConfig::default(),
        }
    }
}

impl Default for LearnConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            shuffle: default_shuffle(),
        }
    }
}

/// Read the configuration from `directory`, falling back to the
/// defaults when no config file exists.
pub fn load_config(directory: &Path) -> Fallible<Config> {
    let path = directory.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| ErrorReport::new(format!("{}: {}", path.display(), e)))?;
    Ok(config)
}
