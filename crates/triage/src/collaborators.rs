// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator implementations wired in by the binary.

use triage_config::TriageConfig;
use triage_core::{ProjectId, ProjectLocator, SettingsProvider};

/// Settings backed by the loaded configuration.
pub struct ConfigSettings {
    api_key: Option<String>,
}

impl ConfigSettings {
    pub fn new(config: &TriageConfig) -> Self {
        Self {
            api_key: config.openrouter.api_key.clone(),
        }
    }
}

impl SettingsProvider for ConfigSettings {
    fn api_key(&self) -> Option<String> {
        self.api_key.clone()
    }
}

/// Derives the project identifier from the working directory name, falling
/// back to "default" when the directory cannot be resolved.
pub struct CwdProject;

impl ProjectLocator for CwdProject {
    fn active_project(&self) -> ProjectId {
        let name = std::env::current_dir()
            .ok()
            .and_then(|dir| {
                dir.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "default".to_string());
        ProjectId(name)
    }
}
