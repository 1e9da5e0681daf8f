// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use config::{Config, ConfigError, Environment, File, FileFormat};
use mosaic::{Outputs, Size, SourceSpec};
use serde::Deserialize;

fn default_canvas() -> Size {
    Size::MONITOR
}

/// Mixer configuration.
///
/// Every field can be overwritten with environment variables prefixed by
/// `VIDEOMIX` using `__` as separator, e.g. `VIDEOMIX__CANVAS__WIDTH=1280`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Size of the monitor mosaic.
    #[serde(default = "default_canvas")]
    pub canvas: Size,

    #[serde(default)]
    pub output: Outputs,

    /// Sources in the order they appear within the mosaic.
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas: default_canvas(),
            output: Outputs::default(),
            sources: Vec::new(),
        }
    }
}

impl Settings {
    /// Creates a new Settings instance from the provided TOML file.
    pub fn load(file_name: &str) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::new(file_name, FileFormat::Toml))
            .add_source(Environment::with_prefix("VIDEOMIX").separator("__"))
            .build()?
            .try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    /// Reject settings no mixer can be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.canvas.is_positive() {
            return Err(ConfigError::Message(format!(
                "canvas {} must not be empty",
                self.canvas
            )));
        }
        if let Some(spec) = self
            .sources
            .iter()
            .find(|spec| !spec.resolution().is_positive())
        {
            return Err(ConfigError::Message(format!(
                "resolution {} of source {} must not be empty",
                spec.resolution(),
                spec.locator
            )));
        }

        Ok(())
    }
}
