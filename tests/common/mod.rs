// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

#![allow(dead_code)]

use std::io::Write;

use config::ConfigError;
use tempfile::NamedTempFile;
use videomix::settings::Settings;

pub(crate) mod prelude;

/// Configuration written into a temporary TOML file.
pub(crate) struct ConfigFile {
    file: NamedTempFile,
}

impl ConfigFile {
    pub(crate) fn new(content: &str) -> Self {
        let mut file = tempfile::Builder::new()
            .prefix("videomix-")
            .suffix(".toml")
            .tempfile()
            .expect("unable to create temporary config file");
        file.write_all(content.as_bytes())
            .expect("unable to write temporary config file");

        Self { file }
    }

    pub(crate) fn path(&self) -> &str {
        self.file
            .path()
            .to_str()
            .expect("temporary path is not valid UTF-8")
    }

    pub(crate) fn load(&self) -> Result<Settings, ConfigError> {
        Settings::load(self.path())
    }
}

/// Configuration of `count` unnamed test sources.
pub(crate) fn test_sources(count: usize) -> String {
    (0..count).fold(String::new(), |config, _| {
        config + "[[sources]]\ntype = \"test\"\n\n"
    })
}

pub(crate) fn init_logger() {
    env_logger::builder().is_test(true).try_init().ok();
}
