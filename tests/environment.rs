// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

mod common;

// Own test binary, environment variables are process wide.
#[cfg(test)]
mod tests {

    use std::env;

    use crate::common::prelude::*;
    use mosaic::SinkKind;

    #[test]
    fn test_env_vars_overwrite_config() {
        init_logger();

        let config = ConfigFile::new("[canvas]\nwidth = 1280\nheight = 720\n");

        let settings = config.load().unwrap();
        assert_eq!(settings.canvas, Size::HD);

        env::set_var("VIDEOMIX__CANVAS__WIDTH", "1920");
        env::set_var("VIDEOMIX__OUTPUT__MOSAIC", "fake");

        let settings = config.load().unwrap();
        assert_eq!(settings.canvas, Size::new(1920, 720));
        assert_eq!(settings.output.mosaic, SinkKind::Fake);
        assert_eq!(settings.output.live, SinkKind::Display);

        env::set_var("VIDEOMIX__CANVAS__HEIGHT", "0");
        assert!(config.load().is_err());
    }
}
