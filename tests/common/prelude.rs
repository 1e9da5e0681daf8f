// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

#![allow(unused_imports)]

pub(crate) use crate::common::{init_logger, test_sources, ConfigFile};
pub(crate) use mosaic::{Size, SourceLocator};
pub(crate) use videomix::settings::Settings;
