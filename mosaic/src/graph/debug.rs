// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! DOT snapshots of the media graph.
//!
//! Files land in `GST_DEBUG_DUMP_DOT_DIR` as `<index>-<pipeline>-<stage>.dot`.

use std::sync::atomic::{AtomicUsize, Ordering};

use gst::{prelude::*, DebugGraphDetails};

static SNAPSHOTS: AtomicUsize = AtomicUsize::new(0);

/// What a snapshot contains and how it is named.
pub struct Params {
    pub details: DebugGraphDetails,
    /// Prefix file names with a running snapshot number
    pub index: bool,
}

impl Params {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            details: DebugGraphDetails::ALL,
            index: true,
        }
    }

    /// Element names and caps only, enough to check the mosaic wiring.
    #[must_use]
    pub const fn wiring() -> Self {
        Self {
            details: DebugGraphDetails::CAPS_DETAILS,
            index: true,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::all()
    }
}

/// Snapshot `element` only when debug logging is enabled.
pub fn debug_dot(element: &impl IsA<gst::Element>, stage: &str) {
    if log_enabled!(log::Level::Debug) {
        dot(element, stage);
    }
}

pub fn dot(element: &impl IsA<gst::Element>, stage: &str) {
    dot_ext(element, stage, &Params::default());
}

/// Snapshot the top level bin containing `element`.
pub fn dot_ext(element: &impl IsA<gst::Element>, stage: &str, params: &Params) {
    let Ok(dir) = std::env::var("GST_DEBUG_DUMP_DOT_DIR") else {
        return;
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("no DOT snapshot of '{stage}', unable to create '{dir}': {e}");
        return;
    }

    let Some(bin) = top_level_bin(element.upcast_ref()) else {
        warn!("no DOT snapshot of '{stage}', element is not inside a bin");
        return;
    };

    let name = if params.index {
        let index = SNAPSHOTS.fetch_add(1, Ordering::SeqCst);
        format!("{index}-{}-{stage}", bin.name())
    } else {
        format!("{}-{stage}", bin.name())
    };
    debug!("writing DOT snapshot '{dir}/{name}.dot'");

    gst::debug_bin_to_dot_file(&bin, params.details, name);
}

fn top_level_bin(element: &gst::Element) -> Option<gst::Bin> {
    let mut top = element.clone();
    while let Some(parent) = top.parent() {
        top = parent.downcast::<gst::Element>().ok()?;
    }
    top.downcast::<gst::Bin>().ok()
}
