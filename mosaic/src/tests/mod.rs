// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

mod assembler;
mod layout;
mod resolution;

pub mod testing {

    use crate::*;
    use std::sync::Once;

    /// Canvas used when a test does not care about its size
    pub const CANVAS: Size = Size::MONITOR;

    /// Amount of sources property tests go up to.
    pub const MAX_SOURCES: usize = 100;

    /// Tolerance for comparing computed pixel values
    pub const EPSILON: f64 = 1e-9;

    static INIT: Once = Once::new();

    /// initialize for testing
    pub fn init() {
        INIT.call_once(|| {
            env_logger::builder().is_test(true).try_init().ok();
        });
        trace!("init()");
    }

    /// Source sizes which repeat a set of common resolutions.
    pub fn mixed_sizes(count: usize) -> Vec<Size> {
        let resolutions = [Size::SD, Size::HD, Size::FHD, Size::UHD, Size::new(480, 640)];
        (0..count)
            .map(|i| resolutions[i % resolutions.len()])
            .collect()
    }

    /// Configuration of `count` test pattern sources.
    pub fn test_specs(count: usize) -> Vec<SourceSpec> {
        (0..count)
            .map(|_| {
                SourceSpec::new(SourceLocator::Test {
                    pattern: Pattern::default(),
                })
            })
            .collect()
    }

    /// Assembler on an in-memory topology which swallows all output.
    pub fn topology_assembler(canvas: Size) -> Assembler<Topology> {
        let outputs = Outputs {
            live: SinkKind::Fake,
            mosaic: SinkKind::Fake,
        };
        match Assembler::create(Topology::new(), canvas, outputs) {
            Ok(assembler) => assembler,
            Err(err) => panic!("unable to create assembler: {err:?}"),
        }
    }

    /// Approximate float comparison
    pub fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }
}
