// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    Background, MediaGraph, NodeHandle, NodeKind, Pattern, Position, SinkKind, Size, VideoCaps,
};

/// Owner of the live mixer nodes.
pub const LIVE: &str = "live";
/// Owner of the monitor mosaic nodes.
pub const MOSAIC: &str = "mosaic";

/// Grey shown wherever no source covers the mosaic.
const MOSAIC_BACKGROUND: u32 = 0xFF80_8080;

/// Where the two outputs of the mixer go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub live: SinkKind,
    #[serde(default)]
    pub mosaic: SinkKind,
}

/// Shared consumers all sources are attached to.
#[derive(Debug)]
pub(crate) struct Mixers {
    pub live_video: NodeHandle,
    pub live_audio: NodeHandle,
    pub mosaic: NodeHandle,
}

impl Mixers {
    /// Create the live mixer and the mosaic compositor including their outputs.
    ///
    /// The mosaic gets a solid background of the canvas size as its first input.
    pub(crate) fn create(
        graph: &mut impl MediaGraph,
        canvas: Size,
        outputs: Outputs,
    ) -> Result<Self> {
        debug!(
            "creating mixers, live output: {:?}, mosaic output: {:?}",
            outputs.live, outputs.mosaic
        );

        let live = graph
            .create_nodes(
                LIVE,
                vec![
                    (
                        "video-mixer",
                        NodeKind::Compositor {
                            background: Background::Black,
                        },
                    ),
                    ("video-sink", NodeKind::VideoSink(outputs.live)),
                    ("audio-selector", NodeKind::InputSelector),
                    ("audio-sink", NodeKind::AudioSink(outputs.live)),
                ],
            )
            .context("unable to create live mixer")?;
        let [live_video, live_video_sink, live_audio, live_audio_sink]: [NodeHandle; 4] = live
            .try_into()
            .map_err(|_| anyhow::anyhow!("live mixer is incomplete"))?;
        graph
            .link_many(&[&live_video, &live_video_sink])
            .context("unable to link live video output")?;
        graph
            .link_many(&[&live_audio, &live_audio_sink])
            .context("unable to link live audio output")?;

        let mosaic = graph
            .create_nodes(
                MOSAIC,
                vec![
                    (
                        "background",
                        NodeKind::TestVideo {
                            pattern: Pattern::SolidColor,
                            foreground: Some(MOSAIC_BACKGROUND),
                        },
                    ),
                    ("background-caps", NodeKind::CapsFilter(VideoCaps::sized(canvas))),
                    (
                        "compositor",
                        NodeKind::Compositor {
                            background: Background::Black,
                        },
                    ),
                    ("sink", NodeKind::VideoSink(outputs.mosaic)),
                ],
            )
            .context("unable to create mosaic")?;
        let [background, background_caps, compositor, sink]: [NodeHandle; 4] = mosaic
            .try_into()
            .map_err(|_| anyhow::anyhow!("mosaic is incomplete"))?;

        graph
            .link_many(&[&background, &background_caps])
            .context("unable to link mosaic background")?;
        let background_input = graph
            .request_positioned_endpoint(&compositor, Position::ORIGIN)
            .context("unable to request mosaic background input")?;
        graph
            .link(&background_caps.src()?, &background_input)
            .context("unable to link mosaic background into the compositor")?;
        graph
            .link_many(&[&compositor, &sink])
            .context("unable to link mosaic output")?;

        Ok(Self {
            live_video,
            live_audio,
            mosaic: compositor,
        })
    }
}
