// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Camera inputs normalized to a fixed video size.
//!
//! Forcing the output size means everything behind a camera knows its
//! dimensions even before the first frame was decoded.

use anyhow::{Context, Result};

use crate::{Endpoint, MediaGraph, NodeKind, Size, SourceId, SourceLocator, VideoCaps};

const FRAMERATE: (i32, i32) = (25, 1);
const TEST_AUDIO_VOLUME: f64 = 0.01;

/// Create the nodes of a camera input.
///
/// Returns the video output and, if present, the audio output.
pub(crate) fn create_camera(
    graph: &mut impl MediaGraph,
    id: &SourceId,
    locator: &SourceLocator,
    resolution: Size,
) -> Result<(Endpoint, Option<Endpoint>)> {
    trace!("create_camera( {id}, {locator}, {resolution} )");

    let owner = id.as_str();
    let caps = NodeKind::CapsFilter(VideoCaps {
        size: resolution,
        framerate: Some(FRAMERATE),
    });

    let (video_input, audio_input) = match locator {
        SourceLocator::Uri { uri } => {
            let nodes = graph
                .create_nodes(
                    owner,
                    vec![
                        ("decode", NodeKind::UriDecode { uri: uri.clone() }),
                        ("audioconvert", NodeKind::AudioConvert),
                    ],
                )
                .context("unable to create uri decoder")?;
            let (decode, audioconvert) = (&nodes[0], &nodes[1]);
            graph
                .link(&decode.pad("audio"), &audioconvert.sink()?)
                .context("unable to link decoded audio")?;
            (decode.pad("video"), audioconvert.src()?)
        }
        SourceLocator::Decklink { device, mode } => {
            let nodes = graph
                .create_nodes(
                    owner,
                    vec![
                        (
                            "video-input",
                            NodeKind::DeckLinkVideo {
                                device: *device,
                                mode: *mode,
                            },
                        ),
                        ("audio-input", NodeKind::DeckLinkAudio { device: *device }),
                        ("audioconvert", NodeKind::AudioConvert),
                    ],
                )
                .context("unable to create decklink inputs")?;
            graph
                .link_many(&[&nodes[1], &nodes[2]])
                .context("unable to link decklink audio")?;
            (nodes[0].src()?, nodes[2].src()?)
        }
        SourceLocator::Test { pattern } => {
            let nodes = graph
                .create_nodes(
                    owner,
                    vec![
                        (
                            "video-input",
                            NodeKind::TestVideo {
                                pattern: *pattern,
                                foreground: None,
                            },
                        ),
                        (
                            "audio-input",
                            NodeKind::TestAudio {
                                volume: TEST_AUDIO_VOLUME,
                            },
                        ),
                        ("audioconvert", NodeKind::AudioConvert),
                    ],
                )
                .context("unable to create test inputs")?;
            graph
                .link_many(&[&nodes[1], &nodes[2]])
                .context("unable to link test audio")?;
            (nodes[0].src()?, nodes[2].src()?)
        }
    };

    // video_src is the named output every consumer links to
    let nodes = graph
        .create_nodes(
            owner,
            vec![
                ("videoconvert", NodeKind::VideoConvert),
                ("videoscale", NodeKind::VideoScale),
                ("videorate", NodeKind::VideoRate),
                ("caps", caps),
                ("video_src", NodeKind::Identity),
            ],
        )
        .context("unable to create video normalization")?;
    graph
        .link(&video_input, &nodes[0].sink()?)
        .context("unable to link video input")?;
    graph
        .link_many(&nodes.iter().collect::<Vec<_>>())
        .context("unable to link video normalization")?;

    Ok((nodes[4].src()?, Some(audio_input)))
}
