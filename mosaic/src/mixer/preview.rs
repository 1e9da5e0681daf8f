// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use anyhow::{Context, Result};

use crate::{
    Endpoint, Fill, MediaGraph, NodeKind, Placement, Size, SourceId, TextStyle, VideoCaps,
};

/// Width of the highlight frame in pixels.
pub const HIGHLIGHT_INSET: u32 = 5;

/// Highlight inset which leaves at least one pixel of a `size` picture.
fn highlight_inset(size: Size) -> u32 {
    let fitting = (size.width.min(size.height).saturating_sub(1) / 2) as u32;
    HIGHLIGHT_INSET.min(fitting)
}

/// Per source chain which shrinks a video into its mosaic cell.
///
/// Stages in order: scale to the placement size, crop the highlight inset,
/// draw the highlight border into the inset, label with the source index and
/// a pass-through output. Without highlight the inset is zero and crop and
/// border are no-ops, so every chain has the same shape.
#[derive(Debug)]
pub struct PreviewChain {
    input: Endpoint,
    output: Endpoint,
}

impl PreviewChain {
    /// Create the preview chain of `owner` for its computed `placement`.
    ///
    /// # Errors
    ///
    /// Fails if a node can not be created or linked.
    pub fn create(
        graph: &mut impl MediaGraph,
        owner: &SourceId,
        placement: &Placement,
        highlighted: bool,
        label: &TextStyle,
    ) -> Result<Self> {
        let view = placement.rect.view();
        // a scaler can not produce empty frames
        let size = Size::new(view.size.width.max(1), view.size.height.max(1));
        let inset = if highlighted {
            let inset = highlight_inset(size);
            if inset < HIGHLIGHT_INSET {
                warn!("preview of '{owner}' is too small for a full highlight, using {inset} pixels");
            }
            inset
        } else {
            0
        };
        debug!("creating preview of '{owner}' with size {size} and inset {inset}");

        let nodes = graph
            .create_nodes(
                owner.as_str(),
                vec![
                    ("preview-scale", NodeKind::VideoScale),
                    ("preview-caps", NodeKind::CapsFilter(VideoCaps::sized(size))),
                    ("preview-crop", NodeKind::Crop { inset }),
                    (
                        "preview-border",
                        NodeKind::Border {
                            width: inset,
                            fill: Fill::Red,
                        },
                    ),
                    (
                        "preview-label",
                        NodeKind::TextOverlay {
                            text: placement.index.to_string(),
                            style: *label,
                        },
                    ),
                    ("preview-out", NodeKind::Identity),
                ],
            )
            .context("unable to create preview chain")?;
        graph
            .link_many(&nodes.iter().collect::<Vec<_>>())
            .with_context(|| format!("unable to link preview chain of '{owner}'"))?;

        let (first, last) = (&nodes[0], &nodes[nodes.len() - 1]);
        Ok(Self {
            input: first.sink()?,
            output: last.src()?,
        })
    }

    #[must_use]
    pub fn input(&self) -> &Endpoint {
        &self.input
    }

    #[must_use]
    pub fn output(&self) -> &Endpoint {
        &self.output
    }
}
