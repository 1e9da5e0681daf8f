// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Errors of graph construction.

use crate::{MediaKind, Size};

/// Failure while building the media graph.
///
/// Every variant is a configuration error: the graph can not be built as
/// described and nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("there is no node named '{0}'")]
    UnknownNode(String),

    #[error("a node named '{0}' already exists")]
    DuplicateNode(String),

    #[error("node '{node}' has no pad '{pad}'")]
    UnknownPad { node: String, pad: String },

    #[error("pad '{0}' is already linked")]
    AlreadyLinked(String),

    #[error("unable to link '{src}' with '{sink}': {reason}")]
    IncompatibleLink {
        src: String,
        sink: String,
        reason: String,
    },

    #[error("{media} stream of '{src}' can not be linked into {expected} input '{sink}'")]
    MediaMismatch {
        src: String,
        sink: String,
        media: MediaKind,
        expected: MediaKind,
    },

    #[error("invalid parameter for {factory} '{node}': {reason}")]
    InvalidParameter {
        node: String,
        factory: &'static str,
        reason: String,
    },

    #[error("node '{node}' offers no request pads of template '{template}'")]
    NoRequestPad { node: String, template: String },

    #[error("source '{source_id}' reported invalid dimensions {size}")]
    InvalidDimensions { source_id: String, size: Size },

    #[error("media engine failure on '{node}': {reason}")]
    Engine { node: String, reason: String },
}
