// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

/*!
    # Purpose
    The *mosaic* crate builds the media graph of a live video mixer which shows
    an arbitrary number of cameras side by side in a so-called *monitor mosaic*
    while every camera is also fed into the live mixer.

    It computes a grid layout which fits all sources into a fixed canvas and
    wires every source through a *distributor* into both consumers.

    # Layout

    - [compute_layout]
      places N sources of arbitrary size into a near-square [Grid] of equal
      cells, scaled to fit and centered (see [Placement]).

    # Graph construction

    The graph is never described as text. Nodes are typed ([NodeKind]) and
    validated when they get created, links connect typed [Endpoint]s.

    - [MediaGraph]
      is the construction interface of a media engine.
    - [Topology]
      records the graph in memory. Used for dry runs and tests.
    - `GstGraph`
      realizes the graph as a [GStreamer](https://gstreamer.freedesktop.org/)
      pipeline (feature `gstreamer`).

    # Assembly

    - [SourceSpec]
      configures a camera, file or test source.
    - [SourceDescriptor]
      is a created source whose dimensions may still be pending.
    - [Distributor]
      splits one source into a live and a monitor branch.
    - [PreviewChain]
      scales, highlights and labels a source for its mosaic cell.
    - [Assembler]
      owns the graph and puts everything together.

    # Debugging

    - [Topology] and [`MediaGraph::describe`] dump all nodes and links.
    - With feature `gstreamer` the `debug` module writes DOT files if
      `GST_DEBUG_DUMP_DOT_DIR` is set.
*/

#![allow(clippy::module_name_repetitions)]

#[macro_use]
extern crate log;

mod error;
pub mod graph;
pub mod layout;
mod mixer;
mod sources;

#[cfg(test)]
mod tests;

pub use error::*;
pub use graph::*;
pub use layout::*;
pub use mixer::*;
pub use sources::{
    DimensionsResolver, SourceDescriptor, SourceId, SourceLocator, SourceSpec,
};

#[cfg(test)]
pub use tests::testing;
