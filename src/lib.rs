// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

#![allow(clippy::module_name_repetitions)]

use anyhow::{Context, Result};
use mosaic::{Assembled, Assembler, MediaGraph, Topology};

pub mod settings;

use settings::Settings;

/// Build the whole mixer described by `settings` within `graph`.
///
/// # Errors
///
/// Fails if the settings are invalid or any source can not be wired.
pub async fn assemble<G: MediaGraph>(graph: G, settings: &Settings) -> Result<Assembled<G>> {
    settings.validate().context("invalid settings")?;

    let mut assembler = Assembler::create(graph, settings.canvas, settings.output)?;
    let sources = assembler
        .discover(settings.sources.clone())
        .collect::<Result<Vec<_>>>()
        .context("unable to create sources")?;
    log::info!("discovered {} sources", sources.len());

    assembler
        .assemble(sources)
        .await
        .context("unable to assemble media graph")
}

/// Assemble the mixer without any media engine and return the topology dump.
///
/// # Errors
///
/// Fails like [`assemble`].
pub async fn dry_run(settings: &Settings) -> Result<String> {
    let assembled = assemble(Topology::new(), settings).await?;
    Ok(assembled.describe())
}

/// Assemble the mixer as `GStreamer` pipeline and play it until `shutdown` completes.
///
/// # Errors
///
/// Fails if the pipeline can not be assembled or started.
#[cfg(feature = "gstreamer")]
pub async fn run(
    settings: &Settings,
    shutdown: impl std::future::Future<Output = Result<()>>,
) -> Result<()> {
    let assembled = assemble(mosaic::GstGraph::new("videomix"), settings).await?;
    log::debug!("assembled media graph:\n{}", assembled.describe());

    let graph = assembled.into_graph();
    mosaic::graph::debug::debug_dot(graph.pipeline(), "ASSEMBLED");
    graph.play().context("unable to start media graph")?;

    let result = shutdown.await;
    log::info!("stopping media graph");
    drop(graph);

    result
}
