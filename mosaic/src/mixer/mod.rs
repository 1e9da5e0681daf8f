// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Assembly of the live mixer and the monitor mosaic.

mod distributor;
mod monitor;
mod preview;

pub use distributor::*;
pub use monitor::{Outputs, LIVE, MOSAIC};
pub use preview::*;

use anyhow::{Context, Result};
use futures::future::join_all;

use crate::sources::create_camera;
use crate::{
    compute_layout, GridShape, MediaGraph, Placement, Size, SourceDescriptor, SourceId,
    SourceSpec, TextStyle,
};
use monitor::Mixers;

/// Builds the media graph of the mixer.
///
/// The assembler owns the graph for the whole construction. Sources are added
/// first, then [`Assembler::assemble`] waits until all of them know their
/// dimensions, lays them out and attaches them to the live mixer and the
/// mosaic.
#[derive(Debug)]
pub struct Assembler<G: MediaGraph> {
    graph: G,
    canvas: Size,
    mixers: Mixers,
    label_style: TextStyle,
}

impl<G: MediaGraph> Assembler<G> {
    /// Create the live mixer and the empty mosaic within `graph`.
    ///
    /// # Errors
    ///
    /// Fails if the mixer nodes can not be created or linked.
    pub fn create(mut graph: G, canvas: Size, outputs: Outputs) -> Result<Self> {
        info!("creating mixer with a {canvas} monitor");

        let mixers =
            Mixers::create(&mut graph, canvas, outputs).context("unable to create mixers")?;

        Ok(Self {
            graph,
            canvas,
            mixers,
            label_style: TextStyle::default(),
        })
    }

    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    #[must_use]
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Create the input nodes of a configured source.
    ///
    /// The source output is forced to its configured resolution, so the
    /// returned descriptor is already resolved.
    ///
    /// # Errors
    ///
    /// Fails if the source nodes can not be created or linked.
    pub fn add_source(&mut self, id: SourceId, spec: &SourceSpec) -> Result<SourceDescriptor> {
        let resolution = spec.resolution();
        info!("adding source '{id}' from {} at {resolution}", spec.locator);

        let (video, audio) = create_camera(&mut self.graph, &id, &spec.locator, resolution)
            .with_context(|| format!("unable to create source '{id}'"))?;

        Ok(SourceDescriptor::resolved(id, video, audio, resolution).highlight(spec.highlight))
    }

    /// Add all configured sources in order.
    ///
    /// The returned iterator creates one source per step and is exhausted
    /// after the last one. Enumerating again needs another call.
    pub fn discover(&mut self, specs: Vec<SourceSpec>) -> Discovery<'_, G> {
        Discovery {
            assembler: self,
            specs: specs.into_iter().enumerate(),
        }
    }

    /// Wait until all `sources` are resolved and wire them into the mixers.
    ///
    /// Sources keep their input order within the mosaic regardless of the
    /// order they resolve in. A source which never resolves blocks forever.
    ///
    /// # Errors
    ///
    /// Fails on the first source which can not be attached. The underlying
    /// [`crate::GraphError`] is part of the error chain.
    pub async fn assemble(mut self, mut sources: Vec<SourceDescriptor>) -> Result<Assembled<G>> {
        info!("waiting for {} sources to resolve", sources.len());
        let sizes = join_all(sources.iter_mut().map(|source| source.resolution())).await;

        let placements = compute_layout(&sizes, self.canvas);
        let shape = GridShape::for_sources(sources.len());

        for (source, placement) in sources.iter().zip(&placements) {
            self.attach(source, placement)
                .with_context(|| format!("unable to attach source '{}'", source.id()))?;
        }

        Ok(Assembled {
            graph: self.graph,
            canvas: self.canvas,
            shape,
            placements: sources
                .into_iter()
                .map(|source| source.id().clone())
                .zip(placements)
                .collect(),
        })
    }

    fn attach(&mut self, source: &SourceDescriptor, placement: &Placement) -> Result<()> {
        let id = source.id();
        debug!("attaching source '{id}' at {}", placement.rect.view().pos);

        let distributor = Distributor::create(&mut self.graph, id, source.video())?;

        let live = self
            .graph
            .request_endpoint(&self.mixers.live_video, "sink_%u")
            .context("unable to request live video input")?;
        self.graph
            .link(&distributor.live()?, &live)
            .context("unable to link live video")?;

        if let Some(audio) = source.audio() {
            let selector = self
                .graph
                .request_endpoint(&self.mixers.live_audio, "sink_%u")
                .context("unable to request live audio input")?;
            self.graph
                .link(audio, &selector)
                .context("unable to link live audio")?;
        }

        let preview = PreviewChain::create(
            &mut self.graph,
            id,
            placement,
            source.is_highlighted(),
            &self.label_style,
        )?;
        self.graph
            .link(&distributor.monitor()?, preview.input())
            .context("unable to link preview")?;

        let view = placement.rect.view();
        let cell = self
            .graph
            .request_positioned_endpoint(&self.mixers.mosaic, view.pos)
            .context("unable to request mosaic input")?;
        self.graph
            .link(preview.output(), &cell)
            .context("unable to link preview into the mosaic")?;

        trace!("source '{id}' enters the mosaic through {cell}");
        Ok(())
    }
}

/// Sources created one by one from their configuration.
///
/// Unnamed sources are called `cam<index>`.
#[derive(Debug)]
pub struct Discovery<'a, G: MediaGraph> {
    assembler: &'a mut Assembler<G>,
    specs: std::iter::Enumerate<std::vec::IntoIter<SourceSpec>>,
}

impl<G: MediaGraph> Iterator for Discovery<'_, G> {
    type Item = Result<SourceDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, spec) = self.specs.next()?;
        let id = spec
            .name
            .clone()
            .map_or_else(|| SourceId::from(format!("cam{index}")), SourceId::from);
        Some(self.assembler.add_source(id, &spec))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.specs.size_hint()
    }
}

impl<G: MediaGraph> std::iter::FusedIterator for Discovery<'_, G> {}

/// Fully wired media graph together with the layout it was built for.
#[derive(Debug)]
pub struct Assembled<G: MediaGraph> {
    graph: G,
    canvas: Size,
    shape: GridShape,
    placements: Vec<(SourceId, Placement)>,
}

impl<G: MediaGraph> Assembled<G> {
    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    #[must_use]
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Placement of every source in input order.
    #[must_use]
    pub fn placements(&self) -> &[(SourceId, Placement)] {
        &self.placements
    }

    /// Human readable listing of the layout and the whole graph.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = format!(
            "mosaic {canvas} with a {shape} grid\n",
            canvas = self.canvas,
            shape = self.shape
        );
        for (id, placement) in &self.placements {
            let view = placement.rect.view();
            out += &format!(
                "  {index}: {id} {size} at {pos}\n",
                index = placement.index,
                size = view.size,
                pos = view.pos
            );
        }
        out + &self.graph.describe()
    }

    #[must_use]
    pub fn into_graph(self) -> G {
        self.graph
    }
}
