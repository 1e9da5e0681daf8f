// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use anyhow::{Context, Result};

use crate::{Endpoint, Leaky, MediaGraph, NodeHandle, NodeKind, SourceId};

/// Buffers each branch holds before it starts dropping old frames.
const BRANCH_BUFFERS: u32 = 5;

/// Splits the video of one source into a live and a monitor branch.
///
/// Both branches own a leaky queue: a branch which stalls drops its oldest
/// frames instead of blocking the other branch, and an unlinked or failing
/// branch never stops the tee.
#[derive(Debug)]
pub struct Distributor {
    tee: NodeHandle,
    live: NodeHandle,
    monitor: NodeHandle,
}

impl Distributor {
    /// Create the distributor of `owner` and feed it from `upstream`.
    ///
    /// # Errors
    ///
    /// Fails if the nodes can not be created or `upstream` can not be linked.
    pub fn create(
        graph: &mut impl MediaGraph,
        owner: &SourceId,
        upstream: &Endpoint,
    ) -> Result<Self> {
        debug!("creating distributor for '{owner}'");

        let queue = || NodeKind::Queue {
            leaky: Leaky::Downstream,
            max_buffers: BRANCH_BUFFERS,
        };
        let nodes = graph
            .create_nodes(
                owner.as_str(),
                vec![
                    ("distributor-tee", NodeKind::Tee),
                    ("distributor-live", queue()),
                    ("distributor-monitor", queue()),
                ],
            )
            .context("unable to create distributor")?;
        let [tee, live, monitor]: [NodeHandle; 3] = nodes
            .try_into()
            .map_err(|_| anyhow::anyhow!("distributor of '{owner}' is incomplete"))?;

        graph
            .link(upstream, &tee.sink()?)
            .with_context(|| format!("unable to link {upstream} into the distributor"))?;

        for branch in [&live, &monitor] {
            let output = graph
                .request_endpoint(&tee, "src_%u")
                .context("unable to request distributor output")?;
            graph
                .link(&output, &branch.sink()?)
                .with_context(|| format!("unable to link {output} with {branch}"))?;
        }

        Ok(Self { tee, live, monitor })
    }

    /// The splitting node.
    #[must_use]
    pub fn tee(&self) -> &NodeHandle {
        &self.tee
    }

    /// Output towards the live mixer.
    ///
    /// # Errors
    ///
    /// Fails only if the branch node has no output.
    pub fn live(&self) -> Result<Endpoint> {
        Ok(self.live.src()?)
    }

    /// Output towards the monitor mosaic.
    ///
    /// # Errors
    ///
    /// Fails only if the branch node has no output.
    pub fn monitor(&self) -> Result<Endpoint> {
        Ok(self.monitor.src()?)
    }
}
