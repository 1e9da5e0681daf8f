// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! In-memory media graph.

use std::collections::{HashMap, HashSet};

use crate::{
    Direction, Endpoint, GraphError, MediaGraph, NodeHandle, NodeKind, NodeName, PadTemplate,
    Position, Presence,
};

/// Node recorded in a [`Topology`].
#[derive(Debug, Clone)]
pub struct TopologyNode {
    pub name: NodeName,
    pub kind: NodeKind,
    /// Requested pads in request order.
    pub requested: Vec<RequestedPad>,
}

/// Pad requested from a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedPad {
    pub name: String,
    pub position: Option<Position>,
}

/// Link between two endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub src: Endpoint,
    pub sink: Endpoint,
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.src, self.sink)
    }
}

/// Media graph which only records its topology.
///
/// It validates everything a media engine would refuse at construction time
/// (names, pads, directions and media kinds) but never processes any data.
/// Used for dry runs, diagnostics and tests.
#[derive(Debug, Default)]
pub struct Topology {
    nodes: Vec<TopologyNode>,
    index: HashMap<NodeName, usize>,
    links: Vec<Link>,
    linked: HashSet<Endpoint>,
}

impl Topology {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All nodes in creation order.
    #[must_use]
    pub fn nodes(&self) -> &[TopologyNode] {
        &self.nodes
    }

    /// All links in creation order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Look up a node by name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&TopologyNode> {
        self.index.get(name).map(|i| &self.nodes[*i])
    }

    /// Endpoint the given endpoint is linked with.
    #[must_use]
    pub fn peer(&self, endpoint: &Endpoint) -> Option<&Endpoint> {
        self.links.iter().find_map(|link| {
            if &link.src == endpoint {
                Some(&link.sink)
            } else if &link.sink == endpoint {
                Some(&link.src)
            } else {
                None
            }
        })
    }

    /// Position assigned to a requested pad.
    #[must_use]
    pub fn position(&self, endpoint: &Endpoint) -> Option<Position> {
        self.node(endpoint.node.as_str())?
            .requested
            .iter()
            .find(|pad| pad.name == endpoint.pad)?
            .position
    }

    fn entry(&self, name: &NodeName) -> Result<&TopologyNode, GraphError> {
        self.index
            .get(name)
            .map(|i| &self.nodes[*i])
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))
    }

    fn entry_mut(&mut self, name: &NodeName) -> Result<&mut TopologyNode, GraphError> {
        let i = *self
            .index
            .get(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))?;
        Ok(&mut self.nodes[i])
    }

    /// Find the template of an existing pad.
    fn template(&self, endpoint: &Endpoint) -> Result<&'static PadTemplate, GraphError> {
        let node = self.entry(&endpoint.node)?;
        let unknown = || GraphError::UnknownPad {
            node: endpoint.node.to_string(),
            pad: endpoint.pad.clone(),
        };
        let template = node.kind.template_of(&endpoint.pad).ok_or_else(unknown)?;
        if template.presence == Presence::Request
            && !node.requested.iter().any(|pad| pad.name == endpoint.pad)
        {
            return Err(unknown());
        }
        Ok(template)
    }

    fn request(
        &mut self,
        node: &NodeHandle,
        template: &str,
        position: Option<Position>,
    ) -> Result<Endpoint, GraphError> {
        let entry = self.entry_mut(node.name())?;
        let prefix = entry
            .kind
            .pad_templates()
            .iter()
            .find(|t| t.presence == Presence::Request && t.name == template)
            .and_then(|t| t.name.strip_suffix("%u"))
            .ok_or_else(|| GraphError::NoRequestPad {
                node: node.to_string(),
                template: template.to_owned(),
            })?;

        let index = entry
            .requested
            .iter()
            .filter(|pad| pad.name.starts_with(prefix))
            .count();
        let name = format!("{prefix}{index}");
        entry.requested.push(RequestedPad {
            name: name.clone(),
            position,
        });

        Ok(node.pad(name))
    }
}

impl MediaGraph for Topology {
    fn create_node(&mut self, name: NodeName, kind: NodeKind) -> Result<NodeHandle, GraphError> {
        trace!("create_node( {name}, {kind} )");

        kind.validate(name.as_str())?;
        if self.index.contains_key(&name) {
            return Err(GraphError::DuplicateNode(name.to_string()));
        }

        let handle = NodeHandle::new(name.clone(), &kind);
        self.index.insert(name.clone(), self.nodes.len());
        self.nodes.push(TopologyNode {
            name,
            kind,
            requested: Vec::new(),
        });

        Ok(handle)
    }

    fn link(&mut self, src: &Endpoint, sink: &Endpoint) -> Result<(), GraphError> {
        trace!("link( {src}, {sink} )");

        let src_template = self.template(src)?;
        let sink_template = self.template(sink)?;

        if src_template.direction != Direction::Src || sink_template.direction != Direction::Sink
        {
            return Err(GraphError::IncompatibleLink {
                src: src.to_string(),
                sink: sink.to_string(),
                reason: "links have to lead from an output to an input".to_owned(),
            });
        }
        if src_template.media != sink_template.media {
            return Err(GraphError::MediaMismatch {
                src: src.to_string(),
                sink: sink.to_string(),
                media: src_template.media,
                expected: sink_template.media,
            });
        }
        for endpoint in [src, sink] {
            if self.linked.contains(endpoint) {
                return Err(GraphError::AlreadyLinked(endpoint.to_string()));
            }
        }

        self.linked.insert(src.clone());
        self.linked.insert(sink.clone());
        self.links.push(Link {
            src: src.clone(),
            sink: sink.clone(),
        });

        Ok(())
    }

    fn request_endpoint(
        &mut self,
        node: &NodeHandle,
        template: &str,
    ) -> Result<Endpoint, GraphError> {
        self.request(node, template, None)
    }

    fn request_positioned_endpoint(
        &mut self,
        sink: &NodeHandle,
        position: Position,
    ) -> Result<Endpoint, GraphError> {
        let entry = self.entry(sink.name())?;
        if !entry.kind.is_positionable() {
            return Err(GraphError::NoRequestPad {
                node: sink.to_string(),
                template: "positioned sink_%u".to_owned(),
            });
        }
        self.request(sink, "sink_%u", Some(position))
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "nodes:")?;
        for node in &self.nodes {
            writeln!(f, "  {} ({})", node.name, node.kind)?;
            for pad in &node.requested {
                match pad.position {
                    Some(position) => writeln!(f, "    + {} at {position}", pad.name)?,
                    None => writeln!(f, "    + {}", pad.name)?,
                }
            }
        }
        writeln!(f, "links:")?;
        for link in &self.links {
            writeln!(f, "  {link}")?;
        }
        Ok(())
    }
}
