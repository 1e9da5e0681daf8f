// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Typed media graph construction.

#[cfg(feature = "gstreamer")]
pub mod debug;
#[cfg(feature = "gstreamer")]
mod gst_graph;
mod node;
mod text_style;
mod topology;

#[cfg(feature = "gstreamer")]
pub use gst_graph::*;
pub use node::*;
pub use text_style::*;
pub use topology::*;

use std::fmt::Debug;

use crate::{GraphError, Position};

/// Unique, human readable node name consisting of an owner and a role.
///
/// Renders as `owner:role`, e.g. `cam0:preview-scale`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeName(String);

impl NodeName {
    #[must_use]
    pub fn new(owner: impl std::fmt::Display, role: &str) -> Self {
        Self(format!("{owner}:{role}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// derived `Hash` and `Eq` forward to the inner string
impl std::borrow::Borrow<str> for NodeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of a node created within a [`MediaGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeHandle {
    name: NodeName,
    input: Option<&'static str>,
    output: Option<&'static str>,
}

impl NodeHandle {
    pub(crate) fn new(name: NodeName, kind: &NodeKind) -> Self {
        Self {
            name,
            input: kind.default_input(),
            output: kind.default_output(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Endpoint of the named pad of this node.
    #[must_use]
    pub fn pad(&self, pad: impl Into<String>) -> Endpoint {
        Endpoint {
            node: self.name.clone(),
            pad: pad.into(),
        }
    }

    /// Default input endpoint.
    ///
    /// # Errors
    ///
    /// Fails if the node has no always-present input.
    pub fn sink(&self) -> Result<Endpoint, GraphError> {
        self.input
            .map(|pad| self.pad(pad))
            .ok_or_else(|| GraphError::UnknownPad {
                node: self.name.to_string(),
                pad: "sink".to_owned(),
            })
    }

    /// Default output endpoint.
    ///
    /// # Errors
    ///
    /// Fails if the node has no always-present output.
    pub fn src(&self) -> Result<Endpoint, GraphError> {
        self.output
            .map(|pad| self.pad(pad))
            .ok_or_else(|| GraphError::UnknownPad {
                node: self.name.to_string(),
                pad: "src".to_owned(),
            })
    }
}

impl std::fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Connection point of a node through which a stream enters or leaves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub node: NodeName,
    pub pad: String,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.node, self.pad)
    }
}

/// Graph construction interface of a media engine.
///
/// All mutating calls take `&mut self`: whoever builds the graph has
/// exclusive access to the topology for the duration of the construction.
pub trait MediaGraph: Debug {
    /// Validate and instantiate a node.
    ///
    /// # Errors
    ///
    /// Fails on invalid parameters, a name collision or if the engine can not
    /// create the node.
    fn create_node(&mut self, name: NodeName, kind: NodeKind) -> Result<NodeHandle, GraphError>;

    /// Link an output endpoint to an input endpoint.
    ///
    /// # Errors
    ///
    /// Fails if the endpoints are unknown, already linked or incompatible.
    fn link(&mut self, src: &Endpoint, sink: &Endpoint) -> Result<(), GraphError>;

    /// Request a new pad of the given template from a node.
    ///
    /// # Errors
    ///
    /// Fails if the node does not offer request pads of this template.
    fn request_endpoint(
        &mut self,
        node: &NodeHandle,
        template: &str,
    ) -> Result<Endpoint, GraphError>;

    /// Request a new input of a compositing node and place it at `position`.
    ///
    /// Both happen in one step so positions of different inputs never interleave.
    ///
    /// # Errors
    ///
    /// Fails if the node is not able to position its inputs.
    fn request_positioned_endpoint(
        &mut self,
        sink: &NodeHandle,
        position: Position,
    ) -> Result<Endpoint, GraphError>;

    /// Human readable listing of all nodes and their connections.
    fn describe(&self) -> String;

    /// Create all given nodes under a common owner.
    ///
    /// # Errors
    ///
    /// Fails on the first node which can not be created.
    fn create_nodes(
        &mut self,
        owner: &str,
        nodes: Vec<(&str, NodeKind)>,
    ) -> Result<Vec<NodeHandle>, GraphError> {
        nodes
            .into_iter()
            .map(|(role, kind)| self.create_node(NodeName::new(owner, role), kind))
            .collect()
    }

    /// Link the default output of every node to the default input of the next one.
    ///
    /// # Errors
    ///
    /// Fails on the first link which can not be made.
    fn link_many(&mut self, nodes: &[&NodeHandle]) -> Result<(), GraphError> {
        for pair in nodes.windows(2) {
            self.link(&pair[0].src()?, &pair[1].sink()?)?;
        }
        Ok(())
    }
}
