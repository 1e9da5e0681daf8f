// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Media graph realized as a `GStreamer` pipeline.

use std::collections::HashMap;

use anyhow::{Context, Result};
use gst::{prelude::*, Caps, Element, ElementFactory, Fraction, Pipeline};

use super::debug;
use crate::{
    Endpoint, GraphError, MediaGraph, MediaKind, NodeHandle, NodeKind, NodeName, Position,
    Presence, PropertyValue,
};

/// `GStreamer` pipeline built through the typed graph interface.
///
/// The pipeline stays in `NULL` state while it is being built, so topology
/// changes never race with streaming. Call [`GstGraph::play`] once the
/// construction is complete.
#[derive(Debug)]
pub struct GstGraph {
    pipeline: Pipeline,
    elements: HashMap<NodeName, (Element, NodeKind)>,
    order: Vec<NodeName>,
}

impl GstGraph {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            pipeline: Pipeline::new(Some(name)),
            elements: HashMap::new(),
            order: Vec::new(),
        }
    }

    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Start streaming and forward bus messages to the log.
    ///
    /// # Errors
    ///
    /// Fails if the bus watch can not be installed or the pipeline refuses to play.
    pub fn play(&self) -> Result<()> {
        self.read_bus().context("unable to watch pipeline bus")?;
        self.pipeline
            .set_state(gst::State::Playing)
            .context("unable to set the pipeline to the `Playing` state")?;
        debug::debug_dot(&self.pipeline, "PLAYING");
        Ok(())
    }

    /// Write a DOT file of the pipeline (if `GST_DEBUG_DUMP_DOT_DIR` is set).
    pub fn dot(&self, filename_without_extension: &str, params: &debug::Params) {
        debug::dot_ext(&self.pipeline, filename_without_extension, params);
    }

    fn element(&self, name: &NodeName) -> Result<&(Element, NodeKind), GraphError> {
        self.elements
            .get(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))
    }

    fn engine_error(node: &NodeName, reason: impl std::fmt::Display) -> GraphError {
        GraphError::Engine {
            node: node.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Continuously read the bus for errors, warnings and infos.
    fn read_bus(&self) -> Result<()> {
        let bus = self
            .pipeline
            .bus()
            .context("failed to get bus of pipeline")?;

        let pipeline_weak = self.pipeline.downgrade();
        bus.add_watch(move |_, msg| {
            use gst::MessageView;
            match (msg.view(), &pipeline_weak.upgrade()) {
                (MessageView::Error(err), Some(pipeline)) => {
                    error!(
                        "Error received from element {:?}: {}",
                        err.src().map(GstObjectExt::path_string),
                        err.error(),
                    );
                    debug::dot(pipeline, "BUS-ERROR");
                    if let Some(info) = err.debug() {
                        debug!("Debugging information: {}", info);
                    }
                }
                (MessageView::Warning(warn), Some(pipeline)) => {
                    warn!(
                        "Warning received from element {:?}: {}",
                        warn.src().map(GstObjectExt::path_string),
                        warn.error(),
                    );
                    debug::dot(pipeline, "BUS-WARNING");
                    if let Some(info) = warn.debug() {
                        debug!("Debugging information: {}", info);
                    }
                }
                (MessageView::Info(info), Some(_)) => {
                    info!(
                        "Info received from element {:?}: {}",
                        info.src().map(GstObjectExt::path_string),
                        info.error(),
                    );
                }
                (MessageView::Latency(_), Some(pipeline)) => {
                    let _ = pipeline.recalculate_latency();
                }
                _ => (),
            }
            glib::Continue(true)
        })?;

        Ok(())
    }
}

/// Apply a typed property to an element.
///
/// Enumeration nicks are looked up first because setting an unknown one panics.
pub(crate) fn apply_property(
    element: &Element,
    kind: &NodeKind,
    name: &str,
    value: &PropertyValue,
) -> Result<(), GraphError> {
    match value {
        PropertyValue::Bool(v) => element.set_property(name, *v),
        PropertyValue::Int(v) => element.set_property(name, *v),
        PropertyValue::UInt(v) => element.set_property(name, *v),
        PropertyValue::UInt64(v) => element.set_property(name, *v),
        PropertyValue::Double(v) => element.set_property(name, *v),
        PropertyValue::Str(v) => element.set_property(name, v.as_str()),
        PropertyValue::Enum(v) => {
            let known = element
                .find_property(name)
                .and_then(|pspec| glib::EnumClass::new(pspec.value_type()))
                .is_some_and(|class| class.value_by_nick(v).is_some());
            if !known {
                return Err(GraphError::InvalidParameter {
                    node: element.name().to_string(),
                    factory: kind.factory(),
                    reason: format!("'{v}' is no value of property '{name}'"),
                });
            }
            element.set_property_from_str(name, v);
        }
        PropertyValue::Caps(caps) => {
            let mut builder = Caps::builder("video/x-raw")
                .field("width", caps.size.width as i32)
                .field("height", caps.size.height as i32)
                .field("pixel-aspect-ratio", Fraction::new(1, 1));
            if let Some((numerator, denominator)) = caps.framerate {
                builder = builder.field("framerate", Fraction::new(numerator, denominator));
            }
            element.set_property(name, builder.build());
        }
    }
    Ok(())
}

/// Media kind of a pad that appeared on a decoder.
fn media_of(pad: &gst::Pad) -> Option<MediaKind> {
    let caps = pad.current_caps().unwrap_or_else(|| pad.query_caps(None));
    let structure = caps.structure(0)?;
    if structure.name().starts_with("video/") {
        Some(MediaKind::Video)
    } else if structure.name().starts_with("audio/") {
        Some(MediaKind::Audio)
    } else {
        None
    }
}

impl MediaGraph for GstGraph {
    fn create_node(&mut self, name: NodeName, kind: NodeKind) -> Result<NodeHandle, GraphError> {
        trace!("create_node( {name}, {kind} )");

        kind.validate(name.as_str())?;
        if self.elements.contains_key(&name) {
            return Err(GraphError::DuplicateNode(name.to_string()));
        }

        let element = ElementFactory::make(kind.factory())
            .name(name.as_str())
            .build()
            .map_err(|e| Self::engine_error(&name, e))?;
        for (property, value) in kind.properties() {
            apply_property(&element, &kind, property, &value)?;
        }
        self.pipeline
            .add(&element)
            .map_err(|e| Self::engine_error(&name, e))?;

        let handle = NodeHandle::new(name.clone(), &kind);
        self.elements.insert(name.clone(), (element, kind));
        self.order.push(name);

        Ok(handle)
    }

    fn link(&mut self, src: &Endpoint, sink: &Endpoint) -> Result<(), GraphError> {
        trace!("link( {src}, {sink} )");

        let (src_element, src_kind) = self.element(&src.node)?;
        let (sink_element, _) = self.element(&sink.node)?;

        let sink_pad = sink_element
            .static_pad(&sink.pad)
            .ok_or_else(|| GraphError::UnknownPad {
                node: sink.node.to_string(),
                pad: sink.pad.clone(),
            })?;

        if let Some(src_pad) = src_element.static_pad(&src.pad) {
            return src_pad
                .link(&sink_pad)
                .map(|_| ())
                .map_err(|e| GraphError::IncompatibleLink {
                    src: src.to_string(),
                    sink: sink.to_string(),
                    reason: format!("{e:?}"),
                });
        }

        // decoders create their outputs once they know their streams
        let template = src_kind
            .template_of(&src.pad)
            .filter(|t| t.presence == Presence::Sometimes)
            .ok_or_else(|| GraphError::UnknownPad {
                node: src.node.to_string(),
                pad: src.pad.clone(),
            })?;
        let media = template.media;
        let (src_name, sink_name) = (src.to_string(), sink.to_string());
        src_element.connect_pad_added(move |_, pad| {
            if media_of(pad) != Some(media) || sink_pad.is_linked() {
                return;
            }
            match pad.link(&sink_pad) {
                Ok(_) => debug!("linked late {media} output of {src_name} with {sink_name}"),
                Err(e) => {
                    error!("unable to link {media} output of {src_name} with {sink_name}: {e:?}");
                }
            }
        });

        Ok(())
    }

    fn request_endpoint(
        &mut self,
        node: &NodeHandle,
        template: &str,
    ) -> Result<Endpoint, GraphError> {
        let (element, _) = self.element(node.name())?;
        let pad = element
            .request_pad_simple(template)
            .ok_or_else(|| GraphError::NoRequestPad {
                node: node.to_string(),
                template: template.to_owned(),
            })?;
        Ok(node.pad(pad.name().as_str()))
    }

    fn request_positioned_endpoint(
        &mut self,
        sink: &NodeHandle,
        position: Position,
    ) -> Result<Endpoint, GraphError> {
        let (element, kind) = self.element(sink.name())?;
        if !kind.is_positionable() {
            return Err(GraphError::NoRequestPad {
                node: sink.to_string(),
                template: "positioned sink_%u".to_owned(),
            });
        }
        let pad = element
            .request_pad_simple("sink_%u")
            .ok_or_else(|| GraphError::NoRequestPad {
                node: sink.to_string(),
                template: "sink_%u".to_owned(),
            })?;
        pad.set_property("xpos", position.x as i32);
        pad.set_property("ypos", position.y as i32);

        Ok(sink.pad(pad.name().as_str()))
    }

    fn describe(&self) -> String {
        let mut out = String::from("nodes:\n");
        for name in &self.order {
            let Some((element, kind)) = self.elements.get(name) else {
                continue;
            };
            out += &format!("  {name} ({kind})\n");
            for pad in element.sink_pads() {
                if let Some(template) = kind.template_of(pad.name().as_str()) {
                    if template.presence == Presence::Request && kind.is_positionable() {
                        let x: i32 = pad.property("xpos");
                        let y: i32 = pad.property("ypos");
                        out += &format!("    + {} at ({x},{y})\n", pad.name());
                    }
                }
            }
        }
        out += "links:\n";
        for name in &self.order {
            let Some((element, _)) = self.elements.get(name) else {
                continue;
            };
            for pad in element.src_pads() {
                let Some(peer) = pad.peer() else {
                    continue;
                };
                let peer_element = peer
                    .parent_element()
                    .map_or_else(|| "?".into(), |element| element.name());
                out += &format!(
                    "  {name}.{} -> {peer_element}.{}\n",
                    pad.name(),
                    peer.name()
                );
            }
        }
        out
    }
}

impl Drop for GstGraph {
    /// halt pipeline (can not be played again)
    fn drop(&mut self) {
        debug!("Dropping media graph...");
        debug::debug_dot(&self.pipeline, "GRAPH-DROP");

        if let Err(error) = self.pipeline.set_state(gst::State::Null) {
            error!("Unable to set the pipeline to the `Null` state, error: {error}");
        }
    }
}
