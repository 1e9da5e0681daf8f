// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Typed node descriptors.
//!
//! Each node kind has a fixed set of parameters and pad templates which are
//! known before anything gets instantiated in the media engine.

use serde::{Deserialize, Serialize};

use crate::{GraphError, Size, TextStyle};

/// Type of media flowing through a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Audio,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
        }
    }
}

/// Whether a pad produces or consumes a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Src,
    Sink,
}

/// When a pad becomes available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Exists as soon as the node exists.
    Always,
    /// Appears once the node knows its streams (e.g. after decoding started).
    Sometimes,
    /// Has to be requested, one pad per request.
    Request,
}

/// Static descriptor of a node's pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadTemplate {
    pub name: &'static str,
    pub direction: Direction,
    pub media: MediaKind,
    pub presence: Presence,
}

impl PadTemplate {
    pub const fn src(name: &'static str, media: MediaKind) -> Self {
        Self {
            name,
            direction: Direction::Src,
            media,
            presence: Presence::Always,
        }
    }

    pub const fn sink(name: &'static str, media: MediaKind) -> Self {
        Self {
            name,
            direction: Direction::Sink,
            media,
            presence: Presence::Always,
        }
    }

    pub const fn sometimes(name: &'static str, media: MediaKind) -> Self {
        Self {
            name,
            direction: Direction::Src,
            media,
            presence: Presence::Sometimes,
        }
    }

    pub const fn request(name: &'static str, direction: Direction, media: MediaKind) -> Self {
        Self {
            name,
            direction,
            media,
            presence: Presence::Request,
        }
    }
}

const VIDEO_FILTER: &[PadTemplate] = &[
    PadTemplate::sink("sink", MediaKind::Video),
    PadTemplate::src("src", MediaKind::Video),
];
const AUDIO_FILTER: &[PadTemplate] = &[
    PadTemplate::sink("sink", MediaKind::Audio),
    PadTemplate::src("src", MediaKind::Audio),
];
const VIDEO_SOURCE: &[PadTemplate] = &[PadTemplate::src("src", MediaKind::Video)];
const AUDIO_SOURCE: &[PadTemplate] = &[PadTemplate::src("src", MediaKind::Audio)];
const VIDEO_SINK: &[PadTemplate] = &[PadTemplate::sink("sink", MediaKind::Video)];
const AUDIO_SINK: &[PadTemplate] = &[PadTemplate::sink("sink", MediaKind::Audio)];
const DECODER: &[PadTemplate] = &[
    PadTemplate::sometimes("video", MediaKind::Video),
    PadTemplate::sometimes("audio", MediaKind::Audio),
];
const TEE: &[PadTemplate] = &[
    PadTemplate::sink("sink", MediaKind::Video),
    PadTemplate::request("src_%u", Direction::Src, MediaKind::Video),
];
const TEXT_OVERLAY: &[PadTemplate] = &[
    PadTemplate::sink("video_sink", MediaKind::Video),
    PadTemplate::src("src", MediaKind::Video),
];
const VIDEO_MIXER: &[PadTemplate] = &[
    PadTemplate::request("sink_%u", Direction::Sink, MediaKind::Video),
    PadTemplate::src("src", MediaKind::Video),
];
const AUDIO_SELECTOR: &[PadTemplate] = &[
    PadTemplate::request("sink_%u", Direction::Sink, MediaKind::Audio),
    PadTemplate::src("src", MediaKind::Audio),
];

/// Video test patterns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    /// SMPTE 100%% color bars
    #[default]
    Smpte,
    /// Random (television snow)
    Snow,
    /// 100%% Black
    Black,
    /// 100%% White
    White,
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Checkers 8px
    #[serde(rename = "checkers-8")]
    Checkers8,
    /// Circular
    Circular,
    /// Zone plate
    ZonePlate,
    /// Solid color
    SolidColor,
    /// Moving ball
    Ball,
    /// Pinwheel
    #[serde(rename = "pinwheel")]
    PinWheel,
    /// Spokes
    Spokes,
    /// Gradient
    Gradient,
    /// Colors
    Colors,
}

impl Pattern {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Smpte => "smpte",
            Pattern::Snow => "snow",
            Pattern::Black => "black",
            Pattern::White => "white",
            Pattern::Red => "red",
            Pattern::Green => "green",
            Pattern::Blue => "blue",
            Pattern::Checkers8 => "checkers-8",
            Pattern::Circular => "circular",
            Pattern::ZonePlate => "zone-plate",
            Pattern::SolidColor => "solid-color",
            Pattern::Ball => "ball",
            Pattern::PinWheel => "pinwheel",
            Pattern::Spokes => "spokes",
            Pattern::Gradient => "gradient",
            Pattern::Colors => "colors",
        }
    }
}

/// Video modes of capture cards, named like the `decklinkvideosrc` nicks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckLinkMode {
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "pal")]
    Pal,
    #[serde(rename = "ntsc")]
    Ntsc,
    #[serde(rename = "720p50")]
    Hd720p50,
    #[serde(rename = "720p5994")]
    Hd720p5994,
    #[serde(rename = "720p60")]
    Hd720p60,
    #[serde(rename = "1080i50")]
    Hd1080i50,
    #[serde(rename = "1080i5994")]
    Hd1080i5994,
    #[serde(rename = "1080i60")]
    Hd1080i60,
    #[serde(rename = "1080p24")]
    Hd1080p24,
    #[default]
    #[serde(rename = "1080p25")]
    Hd1080p25,
    #[serde(rename = "1080p2997")]
    Hd1080p2997,
    #[serde(rename = "1080p30")]
    Hd1080p30,
    #[serde(rename = "1080p50")]
    Hd1080p50,
    #[serde(rename = "1080p5994")]
    Hd1080p5994,
    #[serde(rename = "1080p60")]
    Hd1080p60,
    #[serde(rename = "2160p25")]
    Uhd2160p25,
    #[serde(rename = "2160p30")]
    Uhd2160p30,
    #[serde(rename = "2160p50")]
    Uhd2160p50,
    #[serde(rename = "2160p60")]
    Uhd2160p60,
}

impl DeckLinkMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DeckLinkMode::Auto => "auto",
            DeckLinkMode::Pal => "pal",
            DeckLinkMode::Ntsc => "ntsc",
            DeckLinkMode::Hd720p50 => "720p50",
            DeckLinkMode::Hd720p5994 => "720p5994",
            DeckLinkMode::Hd720p60 => "720p60",
            DeckLinkMode::Hd1080i50 => "1080i50",
            DeckLinkMode::Hd1080i5994 => "1080i5994",
            DeckLinkMode::Hd1080i60 => "1080i60",
            DeckLinkMode::Hd1080p24 => "1080p24",
            DeckLinkMode::Hd1080p25 => "1080p25",
            DeckLinkMode::Hd1080p2997 => "1080p2997",
            DeckLinkMode::Hd1080p30 => "1080p30",
            DeckLinkMode::Hd1080p50 => "1080p50",
            DeckLinkMode::Hd1080p5994 => "1080p5994",
            DeckLinkMode::Hd1080p60 => "1080p60",
            DeckLinkMode::Uhd2160p25 => "2160p25",
            DeckLinkMode::Uhd2160p30 => "2160p30",
            DeckLinkMode::Uhd2160p50 => "2160p50",
            DeckLinkMode::Uhd2160p60 => "2160p60",
        }
    }
}

impl std::fmt::Display for DeckLinkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw video caps forced by a caps filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoCaps {
    pub size: Size,
    /// Frames per second as numerator and denominator.
    pub framerate: Option<(i32, i32)>,
}

impl VideoCaps {
    #[must_use]
    pub fn sized(size: Size) -> Self {
        Self {
            size,
            framerate: None,
        }
    }
}

impl std::fmt::Display for VideoCaps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "video/x-raw,width={},height={}",
            self.size.width, self.size.height
        )?;
        if let Some((numerator, denominator)) = self.framerate {
            write!(f, ",framerate={numerator}/{denominator}")?;
        }
        Ok(())
    }
}

/// Which buffers a full queue drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaky {
    No,
    Upstream,
    Downstream,
}

impl Leaky {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Leaky::No => "no",
            Leaky::Upstream => "upstream",
            Leaky::Downstream => "downstream",
        }
    }
}

/// Colors a `videobox` can fill added borders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Black,
    Green,
    Blue,
    Red,
    Yellow,
    White,
}

impl Fill {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Fill::Black => "black",
            Fill::Green => "green",
            Fill::Blue => "blue",
            Fill::Red => "red",
            Fill::Yellow => "yellow",
            Fill::White => "white",
        }
    }
}

/// Background of a compositor where no input covers the picture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Background {
    Checker,
    #[default]
    Black,
    White,
    Transparent,
}

impl Background {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Background::Checker => "checker",
            Background::Black => "black",
            Background::White => "white",
            Background::Transparent => "transparent",
        }
    }
}

/// Output sink flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Show the picture and play the sound on this machine.
    #[default]
    Display,
    /// Swallow everything.
    Fake,
}

/// Value of a node property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    UInt(u32),
    UInt64(u64),
    Double(f64),
    Str(String),
    /// Enumeration value given by its nick.
    Enum(String),
    Caps(VideoCaps),
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Bool(value) => write!(f, "{value}"),
            PropertyValue::Int(value) => write!(f, "{value}"),
            PropertyValue::UInt(value) => write!(f, "{value:#x}"),
            PropertyValue::UInt64(value) => write!(f, "{value}"),
            PropertyValue::Double(value) => write!(f, "{value}"),
            PropertyValue::Str(value) => write!(f, "\"{value}\""),
            PropertyValue::Enum(value) => write!(f, "{value}"),
            PropertyValue::Caps(caps) => write!(f, "{caps}"),
        }
    }
}

/// Kind of a node together with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Decodes any file or URI into raw video and audio.
    UriDecode { uri: String },
    /// Video input of a capture card.
    DeckLinkVideo { device: i32, mode: DeckLinkMode },
    /// Audio input of a capture card.
    DeckLinkAudio { device: i32 },
    /// Generated test picture.
    TestVideo {
        pattern: Pattern,
        foreground: Option<u32>,
    },
    /// Generated test sound.
    TestAudio { volume: f64 },
    VideoConvert,
    VideoScale,
    VideoRate,
    AudioConvert,
    CapsFilter(VideoCaps),
    /// Pass-through.
    Identity,
    /// Duplicates one stream into any amount of requested outputs.
    Tee,
    /// Thread boundary with its own buffer.
    Queue { leaky: Leaky, max_buffers: u32 },
    /// Removes `inset` pixels from every edge.
    Crop { inset: u32 },
    /// Adds a border of `width` pixels on every edge.
    Border { width: u32, fill: Fill },
    /// Renders text on top of the picture.
    TextOverlay { text: String, style: TextStyle },
    /// Composes positioned inputs into one picture.
    Compositor { background: Background },
    /// Forwards one of its audio inputs.
    InputSelector,
    VideoSink(SinkKind),
    AudioSink(SinkKind),
}

impl NodeKind {
    /// Name of the element factory realizing this kind.
    #[must_use]
    pub fn factory(&self) -> &'static str {
        match self {
            NodeKind::UriDecode { .. } => "uridecodebin",
            NodeKind::DeckLinkVideo { .. } => "decklinkvideosrc",
            NodeKind::DeckLinkAudio { .. } => "decklinkaudiosrc",
            NodeKind::TestVideo { .. } => "videotestsrc",
            NodeKind::TestAudio { .. } => "audiotestsrc",
            NodeKind::VideoConvert => "videoconvert",
            NodeKind::VideoScale => "videoscale",
            NodeKind::VideoRate => "videorate",
            NodeKind::AudioConvert => "audioconvert",
            NodeKind::CapsFilter(_) => "capsfilter",
            NodeKind::Identity => "identity",
            NodeKind::Tee => "tee",
            NodeKind::Queue { .. } => "queue",
            NodeKind::Crop { .. } | NodeKind::Border { .. } => "videobox",
            NodeKind::TextOverlay { .. } => "textoverlay",
            NodeKind::Compositor { .. } => "compositor",
            NodeKind::InputSelector => "input-selector",
            NodeKind::VideoSink(SinkKind::Display) => "autovideosink",
            NodeKind::VideoSink(SinkKind::Fake) => "fakevideosink",
            NodeKind::AudioSink(SinkKind::Display) => "autoaudiosink",
            NodeKind::AudioSink(SinkKind::Fake) => "fakeaudiosink",
        }
    }

    /// Pads this kind offers.
    #[must_use]
    pub fn pad_templates(&self) -> &'static [PadTemplate] {
        match self {
            NodeKind::UriDecode { .. } => DECODER,
            NodeKind::DeckLinkVideo { .. } | NodeKind::TestVideo { .. } => VIDEO_SOURCE,
            NodeKind::DeckLinkAudio { .. } | NodeKind::TestAudio { .. } => AUDIO_SOURCE,
            NodeKind::VideoConvert
            | NodeKind::VideoScale
            | NodeKind::VideoRate
            | NodeKind::CapsFilter(_)
            | NodeKind::Identity
            | NodeKind::Queue { .. }
            | NodeKind::Crop { .. }
            | NodeKind::Border { .. } => VIDEO_FILTER,
            NodeKind::AudioConvert => AUDIO_FILTER,
            NodeKind::Tee => TEE,
            NodeKind::TextOverlay { .. } => TEXT_OVERLAY,
            NodeKind::Compositor { .. } => VIDEO_MIXER,
            NodeKind::InputSelector => AUDIO_SELECTOR,
            NodeKind::VideoSink(_) => VIDEO_SINK,
            NodeKind::AudioSink(_) => AUDIO_SINK,
        }
    }

    /// Find the template a pad name belongs to.
    ///
    /// Requested pads like `sink_3` match their template `sink_%u`.
    #[must_use]
    pub fn template_of(&self, pad: &str) -> Option<&'static PadTemplate> {
        self.pad_templates().iter().find(|template| {
            if template.presence == Presence::Request {
                template
                    .name
                    .strip_suffix("%u")
                    .and_then(|prefix| pad.strip_prefix(prefix))
                    .is_some_and(|index| {
                        !index.is_empty() && index.chars().all(|c| c.is_ascii_digit())
                    })
            } else {
                template.name == pad
            }
        })
    }

    /// Default input pad used when linking nodes in a chain.
    #[must_use]
    pub fn default_input(&self) -> Option<&'static str> {
        self.pad_templates()
            .iter()
            .find(|t| t.direction == Direction::Sink && t.presence == Presence::Always)
            .map(|t| t.name)
    }

    /// Default output pad used when linking nodes in a chain.
    #[must_use]
    pub fn default_output(&self) -> Option<&'static str> {
        self.pad_templates()
            .iter()
            .find(|t| t.direction == Direction::Src && t.presence == Presence::Always)
            .map(|t| t.name)
    }

    /// Return `true` if requested inputs can be positioned on the output picture.
    #[must_use]
    pub fn is_positionable(&self) -> bool {
        matches!(self, NodeKind::Compositor { .. })
    }

    /// Element properties to apply after instantiation.
    #[must_use]
    pub fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        use PropertyValue::{Bool, Caps, Double, Enum, Int, Str, UInt, UInt64};

        match self {
            NodeKind::UriDecode { uri } => vec![("uri", Str(uri.clone()))],
            NodeKind::DeckLinkVideo { device, mode } => vec![
                ("device-number", Int(*device)),
                ("mode", Enum(mode.as_str().to_owned())),
                ("connection", Enum("sdi".to_owned())),
            ],
            NodeKind::DeckLinkAudio { device } => vec![("device-number", Int(*device))],
            NodeKind::TestVideo {
                pattern,
                foreground,
            } => {
                let mut properties = vec![
                    ("pattern", Enum(pattern.as_str().to_owned())),
                    ("is-live", Bool(true)),
                ];
                if let Some(color) = foreground {
                    properties.push(("foreground-color", UInt(*color)));
                }
                properties
            }
            NodeKind::TestAudio { volume } => {
                vec![("volume", Double(*volume)), ("is-live", Bool(true))]
            }
            NodeKind::CapsFilter(caps) => vec![("caps", Caps(*caps))],
            NodeKind::Tee => vec![("allow-not-linked", Bool(true))],
            NodeKind::Queue { leaky, max_buffers } => vec![
                ("leaky", Enum(leaky.as_str().to_owned())),
                ("max-size-buffers", UInt(*max_buffers)),
                ("max-size-bytes", UInt(0)),
                ("max-size-time", UInt64(0)),
            ],
            NodeKind::Crop { inset } => {
                let inset = Int(*inset as i32);
                vec![
                    ("top", inset.clone()),
                    ("left", inset.clone()),
                    ("bottom", inset.clone()),
                    ("right", inset),
                ]
            }
            NodeKind::Border { width, fill } => {
                // negative values add borders
                let width = Int(-(*width as i32));
                vec![
                    ("fill", Enum(fill.as_str().to_owned())),
                    ("top", width.clone()),
                    ("left", width.clone()),
                    ("bottom", width.clone()),
                    ("right", width),
                ]
            }
            NodeKind::TextOverlay { text, style } => vec![
                ("text", Str(text.clone())),
                ("font-desc", Str(style.font.to_string())),
                ("xpad", Int(style.padding.x)),
                ("ypad", Int(style.padding.y)),
                ("color", UInt(style.color.argb())),
                ("halignment", Enum(style.align.horizontal.as_str().to_owned())),
                ("valignment", Enum(style.align.vertical.as_str().to_owned())),
            ],
            NodeKind::Compositor { background } => {
                vec![("background", Enum(background.as_str().to_owned()))]
            }
            NodeKind::VideoSink(SinkKind::Display) | NodeKind::AudioSink(SinkKind::Display) => {
                vec![("sync", Bool(false))]
            }
            NodeKind::VideoConvert
            | NodeKind::VideoScale
            | NodeKind::VideoRate
            | NodeKind::AudioConvert
            | NodeKind::Identity
            | NodeKind::InputSelector
            | NodeKind::VideoSink(SinkKind::Fake)
            | NodeKind::AudioSink(SinkKind::Fake) => Vec::new(),
        }
    }

    /// Check the parameters before anything gets instantiated.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidParameter`] describing the first bad parameter.
    pub fn validate(&self, node: &str) -> Result<(), GraphError> {
        let invalid = |reason: String| {
            Err(GraphError::InvalidParameter {
                node: node.to_owned(),
                factory: self.factory(),
                reason,
            })
        };

        match self {
            NodeKind::UriDecode { uri } if !uri.contains("://") => {
                invalid(format!("'{uri}' is not a URI"))
            }
            NodeKind::DeckLinkVideo { device, .. } | NodeKind::DeckLinkAudio { device }
                if *device < 0 =>
            {
                invalid(format!("device number {device} is negative"))
            }
            NodeKind::TestAudio { volume } if !(0.0..=1.0).contains(volume) => {
                invalid(format!("volume {volume} is out of range 0..1"))
            }
            NodeKind::CapsFilter(caps) if !caps.size.is_positive() => {
                invalid(format!("size {} is empty", caps.size))
            }
            NodeKind::CapsFilter(VideoCaps {
                framerate: Some((numerator, denominator)),
                ..
            }) if *numerator <= 0 || *denominator <= 0 => {
                invalid(format!("framerate {numerator}/{denominator} is invalid"))
            }
            NodeKind::Queue { max_buffers: 0, .. } => {
                invalid("queue can not hold zero buffers".to_owned())
            }
            NodeKind::TextOverlay { style, .. } if style.font.size == 0 => {
                invalid("font size is zero".to_owned())
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.factory())?;
        for (name, value) in self.properties() {
            write!(f, " {name}={value}")?;
        }
        Ok(())
    }
}
