// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Video sources and their dimension resolution.

mod camera;

pub(crate) use camera::create_camera;

use serde::Deserialize;
use tokio::sync::watch;

use crate::{DeckLinkMode, Endpoint, GraphError, Pattern, Size};

/// Identifier of a source, used as owner of all its nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(String);

impl SourceId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for SourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a source gets its media from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceLocator {
    /// File or stream URI.
    Uri { uri: String },
    /// Capture card input.
    Decklink {
        device: i32,
        #[serde(default)]
        mode: DeckLinkMode,
    },
    /// Generated test pattern.
    Test {
        #[serde(default)]
        pattern: Pattern,
    },
}

impl SourceLocator {
    /// Resolution a source gets normalized to unless configured otherwise.
    #[must_use]
    pub fn default_resolution(&self) -> Size {
        match self {
            SourceLocator::Uri { .. } | SourceLocator::Test { .. } => Size::MONITOR,
            SourceLocator::Decklink { .. } => Size::FHD,
        }
    }
}

impl std::fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocator::Uri { uri } => write!(f, "{uri}"),
            SourceLocator::Decklink { device, mode } => write!(f, "decklink #{device} ({mode})"),
            SourceLocator::Test { pattern } => write!(f, "test pattern {}", pattern.as_str()),
        }
    }
}

/// Configured video source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceSpec {
    /// Identifier, defaults to `cam<index>`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub locator: SourceLocator,
    /// Normalized output resolution.
    #[serde(default)]
    pub resolution: Option<Size>,
    /// Draw a border around the source within the mosaic.
    #[serde(default)]
    pub highlight: bool,
}

impl SourceSpec {
    #[must_use]
    pub fn new(locator: SourceLocator) -> Self {
        Self {
            name: None,
            locator,
            resolution: None,
            highlight: false,
        }
    }

    #[must_use]
    pub fn resolution(&self) -> Size {
        self.resolution
            .unwrap_or_else(|| self.locator.default_resolution())
    }
}

/// A discovered source whose native dimensions may still be unknown.
///
/// The descriptor is either created resolved or pending. A pending descriptor
/// gets resolved exactly once through its [`DimensionsResolver`], usually from
/// the streaming threads of the media engine.
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    id: SourceId,
    video: Endpoint,
    audio: Option<Endpoint>,
    highlighted: bool,
    dimensions: watch::Receiver<Option<Size>>,
}

impl SourceDescriptor {
    /// Create a descriptor of a source whose dimensions are known.
    #[must_use]
    pub fn resolved(id: SourceId, video: Endpoint, audio: Option<Endpoint>, size: Size) -> Self {
        let (_, dimensions) = watch::channel(Some(size));
        Self {
            id,
            video,
            audio,
            highlighted: false,
            dimensions,
        }
    }

    /// Create a descriptor of a source whose dimensions are not known yet.
    #[must_use]
    pub fn pending(
        id: SourceId,
        video: Endpoint,
        audio: Option<Endpoint>,
    ) -> (Self, DimensionsResolver) {
        let (sender, dimensions) = watch::channel(None);
        let resolver = DimensionsResolver {
            source_id: id.clone(),
            sender,
        };
        let descriptor = Self {
            id,
            video,
            audio,
            highlighted: false,
            dimensions,
        };
        (descriptor, resolver)
    }

    /// Mark the source to be highlighted within the mosaic.
    #[must_use]
    pub fn highlight(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    #[must_use]
    pub fn id(&self) -> &SourceId {
        &self.id
    }

    /// Endpoint producing the source's video.
    #[must_use]
    pub fn video(&self) -> &Endpoint {
        &self.video
    }

    /// Endpoint producing the source's audio if it has any.
    #[must_use]
    pub fn audio(&self) -> Option<&Endpoint> {
        self.audio.as_ref()
    }

    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Native dimensions if already resolved.
    #[must_use]
    pub fn dimensions(&self) -> Option<Size> {
        *self.dimensions.borrow()
    }

    /// Wait until the native dimensions are known.
    ///
    /// A source whose resolver is dropped before resolving stays pending forever.
    pub async fn resolution(&mut self) -> Size {
        if let Ok(dimensions) = self.dimensions.wait_for(Option::is_some).await {
            if let Some(size) = *dimensions {
                return size;
            }
        }
        warn!(
            "source '{id}' will never resolve its dimensions",
            id = self.id
        );
        futures::future::pending().await
    }
}

/// Write side of a pending [`SourceDescriptor`].
#[derive(Debug)]
pub struct DimensionsResolver {
    source_id: SourceId,
    sender: watch::Sender<Option<Size>>,
}

impl DimensionsResolver {
    /// Publish the native dimensions of the source.
    ///
    /// The first valid size wins, later calls are ignored.
    ///
    /// # Errors
    ///
    /// Fails if one of the dimensions is zero.
    pub fn resolve(&self, size: Size) -> Result<(), GraphError> {
        if !size.is_positive() {
            return Err(GraphError::InvalidDimensions {
                source_id: self.source_id.to_string(),
                size,
            });
        }

        let updated = self.sender.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(size);
            true
        });

        if updated {
            debug!("source '{}' resolved to {size}", self.source_id);
        } else {
            debug!(
                "ignoring dimensions {size} of already resolved source '{}'",
                self.source_id
            );
        }
        Ok(())
    }
}
