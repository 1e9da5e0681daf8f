// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

mod grid;

pub use grid::*;

use serde::{Deserialize, Serialize};

/// Rounded view properties of a placed source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub pos: Position,
    pub size: Size,
}

/// Cartesian pixel position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// X position
    pub x: i64,
    /// Y position
    pub y: i64,
}

impl Position {
    /// Top left corner of the canvas.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Cartesian pixel dimension
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// horizontal dimension
    pub width: usize,
    /// vertical dimension
    pub height: usize,
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Size {
    /// Anamorphic PAL, the size of the monitor streams
    pub const MONITOR: Self = Self {
        width: 1024,
        height: 576,
    };
    /// SD (Standard Definition)
    pub const SD: Self = Self {
        width: 640,
        height: 480,
    };
    /// HD (High Definition)
    pub const HD: Self = Self {
        width: 1280,
        height: 720,
    };
    /// Full HD (FHD)
    pub const FHD: Self = Self {
        width: 1920,
        height: 1080,
    };
    /// 4K video or Ultra HD (UHD)
    pub const UHD: Self = Self {
        width: 3840,
        height: 2160,
    };

    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// return ratio between width and height
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// return `true` if both dimensions are non-zero
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Unrounded rectangle on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Return `true` if both rectangles share a non-empty area.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Round to whole pixels the way the compositor expects them.
    ///
    /// Edges are rounded instead of sizes, so a view never leaves a rounded
    /// rectangle containing it and touching rectangles stay touching.
    #[must_use]
    pub fn view(&self) -> View {
        let (left, top) = (self.x.round(), self.y.round());
        let (right, bottom) = (self.right().round(), self.bottom().round());
        View {
            pos: Position {
                x: left as i64,
                y: top as i64,
            },
            size: Size {
                width: (right - left).max(0.0) as usize,
                height: (bottom - top).max(0.0) as usize,
            },
        }
    }
}
