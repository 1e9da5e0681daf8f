// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Text styles of label overlays.

/// Text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 0xff,
        g: 0xff,
        b: 0xff,
        a: 0xff,
    };

    /// Packed `0xAARRGGBB` value as used by `textoverlay`.
    #[must_use]
    pub fn argb(&self) -> u32 {
        (u32::from(self.a)) << 24
            | (u32::from(self.r)) << 16
            | (u32::from(self.g)) << 8
            | (u32::from(self.b))
    }
}

impl Default for Color {
    fn default() -> Color {
        Color::WHITE
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

/// Text padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPadding {
    pub x: i32,
    pub y: i32,
}

impl Default for TextPadding {
    fn default() -> TextPadding {
        TextPadding { x: 10, y: 5 }
    }
}

impl std::fmt::Display for TextPadding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{x}/{y}", x = self.x, y = self.y)
    }
}

/// Text font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub name: &'static str,
    pub size: u32,
}

impl Default for Font {
    fn default() -> Font {
        Font {
            name: "sans",
            size: 35,
        }
    }
}

impl std::fmt::Display for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.size)
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HAlign {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        }
    }
}

impl std::fmt::Display for HAlign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{halign}", halign = self.as_str())
    }
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Baseline,
    Bottom,
}

impl VAlign {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            VAlign::Top => "top",
            VAlign::Center => "center",
            VAlign::Baseline => "baseline",
            VAlign::Bottom => "bottom",
        }
    }
}

impl std::fmt::Display for VAlign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{valign}", valign = self.as_str())
    }
}

/// Horizontal and vertical text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Align {
    pub horizontal: HAlign,
    pub vertical: VAlign,
}

/// Text format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub font: Font,
    pub padding: TextPadding,
    pub color: Color,
    pub align: Align,
}

impl std::fmt::Display for TextStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{font}, {padding}, {color}, {horizontal}/{vertical}",
            font = self.font,
            padding = self.padding,
            color = self.color,
            horizontal = self.align.horizontal,
            vertical = self.align.vertical,
        )
    }
}
