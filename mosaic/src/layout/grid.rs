// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::{Rect, Size};

/// Columns and rows of the monitor grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
}

impl GridShape {
    /// Near-square grid which is able to hold `count` sources.
    ///
    /// `columns = ceil(sqrt(count))` and `rows = ceil(count / columns)`.
    /// Zero sources result in an empty `0x0` grid.
    #[must_use]
    pub fn for_sources(count: usize) -> Self {
        if count == 0 {
            return Self::default();
        }
        let columns = ceil_sqrt(count);
        let rows = count.div_ceil(columns);
        Self { columns, rows }
    }

    /// Amount of cells within the grid (including unoccupied ones).
    #[must_use]
    pub fn cells(&self) -> usize {
        self.columns * self.rows
    }

    /// Row and column of the cell the nth source gets placed into (row-major).
    #[must_use]
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}", self.columns, self.rows)
    }
}

fn ceil_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root < n {
        root += 1;
    }
    while root > 0 && (root - 1) * (root - 1) >= n {
        root -= 1;
    }
    root
}

/// Size of a single grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cell {
    pub width: f64,
    pub height: f64,
}

/// Computed size and position of one source within the mosaic.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Position of the source within the input list.
    pub index: usize,
    pub row: usize,
    pub column: usize,
    /// Factor the source is divided by to fit its cell.
    pub scale: f64,
    /// Scaled frame inside the canvas.
    pub rect: Rect,
}

impl Placement {
    /// Area of the cell this placement lives in.
    #[must_use]
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        Rect {
            x: self.column as f64 * cell.width,
            y: self.row as f64 * cell.height,
            width: cell.width,
            height: cell.height,
        }
    }
}

/// Grid layout of a fixed set of sources on a fixed canvas.
///
/// Every source gets one equally sized cell, filled row by row in input order.
/// Within its cell a source is scaled to fit (never cropped) and centered;
/// the remaining margins stay uncovered and show the mosaic background.
#[derive(Debug, Clone)]
pub struct Grid {
    canvas: Size,
    shape: GridShape,
}

impl Grid {
    #[must_use]
    pub fn new(canvas: Size, sources: usize) -> Self {
        Self {
            canvas,
            shape: GridShape::for_sources(sources),
        }
    }

    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[must_use]
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Size of each cell or a zero cell if there are no sources.
    #[must_use]
    pub fn cell(&self) -> Cell {
        if self.shape.cells() == 0 {
            return Cell::default();
        }
        Cell {
            width: self.canvas.width as f64 / self.shape.columns as f64,
            height: self.canvas.height as f64 / self.shape.rows as f64,
        }
    }

    /// Place the source at `index` with the given native size.
    #[must_use]
    pub fn place(&self, index: usize, source: Size) -> Placement {
        let (row, column) = self.shape.cell_of(index);
        let cell = self.cell();

        let horizontal = source.width as f64 / cell.width;
        let vertical = source.height as f64 / cell.height;
        let scale = horizontal.max(vertical);

        // the limiting axis fills the cell exactly
        let (width, height) = if horizontal >= vertical {
            (cell.width, source.height as f64 / scale)
        } else {
            (source.width as f64 / scale, cell.height)
        };

        Placement {
            index,
            row,
            column,
            scale,
            rect: Rect {
                x: column as f64 * cell.width + (cell.width - width) / 2.0,
                y: row as f64 * cell.height + (cell.height - height) / 2.0,
                width,
                height,
            },
        }
    }
}

/// Compute the placements of all `sources` on the given `canvas`.
///
/// The result has one entry per source in input order. Empty input gives an
/// empty layout. All dimensions are expected to be non-zero.
#[must_use]
pub fn compute_layout(sources: &[Size], canvas: Size) -> Vec<Placement> {
    let grid = Grid::new(canvas, sources.len());
    if sources.is_empty() {
        debug!("no video sources to place on the {canvas} monitor");
        return Vec::new();
    }

    let cell = grid.cell();
    info!(
        "showing {count} video sources in a {shape} grid in a {canvas} px window, which gives cells of {w}×{h} px per video source",
        count = sources.len(),
        shape = grid.shape(),
        w = cell.width,
        h = cell.height,
    );

    sources
        .iter()
        .enumerate()
        .map(|(index, size)| {
            let placement = grid.place(index, *size);
            info!(
                "placing video source {index} of size {size} scaled by {scale} to {w}×{h} in cell ({column}/{row}) at position ({x}/{y})",
                scale = placement.scale,
                w = placement.rect.width,
                h = placement.rect.height,
                column = placement.column,
                row = placement.row,
                x = placement.rect.x,
                y = placement.rect.y,
            );
            placement
        })
        .collect()
}
