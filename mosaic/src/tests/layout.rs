// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::{compute_layout, testing, Grid, GridShape, Position, Rect, Size};
use testing::{assert_close, EPSILON};

#[test]
fn grid_shape_is_near_square() {
    testing::init();

    for n in 0..=testing::MAX_SOURCES {
        let shape = GridShape::for_sources(n);
        let columns = (n as f64).sqrt().ceil() as usize;
        assert_eq!(shape.columns, columns, "columns of {n} sources");
        if n == 0 {
            assert_eq!(shape, GridShape::default());
            continue;
        }
        assert_eq!(shape.rows, n.div_ceil(columns), "rows of {n} sources");
        assert!(shape.cells() >= n);
        assert!((shape.rows - 1) * shape.columns < n);
    }
}

#[test]
fn grid_shape_on_square_numbers() {
    assert_eq!(GridShape::for_sources(1), GridShape { columns: 1, rows: 1 });
    assert_eq!(GridShape::for_sources(4), GridShape { columns: 2, rows: 2 });
    assert_eq!(GridShape::for_sources(5), GridShape { columns: 3, rows: 2 });
    assert_eq!(GridShape::for_sources(9), GridShape { columns: 3, rows: 3 });
    assert_eq!(GridShape::for_sources(10), GridShape { columns: 4, rows: 3 });
}

#[test]
fn sources_fit_their_cells() {
    testing::init();

    for n in 1..=testing::MAX_SOURCES {
        let sizes = testing::mixed_sizes(n);
        let grid = Grid::new(testing::CANVAS, n);
        let cell = grid.cell();
        let placements = compute_layout(&sizes, testing::CANVAS);
        assert_eq!(placements.len(), n);

        for (index, placement) in placements.iter().enumerate() {
            let rect = placement.rect;
            assert_eq!(placement.index, index);
            assert_eq!(placement.row, index / grid.shape().columns);
            assert_eq!(placement.column, index % grid.shape().columns);

            assert!(rect.width <= cell.width + EPSILON);
            assert!(rect.height <= cell.height + EPSILON);
            assert!(
                (rect.width - cell.width).abs() < EPSILON
                    || (rect.height - cell.height).abs() < EPSILON,
                "source {index} of {n} fills neither axis of its cell"
            );

            // aspect ratio survives scaling
            assert!((rect.width / rect.height - sizes[index].ratio()).abs() < 1e-6);

            let cell_rect = placement.cell_rect(cell);
            assert!(rect.right() <= cell_rect.right() + EPSILON);
            assert!(rect.bottom() <= cell_rect.bottom() + EPSILON);
            assert_close(rect.x - cell_rect.x, (cell.width - rect.width) / 2.0);
            assert_close(rect.y - cell_rect.y, (cell.height - rect.height) / 2.0);
        }
    }
}

#[test]
fn placements_do_not_overlap() {
    for n in [2, 3, 7, 16, 23] {
        let placements = compute_layout(&testing::mixed_sizes(n), Size::FHD);
        for a in &placements {
            for b in placements.iter().filter(|b| b.index != a.index) {
                assert!(
                    !a.rect.intersects(&b.rect),
                    "placements {} and {} of {n} overlap",
                    a.index,
                    b.index
                );
            }
        }
    }
}

#[test]
fn layout_is_deterministic() {
    let sizes = testing::mixed_sizes(13);
    assert_eq!(
        compute_layout(&sizes, Size::HD),
        compute_layout(&sizes, Size::HD)
    );
}

#[test]
fn empty_layout() {
    assert!(compute_layout(&[], testing::CANVAS).is_empty());
}

#[test]
fn two_sources_side_by_side() {
    testing::init();

    let placements = compute_layout(&[Size::MONITOR, Size::MONITOR], Size::MONITOR);
    let grid = Grid::new(Size::MONITOR, 2);
    assert_eq!(grid.shape(), GridShape { columns: 2, rows: 1 });
    assert_close(grid.cell().width, 512.0);
    assert_close(grid.cell().height, 576.0);

    let positions: Vec<Position> = placements.iter().map(|p| p.rect.view().pos).collect();
    assert_eq!(
        positions,
        vec![Position { x: 0, y: 144 }, Position { x: 512, y: 144 }]
    );
    for placement in &placements {
        assert_close(placement.scale, 2.0);
        assert_eq!(placement.rect.view().size, Size::new(512, 288));
    }
}

#[test]
fn rounded_views_stay_inside_odd_canvas() {
    testing::init();

    // cells of 512.5 pixels width filled completely by wide sources
    let canvas = Size::new(1025, 577);
    let placements = compute_layout(&[Size::new(2050, 576); 3], canvas);
    let views: Vec<_> = placements.iter().map(|p| p.rect.view()).collect();
    assert_eq!(views[0].pos.x, 0);
    assert_eq!(views[0].size.width, 513);
    assert_eq!(views[1].pos.x, 513);
    assert_eq!(views[1].size.width, 512);
    assert_eq!(views[0].pos.x + views[0].size.width as i64, views[1].pos.x);

    for canvas in [canvas, Size::new(1023, 575), Size::new(641, 481)] {
        for n in 1..=testing::MAX_SOURCES {
            for placement in compute_layout(&testing::mixed_sizes(n), canvas) {
                let view = placement.rect.view();
                assert!(view.pos.x >= 0 && view.pos.y >= 0);
                assert!(
                    view.pos.x + view.size.width as i64 <= canvas.width as i64
                        && view.pos.y + view.size.height as i64 <= canvas.height as i64,
                    "source {} of {n} leaves canvas {canvas}",
                    placement.index
                );
            }
        }
    }
}

#[test]
fn single_source_fills_canvas() {
    let placements = compute_layout(&[Size::MONITOR], Size::MONITOR);
    assert_eq!(placements.len(), 1);
    assert_close(placements[0].scale, 1.0);
    assert_eq!(placements[0].rect.view().pos, Position::ORIGIN);
    assert_eq!(placements[0].rect.view().size, Size::MONITOR);
}

#[test]
fn three_sources_leave_last_cell_empty() {
    let canvas = Size::new(1000, 1000);
    let placements = compute_layout(&[Size::HD; 3], canvas);
    let grid = Grid::new(canvas, 3);
    assert_eq!(grid.shape(), GridShape { columns: 2, rows: 2 });

    let cells: Vec<(usize, usize)> = placements.iter().map(|p| (p.row, p.column)).collect();
    assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0)]);

    let last_cell = Rect {
        x: 500.0,
        y: 500.0,
        width: 500.0,
        height: 500.0,
    };
    assert!(placements.iter().all(|p| !p.rect.intersects(&last_cell)));
}

#[test]
fn portrait_source_is_pillarboxed() {
    let placements = compute_layout(&[Size::new(576, 1024)], Size::MONITOR);
    let rect = placements[0].rect;
    assert_close(rect.height, 576.0);
    assert_close(rect.width, 324.0);
    assert_close(rect.x, 350.0);
    assert_close(rect.y, 0.0);
}
