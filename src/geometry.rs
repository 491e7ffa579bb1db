// src/geometry.rs

//! Pure geometry: conversion between grid cell indices and pixel-space
//! coordinates, accounting for the thickness of the grid's separator lines.
//!
//! Pixel y grows downward, but row 0 is the bottom visual row (the least
//! significant row of the encoding), so the row axis is inverted in both
//! directions. For every in-bounds cell,
//! `point_to_cell(cell_to_origin(cell)) == cell`; the inverse direction
//! clamps, so out-of-surface pointer positions saturate to edge cells.

use log::trace;

/// A position in surface pixels, relative to the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// One grid cell, addressed by 0-based column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub column: usize,
    pub row: usize,
}

/// Converts between cell indices and pixel coordinates for one fixed
/// surface layout.
///
/// The layout is decided once at construction: the room for cells is what
/// is left of the surface after the separator lines, divided evenly.
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    columns: usize,
    rows: usize,
    line_thickness: f64,
    surface_width: f64,
    surface_height: f64,
    cell_width: f64,
    cell_height: f64,
}

impl CoordinateMapper {
    /// Lays out `columns x rows` cells on a surface of the given pixel size.
    pub fn new(
        columns: usize,
        rows: usize,
        line_thickness: f64,
        surface_width: f64,
        surface_height: f64,
    ) -> Self {
        assert!(columns > 0 && rows > 0, "grid dimensions must be non-zero");
        let cell_width = (surface_width - columns as f64 * line_thickness) / columns as f64;
        let cell_height = (surface_height - rows as f64 * line_thickness) / rows as f64;
        assert!(
            cell_width > 0.0 && cell_height > 0.0,
            "surface {}x{} too small for {}x{} cells with {}px lines",
            surface_width,
            surface_height,
            columns,
            rows,
            line_thickness
        );
        CoordinateMapper {
            columns,
            rows,
            line_thickness,
            surface_width,
            surface_height,
            cell_width,
            cell_height,
        }
    }

    /// Width of one cell's interior in pixels.
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Height of one cell's interior in pixels.
    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Total surface width in pixels.
    pub fn surface_width(&self) -> f64 {
        self.surface_width
    }

    /// Total surface height in pixels.
    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    /// Drawing origin (top-left) of a cell's interior rectangle.
    ///
    /// Row 0 is the bottom visual row, so the y coordinate counts down from
    /// the last row's slot.
    pub fn cell_to_origin(&self, cell: CellIndex) -> PixelPoint {
        let t = self.line_thickness;
        let x = cell.column as f64 * self.cell_width + cell.column as f64 * t + t / 2.0;
        let max_y = (self.rows as f64 - 1.0) * self.cell_height + self.rows as f64 * t;
        let y = max_y - (cell.row as f64 * self.cell_height + cell.row as f64 * t + t / 2.0);
        PixelPoint { x, y }
    }

    /// Nearest cell for a pixel position. Out-of-surface points never yield
    /// an out-of-bounds index; both axes saturate to the nearest edge cell.
    pub fn point_to_cell(&self, point: PixelPoint) -> CellIndex {
        let t = self.line_thickness;
        let raw_column = (point.x / (self.cell_width + t) - t / 2.0).ceil();
        let raw_row = (self.rows as f64 - 1.0) - (point.y / (self.cell_height + t) - t / 2.0).ceil();

        let column = raw_column.clamp(0.0, self.columns as f64 - 1.0) as usize;
        let row = raw_row.clamp(0.0, self.rows as f64 - 1.0) as usize;
        trace!(
            "point ({}, {}) -> cell ({}, {})",
            point.x,
            point.y,
            column,
            row
        );
        CellIndex { column, row }
    }

    /// x position of the i-th vertical separator line, `i` in `0..=columns`.
    /// Lines sit on the left side of each cell slot; index `columns` is the
    /// right border.
    pub fn vertical_line_x(&self, i: usize) -> f64 {
        i as f64 * self.cell_width + i as f64 * self.line_thickness
    }

    /// y position of the i-th horizontal separator line, `i` in `0..=rows`.
    pub fn horizontal_line_y(&self, i: usize) -> f64 {
        i as f64 * self.cell_height + i as f64 * self.line_thickness
    }
}
