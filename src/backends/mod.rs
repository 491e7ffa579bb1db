// src/backends/mod.rs

//! Defines the `Driver` trait for display/input backends and the common
//! types exchanged with the orchestrator: `BackendEvent`, `RenderCommand`,
//! `PlatformState`, and `MouseButton`.
//!
//! A driver owns the drawing surface and the input hardware. It reports
//! pointer positions in surface pixels and never interprets them; mapping
//! pixels to cells is the orchestrator's job, through the coordinate
//! mapper. Symmetrically, render commands arrive in surface pixels, already
//! mapped, so a driver just draws.

use crate::color::Color;
use crate::geometry::PixelPoint;
use anyhow::Result;

pub mod console;
#[cfg(test)]
pub mod mock;

pub use console::ConsoleDriver;

/// Events originating from the backend (platform-specific UI/input).
/// These are processed by the `AppOrchestrator`.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// A mouse button was pressed at the given surface position.
    MouseButtonPress { button: MouseButton, x: f64, y: f64 },
    /// A mouse button was released at the given surface position.
    MouseButtonRelease { button: MouseButton, x: f64, y: f64 },
    /// The pointer moved to the given surface position.
    MouseMove { x: f64, y: f64 },
    /// The user submitted text to be decoded onto the grid. Drivers strip
    /// whitespace and digit-grouping separators before emitting this; the
    /// core still validates what remains.
    ImportText { text: String },
    /// The user asked for the grid's current decimal encoding.
    ExportRequested,
    /// The user asked to blank the whole grid.
    ClearRequested,
    /// The platform asked the application to quit.
    CloseRequested,
}

/// Represents mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u8),
}

/// Drawing and UI commands for a driver to execute. Coordinates are surface
/// pixels produced by the coordinate mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Clears the entire surface to the given color.
    ClearSurface { color: Color },
    /// Fills the interior rectangle of one cell.
    FillRect {
        origin: PixelPoint,
        width: f64,
        height: f64,
        color: Color,
    },
    /// Draws a separator line between the two points.
    DrawLine {
        from: PixelPoint,
        to: PixelPoint,
        color: Color,
        thickness: f64,
    },
    /// Replaces the contents of the output text area.
    SetOutputText { text: String },
    /// Shows a user-facing error message.
    ShowErrorMessage { text: String },
    /// Copies text to the platform clipboard.
    CopyToClipboard { text: String },
}

/// Surface metrics reported by a driver. The orchestrator derives the
/// coordinate mapper from these at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformState {
    /// Current width of the drawing surface in pixels.
    pub surface_width_px: f64,
    /// Current height of the drawing surface in pixels.
    pub surface_height_px: f64,
}

/// Defines the interface for a rendering and platform interaction driver.
///
/// A `Driver` is responsible for:
/// 1. Surface setup and teardown.
/// 2. Translating platform input into generic `BackendEvent`s.
/// 3. Executing abstract drawing commands without the orchestrator needing
///    to know backend specifics.
pub trait Driver {
    /// Drains pending platform events. May block on backends whose input
    /// source is synchronous (the console driver blocks on stdin).
    fn process_events(&mut self) -> Result<Vec<BackendEvent>>;

    /// Current surface metrics.
    fn get_platform_state(&self) -> PlatformState;

    /// Executes a batch of render commands.
    fn execute_render_commands(&mut self, commands: Vec<RenderCommand>) -> Result<()>;

    /// Flushes any buffered drawing to the display.
    fn present(&mut self) -> Result<()>;

    /// Releases platform resources.
    fn cleanup(&mut self) -> Result<()>;
}
