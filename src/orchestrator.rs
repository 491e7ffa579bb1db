// src/orchestrator.rs

//! Orchestrates the application flow: consumes driver events, drives the
//! grid and the codec, and issues render commands back to the driver. This
//! module encapsulates all interaction logic, keeping it testable against a
//! mock driver and free of platform specifics.

use crate::backends::{BackendEvent, Driver, MouseButton, RenderCommand};
use crate::codec::GridCodec;
use crate::config::{AppearanceConfig, Config};
use crate::geometry::{CellIndex, CoordinateMapper, PixelPoint};
use crate::grid::GridState;
use crate::numeric;
use anyhow::{Context, Result};
use bitflags::bitflags;
use log::{debug, info};

bitflags! {
    /// Pointer buttons currently held, tracked across press/release events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PointerButtons: u8 {
        const PRIMARY = 1 << 0;
        const SECONDARY = 1 << 1;
    }
}

/// Status of the orchestrator after one iteration of its loop.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OrchestratorStatus {
    /// Events were processed successfully; keep running.
    Running,
    /// A shutdown signal was received (driver close request). The
    /// application should terminate gracefully.
    Shutdown,
}

/// Encapsulates the interaction logic between the grid and a driver.
///
/// Holds mutable borrows of the grid (single-writer ownership of cell
/// state) and of the driver; the coordinate mapper and codec are derived
/// from the configuration and the driver's surface metrics at construction.
pub struct AppOrchestrator<'a> {
    grid: &'a mut GridState,
    driver: &'a mut dyn Driver,
    mapper: CoordinateMapper,
    codec: GridCodec,
    appearance: AppearanceConfig,
    buttons: PointerButtons,
}

impl<'a> AppOrchestrator<'a> {
    /// Creates a new `AppOrchestrator`. The mapper is laid out for the
    /// surface the driver reports at this moment.
    pub fn new(grid: &'a mut GridState, driver: &'a mut dyn Driver, config: &Config) -> Self {
        let (columns, rows) = grid.dimensions();
        let state = driver.get_platform_state();
        let mapper = CoordinateMapper::new(
            columns,
            rows,
            config.appearance.line_thickness,
            state.surface_width_px,
            state.surface_height_px,
        );
        AppOrchestrator {
            grid,
            driver,
            mapper,
            codec: GridCodec::new(&config.encoding),
            appearance: config.appearance.clone(),
            buttons: PointerButtons::empty(),
        }
    }

    /// Polls the driver once and handles every event it produced.
    pub fn process_event_cycle(&mut self) -> Result<OrchestratorStatus> {
        let events = self
            .driver
            .process_events()
            .context("driver event processing failed")?;
        for event in events {
            debug!("Orchestrator: handling {:?}", event);
            if event == BackendEvent::CloseRequested {
                info!("Orchestrator: close requested, shutting down");
                return Ok(OrchestratorStatus::Shutdown);
            }
            self.handle_event(event)?;
        }
        Ok(OrchestratorStatus::Running)
    }

    fn handle_event(&mut self, event: BackendEvent) -> Result<()> {
        match event {
            BackendEvent::MouseButtonPress { button, x, y } => {
                self.handle_pointer_press(button, x, y)
            }
            BackendEvent::MouseButtonRelease { button, .. } => {
                self.handle_pointer_release(button);
                Ok(())
            }
            BackendEvent::MouseMove { x, y } => self.handle_pointer_move(x, y),
            BackendEvent::ImportText { text } => self.handle_import(&text),
            BackendEvent::ExportRequested => self.handle_export(),
            BackendEvent::ClearRequested => self.handle_clear(),
            // Intercepted in process_event_cycle.
            BackendEvent::CloseRequested => Ok(()),
        }
    }

    fn handle_pointer_press(&mut self, button: MouseButton, x: f64, y: f64) -> Result<()> {
        match button {
            MouseButton::Left => self.buttons.insert(PointerButtons::PRIMARY),
            MouseButton::Right => self.buttons.insert(PointerButtons::SECONDARY),
            _ => {}
        }
        let cell = self.mapper.point_to_cell(PixelPoint { x, y });
        self.apply_pointer(cell, true)
    }

    fn handle_pointer_release(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => self.buttons.remove(PointerButtons::PRIMARY),
            MouseButton::Right => self.buttons.remove(PointerButtons::SECONDARY),
            _ => {}
        }
    }

    fn handle_pointer_move(&mut self, x: f64, y: f64) -> Result<()> {
        let cell = self.mapper.point_to_cell(PixelPoint { x, y });
        self.apply_pointer(cell, false)
    }

    /// Primary held paints on, secondary held paints off, and a press with
    /// neither held toggles. Bare movement does nothing.
    fn apply_pointer(&mut self, cell: CellIndex, is_press: bool) -> Result<()> {
        let new_state = if self.buttons.contains(PointerButtons::PRIMARY) {
            self.grid.activate(cell.column, cell.row);
            true
        } else if self.buttons.contains(PointerButtons::SECONDARY) {
            self.grid.deactivate(cell.column, cell.row);
            false
        } else if is_press {
            self.grid.toggle(cell.column, cell.row)
        } else {
            return Ok(());
        };
        self.draw_cell(cell, new_state)
    }

    /// Redraws exactly one cell.
    fn draw_cell(&mut self, cell: CellIndex, active: bool) -> Result<()> {
        let color = if active {
            self.appearance.active_color
        } else {
            self.appearance.inactive_color
        };
        self.driver
            .execute_render_commands(vec![RenderCommand::FillRect {
                origin: self.mapper.cell_to_origin(cell),
                width: self.mapper.cell_width(),
                height: self.mapper.cell_height(),
                color,
            }])?;
        self.driver.present()
    }

    fn handle_import(&mut self, text: &str) -> Result<()> {
        match self.codec.decode(text, self.grid) {
            Ok(()) => {
                info!("Orchestrator: imported {} characters", text.len());
                self.draw_full_grid()
            }
            Err(err) => {
                info!("Orchestrator: rejected import: {}", err);
                self.driver
                    .execute_render_commands(vec![RenderCommand::ShowErrorMessage {
                        text: err.to_string(),
                    }])
            }
        }
    }

    fn handle_export(&mut self) -> Result<()> {
        let value = self.codec.encode(self.grid);
        let text = numeric::to_decimal_string(&value);
        info!("Orchestrator: exported a {}-digit number", text.len());
        self.driver.execute_render_commands(vec![
            RenderCommand::SetOutputText { text: text.clone() },
            RenderCommand::CopyToClipboard { text },
        ])
    }

    fn handle_clear(&mut self) -> Result<()> {
        self.grid.clear();
        self.draw_full_grid()
    }

    /// Repaints everything: background, separator lines, then every cell.
    pub fn draw_full_grid(&mut self) -> Result<()> {
        let (columns, rows) = self.grid.dimensions();
        let mut commands = Vec::with_capacity(columns * rows + columns + rows + 3);
        commands.push(RenderCommand::ClearSurface {
            color: self.appearance.inactive_color,
        });

        let thickness = self.appearance.line_thickness;
        // Lines sit on the left and top of each cell slot, so the loops run
        // one past the last slot to close the right and bottom borders.
        for i in 0..=columns {
            let x = self.mapper.vertical_line_x(i);
            commands.push(RenderCommand::DrawLine {
                from: PixelPoint { x, y: 0.0 },
                to: PixelPoint {
                    x,
                    y: self.mapper.surface_height(),
                },
                color: self.appearance.grid_color,
                thickness,
            });
        }
        for i in 0..=rows {
            let y = self.mapper.horizontal_line_y(i);
            commands.push(RenderCommand::DrawLine {
                from: PixelPoint { x: 0.0, y },
                to: PixelPoint {
                    x: self.mapper.surface_width(),
                    y,
                },
                color: self.appearance.grid_color,
                thickness,
            });
        }

        for column in 0..columns {
            for row in 0..rows {
                let cell = CellIndex { column, row };
                let color = if self.grid.is_active(column, row) {
                    self.appearance.active_color
                } else {
                    self.appearance.inactive_color
                };
                commands.push(RenderCommand::FillRect {
                    origin: self.mapper.cell_to_origin(cell),
                    width: self.mapper.cell_width(),
                    height: self.mapper.cell_height(),
                    color,
                });
            }
        }

        self.driver.execute_render_commands(commands)?;
        self.driver.present()
    }
}

#[cfg(test)]
mod tests;
