// src/backends/console.rs

//! Line-oriented terminal driver.
//!
//! Stands in for a real canvas: drawing commands land in a grayscale pixel
//! framebuffer, and `present` renders one character per cell by sampling
//! each cell's center pixel. Input arrives as commands read from stdin;
//! `click` takes raw surface pixels, while `toggle`/`paint`/`erase` take
//! cell indices and are translated to the matching cell-center pixels, the
//! way a pointer click on that cell would arrive.

use super::{BackendEvent, Driver, MouseButton, PlatformState, RenderCommand};
use crate::config::AppearanceConfig;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::{self, BufRead, Write};

/// Interior pixels per cell. Small, since the framebuffer only ever gets
/// sampled back down to one character per cell.
const CELL_PIXELS: f64 = 4.0;

const HELP_TEXT: &str = "\
commands:
  <number>          decode a decimal number onto the grid
  export            print (and copy) the grid's decimal encoding
  toggle <col> <row>  flip one cell (row 0 is the bottom row)
  paint <col> <row>   activate one cell
  erase <col> <row>   deactivate one cell
  click <x> <y> [left|right|middle]  raw pointer event in surface pixels
  clear             blank the whole grid
  help              show this text
  quit              exit";

/// Driver for running the grid editor inside a terminal.
pub struct ConsoleDriver {
    columns: usize,
    rows: usize,
    line_thickness: f64,
    surface_width: f64,
    surface_height: f64,
    fb_width: usize,
    fb_height: usize,
    /// Grayscale framebuffer, row-major, one byte per pixel.
    framebuffer: Vec<u8>,
    dirty: bool,
}

impl ConsoleDriver {
    /// Creates a driver sized for the configured grid: `CELL_PIXELS` of
    /// interior per cell plus the configured line thickness.
    pub fn new(appearance: &AppearanceConfig) -> Self {
        let columns = appearance.columns;
        let rows = appearance.rows;
        let line_thickness = appearance.line_thickness;
        let surface_width = columns as f64 * (CELL_PIXELS + line_thickness);
        let surface_height = rows as f64 * (CELL_PIXELS + line_thickness);
        let fb_width = surface_width.ceil() as usize;
        let fb_height = surface_height.ceil() as usize;
        info!(
            "ConsoleDriver: {}x{} px surface for {}x{} cells",
            fb_width, fb_height, columns, rows
        );
        ConsoleDriver {
            columns,
            rows,
            line_thickness,
            surface_width,
            surface_height,
            fb_width,
            fb_height,
            framebuffer: vec![0; fb_width * fb_height],
            dirty: true,
        }
    }

    /// Center pixel of a cell addressed by its visual (top-based) row.
    fn cell_center(&self, column: usize, visual_row: usize) -> (f64, f64) {
        let pitch = CELL_PIXELS + self.line_thickness;
        let x = column as f64 * pitch + self.line_thickness / 2.0 + CELL_PIXELS / 2.0;
        let y = visual_row as f64 * pitch + self.line_thickness / 2.0 + CELL_PIXELS / 2.0;
        (x, y)
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, level: u8) {
        let x0 = x.max(0.0).floor() as usize;
        let y0 = y.max(0.0).floor() as usize;
        let x1 = ((x + width).ceil() as usize).min(self.fb_width);
        let y1 = ((y + height).ceil() as usize).min(self.fb_height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for row in y0..y1 {
            let base = row * self.fb_width;
            self.framebuffer[base + x0..base + x1].fill(level);
        }
        self.dirty = true;
    }

    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), thickness: f64, level: u8) {
        let half = thickness / 2.0;
        if from.0 == to.0 {
            let top = from.1.min(to.1);
            self.fill_rect(from.0 - half, top, thickness, (to.1 - from.1).abs(), level);
        } else if from.1 == to.1 {
            let left = from.0.min(to.0);
            self.fill_rect(left, from.1 - half, (to.0 - from.0).abs(), thickness, level);
        } else {
            warn!("ConsoleDriver: ignoring non-axis-aligned line");
        }
    }

    /// Pointer press-then-release at a surface position, the shape a click
    /// arrives in from real pointer hardware.
    fn click_events(button: MouseButton, x: f64, y: f64) -> Vec<BackendEvent> {
        vec![
            BackendEvent::MouseButtonPress { button, x, y },
            BackendEvent::MouseButtonRelease { button, x, y },
        ]
    }

    /// Strips whitespace and digit-grouping separators; everything else is
    /// left for the core's format validation to judge.
    fn sanitize_number(raw: &str) -> String {
        raw.chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
            .collect()
    }

    fn parse_cell_command(&self, button: MouseButton, words: &[&str]) -> Vec<BackendEvent> {
        let (Some(column), Some(row)) = (
            words.first().and_then(|w| w.parse::<usize>().ok()),
            words.get(1).and_then(|w| w.parse::<usize>().ok()),
        ) else {
            println!("expected: <command> <col> <row>");
            return Vec::new();
        };
        if column >= self.columns || row >= self.rows {
            println!(
                "cell ({}, {}) out of range; grid is {}x{}",
                column, row, self.columns, self.rows
            );
            return Vec::new();
        }
        let (x, y) = self.cell_center(column, self.rows - 1 - row);
        Self::click_events(button, x, y)
    }

    fn parse_click_command(&self, words: &[&str]) -> Vec<BackendEvent> {
        let (Some(x), Some(y)) = (
            words.first().and_then(|w| w.parse::<f64>().ok()),
            words.get(1).and_then(|w| w.parse::<f64>().ok()),
        ) else {
            println!("expected: click <x> <y> [left|right|middle]");
            return Vec::new();
        };
        let button = match words.get(2).copied() {
            Some("left") => MouseButton::Left,
            Some("right") => MouseButton::Right,
            None | Some("middle") => MouseButton::Middle,
            Some(other) => {
                println!("unknown button {:?}", other);
                return Vec::new();
            }
        };
        Self::click_events(button, x, y)
    }

    fn parse_command(&self, line: &str) -> Vec<BackendEvent> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(&first) = words.first() else {
            return Vec::new();
        };
        match first {
            "quit" | "exit" | "q" => vec![BackendEvent::CloseRequested],
            "export" | "e" => vec![BackendEvent::ExportRequested],
            "clear" => vec![BackendEvent::ClearRequested],
            "help" | "?" => {
                println!("{}", HELP_TEXT);
                Vec::new()
            }
            "toggle" => self.parse_cell_command(MouseButton::Middle, &words[1..]),
            "paint" => self.parse_cell_command(MouseButton::Left, &words[1..]),
            "erase" => self.parse_cell_command(MouseButton::Right, &words[1..]),
            "click" => self.parse_click_command(&words[1..]),
            _ if first.starts_with(|c: char| c.is_ascii_digit()) => {
                vec![BackendEvent::ImportText {
                    text: Self::sanitize_number(line),
                }]
            }
            other => {
                println!("unknown command {:?}; try 'help'", other);
                Vec::new()
            }
        }
    }
}

impl Driver for ConsoleDriver {
    fn process_events(&mut self) -> Result<Vec<BackendEvent>> {
        let mut out = io::stdout();
        write!(out, "bitplot> ").context("failed to write prompt")?;
        out.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            debug!("ConsoleDriver: stdin EOF");
            return Ok(vec![BackendEvent::CloseRequested]);
        }
        Ok(self.parse_command(line.trim()))
    }

    fn get_platform_state(&self) -> PlatformState {
        PlatformState {
            surface_width_px: self.surface_width,
            surface_height_px: self.surface_height,
        }
    }

    fn execute_render_commands(&mut self, commands: Vec<RenderCommand>) -> Result<()> {
        for command in commands {
            match command {
                RenderCommand::ClearSurface { color } => {
                    let level = color.luminance();
                    self.framebuffer.fill(level);
                    self.dirty = true;
                }
                RenderCommand::FillRect {
                    origin,
                    width,
                    height,
                    color,
                } => self.fill_rect(origin.x, origin.y, width, height, color.luminance()),
                RenderCommand::DrawLine {
                    from,
                    to,
                    color,
                    thickness,
                } => self.draw_line((from.x, from.y), (to.x, to.y), thickness, color.luminance()),
                RenderCommand::SetOutputText { text } => println!("output: {}", text),
                RenderCommand::ShowErrorMessage { text } => println!("error: {}", text),
                RenderCommand::CopyToClipboard { text } => {
                    debug!(
                        "ConsoleDriver: no clipboard; dropping {} copied characters",
                        text.len()
                    );
                }
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out)?;
        for visual_row in 0..self.rows {
            let mut rendered = String::with_capacity(self.columns * 3);
            for column in 0..self.columns {
                let (x, y) = self.cell_center(column, visual_row);
                let px = (x.floor() as usize).min(self.fb_width - 1);
                let py = (y.floor() as usize).min(self.fb_height - 1);
                let lit = self.framebuffer[py * self.fb_width + px] >= 128;
                rendered.push(if lit { '█' } else { '·' });
            }
            writeln!(out, "{}", rendered)?;
        }
        out.flush().context("failed to flush frame")?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        info!("ConsoleDriver: cleanup");
        Ok(())
    }
}
