// src/backends/mock.rs

use crate::backends::{BackendEvent, Driver, PlatformState, RenderCommand};
use anyhow::Result;

/// Test driver: events are scripted by the test, render commands are
/// recorded for assertions.
pub struct MockDriver {
    events: Vec<BackendEvent>,
    commands: Vec<RenderCommand>,
    platform_state: PlatformState,
    presents: usize,
}

impl MockDriver {
    pub fn new(surface_width_px: f64, surface_height_px: f64) -> Self {
        Self {
            events: Vec::new(),
            commands: Vec::new(),
            platform_state: PlatformState {
                surface_width_px,
                surface_height_px,
            },
            presents: 0,
        }
    }

    pub fn push_event(&mut self, event: BackendEvent) {
        self.events.push(event);
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn presents(&self) -> usize {
        self.presents
    }
}

impl Driver for MockDriver {
    fn process_events(&mut self) -> Result<Vec<BackendEvent>> {
        Ok(self.events.drain(..).collect())
    }

    fn get_platform_state(&self) -> PlatformState {
        self.platform_state
    }

    fn execute_render_commands(&mut self, commands: Vec<RenderCommand>) -> Result<()> {
        self.commands.extend(commands);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }
}
