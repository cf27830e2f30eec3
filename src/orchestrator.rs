// src/orchestrator.rs
//! Orchestrates the main application flow, coordinating the display
//! driver, input mapper, transform state, and renderer. One call to
//! [`AppOrchestrator::process_event_cycle`] is one iteration of the
//! control loop: poll input, apply the implied edits, recompose the model
//! matrix, draw, present.

use crate::display::{
    DisplayDriver, DisplayError, DisplayEvent, DriverRequest, DriverResponse, RenderSnapshot,
};
use crate::input::{InputMapper, ViewerAction};
use crate::renderer::Renderer;
use crate::transform::{model_matrix, TransformState};
use anyhow::{anyhow, Context, Result};
use log::{debug, info, trace, warn};

/// Status of the orchestrator after one iteration of its loop.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OrchestratorStatus {
    /// The cycle completed; keep running.
    Running,
    /// A shutdown was requested (quit key or window close). The
    /// application should terminate gracefully.
    Shutdown,
}

/// Encapsulates the per-frame control flow of the viewer.
///
/// The driver is a trait object so tests can substitute a scripted
/// implementation; the transform state is borrowed so the caller keeps
/// ownership of it for the process lifetime.
pub struct AppOrchestrator<'a> {
    driver: &'a mut dyn DisplayDriver,
    transform: &'a mut TransformState,
    mapper: InputMapper,
    renderer: Renderer,
    frame: Option<RenderSnapshot>,
    width_px: u32,
    height_px: u32,
}

impl<'a> AppOrchestrator<'a> {
    /// Initializes the driver (showing the window) and builds the
    /// orchestrator around it.
    pub fn new(
        driver: &'a mut dyn DisplayDriver,
        transform: &'a mut TransformState,
        mapper: InputMapper,
        renderer: Renderer,
    ) -> Result<Self> {
        let response = driver
            .handle_request(DriverRequest::Init)
            .map_err(|e| anyhow!("display init failed: {}", e))?;
        let (width_px, height_px) = match response {
            DriverResponse::InitComplete {
                width_px,
                height_px,
            } => (width_px, height_px),
            other => return Err(anyhow!("unexpected response to Init: {:?}", other)),
        };
        info!("display initialized at {}x{}", width_px, height_px);

        Ok(AppOrchestrator {
            driver,
            transform,
            mapper,
            renderer,
            frame: None,
            width_px,
            height_px,
        })
    }

    /// Runs one control-loop iteration: process pending events, then draw
    /// and present one frame.
    pub fn process_event_cycle(&mut self) -> Result<OrchestratorStatus> {
        if self.process_display_events()? == OrchestratorStatus::Shutdown {
            return Ok(OrchestratorStatus::Shutdown);
        }
        self.draw_frame()?;
        Ok(OrchestratorStatus::Running)
    }

    fn process_display_events(&mut self) -> Result<OrchestratorStatus> {
        let response = self
            .driver
            .handle_request(DriverRequest::PollEvents)
            .map_err(|e| anyhow!("event poll failed: {}", e))?;
        let events = match response {
            DriverResponse::Events(events) => events,
            other => return Err(anyhow!("unexpected response to PollEvents: {:?}", other)),
        };

        for event in events {
            trace!("handling display event: {:?}", event);
            match event {
                DisplayEvent::Key { symbol, modifiers } => {
                    match self.mapper.map(symbol, modifiers) {
                        Some(ViewerAction::Quit) => {
                            info!("quit key pressed; shutting down");
                            return Ok(OrchestratorStatus::Shutdown);
                        }
                        Some(ViewerAction::Edit(action)) => {
                            debug!("applying {:?}", action);
                            self.transform.apply(action);
                        }
                        None => {}
                    }
                }
                DisplayEvent::Resize {
                    width_px,
                    height_px,
                } => {
                    debug!("viewport resized to {}x{}", width_px, height_px);
                    self.width_px = width_px;
                    self.height_px = height_px;
                    // Stale frame has the old dimensions; request a new
                    // one on the next draw.
                    self.frame = None;
                }
                DisplayEvent::CloseRequested => {
                    info!("window close requested; shutting down");
                    return Ok(OrchestratorStatus::Shutdown);
                }
            }
        }
        Ok(OrchestratorStatus::Running)
    }

    fn draw_frame(&mut self) -> Result<()> {
        let mut frame = match self.frame.take() {
            Some(frame) => frame,
            None => match self
                .driver
                .handle_request(DriverRequest::RequestFrame)
                .map_err(|e| anyhow!("framebuffer request failed: {}", e))?
            {
                DriverResponse::Frame(frame) => frame,
                other => return Err(anyhow!("unexpected response to RequestFrame: {:?}", other)),
            },
        };

        let aspect_ratio = self.width_px as f32 / (self.height_px.max(1)) as f32;
        let matrix = model_matrix(self.transform, aspect_ratio);
        self.renderer.draw(&matrix, &mut frame);

        match self.driver.handle_request(DriverRequest::Present(frame)) {
            Ok(DriverResponse::PresentComplete(frame)) => {
                self.frame = Some(frame);
                Ok(())
            }
            Ok(other) => Err(anyhow!("unexpected response to Present: {:?}", other)),
            Err(DisplayError::PresentationFailed { snapshot, reason }) => {
                // Keep the buffer so the ping-pong isn't starved; skip
                // this frame.
                warn!("presentation failed: {}; frame skipped", reason);
                self.frame = Some(snapshot);
                Ok(())
            }
            Err(DisplayError::Backend(e)) => Err(e).context("presenting frame"),
        }
    }
}
