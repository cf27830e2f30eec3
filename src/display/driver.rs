// src/display/driver.rs
//! DisplayDriver trait - minimal interface for platform windowing.
//!
//! The trait exposes only the primitives the application loop needs:
//! construction, then a request/response call for everything else. All
//! policy (what to draw, when to poll) lives with the caller.
//!
//! ## Lifecycle
//! 1. `new()` - open the connection and create the (unmapped) window
//! 2. `handle_request(Init)` - map the window, discover metrics
//! 3. Request/response loop - events, framebuffers, presentation
//! 4. `Drop` - cleanup

use crate::display::messages::{DisplayError, DriverConfig, DriverRequest, DriverResponse};
use anyhow::Result;

/// Minimal platform-specific display driver interface.
pub trait DisplayDriver {
    /// Connects to the platform and prepares a window sized per `config`.
    /// The window is not shown until `handle_request(Init)`.
    fn new(config: &DriverConfig) -> Result<Self>
    where
        Self: Sized;

    /// Handles one request, returning the matching response.
    ///
    /// ## Request/Response pairs
    /// - `Init` → `InitComplete`
    /// - `PollEvents` → `Events`
    /// - `RequestFrame` → `Frame` (ownership to caller)
    /// - `Present(frame)` → `PresentComplete` (ownership returned)
    ///
    /// A failed `Present` returns the frame via
    /// `DisplayError::PresentationFailed` instead of dropping it.
    fn handle_request(&mut self, request: DriverRequest) -> Result<DriverResponse, DisplayError>;
}
