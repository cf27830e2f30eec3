// src/display/messages.rs
//! Message types for communication with a `DisplayDriver`.
//!
//! All framebuffer traffic happens via ownership transfer: the driver
//! hands a frame out with `Frame`, receives it back in `Present`, and
//! returns it again in `PresentComplete` so the buffer ping-pongs without
//! copies or shared state.

use crate::keys::{KeySymbol, Modifiers};
use thiserror::Error;

/// Bytes per framebuffer pixel (BGRX, 32-bit words).
pub const BYTES_PER_PIXEL: usize = 4;

/// Construction parameters for a driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub width_px: u32,
    pub height_px: u32,
    pub title: String,
}

/// A frame's pixels together with the dimensions they were rendered at.
///
/// Pixels are packed 4 bytes each in BGRX order, matching what the X11
/// driver feeds to `XPutImage` on a little-endian 24-depth visual.
#[derive(Debug)]
pub struct RenderSnapshot {
    pub framebuffer: Box<[u8]>,
    pub width_px: u32,
    pub height_px: u32,
}

impl RenderSnapshot {
    /// Allocates a zeroed frame for the given dimensions.
    pub fn new(width_px: u32, height_px: u32) -> Self {
        let len = width_px as usize * height_px as usize * BYTES_PER_PIXEL;
        RenderSnapshot {
            framebuffer: vec![0u8; len].into_boxed_slice(),
            width_px,
            height_px,
        }
    }
}

/// Requests sent to a `DisplayDriver`.
#[derive(Debug)]
pub enum DriverRequest {
    /// Show the window and report its metrics.
    Init,

    /// Fetch pending native events.
    PollEvents,

    /// Request a framebuffer sized to the current window.
    RequestFrame,

    /// Display the frame. The driver takes ownership and returns it in
    /// `PresentComplete` (or inside `DisplayError::PresentationFailed`).
    Present(RenderSnapshot),
}

/// Responses from a `DisplayDriver`.
#[derive(Debug)]
pub enum DriverResponse {
    /// Initialization complete with discovered metrics.
    InitComplete { width_px: u32, height_px: u32 },

    /// Native events that occurred since the last poll.
    Events(Vec<DisplayEvent>),

    /// Framebuffer ownership transferred to the caller for rendering.
    Frame(RenderSnapshot),

    /// Frame shown; buffer ownership returned for reuse.
    PresentComplete(RenderSnapshot),
}

/// Platform-agnostic display events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// Key press. Releases and repeats are not reported.
    Key {
        symbol: KeySymbol,
        modifiers: Modifiers,
    },

    /// Window resize.
    Resize { width_px: u32, height_px: u32 },

    /// User requested window close.
    CloseRequested,
}

/// Driver-side failures.
///
/// A failed presentation returns the framebuffer so the caller's
/// buffer ping-pong is not starved by one bad frame.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("presentation failed: {reason}")]
    PresentationFailed {
        snapshot: RenderSnapshot,
        reason: String,
    },
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
