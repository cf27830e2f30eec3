// src/display/mod.rs
//! Message-based display system.
//!
//! - `DisplayDriver`: platform-specific windowing primitives
//! - `messages`: request/response protocol and platform-agnostic events
//! - `drivers`: concrete driver implementations (X11, headless)

pub mod driver;
pub mod drivers;
pub mod messages;

pub use driver::DisplayDriver;
pub use drivers::{HeadlessDisplayDriver, X11DisplayDriver};
pub use messages::{
    DisplayError, DisplayEvent, DriverConfig, DriverRequest, DriverResponse, RenderSnapshot,
};
