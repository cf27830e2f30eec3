// src/display/drivers/headless.rs

//! Headless display driver: no window, no events, frames accepted and
//! discarded. Used by tests and for running on machines without a display.

use crate::display::driver::DisplayDriver;
use crate::display::messages::{
    DisplayError, DriverConfig, DriverRequest, DriverResponse, RenderSnapshot,
};
use anyhow::Result;
use log::{info, trace};

pub struct HeadlessDisplayDriver {
    width_px: u32,
    height_px: u32,
}

impl DisplayDriver for HeadlessDisplayDriver {
    fn new(config: &DriverConfig) -> Result<Self> {
        info!(
            "HeadlessDisplayDriver::new() - {}x{}",
            config.width_px, config.height_px
        );
        Ok(Self {
            width_px: config.width_px,
            height_px: config.height_px,
        })
    }

    fn handle_request(&mut self, request: DriverRequest) -> Result<DriverResponse, DisplayError> {
        match request {
            DriverRequest::Init => Ok(DriverResponse::InitComplete {
                width_px: self.width_px,
                height_px: self.height_px,
            }),
            DriverRequest::PollEvents => Ok(DriverResponse::Events(Vec::new())),
            DriverRequest::RequestFrame => Ok(DriverResponse::Frame(RenderSnapshot::new(
                self.width_px,
                self.height_px,
            ))),
            DriverRequest::Present(snapshot) => {
                trace!("HeadlessDisplayDriver: present (discarded)");
                Ok(DriverResponse::PresentComplete(snapshot))
            }
        }
    }
}
