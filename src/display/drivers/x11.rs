// src/display/drivers/x11.rs

//! Minimal X11 DisplayDriver implementation using Xlib.
//!
//! Provides a single window, key-press and resize event handling, and
//! framebuffer presentation via `XPutImage`.

use crate::display::driver::DisplayDriver;
use crate::display::messages::{
    DisplayError, DisplayEvent, DriverConfig, DriverRequest, DriverResponse, RenderSnapshot,
};
use crate::keys::{KeySymbol, Modifiers};
use anyhow::{anyhow, Result};
use log::{debug, info, trace};
use std::ffi::CString;
use std::os::raw::{c_char, c_int, c_uint, c_void};
use std::ptr;
use x11::{keysym, xlib};

pub struct X11DisplayDriver {
    display: *mut xlib::Display,
    window: xlib::Window,
    gc: xlib::GC,
    visual: *mut xlib::Visual,
    depth: c_int,
    wm_delete_window: xlib::Atom,
    width_px: u32,
    height_px: u32,
}

impl DisplayDriver for X11DisplayDriver {
    fn new(config: &DriverConfig) -> Result<Self> {
        info!("X11DisplayDriver::new() - connecting to X server");

        unsafe {
            let display = xlib::XOpenDisplay(ptr::null());
            if display.is_null() {
                return Err(anyhow!("failed to open X11 display. Is DISPLAY set?"));
            }

            let screen = xlib::XDefaultScreen(display);
            let root = xlib::XRootWindow(display, screen);
            let visual = xlib::XDefaultVisual(display, screen);
            let depth = xlib::XDefaultDepth(display, screen);
            let black = xlib::XBlackPixel(display, screen);

            let window = xlib::XCreateSimpleWindow(
                display,
                root,
                0,
                0,
                config.width_px as c_uint,
                config.height_px as c_uint,
                1,
                black,
                black,
            );
            if window == 0 {
                xlib::XCloseDisplay(display);
                return Err(anyhow!("failed to create X11 window"));
            }

            let title = CString::new(config.title.as_str())?;
            xlib::XStoreName(display, window, title.as_ptr());

            xlib::XSelectInput(
                display,
                window,
                xlib::ExposureMask | xlib::KeyPressMask | xlib::StructureNotifyMask,
            );

            let gc = xlib::XCreateGC(display, window, 0, ptr::null_mut());

            // Ask the window manager to deliver close requests as
            // ClientMessage events instead of killing the connection.
            let mut wm_delete_window = xlib::XInternAtom(
                display,
                b"WM_DELETE_WINDOW\0".as_ptr() as *const c_char,
                xlib::False,
            );
            xlib::XSetWMProtocols(display, window, &mut wm_delete_window, 1);

            info!(
                "X11DisplayDriver: created {}x{} window",
                config.width_px, config.height_px
            );

            Ok(Self {
                display,
                window,
                gc,
                visual,
                depth,
                wm_delete_window,
                width_px: config.width_px,
                height_px: config.height_px,
            })
        }
    }

    fn handle_request(&mut self, request: DriverRequest) -> Result<DriverResponse, DisplayError> {
        match request {
            DriverRequest::Init => Ok(self.handle_init()?),
            DriverRequest::PollEvents => Ok(self.handle_poll_events()?),
            DriverRequest::RequestFrame => Ok(DriverResponse::Frame(RenderSnapshot::new(
                self.width_px,
                self.height_px,
            ))),
            DriverRequest::Present(snapshot) => self.handle_present(snapshot),
        }
    }
}

impl X11DisplayDriver {
    fn handle_init(&mut self) -> Result<DriverResponse> {
        unsafe {
            xlib::XMapWindow(self.display, self.window);
            xlib::XFlush(self.display);
        }
        Ok(DriverResponse::InitComplete {
            width_px: self.width_px,
            height_px: self.height_px,
        })
    }

    fn handle_poll_events(&mut self) -> Result<DriverResponse> {
        let mut events = Vec::new();

        unsafe {
            while xlib::XPending(self.display) > 0 {
                let mut event: xlib::XEvent = std::mem::zeroed();
                xlib::XNextEvent(self.display, &mut event);

                if let Some(display_event) = self.convert_event(event) {
                    events.push(display_event);
                }
            }
        }

        Ok(DriverResponse::Events(events))
    }

    fn convert_event(&mut self, event: xlib::XEvent) -> Option<DisplayEvent> {
        unsafe {
            match event.get_type() {
                xlib::KeyPress => {
                    let mut key_event = xlib::XKeyEvent::from(event);
                    let keysym = xlib::XLookupKeysym(&mut key_event, 0);
                    let symbol = keysym_to_symbol(keysym);
                    let modifiers = extract_modifiers(key_event.state);
                    trace!("X11 key press: keysym {:#x} -> {:?}", keysym, symbol);
                    Some(DisplayEvent::Key { symbol, modifiers })
                }
                xlib::ConfigureNotify => {
                    let configure = xlib::XConfigureEvent::from(event);
                    let (w, h) = (configure.width as u32, configure.height as u32);
                    if w == 0 || h == 0 || (w == self.width_px && h == self.height_px) {
                        return None;
                    }
                    debug!("X11 resize: {}x{} -> {}x{}", self.width_px, self.height_px, w, h);
                    self.width_px = w;
                    self.height_px = h;
                    Some(DisplayEvent::Resize {
                        width_px: w,
                        height_px: h,
                    })
                }
                xlib::ClientMessage => {
                    let client = xlib::XClientMessageEvent::from(event);
                    if client.data.get_long(0) as xlib::Atom == self.wm_delete_window {
                        Some(DisplayEvent::CloseRequested)
                    } else {
                        None
                    }
                }
                _ => None,
            }
        }
    }

    fn handle_present(&mut self, snapshot: RenderSnapshot) -> Result<DriverResponse, DisplayError> {
        trace!("X11DisplayDriver: presenting frame");

        unsafe {
            let image = xlib::XCreateImage(
                self.display,
                self.visual,
                self.depth as c_uint,
                xlib::ZPixmap,
                0,
                snapshot.framebuffer.as_ptr() as *mut c_char,
                snapshot.width_px as c_uint,
                snapshot.height_px as c_uint,
                32, // bitmap_pad
                0,  // bytes_per_line (auto)
            );
            if image.is_null() {
                return Err(DisplayError::PresentationFailed {
                    snapshot,
                    reason: "XCreateImage returned null".to_string(),
                });
            }

            xlib::XPutImage(
                self.display,
                self.window,
                self.gc,
                image,
                0,
                0,
                0,
                0,
                snapshot.width_px as c_uint,
                snapshot.height_px as c_uint,
            );

            // The pixel data belongs to the snapshot, so detach it before
            // releasing the XImage struct itself.
            (*image).data = ptr::null_mut();
            xlib::XFree(image as *mut c_void);

            xlib::XFlush(self.display);
        }

        Ok(DriverResponse::PresentComplete(snapshot))
    }
}

impl Drop for X11DisplayDriver {
    fn drop(&mut self) {
        debug!("X11DisplayDriver::drop() - cleaning up");
        unsafe {
            if !self.gc.is_null() {
                xlib::XFreeGC(self.display, self.gc);
            }
            if self.window != 0 {
                xlib::XDestroyWindow(self.display, self.window);
            }
            if !self.display.is_null() {
                xlib::XCloseDisplay(self.display);
            }
        }
    }
}

fn keysym_to_symbol(keysym: xlib::KeySym) -> KeySymbol {
    match keysym as c_uint {
        keysym::XK_Left => KeySymbol::Left,
        keysym::XK_Right => KeySymbol::Right,
        keysym::XK_Up => KeySymbol::Up,
        keysym::XK_Down => KeySymbol::Down,
        keysym::XK_Return => KeySymbol::Enter,
        keysym::XK_Escape => KeySymbol::Escape,
        keysym::XK_BackSpace => KeySymbol::Backspace,
        keysym::XK_Tab => KeySymbol::Tab,
        keysym::XK_Delete => KeySymbol::Delete,
        // Latin-1 keysyms coincide with their character codes.
        ks if ks < 0x100 => KeySymbol::Char(ks as u8 as char),
        _ => KeySymbol::Unknown,
    }
}

fn extract_modifiers(state: c_uint) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    if state & xlib::ShiftMask != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if state & xlib::ControlMask != 0 {
        modifiers |= Modifiers::CONTROL;
    }
    if state & xlib::Mod1Mask != 0 {
        modifiers |= Modifiers::ALT;
    }
    if state & xlib::Mod4Mask != 0 {
        modifiers |= Modifiers::SUPER;
    }
    modifiers
}
