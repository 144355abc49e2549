//! Display boundary for the control panel status screen.
//!
//! The core never draws pixels. It emits [`DisplayRequest`] values — short
//! text placed at a position with a font scale — and a collaborator
//! implementing [`PanelDisplay`] renders them (OLED, LCD, terminal, or the
//! mock for tests).

use core::fmt::{self, Write};

use heapless::String as HString;

/// Maximum length of one display request's text.
pub const MAX_DISPLAY_TEXT: usize = 32;

/// Bounded text for a display request.
pub type DisplayText = HString<MAX_DISPLAY_TEXT>;

/// One rendering request from the core to the display collaborator.
///
/// `commit` marks the last request of a screen update; implementations that
/// double-buffer should flush when they see it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayRequest {
    /// Text to render (truncated to [`MAX_DISPLAY_TEXT`]).
    pub text: DisplayText,
    /// Horizontal pixel position.
    pub x: u8,
    /// Vertical pixel position.
    pub y: u8,
    /// Integer font scale.
    pub size: u8,
    /// Flush the screen after this request.
    pub commit: bool,
}

impl DisplayRequest {
    /// Build a request, truncating the text if it is too long.
    pub fn new(text: &str, x: u8, y: u8, size: u8, commit: bool) -> Self {
        Self {
            text: display_text(text),
            x,
            y,
            size,
            commit,
        }
    }

    /// Build a request carrying formatted arguments.
    ///
    /// Output that does not fit is truncated rather than erroring.
    pub fn format(args: fmt::Arguments<'_>, x: u8, y: u8, size: u8, commit: bool) -> Self {
        let mut text = DisplayText::new();
        let _ = text.write_fmt(args);
        Self {
            text,
            x,
            y,
            size,
            commit,
        }
    }
}

/// Create a [`DisplayText`] from a `&str`, truncating at a char boundary.
pub fn display_text(s: &str) -> DisplayText {
    let mut hs = DisplayText::new();
    let take = s.len().min(MAX_DISPLAY_TEXT);
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

/// Display trait for rendering panel status.
///
/// Implementors provide hardware-specific rendering. A failed `init` is
/// fatal: the panel must not enter its control loop with a dead display,
/// so callers propagate the error and halt.
///
/// # Example
///
/// ```ignore
/// use rs_yardz::traits::{PanelDisplay, DisplayRequest};
///
/// struct MyDisplay { /* ... */ }
///
/// impl PanelDisplay for MyDisplay {
///     type Error = ();
///
///     fn init(&mut self) -> Result<(), ()> { Ok(()) }
///     fn clear(&mut self) -> Result<(), ()> { Ok(()) }
///     fn draw(&mut self, request: &DisplayRequest) -> Result<(), ()> {
///         // Place request.text at (request.x, request.y)...
///         Ok(())
///     }
/// }
/// ```
pub trait PanelDisplay {
    /// Error type for display operations.
    type Error;

    /// Initializes the display hardware.
    ///
    /// Called once before the control loop starts. A returned error must
    /// abort startup.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Clears the display.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Renders one request.
    fn draw(&mut self, request: &DisplayRequest) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_truncates_long_text() {
        let long = "X".repeat(80);
        let req = DisplayRequest::new(&long, 0, 0, 1, true);
        assert_eq!(req.text.len(), MAX_DISPLAY_TEXT);
    }

    #[test]
    fn display_text_utf8_boundary() {
        let input = "🚂🚃🚄🚅🚆🚇🚈🚉🚊"; // 4 bytes each
        let s = display_text(input);
        assert!(s.len() <= MAX_DISPLAY_TEXT);
        assert!(core::str::from_utf8(s.as_bytes()).is_ok());
    }

    #[test]
    fn format_builds_numbered_text() {
        let req = DisplayRequest::format(format_args!("TRACK {}", 9), 0, 24, 3, true);
        assert_eq!(req.text.as_str(), "TRACK 9");
        assert_eq!(req.y, 24);
        assert!(req.commit);
    }
}
