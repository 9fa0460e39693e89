//! Widget event types.
//!
//! Events are delivered to widgets by the host through
//! [`Widget::event`](super::Widget::event) and to the document-level click
//! dispatcher (see [`super::document`]). A mouse press may carry the
//! explicit collapse-suppression marker that nested controls use to keep
//! the dropdown open.

use super::geometry::Point;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left/primary button.
    Left,
    /// The right/secondary button.
    Right,
    /// The middle button.
    Middle,
}

/// A mouse button press.
///
/// `local_pos` is in the receiving widget's coordinate space;
/// `global_pos` is in document coordinates (what the document-level click
/// dispatcher sees).
///
/// The `ignore_collapse` marker is the explicit opt-out from outside-click
/// collapse: a control nested inside (or cooperating with) the dropdown
/// tags its events with it so the panel stays open. The dispatcher checks
/// the marker before touching any widget state.
#[derive(Debug, Clone, PartialEq)]
pub struct MousePressEvent {
    /// Position in the receiving widget's local coordinates.
    pub local_pos: Point,
    /// Position in document coordinates.
    pub global_pos: Point,
    /// Which button was pressed.
    pub button: MouseButton,
    /// Modifiers held during the press.
    pub modifiers: KeyboardModifiers,
    /// When set, outside-click handling must leave panels open.
    pub ignore_collapse: bool,
}

impl MousePressEvent {
    /// A plain left-button press at the given position (local == global).
    pub fn left_click(pos: Point) -> Self {
        Self {
            local_pos: pos,
            global_pos: pos,
            button: MouseButton::Left,
            modifiers: KeyboardModifiers::NONE,
            ignore_collapse: false,
        }
    }

    /// Sets the local position (when widget and document coordinates
    /// differ).
    pub fn with_local_pos(mut self, pos: Point) -> Self {
        self.local_pos = pos;
        self
    }

    /// Sets the held modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Tags the event so outside-click handling ignores it.
    pub fn with_ignore_collapse(mut self) -> Self {
        self.ignore_collapse = true;
        self
    }
}

/// A mouse button release.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseReleaseEvent {
    /// Position in the receiving widget's local coordinates.
    pub local_pos: Point,
    /// Which button was released.
    pub button: MouseButton,
}

/// Events routed into widgets by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// A mouse button was pressed inside the widget.
    MousePress(MousePressEvent),
    /// A mouse button was released.
    MouseRelease(MouseReleaseEvent),
}
