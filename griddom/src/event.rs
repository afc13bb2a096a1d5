/// Pointer and window events, targeted at element ids where known.
///
/// Coordinates are page pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse click (press and release without movement).
    Click {
        target: Option<String>,
        x: i32,
        y: i32,
        button: MouseButton,
    },
    /// A drag gesture began on an element.
    DragStart {
        target: Option<String>,
        x: i32,
        y: i32,
    },
    /// Pointer moved while a drag is in progress.
    Drag { x: i32, y: i32 },
    /// The dragged element was dropped.
    Drop { x: i32, y: i32 },
    /// Window resized.
    Resize { width: i32, height: i32 },
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl Event {
    /// Convenience for a left click on a known element.
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: Some(target.into()),
            x: 0,
            y: 0,
            button: MouseButton::Left,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Click { target, .. } | Self::DragStart { target, .. } => target.as_deref(),
            _ => None,
        }
    }
}
