use super::{Display, Overflow, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub display: Display,
    pub visibility: Visibility,
    pub overflow_y: Overflow,
    /// Explicit width in pixels.
    pub width: Option<i32>,
    /// Explicit height in pixels.
    pub height: Option<i32>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_displayed(&self) -> bool {
        self.display != Display::None
    }

    pub fn is_visible(&self) -> bool {
        self.is_displayed() && self.visibility == Visibility::Visible
    }

    /// Parse an inline `style` attribute. Unknown declarations are ignored.
    pub fn parse_inline(css: &str) -> Self {
        let mut style = Self::default();
        for decl in css.split(';') {
            let Some((prop, value)) = decl.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match prop.trim().to_ascii_lowercase().as_str() {
                "display" if value.eq_ignore_ascii_case("none") => {
                    style.display = Display::None;
                }
                "visibility" if value.eq_ignore_ascii_case("hidden") => {
                    style.visibility = Visibility::Hidden;
                }
                "overflow" | "overflow-y" if value.eq_ignore_ascii_case("auto") => {
                    style.overflow_y = Overflow::Auto;
                }
                "width" => style.width = parse_px(value),
                "height" => style.height = parse_px(value),
                _ => {}
            }
        }
        style
    }

    /// Serialize back to an inline `style` attribute, or `None` when default.
    pub fn to_inline(&self) -> Option<String> {
        let mut decls = Vec::new();
        if self.display == Display::None {
            decls.push("display: none".to_string());
        }
        if self.visibility == Visibility::Hidden {
            decls.push("visibility: hidden".to_string());
        }
        if self.overflow_y == Overflow::Auto {
            decls.push("overflow-y: auto".to_string());
        }
        if let Some(width) = self.width {
            decls.push(format!("width: {width}px"));
        }
        if let Some(height) = self.height {
            decls.push(format!("height: {height}px"));
        }
        if decls.is_empty() {
            None
        } else {
            Some(decls.join("; "))
        }
    }
}

/// Largest pixel length accepted from markup, in either direction.
pub const MAX_PX: i32 = 1_000_000;

/// Parse a pixel length such as `120px` or `120`. Values beyond
/// [`MAX_PX`] are clamped.
pub fn parse_px(value: &str) -> Option<i32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(-f64::from(MAX_PX), f64::from(MAX_PX)) as i32)
}
