pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod parse;
pub mod render;
pub mod text;
pub mod types;

pub use element::{Content, Element, MAX_COLSPAN};
pub use event::{Event, MouseButton};
pub use hit::hit_test;
pub use layout::{layout, layout_with, LayoutResult, Rect, TextMetrics};
pub use parse::parse_fragment;
pub use render::to_html;
pub use types::*;
