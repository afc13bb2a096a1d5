#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// A bare text node. Rendered without a surrounding tag.
    Text,
    Div,
    Span,
    A,
    Label,
    Input,
    Ul,
    Li,
    Table,
    Colgroup,
    Col,
    Thead,
    Tbody,
    Tfoot,
    Tr,
    Th,
    Td,
    Other(String),
}

impl Tag {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "div" => Self::Div,
            "span" => Self::Span,
            "a" => Self::A,
            "label" => Self::Label,
            "input" => Self::Input,
            "ul" => Self::Ul,
            "li" => Self::Li,
            "table" => Self::Table,
            "colgroup" => Self::Colgroup,
            "col" => Self::Col,
            "thead" => Self::Thead,
            "tbody" => Self::Tbody,
            "tfoot" => Self::Tfoot,
            "tr" => Self::Tr,
            "th" => Self::Th,
            "td" => Self::Td,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Text => "",
            Self::Div => "div",
            Self::Span => "span",
            Self::A => "a",
            Self::Label => "label",
            Self::Input => "input",
            Self::Ul => "ul",
            Self::Li => "li",
            Self::Table => "table",
            Self::Colgroup => "colgroup",
            Self::Col => "col",
            Self::Thead => "thead",
            Self::Tbody => "tbody",
            Self::Tfoot => "tfoot",
            Self::Tr => "tr",
            Self::Th => "th",
            Self::Td => "td",
            Self::Other(name) => name,
        }
    }

    /// Inline content flows horizontally inside a line box.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Span | Self::A | Self::Label | Self::Input
        )
    }

    /// Void elements have no closing tag.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Col | Self::Input)
            || matches!(self, Self::Other(name) if name == "br" || name == "img")
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, Self::Th | Self::Td)
    }

    pub fn is_row_group(&self) -> bool {
        matches!(self, Self::Thead | Self::Tbody | Self::Tfoot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Invisible but still occupies layout space.
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Normal,
    /// Removed from layout; measures as zero.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Auto,
}
