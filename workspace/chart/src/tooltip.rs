//! Hover tooltip model shared by every drawing surface.

use common::Metric;

use crate::format::format_count;

/// Offset applied to the pointer position while it moves over a marker.
pub const MOVE_OFFSET: (f64, f64) = (-400.0, -200.0);

/// What a marker shows when hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub metric: Metric,
    pub year: String,
    pub value: f64,
}

impl TooltipContent {
    pub fn title(&self) -> String {
        self.metric.label()
    }

    /// Markup written into the tooltip element.
    pub fn html(&self) -> String {
        format!(
            "<strong>{}</strong><br/>Year: {}<br/>Count: {}",
            escape(&self.title()),
            escape(&self.year),
            format_count(self.value)
        )
    }

    /// Plain text form, used where markup is not available.
    pub fn text(&self) -> String {
        format!(
            "{}\nYear: {}\nCount: {}",
            self.title(),
            self.year,
            format_count(self.value)
        )
    }
}

/// Pointer interaction on a marker, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter { page_x: f64, page_y: f64 },
    Move { page_x: f64, page_y: f64 },
    Leave,
}

/// State of the single floating tooltip element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipState {
    pub visible: bool,
    pub left: f64,
    pub top: f64,
    pub html: String,
}

impl TooltipState {
    /// Applies a pointer event raised by the marker carrying `content`.
    pub fn apply(&mut self, content: &TooltipContent, event: PointerEvent) {
        match event {
            PointerEvent::Enter { page_x, page_y } => {
                self.visible = true;
                self.html = content.html();
                self.left = page_x;
                self.top = page_y;
            }
            PointerEvent::Move { page_x, page_y } => {
                self.left = page_x + MOVE_OFFSET.0;
                self.top = page_y + MOVE_OFFSET.1;
            }
            PointerEvent::Leave => {
                self.visible = false;
            }
        }
    }

    pub fn opacity(&self) -> &'static str {
        if self.visible { "1" } else { "0" }
    }
}

pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
