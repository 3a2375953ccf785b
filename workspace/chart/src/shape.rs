//! Backend-neutral drawing primitives emitted by the chart layout.
//!
//! Coordinates are plot coordinates: the origin is the top-left corner of the
//! plot area, inside the frame margins.

use common::Metric;

use crate::palette::Color;
use crate::tooltip::TooltipContent;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Outer size of the drawing and where the plot area starts inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub origin: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub position: Point,
    pub content: String,
    pub anchor: TextAnchor,
    pub font_size: f64,
    /// Rotation in degrees around the plot origin, applied before positioning.
    pub rotate: Option<f64>,
    /// Vertical shift in `em`.
    pub dy_em: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position along the axis.
    pub position: f64,
    /// `None` keeps the tick mark without text.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orient: AxisOrient,
    /// Translation of the axis group.
    pub offset: Point,
    /// Extent of the domain line along the axis.
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
    pub tick_size: f64,
    pub tick_padding: f64,
}

/// Horizontal reference lines across the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    pub positions: Vec<f64>,
    pub length: f64,
    pub dash: &'static str,
    pub opacity: f64,
}

/// One series line. Absent values split it into separate segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePath {
    pub metric: Metric,
    pub stroke: Color,
    pub stroke_width: f64,
    pub segments: Vec<Vec<Point>>,
}

impl LinePath {
    /// SVG path data (`M x,y L x,y ...`) covering every segment.
    pub fn path_data(&self) -> String {
        let mut data = String::new();
        for segment in &self.segments {
            for (i, point) in segment.iter().enumerate() {
                let command = if i == 0 { 'M' } else { 'L' };
                data.push_str(&format!("{}{},{}", command, num(point.x), num(point.y)));
            }
        }
        data
    }
}

/// A hoverable data point.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub center: Point,
    pub radius: f64,
    pub fill: Color,
    pub tooltip: TooltipContent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A color swatch with its series name.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub metric: Metric,
    /// Translation of the entry group.
    pub offset: Point,
    pub swatch: Rect,
    pub color: Color,
    pub label: Text,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Axis(Axis),
    Grid(GridLines),
    Line(LinePath),
    Marker(Marker),
    Text(Text),
    Legend(LegendEntry),
}

/// Compact number for markup attributes: at most three decimals, no trailing zeros.
pub(crate) fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_data_breaks_on_gaps() {
        let line = LinePath {
            metric: Metric::BicycleDeath,
            stroke: Color("#000"),
            stroke_width: 2.5,
            segments: vec![
                vec![Point::new(0.0, 10.0), Point::new(50.0, 5.5)],
                vec![Point::new(150.0, 0.0)],
            ],
        };
        assert_eq!(line.path_data(), "M0,10L50,5.5M150,0");
    }

    #[test]
    fn test_num_trims() {
        assert_eq!(num(1.0 / 3.0), "0.333");
        assert_eq!(num(-0.0), "0");
        assert_eq!(num(240.0), "240");
    }
}
