use crate::error::Result;
use crate::shape::{Frame, Shape};

/// Target the travel mode chart draws into.
///
/// Implementations own whatever they create: `clear` must remove every node
/// and every event hook added since the previous `clear`, so repeated redraws
/// never accumulate state.
pub trait DrawingSurface {
    /// Width in pixels the surrounding container offers the chart.
    fn container_width(&self) -> f64;

    /// Removes everything previously drawn.
    fn clear(&mut self) -> Result<()>;

    /// Sizes the drawing and positions the plot area.
    fn begin(&mut self, frame: &Frame) -> Result<()>;

    /// Adds one primitive, in plot coordinates.
    fn draw(&mut self, shape: &Shape) -> Result<()>;
}

/// In-memory surface that keeps the primitives it receives.
///
/// Used by tests and by callers that want to inspect a layout without
/// rendering it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    frame: Option<Frame>,
    shapes: Vec<Shape>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new(container_width: f64) -> Self {
        Self {
            width: container_width,
            ..Default::default()
        }
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// How many times the surface has been cleared.
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn is_blank(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn axes(&self) -> impl Iterator<Item = &crate::shape::Axis> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Axis(axis) => Some(axis),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &crate::shape::LinePath> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &crate::shape::Marker> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Marker(marker) => Some(marker),
            _ => None,
        })
    }

    pub fn legend(&self) -> impl Iterator<Item = &crate::shape::LegendEntry> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Legend(entry) => Some(entry),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &crate::shape::Text> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Text(text) => Some(text),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn container_width(&self) -> f64 {
        self.width
    }

    fn clear(&mut self) -> Result<()> {
        self.frame = None;
        self.shapes.clear();
        self.clears += 1;
        Ok(())
    }

    fn begin(&mut self, frame: &Frame) -> Result<()> {
        self.frame = Some(*frame);
        Ok(())
    }

    fn draw(&mut self, shape: &Shape) -> Result<()> {
        self.shapes.push(shape.clone());
        Ok(())
    }
}
