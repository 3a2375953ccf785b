//! Chart engine for the travel mode dashboard.
//!
//! All chart logic lives here and is independent of any rendering backend:
//! [`TravelModeChart`] turns records and a [`ViewMode`](common::ViewMode) into
//! backend-neutral [`Shape`]s and hands them to a [`DrawingSurface`]. The
//! browser implements the surface on top of the DOM, the CLI writes SVG files
//! through [`SvgSurface`] and tests inspect a [`RecordingSurface`].

pub mod error;
pub mod format;
pub mod palette;
pub mod scale;
pub mod shape;
pub mod surface;
pub mod svg;
pub mod tooltip;
pub mod travel_mode;

pub use error::{ChartError, Result};
pub use palette::{Color, Palette};
pub use shape::{Frame, Point, Shape};
pub use surface::{DrawingSurface, RecordingSurface};
pub use svg::SvgSurface;
pub use tooltip::{PointerEvent, TooltipContent, TooltipState};
pub use travel_mode::{ChartLayout, Dimensions, TravelModeChart};

/// Renders `records` for `view` as a standalone SVG document using the
/// default chart geometry.
pub fn render_svg(
    records: &[common::MetricRecord],
    view: common::ViewMode,
    container_width: f64,
) -> Result<String> {
    let mut surface = SvgSurface::new(container_width);
    TravelModeChart::default().draw(&mut surface, records, view)?;
    Ok(surface.document())
}
