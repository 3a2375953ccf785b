use common::{MetricRecord, ViewMode};
use tracing::{debug, instrument, trace};

use crate::error::{ChartError, Result};
use crate::format::format_tick;
use crate::palette::Palette;
use crate::scale::{DEFAULT_TICK_COUNT, LinearScale, PointScale};
use crate::shape::{
    Axis, AxisOrient, Frame, GridLines, LegendEntry, LinePath, Marker, Point, Rect, Shape, Text,
    TextAnchor, Tick,
};
use crate::surface::DrawingSurface;
use crate::tooltip::TooltipContent;

pub const X_AXIS_LABEL: &str = "Year of Incidents";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Fixed geometry of the travel mode chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimensions {
    pub margin: Margin,
    /// Height budget of the whole widget.
    pub total_height: f64,
    /// Part of the budget kept free for the legend rows.
    pub legend_allowance: f64,
    pub line_width: f64,
    pub marker_radius: f64,
    pub legend_columns: usize,
    pub legend_column_width: f64,
    pub legend_row_height: f64,
    /// Translation applied to every legend entry on top of its row/column slot.
    pub legend_shift: Point,
    /// Label every n-th year on the horizontal axis.
    pub year_label_every: usize,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            margin: Margin {
                top: 50.0,
                right: 30.0,
                bottom: 50.0,
                left: 50.0,
            },
            total_height: 300.0,
            legend_allowance: 60.0,
            line_width: 2.5,
            marker_radius: 3.0,
            legend_columns: 3,
            legend_column_width: 110.0,
            legend_row_height: 20.0,
            legend_shift: Point::new(-80.0, -50.0),
            year_label_every: 2,
        }
    }
}

impl Dimensions {
    pub fn plot_width(&self, container_width: f64) -> f64 {
        container_width - self.margin.left - self.margin.right
    }

    pub fn plot_height(&self) -> f64 {
        self.total_height - self.margin.top - self.margin.bottom - self.legend_allowance
    }

    pub fn frame(&self, container_width: f64) -> Frame {
        Frame {
            width: self.plot_width(container_width) + self.margin.left + self.margin.right,
            height: self.plot_height() + self.margin.top + self.margin.bottom,
            origin: Point::new(self.margin.left, self.margin.top),
        }
    }
}

/// Everything needed to render one state of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub view: ViewMode,
    pub frame: Frame,
    pub x: PointScale,
    pub y: LinearScale,
    pub shapes: Vec<Shape>,
}

/// The deaths / serious injuries by travel mode line chart.
#[derive(Debug, Clone, Default)]
pub struct TravelModeChart {
    pub dimensions: Dimensions,
    pub palette: Palette,
}

impl TravelModeChart {
    /// Clears `surface` and draws `records` for `view` into it.
    ///
    /// An empty record set leaves the surface blank.
    #[instrument(skip(self, surface, records), fields(records = records.len(), view = %view))]
    pub fn draw<S>(&self, surface: &mut S, records: &[MetricRecord], view: ViewMode) -> Result<()>
    where
        S: DrawingSurface + ?Sized,
    {
        surface.clear()?;

        let Some(layout) = self.layout(records, view, surface.container_width())? else {
            trace!("No records, leaving chart blank");
            return Ok(());
        };

        surface.begin(&layout.frame)?;
        for shape in &layout.shapes {
            surface.draw(shape)?;
        }

        debug!(
            years = layout.x.len(),
            y_max = layout.y.domain().1,
            shapes = layout.shapes.len(),
            "Travel mode chart drawn"
        );
        Ok(())
    }

    /// Computes scales and primitives without touching a surface.
    ///
    /// Returns `Ok(None)` when there is nothing to draw.
    pub fn layout(
        &self,
        records: &[MetricRecord],
        view: ViewMode,
        container_width: f64,
    ) -> Result<Option<ChartLayout>> {
        if records.is_empty() {
            return Ok(None);
        }

        let dims = &self.dimensions;
        let width = dims.plot_width(container_width);
        let height = dims.plot_height();
        if !(width > 0.0 && height > 0.0) {
            return Err(ChartError::InvalidDimensions { width, height });
        }

        let metrics = view.metrics();

        let x = PointScale::new(records.iter().map(|r| r.crash_year.as_str()), (0.0, width));

        // Absent values take no part in the maximum
        let max = records
            .iter()
            .flat_map(|record| metrics.iter().filter_map(|&metric| record.value(metric)))
            .fold(None, |max: Option<f64>, value| {
                Some(max.map_or(value, |m| m.max(value)))
            })
            .unwrap_or(0.0);
        let y = LinearScale::new((0.0, max), (height, 0.0)).nice(DEFAULT_TICK_COUNT);

        let mut shapes = Vec::new();

        shapes.push(Shape::Axis(Axis {
            orient: AxisOrient::Bottom,
            offset: Point::new(0.0, height),
            range: (0.0, width),
            ticks: x
                .thinned_ticks(dims.year_label_every)
                .into_iter()
                .map(|(position, label)| Tick { position, label })
                .collect(),
            tick_size: 6.0,
            tick_padding: 3.0,
        }));

        let y_ticks = y.ticks(DEFAULT_TICK_COUNT);
        let y_step = y.tick_step(DEFAULT_TICK_COUNT);
        shapes.push(Shape::Axis(Axis {
            orient: AxisOrient::Left,
            offset: Point::default(),
            range: (height, 0.0),
            ticks: y_ticks
                .iter()
                .map(|&value| Tick {
                    position: y.scale(value),
                    label: Some(format_tick(value, y_step)),
                })
                .collect(),
            tick_size: 6.0,
            tick_padding: 3.0,
        }));

        shapes.push(Shape::Grid(GridLines {
            positions: y_ticks.iter().map(|&value| y.scale(value)).collect(),
            length: width,
            dash: "3,3",
            opacity: 0.2,
        }));

        for (index, &metric) in metrics.iter().enumerate() {
            let color = self.palette.color(index);

            let mut segments: Vec<Vec<Point>> = Vec::new();
            let mut current: Vec<Point> = Vec::new();
            let mut markers = Vec::new();

            for record in records {
                let position = x.position(&record.crash_year);
                match (position, record.value(metric)) {
                    (Some(cx), Some(value)) => {
                        let center = Point::new(cx, y.scale(value));
                        current.push(center);
                        markers.push(Shape::Marker(Marker {
                            center,
                            radius: dims.marker_radius,
                            fill: color,
                            tooltip: TooltipContent {
                                metric,
                                year: record.crash_year.clone(),
                                value,
                            },
                        }));
                    }
                    _ => {
                        if !current.is_empty() {
                            segments.push(std::mem::take(&mut current));
                        }
                    }
                }
            }
            if !current.is_empty() {
                segments.push(current);
            }

            shapes.push(Shape::Line(LinePath {
                metric,
                stroke: color,
                stroke_width: dims.line_width,
                segments,
            }));
            shapes.extend(markers);
        }

        shapes.push(Shape::Text(Text {
            position: Point::new(-height / 2.0, -40.0),
            content: view.axis_label().to_string(),
            anchor: TextAnchor::Middle,
            font_size: 10.0,
            rotate: Some(-90.0),
            dy_em: Some(1.0),
        }));

        shapes.push(Shape::Text(Text {
            position: Point::new(width / 2.0, height + 30.0),
            content: X_AXIS_LABEL.to_string(),
            anchor: TextAnchor::Middle,
            font_size: 10.0,
            rotate: None,
            dy_em: None,
        }));

        let columns = dims.legend_columns.max(1);
        for (index, &metric) in metrics.iter().enumerate() {
            let row = index / columns;
            let column = index % columns;
            shapes.push(Shape::Legend(LegendEntry {
                metric,
                offset: Point::new(
                    column as f64 * dims.legend_column_width + dims.legend_shift.x,
                    row as f64 * dims.legend_row_height + dims.legend_shift.y,
                ),
                swatch: Rect {
                    x: 110.0,
                    y: 0.0,
                    width: 15.0,
                    height: 15.0,
                },
                color: self.palette.color(index),
                label: Text {
                    position: Point::new(130.0, 12.0),
                    content: metric.label(),
                    anchor: TextAnchor::Start,
                    font_size: 12.0,
                    rotate: None,
                    dy_em: None,
                },
            }));
        }

        Ok(Some(ChartLayout {
            view,
            frame: dims.frame(container_width),
            x,
            y,
            shapes,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use common::Metric;

    fn sample_records() -> Vec<MetricRecord> {
        let json = r#"[
            {"crash_year": 2016, "motor_vehicle_death": 20, "bicycle_death": 3, "pedestrian_death": 12,
             "motorcycle_death": 4, "micromobility_death": 0, "other_death": 1,
             "motor_vehicle_serious_injury": 210, "bicycle_serious_injury": 40, "pedestrian_serious_injury": 95,
             "motorcycle_serious_injury": 30, "micromobility_serious_injury": 5, "other_serious_injury": 8},
            {"crash_year": 2017, "motor_vehicle_death": 18, "bicycle_death": 2, "pedestrian_death": 15,
             "motorcycle_death": 6, "micromobility_death": 1, "other_death": 0,
             "motor_vehicle_serious_injury": 199, "bicycle_serious_injury": 38, "pedestrian_serious_injury": 101,
             "motorcycle_serious_injury": 27, "micromobility_serious_injury": 9, "other_serious_injury": 6},
            {"crash_year": 2018, "motor_vehicle_death": 23, "bicycle_death": 4, "pedestrian_death": 11,
             "motorcycle_death": 5, "micromobility_death": 2, "other_death": 2,
             "motor_vehicle_serious_injury": 230, "bicycle_serious_injury": 44, "pedestrian_serious_injury": 88,
             "motorcycle_serious_injury": 33, "micromobility_serious_injury": 14, "other_serious_injury": 7},
            {"crash_year": 2019, "motor_vehicle_death": 21, "bicycle_death": 1, "pedestrian_death": 17,
             "motorcycle_death": 3, "micromobility_death": 3, "other_death": 1,
             "motor_vehicle_serious_injury": 241, "bicycle_serious_injury": 36, "pedestrian_serious_injury": 97,
             "motorcycle_serious_injury": 29, "micromobility_serious_injury": 21, "other_serious_injury": 5},
            {"crash_year": 2020, "motor_vehicle_death": 26, "bicycle_death": 5, "pedestrian_death": 14,
             "motorcycle_death": 7, "micromobility_death": 4, "other_death": 3,
             "motor_vehicle_serious_injury": 263, "bicycle_serious_injury": 41, "pedestrian_serious_injury": 90,
             "motorcycle_serious_injury": 35, "micromobility_serious_injury": 26, "other_serious_injury": 9}
        ]"#;
        serde_json::from_str(json).unwrap()
    }

    fn single_year() -> Vec<MetricRecord> {
        let json = r#"[{"crash_year": 2019, "motor_vehicle_death": 5, "bicycle_death": 2,
                        "pedestrian_death": 1, "motorcycle_death": 0, "micromobility_death": 0,
                        "other_death": 1}]"#;
        serde_json::from_str(json).unwrap()
    }

    fn draw(records: &[MetricRecord], view: ViewMode) -> RecordingSurface {
        let mut surface = RecordingSurface::new(800.0);
        TravelModeChart::default()
            .draw(&mut surface, records, view)
            .expect("draw succeeds");
        surface
    }

    fn axis(surface: &RecordingSurface, orient: AxisOrient) -> Axis {
        surface
            .axes()
            .find(|axis| axis.orient == orient)
            .cloned()
            .expect("axis drawn")
    }

    #[test]
    fn test_one_category_per_year_and_every_second_labelled() {
        let surface = draw(&sample_records(), ViewMode::Death);
        let x_axis = axis(&surface, AxisOrient::Bottom);

        assert_eq!(x_axis.ticks.len(), 5);
        let labels: Vec<Option<&str>> = x_axis.ticks.iter().map(|t| t.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("2016"), None, Some("2018"), None, Some("2020")]);
    }

    #[test]
    fn test_vertical_max_is_nice_over_active_group() {
        let chart = TravelModeChart::default();
        let death = chart
            .layout(&sample_records(), ViewMode::Death, 800.0)
            .unwrap()
            .unwrap();
        // Raw max 26 over the death metrics already sits on a 2-step
        assert_eq!(death.y.domain(), (0.0, 26.0));

        let injury = chart
            .layout(&sample_records(), ViewMode::Injury, 800.0)
            .unwrap()
            .unwrap();
        // Raw max 263 over the injury metrics, rounded up to the next 20
        assert_eq!(injury.y.domain(), (0.0, 280.0));
    }

    #[test]
    fn test_toggle_swaps_series_legend_and_axis_text_only() {
        let records = sample_records();
        let death = draw(&records, ViewMode::Death);
        let injury = draw(&records, ViewMode::Injury);

        let death_lines: Vec<Metric> = death.lines().map(|l| l.metric).collect();
        let injury_lines: Vec<Metric> = injury.lines().map(|l| l.metric).collect();
        assert_eq!(death_lines, ViewMode::Death.metrics().to_vec());
        assert_eq!(injury_lines, ViewMode::Injury.metrics().to_vec());

        let death_legend: Vec<Metric> = death.legend().map(|e| e.metric).collect();
        let injury_legend: Vec<Metric> = injury.legend().map(|e| e.metric).collect();
        assert_ne!(death_legend, injury_legend);

        let y_label = |s: &RecordingSurface| {
            s.texts()
                .find(|t| t.rotate.is_some())
                .map(|t| t.content.clone())
                .unwrap()
        };
        assert_eq!(y_label(&death), "Number of Deaths");
        assert_eq!(y_label(&injury), "Number of Serious Injuries");

        assert_eq!(
            axis(&death, AxisOrient::Bottom),
            axis(&injury, AxisOrient::Bottom)
        );
    }

    #[test]
    fn test_redraw_does_not_accumulate() {
        let records = sample_records();
        let chart = TravelModeChart::default();
        let mut surface = RecordingSurface::new(640.0);

        chart.draw(&mut surface, &records, ViewMode::Death).unwrap();
        let first = (
            surface.lines().count(),
            surface.markers().count(),
            surface.legend().count(),
        );
        chart.draw(&mut surface, &records, ViewMode::Death).unwrap();
        let second = (
            surface.lines().count(),
            surface.markers().count(),
            surface.legend().count(),
        );

        assert_eq!(first, (6, 30, 6));
        assert_eq!(first, second);
        assert_eq!(surface.clears(), 2);
    }

    #[test]
    fn test_empty_records_leave_blank_surface() {
        let chart = TravelModeChart::default();
        let mut surface = RecordingSurface::new(800.0);

        chart.draw(&mut surface, &sample_records(), ViewMode::Death).unwrap();
        assert!(!surface.is_blank());

        chart.draw(&mut surface, &[], ViewMode::Injury).unwrap();
        assert!(surface.is_blank());
        assert!(surface.frame().is_none());
        assert_eq!(surface.axes().count(), 0);
    }

    #[test]
    fn test_single_year_example() {
        let surface = draw(&single_year(), ViewMode::Death);

        let x_axis = axis(&surface, AxisOrient::Bottom);
        assert_eq!(x_axis.ticks.len(), 1);
        assert_eq!(x_axis.ticks[0].label.as_deref(), Some("2019"));

        let y_axis = axis(&surface, AxisOrient::Left);
        let top = y_axis.ticks.last().and_then(|t| t.label.clone()).unwrap();
        assert_eq!(top, "5.0");

        let legend: Vec<String> = surface.legend().map(|e| e.label.content.clone()).collect();
        assert_eq!(
            legend,
            vec!["motor vehicle", "bicycle", "pedestrian", "motorcycle", "micromobility", "other"]
        );
    }

    #[test]
    fn test_single_year_nice_bound() {
        let layout = TravelModeChart::default()
            .layout(&single_year(), ViewMode::Death, 800.0)
            .unwrap()
            .unwrap();
        assert_eq!(layout.x.len(), 1);
        assert!(layout.y.domain().1 >= 5.0);
    }

    #[test]
    fn test_absent_values_split_lines_and_skip_markers() {
        let records = vec![
            MetricRecord::new("2018").with(Metric::BicycleDeath, 2.0),
            MetricRecord::new("2019"),
            MetricRecord::new("2020").with(Metric::BicycleDeath, 4.0),
        ];
        let surface = draw(&records, ViewMode::Death);

        let bicycle = surface
            .lines()
            .find(|l| l.metric == Metric::BicycleDeath)
            .unwrap();
        assert_eq!(bicycle.segments.len(), 2);
        assert_eq!(
            surface
                .markers()
                .filter(|m| m.tooltip.metric == Metric::BicycleDeath)
                .count(),
            2
        );

        let other = surface.lines().find(|l| l.metric == Metric::OtherDeath).unwrap();
        assert!(other.segments.is_empty());
    }

    #[test]
    fn test_geometry() {
        let layout = TravelModeChart::default()
            .layout(&sample_records(), ViewMode::Death, 800.0)
            .unwrap()
            .unwrap();

        assert_eq!(layout.frame.width, 800.0);
        assert_eq!(layout.frame.height, 240.0);
        assert_eq!(layout.frame.origin, Point::new(50.0, 50.0));
        assert_eq!(layout.x.range(), (0.0, 720.0));
        assert_eq!(layout.y.range(), (140.0, 0.0));

        let legend: Vec<Point> = layout
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Legend(entry) => Some(entry.offset),
                _ => None,
            })
            .collect();
        assert_eq!(legend[0], Point::new(-80.0, -50.0));
        assert_eq!(legend[2], Point::new(140.0, -50.0));
        assert_eq!(legend[3], Point::new(-80.0, -30.0));
    }

    #[test]
    fn test_colors_follow_metric_position() {
        let surface = draw(&sample_records(), ViewMode::Injury);
        let palette = Palette::default();
        for (index, line) in surface.lines().enumerate() {
            assert_eq!(line.stroke, palette.color(index));
        }
    }

    #[test]
    fn test_narrow_container_is_rejected() {
        let mut surface = RecordingSurface::new(60.0);
        let result = TravelModeChart::default().draw(&mut surface, &sample_records(), ViewMode::Death);
        assert!(matches!(result, Err(ChartError::InvalidDimensions { .. })));
        assert!(surface.is_blank());
    }

    #[test]
    fn test_marker_tooltips_carry_year_and_value() {
        let surface = draw(&single_year(), ViewMode::Death);
        let marker = surface
            .markers()
            .find(|m| m.tooltip.metric == Metric::MotorVehicleDeath)
            .unwrap();
        assert_eq!(marker.tooltip.year, "2019");
        assert_eq!(marker.tooltip.value, 5.0);
        assert_eq!(marker.radius, 3.0);
        // Single category sits in the middle of the 720px plot
        assert_eq!(marker.center.x, 360.0);
        assert_eq!(marker.center.y, 0.0);
    }

    #[test]
    fn test_geometry_overrides_through_fields() {
        let chart = TravelModeChart {
            dimensions: Dimensions {
                year_label_every: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut surface = RecordingSurface::new(800.0);
        chart.draw(&mut surface, &sample_records(), ViewMode::Death).unwrap();

        let x_axis = surface
            .axes()
            .find(|a| matches!(a.orient, AxisOrient::Bottom))
            .unwrap();
        assert!(!x_axis.ticks.is_empty());
        assert!(x_axis.ticks.iter().all(|t| t.label.is_some()));
    }
}
