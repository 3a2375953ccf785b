use crate::error::Result;
use crate::shape::{Axis, AxisOrient, Frame, Shape, Text, num};
use crate::surface::DrawingSurface;
use crate::tooltip::escape;

/// Surface writing a standalone SVG document.
///
/// Hover tooltips have no static equivalent; each marker gets a `<title>` so
/// viewers that show native tooltips still reveal the value.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    container_width: f64,
    frame: Option<Frame>,
    body: String,
}

impl SvgSurface {
    pub fn new(container_width: f64) -> Self {
        Self {
            container_width,
            frame: None,
            body: String::new(),
        }
    }

    /// The complete document for whatever has been drawn so far.
    pub fn document(&self) -> String {
        let (width, height, origin) = match &self.frame {
            Some(frame) => (frame.width, frame.height, frame.origin),
            None => (self.container_width, 0.0, Default::default()),
        };
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"chart\" width=\"{}\" height=\"{}\" \
             font-family=\"sans-serif\">\n<g transform=\"translate({},{})\">\n{}</g>\n</svg>\n",
            num(width),
            num(height),
            num(origin.x),
            num(origin.y),
            self.body
        )
    }

    fn text(&mut self, text: &Text, class: Option<&str>) {
        let mut attrs = String::new();
        if let Some(angle) = text.rotate {
            attrs.push_str(&format!(" transform=\"rotate({})\"", num(angle)));
        }
        attrs.push_str(&format!(
            " x=\"{}\" y=\"{}\"",
            num(text.position.x),
            num(text.position.y)
        ));
        if let Some(dy) = text.dy_em {
            attrs.push_str(&format!(" dy=\"{}em\"", num(dy)));
        }
        if let Some(class) = class {
            attrs.push_str(&format!(" class=\"{class}\""));
        }
        self.body.push_str(&format!(
            "<text{} text-anchor=\"{}\" font-size=\"{}px\">{}</text>\n",
            attrs,
            text.anchor.as_str(),
            num(text.font_size),
            escape(&text.content)
        ));
    }

    fn axis(&mut self, axis: &Axis) {
        let (r0, r1) = axis.range;
        let size = axis.tick_size;
        let label_offset = size + axis.tick_padding;
        self.body.push_str(&format!(
            "<g class=\"axis\" transform=\"translate({},{})\" fill=\"none\" font-size=\"10\">\n",
            num(axis.offset.x),
            num(axis.offset.y)
        ));
        let domain = match axis.orient {
            AxisOrient::Bottom => format!("M{},{}V0H{}V{}", num(r0), num(size), num(r1), num(size)),
            AxisOrient::Left => format!("M{},{}H0V{}H{}", num(-size), num(r0), num(r1), num(-size)),
        };
        self.body.push_str(&format!(
            "<path class=\"domain\" stroke=\"currentColor\" d=\"{domain}\"/>\n"
        ));
        for tick in &axis.ticks {
            let (transform, line, label_attrs) = match axis.orient {
                AxisOrient::Bottom => (
                    format!("translate({},0)", num(tick.position)),
                    format!("y2=\"{}\"", num(size)),
                    format!("y=\"{}\" dy=\"0.71em\" text-anchor=\"middle\"", num(label_offset)),
                ),
                AxisOrient::Left => (
                    format!("translate(0,{})", num(tick.position)),
                    format!("x2=\"{}\"", num(-size)),
                    format!("x=\"{}\" dy=\"0.32em\" text-anchor=\"end\"", num(-label_offset)),
                ),
            };
            self.body.push_str(&format!(
                "<g class=\"tick\" transform=\"{transform}\"><line stroke=\"currentColor\" {line}/>"
            ));
            if let Some(label) = &tick.label {
                self.body.push_str(&format!(
                    "<text fill=\"currentColor\" {label_attrs}>{}</text>",
                    escape(label)
                ));
            }
            self.body.push_str("</g>\n");
        }
        self.body.push_str("</g>\n");
    }
}

impl DrawingSurface for SvgSurface {
    fn container_width(&self) -> f64 {
        self.container_width
    }

    fn clear(&mut self) -> Result<()> {
        self.frame = None;
        self.body.clear();
        Ok(())
    }

    fn begin(&mut self, frame: &Frame) -> Result<()> {
        self.frame = Some(*frame);
        Ok(())
    }

    fn draw(&mut self, shape: &Shape) -> Result<()> {
        match shape {
            Shape::Axis(axis) => self.axis(axis),
            Shape::Grid(grid) => {
                self.body.push_str(&format!(
                    "<g class=\"grid-lines\" stroke=\"currentColor\" stroke-dasharray=\"{}\" stroke-opacity=\"{}\">\n",
                    grid.dash,
                    num(grid.opacity)
                ));
                for y in &grid.positions {
                    self.body.push_str(&format!(
                        "<line x1=\"0\" x2=\"{}\" y1=\"{y}\" y2=\"{y}\"/>\n",
                        num(grid.length),
                        y = num(*y)
                    ));
                }
                self.body.push_str("</g>\n");
            }
            Shape::Line(line) => {
                self.body.push_str(&format!(
                    "<path class=\"series\" data-metric=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" d=\"{}\"/>\n",
                    line.metric,
                    line.stroke,
                    num(line.stroke_width),
                    line.path_data()
                ));
            }
            Shape::Marker(marker) => {
                self.body.push_str(&format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"><title>{}</title></circle>\n",
                    num(marker.center.x),
                    num(marker.center.y),
                    num(marker.radius),
                    marker.fill,
                    escape(&marker.tooltip.text())
                ));
            }
            Shape::Text(text) => self.text(text, None),
            Shape::Legend(entry) => {
                self.body.push_str(&format!(
                    "<g class=\"legend\" transform=\"translate({},{})\">\n<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
                    num(entry.offset.x),
                    num(entry.offset.y),
                    num(entry.swatch.x),
                    num(entry.swatch.y),
                    num(entry.swatch.width),
                    num(entry.swatch.height),
                    entry.color
                ));
                self.text(&entry.label, Some("legend"));
                self.body.push_str("</g>\n");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travel_mode::TravelModeChart;
    use common::{Metric, MetricRecord, ViewMode};

    fn records() -> Vec<MetricRecord> {
        vec![
            MetricRecord::new("2019")
                .with(Metric::MotorVehicleDeath, 5.0)
                .with(Metric::BicycleDeath, 2.0),
            MetricRecord::new("2020")
                .with(Metric::MotorVehicleDeath, 7.0)
                .with(Metric::BicycleDeath, 1.0),
        ]
    }

    #[test]
    fn test_document_contains_chart_parts() {
        let mut surface = SvgSurface::new(600.0);
        TravelModeChart::default()
            .draw(&mut surface, &records(), ViewMode::Death)
            .unwrap();
        let svg = surface.document();

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"chart\" width=\"600\" height=\"240\""));
        assert!(svg.contains("translate(50,50)"));
        assert_eq!(svg.matches("class=\"series\"").count(), 6);
        assert_eq!(svg.matches("<circle").count(), 4);
        assert_eq!(svg.matches("class=\"legend\" transform").count(), 6);
        assert!(svg.contains(">Number of Deaths</text>"));
        assert!(svg.contains(">Year of Incidents</text>"));
        assert!(svg.contains("<title>motor vehicle\nYear: 2019\nCount: 5</title>"));
    }

    #[test]
    fn test_redraw_replaces_body() {
        let chart = TravelModeChart::default();
        let mut surface = SvgSurface::new(600.0);
        chart.draw(&mut surface, &records(), ViewMode::Death).unwrap();
        let first = surface.document();
        chart.draw(&mut surface, &records(), ViewMode::Death).unwrap();
        assert_eq!(first, surface.document());

        chart.draw(&mut surface, &records(), ViewMode::Injury).unwrap();
        let injury = surface.document();
        assert!(injury.contains(">Number of Serious Injuries</text>"));
        assert!(!injury.contains(">Number of Deaths</text>"));
    }

    #[test]
    fn test_blank_document() {
        let mut surface = SvgSurface::new(600.0);
        TravelModeChart::default()
            .draw(&mut surface, &[], ViewMode::Death)
            .unwrap();
        let svg = surface.document();
        assert!(!svg.contains("<path"));
        assert!(!svg.contains("<text"));
    }
}
