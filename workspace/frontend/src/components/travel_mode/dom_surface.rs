use std::cell::RefCell;
use std::rc::Rc;

use chart::shape::{Axis, AxisOrient, Text};
use chart::{ChartError, DrawingSurface, Frame, PointerEvent, Shape, TooltipContent, TooltipState};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, MouseEvent};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

type Listener = Closure<dyn FnMut(MouseEvent)>;

fn js_err(error: JsValue) -> ChartError {
    ChartError::surface(format!("{:?}", error))
}

/// Draws the travel mode chart straight into an `<svg>` element.
///
/// This is the only place the dashboard mutates the DOM outside of Yew.
/// Marker listeners are owned here and dropped on `clear`, after the nodes
/// they were attached to are gone.
pub struct DomSurface {
    document: Document,
    svg: Element,
    tooltip: Option<HtmlElement>,
    plot: Option<Element>,
    listeners: Vec<Listener>,
    tooltip_state: Rc<RefCell<TooltipState>>,
}

impl DomSurface {
    pub fn new(svg: Element, tooltip: Option<HtmlElement>) -> Result<Self, ChartError> {
        let document = svg
            .owner_document()
            .ok_or_else(|| ChartError::surface("chart element is not attached to a document"))?;
        Ok(Self {
            document,
            svg,
            tooltip,
            plot: None,
            listeners: Vec::new(),
            tooltip_state: Rc::new(RefCell::new(TooltipState::default())),
        })
    }

    fn create(&self, tag: &str, attrs: &[(&str, String)]) -> Result<Element, ChartError> {
        let element = self
            .document
            .create_element_ns(Some(SVG_NS), tag)
            .map_err(js_err)?;
        for (name, value) in attrs {
            element.set_attribute(name, value).map_err(js_err)?;
        }
        Ok(element)
    }

    fn append(&self, parent: &Element, child: &Element) -> Result<(), ChartError> {
        parent.append_child(child).map(|_| ()).map_err(js_err)
    }

    fn plot(&self) -> Result<&Element, ChartError> {
        self.plot
            .as_ref()
            .ok_or_else(|| ChartError::surface("draw called before begin"))
    }

    fn text(&self, text: &Text, class: Option<&str>) -> Result<Element, ChartError> {
        let mut attrs = vec![
            ("x", text.position.x.to_string()),
            ("y", text.position.y.to_string()),
            ("text-anchor", text.anchor.as_str().to_string()),
            ("style", format!("font-size: {}px", text.font_size)),
        ];
        if let Some(angle) = text.rotate {
            attrs.push(("transform", format!("rotate({})", angle)));
        }
        if let Some(dy) = text.dy_em {
            attrs.push(("dy", format!("{}em", dy)));
        }
        if let Some(class) = class {
            attrs.push(("class", class.to_string()));
        }
        let element = self.create("text", &attrs)?;
        element.set_text_content(Some(&text.content));
        Ok(element)
    }

    fn axis(&self, axis: &Axis) -> Result<Element, ChartError> {
        let group = self.create(
            "g",
            &[
                ("transform", format!("translate({},{})", axis.offset.x, axis.offset.y)),
                ("fill", "none".to_string()),
                ("font-size", "10".to_string()),
            ],
        )?;
        let (r0, r1) = axis.range;
        let size = axis.tick_size;
        let domain = match axis.orient {
            AxisOrient::Bottom => format!("M{},{}V0H{}V{}", r0, size, r1, size),
            AxisOrient::Left => format!("M{},{}H0V{}H{}", -size, r0, r1, -size),
        };
        let path = self.create(
            "path",
            &[
                ("class", "domain".to_string()),
                ("stroke", "currentColor".to_string()),
                ("d", domain),
            ],
        )?;
        self.append(&group, &path)?;

        let label_offset = size + axis.tick_padding;
        for tick in &axis.ticks {
            let (transform, line_attr, label_attrs) = match axis.orient {
                AxisOrient::Bottom => (
                    format!("translate({},0)", tick.position),
                    ("y2", size.to_string()),
                    [("y", label_offset.to_string()), ("dy", "0.71em".to_string()), ("text-anchor", "middle".to_string())],
                ),
                AxisOrient::Left => (
                    format!("translate(0,{})", tick.position),
                    ("x2", (-size).to_string()),
                    [("x", (-label_offset).to_string()), ("dy", "0.32em".to_string()), ("text-anchor", "end".to_string())],
                ),
            };
            let tick_group = self.create("g", &[("class", "tick".to_string()), ("transform", transform)])?;
            let line = self.create("line", &[("stroke", "currentColor".to_string()), line_attr])?;
            self.append(&tick_group, &line)?;
            if let Some(label) = &tick.label {
                let mut attrs = vec![("fill", "currentColor".to_string())];
                attrs.extend(label_attrs);
                let text = self.create("text", &attrs)?;
                text.set_text_content(Some(label));
                self.append(&tick_group, &text)?;
            }
            self.append(&group, &tick_group)?;
        }
        Ok(group)
    }

    fn listen(
        &mut self,
        target: &Element,
        event: &str,
        content: &TooltipContent,
        to_event: fn(&MouseEvent) -> PointerEvent,
    ) -> Result<(), ChartError> {
        let tooltip = self.tooltip.clone();
        let state = self.tooltip_state.clone();
        let content = content.clone();
        let listener: Listener = Closure::wrap(Box::new(move |mouse: MouseEvent| {
            let pointer = to_event(&mouse);
            let mut state = state.borrow_mut();
            state.apply(&content, pointer);
            if let Some(tooltip) = &tooltip {
                render_tooltip(tooltip, &state, matches!(pointer, PointerEvent::Enter { .. }));
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        target
            .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.listeners.push(listener);
        Ok(())
    }
}

fn render_tooltip(tooltip: &HtmlElement, state: &TooltipState, with_content: bool) {
    if with_content {
        tooltip.set_inner_html(&state.html);
    }
    let style = tooltip.style();
    let result = style
        .set_property("opacity", state.opacity())
        .and_then(|_| style.set_property("left", &format!("{}px", state.left)))
        .and_then(|_| style.set_property("top", &format!("{}px", state.top)));
    if let Err(e) = result {
        log::warn!("Failed to position tooltip: {:?}", e);
    }
}

impl DrawingSurface for DomSurface {
    fn container_width(&self) -> f64 {
        self.svg
            .parent_element()
            .map(|parent| parent.client_width())
            .filter(|width| *width > 0)
            .unwrap_or_else(|| self.svg.client_width()) as f64
    }

    fn clear(&mut self) -> Result<(), ChartError> {
        self.svg.set_inner_html("");
        self.plot = None;
        // Nodes are detached, so the listeners can no longer fire
        self.listeners.clear();
        if let Some(tooltip) = &self.tooltip {
            let mut state = self.tooltip_state.borrow_mut();
            state.visible = false;
            render_tooltip(tooltip, &state, false);
        }
        Ok(())
    }

    fn begin(&mut self, frame: &Frame) -> Result<(), ChartError> {
        self.svg
            .set_attribute("width", &frame.width.to_string())
            .map_err(js_err)?;
        self.svg
            .set_attribute("height", &frame.height.to_string())
            .map_err(js_err)?;
        let plot = self.create(
            "g",
            &[(
                "transform",
                format!("translate({},{})", frame.origin.x, frame.origin.y),
            )],
        )?;
        self.append(&self.svg, &plot)?;
        self.plot = Some(plot);
        Ok(())
    }

    fn draw(&mut self, shape: &Shape) -> Result<(), ChartError> {
        let element = match shape {
            Shape::Axis(axis) => self.axis(axis)?,
            Shape::Grid(grid) => {
                let group = self.create(
                    "g",
                    &[
                        ("class", "grid-lines".to_string()),
                        ("stroke", "currentColor".to_string()),
                        ("style", format!("stroke-dasharray: {}; stroke-opacity: {}", grid.dash, grid.opacity)),
                    ],
                )?;
                for y in &grid.positions {
                    let line = self.create(
                        "line",
                        &[
                            ("x1", "0".to_string()),
                            ("x2", grid.length.to_string()),
                            ("y1", y.to_string()),
                            ("y2", y.to_string()),
                        ],
                    )?;
                    self.append(&group, &line)?;
                }
                group
            }
            Shape::Line(line) => self.create(
                "path",
                &[
                    ("fill", "none".to_string()),
                    ("stroke", line.stroke.to_string()),
                    ("stroke-width", line.stroke_width.to_string()),
                    ("d", line.path_data()),
                ],
            )?,
            Shape::Marker(marker) => {
                let circle = self.create(
                    "circle",
                    &[
                        ("class", format!("dot-{}", marker.tooltip.metric)),
                        ("cx", marker.center.x.to_string()),
                        ("cy", marker.center.y.to_string()),
                        ("r", marker.radius.to_string()),
                        ("fill", marker.fill.to_string()),
                    ],
                )?;
                self.listen(&circle, "mouseover", &marker.tooltip, |e| PointerEvent::Enter {
                    page_x: e.page_x() as f64,
                    page_y: e.page_y() as f64,
                })?;
                self.listen(&circle, "mousemove", &marker.tooltip, |e| PointerEvent::Move {
                    page_x: e.page_x() as f64,
                    page_y: e.page_y() as f64,
                })?;
                self.listen(&circle, "mouseout", &marker.tooltip, |_| PointerEvent::Leave)?;
                circle
            }
            Shape::Text(text) => self.text(text, None)?,
            Shape::Legend(entry) => {
                let group = self.create(
                    "g",
                    &[
                        ("class", "legend".to_string()),
                        ("transform", format!("translate({},{})", entry.offset.x, entry.offset.y)),
                    ],
                )?;
                let rect = self.create(
                    "rect",
                    &[
                        ("x", entry.swatch.x.to_string()),
                        ("y", entry.swatch.y.to_string()),
                        ("width", entry.swatch.width.to_string()),
                        ("height", entry.swatch.height.to_string()),
                        ("style", format!("fill: {}", entry.color)),
                    ],
                )?;
                self.append(&group, &rect)?;
                let label = self.text(&entry.label, Some("legend"))?;
                self.append(&group, &label)?;
                group
            }
        };
        self.append(self.plot()?, &element)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use chart::TravelModeChart;
    use common::{Metric, MetricRecord, ViewMode};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mounted_surface() -> DomSurface {
        let document = web_sys::window().unwrap().document().unwrap();
        let container = document.create_element("div").unwrap();
        container.set_attribute("style", "width: 800px").unwrap();
        let svg = document.create_element_ns(Some(SVG_NS), "svg").unwrap();
        container.append_child(&svg).unwrap();
        document.body().unwrap().append_child(&container).unwrap();
        DomSurface::new(svg, None).unwrap()
    }

    fn records() -> Vec<MetricRecord> {
        ["2019", "2020"]
            .into_iter()
            .map(|year| {
                ViewMode::Death
                    .metrics()
                    .into_iter()
                    .fold(MetricRecord::new(year), |record, metric| record.with(metric, 4.0))
            })
            .collect()
    }

    #[wasm_bindgen_test]
    fn redraw_replaces_listeners_instead_of_adding() {
        let mut surface = mounted_surface();
        let chart = TravelModeChart::default();

        chart.draw(&mut surface, &records(), ViewMode::Death).unwrap();
        // mouseover, mousemove and mouseout per marker
        assert_eq!(surface.listeners.len(), 2 * 6 * 3);
        let nodes = surface.svg.child_element_count();

        chart.draw(&mut surface, &records(), ViewMode::Death).unwrap();
        assert_eq!(surface.listeners.len(), 2 * 6 * 3);
        assert_eq!(surface.svg.child_element_count(), nodes);
    }

    #[wasm_bindgen_test]
    fn clear_drops_nodes_and_listeners() {
        let mut surface = mounted_surface();
        let records = vec![MetricRecord::new("2021").with(Metric::BicycleDeath, 2.0)];
        TravelModeChart::default()
            .draw(&mut surface, &records, ViewMode::Death)
            .unwrap();
        assert_eq!(surface.listeners.len(), 3);

        surface.clear().unwrap();
        assert!(surface.listeners.is_empty());
        assert_eq!(surface.svg.child_element_count(), 0);
    }
}
