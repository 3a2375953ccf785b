mod dom_surface;

use std::rc::Rc;

use chart::TravelModeChart;
use common::{MetricRecord, ViewMode};
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

use crate::api_client::travel_mode::get_travel_mode;
use dom_surface::DomSurface;

pub const TOOLTIP_ID: &str = "travel-mode-tooltip";

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Base URL of the statistics backend.
    pub backend_url: AttrValue,
}

/// Deaths / serious injuries by travel mode, one line per mode.
///
/// Loads the records once on mount. A failed request is only logged; the
/// chart then stays empty.
#[function_component(TravelMode)]
pub fn travel_mode(props: &Props) -> Html {
    let svg_ref = use_node_ref();
    let tooltip_ref = use_node_ref();
    let records = use_state(|| Rc::new(Vec::<MetricRecord>::new()));
    let view = use_state(ViewMode::default);
    let surface = use_mut_ref(|| None::<DomSurface>);

    // Fetch on mount
    {
        let records = records.clone();
        let backend_url = props.backend_url.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match get_travel_mode(&backend_url).await {
                    Ok(data) => records.set(Rc::new(data)),
                    Err(err) => log::error!("Error fetching travel mode data: {}", err),
                }
            });
            || ()
        });
    }

    // Redraw whenever the data or the view changes
    {
        let svg_ref = svg_ref.clone();
        let tooltip_ref = tooltip_ref.clone();
        let surface = surface.clone();
        use_effect_with(((*records).clone(), *view), move |(records, view)| {
            let mut surface = surface.borrow_mut();
            if surface.is_none() {
                if let Some(svg) = svg_ref.cast::<Element>() {
                    match DomSurface::new(svg, tooltip_ref.cast::<HtmlElement>()) {
                        Ok(created) => *surface = Some(created),
                        Err(err) => log::error!("Cannot draw travel mode chart: {}", err),
                    }
                }
            }

            if let Some(surface) = surface.as_mut() {
                log::trace!("Redrawing travel mode chart: {} records, view {}", records.len(), view);
                if let Err(err) = TravelModeChart::default().draw(surface, records, *view) {
                    log::warn!("Travel mode chart not drawn: {}", err);
                }
            }
            || ()
        });
    }

    let toggle = |mode: ViewMode| {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| {
            log::debug!("Switching travel mode view to {}", mode);
            view.set(mode);
        })
    };

    html! {
        <div class="container">
            <h2 class="text-xl font-semibold mb-4">{view.heading()}</h2>
            <div class="travel-mode-tooltip" id={TOOLTIP_ID} ref={tooltip_ref}></div>
            <div class="mb-4 flex gap-4 justify-center">
                { for ViewMode::ALL.into_iter().map(|mode| html! {
                    <button
                        class={classes!("toggle-button", if *view == mode { "active" } else { "inactive" })}
                        onclick={toggle(mode)}
                    >
                        {mode.title()}
                    </button>
                }) }
            </div>
            <svg ref={svg_ref} class="chart"></svg>
        </div>
    }
}
