use yew::prelude::*;

#[function_component(TopLocations)]
pub fn top_locations() -> Html {
    html! {
        <div class="card">
            <h3 class="card-title">{"Top Locations"}</h3>
            <p class="text-sm text-gray-500">{"No locations to show."}</p>
        </div>
    }
}
