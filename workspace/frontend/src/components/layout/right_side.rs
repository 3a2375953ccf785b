use yew::prelude::*;

use crate::components::top_locations::TopLocations;
use crate::components::updates::Updates;

/// Right-hand column of the dashboard: the updates feed above the top locations.
#[function_component(RightSide)]
pub fn right_side() -> Html {
    html! {
        <div class="RightSide">
            <div class="Updates">
                <Updates />
            </div>
            <div class="TopLocations">
                <TopLocations />
            </div>
        </div>
    }
}
