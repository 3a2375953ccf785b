use yew::prelude::*;

use super::right_side::RightSide;
use crate::components::travel_mode::TravelMode;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub backend_url: AttrValue,
}

#[function_component(Dashboard)]
pub fn dashboard(props: &Props) -> Html {
    html! {
        <div class="Dashboard">
            <div class="MainDash">
                <TravelMode backend_url={props.backend_url.clone()} />
            </div>
            <RightSide />
        </div>
    }
}
