use yew::prelude::*;

#[function_component(Updates)]
pub fn updates() -> Html {
    html! {
        <div class="card">
            <h3 class="card-title">{"Updates"}</h3>
            <p class="text-sm text-gray-500">{"No recent updates."}</p>
        </div>
    }
}
