use crate::components::navbar::anchor_onclick;
use yew::prelude::*;

#[function_component(Hero)]
pub fn hero() -> Html {
    html! {
        <header id="home" class="hero">
            <h1>{"Accurate results, booked in a minute"}</h1>
            <p>{"Choose your tests, pick a date and bring the receipt to the lab."}</p>
            <a href="#services" class="btn btn-primary" onclick={anchor_onclick("#services")}>
                {"Browse Services"}
            </a>
        </header>
    }
}
