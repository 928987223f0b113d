use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer id="contact" class="footer">
            <div class="footer__contact">
                <h3>{"Contact"}</h3>
                <p>{"Open daily 6:30 am to 8:00 pm. Sample collection on the ground floor."}</p>
                <p><a href="tel:+94110000000">{"+94 11 000 0000"}</a></p>
            </div>
            <p class="footer__copy">{"© Labbook Diagnostics"}</p>
        </footer>
    }
}
