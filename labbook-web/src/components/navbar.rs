use labbook_core::chrome::{AnchorAction, SCROLLED_CLASS, navbar_scrolled, resolve_anchor};
use labbook_core::Theme;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

/// Click handler for an in-page `href="#..."` link.
#[must_use]
pub fn anchor_onclick(href: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        let id = href.trim_start_matches('#');
        let exists = !id.is_empty() && crate::dom::element_exists(id);
        match resolve_anchor(href, exists, &crate::dom::pathname()) {
            AnchorAction::Ignore => {}
            AnchorAction::ScrollTo(id) => crate::dom::smooth_scroll_to(&id),
            AnchorAction::Navigate(url) => crate::dom::navigate(&url),
        }
    })
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub theme: Theme,
    pub on_toggle_theme: Callback<()>,
    #[prop_or(50)]
    pub scroll_threshold: u32,
}

#[function_component(Navbar)]
pub fn navbar(p: &Props) -> Html {
    let scrolled = use_state(|| false);

    {
        let scrolled = scrolled.clone();
        use_effect_with(p.scroll_threshold, move |threshold| {
            let threshold = *threshold;
            let window = crate::dom::window();
            let listener = Closure::<dyn FnMut()>::new(move || {
                scrolled.set(navbar_scrolled(crate::dom::scroll_y(), threshold));
            });
            let _ = window
                .add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref());
            move || {
                let _ = window.remove_event_listener_with_callback(
                    "scroll",
                    listener.as_ref().unchecked_ref(),
                );
            }
        });
    }

    let toggle = {
        let cb = p.on_toggle_theme.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let (icon, label) = if p.theme.is_dark() {
        ("☀", "Switch to light theme")
    } else {
        ("☾", "Switch to dark theme")
    };

    html! {
        <nav id="navbar" class={classes!("navbar", scrolled.then_some(SCROLLED_CLASS))}>
            <a href="#home" class="logo" onclick={anchor_onclick("#home")}>{"Labbook Diagnostics"}</a>
            <ul class="nav-links">
                <li><a href="#home" onclick={anchor_onclick("#home")}>{"Home"}</a></li>
                <li><a href="#services" onclick={anchor_onclick("#services")}>{"Services"}</a></li>
                <li><a href="#contact" onclick={anchor_onclick("#contact")}>{"Contact"}</a></li>
            </ul>
            <button type="button" class="theme-toggle" aria-label={label} onclick={toggle}>
                { icon }
            </button>
        </nav>
    }
}
