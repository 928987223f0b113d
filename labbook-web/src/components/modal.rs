use labbook_core::surface::Region;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

/// Booking dialog shell. It stays in the page while hidden so form values and
/// the current step survive a close.
#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let container_ref = use_node_ref();

    {
        let container_ref = container_ref.clone();
        use_effect_with(props.open, move |is_open| {
            if *is_open && let Some(el) = container_ref.cast::<web_sys::HtmlElement>() {
                let _ = el.set_attribute("tabindex", "-1");
                let _ = el.focus();
            }
            || {}
        });
    }

    // Only clicks on the backdrop itself close the dialog.
    let on_backdrop = {
        let cb = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            if e.target() == e.current_target() {
                cb.emit(());
            }
        })
    };
    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };

    let display = if props.open { "display:flex" } else { "display:none" };
    html! {
        <div
            id={Region::Modal.element_id()}
            class="modal"
            style={display}
            role="presentation"
            onclick={on_backdrop}
        >
            <div
                class="modal-content"
                role="dialog"
                aria-modal="true"
                aria-labelledby="booking-modal-title"
                aria-hidden={(!props.open).to_string()}
                onkeydown={on_keydown}
                ref={container_ref}
            >
                <button type="button" class="close-modal" aria-label="Close booking" onclick={on_close}>
                    {"×"}
                </button>
                <h2 id="booking-modal-title">{ props.title.clone() }</h2>
                { for props.children.iter() }
            </div>
        </div>
    }
}
