use labbook_core::surface::{Region, TextField};
use labbook_core::MemorySurface;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub surface: Rc<MemorySurface>,
    pub on_book: Callback<()>,
}

/// Count and running total of the current selection, with the booking button.
#[function_component(FloatingBar)]
pub fn floating_bar(p: &Props) -> Html {
    let visible = p.surface.is_visible(Region::FloatingBar);
    let text = |field: TextField| p.surface.text(field).unwrap_or_default().to_string();
    let on_book = {
        let cb = p.on_book.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div
            id={Region::FloatingBar.element_id()}
            class={classes!("floating-bar", visible.then_some("visible"))}
            aria-hidden={(!visible).to_string()}
        >
            <div class="floating-bar__info">
                <span id={TextField::SelectedCount.element_id()}>{ text(TextField::SelectedCount) }</span>
                <strong id={TextField::SelectedTotal.element_id()}>{ text(TextField::SelectedTotal) }</strong>
            </div>
            <button type="button" class="btn btn-primary" onclick={on_book}>{"Book Now"}</button>
        </div>
    }
}
