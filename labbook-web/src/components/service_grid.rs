use labbook_core::chrome::Reveal;
use labbook_core::format::format_currency;
use labbook_core::{MemorySurface, ServiceOffering};
use std::collections::BTreeSet;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry};
use yew::prelude::*;

/// Indices of cards that have scrolled into view at least once.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Revealed(BTreeSet<usize>);

impl Reducible for Revealed {
    type Action = usize;

    fn reduce(self: Rc<Self>, index: usize) -> Rc<Self> {
        if self.0.contains(&index) {
            return self;
        }
        let mut shown = self.0.clone();
        shown.insert(index);
        Rc::new(Self(shown))
    }
}

type ObserverHandle = (IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>);

fn observe_cards(grid: &NodeRef, reveal: UseReducerDispatcher<Revealed>) -> Option<ObserverHandle> {
    let grid = grid.cast::<Element>()?;
    let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            if let Some(index) = entry
                .target()
                .get_attribute("data-index")
                .and_then(|v| v.parse::<usize>().ok())
            {
                reveal.dispatch(index);
            }
        }
    });
    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| log::warn!("card reveal disabled: {}", crate::dom::js_error_message(&e)))
        .ok()?;
    let cards = grid.query_selector_all(".service-card").ok()?;
    for i in 0..cards.length() {
        if let Some(card) = cards.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            observer.observe(&card);
        }
    }
    Some((observer, callback))
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub services: Vec<ServiceOffering>,
    pub surface: Rc<MemorySurface>,
    pub currency: AttrValue,
    pub on_toggle: Callback<ServiceOffering>,
    #[prop_or(100)]
    pub stagger_ms: u32,
}

#[function_component(ServiceGrid)]
pub fn service_grid(p: &Props) -> Html {
    let grid_ref = use_node_ref();
    let revealed = use_reducer(Revealed::default);

    {
        let grid_ref = grid_ref.clone();
        let dispatcher = revealed.dispatcher();
        use_effect_with(p.services.len(), move |_| {
            let handle = observe_cards(&grid_ref, dispatcher);
            move || {
                if let Some((observer, _callback)) = handle {
                    observer.disconnect();
                }
            }
        });
    }

    let cards = p.services.iter().enumerate().map(|(index, service)| {
        let selected = p.surface.is_service_marked(&service.name);
        let mut reveal = Reveal::staggered(index, p.stagger_ms);
        if revealed.0.contains(&index) {
            reveal = reveal.shown();
        }
        let onclick = {
            let cb = p.on_toggle.clone();
            let service = service.clone();
            Callback::from(move |_: MouseEvent| cb.emit(service.clone()))
        };
        html! {
            <article
                class={classes!("service-card", selected.then_some("selected"))}
                data-index={index.to_string()}
                style={reveal.style()}
                aria-pressed={selected.to_string()}
                role="button"
                tabindex="0"
                {onclick}
            >
                <span class="service-category">{ service.category.clone() }</span>
                <h3>{ service.name.clone() }</h3>
                <p>{ service.blurb.clone() }</p>
                <span class="service-price">{ format_currency(service.price, &p.currency) }</span>
            </article>
        }
    });

    html! {
        <section id="services" class="services">
            <h2>{"Our Services"}</h2>
            <p class="section-lead">{"Tap the tests you need, then book them together."}</p>
            <div class="services-grid" ref={grid_ref}>
                { for cards }
            </div>
        </section>
    }
}
