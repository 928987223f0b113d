#[cfg(target_arch = "wasm32")]
use crate::components::{
    booking_wizard::BookingWizard, floating_bar::FloatingBar, footer::Footer, hero::Hero,
    modal::Modal, navbar::Navbar, service_grid::ServiceGrid,
};
#[cfg(target_arch = "wasm32")]
use labbook_core::surface::InputField;
#[cfg(target_arch = "wasm32")]
use labbook_core::{
    BookingController, MemorySurface, PaymentMethod, ServiceOffering, WizardStep,
};
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

pub mod actions;

/// Page root. Owns the booking controller and re-renders from its surface.
#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let data = crate::platform::site_data();
    let booking = use_mut_ref(|| {
        BookingController::new(data.config.clone(), MemorySurface::with_form())
    });
    let refresh = use_force_update();
    let theme = use_state(crate::theme::current_theme);

    let surface = Rc::new(booking.borrow().surface().clone());
    let wizard_open = booking.borrow().wizard().is_open();
    let config = &data.config;

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |()| theme.set(crate::theme::toggle()))
    };
    let on_toggle_service = {
        let (booking, refresh) = (booking.clone(), refresh.clone());
        Callback::from(move |service: ServiceOffering| {
            actions::toggle_service(&booking, &refresh, &service.name, service.price);
        })
    };
    let on_book = {
        let (booking, refresh) = (booking.clone(), refresh.clone());
        Callback::from(move |()| actions::open_booking(&booking, &refresh))
    };
    let on_close = {
        let (booking, refresh) = (booking.clone(), refresh.clone());
        Callback::from(move |()| actions::close_booking(&booking, &refresh))
    };
    let on_advance = {
        let (booking, refresh) = (booking.clone(), refresh.clone());
        Callback::from(move |step: WizardStep| actions::advance(&booking, &refresh, step))
    };
    let on_retreat = {
        let (booking, refresh) = (booking.clone(), refresh.clone());
        Callback::from(move |step: WizardStep| actions::retreat(&booking, &refresh, step))
    };
    let on_input = {
        let (booking, refresh) = (booking.clone(), refresh.clone());
        Callback::from(move |(field, value): (InputField, String)| {
            actions::set_input(&booking, &refresh, field, &value);
        })
    };
    let on_payment = {
        let (booking, refresh) = (booking.clone(), refresh.clone());
        Callback::from(move |method: PaymentMethod| {
            actions::select_payment(&booking, &refresh, &method);
        })
    };
    let on_confirm = {
        let (booking, refresh) = (booking.clone(), refresh.clone());
        Callback::from(move |()| actions::confirm_booking(&booking, &refresh))
    };

    html! {
        <>
            <Navbar
                theme={*theme}
                on_toggle_theme={on_toggle_theme}
                scroll_threshold={config.navbar_scroll_threshold}
            />
            <main id="main" role="main">
                <Hero />
                <ServiceGrid
                    services={data.catalog.services.clone()}
                    surface={surface.clone()}
                    currency={AttrValue::from(config.currency.clone())}
                    on_toggle={on_toggle_service}
                    stagger_ms={config.reveal_stagger_ms}
                />
            </main>
            <Footer />
            <FloatingBar surface={surface.clone()} {on_book} />
            <Modal open={wizard_open} title="Book Your Tests" on_close={on_close.clone()}>
                <BookingWizard
                    {surface}
                    {on_advance}
                    {on_retreat}
                    {on_input}
                    {on_payment}
                    {on_confirm}
                    {on_close}
                />
            </Modal>
        </>
    }
}
