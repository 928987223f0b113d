//! Event handlers bridging components to the booking controller.
//!
//! Every handler mutates the controller, re-renders, and only then shows the
//! notices it produced, so no `RefCell` borrow is held across an alert.

use crate::{api, dom};
use labbook_core::surface::InputField;
use labbook_core::{
    BookingController, BookingSurface, MemorySurface, Money, PaymentMethod, Submission, WizardStep,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub type Booking = BookingController<MemorySurface>;
pub type BookingHandle = Rc<RefCell<Booking>>;

/// Run `update`, re-render, then alert every pending notice.
pub fn dispatch<F>(handle: &BookingHandle, refresh: &UseForceUpdateHandle, update: F)
where
    F: FnOnce(&mut Booking),
{
    let notices = {
        let mut booking = handle.borrow_mut();
        update(&mut booking);
        booking.surface_mut().take_notices()
    };
    refresh.force_update();
    for notice in notices {
        dom::alert(&notice);
    }
}

pub fn toggle_service(
    handle: &BookingHandle,
    refresh: &UseForceUpdateHandle,
    name: &str,
    price: Money,
) {
    dispatch(handle, refresh, |booking| {
        booking.toggle_service(name, price);
    });
}

pub fn open_booking(handle: &BookingHandle, refresh: &UseForceUpdateHandle) {
    dispatch(handle, refresh, |booking| {
        if let Err(err) = booking.open_booking(dom::today()) {
            log::debug!("booking not opened: {err}");
        }
    });
}

pub fn close_booking(handle: &BookingHandle, refresh: &UseForceUpdateHandle) {
    dispatch(handle, refresh, Booking::close_booking);
}

pub fn advance(handle: &BookingHandle, refresh: &UseForceUpdateHandle, target: WizardStep) {
    dispatch(handle, refresh, |booking| {
        if let Err(err) = booking.advance(target) {
            log::debug!("step {} not reached: {err}", target.index());
        }
    });
}

pub fn retreat(handle: &BookingHandle, refresh: &UseForceUpdateHandle, target: WizardStep) {
    dispatch(handle, refresh, |booking| {
        booking.retreat(target);
    });
}

pub fn select_payment(
    handle: &BookingHandle,
    refresh: &UseForceUpdateHandle,
    method: &PaymentMethod,
) {
    dispatch(handle, refresh, |booking| booking.select_payment(method));
}

/// Store a form value typed by the visitor.
pub fn set_input(
    handle: &BookingHandle,
    refresh: &UseForceUpdateHandle,
    field: InputField,
    value: &str,
) {
    dispatch(handle, refresh, |booking| {
        booking.surface_mut().set_input(field, value);
    });
}

/// Generate the invoice, show the receipt and post the booking in the background.
pub fn confirm_booking(handle: &BookingHandle, refresh: &UseForceUpdateHandle) {
    let mut rng = ChaCha20Rng::seed_from_u64(dom::entropy_seed());
    let mut pending = None;
    dispatch(handle, refresh, |booking| {
        match booking.generate_invoice(&mut rng) {
            Ok(submission) => pending = Some((booking.config().endpoint.clone(), submission)),
            Err(err) => log::debug!("booking not submitted: {err}"),
        }
    });
    let Some((endpoint, Submission { ticket, record })) = pending else {
        return;
    };

    let handle = Rc::clone(handle);
    let refresh = refresh.clone();
    spawn_local(async move {
        let outcome = api::submit_booking(&endpoint, &record).await;
        dispatch(&handle, &refresh, |booking| {
            booking.resolve_submission(ticket, outcome);
        });
    });
}
