use crate::components::receipt::Receipt;
use labbook_core::surface::{InputField, Region, TextField};
use labbook_core::{MemorySurface, PaymentMethod, WizardStep};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub surface: Rc<MemorySurface>,
    pub on_advance: Callback<WizardStep>,
    pub on_retreat: Callback<WizardStep>,
    pub on_input: Callback<(InputField, String)>,
    pub on_payment: Callback<PaymentMethod>,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

fn step_classes(surface: &MemorySurface, step: WizardStep) -> Classes {
    let active = surface.active_step() == Some(step);
    classes!("wizard-step", active.then_some("active"))
}

fn nav_button(
    label: &'static str,
    class: &'static str,
    cb: &Callback<WizardStep>,
    to: WizardStep,
) -> Html {
    let cb = cb.clone();
    let onclick = Callback::from(move |_: MouseEvent| cb.emit(to));
    html! { <button type="button" class={classes!("btn", class)} {onclick}>{ label }</button> }
}

fn value_of(surface: &MemorySurface, field: InputField) -> String {
    surface.input_value(field).unwrap_or_default().to_string()
}

fn on_text_input(field: InputField, cb: &Callback<(InputField, String)>) -> Callback<InputEvent> {
    let cb = cb.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        cb.emit((field, input.value()));
    })
}

fn render_summary(p: &Props) -> Html {
    let surface = &p.surface;
    html! {
        <div id={WizardStep::Summary.element_id()} class={step_classes(surface, WizardStep::Summary)}>
            <h3>{ WizardStep::Summary.title() }</h3>
            <div id="modal-service-summary" class="summary-list">
                { for surface.summary().iter().map(|line| html! {
                    <div class="summary-item">
                        <span class="summary-item__name">{ line.name.clone() }</span>
                        <span class="summary-item__price">{ line.price_text.clone() }</span>
                    </div>
                }) }
            </div>
            <div class="summary-total">
                <span>{"Total"}</span>
                <strong id={TextField::ModalTotal.element_id()}>
                    { surface.text(TextField::ModalTotal).unwrap_or_default().to_string() }
                </strong>
            </div>
            <div class="wizard-actions">
                { nav_button("Next", "btn-primary", &p.on_advance, WizardStep::Date) }
            </div>
        </div>
    }
}

fn render_details(p: &Props) -> Html {
    let surface = &p.surface;
    let on_gender = {
        let cb = p.on_input.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            cb.emit((InputField::PatientGender, select.value()));
        })
    };
    let on_address = {
        let cb = p.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            cb.emit((InputField::PatientAddress, area.value()));
        })
    };
    let gender = value_of(surface, InputField::PatientGender);

    html! {
        <div id={WizardStep::Date.element_id()} class={step_classes(surface, WizardStep::Date)}>
            <h3>{ WizardStep::Date.title() }</h3>
            <label for="booking-date">{"Preferred date"}</label>
            <input
                type="date"
                id={InputField::BookingDate.element_id()}
                value={value_of(surface, InputField::BookingDate)}
                oninput={on_text_input(InputField::BookingDate, &p.on_input)}
            />
            <label for="patient-name">{"Full name"}</label>
            <input
                type="text"
                id={InputField::PatientName.element_id()}
                value={value_of(surface, InputField::PatientName)}
                oninput={on_text_input(InputField::PatientName, &p.on_input)}
            />
            <div class="form-row">
                <input
                    type="email"
                    id={InputField::PatientEmail.element_id()}
                    placeholder="Email"
                    value={value_of(surface, InputField::PatientEmail)}
                    oninput={on_text_input(InputField::PatientEmail, &p.on_input)}
                />
                <input
                    type="tel"
                    id={InputField::PatientPhone.element_id()}
                    placeholder="Phone"
                    value={value_of(surface, InputField::PatientPhone)}
                    oninput={on_text_input(InputField::PatientPhone, &p.on_input)}
                />
            </div>
            <div class="form-row">
                <input
                    type="number"
                    min="0"
                    id={InputField::PatientAge.element_id()}
                    placeholder="Age"
                    value={value_of(surface, InputField::PatientAge)}
                    oninput={on_text_input(InputField::PatientAge, &p.on_input)}
                />
                <select id={InputField::PatientGender.element_id()} onchange={on_gender}>
                    <option value="" selected={gender.is_empty()}>{"Gender"}</option>
                    <option value="Male" selected={gender == "Male"}>{"Male"}</option>
                    <option value="Female" selected={gender == "Female"}>{"Female"}</option>
                    <option value="Other" selected={gender == "Other"}>{"Other"}</option>
                </select>
            </div>
            <textarea
                id={InputField::PatientAddress.element_id()}
                placeholder="Address"
                value={value_of(surface, InputField::PatientAddress)}
                oninput={on_address}
            />
            <div class="wizard-actions">
                { nav_button("Back", "btn-secondary", &p.on_retreat, WizardStep::Summary) }
                { nav_button("Next", "btn-primary", &p.on_advance, WizardStep::Payment) }
            </div>
        </div>
    }
}

fn render_payment(p: &Props) -> Html {
    let surface = &p.surface;
    let offered = PaymentMethod::OFFERED;
    let options = offered.iter().map(|method| {
        let selected = surface.selected_payment() == Some(method);
        let onchange = {
            let cb = p.on_payment.clone();
            let method = method.clone();
            Callback::from(move |_: Event| cb.emit(method.clone()))
        };
        html! {
            <label class={classes!("payment-option", selected.then_some("selected"))}>
                <input
                    type="radio"
                    name={InputField::Payment.element_id()}
                    value={method.as_str().to_string()}
                    checked={selected}
                    {onchange}
                />
                <span>{ method.label().to_string() }</span>
            </label>
        }
    });
    let card_display = if surface.is_visible(Region::CardDetails) {
        "display:block"
    } else {
        "display:none"
    };
    let on_confirm = {
        let cb = p.on_confirm.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div id={WizardStep::Payment.element_id()} class={step_classes(surface, WizardStep::Payment)}>
            <h3>{ WizardStep::Payment.title() }</h3>
            <div class="payment-options">{ for options }</div>
            <div id={Region::CardDetails.element_id()} class="card-details" style={card_display}>
                <input type="text" inputmode="numeric" placeholder="Card number" autocomplete="cc-number" />
                <div class="form-row">
                    <input type="text" placeholder="MM/YY" autocomplete="cc-exp" />
                    <input type="text" inputmode="numeric" placeholder="CVV" autocomplete="cc-csc" />
                </div>
            </div>
            <div class="wizard-actions">
                { nav_button("Back", "btn-secondary", &p.on_retreat, WizardStep::Date) }
                <button type="button" class="btn btn-primary" onclick={on_confirm}>
                    {"Confirm Booking"}
                </button>
            </div>
        </div>
    }
}

/// The four wizard steps. Only the active one is shown by the stylesheet.
#[function_component(BookingWizard)]
pub fn booking_wizard(p: &Props) -> Html {
    let on_done = {
        let cb = p.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {
        <div class="wizard">
            { render_summary(p) }
            { render_details(p) }
            { render_payment(p) }
            <div id={WizardStep::Receipt.element_id()} class={step_classes(&p.surface, WizardStep::Receipt)}>
                <Receipt surface={p.surface.clone()} />
                <div class="wizard-actions">
                    <button type="button" class="btn btn-secondary" onclick={|_: MouseEvent| {
                        let _ = crate::dom::window().print();
                    }}>{"Print"}</button>
                    <button type="button" class="btn btn-primary" onclick={on_done}>{"Done"}</button>
                </div>
            </div>
        </div>
    }
}
