use labbook_core::surface::TextField;
use labbook_core::{MemorySurface, SubmissionStatus};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub surface: Rc<MemorySurface>,
}

const ROWS: [(&str, TextField); 8] = [
    ("Invoice", TextField::SummaryInvoiceId),
    ("Patient", TextField::SummaryName),
    ("Services", TextField::SummaryService),
    ("Verification code", TextField::SummaryCode),
    ("Date", TextField::SummaryDate),
    ("Subtotal", TextField::SummaryPrice),
    ("Tax", TextField::SummaryTax),
    ("Total", TextField::SummaryTotal),
];

const fn status_class(status: &SubmissionStatus) -> &'static str {
    match status {
        SubmissionStatus::Idle => "submission-status--idle",
        SubmissionStatus::Pending { .. } => "submission-status--pending",
        SubmissionStatus::Confirmed { .. } => "submission-status--confirmed",
        SubmissionStatus::Failed { .. } => "submission-status--failed",
    }
}

#[function_component(Receipt)]
pub fn receipt(p: &Props) -> Html {
    let surface = &p.surface;
    let text = |field: TextField| surface.text(field).unwrap_or_default().to_string();

    let stamp = surface.stamp().map_or_else(Html::default, |stamp| {
        let tone = stamp.tone().css_var();
        html! {
            <div id="paid-stamp" class="stamp" style={format!("color:{tone};border-color:{tone}")}>
                { stamp.text() }
            </div>
        }
    });
    let status = surface.submission();

    html! {
        <div class="receipt">
            <div class="receipt__header">
                <h3>{"Booking Receipt"}</h3>
                <span id={TextField::InvoiceId.element_id()}>{ text(TextField::InvoiceId) }</span>
            </div>
            { stamp }
            <dl class="receipt__rows">
                { for ROWS.iter().map(|(label, field)| html! {
                    <>
                        <dt>{ *label }</dt>
                        <dd id={field.element_id()}>{ text(*field) }</dd>
                    </>
                }) }
            </dl>
            <p id="submission-status" class={classes!("submission-status", status_class(status))}>
                { status.label() }
            </p>
            <p class="receipt__note">{"Show this receipt and verification code at the lab."}</p>
        </div>
    }
}
