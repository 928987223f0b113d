#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;
use yew::Renderer;

use labbook_web::app::App;
use labbook_web::dom;

wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document();
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

async fn settle() {
    // Let yew flush scheduled renders.
    yew::platform::time::sleep(std::time::Duration::from_millis(20)).await;
}

fn click(selector: &str) {
    dom::document()
        .query_selector(selector)
        .expect("query")
        .expect("element exists")
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

#[wasm_bindgen_test]
async fn selecting_a_card_shows_the_floating_bar() {
    Renderer::<App>::with_root(ensure_app_root()).render();
    settle().await;

    let bar = dom::document()
        .get_element_by_id("floating-book-bar")
        .expect("floating bar");
    assert!(!bar.class_list().contains("visible"));

    click(".service-card");
    settle().await;
    assert!(bar.class_list().contains("visible"));
    let count = dom::document()
        .get_element_by_id("selected-count")
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    assert_eq!(count, "1 Service Selected");
}

#[wasm_bindgen_test]
async fn booking_opens_on_summary_step() {
    Renderer::<App>::with_root(ensure_app_root()).render();
    settle().await;

    click(".service-card");
    settle().await;
    click("#floating-book-bar button");
    settle().await;

    let step1 = dom::document().get_element_by_id("step1").expect("step1");
    assert!(step1.class_list().contains("active"));
    let modal = dom::document()
        .get_element_by_id("bookingModal")
        .expect("modal")
        .dyn_into::<HtmlElement>()
        .expect("html element");
    assert_eq!(modal.style().get_property_value("display").unwrap_or_default(), "flex");
}
