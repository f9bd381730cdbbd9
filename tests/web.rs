//! Browser smoke tests.  Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use penpoint_site::config::classes;
use penpoint_site::page::Page;
use penpoint_site::web::WebPage;
use penpoint_site::{BindingKind, PageEvent, Site, SiteConfig};

wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("document");
    document.body().expect("body").set_inner_html(html);
}

#[wasm_bindgen_test]
fn lightbox_opens_from_real_markup() {
    mount(
        r#"
        <button id="t" data-lightbox data-lightbox-title="Codex" data-lightbox-desc="&lt;b&gt;">Open</button>
        <div id="lightbox" aria-hidden="true">
          <div class="lightbox__overlay"></div>
          <button class="lightbox__close">x</button>
          <h3 class="lightbox__title"></h3>
          <p class="lightbox__desc"></p>
          <div class="lightbox__image-wrapper"></div>
        </div>
        "#,
    );
    let mut page = WebPage::new().expect("page");
    let mut site = Site::init(&mut page, &SiteConfig::default());

    let trigger = site
        .bindings()
        .iter()
        .find(|b| b.kind == BindingKind::LightboxTrigger)
        .map(|b| b.node.clone())
        .expect("trigger binding");
    let outcome = site.dispatch(
        &mut page,
        PageEvent::Click {
            node: trigger,
            kind: BindingKind::LightboxTrigger,
        },
    );
    assert!(outcome.prevent_default);

    let root = page.query("#lightbox").expect("root");
    assert!(page.has_class(&root, classes::LIGHTBOX_OPEN));
    let desc = page.query(".lightbox__desc").expect("desc");
    assert_eq!(desc.text_content().as_deref(), Some("<b>"));
    assert_eq!(desc.child_element_count(), 0);
    assert!(page.query(".lightbox__image-placeholder").is_some());
}

#[wasm_bindgen_test]
fn stagger_sets_inline_delays() {
    mount(
        r#"
        <div data-stagger-group data-stagger-delay="80">
          <div data-animate></div><div data-animate></div>
        </div>
        "#,
    );
    let mut page = WebPage::new().expect("page");
    Site::init(&mut page, &SiteConfig::default());
    let second = page.query_all("[data-animate]").pop().expect("child");
    let style = second.get_attribute("style").unwrap_or_default();
    assert!(style.contains("animation-delay: 80ms"));
}

#[wasm_bindgen_test]
fn controls_under_hidden_ancestors_are_not_focusable() {
    mount(
        r#"
        <a id="shown" href="/a">A</a>
        <div hidden><a id="tucked" href="/b">B</a></div>
        <button id="off" disabled>C</button>
        "#,
    );
    let page = WebPage::new().expect("page");
    let by_id = |id: &str| page.query(&format!("#{id}")).expect("element");
    assert!(page.is_focusable(&by_id("shown")));
    assert!(!page.is_focusable(&by_id("tucked")));
    assert!(!page.is_focusable(&by_id("off")));
}
