//! Browser-mode smoke tests (`wasm-pack test --headless --chrome`).

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().expect("window").document().expect("document")
}

#[wasm_bindgen_test]
fn mount_creates_the_preview_canvas() {
    kfh_pfp::start_pfp_composer().expect("mount");
    let canvas: HtmlCanvasElement = document()
        .get_element_by_id("kfh-pfp-canvas")
        .expect("canvas in DOM")
        .dyn_into()
        .expect("canvas element");
    assert_eq!(canvas.width(), 512);
    assert_eq!(canvas.height(), 512);
}

#[wasm_bindgen_test]
fn remount_reuses_the_existing_component() {
    kfh_pfp::start_pfp_composer().expect("first mount");
    kfh_pfp::start_pfp_composer().expect("second mount");
    let canvases = document().get_elements_by_tag_name("canvas");
    assert_eq!(canvases.length(), 1, "remount duplicated the canvas");
}

#[wasm_bindgen_test]
fn controls_are_built_for_both_layers() {
    kfh_pfp::start_pfp_composer().expect("mount");
    let doc = document();
    for prefix in ["bg", "ch"] {
        for tab in 0..3 {
            assert!(
                doc.get_element_by_id(&format!("kfh-pfp-{prefix}-tab-{tab}")).is_some(),
                "missing {prefix} tab {tab}"
            );
        }
        for cell in 0..9 {
            assert!(
                doc.get_element_by_id(&format!("kfh-pfp-{prefix}-cell-{cell}")).is_some(),
                "missing {prefix} cell {cell}"
            );
        }
    }
}
