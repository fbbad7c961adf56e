//! KFH PFP composer core crate.
//!
//! Canvas avatar generator for the $KFH site: pick a background and a
//! character cell from the sprite-sheet catalog, composite them at 512x512
//! with the decorative frame, and download the result as a PNG. Compiled
//! to WebAssembly; `start_pfp_composer()` mounts the component into the
//! page.

use wasm_bindgen::prelude::*;

pub mod composer;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Brand constants shared by the frame chrome and the exporter
// -----------------------------------------------------------------------------

pub const BRAND_SHORT: &str = "KFH";
pub const BRAND_TICKER: &str = "$KFH";
/// Token mint address rendered in the frame's bottom bar.
pub const CONTRACT_ADDRESS: &str = "GQx3p7aTHLQHDqzFR3c1QSk1Qhy2hz4YbAnkjdXtpump";

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_pfp_composer() -> Result<(), JsValue> {
    composer::mount()
}

/// Sheet catalog as JSON, for host pages that want to render their own
/// pickers instead of the built-in control panel.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn catalog_json() -> String {
    #[derive(serde::Serialize)]
    struct Catalog {
        backgrounds: &'static [composer::sheets::SheetDesc],
        characters: &'static [composer::sheets::SheetDesc],
    }
    serde_json::to_string(&Catalog {
        backgrounds: &composer::sheets::BACKGROUND_SHEETS,
        characters: &composer::sheets::CHARACTER_SHEETS,
    })
    .unwrap_or_default()
}
