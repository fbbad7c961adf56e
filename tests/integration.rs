// Integration tests (native) for the `kfh-pfp` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use kfh_pfp::composer::compose::{
    cell_rect, chroma_key_black, export_filename, shrink_to_fit, Selection, CANVAS_SIZE,
    CELLS_PER_SHEET,
};

#[test]
fn export_dimensions_are_fixed() {
    assert_eq!(CANVAS_SIZE, 512);
}

#[test]
fn export_filename_embeds_brand_and_timestamp() {
    let name = export_filename(1_754_000_000_000.0);
    assert_eq!(name, format!("{}-PFP-1754000000000.png", kfh_pfp::BRAND_SHORT));
}

// Property from the selection contract: switching a layer's sheet resets
// that layer's cell to 0 for every (sheet, cell) starting point, and never
// disturbs the other layer.
#[test]
fn sheet_switch_resets_cell_from_any_state() {
    for sheet in 0..3 {
        for cell in 0..CELLS_PER_SHEET {
            for next_sheet in 0..3 {
                if next_sheet == sheet {
                    continue;
                }
                let mut sel = Selection::new();
                sel.set_background_sheet(sheet);
                sel.set_background_cell(cell);
                sel.set_character_cell(8);

                sel.set_background_sheet(next_sheet);
                assert_eq!(sel.background_sheet, next_sheet);
                assert_eq!(sel.background_cell, 0, "cell survived a sheet switch");
                assert_eq!(sel.character_cell, 8, "other layer was disturbed");
            }
        }
    }
}

#[test]
fn cell_rects_tile_the_sheet_exactly() {
    // All nine crops of an aligned sheet are in bounds and cover it.
    let (w, h) = (1536, 1536);
    let mut covered = 0.0;
    for idx in 0..CELLS_PER_SHEET {
        let (sx, sy, sw, sh) = cell_rect(idx, w, h);
        assert!(sx + sw <= w as f64);
        assert!(sy + sh <= h as f64);
        covered += sw * sh;
    }
    assert_eq!(covered, (w * h) as f64);
}

#[test]
fn chroma_key_over_a_synthetic_sprite_region() {
    // 2x2 region: black corner, fade-band pixel, bright pixel, saturated color.
    #[rustfmt::skip]
    let mut rgba = vec![
        0, 0, 0, 255,        30, 30, 30, 255,
        200, 180, 90, 255,   255, 0, 0, 200,
    ];
    chroma_key_black(&mut rgba);
    assert_eq!(rgba[3], 0, "black background survived");
    assert!(rgba[7] > 0 && rgba[7] < 255, "fade band not partially faded");
    assert_eq!(rgba[11], 255, "bright pixel lost alpha");
    assert_eq!(rgba[15], 200, "colored pixel alpha changed");
}

#[test]
fn address_font_shrinks_to_the_largest_fitting_size() {
    // Monospace width model: glyph advance is 0.6em.
    let chars = kfh_pfp::CONTRACT_ADDRESS.len() as f64;
    let measure = |size: u32| size as f64 * 0.6 * chars;

    let bar = 280.0;
    let chosen = shrink_to_fit(measure, bar, 16, 8);
    assert!(measure(chosen) <= bar, "chosen size overflows the bar");
    assert!(measure(chosen + 1) > bar, "a larger size would still fit");

    // Degenerate bar: bottoms out at the floor instead of looping forever.
    assert_eq!(shrink_to_fit(measure, 0.0, 16, 8), 8);
}
