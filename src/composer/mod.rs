//! The PFP composer: mounts a 512x512 preview canvas plus sheet/cell
//! pickers into the page, loads the selected sprite sheets, composites the
//! chosen cells with the decorative frame, and exports the result as a PNG
//! download.
//!
//! Everything runs on the browser's single UI thread. Image loads complete
//! in any order; whichever finishes last triggers the composite, and rapid
//! selection changes coalesce through one trailing debounce timer. A stale
//! in-flight load is harmless because composition always reads the current
//! selection and slot state at fire time, never the state captured when
//! the load was issued.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    window, CanvasRenderingContext2d, Document, Element, HtmlAnchorElement, HtmlCanvasElement,
    HtmlImageElement, ImageData,
};

pub mod compose;
mod frame;
pub mod sheets;

use compose::{
    cell_rect, chroma_key_black, export_filename, grid_aligned, Selection, CANVAS_SIZE,
    CELLS_PER_SHEET, CHAR_INSET_X, CHAR_SIZE, CHAR_TOP_OFFSET,
};
use sheets::SheetDesc;

/// Trailing debounce before a recomposite after a selection change (ms).
/// Long enough to coalesce a click burst, short enough to feel immediate.
const REGEN_DEBOUNCE_MS: i32 = 40;

const BTN_STYLE: &str = "padding:6px 10px; margin:0; border-radius:8px; border:1px solid #333; \
     background:#1A1A2E; color:#fff; font-family:inherit; font-size:13px; cursor:pointer;";
const BTN_ACTIVE_STYLE: &str = "padding:6px 10px; margin:0; border-radius:8px; border:1px solid #FF6B6B; \
     background:#2A2A4E; color:#FFE66D; font-family:inherit; font-size:13px; cursor:pointer;";
const CELL_STYLE: &str = "flex:1 1 30%; padding:8px 4px; border-radius:8px; border:1px solid #333; \
     background:#15152A; color:#ccc; font-family:inherit; font-size:12px; cursor:pointer;";
const CELL_ACTIVE_STYLE: &str = "flex:1 1 30%; padding:8px 4px; border-radius:8px; border:1px solid #4ECDC4; \
     background:#203838; color:#95E1D3; font-family:inherit; font-size:12px; cursor:pointer;";
const ACTION_STYLE: &str = "flex:1 1 30%; padding:10px 8px; border-radius:10px; border:1px solid #FF6B6B; \
     background:#FF6B6B; color:#0F0F1A; font-family:inherit; font-size:14px; font-weight:700; cursor:pointer;";

// --- Component state ---------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum Layer {
    Background,
    Character,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SlotStatus {
    Pending,
    Ready,
    Failed,
}

/// One image slot per layer. The element is created once at mount with its
/// load/error listeners attached; selection changes only swap its `src`.
struct LayerSlot {
    img: HtmlImageElement,
    status: SlotStatus,
}

struct ComposerState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    selection: Selection,
    background: LayerSlot,
    character: LayerSlot,
    /// Armed debounce timeout handle, if any.
    pending_timer: Option<i32>,
    /// PNG data URL of the last successful composite; None until first draw.
    data_url: Option<String>,
}

impl ComposerState {
    fn slot_mut(&mut self, layer: Layer) -> &mut LayerSlot {
        match layer {
            Layer::Background => &mut self.background,
            Layer::Character => &mut self.character,
        }
    }

    fn sheet_index(&self, layer: Layer) -> usize {
        match layer {
            Layer::Background => self.selection.background_sheet,
            Layer::Character => self.selection.character_sheet,
        }
    }
}

fn layer_sheets(layer: Layer) -> &'static [SheetDesc] {
    match layer {
        Layer::Background => &sheets::BACKGROUND_SHEETS,
        Layer::Character => &sheets::CHARACTER_SHEETS,
    }
}

fn layer_prefix(layer: Layer) -> &'static str {
    match layer {
        Layer::Background => "bg",
        Layer::Character => "ch",
    }
}

thread_local! {
    static COMPOSER: RefCell<Option<ComposerState>> = RefCell::new(None);
    // Single stored debounce callback, re-armed by schedule_recompose.
    static REGEN_CB: RefCell<Option<Closure<dyn FnMut()>>> = RefCell::new(None);
}

// --- Mount -------------------------------------------------------------------

pub fn mount() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("kfh-pfp-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("kfh-pfp-canvas");
        c.set_width(CANVAS_SIZE);
        c.set_height(CANVAS_SIZE);
        c.set_attribute(
            "style",
            "display:block; margin:0 auto; max-width:100%; border-radius:18px; \
             background:#0F0F1A; box-shadow:0 0 32px 0 rgba(0,0,0,0.35);",
        )
        .ok();
        host(&doc)?.append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas 2d context unavailable"))?
        .dyn_into()?;

    let state = ComposerState {
        canvas,
        ctx,
        selection: Selection::new(),
        background: new_slot(Layer::Background)?,
        character: new_slot(Layer::Character)?,
        pending_timer: None,
        data_url: None,
    };
    COMPOSER.with(|cell| cell.replace(Some(state)));

    init_regen_callback();
    build_controls(&doc)?;
    // A remount resets the selection, so re-sync any pre-existing controls.
    refresh_controls(&Selection::new());

    // Kick off the initial loads for selection (0, 0, 0, 0); the second
    // load to complete triggers the first composite.
    COMPOSER.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            issue_load(state, Layer::Background);
            issue_load(state, Layer::Character);
        }
    });
    Ok(())
}

fn host(doc: &Document) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id("kfh-pfp-root") {
        return Ok(el);
    }
    let div = doc.create_element("div")?;
    div.set_id("kfh-pfp-root");
    div.set_attribute(
        "style",
        "max-width:560px; margin:0 auto; padding:16px; \
         font-family:'Space Grotesk', sans-serif; color:#fff;",
    )
    .ok();
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&div)?;
    Ok(div)
}

// --- Sprite loading ----------------------------------------------------------

/// Build a layer's image slot and attach its completion listeners once.
/// The handlers read the component state fresh at fire time, so they stay
/// correct across every subsequent `src` swap.
fn new_slot(layer: Layer) -> Result<LayerSlot, JsValue> {
    let img = HtmlImageElement::new()?;

    let on_load = Closure::wrap(Box::new(move || {
        COMPOSER.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.slot_mut(layer).status = SlotStatus::Ready;
                schedule_recompose(state);
            }
        });
    }) as Box<dyn FnMut()>);
    img.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
    on_load.forget();

    let img_err = img.clone();
    let on_error = Closure::wrap(Box::new(move || {
        console_warn(&format!("sprite sheet failed to load: {}", img_err.src()));
        COMPOSER.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.slot_mut(layer).status = SlotStatus::Failed;
                // A failed layer is skipped at draw time; the other layer
                // still composites.
                schedule_recompose(state);
            }
        });
    }) as Box<dyn FnMut()>);
    img.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
    on_error.forget();

    Ok(LayerSlot {
        img,
        status: SlotStatus::Pending,
    })
}

/// Point a layer slot at its currently selected sheet. No retry on failure;
/// the slot stays failed until the next selection change lands here again.
fn issue_load(state: &mut ComposerState, layer: Layer) {
    let desc = &layer_sheets(layer)[state.sheet_index(layer)];
    let slot = state.slot_mut(layer);
    slot.status = SlotStatus::Pending;
    slot.img.set_src(desc.image_src);
}

// --- Debounced regeneration --------------------------------------------------

fn init_regen_callback() {
    REGEN_CB.with(|cb| {
        if cb.borrow().is_none() {
            *cb.borrow_mut() = Some(Closure::wrap(Box::new(|| {
                COMPOSER.with(|cell| {
                    if let Some(state) = cell.borrow_mut().as_mut() {
                        state.pending_timer = None;
                        recompose(state);
                    }
                });
            }) as Box<dyn FnMut()>));
        }
    });
}

/// Arm (or re-arm) the trailing debounce timer. A burst of selection
/// changes collapses into one composite of whatever state is current when
/// the timer fires.
fn schedule_recompose(state: &mut ComposerState) {
    let Some(win) = window() else { return };
    if let Some(handle) = state.pending_timer.take() {
        win.clear_timeout_with_handle(handle);
    }
    REGEN_CB.with(|cb| {
        if let Some(cb) = cb.borrow().as_ref() {
            match win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                REGEN_DEBOUNCE_MS,
            ) {
                Ok(handle) => state.pending_timer = Some(handle),
                // No timer available: draw immediately rather than never.
                Err(_) => recompose(state),
            }
        }
    });
}

// --- Compositing -------------------------------------------------------------

/// Redraw the preview wholesale from the current selection. A still-pending
/// layer leaves the canvas untouched; that load's completion callback comes
/// back here. Failed layers are skipped, never fatal.
fn recompose(state: &mut ComposerState) {
    if state.background.status == SlotStatus::Pending
        || state.character.status == SlotStatus::Pending
    {
        return;
    }
    let size = CANVAS_SIZE as f64;
    state.ctx.clear_rect(0.0, 0.0, size, size);

    draw_layer(
        &state.ctx,
        &state.background,
        state.selection.background_cell,
        0.0,
        0.0,
        size,
        size,
    );
    let drew_character = draw_layer(
        &state.ctx,
        &state.character,
        state.selection.character_cell,
        CHAR_INSET_X,
        CHAR_TOP_OFFSET,
        CHAR_SIZE,
        CHAR_SIZE,
    );
    let character_desc = &sheets::CHARACTER_SHEETS[state.selection.character_sheet];
    if drew_character && character_desc.opaque_black_bg {
        key_out_black(&state.ctx, CHAR_INSET_X, CHAR_TOP_OFFSET, CHAR_SIZE, CHAR_SIZE);
    }

    frame::draw_frame(&state.ctx, size);

    state.data_url = state.canvas.to_data_url_with_type("image/png").ok();
}

/// Draw one grid cell of a sheet into the destination rectangle, scaling
/// source to destination. Returns whether anything was drawn.
fn draw_layer(
    ctx: &CanvasRenderingContext2d,
    slot: &LayerSlot,
    cell_index: usize,
    dx: f64,
    dy: f64,
    dw: f64,
    dh: f64,
) -> bool {
    if slot.status != SlotStatus::Ready {
        return false;
    }
    let (w, h) = (slot.img.natural_width(), slot.img.natural_height());
    if w == 0 || h == 0 {
        return false;
    }
    if !grid_aligned(w, h) {
        console_warn(&format!(
            "sprite sheet {} is {}x{}, not an even 3x3 grid; cells will be floor-cropped",
            slot.img.src(),
            w,
            h
        ));
    }
    let (sx, sy, sw, sh) = cell_rect(cell_index, w, h);
    ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        &slot.img, sx, sy, sw, sh, dx, dy, dw, dh,
    )
    .ok();
    true
}

/// Run the black chroma key over a canvas region in place. Pixel readback
/// fails on a tainted canvas (cross-origin sprite); that would also break
/// PNG export, so it is worth a warning before giving up.
fn key_out_black(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64) {
    let region = match ctx.get_image_data(x, y, w, h) {
        Ok(d) => d,
        Err(_) => {
            console_warn("chroma key skipped: canvas pixels unreadable");
            return;
        }
    };
    let mut rgba = region.data().0;
    chroma_key_black(&mut rgba);
    if let Ok(keyed) =
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(&mut rgba), region.width(), region.height())
    {
        ctx.put_image_data(&keyed, x, y).ok();
    }
}

// --- Export ------------------------------------------------------------------

fn on_download() {
    let url = COMPOSER.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|state| state.data_url.clone())
    });
    // Nothing composited yet: ignore the click.
    let Some(url) = url else { return };
    if trigger_download(&url).is_err() {
        console_warn("download failed");
    }
}

fn trigger_download(url: &str) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let a: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
    a.set_href(url);
    a.set_download(&export_filename(now_unix_ms()));
    a.click();
    Ok(())
}

fn now_unix_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.time_origin() + p.now())
        .unwrap_or(0.0)
}

// --- Selection handlers ------------------------------------------------------

fn on_sheet_click(layer: Layer, idx: usize) {
    let mut sel_after = None;
    COMPOSER.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            let changed = match layer {
                Layer::Background => state.selection.set_background_sheet(idx),
                Layer::Character => state.selection.set_character_sheet(idx),
            };
            if changed {
                issue_load(state, layer);
                schedule_recompose(state);
                sel_after = Some(state.selection);
            }
        }
    });
    if let Some(sel) = sel_after {
        refresh_controls(&sel);
    }
}

fn on_cell_click(layer: Layer, idx: usize) {
    let mut sel_after = None;
    COMPOSER.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            let changed = match layer {
                Layer::Background => state.selection.set_background_cell(idx),
                Layer::Character => state.selection.set_character_cell(idx),
            };
            if changed {
                schedule_recompose(state);
                sel_after = Some(state.selection);
            }
        }
    });
    if let Some(sel) = sel_after {
        refresh_controls(&sel);
    }
}

fn on_generate() {
    // Manual generate skips the debounce.
    COMPOSER.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            if let Some(handle) = state.pending_timer.take() {
                if let Some(win) = window() {
                    win.clear_timeout_with_handle(handle);
                }
            }
            recompose(state);
        }
    });
}

fn on_randomize() {
    let mut sel_after = None;
    COMPOSER.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            let bs = rand_index(sheets::BACKGROUND_SHEETS.len());
            let cs = rand_index(sheets::CHARACTER_SHEETS.len());
            // Route through the setters so sheet switches reset cells first.
            if state.selection.set_background_sheet(bs) {
                issue_load(state, Layer::Background);
            }
            if state.selection.set_character_sheet(cs) {
                issue_load(state, Layer::Character);
            }
            state.selection.set_background_cell(rand_index(CELLS_PER_SHEET));
            state.selection.set_character_cell(rand_index(CELLS_PER_SHEET));
            schedule_recompose(state);
            sel_after = Some(state.selection);
        }
    });
    if let Some(sel) = sel_after {
        refresh_controls(&sel);
    }
}

fn rand_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 4];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u32::from_le_bytes(buf) as usize % len;
        }
    }
    let now = window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    // Linear transform over the clock; shuffling a selection does not need
    // real entropy (not crypto secure).
    (now as u64 as usize)
        .wrapping_mul(1664525)
        .wrapping_add(1013904223)
        % len
}

// --- Control panel -----------------------------------------------------------

fn build_controls(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("kfh-pfp-controls").is_some() {
        return Ok(());
    }
    let root = host(doc)?;
    let wrap = doc.create_element("div")?;
    wrap.set_id("kfh-pfp-controls");
    root.append_child(&wrap)?;

    for (layer, title) in [
        (Layer::Background, "Background"),
        (Layer::Character, "Character"),
    ] {
        let prefix = layer_prefix(layer);
        section_label(doc, &wrap, title)?;

        let tabs = row(doc)?;
        for (idx, sheet) in layer_sheets(layer).iter().enumerate() {
            let style = if idx == 0 { BTN_ACTIVE_STYLE } else { BTN_STYLE };
            let b = button(
                doc,
                sheet.display_name,
                &format!("kfh-pfp-{prefix}-tab-{idx}"),
                style,
            )?;
            on_click(&b, move || on_sheet_click(layer, idx))?;
            tabs.append_child(&b)?;
        }
        wrap.append_child(&tabs)?;

        let grid = row(doc)?;
        for (idx, label) in layer_sheets(layer)[0].cell_labels.iter().enumerate() {
            let style = if idx == 0 { CELL_ACTIVE_STYLE } else { CELL_STYLE };
            let b = button(doc, label, &format!("kfh-pfp-{prefix}-cell-{idx}"), style)?;
            on_click(&b, move || on_cell_click(layer, idx))?;
            grid.append_child(&b)?;
        }
        wrap.append_child(&grid)?;
    }

    let actions = row(doc)?;
    let pairs: [(&str, fn()); 3] = [
        ("Generate", on_generate),
        ("Surprise Me", on_randomize),
        ("Download PNG", on_download),
    ];
    for (text, handler) in pairs {
        let id = format!("kfh-pfp-action-{}", text.to_lowercase().replace(' ', "-"));
        let b = button(doc, text, &id, ACTION_STYLE)?;
        on_click(&b, move || handler())?;
        actions.append_child(&b)?;
    }
    wrap.append_child(&actions)?;
    Ok(())
}

/// Sync tab highlights, cell highlights, and cell labels to a selection.
/// Buttons are looked up by id so this works no matter who mutated the
/// selection (clicks, randomize).
fn refresh_controls(sel: &Selection) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    refresh_layer(&doc, Layer::Background, sel.background_sheet, sel.background_cell);
    refresh_layer(&doc, Layer::Character, sel.character_sheet, sel.character_cell);
}

fn refresh_layer(doc: &Document, layer: Layer, sheet_idx: usize, cell_idx: usize) {
    let prefix = layer_prefix(layer);
    let catalog = layer_sheets(layer);
    for idx in 0..catalog.len() {
        if let Some(el) = doc.get_element_by_id(&format!("kfh-pfp-{prefix}-tab-{idx}")) {
            let style = if idx == sheet_idx { BTN_ACTIVE_STYLE } else { BTN_STYLE };
            el.set_attribute("style", style).ok();
        }
    }
    for (idx, label) in catalog[sheet_idx].cell_labels.iter().enumerate() {
        if let Some(el) = doc.get_element_by_id(&format!("kfh-pfp-{prefix}-cell-{idx}")) {
            el.set_text_content(Some(label));
            let style = if idx == cell_idx { CELL_ACTIVE_STYLE } else { CELL_STYLE };
            el.set_attribute("style", style).ok();
        }
    }
}

fn section_label(doc: &Document, parent: &Element, text: &str) -> Result<(), JsValue> {
    let el = doc.create_element("div")?;
    el.set_text_content(Some(text));
    el.set_attribute(
        "style",
        "margin:14px 0 6px; font-weight:700; letter-spacing:0.5px; color:#FFE66D;",
    )
    .ok();
    parent.append_child(&el)?;
    Ok(())
}

fn row(doc: &Document) -> Result<Element, JsValue> {
    let el = doc.create_element("div")?;
    el.set_attribute("style", "display:flex; flex-wrap:wrap; gap:4px; margin:4px 0;")
        .ok();
    Ok(el)
}

fn button(doc: &Document, text: &str, id: &str, style: &str) -> Result<Element, JsValue> {
    let b = doc.create_element("button")?;
    b.set_id(id);
    b.set_text_content(Some(text));
    b.set_attribute("style", style).ok();
    Ok(b)
}

fn on_click<F: FnMut() + 'static>(el: &Element, mut handler: F) -> Result<(), JsValue> {
    let closure =
        Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| handler()) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn console_warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}
