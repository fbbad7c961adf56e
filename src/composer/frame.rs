//! Decorative frame chrome drawn over the composited avatar: border
//! strokes, title banner, corner badge, contract-address bar, and corner
//! brackets. Strictly additive vector drawing; this module never reads
//! pixels back, so it works the same over any composite underneath.

use web_sys::CanvasRenderingContext2d;

use super::compose::shrink_to_fit;

// Site palette.
const CORAL: &str = "#FF6B6B";
const TEAL: &str = "#4ECDC4";
const YELLOW: &str = "#FFE66D";
const MINT: &str = "#95E1D3";
const NAVY: &str = "#1A1A2E";
const DARK: &str = "#0F0F1A";

const ADDRESS_FONT_MAX: u32 = 16;
const ADDRESS_FONT_MIN: u32 = 8;
const BAR_PADDING: f64 = 14.0;

pub fn draw_frame(ctx: &CanvasRenderingContext2d, size: f64) {
    // Outer border in brand coral.
    ctx.set_stroke_style_str(CORAL);
    ctx.set_line_width(10.0);
    rounded_rect_path(ctx, 10.0, 10.0, size - 20.0, size - 20.0, 28.0);
    ctx.stroke();

    // Inner accent stroke.
    ctx.set_stroke_style_str(TEAL);
    ctx.set_line_width(3.0);
    rounded_rect_path(ctx, 22.0, 22.0, size - 44.0, size - 44.0, 20.0);
    ctx.stroke();

    banner(ctx, size);
    badge(ctx, size);
    address_bar(ctx, size);
    corner_brackets(ctx, size);
}

/// Top banner with the centered ticker title.
fn banner(ctx: &CanvasRenderingContext2d, size: f64) {
    let w = size * 0.56;
    let x = (size - w) / 2.0;
    let y = 26.0;
    let h = 52.0;

    ctx.set_fill_style_str("rgba(26,26,46,0.82)");
    rounded_rect_path(ctx, x, y, w, h, 14.0);
    ctx.fill();
    ctx.set_stroke_style_str(CORAL);
    ctx.set_line_width(2.0);
    rounded_rect_path(ctx, x, y, w, h, 14.0);
    ctx.stroke();

    ctx.set_font("900 34px 'Space Grotesk', sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    // Stroke-then-fill so the title stays legible over bright sprites.
    ctx.set_line_width(6.0);
    ctx.set_stroke_style_str(DARK);
    ctx.stroke_text(crate::BRAND_TICKER, size / 2.0, y + h / 2.0 + 2.0).ok();
    ctx.set_fill_style_str(YELLOW);
    ctx.fill_text(crate::BRAND_TICKER, size / 2.0, y + h / 2.0 + 2.0).ok();
}

/// Small monogram roundel in the top-right corner.
fn badge(ctx: &CanvasRenderingContext2d, size: f64) {
    let cx = size - 56.0;
    let cy = 56.0;
    let r = 24.0;

    ctx.begin_path();
    ctx.arc(cx, cy, r, 0.0, std::f64::consts::TAU).ok();
    ctx.set_fill_style_str(YELLOW);
    ctx.fill();
    ctx.set_stroke_style_str(NAVY);
    ctx.set_line_width(3.0);
    ctx.begin_path();
    ctx.arc(cx, cy, r, 0.0, std::f64::consts::TAU).ok();
    ctx.stroke();

    ctx.set_font("700 14px 'Space Grotesk', sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(NAVY);
    ctx.fill_text(crate::BRAND_SHORT, cx, cy + 1.0).ok();
}

/// Bottom bar with the token contract address, auto-shrunk to fit.
fn address_bar(ctx: &CanvasRenderingContext2d, size: f64) {
    let x = 24.0;
    let h = 36.0;
    let y = size - h - 20.0;
    let w = size - 48.0;

    ctx.set_fill_style_str("rgba(15,15,26,0.85)");
    rounded_rect_path(ctx, x, y, w, h, 10.0);
    ctx.fill();
    ctx.set_stroke_style_str(TEAL);
    ctx.set_line_width(1.5);
    rounded_rect_path(ctx, x, y, w, h, 10.0);
    ctx.stroke();

    let avail = w - 2.0 * BAR_PADDING;
    let px = shrink_to_fit(
        |candidate| {
            ctx.set_font(&mono_font(candidate));
            ctx.measure_text(crate::CONTRACT_ADDRESS)
                .map(|m| m.width())
                .unwrap_or(0.0)
        },
        avail,
        ADDRESS_FONT_MAX,
        ADDRESS_FONT_MIN,
    );
    ctx.set_font(&mono_font(px));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(MINT);
    ctx.fill_text(crate::CONTRACT_ADDRESS, size / 2.0, y + h / 2.0 + 1.0)
        .ok();
}

fn corner_brackets(ctx: &CanvasRenderingContext2d, size: f64) {
    let inset = 34.0;
    let len = 22.0;
    ctx.set_stroke_style_str(YELLOW);
    ctx.set_line_width(4.0);
    // (corner point, direction toward the interior on each axis)
    let corners = [
        (inset, inset, 1.0, 1.0),
        (size - inset, inset, -1.0, 1.0),
        (inset, size - inset, 1.0, -1.0),
        (size - inset, size - inset, -1.0, -1.0),
    ];
    for (cx, cy, dx, dy) in corners {
        ctx.begin_path();
        ctx.move_to(cx + dx * len, cy);
        ctx.line_to(cx, cy);
        ctx.line_to(cx, cy + dy * len);
        ctx.stroke();
    }
}

fn mono_font(px: u32) -> String {
    format!("{px}px 'Fira Code', monospace")
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r).ok();
    ctx.arc_to(x + w, y + h, x, y + h, r).ok();
    ctx.arc_to(x, y + h, x, y, r).ok();
    ctx.arc_to(x, y, x + w, y, r).ok();
    ctx.close_path();
}
