// Sprite-sheet catalog. Each sheet image is a 3x3 grid of equally sized
// cells, row-major from top-left (0) to bottom-right (8). The catalog is
// fixed at build time; the UI never constructs indices outside it.

/// Static descriptor for one selectable sprite sheet.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SheetDesc {
    pub id: &'static str,
    pub display_name: &'static str,
    pub image_src: &'static str,
    pub cell_labels: [&'static str; 9],
    /// Legacy sheets were exported on a solid black background instead of
    /// real alpha; the compositor chroma-keys those after drawing.
    pub opaque_black_bg: bool,
}

pub static BACKGROUND_SHEETS: [SheetDesc; 3] = [
    SheetDesc {
        id: "kfh",
        display_name: "KFH Classics",
        image_src: "/pfp/bg-kfh.png",
        cell_labels: [
            "Dojo",
            "Temple Gate",
            "Bamboo Grove",
            "Sunset Run",
            "Mountain Peak",
            "Waterfall",
            "Night Alley",
            "Rooftop",
            "Shrine",
        ],
        opaque_black_bg: false,
    },
    SheetDesc {
        id: "moon",
        display_name: "To The Moon",
        image_src: "/pfp/bg-moon.png",
        cell_labels: [
            "Launchpad",
            "Low Orbit",
            "Crater Camp",
            "Earthrise",
            "Starfield",
            "Nebula",
            "Rocket Trail",
            "Lunar Base",
            "Eclipse",
        ],
        opaque_black_bg: false,
    },
    SheetDesc {
        id: "neon",
        display_name: "Neon City",
        image_src: "/pfp/bg-neon.png",
        cell_labels: [
            "Arcade",
            "Billboard",
            "Rain Street",
            "Subway",
            "Skyline",
            "Noodle Bar",
            "Rooftop Bar",
            "Back Alley",
            "Pagoda",
        ],
        opaque_black_bg: false,
    },
];

pub static CHARACTER_SHEETS: [SheetDesc; 3] = [
    // The original "jobs" sheet predates alpha-transparent exports.
    SheetDesc {
        id: "jobs",
        display_name: "Day Jobs",
        image_src: "/pfp/char-jobs.png",
        cell_labels: [
            "Founder",
            "Trader",
            "Barista",
            "Ninja",
            "Chef",
            "DJ",
            "Astronaut",
            "Degen",
            "Sensei",
        ],
        opaque_black_bg: true,
    },
    SheetDesc {
        id: "gi",
        display_name: "Dojo Gi",
        image_src: "/pfp/char-gi.png",
        cell_labels: [
            "White Belt",
            "Yellow Belt",
            "Orange Belt",
            "Green Belt",
            "Blue Belt",
            "Brown Belt",
            "Black Belt",
            "Red Sash",
            "Grandmaster",
        ],
        opaque_black_bg: false,
    },
    SheetDesc {
        id: "fits",
        display_name: "Street Fits",
        image_src: "/pfp/char-fits.png",
        cell_labels: [
            "Hoodie",
            "Tracksuit",
            "Leather Jacket",
            "Hawaiian",
            "Suit",
            "Tank Top",
            "Puffer",
            "Varsity",
            "Robe",
        ],
        opaque_black_bg: false,
    },
];
