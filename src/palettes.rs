//! Built-in qualitative colormaps.
//!
//! `tab20`, `tab20b`, `tab20c` and `paired` list their colors as natural
//! (dark, light) neighbours and are meant to be consumed two at a time. The
//! others are single-hue lists that want a blend [`Target`](crate::color::Target)
//! to become pairs.

use crate::color::Rgb;

/// A named list of base colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colormap {
    pub name: &'static str,
    pub colors: &'static [Rgb],
    /// Whether consecutive entries already form (primary, secondary) pairs.
    pub paired: bool,
}

/// Name of the colormap used when the caller picks none.
pub const DEFAULT_COLORMAP: &str = "tab20";

const TAB10: [Rgb; 10] = [
    Rgb::new(0x1f, 0x77, 0xb4),
    Rgb::new(0xff, 0x7f, 0x0e),
    Rgb::new(0x2c, 0xa0, 0x2c),
    Rgb::new(0xd6, 0x27, 0x28),
    Rgb::new(0x94, 0x67, 0xbd),
    Rgb::new(0x8c, 0x56, 0x4b),
    Rgb::new(0xe3, 0x77, 0xc2),
    Rgb::new(0x7f, 0x7f, 0x7f),
    Rgb::new(0xbc, 0xbd, 0x22),
    Rgb::new(0x17, 0xbe, 0xcf),
];

const TAB20: [Rgb; 20] = [
    Rgb::new(0x1f, 0x77, 0xb4),
    Rgb::new(0xae, 0xc7, 0xe8),
    Rgb::new(0xff, 0x7f, 0x0e),
    Rgb::new(0xff, 0xbb, 0x78),
    Rgb::new(0x2c, 0xa0, 0x2c),
    Rgb::new(0x98, 0xdf, 0x8a),
    Rgb::new(0xd6, 0x27, 0x28),
    Rgb::new(0xff, 0x98, 0x96),
    Rgb::new(0x94, 0x67, 0xbd),
    Rgb::new(0xc5, 0xb0, 0xd5),
    Rgb::new(0x8c, 0x56, 0x4b),
    Rgb::new(0xc4, 0x9c, 0x94),
    Rgb::new(0xe3, 0x77, 0xc2),
    Rgb::new(0xf7, 0xb6, 0xd2),
    Rgb::new(0x7f, 0x7f, 0x7f),
    Rgb::new(0xc7, 0xc7, 0xc7),
    Rgb::new(0xbc, 0xbd, 0x22),
    Rgb::new(0xdb, 0xdb, 0x8d),
    Rgb::new(0x17, 0xbe, 0xcf),
    Rgb::new(0x9e, 0xda, 0xe5),
];

const TAB20B: [Rgb; 20] = [
    Rgb::new(0x39, 0x3b, 0x79),
    Rgb::new(0x52, 0x54, 0xa3),
    Rgb::new(0x6b, 0x6e, 0xcf),
    Rgb::new(0x9c, 0x9e, 0xde),
    Rgb::new(0x63, 0x79, 0x39),
    Rgb::new(0x8c, 0xa2, 0x52),
    Rgb::new(0xb5, 0xcf, 0x6b),
    Rgb::new(0xce, 0xdb, 0x9c),
    Rgb::new(0x8c, 0x6d, 0x31),
    Rgb::new(0xbd, 0x9e, 0x39),
    Rgb::new(0xe7, 0xba, 0x52),
    Rgb::new(0xe7, 0xcb, 0x94),
    Rgb::new(0x84, 0x3c, 0x39),
    Rgb::new(0xad, 0x49, 0x4a),
    Rgb::new(0xd6, 0x61, 0x6b),
    Rgb::new(0xe7, 0x96, 0x9c),
    Rgb::new(0x7b, 0x41, 0x73),
    Rgb::new(0xa5, 0x51, 0x94),
    Rgb::new(0xce, 0x6d, 0xbd),
    Rgb::new(0xde, 0x9e, 0xd6),
];

const TAB20C: [Rgb; 20] = [
    Rgb::new(0x31, 0x82, 0xbd),
    Rgb::new(0x6b, 0xae, 0xd6),
    Rgb::new(0x9e, 0xca, 0xe1),
    Rgb::new(0xc6, 0xdb, 0xef),
    Rgb::new(0xe6, 0x55, 0x0d),
    Rgb::new(0xfd, 0x8d, 0x3c),
    Rgb::new(0xfd, 0xae, 0x6b),
    Rgb::new(0xfd, 0xd0, 0xa2),
    Rgb::new(0x31, 0xa3, 0x54),
    Rgb::new(0x74, 0xc4, 0x76),
    Rgb::new(0xa1, 0xd9, 0x9b),
    Rgb::new(0xc7, 0xe9, 0xc0),
    Rgb::new(0x75, 0x6b, 0xb1),
    Rgb::new(0x9e, 0x9a, 0xc8),
    Rgb::new(0xbc, 0xbd, 0xdc),
    Rgb::new(0xda, 0xda, 0xeb),
    Rgb::new(0x63, 0x63, 0x63),
    Rgb::new(0x96, 0x96, 0x96),
    Rgb::new(0xbd, 0xbd, 0xbd),
    Rgb::new(0xd9, 0xd9, 0xd9),
];

const PAIRED: [Rgb; 12] = [
    Rgb::new(0xa6, 0xce, 0xe3),
    Rgb::new(0x1f, 0x78, 0xb4),
    Rgb::new(0xb2, 0xdf, 0x8a),
    Rgb::new(0x33, 0xa0, 0x2c),
    Rgb::new(0xfb, 0x9a, 0x99),
    Rgb::new(0xe3, 0x1a, 0x1c),
    Rgb::new(0xfd, 0xbf, 0x6f),
    Rgb::new(0xff, 0x7f, 0x00),
    Rgb::new(0xca, 0xb2, 0xd6),
    Rgb::new(0x6a, 0x3d, 0x9a),
    Rgb::new(0xff, 0xff, 0x99),
    Rgb::new(0xb1, 0x59, 0x28),
];

const SET1: [Rgb; 9] = [
    Rgb::new(0xe4, 0x1a, 0x1c),
    Rgb::new(0x37, 0x7e, 0xb8),
    Rgb::new(0x4d, 0xaf, 0x4a),
    Rgb::new(0x98, 0x4e, 0xa3),
    Rgb::new(0xff, 0x7f, 0x00),
    Rgb::new(0xff, 0xff, 0x33),
    Rgb::new(0xa6, 0x56, 0x28),
    Rgb::new(0xf7, 0x81, 0xbf),
    Rgb::new(0x99, 0x99, 0x99),
];

const SET2: [Rgb; 8] = [
    Rgb::new(0x66, 0xc2, 0xa5),
    Rgb::new(0xfc, 0x8d, 0x62),
    Rgb::new(0x8d, 0xa0, 0xcb),
    Rgb::new(0xe7, 0x8a, 0xc3),
    Rgb::new(0xa6, 0xd8, 0x54),
    Rgb::new(0xff, 0xd9, 0x2f),
    Rgb::new(0xe5, 0xc4, 0x94),
    Rgb::new(0xb3, 0xb3, 0xb3),
];
/// Microsoft Office (2013+) chart series palette.
const OFFICE10: [Rgb; 10] = [
    Rgb::new(68, 114, 196),  // blue      (#4472C4)
    Rgb::new(237, 125, 49),  // orange    (#ED7D31)
    Rgb::new(165, 165, 165), // gray      (#A5A5A5)
    Rgb::new(255, 192, 0),   // gold      (#FFC000)
    Rgb::new(91, 155, 213),  // light blue(#5B9BD5)
    Rgb::new(112, 173, 71),  // green     (#70AD47)
    Rgb::new(38, 68, 120),   // dark blue (#264478)
    Rgb::new(158, 72, 14),   // dark org. (#9E480E)
    Rgb::new(99, 99, 99),    // dark gray (#636363)
    Rgb::new(153, 115, 0),   // brownish  (#997300)
];

const ALL: [Colormap; 8] = [
    Colormap {
        name: "tab20",
        colors: &TAB20,
        paired: true,
    },
    Colormap {
        name: "tab20b",
        colors: &TAB20B,
        paired: true,
    },
    Colormap {
        name: "tab20c",
        colors: &TAB20C,
        paired: true,
    },
    Colormap {
        name: "paired",
        colors: &PAIRED,
        paired: true,
    },
    Colormap {
        name: "tab10",
        colors: &TAB10,
        paired: false,
    },
    Colormap {
        name: "set1",
        colors: &SET1,
        paired: false,
    },
    Colormap {
        name: "set2",
        colors: &SET2,
        paired: false,
    },
    Colormap {
        name: "office",
        colors: &OFFICE10,
        paired: false,
    },
];

/// Look up a colormap by (case-insensitive) name.
pub fn colormap(name: &str) -> Option<Colormap> {
    let wanted = name.trim().to_ascii_lowercase();
    ALL.iter().copied().find(|m| m.name == wanted)
}

/// All built-in colormaps, paired ones first.
pub fn colormaps() -> &'static [Colormap] {
    &ALL
}
