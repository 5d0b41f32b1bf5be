use lazy_static::lazy_static;

// Values for this table follow the extended color keywords of the legacy
// style dialect, packed as 0xRRGGBB.

/// A named color of the style dialect
pub struct CssColorEntry {
    pub name: &'static str,
    pub rgb: u32,
}

/// Looks up a color keyword. Names compare ASCII-case-insensitively.
#[must_use]
pub fn color_from_name(name: &str) -> Option<u32> {
    CSS_COLOR_NAMES
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
        .map(|entry| entry.rgb)
}

lazy_static! {
    /// All color keywords known to the dialect
    pub static ref CSS_COLOR_NAMES: &'static [CssColorEntry] = &[
        CssColorEntry { name: "aliceblue", rgb: 0xf0f8ff },
        CssColorEntry { name: "antiquewhite", rgb: 0xfaebd7 },
        CssColorEntry { name: "aqua", rgb: 0x00ffff },
        CssColorEntry { name: "aquamarine", rgb: 0x7fffd4 },
        CssColorEntry { name: "azure", rgb: 0xf0ffff },
        CssColorEntry { name: "beige", rgb: 0xf5f5dc },
        CssColorEntry { name: "bisque", rgb: 0xffe4c4 },
        CssColorEntry { name: "black", rgb: 0x000000 },
        CssColorEntry { name: "blanchedalmond", rgb: 0xffebcd },
        CssColorEntry { name: "blue", rgb: 0x0000ff },
        CssColorEntry { name: "blueviolet", rgb: 0x8a2be2 },
        CssColorEntry { name: "brown", rgb: 0xa52a2a },
        CssColorEntry { name: "burlywood", rgb: 0xdeb887 },
        CssColorEntry { name: "cadetblue", rgb: 0x5f9ea0 },
        CssColorEntry { name: "chartreuse", rgb: 0x7fff00 },
        CssColorEntry { name: "chocolate", rgb: 0xd2691e },
        CssColorEntry { name: "coral", rgb: 0xff7f50 },
        CssColorEntry { name: "cornflowerblue", rgb: 0x6495ed },
        CssColorEntry { name: "cornsilk", rgb: 0xfff8dc },
        CssColorEntry { name: "crimson", rgb: 0xdc143c },
        CssColorEntry { name: "cyan", rgb: 0x00ffff },
        CssColorEntry { name: "darkblue", rgb: 0x00008b },
        CssColorEntry { name: "darkcyan", rgb: 0x008b8b },
        CssColorEntry { name: "darkgoldenrod", rgb: 0xb8860b },
        CssColorEntry { name: "darkgray", rgb: 0xa9a9a9 },
        CssColorEntry { name: "darkgreen", rgb: 0x006400 },
        CssColorEntry { name: "darkgrey", rgb: 0xa9a9a9 },
        CssColorEntry { name: "darkkhaki", rgb: 0xbdb76b },
        CssColorEntry { name: "darkmagenta", rgb: 0x8b008b },
        CssColorEntry { name: "darkolivegreen", rgb: 0x556b2f },
        CssColorEntry { name: "darkorange", rgb: 0xff8c00 },
        CssColorEntry { name: "darkorchid", rgb: 0x9932cc },
        CssColorEntry { name: "darkred", rgb: 0x8b0000 },
        CssColorEntry { name: "darksalmon", rgb: 0xe9967a },
        CssColorEntry { name: "darkseagreen", rgb: 0x8fbc8f },
        CssColorEntry { name: "darkslateblue", rgb: 0x483d8b },
        CssColorEntry { name: "darkslategray", rgb: 0x2f4f4f },
        CssColorEntry { name: "darkslategrey", rgb: 0x2f4f4f },
        CssColorEntry { name: "darkturquoise", rgb: 0x00ced1 },
        CssColorEntry { name: "darkviolet", rgb: 0x9400d3 },
        CssColorEntry { name: "deeppink", rgb: 0xff1493 },
        CssColorEntry { name: "deepskyblue", rgb: 0x00bfff },
        CssColorEntry { name: "dimgray", rgb: 0x696969 },
        CssColorEntry { name: "dimgrey", rgb: 0x696969 },
        CssColorEntry { name: "dodgerblue", rgb: 0x1e90ff },
        CssColorEntry { name: "firebrick", rgb: 0xb22222 },
        CssColorEntry { name: "floralwhite", rgb: 0xfffaf0 },
        CssColorEntry { name: "forestgreen", rgb: 0x228b22 },
        CssColorEntry { name: "fuchsia", rgb: 0xff00ff },
        CssColorEntry { name: "gainsboro", rgb: 0xdcdcdc },
        CssColorEntry { name: "ghostwhite", rgb: 0xf8f8ff },
        CssColorEntry { name: "gold", rgb: 0xffd700 },
        CssColorEntry { name: "goldenrod", rgb: 0xdaa520 },
        CssColorEntry { name: "gray", rgb: 0x808080 },
        CssColorEntry { name: "green", rgb: 0x008000 },
        CssColorEntry { name: "greenyellow", rgb: 0xadff2f },
        CssColorEntry { name: "grey", rgb: 0x808080 },
        CssColorEntry { name: "honeydew", rgb: 0xf0fff0 },
        CssColorEntry { name: "hotpink", rgb: 0xff69b4 },
        CssColorEntry { name: "indianred", rgb: 0xcd5c5c },
        CssColorEntry { name: "indigo", rgb: 0x4b0082 },
        CssColorEntry { name: "ivory", rgb: 0xfffff0 },
        CssColorEntry { name: "khaki", rgb: 0xf0e68c },
        CssColorEntry { name: "lavender", rgb: 0xe6e6fa },
        CssColorEntry { name: "lavenderblush", rgb: 0xfff0f5 },
        CssColorEntry { name: "lawngreen", rgb: 0x7cfc00 },
        CssColorEntry { name: "lemonchiffon", rgb: 0xfffacd },
        CssColorEntry { name: "lightblue", rgb: 0xadd8e6 },
        CssColorEntry { name: "lightcoral", rgb: 0xf08080 },
        CssColorEntry { name: "lightcyan", rgb: 0xe0ffff },
        CssColorEntry { name: "lightgoldenrodyellow", rgb: 0xfafad2 },
        CssColorEntry { name: "lightgray", rgb: 0xd3d3d3 },
        CssColorEntry { name: "lightgreen", rgb: 0x90ee90 },
        CssColorEntry { name: "lightgrey", rgb: 0xd3d3d3 },
        CssColorEntry { name: "lightpink", rgb: 0xffb6c1 },
        CssColorEntry { name: "lightsalmon", rgb: 0xffa07a },
        CssColorEntry { name: "lightseagreen", rgb: 0x20b2aa },
        CssColorEntry { name: "lightskyblue", rgb: 0x87cefa },
        CssColorEntry { name: "lightslategray", rgb: 0x778899 },
        CssColorEntry { name: "lightslategrey", rgb: 0x778899 },
        CssColorEntry { name: "lightsteelblue", rgb: 0xb0c4de },
        CssColorEntry { name: "lightyellow", rgb: 0xffffe0 },
        CssColorEntry { name: "lime", rgb: 0x00ff00 },
        CssColorEntry { name: "limegreen", rgb: 0x32cd32 },
        CssColorEntry { name: "linen", rgb: 0xfaf0e6 },
        CssColorEntry { name: "magenta", rgb: 0xff00ff },
        CssColorEntry { name: "maroon", rgb: 0x800000 },
        CssColorEntry { name: "mediumaquamarine", rgb: 0x66cdaa },
        CssColorEntry { name: "mediumblue", rgb: 0x0000cd },
        CssColorEntry { name: "mediumorchid", rgb: 0xba55d3 },
        CssColorEntry { name: "mediumpurple", rgb: 0x9370db },
        CssColorEntry { name: "mediumseagreen", rgb: 0x3cb371 },
        CssColorEntry { name: "mediumslateblue", rgb: 0x7b68ee },
        CssColorEntry { name: "mediumspringgreen", rgb: 0x00fa9a },
        CssColorEntry { name: "mediumturquoise", rgb: 0x48d1cc },
        CssColorEntry { name: "mediumvioletred", rgb: 0xc71585 },
        CssColorEntry { name: "midnightblue", rgb: 0x191970 },
        CssColorEntry { name: "mintcream", rgb: 0xf5fffa },
        CssColorEntry { name: "mistyrose", rgb: 0xffe4e1 },
        CssColorEntry { name: "moccasin", rgb: 0xffe4b5 },
        CssColorEntry { name: "navajowhite", rgb: 0xffdead },
        CssColorEntry { name: "navy", rgb: 0x000080 },
        CssColorEntry { name: "oldlace", rgb: 0xfdf5e6 },
        CssColorEntry { name: "olive", rgb: 0x808000 },
        CssColorEntry { name: "olivedrab", rgb: 0x6b8e23 },
        CssColorEntry { name: "orange", rgb: 0xffa500 },
        CssColorEntry { name: "orangered", rgb: 0xff4500 },
        CssColorEntry { name: "orchid", rgb: 0xda70d6 },
        CssColorEntry { name: "palegoldenrod", rgb: 0xeee8aa },
        CssColorEntry { name: "palegreen", rgb: 0x98fb98 },
        CssColorEntry { name: "paleturquoise", rgb: 0xafeeee },
        CssColorEntry { name: "palevioletred", rgb: 0xdb7093 },
        CssColorEntry { name: "papayawhip", rgb: 0xffefd5 },
        CssColorEntry { name: "peachpuff", rgb: 0xffdab9 },
        CssColorEntry { name: "peru", rgb: 0xcd853f },
        CssColorEntry { name: "pink", rgb: 0xffc0cb },
        CssColorEntry { name: "plum", rgb: 0xdda0dd },
        CssColorEntry { name: "powderblue", rgb: 0xb0e0e6 },
        CssColorEntry { name: "purple", rgb: 0x800080 },
        CssColorEntry { name: "red", rgb: 0xff0000 },
        CssColorEntry { name: "rosybrown", rgb: 0xbc8f8f },
        CssColorEntry { name: "royalblue", rgb: 0x4169e1 },
        CssColorEntry { name: "saddlebrown", rgb: 0x8b4513 },
        CssColorEntry { name: "salmon", rgb: 0xfa8072 },
        CssColorEntry { name: "sandybrown", rgb: 0xf4a460 },
        CssColorEntry { name: "seagreen", rgb: 0x2e8b57 },
        CssColorEntry { name: "seashell", rgb: 0xfff5ee },
        CssColorEntry { name: "sienna", rgb: 0xa0522d },
        CssColorEntry { name: "silver", rgb: 0xc0c0c0 },
        CssColorEntry { name: "skyblue", rgb: 0x87ceeb },
        CssColorEntry { name: "slateblue", rgb: 0x6a5acd },
        CssColorEntry { name: "slategray", rgb: 0x708090 },
        CssColorEntry { name: "slategrey", rgb: 0x708090 },
        CssColorEntry { name: "snow", rgb: 0xfffafa },
        CssColorEntry { name: "springgreen", rgb: 0x00ff7f },
        CssColorEntry { name: "steelblue", rgb: 0x4682b4 },
        CssColorEntry { name: "tan", rgb: 0xd2b48c },
        CssColorEntry { name: "teal", rgb: 0x008080 },
        CssColorEntry { name: "thistle", rgb: 0xd8bfd8 },
        CssColorEntry { name: "tomato", rgb: 0xff6347 },
        CssColorEntry { name: "turquoise", rgb: 0x40e0d0 },
        CssColorEntry { name: "violet", rgb: 0xee82ee },
        CssColorEntry { name: "wheat", rgb: 0xf5deb3 },
        CssColorEntry { name: "white", rgb: 0xffffff },
        CssColorEntry { name: "whitesmoke", rgb: 0xf5f5f5 },
        CssColorEntry { name: "yellow", rgb: 0xffff00 },
        CssColorEntry { name: "yellowgreen", rgb: 0x9acd32 },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(color_from_name("red"), Some(0xff0000));
        assert_eq!(color_from_name("Red"), Some(0xff0000));
        assert_eq!(color_from_name("CORNFLOWERBLUE"), Some(0x6495ed));
        assert_eq!(color_from_name("notacolor"), None);
    }
}
