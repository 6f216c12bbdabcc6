/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight, not premultiplied).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black, the documented fallback for unparseable color strings.
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Opaque white.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// The default marker pin red.
    pub const PIN_RED: Self = Self {
        r: 255,
        g: 59,
        b: 48,
        a: 255,
    };

    /// Construct an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Return this color with its alpha scaled by `factor` (clamped to [0,1]).
    pub fn with_alpha_factor(self, factor: f64) -> Self {
        let f = crate::foundation::core::clamp_unit(factor);
        Self {
            a: ((f64::from(self.a) * f).round() as i64).clamp(0, 255) as u8,
            ..self
        }
    }

    /// Parse a CSS-style hex color: `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// The leading `#` is optional and surrounding whitespace is ignored.
    /// Returns `None` for anything else; callers degrade to [`Rgba8::BLACK`]
    /// rather than failing the render.
    pub fn parse_css_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Some(Self {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                    a: 255,
                })
            }
            6 | 8 => {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self {
                    r: byte(0)?,
                    g: byte(2)?,
                    b: byte(4)?,
                    a: if hex.len() == 8 { byte(6)? } else { 255 },
                })
            }
            _ => None,
        }
    }

    /// Parse with the documented black fallback for malformed input.
    pub fn parse_or_black(s: &str) -> Self {
        Self::parse_css_hex(s).unwrap_or(Self::BLACK)
    }
}
