use serde::{Deserialize, Serialize};

/// Errors from parsing color strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color string is empty")]
    Empty,
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("unknown color name: {0}")]
    UnknownName(String),
}

/// An sRGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal.
    ///
    /// Literals wider than 24 bits are not rejected: each channel takes the
    /// corresponding byte, so `0xe0ff21f` reads as `#0ff21f`.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Parse `#rrggbb`, `#rgb` or a CSS color name.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }
        if let Some(digits) = s.strip_prefix('#') {
            return Self::parse_hex_digits(digits);
        }
        let hex = match s.to_ascii_lowercase().as_str() {
            "white" => 0xffffff,
            "black" => 0x000000,
            "red" => 0xff0000,
            "green" => 0x008000,
            "blue" => 0x0000ff,
            "yellow" => 0xffff00,
            "orange" => 0xffa500,
            _ => return Err(ColorError::UnknownName(s.to_string())),
        };
        Ok(Self::from_hex(hex))
    }

    fn parse_hex_digits(digits: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(format!("#{digits}"));
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map(Self::from_hex)
                .map_err(|_| invalid()),
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16)
                    .map(Self::from_hex)
                    .map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }

    /// Pack back into `0xRRGGBB`, rounding each channel.
    pub fn to_hex(&self) -> u32 {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (byte(self.r) << 16) | (byte(self.g) << 8) | byte(self.b)
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array(rgb: [f32; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Convert sRGB components to linear light for shading.
    pub fn to_linear(&self) -> [f32; 3] {
        fn decode(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [decode(self.r), decode(self.g), decode(self.b)]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}
