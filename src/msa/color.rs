use super::alignment::{is_gap, Alignment, Alphabet};
use super::error::{MsaPlotError, MsaResult};
use std::{collections::BTreeMap, fmt};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Color {
    Purple,
    Blue,
    Orange,
    Teal,
    Gray,
    LightGray,
    Black,
    Green,
    Pink,
    Yellow,
    Red,
    Khaki,
    PaleRed,
    PaleBlue,
}

impl Color {
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Purple => "#814ED1",
            Color::Blue => "#1383C6",
            Color::Orange => "#E16A2C",
            Color::Teal => "#009CA2",
            Color::Gray => "#BABABA",
            Color::LightGray => "#D1D1D1",
            Color::Black => "#000000",
            Color::Pink => "#ED3981",
            Color::Yellow => "#EFCD17",
            Color::Green => "#009D4E",
            Color::Red => "#E3371E",
            Color::Khaki => "#F0E68C",
            Color::PaleRed => "#FF4858",
            Color::PaleBlue => "#46B2E8",
        }
    }

    pub fn rgba(&self) -> Rgba {
        Rgba::from_hex(self.hex()).unwrap_or(Rgba::BLACK)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.hex())
    }
}

/// Color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub fn from_components(components: &[f64]) -> MsaResult<Self> {
        if components.len() != 3 && components.len() != 4 {
            return Err(MsaPlotError::Validation(format!(
                "colors need 3 or 4 components, got {}",
                components.len()
            )));
        }
        if let Some(bad) = components
            .iter()
            .find(|c| !c.is_finite() || !(0.0..=1.0).contains(*c))
        {
            return Err(MsaPlotError::Validation(format!(
                "color components must be between 0.0 and 1.0, got {}",
                bad
            )));
        }
        Ok(Self {
            r: components[0],
            g: components[1],
            b: components[2],
            a: components.get(3).copied().unwrap_or(1.0),
        })
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)? as f64 / 255.0,
            g: channel(2)? as f64 / 255.0,
            b: channel(4)? as f64 / 255.0,
            a: 1.0,
        })
    }

    pub fn to_hex(&self) -> String {
        let to_byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        )
    }

    /// Black or white, whichever reads better on top of this color
    pub fn contrast(&self) -> Color {
        let luminance = 0.299 * self.r + 0.587 * self.g + 0.114 * self.b;
        if luminance > 0.5 || self.a < 0.5 {
            Color::Black
        } else {
            Color::LightGray
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMapOrigin {
    Explicit,
    Derived,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    colors: BTreeMap<char, Rgba>,
    fallback: Rgba,
    origin: ColorMapOrigin,
}

impl ColorMap {
    /// Validates a caller-supplied map; keys must be single characters.
    pub fn explicit(entries: &BTreeMap<String, Vec<f64>>) -> MsaResult<Self> {
        let mut colors = BTreeMap::new();
        for (key, components) in entries {
            let mut chars = key.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(symbol), None) => symbol,
                _ => {
                    return Err(MsaPlotError::Validation(format!(
                        "color map keys must be single characters, got {:?}",
                        key
                    )))
                }
            };
            let color = Rgba::from_components(components)
                .map_err(|e| MsaPlotError::Validation(format!("color for {:?}: {}", key, e)))?;
            colors.insert(symbol, color);
        }
        Ok(Self {
            colors,
            fallback: Color::Gray.rgba(),
            origin: ColorMapOrigin::Explicit,
        })
    }

    /// Exact match first, then the other letter case, then the fallback color.
    pub fn get(&self, symbol: u8) -> Rgba {
        let symbol = symbol as char;
        self.colors
            .get(&symbol)
            .or_else(|| self.colors.get(&symbol.to_ascii_uppercase()))
            .or_else(|| self.colors.get(&symbol.to_ascii_lowercase()))
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn hex(&self, symbol: u8) -> String {
        self.get(symbol).to_hex()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.colors.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn origin(&self) -> ColorMapOrigin {
        self.origin
    }

    pub fn iter(&self) -> impl Iterator<Item = (&char, &Rgba)> {
        self.colors.iter()
    }
}

/// Returns the explicit map unchanged when given, otherwise derives one from
/// the symbols present in the alignment.
pub fn resolve(alignment: &Alignment, explicit: Option<&ColorMap>) -> ColorMap {
    match explicit {
        Some(colors) => colors.clone(),
        None => derive(alignment),
    }
}

fn derive(alignment: &Alignment) -> ColorMap {
    let symbols = alignment.symbols();
    let alphabet = Alphabet::detect(&symbols);

    let mut colors = BTreeMap::new();
    let mut unknown = Vec::new();
    for &symbol in &symbols {
        let color = if is_gap(symbol) {
            Some(Color::LightGray)
        } else {
            palette_color(alphabet, symbol.to_ascii_uppercase())
        };
        match color {
            Some(color) => {
                colors.insert(symbol as char, color.rgba());
            }
            None => unknown.push(symbol),
        }
    }

    // BTreeSet iteration is sorted, so the cycle assignment is reproducible
    let cycle = [
        Color::Khaki,
        Color::PaleRed,
        Color::PaleBlue,
        Color::Purple,
        Color::Pink,
        Color::Teal,
        Color::Yellow,
    ];
    for (index, symbol) in unknown.into_iter().enumerate() {
        colors.insert(symbol as char, cycle[index % cycle.len()].rgba());
    }

    ColorMap {
        colors,
        fallback: Color::Gray.rgba(),
        origin: ColorMapOrigin::Derived,
    }
}

fn palette_color(alphabet: Alphabet, residue: u8) -> Option<Color> {
    match alphabet {
        Alphabet::Nucleotide => match residue {
            b'A' => Some(Color::Green),
            b'C' => Some(Color::Blue),
            b'G' => Some(Color::Orange),
            b'T' | b'U' => Some(Color::Red),
            b'N' => Some(Color::Gray),
            _ => None,
        },
        // Grouped by physicochemical class
        Alphabet::Protein => match residue {
            b'A' | b'I' | b'L' | b'M' | b'F' | b'W' | b'V' => Some(Color::Blue),
            b'K' | b'R' => Some(Color::Red),
            b'D' | b'E' => Some(Color::Purple),
            b'N' | b'Q' | b'S' | b'T' => Some(Color::Green),
            b'C' => Some(Color::Pink),
            b'G' => Some(Color::Orange),
            b'P' => Some(Color::Yellow),
            b'H' | b'Y' => Some(Color::Teal),
            b'B' | b'Z' | b'X' | b'*' => Some(Color::Gray),
            _ => None,
        },
    }
}
