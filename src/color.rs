use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Base colours (matplotlib single-letter codes)
// ---------------------------------------------------------------------------

/// The classic one-letter colour cycle: `b g r c m y k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColor {
    Blue,
    Green,
    Red,
    Cyan,
    Magenta,
    Yellow,
    Black,
}

impl LineColor {
    pub fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'b' => LineColor::Blue,
            'g' => LineColor::Green,
            'r' => LineColor::Red,
            'c' => LineColor::Cyan,
            'm' => LineColor::Magenta,
            'y' => LineColor::Yellow,
            'k' => LineColor::Black,
            _ => return None,
        })
    }

    /// sRGB components in `[0, 1]`.
    fn srgb(self) -> Srgb<f32> {
        match self {
            LineColor::Blue => Srgb::new(0.0, 0.0, 1.0),
            LineColor::Green => Srgb::new(0.0, 0.5, 0.0),
            LineColor::Red => Srgb::new(1.0, 0.0, 0.0),
            LineColor::Cyan => Srgb::new(0.0, 0.75, 0.75),
            LineColor::Magenta => Srgb::new(0.75, 0.0, 0.75),
            LineColor::Yellow => Srgb::new(0.75, 0.75, 0.0),
            LineColor::Black => Srgb::new(0.0, 0.0, 0.0),
        }
    }

    pub fn to_color32(self) -> Color32 {
        let rgb: Srgb<u8> = self.srgb().into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }
}

// ---------------------------------------------------------------------------
// Series style: colour + stroke
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    Dashed,
}

/// Colour and stroke of one plotted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    pub color: LineColor,
    pub stroke: Stroke,
}

impl SeriesStyle {
    /// Parse a matplotlib-style format string such as `"b-"` or `"g--"`.
    pub fn parse(fmt: &str) -> Option<Self> {
        let mut chars = fmt.chars();
        let color = LineColor::from_code(chars.next()?)?;
        let stroke = match chars.as_str() {
            "" | "-" => Stroke::Solid,
            "--" => Stroke::Dashed,
            _ => return None,
        };
        Some(SeriesStyle { color, stroke })
    }
}
