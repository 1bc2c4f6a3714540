//! Named colormap palettes.

use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{ColorStop, Colormap};
use crate::Error;

/// Built-in palettes for image display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Preset {
    /// Grayscale - black to white.
    Grayscale,
    /// Green (Matrix style) - black to bright green.
    Green,
    /// Hot (Thermal) - black to red to yellow to white.
    Hot,
    /// Viridis - blue to teal to green to yellow.
    #[default]
    Viridis,
    /// Twelve-step hue wheel.
    Hues,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Preset; 5] = [
        Preset::Grayscale,
        Preset::Green,
        Preset::Hot,
        Preset::Viridis,
        Preset::Hues,
    ];

    /// Build the colormap for this palette.
    ///
    /// Values outside the color limits take the palette's end colors.
    #[must_use]
    pub fn colormap(self) -> Colormap {
        let cmap = self.palette();
        let under = cmap.sample_rgb(0.0);
        let over = cmap.sample_rgb(1.0);
        let bad = cmap.bad();
        cmap.with_extremes(under, over, bad)
    }

    fn palette(self) -> Colormap {
        if self == Preset::Hues {
            return Colormap::simple_default();
        }
        let stops: &[ColorStop] = match self {
            Preset::Grayscale => &[
                ColorStop::new(0.0, [0.0, 0.0, 0.0]),
                ColorStop::new(1.0, [1.0, 1.0, 1.0]),
            ],
            Preset::Green => &[
                ColorStop::new(0.0, [0.0, 0.0, 0.0]),
                ColorStop::new(1.0, [0.0, 1.0, 0.0]),
            ],
            Preset::Hot => &[
                ColorStop::new(0.0, [0.0416, 0.0, 0.0]),
                ColorStop::new(0.365, [1.0, 0.0, 0.0]),
                ColorStop::new(0.746, [1.0, 1.0, 0.0]),
                ColorStop::new(1.0, [1.0, 1.0, 1.0]),
            ],
            Preset::Viridis | Preset::Hues => &VIRIDIS,
        };
        match Colormap::from_stops(self.name(), stops.to_vec()) {
            Ok(cmap) => cmap,
            // Static tables are validated by tests.
            Err(_) => Colormap::simple_default(),
        }
    }

    /// Short lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Preset::Grayscale => "grayscale",
            Preset::Green => "green",
            Preset::Hot => "hot",
            Preset::Viridis => "viridis",
            Preset::Hues => "hues",
        }
    }
}

const VIRIDIS: [ColorStop; 9] = [
    ColorStop::new(0.0, [0.267_004, 0.004_874, 0.329_415]),
    ColorStop::new(0.125, [0.282_623, 0.140_926, 0.457_517]),
    ColorStop::new(0.25, [0.253_935, 0.265_254, 0.529_983]),
    ColorStop::new(0.375, [0.206_756, 0.371_758, 0.553_117]),
    ColorStop::new(0.5, [0.163_625, 0.471_133, 0.558_148]),
    ColorStop::new(0.625, [0.127_568, 0.566_949, 0.550_556]),
    ColorStop::new(0.75, [0.134_692, 0.658_636, 0.517_649]),
    ColorStop::new(0.875, [0.266_941, 0.748_751, 0.440_573]),
    ColorStop::new(1.0, [0.993_248, 0.906_157, 0.143_936]),
];

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::Grayscale => write!(f, "Grayscale"),
            Preset::Green => write!(f, "Green (Matrix)"),
            Preset::Hot => write!(f, "Hot (Thermal)"),
            Preset::Viridis => write!(f, "Viridis"),
            Preset::Hues => write!(f, "Hue wheel"),
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|preset| {
                preset.name() == lower || (lower == "gray" && *preset == Preset::Grayscale)
            })
            .ok_or_else(|| Error::InvalidColormap(format!("unknown preset {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::{DEFAULT_BAD, DEFAULT_UNDER};

    #[test]
    fn test_presets_build() {
        for preset in Preset::ALL {
            let cmap = preset.colormap();
            let expected = if preset == Preset::Hues {
                "none"
            } else {
                preset.name()
            };
            assert_eq!(cmap.name(), expected);
            assert_eq!(cmap.lut_size(), 256);
        }
    }

    #[test]
    fn test_grayscale_endpoints() {
        let cmap = Preset::Grayscale.colormap();
        assert_eq!(cmap.sample_u8(0.0), [0, 0, 0, 255]);
        assert_eq!(cmap.sample_u8(1.0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_out_of_range_takes_end_colors() {
        for preset in Preset::ALL {
            let cmap = preset.colormap();
            assert_eq!(cmap.sample_rgb(-0.5), cmap.sample_rgb(0.0));
            assert_eq!(cmap.sample_rgb(1.5), cmap.sample_rgb(1.0));
            assert_eq!(cmap.sample_rgb(f64::NAN), DEFAULT_BAD);
        }
        let hot = Preset::Hot.colormap();
        assert_ne!(hot.under(), DEFAULT_UNDER);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Viridis".parse::<Preset>().unwrap(), Preset::Viridis);
        assert_eq!("gray".parse::<Preset>().unwrap(), Preset::Grayscale);
        assert!("jet".parse::<Preset>().is_err());
    }
}
