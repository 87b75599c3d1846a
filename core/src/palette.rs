use crate::hover::InteractionVariant;
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn rgba(self, alpha: f64) -> String {
        let Rgb(r, g, b) = self;
        format!("rgba({r}, {g}, {b}, {:.3})", alpha.clamp(0.0, 1.0))
    }
}

/// Colors and sizes for one theme/variant pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub glow: Rgb,
    pub glow_opacity: f64,
    pub glow_diameter: f64,
    pub cursor: Rgb,
    pub cursor_size: f64,
    pub grid_line: Rgb,
    pub grid_alpha: f64,
    pub wash_from: Rgb,
    pub wash_to: Rgb,
    pub wash_alpha: f64,
}

const DARK_GRID: Rgb = Rgb(255, 255, 255);
const LIGHT_GRID: Rgb = Rgb(15, 23, 42);

impl Palette {
    pub fn for_theme(theme: Theme, variant: InteractionVariant) -> Self {
        match theme {
            Theme::Dark => dark(variant),
            Theme::Light => light(variant),
        }
    }
}

fn dark(variant: InteractionVariant) -> Palette {
    let base = Palette {
        glow: Rgb(255, 119, 214),
        glow_opacity: 0.18,
        glow_diameter: 360.0,
        cursor: Rgb(214, 226, 255),
        cursor_size: 14.0,
        grid_line: DARK_GRID,
        grid_alpha: 0.07,
        wash_from: Rgb(255, 119, 214),
        wash_to: Rgb(56, 189, 248),
        wash_alpha: 0.12,
    };
    match variant {
        InteractionVariant::Default => base,
        InteractionVariant::Pointer => Palette {
            glow_opacity: 0.26,
            glow_diameter: 420.0,
            cursor: Rgb(255, 119, 214),
            cursor_size: 18.0,
            ..base
        },
        InteractionVariant::Text => Palette {
            glow: Rgb(56, 189, 248),
            glow_opacity: 0.22,
            glow_diameter: 280.0,
            cursor: Rgb(148, 163, 255),
            cursor_size: 10.0,
            ..base
        },
        InteractionVariant::Nav => Palette {
            glow: Rgb(125, 211, 252),
            glow_opacity: 0.2,
            glow_diameter: 320.0,
            cursor: Rgb(186, 230, 253),
            cursor_size: 16.0,
            ..base
        },
    }
}

fn light(variant: InteractionVariant) -> Palette {
    let base = Palette {
        glow: Rgb(219, 39, 119),
        glow_opacity: 0.14,
        glow_diameter: 360.0,
        cursor: Rgb(30, 41, 59),
        cursor_size: 14.0,
        grid_line: LIGHT_GRID,
        grid_alpha: 0.08,
        wash_from: Rgb(236, 72, 153),
        wash_to: Rgb(14, 165, 233),
        wash_alpha: 0.1,
    };
    match variant {
        InteractionVariant::Default => base,
        InteractionVariant::Pointer => Palette {
            glow_opacity: 0.2,
            glow_diameter: 420.0,
            cursor: Rgb(190, 24, 93),
            cursor_size: 18.0,
            ..base
        },
        InteractionVariant::Text => Palette {
            glow: Rgb(2, 132, 199),
            glow_opacity: 0.16,
            glow_diameter: 280.0,
            cursor: Rgb(67, 56, 202),
            cursor_size: 10.0,
            ..base
        },
        InteractionVariant::Nav => Palette {
            glow: Rgb(79, 70, 229),
            glow_opacity: 0.16,
            glow_diameter: 320.0,
            cursor: Rgb(55, 48, 163),
            cursor_size: 16.0,
            ..base
        },
    }
}
