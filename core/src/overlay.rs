use crate::geom::Point;
use crate::hover::{HoverState, InteractionVariant};
use crate::motion::{glow_stretch, GlowShape};
use crate::palette::Palette;
use crate::theme::Theme;

pub const GRID_MASK_RADIUS: f64 = 220.0;
pub const WASH_MASK_RADIUS: f64 = 340.0;
pub const PRESSED_GLOW_BOOST: f64 = 0.08;
pub const PRESSED_CURSOR_SCALE: f64 = 0.9;
pub const FLASH_SCALE_PRESSED: f64 = 1.35;
pub const FLASH_SCALE_IDLE: f64 = 0.6;
pub const FLASH_ALPHA_PRESSED: f64 = 0.45;
pub const TEXT_CARET_WIDTH: f64 = 4.0;
pub const TEXT_CARET_HEIGHT: f64 = 24.0;

/// Everything the overlay layers need for one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayInputs {
    pub pointer: Point,
    pub glow: Point,
    pub visible: bool,
    pub pressed: bool,
    pub nav_open: bool,
    pub hover: HoverState,
    pub theme: Theme,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorShape {
    pub width: f64,
    pub height: f64,
    pub border_radius: f64,
    /// Translation from the pointer to the shape center.
    pub offset: Point,
    pub scale: f64,
    pub outlined: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayFrame {
    /// Shared opacity of every layer; zero hides without unmounting.
    pub opacity: f64,
    pub palette: Palette,
    pub glow: Point,
    pub glow_shape: GlowShape,
    pub glow_alpha: f64,
    pub flash_scale: f64,
    pub flash_alpha: f64,
    pub cursor: CursorShape,
}

pub fn compose(inputs: &OverlayInputs) -> OverlayFrame {
    let palette = Palette::for_theme(inputs.theme, inputs.hover.variant);
    let opacity = if inputs.visible && !inputs.nav_open {
        1.0
    } else {
        0.0
    };
    let glow_alpha = if inputs.pressed {
        palette.glow_opacity + PRESSED_GLOW_BOOST
    } else {
        palette.glow_opacity
    };
    let (flash_scale, flash_alpha) = if inputs.pressed {
        (FLASH_SCALE_PRESSED, FLASH_ALPHA_PRESSED)
    } else {
        (FLASH_SCALE_IDLE, 0.0)
    };
    OverlayFrame {
        opacity,
        palette,
        glow: inputs.glow,
        glow_shape: glow_stretch(inputs.glow, inputs.pointer),
        glow_alpha,
        flash_scale,
        flash_alpha,
        cursor: cursor_shape(inputs, &palette),
    }
}

fn cursor_shape(inputs: &OverlayInputs, palette: &Palette) -> CursorShape {
    let scale = if inputs.pressed {
        PRESSED_CURSOR_SCALE
    } else {
        1.0
    };
    if let Some(outline) = inputs.hover.outline {
        return CursorShape {
            width: outline.width,
            height: outline.height,
            border_radius: outline.border_radius,
            offset: outline.offset_from(inputs.pointer),
            scale: 1.0,
            outlined: true,
        };
    }
    if inputs.hover.variant == InteractionVariant::Text {
        return CursorShape {
            width: TEXT_CARET_WIDTH,
            height: TEXT_CARET_HEIGHT,
            border_radius: TEXT_CARET_WIDTH * 0.5,
            offset: Point::ZERO,
            scale,
            outlined: false,
        };
    }
    CursorShape {
        width: palette.cursor_size,
        height: palette.cursor_size,
        border_radius: palette.cursor_size * 0.5,
        offset: Point::ZERO,
        scale,
        outlined: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Rect;
    use crate::outline::{outline_box, OutlineKind};

    fn inputs() -> OverlayInputs {
        OverlayInputs {
            pointer: Point::new(200.0, 120.0),
            glow: Point::new(180.0, 110.0),
            visible: true,
            pressed: false,
            nav_open: false,
            hover: HoverState::default(),
            theme: Theme::Dark,
        }
    }

    #[test]
    fn nav_open_hides_every_layer() {
        let frame = compose(&OverlayInputs {
            nav_open: true,
            pressed: true,
            ..inputs()
        });
        assert_eq!(frame.opacity, 0.0);
    }

    #[test]
    fn hidden_pointer_fades_out() {
        assert_eq!(compose(&inputs()).opacity, 1.0);
        let frame = compose(&OverlayInputs {
            visible: false,
            ..inputs()
        });
        assert_eq!(frame.opacity, 0.0);
    }

    #[test]
    fn press_boosts_glow_and_fires_flash() {
        let idle = compose(&inputs());
        let pressed = compose(&OverlayInputs {
            pressed: true,
            ..inputs()
        });
        assert!(pressed.glow_alpha > idle.glow_alpha);
        assert_eq!(idle.flash_alpha, 0.0);
        assert!(pressed.flash_scale > idle.flash_scale);
        assert_eq!(pressed.cursor.scale, PRESSED_CURSOR_SCALE);
    }

    #[test]
    fn cursor_morphs_onto_outline() {
        let outline = outline_box(Rect::new(150.0, 100.0, 60.0, 20.0), 0.0, OutlineKind::Standard);
        let frame = compose(&OverlayInputs {
            hover: HoverState {
                variant: InteractionVariant::Pointer,
                outline: Some(outline),
            },
            ..inputs()
        });
        assert!(frame.cursor.outlined);
        assert_eq!(frame.cursor.width, outline.width);
        assert_eq!(frame.cursor.offset, Point::new(-20.0, -10.0));
    }

    #[test]
    fn light_theme_switches_palette() {
        let dark = compose(&inputs());
        let light = compose(&OverlayInputs {
            theme: Theme::Light,
            ..inputs()
        });
        assert_ne!(dark.palette.glow, light.palette.glow);
    }
}
