//! Draw command list for 2D rendering
//!
//! A backend walks the list in order; later commands paint over earlier ones.

use glam::Vec2;
use serde::Serialize;

/// One primitive for the backend to paint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Fill the whole frame
    Clear { color: [f32; 4] },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Filled triangle
    Triangle { points: [Vec2; 3], color: [f32; 4] },
    /// Text centered on `pos`
    Text {
        text: String,
        pos: Vec2,
        color: [f32; 4],
    },
    /// Translucent full-frame tint
    Overlay { color: [f32; 4] },
}

impl DrawCommand {
    pub fn circle(center: Vec2, radius: f32, color: [f32; 4]) -> Self {
        DrawCommand::Circle {
            center,
            radius,
            color,
        }
    }

    pub fn text(text: impl Into<String>, pos: Vec2, color: [f32; 4]) -> Self {
        DrawCommand::Text {
            text: text.into(),
            pos,
            color,
        }
    }

    /// The text of a `Text` command
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// 8-bit RGB to a linear color with full alpha
pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Same color with a different alpha
pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const BACKGROUND: [f32; 4] = rgb(5, 10, 20);
    pub const PLAYER_CORE: [f32; 4] = rgb(0, 180, 255);
    pub const PLAYER_GLOW: [f32; 4] = rgb(0, 120, 200);
    pub const BULLET: [f32; 4] = rgb(200, 240, 255);
    pub const ENEMY_CORE: [f32; 4] = rgb(255, 40, 80);
    pub const ENEMY_GLOW: [f32; 4] = rgb(80, 10, 20);
    pub const HUD: [f32; 4] = rgb(150, 200, 255);
    pub const POWER_SPEED: [f32; 4] = rgb(0, 220, 255);

    pub const MUZZLE: [f32; 4] = rgb(200, 240, 255);
    pub const DASH_BURST: [f32; 4] = rgb(180, 240, 255);
    pub const DASH_TRAIL: [f32; 4] = rgb(120, 200, 255);
    pub const EXPLOSION: [f32; 4] = rgb(255, 200, 220);

    pub const STAR_FAR: [f32; 4] = rgb(20, 40, 80);
    pub const STAR_MID: [f32; 4] = rgb(40, 80, 140);
    pub const STAR_NEAR: [f32; 4] = rgb(80, 140, 220);

    pub const TITLE: [f32; 4] = rgb(200, 240, 255);
    pub const TITLE_ORB: [f32; 4] = rgb(0, 200, 255);
    pub const PROMPT: [f32; 4] = rgb(255, 255, 255);
    pub const PROMPT_DIM: [f32; 4] = rgb(190, 190, 210);
    pub const DASH_LABEL: [f32; 4] = rgb(200, 230, 255);
    pub const PAUSE_TITLE: [f32; 4] = rgb(220, 230, 255);
    pub const PAUSE_OPTIONS: [f32; 4] = rgb(200, 210, 230);
    pub const SUCCESS: [f32; 4] = rgb(0, 200, 255);
    pub const FAILURE: [f32; 4] = rgb(255, 80, 110);
    pub const END_RETRY: [f32; 4] = rgb(220, 230, 255);
    pub const END_MENU: [f32; 4] = rgb(200, 210, 240);
    pub const END_QUIT: [f32; 4] = rgb(180, 190, 220);

    /// Pause overlay tint
    pub const PAUSE_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 150.0 / 255.0];
    /// End screen tint
    pub const END_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 160.0 / 255.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_scales_to_unit_range() {
        assert_eq!(rgb(255, 0, 51), [1.0, 0.0, 0.2, 1.0]);
        assert_eq!(with_alpha(colors::BACKGROUND, 0.5)[3], 0.5);
    }
}
