//! RGBA color

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_components() {
        let c = Color::rgba(0.2, 0.4, 0.6, 0.8);
        assert_eq!(c.r, 0.2);
        assert_eq!(c.a, 0.8);
        assert_eq!(Color::rgb(1.0, 1.0, 1.0), Color::WHITE);
    }

    #[test]
    fn test_with_alpha() {
        let c = Color::WHITE.with_alpha(0.25);
        assert_eq!(c.a, 0.25);
        assert_eq!(c.r, 1.0);
    }
}
