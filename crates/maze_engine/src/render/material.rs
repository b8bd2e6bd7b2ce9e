//! Phong material definitions

/// RGBA color with components in `[0, 1]`
pub type Rgba = [f32; 4];

const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];

/// Phong material: per-term reflectance colors plus specular exponent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance
    pub ambient: Rgba,

    /// Diffuse reflectance
    pub diffuse: Rgba,

    /// Specular reflectance
    pub specular: Rgba,

    /// Specular exponent
    pub shininess: f32,
}

impl Material {
    /// Create a material whose ambient and diffuse terms share `color`, with
    /// a white specular highlight
    pub const fn solid(color: Rgba) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            specular: WHITE,
            shininess: 50.0,
        }
    }

    /// Create a material from 8-bit RGB components
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        let channel = |value: u8| f32::from(value) / 255.0;
        Self::solid([channel(red), channel(green), channel(blue), 1.0])
    }

    /// Blue maze wall
    pub fn wall() -> Self {
        Self::from_rgb8(52, 131, 235)
    }

    /// Red pickup sphere
    pub const fn pickup() -> Self {
        Self::solid([0.8, 0.0, 0.0, 1.0])
    }

    /// Yellow avatar body
    pub fn avatar() -> Self {
        Self::from_rgb8(222, 222, 16)
    }

    /// Black eye
    pub const fn eye() -> Self {
        Self::solid(BLACK)
    }

    /// Set the shininess
    #[must_use]
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::wall()
    }
}
