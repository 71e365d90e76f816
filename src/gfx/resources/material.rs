//! Material definitions
//!
//! Materials are plain values owned by the mesh that uses them. Not every
//! material exposes every channel: an unlit material has no emissive term,
//! and some materials have no opacity control at all. Those channels are
//! modelled as `Option`s so styling code can leave them untouched.

/// Which faces of a triangle are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Emissive term of a lit material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emissive {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Emissive {
    /// No glow
    pub const NONE: Emissive = Emissive {
        color: [0.0, 0.0, 0.0],
        intensity: 0.0,
    };

    pub fn new(color: [f32; 3], intensity: f32) -> Self {
        Self { color, intensity }
    }
}

/// Material definition with PBR properties
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 3],
    pub metallic: f32,
    pub roughness: f32,
    /// `None` when the material has no opacity channel
    pub opacity: Option<f32>,
    /// Whether the renderer should alpha-blend this material
    pub transparent: bool,
    /// `None` when the material has no emissive channel
    pub emissive: Option<Emissive>,
    pub side: Side,

    // Bumped on every change the renderer must pick up
    version: u64,
}

impl Default for Material {
    fn default() -> Self {
        Self::new("Default", [0.8, 0.8, 0.8], 0.0, 0.5)
    }
}

impl Material {
    /// Creates a lit material with opacity and emissive channels
    ///
    /// # Arguments
    /// * `name` - Material name (not required to be unique)
    /// * `base_color` - RGB base color
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: [f32; 3], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            opacity: Some(1.0),
            transparent: false,
            emissive: Some(Emissive::NONE),
            side: Side::Front,
            version: 0,
        }
    }

    /// Creates an unlit material: opacity only, no emissive channel
    pub fn unlit(name: &str, base_color: [f32; 3]) -> Self {
        Self {
            emissive: None,
            ..Self::new(name, base_color, 0.0, 1.0)
        }
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        self.opacity = Some(alpha);
        self.transparent = alpha < 1.0;
        self
    }

    /// Builder pattern: Set emissive color at full intensity
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = Some(Emissive::new([r, g, b], 1.0));
        self
    }

    /// Builder pattern: Drop the opacity channel
    pub fn without_opacity(mut self) -> Self {
        self.opacity = None;
        self.transparent = false;
        self
    }

    pub fn supports_opacity(&self) -> bool {
        self.opacity.is_some()
    }

    pub fn supports_emissive(&self) -> bool {
        self.emissive.is_some()
    }

    /// Flags the material as changed so the renderer re-uploads it
    pub fn mark_needs_update(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
