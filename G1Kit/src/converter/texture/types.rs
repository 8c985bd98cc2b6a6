//! Progress reporting for texture group export

/// Progress callback type for texture export.
pub type TextureProgressCallback<'a> = &'a (dyn Fn(&TextureExportProgress) + Sync + Send);

/// Progress information during texture export.
#[derive(Debug, Clone)]
pub struct TextureExportProgress {
    pub phase: TextureExportPhase,
    /// Textures finished so far (1-indexed while decoding)
    pub current: usize,
    pub total: usize,
    /// Name of the texture just finished, if any
    pub texture: Option<String>,
}

impl TextureExportProgress {
    #[must_use]
    pub fn new(phase: TextureExportPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            texture: None,
        }
    }

    #[must_use]
    pub fn with_texture(
        phase: TextureExportPhase,
        current: usize,
        total: usize,
        texture: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            texture: Some(texture.into()),
        }
    }
}

/// Phase of a texture export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureExportPhase {
    Decoding,
    Complete,
}
