/// One swappable surface texture and the swatch shown for it in the host page.
pub struct TextureInfo {
    pub id: &'static str,
    pub path: &'static str,
    pub swatch: &'static str,
}

pub const TEXTURE_LIBRARY: &[TextureInfo] = &[
    TextureInfo {
        id: "texture_1",
        path: "Texture/1.jpg",
        swatch: "images/1.png",
    },
    TextureInfo {
        id: "texture_2",
        path: "Texture/2.jpg",
        swatch: "images/2.png",
    },
    TextureInfo {
        id: "texture_3",
        path: "Texture/3.jpg",
        swatch: "images/3.png",
    },
    TextureInfo {
        id: "texture_4",
        path: "Texture/4.jpg",
        swatch: "images/4.png",
    },
    TextureInfo {
        id: "texture_5",
        path: "Texture/5.jpg",
        swatch: "images/5.png",
    },
];

/// Texture selected when a session starts.
pub const DEFAULT_TEXTURE_ID: &str = "texture_1";

/// Side length of the sampling grid used for average colour extraction.
pub const ACCENT_SAMPLE_GRID: u32 = 32;
