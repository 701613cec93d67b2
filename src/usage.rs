use serde::{Deserialize, Serialize};
use std::fmt;

/// How a texture is sampled by the renderer. Serialized as the lowercase tag
/// written into the `usage:` field of a texture descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureUsage {
    #[default]
    Color,
    Roughness,
    Normal,
    Metallic,
}

// Priority order: first keyword found in the lowercased filename wins.
const KEYWORDS: &[(&str, TextureUsage)] = &[
    ("roughness", TextureUsage::Roughness),
    ("normal", TextureUsage::Normal),
    ("metalness", TextureUsage::Metallic),
];

impl TextureUsage {
    pub const ALL: [TextureUsage; 4] = [
        TextureUsage::Color,
        TextureUsage::Roughness,
        TextureUsage::Normal,
        TextureUsage::Metallic,
    ];

    /// Guess usage from a filename (case-insensitive). Falls back to `Color`.
    pub fn classify(name: &str) -> Self {
        let lower = name.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, usage)| *usage)
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextureUsage::Color => "color",
            TextureUsage::Roughness => "roughness",
            TextureUsage::Normal => "normal",
            TextureUsage::Metallic => "metallic",
        }
    }
}

impl fmt::Display for TextureUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_to_tags() {
        assert_eq!(TextureUsage::classify("brick_roughness.png"), TextureUsage::Roughness);
        assert_eq!(TextureUsage::classify("brick_normal.png"), TextureUsage::Normal);
        assert_eq!(TextureUsage::classify("brick_metalness.png"), TextureUsage::Metallic);
        assert_eq!(TextureUsage::classify("brick_color.png"), TextureUsage::Color);
    }

    #[test]
    fn roughness_beats_normal() {
        assert_eq!(
            TextureUsage::classify("wall_Roughness_Normal.png"),
            TextureUsage::Roughness
        );
        assert_eq!(
            TextureUsage::classify("NORMAL_metalness.png"),
            TextureUsage::Normal
        );
    }

    #[test]
    fn metallic_keyword_is_not_recognised() {
        // Only "metalness" marks a metallic map; "metallic" in a name falls through.
        assert_eq!(TextureUsage::classify("gold_metallic.png"), TextureUsage::Color);
    }

    #[test]
    fn tags_round_trip_through_serde() {
        for usage in TextureUsage::ALL {
            let json = serde_json::to_string(&usage).unwrap();
            assert_eq!(json, format!("\"{}\"", usage.as_str()));
            assert_eq!(usage.to_string(), usage.as_str());
        }
    }
}
