use mallspace_common::AvatarVariant;

/// Color palette for one avatar variant, as CSS hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantPalette {
    pub skin: &'static str,
    pub hair: &'static str,
    pub shirt: &'static str,
    pub pants: &'static str,
}

impl VariantPalette {
    /// Palette for the given variant. Total over the closed variant
    /// set, so appearance lookup can never fail.
    pub fn for_variant(variant: AvatarVariant) -> Self {
        match variant {
            AvatarVariant::Default => Self {
                skin: "#ffdbac",
                hair: "#2c1810",
                shirt: "#4a90e2",
                pants: "#2c3e50",
            },
            AvatarVariant::Sporty => Self {
                skin: "#f4c2a0",
                hair: "#1a0f08",
                shirt: "#e74c3c",
                pants: "#34495e",
            },
            AvatarVariant::Elegant => Self {
                skin: "#ffe0bd",
                hair: "#5d4037",
                shirt: "#9b59b6",
                pants: "#2c2c2c",
            },
            AvatarVariant::Casual => Self {
                skin: "#ffd5b5",
                hair: "#8b4513",
                shirt: "#27ae60",
                pants: "#3498db",
            },
            AvatarVariant::Professional => Self {
                skin: "#f5d0a9",
                hair: "#1c1c1c",
                shirt: "#ffffff",
                pants: "#1a1a1a",
            },
            AvatarVariant::Vibrant => Self {
                skin: "#ffcba4",
                hair: "#ff6b9d",
                shirt: "#ffd700",
                pants: "#ff1493",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_palette() {
        for v in AvatarVariant::ALL {
            let p = VariantPalette::for_variant(v);
            for color in [p.skin, p.hair, p.shirt, p.pants] {
                assert!(color.starts_with('#') && color.len() == 7, "{color}");
            }
        }
    }

    #[test]
    fn palettes_are_distinct() {
        let mut shirts: Vec<&str> = AvatarVariant::ALL
            .iter()
            .map(|v| VariantPalette::for_variant(*v).shirt)
            .collect();
        shirts.sort_unstable();
        shirts.dedup();
        assert_eq!(shirts.len(), AvatarVariant::ALL.len());
    }
}
