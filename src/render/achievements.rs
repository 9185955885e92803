/// Display glyph and color class for a medal type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedalStyle {
    pub glyph: &'static str,
    pub color_class: &'static str,
}

const MEDALS: &[(&str, MedalStyle)] = &[
    ("ouro", MedalStyle { glyph: "🥇", color_class: "medal-gold" }),
    ("prata", MedalStyle { glyph: "🥈", color_class: "medal-silver" }),
    ("bronze", MedalStyle { glyph: "🥉", color_class: "medal-bronze" }),
    ("platina", MedalStyle { glyph: "💎", color_class: "medal-platinum" }),
    ("trofeu", MedalStyle { glyph: "🏆", color_class: "medal-trophy" }),
];

const FALLBACK: MedalStyle = MedalStyle { glyph: "🏅", color_class: "medal-default" };

pub fn medal_style(tipo_medalha: &str) -> MedalStyle {
    let key = tipo_medalha.trim().to_lowercase();
    MEDALS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, style)| *style)
        .unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_medals() {
        assert_eq!(medal_style("Ouro").glyph, "🥇");
        assert_eq!(medal_style("bronze").color_class, "medal-bronze");
        assert_eq!(medal_style("lendaria"), FALLBACK);
    }
}
