use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four fixed analysis categories. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Market,
    Risk,
    Money,
    Investor,
}

impl SectionKey {
    pub const ALL: [SectionKey; 4] = [
        SectionKey::Market,
        SectionKey::Risk,
        SectionKey::Money,
        SectionKey::Investor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Market => "market",
            SectionKey::Risk => "risk",
            SectionKey::Money => "money",
            SectionKey::Investor => "investor",
        }
    }

    /// Field name used by the analysis service and the persisted history layout.
    pub fn wire_field(self) -> &'static str {
        match self {
            SectionKey::Market => "market_analysis",
            SectionKey::Risk => "risk_analysis",
            SectionKey::Money => "monetization_strategy",
            SectionKey::Investor => "investor_view",
        }
    }

    pub fn meta(self) -> &'static SectionMeta {
        match self {
            SectionKey::Market => &SECTION_META[0],
            SectionKey::Risk => &SECTION_META[1],
            SectionKey::Money => &SECTION_META[2],
            SectionKey::Investor => &SECTION_META[3],
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section: {}", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for SectionKey {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s || k.wire_field() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Static presentation data for a section. Never persisted.
#[derive(Debug)]
pub struct SectionMeta {
    pub key: SectionKey,
    pub title: &'static str,
    pub icon_svg: &'static str,
    pub color: &'static str,
    pub emoji: &'static str,
}

static SECTION_META: [SectionMeta; 4] = [
    SectionMeta {
        key: SectionKey::Market,
        title: "Market Analysis",
        icon_svg: r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M3 3v18h18"/><path d="M18 17V9M13 17V5M8 17v-3"/></svg>"#,
        color: "#22d3ee",
        emoji: "\u{1F4CA}",
    },
    SectionMeta {
        key: SectionKey::Risk,
        title: "Risk Assessment",
        icon_svg: r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M12 9v4M12 17h.01"/><path d="M10.29 3.86L1.82 18a2 2 0 001.71 3h16.94a2 2 0 001.71-3L13.71 3.86a2 2 0 00-3.42 0z"/></svg>"#,
        color: "#f59e0b",
        emoji: "\u{26A0}\u{FE0F}",
    },
    SectionMeta {
        key: SectionKey::Money,
        title: "Monetization Strategy",
        icon_svg: r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"/><path d="M12 6v12M9 9h6M9 15h6"/></svg>"#,
        color: "#10b981",
        emoji: "\u{1F4B0}",
    },
    SectionMeta {
        key: SectionKey::Investor,
        title: "Investor Perspective",
        icon_svg: r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M20 21v-2a4 4 0 00-4-4H8a4 4 0 00-4 4v2"/><circle cx="12" cy="7" r="4"/></svg>"#,
        color: "#8b5cf6",
        emoji: "\u{1F464}",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_table_is_keyed_in_declaration_order() {
        for key in SectionKey::ALL {
            assert_eq!(key.meta().key, key);
        }
        let mut sorted = SectionKey::ALL;
        sorted.sort();
        assert_eq!(sorted, SectionKey::ALL);
    }

    #[test]
    fn parses_short_and_wire_names() {
        assert_eq!("risk".parse::<SectionKey>().unwrap(), SectionKey::Risk);
        assert_eq!(
            "monetization_strategy".parse::<SectionKey>().unwrap(),
            SectionKey::Money
        );
        assert!("finance".parse::<SectionKey>().is_err());
    }
}
