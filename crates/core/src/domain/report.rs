use crate::domain::section::SectionKey;
use anyhow::ensure;
use serde::{Deserialize, Deserializer, Serialize};

pub const PENDING_TEXT: &str = "Analysis pending...";
pub const SEE_MARKET_TEXT: &str = "See market analysis for combined report.";

/// Body of one section. Placeholders are explicit variants so surfaces can tell
/// "no value" apart from real text; on the wire every variant is a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum SectionBody {
    Text(String),
    #[default]
    Pending,
    SeeMarket,
}

impl SectionBody {
    pub fn as_str(&self) -> &str {
        match self {
            SectionBody::Text(s) => s,
            SectionBody::Pending => PENDING_TEXT,
            SectionBody::SeeMarket => SEE_MARKET_TEXT,
        }
    }

    pub fn has_content(&self) -> bool {
        matches!(self, SectionBody::Text(_))
    }

    /// Reverses serialization: placeholder texts written to history come back
    /// as their variants. Fresh service text never goes through here.
    fn from_stored(s: String) -> Self {
        if s == PENDING_TEXT {
            SectionBody::Pending
        } else if s == SEE_MARKET_TEXT {
            SectionBody::SeeMarket
        } else {
            SectionBody::from(s)
        }
    }
}

/// Only blank text is "no value"; anything else is kept as written.
impl From<String> for SectionBody {
    fn from(s: String) -> Self {
        if s.trim().is_empty() {
            SectionBody::Pending
        } else {
            SectionBody::Text(s)
        }
    }
}

impl<'de> Deserialize<'de> for SectionBody {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SectionBody::from_stored)
    }
}

impl From<&str> for SectionBody {
    fn from(s: &str) -> Self {
        SectionBody::from(s.to_string())
    }
}

impl From<SectionBody> for String {
    fn from(body: SectionBody) -> Self {
        match body {
            SectionBody::Text(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// All four section bodies. Every key is always present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sections {
    #[serde(rename = "market_analysis", default)]
    market: SectionBody,
    #[serde(rename = "risk_analysis", default)]
    risk: SectionBody,
    #[serde(rename = "monetization_strategy", default)]
    money: SectionBody,
    #[serde(rename = "investor_view", default)]
    investor: SectionBody,
}

impl Sections {
    pub fn get(&self, key: SectionKey) -> &SectionBody {
        match key {
            SectionKey::Market => &self.market,
            SectionKey::Risk => &self.risk,
            SectionKey::Money => &self.money,
            SectionKey::Investor => &self.investor,
        }
    }

    pub fn set(&mut self, key: SectionKey, body: impl Into<SectionBody>) {
        let slot = match key {
            SectionKey::Market => &mut self.market,
            SectionKey::Risk => &mut self.risk,
            SectionKey::Money => &mut self.money,
            SectionKey::Investor => &mut self.investor,
        };
        *slot = body.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &SectionBody)> + '_ {
        SectionKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// A normalized analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub idea: String,
    pub sections: Sections,
}

impl Report {
    pub fn new(idea: &str, sections: Sections) -> anyhow::Result<Self> {
        let idea = idea.trim();
        ensure!(!idea.is_empty(), "idea must be non-empty");
        Ok(Self {
            idea: idea.to_string(),
            sections,
        })
    }

    pub fn section(&self, key: SectionKey) -> &SectionBody {
        self.sections.get(key)
    }
}
