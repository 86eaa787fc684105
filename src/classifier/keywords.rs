//! Static ESG keyword dictionaries.
//!
//! Multi-word phrases are matched as consecutive tokens and carry a higher weight
//! than single words, since they are far less ambiguous.

/// Weight of a single-token keyword hit.
pub const WORD_WEIGHT: u32 = 1;

/// Weight of a multi-token phrase hit.
pub const PHRASE_WEIGHT: u32 = 2;

pub const ENVIRONMENTAL_KEYWORDS: &[&str] = &[
    "emission",
    "emissions",
    "carbon",
    "pollution",
    "climate",
    "waste",
    "deforestation",
    "environment",
    "biodiversity",
    "renewable",
    "sustainability",
    "water scarcity",
    "pipeline leak",
    "oil spill",
    "toxic",
    "greenhouse",
    "air quality",
];

pub const SOCIAL_KEYWORDS: &[&str] = &[
    "labour",
    "labor",
    "worker",
    "workers",
    "strike",
    "union",
    "discrimination",
    "harassment",
    "human rights",
    "privacy",
    "safety",
    "fatality",
    "community",
    "protest",
    "diversity",
    "inclusive",
];

pub const GOVERNANCE_KEYWORDS: &[&str] = &[
    "governance",
    "board",
    "fraud",
    "bribery",
    "audit",
    "corruption",
    "whistleblower",
    "accounting",
    "transparency",
    "sebi",
    "sec",
    "compliance",
    "tax evasion",
    "money laundering",
    "insider trading",
];

/// Weight of `keyword` by its token count.
#[inline]
pub fn keyword_weight(keyword: &str) -> u32 {
    if keyword.contains(' ') {
        PHRASE_WEIGHT
    } else {
        WORD_WEIGHT
    }
}

/// Every keyword across all three dimensions, sorted and de-duplicated.
pub fn all_keywords() -> Vec<&'static str> {
    let mut all: Vec<&'static str> = ENVIRONMENTAL_KEYWORDS
        .iter()
        .chain(SOCIAL_KEYWORDS)
        .chain(GOVERNANCE_KEYWORDS)
        .copied()
        .collect();
    all.sort_unstable();
    all.dedup();
    all
}
