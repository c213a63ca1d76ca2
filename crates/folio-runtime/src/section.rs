#![forbid(unsafe_code)]

//! Page sections in document order.

use std::fmt;
use std::str::FromStr;

use folio_core::ElementId;

use crate::config::PageConfig;
use crate::reveal::RevealPolicy;

/// A top-level section of the page. The element id matches [`as_str`](Self::as_str).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Hero,
    About,
    Skills,
    Projects,
    Experience,
    Education,
    Certifications,
    Contact,
}

impl SectionId {
    /// All sections, in the order they appear on the page.
    pub const ALL: [SectionId; 8] = [
        Self::Hero,
        Self::About,
        Self::Skills,
        Self::Projects,
        Self::Experience,
        Self::Education,
        Self::Certifications,
        Self::Contact,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Certifications => "certifications",
            Self::Contact => "contact",
        }
    }

    pub fn element_id(self) -> ElementId {
        ElementId::new(self.as_str())
    }

    /// Reveal policy for this section under `config`.
    pub fn reveal_policy(self, config: &PageConfig) -> RevealPolicy {
        match self {
            Self::Hero => RevealPolicy::Immediate,
            Self::Projects => RevealPolicy::OnIntersect(config.projects_threshold()),
            _ => RevealPolicy::OnIntersect(config.reveal_threshold()),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown section name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no section named {:?}", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for SectionId {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_owned()))
    }
}

/// Entry of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub section: SectionId,
    pub label: &'static str,
}

/// Navigation bar entries, left to right.
pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem {
        section: SectionId::Hero,
        label: "Home",
    },
    NavItem {
        section: SectionId::About,
        label: "About",
    },
    NavItem {
        section: SectionId::Skills,
        label: "Skills",
    },
    NavItem {
        section: SectionId::Projects,
        label: "Projects",
    },
    NavItem {
        section: SectionId::Experience,
        label: "Experience",
    },
    NavItem {
        section: SectionId::Contact,
        label: "Contact",
    },
];
