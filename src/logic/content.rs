//! Static Site Content
//!
//! The prize, its winners, the paper library, and the navigation structure.
//! Pure read-only reference data: loaded as process-wide constants, never
//! mutated.

use serde::{Deserialize, Serialize};

// ============================================================================
// VIEWS
// ============================================================================

/// The enumerated-state view router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewState {
    Home,
    About,
    PrizeOverview,
    Participants,
    ParticipantDetail,
    Library,
    Synthesis,
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Home => "HOME",
            ViewState::About => "ABOUT",
            ViewState::PrizeOverview => "PRIZE_OVERVIEW",
            ViewState::Participants => "PARTICIPANTS",
            ViewState::ParticipantDetail => "PARTICIPANT_DETAIL",
            ViewState::Library => "LIBRARY",
            ViewState::Synthesis => "SYNTHESIS",
        }
    }

    /// Human-readable page title
    pub fn title(&self) -> &'static str {
        match self {
            ViewState::Home => "Home",
            ViewState::About => "About",
            ViewState::PrizeOverview => "The Prize",
            ViewState::Participants => "Participants",
            ViewState::ParticipantDetail => "Participant Detail",
            ViewState::Library => "The Library",
            ViewState::Synthesis => "Synthesis",
        }
    }

    /// Path slug: lowercase view name, underscores to hyphens
    pub fn path(&self) -> String {
        format!("/{}", self.name().to_lowercase().replace('_', "-"))
    }
}

// ============================================================================
// PRIZE
// ============================================================================

/// Prize tier with fixed award amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrizeTier {
    Gold,
    Silver,
    Bronze,
}

impl PrizeTier {
    pub fn label(&self) -> &'static str {
        match self {
            PrizeTier::Gold => "Gold",
            PrizeTier::Silver => "Silver",
            PrizeTier::Bronze => "Bronze",
        }
    }

    pub fn amount_usd(&self) -> u32 {
        match self {
            PrizeTier::Gold => 500_000,
            PrizeTier::Silver => 400_000,
            PrizeTier::Bronze => 300_000,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PrizeTier::Gold => "Highest recognition for groundbreaking hypotheses",
            PrizeTier::Silver => "Recognition for innovative theoretical contributions",
            PrizeTier::Bronze => "Recognition for promising novel approaches",
        }
    }
}

/// Prize-level facts shown on the home and about views
#[derive(Debug, Clone)]
pub struct PrizeInfo {
    pub name: &'static str,
    pub year: u32,
    pub total_prize: &'static str,
    pub organizer: &'static str,
    pub description: &'static str,
    pub named_after: &'static str,
    pub named_after_bio: &'static str,
}

pub const PRIZE_INFO: PrizeInfo = PrizeInfo {
    name: "Oskar Fischer Prize",
    year: 2022,
    total_prize: "$4 Million",
    organizer: "University of Texas at San Antonio (UTSA)",
    description: "An international competition to expand society's understanding of the causes \
        of Alzheimer's disease. The world's largest prize of its kind, challenging researchers \
        to develop proposals that change how society looks at Alzheimer's disease.",
    named_after: "Oskar Fischer",
    named_after_bio: "Oskar Fischer (1876-1942) was a Jewish pioneer in neuroscience who studied \
        dementia at the same time as Alois Alzheimer. His contributions to early dementia \
        research were largely overlooked until recently.",
};

// ============================================================================
// WINNERS
// ============================================================================

/// A prize winner and their hypothesis
#[derive(Debug, Clone)]
pub struct PrizeWinner {
    pub id: &'static str,
    pub name: &'static str,
    pub institution: &'static str,
    pub country: &'static str,
    pub hypothesis: &'static str,
    pub hypothesis_summary: &'static str,
    pub tier: PrizeTier,
    pub prize_amount_usd: u32,
}

pub const PRIZE_WINNERS: &[PrizeWinner] = &[
    // Gold ($500,000 each)
    PrizeWinner {
        id: "area-gomez",
        name: "Estela Area-Gomez",
        institution: "Columbia University / Centro de Investigaciones Biologicas Margarita Salas, CSIC",
        country: "USA / Spain",
        hypothesis: "Lipid Disorder / C99 Cholesterol Sensor",
        hypothesis_summary: "Alzheimer's disease is fundamentally a lipid disorder. The amyloid \
            precursor protein fragment C99 functions as a cholesterol sensor, and its \
            dysregulation disrupts cholesterol metabolism and mitochondrial-endoplasmic \
            reticulum membrane contact sites.",
        tier: PrizeTier::Gold,
        prize_amount_usd: 500_000,
    },
    PrizeWinner {
        id: "frost",
        name: "Bess Frost",
        institution: "UT Health San Antonio",
        country: "USA",
        hypothesis: "Tau-Induced DNA Damage & Chromatin Restructuring",
        hypothesis_summary: "Pathogenic forms of tau protein damage the three-dimensional \
            packaging of DNA, compromising neuronal identity and cellular function. This \
            chromatin restructuring triggers cell death in affected brain regions.",
        tier: PrizeTier::Gold,
        prize_amount_usd: 500_000,
    },
    PrizeWinner {
        id: "nixon",
        name: "Ralph Nixon",
        institution: "Nathan S. Kline Institute for Psychiatric Research",
        country: "USA",
        hypothesis: "Lysosomal/Autophagy Network Failure",
        hypothesis_summary: "Alzheimer's disease stems from dysfunction in the brain's \
            endosomal-lysosomal and autophagy network - the cellular waste-clearing system. \
            This failure causes abnormal proteins to accumulate and become neurotoxic.",
        tier: PrizeTier::Gold,
        prize_amount_usd: 500_000,
    },
    PrizeWinner {
        id: "abbate",
        name: "Carlo Abbate",
        institution: "IRCCS Fondazione Don Carlo Gnocchi",
        country: "Italy",
        hypothesis: "Adult Neurogenesis Theory",
        hypothesis_summary: "Alzheimer's disease originates in neural stem cells within adult \
            neurogenesis niches. Factors inherent to neurogenesis and migration trigger \
            pathological tau hyperphosphorylation, amplified by amyloid pathology.",
        tier: PrizeTier::Gold,
        prize_amount_usd: 500_000,
    },
    // Silver ($400,000 each)
    PrizeWinner {
        id: "moosmann",
        name: "Bernd Moosmann",
        institution: "Johannes Gutenberg University",
        country: "Germany",
        hypothesis: "Membrane Protein Oxidation",
        hypothesis_summary: "The aged human cortex experiences specific and detrimental membrane \
            protein oxidation. This oxidative stress on integral membrane proteins, distinct \
            from lipid peroxidation alone, drives neurodegeneration.",
        tier: PrizeTier::Silver,
        prize_amount_usd: 400_000,
    },
    PrizeWinner {
        id: "weaver",
        name: "Donald Weaver",
        institution: "University of Toronto",
        country: "Canada",
        hypothesis: "Autoimmune Disorder / Innate Immunity",
        hypothesis_summary: "Alzheimer's disease is a disorder of innate immunity regulated by \
            amino acid metabolic pathways. This comprehensive mechanistic model integrates \
            systems biology, molecular modeling, and neuroscience.",
        tier: PrizeTier::Silver,
        prize_amount_usd: 400_000,
    },
    // Bronze ($300,000 each)
    PrizeWinner {
        id: "barron",
        name: "Annelise E. Barron",
        institution: "Stanford University",
        country: "USA",
        hypothesis: "Antimicrobial Peptide Defense",
        hypothesis_summary: "Amyloid-beta may be a natural antimicrobial peptide. The human \
            cathelicidin LL-37 can bind and detoxify A-beta, suggesting stimulation of \
            antimicrobial defenses as a therapeutic strategy.",
        tier: PrizeTier::Bronze,
        prize_amount_usd: 300_000,
    },
    PrizeWinner {
        id: "gouras",
        name: "Gunnar K. Gouras",
        institution: "Lund University",
        country: "Sweden",
        hypothesis: "Intraneuronal Amyloid-Beta Accumulation",
        hypothesis_summary: "Alzheimer's disease begins with intraneuronal accumulation of \
            amyloid-beta 42 at synapses and endosomes. This initiates synaptic dysfunction \
            before extracellular plaque formation occurs.",
        tier: PrizeTier::Bronze,
        prize_amount_usd: 300_000,
    },
    PrizeWinner {
        id: "john",
        name: "Varghese John",
        institution: "University of California, Los Angeles",
        country: "USA",
        hypothesis: "Gamma Oscillation Enhancement",
        hypothesis_summary: "Enhancing gamma oscillations - natural brain waves involved in \
            memory - represents a novel therapeutic approach. This shifts focus from enzyme \
            inhibition to restoring healthy brain electrical activity.",
        tier: PrizeTier::Bronze,
        prize_amount_usd: 300_000,
    },
    PrizeWinner {
        id: "swerdlow",
        name: "Russell Swerdlow",
        institution: "University of Kansas Medical Center",
        country: "USA",
        hypothesis: "Mitochondrial Cascade",
        hypothesis_summary: "In sporadic Alzheimer's, inherited mitochondrial function determines \
            disease susceptibility. Mitochondrial decline beyond an aging threshold initiates \
            the disease cascade, with amyloid as a downstream effect.",
        tier: PrizeTier::Bronze,
        prize_amount_usd: 300_000,
    },
];

/// Winners holding a given tier, in listing order
pub fn winners_by_tier(tier: PrizeTier) -> Vec<&'static PrizeWinner> {
    PRIZE_WINNERS.iter().filter(|w| w.tier == tier).collect()
}

/// Look up a winner by id
pub fn winner_by_id(id: &str) -> Option<&'static PrizeWinner> {
    PRIZE_WINNERS.iter().find(|w| w.id == id)
}

// ============================================================================
// LIBRARY
// ============================================================================

/// A synthesis paper or hypothesis write-up in the library
#[derive(Debug, Clone)]
pub struct LibraryItem {
    pub id: &'static str,
    pub title: &'static str,
    pub author: &'static str,
    pub institution: &'static str,
    pub year: &'static str,
    pub filename: &'static str,
    pub description: &'static str,
    pub tier: PrizeTier,
    /// Links back to the PrizeWinner id
    pub winner_id: &'static str,
}

// Populated as papers are added
pub const LIBRARY_ITEMS: &[LibraryItem] = &[];

// ============================================================================
// NAVIGATION
// ============================================================================

/// One sidebar entry
#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub label: &'static str,
    pub view: ViewState,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { label: "Home", view: ViewState::Home },
    NavItem { label: "The Prize", view: ViewState::PrizeOverview },
    NavItem { label: "Participants", view: ViewState::Participants },
    NavItem { label: "Library", view: ViewState::Library },
    NavItem { label: "Synthesis", view: ViewState::Synthesis },
    NavItem { label: "About", view: ViewState::About },
];

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_roster() {
        assert_eq!(PRIZE_WINNERS.len(), 10);
        assert_eq!(winners_by_tier(PrizeTier::Gold).len(), 4);
        assert_eq!(winners_by_tier(PrizeTier::Silver).len(), 2);
        assert_eq!(winners_by_tier(PrizeTier::Bronze).len(), 4);

        // $4M total, matching PRIZE_INFO
        let total: u32 = PRIZE_WINNERS.iter().map(|w| w.prize_amount_usd).sum();
        assert_eq!(total, 4_000_000);
    }

    #[test]
    fn test_amounts_match_tier() {
        for winner in PRIZE_WINNERS {
            assert_eq!(winner.prize_amount_usd, winner.tier.amount_usd(), "{}", winner.id);
        }
    }

    #[test]
    fn test_winner_by_id() {
        let frost = winner_by_id("frost").unwrap();
        assert_eq!(frost.name, "Bess Frost");
        assert_eq!(frost.tier, PrizeTier::Gold);

        assert!(winner_by_id("nobody").is_none());
    }

    #[test]
    fn test_view_paths() {
        assert_eq!(ViewState::PrizeOverview.path(), "/prize-overview");
        assert_eq!(ViewState::Home.path(), "/home");
        assert_eq!(ViewState::ParticipantDetail.path(), "/participant-detail");
    }

    #[test]
    fn test_nav_views_are_unique() {
        for (i, a) in NAV_ITEMS.iter().enumerate() {
            for b in &NAV_ITEMS[i + 1..] {
                assert_ne!(a.view, b.view);
            }
        }
    }
}
