// src/catalog.rs
//
// Static lesson content: quick checks, the final quiz, page text and the
// achievement rules tying checks together.

use crate::{
    config::{DESIGN_CHALLENGE_XP, FEEDBACK_XP, QUICK_CHECK_XP, QUIZ_PERFECT_XP},
    models::{
        page::{Link, Page, PageContent},
        progress::{CheckDefinition, CompositeRule, ProgressState},
        quiz::Question,
    },
};

pub const FIRST_STEPS: &str = "First Steps";
pub const IMMUNE_SYSTEM_EXPERT: &str = "Immune System Expert";
pub const AUTOIMMUNE_EXPERT: &str = "Autoimmune Expert";
pub const DRUG_DEVELOPMENT_EXPERT: &str = "Drug Development Expert";
pub const BIOTECH_RESEARCHER: &str = "Biotech Researcher";
pub const QUIZ_CHAMPION: &str = "Quiz Champion";
pub const PERFECT_SCORE: &str = "Perfect Score";

/// Check id for the one-shot final quiz. Its points depend on the score.
pub const QUIZ_COMPLETE: &str = "quiz_complete";

pub const QUIZ_PERFECT: CheckDefinition = CheckDefinition {
    id: "quiz_perfect",
    points: QUIZ_PERFECT_XP,
    achievement_on_first_award: Some(PERFECT_SCORE),
};

pub const DESIGN_CHALLENGE: CheckDefinition = CheckDefinition {
    id: "design_challenge",
    points: DESIGN_CHALLENGE_XP,
    achievement_on_first_award: Some(BIOTECH_RESEARCHER),
};

pub const DESIGN_FEEDBACK: CheckDefinition = CheckDefinition {
    id: "design_feedback",
    points: FEEDBACK_XP,
    achievement_on_first_award: None,
};

pub const QUIZ_FEEDBACK: CheckDefinition = CheckDefinition {
    id: "quiz_feedback",
    points: FEEDBACK_XP,
    achievement_on_first_award: None,
};

/// Achievements earned by finishing both quick checks of a topic.
pub fn composite_rules() -> Vec<CompositeRule> {
    vec![
        CompositeRule::new(["immune_q1", "immune_q2"], IMMUNE_SYSTEM_EXPERT),
        CompositeRule::new(["auto_q1", "auto_q2"], AUTOIMMUNE_EXPERT),
        CompositeRule::new(["drug_q1", "drug_q2"], DRUG_DEVELOPMENT_EXPERT),
    ]
}

/// A single-question check embedded in a lesson page.
#[derive(Debug, Clone, Copy)]
pub struct QuickCheck {
    pub page: Page,
    pub question: Question,
    /// First check of its topic; grants "First Steps" to a student with no achievements yet.
    pub opens_topic: bool,
    pub explanation: &'static str,
    pub hint: &'static str,
}

impl QuickCheck {
    pub fn id(&self) -> &'static str {
        self.question.id
    }

    /// Achievement to attach to this award, given the state before awarding.
    pub fn achievement_for(&self, state: &ProgressState) -> Option<&'static str> {
        (self.opens_topic && state.achievements().is_empty()).then_some(FIRST_STEPS)
    }

    pub fn definition(&self, state: &ProgressState) -> CheckDefinition {
        CheckDefinition {
            id: self.id(),
            points: QUICK_CHECK_XP,
            achievement_on_first_award: self.achievement_for(state),
        }
    }
}

pub static QUICK_CHECKS: [QuickCheck; 8] = [
    QuickCheck {
        page: Page::ImmuneSystem,
        question: Question {
            id: "immune_q1",
            prompt: "Which type of T-cell is responsible for coordinating the immune response by releasing signaling molecules called cytokines?",
            options: &[
                "Killer T-cells (CD8+)",
                "Helper T-cells (CD4+)",
                "Regulatory T-cells",
                "Memory T-cells",
            ],
            answer: "B",
            standard: "HS-LS1-2",
        },
        opens_topic: true,
        explanation: "Helper T-cells (CD4+) are the 'generals' of the immune system. They release cytokines that activate killer T-cells and B-cells, which is why HIV, which attacks CD4+ cells, is so devastating.",
        hint: "Think about which cell type helps 'coordinate' or 'help' other immune cells do their jobs.",
    },
    QuickCheck {
        page: Page::ImmuneSystem,
        question: Question {
            id: "immune_q2",
            prompt: "In the JAK-STAT pathway, what happens after a cytokine binds to its receptor?",
            options: &[
                "The cell immediately dies",
                "JAK enzymes are activated and phosphorylate STAT proteins",
                "Antibodies are released",
                "The nucleus is destroyed",
            ],
            answer: "B",
            standard: "HS-LS1-1",
        },
        opens_topic: false,
        explanation: "JAK enzymes add phosphate groups to STAT proteins, which then travel to the nucleus to activate specific genes. This is signal transduction: converting an external signal into a cellular response.",
        hint: "Remember the sequence: Cytokine -> Receptor -> JAK activation -> STAT phosphorylation -> Gene activation.",
    },
    QuickCheck {
        page: Page::ImmuneSystem,
        question: Question {
            id: "immune_q3",
            prompt: "What happens during 'negative selection' in the thymus?",
            options: &[
                "T-cells that can recognize MHC molecules are selected to survive",
                "T-cells that react strongly to self-proteins are eliminated",
                "B-cells are converted into T-cells",
                "All T-cells are destroyed",
            ],
            answer: "B",
            standard: "HS-LS1-2",
        },
        opens_topic: false,
        explanation: "Negative selection removes T-cells that would attack your own body. When it fails, self-reactive T-cells can escape and cause conditions like psoriasis, lupus, or Type 1 diabetes.",
        hint: "'Negative' selection removes something harmful. What would be harmful? T-cells that attack your own body!",
    },
    QuickCheck {
        page: Page::ImmuneSystem,
        question: Question {
            id: "immune_q4",
            prompt: "How does envudeucitinib work to treat psoriasis?",
            options: &[
                "It destroys all T-cells in the body",
                "It binds to TYK2's active site, blocking the enzyme from functioning",
                "It increases IL-23 production",
                "It makes skin cells divide faster",
            ],
            answer: "B",
            standard: "HS-LS1-1",
        },
        opens_topic: false,
        explanation: "Envudeucitinib competes with ATP for the active site of TYK2. While the drug occupies the site, the enzyme can't phosphorylate STAT proteins, so the inflammatory signal is blocked.",
        hint: "Envudeucitinib is an enzyme inhibitor. It blocks the enzyme by binding to it, not by destroying cells or changing cytokine production.",
    },
    QuickCheck {
        page: Page::Autoimmune,
        question: Question {
            id: "auto_q1",
            prompt: "How does skin cell turnover in psoriasis compare to normal skin?",
            options: &[
                "It's slower - cells take 60 days instead of 30",
                "It's the same - both take about 28-30 days",
                "It's much faster - 3-4 days instead of 28-30 days",
                "Skin cells don't turnover in psoriasis",
            ],
            answer: "C",
            standard: "HS-LS1-4",
        },
        opens_topic: true,
        explanation: "Inflammatory signals make keratinocytes divide about 10x faster than normal. The cells can't mature before new cells push them to the surface, creating scaly plaques.",
        hint: "What would cause cells to 'pile up' on the skin surface? They must be produced faster than they can be shed!",
    },
    QuickCheck {
        page: Page::Autoimmune,
        question: Question {
            id: "auto_q2",
            prompt: "Why is blocking TYK2 an effective strategy for treating psoriasis?",
            options: &[
                "TYK2 produces the scales on the skin",
                "TYK2 transmits the IL-23 signal that drives inflammation and T-cell activation",
                "TYK2 destroys healthy skin cells",
                "TYK2 is only found in psoriasis patients",
            ],
            answer: "B",
            standard: "HS-LS1-1",
        },
        opens_topic: false,
        explanation: "TYK2 carries the IL-23 signal inside cells. Blocking it prevents the cascade that leads to Th17 activation: the message arrives but can't be delivered.",
        hint: "TYK2 is an enzyme in the signaling pathway. It doesn't directly cause scales or destroy cells; it transmits signals!",
    },
    QuickCheck {
        page: Page::DrugDevelopment,
        question: Question {
            id: "drug_q1",
            prompt: "What is the PRIMARY goal of a Phase 1 clinical trial?",
            options: &[
                "Prove the drug works better than placebo",
                "Determine if the drug is safe in humans",
                "Get FDA approval",
                "Test on thousands of patients",
            ],
            answer: "B",
            standard: "HS-LS1-6",
        },
        opens_topic: true,
        explanation: "Phase 1 trials focus on safety, testing healthy volunteers before patients. Efficacy is measured in Phase 2 and confirmed in Phase 3.",
        hint: "Phase 1 = Safety First. The goal is deciding whether the drug is safe enough to test in patients.",
    },
    QuickCheck {
        page: Page::DrugDevelopment,
        question: Question {
            id: "drug_q2",
            prompt: "Why did Alumis stock jump 95% after Phase 3 results?",
            options: &[
                "Phase 3 is the final hurdle before seeking FDA approval - success means the drug likely works",
                "Phase 3 is the first test in humans",
                "The drug was already FDA approved",
                "Phase 3 tests only safety, not efficacy",
            ],
            answer: "A",
            standard: "HS-LS1-6",
        },
        opens_topic: false,
        explanation: "Phase 3 success shows the drug works in large patient populations with statistical significance, which usually leads to FDA approval and large revenue potential.",
        hint: "Phase 3 is the final large-scale test proving the drug works before FDA approval.",
    },
];

pub fn find_quick_check(id: &str) -> Option<&'static QuickCheck> {
    QUICK_CHECKS.iter().find(|c| c.id() == id)
}

pub fn quick_checks_on(page: Page) -> impl Iterator<Item = &'static QuickCheck> {
    QUICK_CHECKS.iter().filter(move |c| c.page == page)
}

/// Multiple-choice part of the final quiz.
pub static FINAL_QUIZ: [Question; 6] = [
    Question {
        id: "q1",
        prompt: "What is the primary function of Helper T-cells (CD4+)?",
        options: &[
            "Directly kill infected cells",
            "Coordinate the immune response by releasing cytokines",
            "Produce antibodies",
            "Engulf and digest pathogens",
        ],
        answer: "B",
        standard: "HS-LS1-2",
    },
    Question {
        id: "q2",
        prompt: "In the JAK-STAT signaling pathway, what does TYK2 do when activated?",
        options: &[
            "Destroys the cell membrane",
            "Phosphorylates STAT proteins to transmit signals",
            "Produces antibodies",
            "Divides the cell",
        ],
        answer: "B",
        standard: "HS-LS1-1",
    },
    Question {
        id: "q3",
        prompt: "What happens to skin cell turnover in psoriasis?",
        options: &[
            "It slows down to 60 days",
            "It speeds up to 3-4 days instead of 28-30 days",
            "It stops completely",
            "It remains normal",
        ],
        answer: "B",
        standard: "HS-LS1-4",
    },
    Question {
        id: "q4",
        prompt: "Why is TYK2 a good drug target for psoriasis?",
        options: &[
            "TYK2 is only found in psoriasis patients",
            "TYK2 transmits the IL-23 signal that drives inflammation",
            "TYK2 directly causes skin cells to flake off",
            "TYK2 produces the scales seen in psoriasis",
        ],
        answer: "B",
        standard: "HS-LS1-1",
    },
    Question {
        id: "q5",
        prompt: "What is the PRIMARY goal of a Phase 1 clinical trial?",
        options: &[
            "Prove the drug works better than placebo",
            "Test safety in healthy volunteers",
            "Get FDA approval",
            "Test on thousands of patients",
        ],
        answer: "B",
        standard: "HS-LS1-6",
    },
    Question {
        id: "q6",
        prompt: "How does envudeucitinib work to treat psoriasis?",
        options: &[
            "It destroys all T-cells",
            "It binds to TYK2's active site, blocking enzyme function",
            "It increases IL-23 production",
            "It makes skin cells divide faster",
        ],
        answer: "B",
        standard: "HS-LS1-1",
    },
];

pub const SHORT_ANSWER_Q7: &str = "Explain the connection between understanding protein structure (like TYK2) and designing targeted drug therapies. Use the concept of enzyme inhibition in your answer.";
pub const SHORT_ANSWER_Q8: &str = "Why might a biotech company's stock jump 95% after announcing positive Phase 3 trial results? Connect this to the drug development process and the value of scientific research.";

pub const KHAN_IMMUNE: Link = Link {
    title: "Khan Academy: Immune System",
    url: "https://www.khanacademy.org/science/biology/human-biology/immunology",
};
pub const CK12_AUTOIMMUNE: Link = Link {
    title: "CK-12: Autoimmune Diseases",
    url: "https://www.ck12.org/biology/autoimmune-diseases/",
};
pub const FDA_DRUG_DEVELOPMENT: Link = Link {
    title: "FDA: Drug Development Process",
    url: "https://www.fda.gov/patients/learn-about-drug-and-device-approvals/drug-development-process",
};
pub const NIH_AUTOIMMUNE: Link = Link {
    title: "NIH: Autoimmune Diseases",
    url: "https://www.niams.nih.gov/health-topics/autoimmune-diseases",
};
pub const CK12_ENZYMES: Link = Link {
    title: "CK-12: Enzymes",
    url: "https://www.ck12.org/biology/enzymes/",
};
pub const KHAN_ENZYME_INHIBITION: Link = Link {
    title: "Khan Academy: Enzyme Inhibition",
    url: "https://www.khanacademy.org/science/biology/energy-and-enzymes/enzyme-regulation/v/competitive-inhibition",
};

static PAGES: [PageContent; 9] = [
    PageContent {
        page: Page::Home,
        title: "Immune Quest",
        summary: "Explore how the immune system protects us, what happens when it attacks the body itself, and how scientists develop drugs to help.",
        key_points: &["Grade level: 9-12", "Duration: 50-60 minutes", "Subject: Biology"],
        links: &[],
    },
    PageContent {
        page: Page::Article,
        title: "News Article",
        summary: "Alumis stock nearly doubled after positive Phase 3 results for envudeucitinib, an oral TYK2 inhibitor for psoriasis.",
        key_points: &[
            "Psoriasis",
            "TYK2 Inhibitor",
            "Phase 3 Trial",
            "Clinical Endpoints",
            "Biopharmaceutical",
        ],
        links: &[],
    },
    PageContent {
        page: Page::Objectives,
        title: "Learning Objectives",
        summary: "By the end of this lesson you will be able to explain immune function, describe autoimmune disease, connect protein structure to function, and evaluate drug development.",
        key_points: &[
            "Explain Immune System Function",
            "Describe Autoimmune Diseases",
            "Connect Structure to Function",
            "Evaluate Drug Development",
        ],
        links: &[],
    },
    PageContent {
        page: Page::ImmuneSystem,
        title: "The Immune System",
        summary: "Immune cells, cytokine signaling through the JAK-STAT pathway, self-tolerance, and how TYK2 inhibitors interrupt the signal.",
        key_points: &[
            "White blood cells: 4,500-11,000 per microliter of blood",
            "T-cell types: Helper, Killer, Regulatory",
            "Antibody classes: IgG, IgA, IgM, IgE, IgD",
        ],
        links: &[KHAN_IMMUNE],
    },
    PageContent {
        page: Page::Autoimmune,
        title: "Autoimmune Diseases",
        summary: "When self-tolerance fails the immune system attacks the body's own cells. In psoriasis the IL-23/Th17 axis drives rapid skin cell turnover.",
        key_points: &[
            "Loss of self-tolerance",
            "Chronic inflammation",
            "Keratinocytes proliferate rapidly",
        ],
        links: &[CK12_AUTOIMMUNE, NIH_AUTOIMMUNE],
    },
    PageContent {
        page: Page::DrugDevelopment,
        title: "Drug Development",
        summary: "The journey from basic research through Phase 1, 2 and 3 clinical trials to FDA approval.",
        key_points: &[
            "Phase 1: safety",
            "Phase 2: dosing and early efficacy",
            "Phase 3: large-scale efficacy",
            "FDA review",
        ],
        links: &[FDA_DRUG_DEVELOPMENT],
    },
    PageContent {
        page: Page::DesignChallenge,
        title: "Design a Treatment",
        summary: "You are a biotech researcher! Choose a disease, a molecular target and a drug type, weigh the trade-offs, and explain your rationale.",
        key_points: &["HS-ETS1-3 Engineering Design", "HS-LS1-1 Structure and Function"],
        links: &[],
    },
    PageContent {
        page: Page::Quiz,
        title: "Quiz & Assessment",
        summary: "Check your understanding of the immune system, autoimmune diseases, and drug development.",
        key_points: &[
            "Part 1: Immune System Basics",
            "Part 2: Autoimmune Diseases",
            "Part 3: Drug Development",
            "Part 4: Short Answer",
        ],
        links: &[],
    },
    PageContent {
        page: Page::Resources,
        title: "Resources",
        summary: "Further reading on immunology and drug development.",
        key_points: &[
            "Immunologist",
            "Pharmaceutical Scientist",
            "Clinical Research Coordinator",
            "Drug Safety Specialist",
        ],
        links: &[
            KHAN_IMMUNE,
            Link {
                title: "CK-12: Immune System",
                url: "https://www.ck12.org/biology/immune-system/",
            },
            CK12_AUTOIMMUNE,
            Link {
                title: "NIH: Immune System Overview",
                url: "https://www.niaid.nih.gov/research/immune-system-overview",
            },
            FDA_DRUG_DEVELOPMENT,
            Link {
                title: "NIH: Clinical Trials",
                url: "https://www.nih.gov/health-information/nih-clinical-research-trials-you/basics",
            },
        ],
    },
];

pub fn page_content(page: Page) -> &'static PageContent {
    PAGES
        .iter()
        .find(|c| c.page == page)
        .unwrap_or(&PAGES[0])
}
