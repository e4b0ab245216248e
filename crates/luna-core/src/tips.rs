//! Static advice keyed by cycle phase.

use serde::Serialize;

use crate::cycle::Phase;

#[derive(Debug, Clone, Serialize)]
pub struct Tip {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneralTip {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Display metadata and advice for one phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseTips {
    pub phase: Phase,
    /// Human-readable phase name
    pub name: &'static str,
    /// One-line explanation of what the temperatures show
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub tips: &'static [Tip],
}

static PRE_OVULATION: PhaseTips = PhaseTips {
    phase: Phase::PreOvulation,
    name: "Pre-Ovulation",
    description: "Temperatures are in the lower, pre-ovulatory range.",
    icon: "sparkles",
    color: "#93a7d1",
    tips: &[
        Tip {
            title: "Rising Energy",
            description: "Your body is preparing for ovulation. Energy and motivation may be increasing. Great time for planning and starting new projects.",
        },
        Tip {
            title: "Build Momentum",
            description: "This phase often brings clarity and focus. Use this time to tackle tasks that require sustained attention.",
        },
        Tip {
            title: "Social Connection",
            description: "You might feel more outgoing and social. Good time to connect with others and network.",
        },
    ],
};

static OVULATION: PhaseTips = PhaseTips {
    phase: Phase::Ovulation,
    name: "Ovulation Detected",
    description: "Today is the first day of a confirmed temperature rise.",
    icon: "activity",
    color: "#93a7d1",
    tips: &[
        Tip {
            title: "Peak Performance",
            description: "Your body has released an egg. Energy, mood, and cognitive function are often at their peak.",
        },
        Tip {
            title: "High-Intensity Activities",
            description: "This is a great time for challenging workouts, important meetings, or creative projects.",
        },
        Tip {
            title: "Communication",
            description: "Communication skills are often enhanced. Good time for important conversations.",
        },
    ],
};

static LUTEAL: PhaseTips = PhaseTips {
    phase: Phase::Luteal,
    name: "Luteal Phase",
    description: "Temperatures have stayed above your coverline since ovulation.",
    icon: "brain",
    color: "#9d7089",
    tips: &[
        Tip {
            title: "Self-Care Priority",
            description: "Progesterone is high. Listen to your body's need for rest, nourishment, and gentler movement.",
        },
        Tip {
            title: "Stable Energy",
            description: "Support your body with complex carbs, healthy fats, and adequate protein to maintain steady energy.",
        },
        Tip {
            title: "Gentle Movement",
            description: "Yoga, walking, or stretching can feel better than high-intensity workouts during this phase.",
        },
    ],
};

static PRE_MENSTRUAL: PhaseTips = PhaseTips {
    phase: Phase::PreMenstrual,
    name: "Pre-Menstrual",
    description: "More than two weeks have passed since ovulation; your period is due.",
    icon: "heart",
    color: "#c14a4a",
    tips: &[
        Tip {
            title: "Rest & Recovery",
            description: "Your period is approaching. Prioritize rest, gentle movement, and plenty of sleep.",
        },
        Tip {
            title: "Nourish Your Body",
            description: "Iron-rich foods, magnesium, and omega-3s can help support your body through this transition.",
        },
        Tip {
            title: "Set Boundaries",
            description: "It's okay to say no and protect your energy. Honor what your body needs.",
        },
    ],
};

static BUILDING_BASELINE: PhaseTips = PhaseTips {
    phase: Phase::InsufficientData,
    name: "Building Baseline",
    description: "Not enough readings yet to recognise a pattern.",
    icon: "brain",
    color: "#9d7089",
    tips: &[
        Tip {
            title: "Consistency Matters",
            description: "Take your temperature at the same time each morning for the most accurate readings.",
        },
        Tip {
            title: "Track Daily",
            description: "Daily tracking helps us detect your body's unique patterns and predict your period more accurately.",
        },
        Tip {
            title: "Trust the Process",
            description: "Your body's signals are unique. We'll learn your patterns as you continue tracking.",
        },
    ],
};

static TRANSITION: PhaseTips = PhaseTips {
    phase: Phase::Transition,
    name: "Transition Phase",
    description: "Your latest temperatures are rising but the shift is not confirmed yet.",
    icon: "sparkles",
    color: "#93a7d1",
    tips: &[
        Tip {
            title: "Watch for Patterns",
            description: "Your temperature may be shifting. Keep tracking to detect when ovulation occurs.",
        },
        Tip {
            title: "Stay Consistent",
            description: "Continue taking your temperature daily to catch the temperature rise that indicates ovulation.",
        },
    ],
};

static PHASE_TIPS: [&PhaseTips; 6] = [
    &PRE_OVULATION,
    &OVULATION,
    &LUTEAL,
    &PRE_MENSTRUAL,
    &BUILDING_BASELINE,
    &TRANSITION,
];

static GENERAL_TIPS: [GeneralTip; 3] = [
    GeneralTip {
        icon: "utensils",
        title: "Nutrition for Body Literacy",
        description: "Eat a balanced diet rich in whole foods. Your body's needs may shift throughout your cycle; listen and respond.",
    },
    GeneralTip {
        icon: "brain",
        title: "Understand Your Patterns",
        description: "Track how you feel alongside your temperature. Over time, you'll see patterns that help you understand your body better.",
    },
    GeneralTip {
        icon: "heart",
        title: "Body Wisdom",
        description: "Your body communicates through temperature, energy, and mood. Learning to read these signals builds self-understanding.",
    },
];

pub fn all_phase_tips() -> &'static [&'static PhaseTips] {
    &PHASE_TIPS
}

pub fn general_tips() -> &'static [GeneralTip] {
    &GENERAL_TIPS
}

/// Tips for `phase`.
pub fn tips_for(phase: Phase) -> &'static PhaseTips {
    match phase {
        Phase::PreOvulation => &PRE_OVULATION,
        Phase::Ovulation => &OVULATION,
        Phase::Luteal => &LUTEAL,
        Phase::PreMenstrual => &PRE_MENSTRUAL,
        Phase::InsufficientData => &BUILDING_BASELINE,
        Phase::Transition => &TRANSITION,
    }
}

/// Tips for a phase given by name; unknown names get the baseline tips.
pub fn tips_for_name(name: &str) -> &'static PhaseTips {
    tips_for(name.parse().unwrap_or(Phase::InsufficientData))
}

/// Everything a tips screen shows for the current phase.
#[derive(Debug, Clone, Serialize)]
pub struct TipsReport {
    pub current_phase: Phase,
    pub current_phase_name: &'static str,
    pub current_phase_tips: &'static PhaseTips,
    pub all_phase_tips: &'static [&'static PhaseTips],
    pub general_tips: &'static [GeneralTip],
}

impl TipsReport {
    pub fn for_phase(phase: Phase) -> Self {
        let current = tips_for(phase);
        Self {
            current_phase: phase,
            current_phase_name: current.name,
            current_phase_tips: current,
            all_phase_tips: all_phase_tips(),
            general_tips: general_tips(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_phase_has_tips() {
        for phase in Phase::ALL {
            let tips = tips_for(phase);
            assert_eq!(tips.phase, phase);
            assert!(!tips.tips.is_empty());
        }
    }

    #[test]
    fn table_lists_each_phase_once() {
        for phase in Phase::ALL {
            let matching = all_phase_tips().iter().filter(|t| t.phase == phase).count();
            assert_eq!(matching, 1, "{phase}");
        }
        assert_eq!(all_phase_tips().len(), Phase::ALL.len());
    }

    #[test]
    fn unknown_name_falls_back_to_baseline() {
        assert_eq!(tips_for_name("menstrual").phase, Phase::InsufficientData);
        assert_eq!(tips_for_name("luteal").name, "Luteal Phase");
        assert_eq!(tips_for_name("").name, "Building Baseline");
    }

    #[test]
    fn report_serializes_phase_key() {
        let report = TipsReport::for_phase(Phase::Transition);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["current_phase"], "transition");
        assert_eq!(json["current_phase_name"], "Transition Phase");
        assert_eq!(json["all_phase_tips"].as_array().unwrap().len(), 6);
        assert_eq!(json["general_tips"].as_array().unwrap().len(), 3);
    }
}
