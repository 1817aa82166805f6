//! Roasting tips per target level

use serde::Serialize;

use crate::models::RoastLevel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoastTips {
    pub title: &'static str,
    pub tips: &'static [&'static str],
    /// Dark styles near second crack need closer attention
    pub caution: bool,
}

const LIGHT_TIPS: &[&str] = &[
    "Drop at first crack",
    "Aim for 15-20% development",
    "Expect bright acidity",
];

const MEDIUM_TIPS: &[&str] = &[
    "Drop 30-45 seconds after first crack",
    "Aim for 20-25% development",
    "Balanced acidity and body",
];

const DARK_TIPS: &[&str] = &[
    "Watch for second crack",
    "Reduce heat as you approach target",
    "Expect heavy body and smoky notes",
];

pub fn recommendations_for(level: RoastLevel) -> RoastTips {
    match level {
        RoastLevel::Light => RoastTips {
            title: "Light Roast Tips",
            tips: LIGHT_TIPS,
            caution: false,
        },
        RoastLevel::Medium => RoastTips {
            title: "Medium Roast Tips",
            tips: MEDIUM_TIPS,
            caution: false,
        },
        RoastLevel::Dark | RoastLevel::French | RoastLevel::Italian => RoastTips {
            title: "Dark Roast Tips",
            tips: DARK_TIPS,
            caution: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_and_medium() {
        let light = recommendations_for(RoastLevel::Light);
        assert_eq!(light.tips[0], "Drop at first crack");
        assert!(!light.caution);

        let medium = recommendations_for(RoastLevel::Medium);
        assert_eq!(medium.title, "Medium Roast Tips");
        assert!(!medium.caution);
    }

    #[test]
    fn test_dark_family_shares_tips() {
        for level in [RoastLevel::Dark, RoastLevel::French, RoastLevel::Italian] {
            let tips = recommendations_for(level);
            assert_eq!(tips.title, "Dark Roast Tips");
            assert!(tips.caution);
        }
    }
}
