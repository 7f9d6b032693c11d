//! Technology-id boosts.
//!
//! Most scoring is driven by tags and attributes. The few adjustments that
//! name a specific catalog id live here, in one table, so the rule code never
//! compares ids inline.

use super::Adjustment;
use crate::requirements::{Priority, ProjectType};

/// When an id boost applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The project is of this type.
    Project(ProjectType),
    /// This priority is active. Time-to-Market shares the Development Speed entries.
    Priority(Priority),
}

/// A fixed adjustment for a list of technology ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdBoost {
    pub trigger: Trigger,
    pub ids: &'static [&'static str],
    pub points: i32,
    pub reason: Option<&'static str>,
}

impl IdBoost {
    fn applies_to(&self, tech_id: &str) -> bool {
        self.ids.contains(&tech_id)
    }

    #[must_use]
    pub fn adjustment(&self) -> Adjustment {
        match self.reason {
            Some(reason) => Adjustment::new(self.points, reason),
            None => Adjustment::silent(self.points),
        }
    }
}

pub const ID_BOOSTS: &[IdBoost] = &[
    IdBoost {
        trigger: Trigger::Project(ProjectType::StaticSite),
        ids: &["nextjs"],
        points: 4,
        reason: Some("Next.js Static Generation is perfect for portfolios."),
    },
    IdBoost {
        trigger: Trigger::Project(ProjectType::ProgressiveWebApp),
        ids: &["react", "vue", "nextjs"],
        points: 2,
        reason: Some("Great ecosystem for building PWA features."),
    },
    IdBoost {
        trigger: Trigger::Project(ProjectType::Microservices),
        ids: &["docker"],
        points: 5,
        reason: Some("Virtually mandatory for managing microservices."),
    },
    IdBoost {
        trigger: Trigger::Project(ProjectType::BrowserExtension),
        ids: &["react"],
        points: 2,
        reason: Some("Community favorite for complex extension UIs."),
    },
    IdBoost {
        trigger: Trigger::Priority(Priority::SecurityPrivacy),
        ids: &["rust", "java", "csharp"],
        points: 1,
        reason: None,
    },
    IdBoost {
        trigger: Trigger::Priority(Priority::Scalability),
        ids: &["kubernetes", "go", "elixir", "aws", "google_cloud"],
        points: 3,
        reason: Some("Built for massive scalability."),
    },
    IdBoost {
        trigger: Trigger::Priority(Priority::DevelopmentSpeed),
        ids: &["python", "javascript", "ruby", "vercel", "firebase"],
        points: 2,
        reason: None,
    },
    IdBoost {
        trigger: Trigger::Priority(Priority::PowerEfficiency),
        ids: &["c", "cpp", "rust"],
        points: 5,
        reason: Some("Extremely resource efficient (system level)."),
    },
    IdBoost {
        trigger: Trigger::Priority(Priority::PowerEfficiency),
        ids: &["electron"],
        points: -3,
        reason: Some("Known for high memory usage."),
    },
];

/// Adjustments for `tech_id` on a project of type `project_type`.
pub(crate) fn for_project(project_type: &ProjectType, tech_id: &str) -> Vec<Adjustment> {
    ID_BOOSTS
        .iter()
        .filter(|b| matches!(&b.trigger, Trigger::Project(t) if t == project_type))
        .filter(|b| b.applies_to(tech_id))
        .map(IdBoost::adjustment)
        .collect()
}

/// Adjustments for `tech_id` under an active `priority`.
pub(crate) fn for_priority(priority: &Priority, tech_id: &str) -> Vec<Adjustment> {
    ID_BOOSTS
        .iter()
        .filter(|b| matches!(&b.trigger, Trigger::Priority(p) if p == priority))
        .filter(|b| b.applies_to(tech_id))
        .map(IdBoost::adjustment)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Score;

    #[test]
    fn docker_boost_only_on_microservices() {
        let hits = for_project(&ProjectType::Microservices, "docker");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].delta, Score::points(5));

        assert!(for_project(&ProjectType::WebApp, "docker").is_empty());
    }

    #[test]
    fn silent_boosts_carry_no_reason() {
        let hits = for_priority(&Priority::SecurityPrivacy, "rust");
        assert_eq!(hits, vec![Adjustment::silent(1)]);
    }

    #[test]
    fn power_efficiency_penalizes_electron() {
        let hits = for_priority(&Priority::PowerEfficiency, "electron");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].delta, Score::points(-3));
        assert!(for_priority(&Priority::PowerEfficiency, "react").is_empty());
    }

    #[test]
    fn every_boost_names_at_least_one_id() {
        assert!(ID_BOOSTS.iter().all(|b| !b.ids.is_empty()));
    }
}
