//! The standard scoring rules.
//!
//! Each rule is a unit struct. Reason strings are user-facing and stable.

use super::{Adjustment, Rule, Verdict, overrides};
use crate::requirements::{Domain, Priority, Profile, ProjectType, TeamSize};
use crate::types::{Category, CostTier, Scale, Technology};
use std::cmp::Ordering;

// =============================================================================
// SCALE
// =============================================================================

/// Tech minimum scale against the expected scale, plus academic preferences.
pub struct ScaleFit;

impl Rule for ScaleFit {
    fn name(&self) -> &'static str {
        "scale_fit"
    }

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict {
        let mut out = Vec::new();

        if profile.scale == Scale::Academic {
            if tech.has_tag("python") {
                out.push(Adjustment::new(
                    3,
                    "Python is the standard for academic research and reproducibility.",
                ));
            }
            if tech.cost_tier == CostTier::Free {
                out.push(Adjustment::new(2, "Free/Open Source fits academic budgets."));
            }
        }

        let text = profile.scale.describe();
        let fit = match tech.min_scale.ordinal().cmp(&profile.scale.ordinal()) {
            Ordering::Greater => Adjustment::new(
                -5,
                format!("Often too complex/heavy for a {text} scale project."),
            ),
            Ordering::Equal => Adjustment::new(
                3,
                format!("Perfectly sized for {text} scale without over-engineering."),
            ),
            Ordering::Less => Adjustment::new(1, format!("Scales comfortably to {text} size.")),
        };
        out.push(fit);

        Verdict::Adjust(out)
    }
}

// =============================================================================
// LEGACY FLAGS
// =============================================================================

pub struct Performance;

impl Rule for Performance {
    fn name(&self) -> &'static str {
        "performance"
    }

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict {
        if !profile.performance_critical {
            return Verdict::pass();
        }
        let adjustment = if tech.flag("high_performance") {
            Adjustment::new(5, "Excellent performance matches your critical requirement.")
        } else {
            Adjustment::new(-2, "May hit performance bottlenecks for critical workloads.")
        };
        Verdict::Adjust(vec![adjustment])
    }
}

pub struct BudgetFit;

impl Rule for BudgetFit {
    fn name(&self) -> &'static str {
        "budget_fit"
    }

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict {
        if !profile.budget.is_constrained() {
            return Verdict::pass();
        }
        if tech.cost_tier.is_budget_friendly() {
            Verdict::Adjust(vec![Adjustment::new(
                2,
                "Cost-effective / Open Source (Fits budget).",
            )])
        } else if tech.cost_tier == CostTier::Expensive {
            Verdict::Adjust(vec![Adjustment::new(
                -5,
                "Likely exceeds tight budget constraints.",
            )])
        } else {
            Verdict::pass()
        }
    }
}

// =============================================================================
// PROJECT TYPE & DOMAIN
// =============================================================================

/// Project-type context, including the id boosts for that type.
pub struct ProjectFit;

impl Rule for ProjectFit {
    fn name(&self) -> &'static str {
        "project_fit"
    }

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict {
        let project = &profile.project_type;
        let mut out = Vec::new();

        if project.is_web_family() {
            if tech.is(Category::Frontend) && tech.has_tag("web") {
                out.push(Adjustment::new(
                    3,
                    "Standard choice for modern Web/SaaS Applications.",
                ));
            }
            if tech.is(Category::Backend) && tech.has_tag("api") {
                out.push(Adjustment::silent(1));
            }
        }

        match project {
            ProjectType::StaticSite => {
                out.extend(overrides::for_project(project, &tech.id));
                if tech.flag("seo_friendly") {
                    out.push(Adjustment::new(
                        3,
                        "Critical for portfolio/website discoverability.",
                    ));
                }
                if tech.is(Category::Backend) || tech.is(Category::Database) {
                    out.push(Adjustment::new(
                        -2,
                        "Probably overkill for a static site (unless using headless CMS).",
                    ));
                }
            }
            ProjectType::ProgressiveWebApp => {
                out.extend(overrides::for_project(project, &tech.id));
                if tech.flag("offline_capability") {
                    out.push(Adjustment::new(3, "Essential for PWA offline functionality."));
                }
            }
            ProjectType::Microservices => {
                let building_block = tech.is(Category::DevOps) || tech.is(Category::Backend);
                if building_block && (tech.has_tag("containerization") || tech.has_tag("async")) {
                    out.push(Adjustment::new(
                        4,
                        "Ideal building block for distributed Microservices.",
                    ));
                }
                out.extend(overrides::for_project(project, &tech.id));
            }
            ProjectType::BrowserExtension => {
                if tech.is(Category::Frontend) {
                    out.push(Adjustment::new(
                        3,
                        "Modern extensions are widely built with Web Frameworks.",
                    ));
                }
                out.extend(overrides::for_project(project, &tech.id));
            }
            ProjectType::DataScience => {
                if tech.has_tag("python") {
                    out.push(Adjustment::new(
                        5,
                        "Python ecosystem is industry standard for Data Science/ML.",
                    ));
                }
                if tech.has_tag("sql") {
                    out.push(Adjustment::new(2, "Essential for data handling."));
                }
            }
            _ => out.extend(overrides::for_project(project, &tech.id)),
        }

        Verdict::Adjust(out)
    }
}

pub struct DomainFit;

impl Rule for DomainFit {
    fn name(&self) -> &'static str {
        "domain_fit"
    }

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict {
        let mut out = Vec::new();

        match profile.domain {
            Domain::Ecommerce => {
                let relational = tech.is(Category::Database) && tech.has_tag("sql");
                if tech.flag("data_integrity") || relational {
                    out.push(Adjustment::new(
                        4,
                        "Strong data integrity - Critical for financial/order transactions.",
                    ));
                }
                if tech.is(Category::Frontend) && tech.flag("seo_friendly") {
                    out.push(Adjustment::new(2, "SEO is vital for E-commerce discovery."));
                }
            }
            Domain::Fintech => {
                if tech.flag("security_critical") || tech.flag("data_integrity") {
                    out.push(Adjustment::new(
                        5,
                        "High security & consistency required for Fintech.",
                    ));
                }
            }
            _ => {}
        }

        Verdict::Adjust(out)
    }
}

pub struct Security;

impl Rule for Security {
    fn name(&self) -> &'static str {
        "security"
    }

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict {
        if !profile.security_critical {
            return Verdict::pass();
        }
        if tech.flag("security_critical") {
            Verdict::Adjust(vec![Adjustment::new(4, "Hardened security features included.")])
        } else if tech.has_tag("popular") {
            Verdict::Adjust(vec![Adjustment::new(
                1,
                "Large community helps identify security issues quickly.",
            )])
        } else {
            Verdict::pass()
        }
    }
}

// =============================================================================
// PRIORITIES
// =============================================================================

/// Matches the active priority set against attributes, cost and id boosts.
pub struct PriorityMatch;

impl Rule for PriorityMatch {
    fn name(&self) -> &'static str {
        "priority_match"
    }

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict {
        let mut out = Vec::new();

        if profile.has_priority(&Priority::PerformanceEfficiency) {
            match tech.level("performance") {
                Some("High") => out.push(Adjustment::new(
                    4,
                    "High Performance matches your efficiency priority.",
                )),
                Some("Low") => out.push(Adjustment::new(-2, "May not meet performance needs.")),
                _ => {}
            }
        }

        if profile.has_priority(&Priority::SecurityPrivacy) {
            if tech.level("security") == Some("High") {
                out.push(Adjustment::new(4, "Strong security profile."));
            }
            out.extend(overrides::for_priority(&Priority::SecurityPrivacy, &tech.id));
        }

        if profile.has_priority(&Priority::Scalability) {
            out.extend(overrides::for_priority(&Priority::Scalability, &tech.id));
        }

        if profile.has_priority(&Priority::DevelopmentSpeed)
            || profile.has_priority(&Priority::TimeToMarket)
        {
            if tech.level("learning_curve") == Some("Low") {
                out.push(Adjustment::new(
                    3,
                    "Rapid development / Quick time-to-market.",
                ));
            }
            out.extend(overrides::for_priority(&Priority::DevelopmentSpeed, &tech.id));
        }

        if profile.has_priority(&Priority::Maintainability) && tech.flag("type_safety") {
            out.push(Adjustment::new(
                3,
                "Static typing improves long-term maintainability.",
            ));
        }

        if profile.has_priority(&Priority::CostEfficiency) {
            match tech.cost_tier {
                CostTier::Free => out.push(Adjustment::new(
                    4,
                    "Free/Open Source maximizes cost efficiency.",
                )),
                CostTier::Paid => out.push(Adjustment::silent(-2)),
                _ => {}
            }
        }

        if profile.has_priority(&Priority::PowerEfficiency) {
            out.extend(overrides::for_priority(&Priority::PowerEfficiency, &tech.id));
        }

        Verdict::Adjust(out)
    }
}

// =============================================================================
// HARDWARE GATE
// =============================================================================

/// Hard filter: Hardware technologies only score when the project needs hardware.
pub struct HardwareGate;

impl Rule for HardwareGate {
    fn name(&self) -> &'static str {
        "hardware_gate"
    }

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict {
        if tech.is(Category::Hardware) && !profile.hardware_needed() {
            Verdict::Exclude
        } else {
            Verdict::pass()
        }
    }
}

// =============================================================================
// TEAM, OFFLINE, HARDWARE, SEO
// =============================================================================

pub struct TeamFit;

impl Rule for TeamFit {
    fn name(&self) -> &'static str {
        "team_fit"
    }

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict {
        if profile.team_size != TeamSize::Solo {
            return Verdict::pass();
        }
        let mut out = Vec::new();
        if tech.flag("rapid_development") {
            out.push(Adjustment::new(
                4,
                "Rapid development speed is great for solo founders.",
            ));
        }
        if tech.is(Category::Database) && tech.has_tag("complex-queries") {
            out.push(Adjustment::new(
                -1,
                "Might have a steeper learning curve for a solo dev.",
            ));
        }
        Verdict::Adjust(out)
    }
}

pub struct OfflineAndHardware;

impl Rule for OfflineAndHardware {
    fn name(&self) -> &'static str {
        "offline_and_hardware"
    }

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict {
        let mut out = Vec::new();

        if profile.offline_requested() && tech.flag("offline_capability") {
            out.push(Adjustment::new(5, "Native offline support."));
        }

        if profile.hardware_requested() {
            if tech.is(Category::Hardware) {
                out.push(Adjustment::new(10, "Required hardware component."));
            }
            if tech.flag("hardware_integration") {
                out.push(Adjustment::new(
                    3,
                    "Excellent hardware GPIO/Integration support.",
                ));
            }
        }

        Verdict::Adjust(out)
    }
}

/// Frontend SEO for plain web apps.
pub struct SeoFit;

impl Rule for SeoFit {
    fn name(&self) -> &'static str {
        "seo_fit"
    }

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict {
        if profile.project_type != ProjectType::WebApp || !tech.is(Category::Frontend) {
            return Verdict::pass();
        }
        if tech.flag("seo_friendly") {
            Verdict::Adjust(vec![Adjustment::new(
                4,
                "SEO Optimized (Server-Side Rendering/Static Generation).",
            )])
        } else if profile.domain.is_seo_sensitive() {
            Verdict::Adjust(vec![Adjustment::new(
                -3,
                "Client-side rendering may hurt SEO rankings.",
            )])
        } else {
            Verdict::pass()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
