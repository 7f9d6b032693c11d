//! # Requirements Module
//!
//! The caller-supplied project description and its parsed, enum-typed view.
//!
//! `ProjectRequirements` is the wire shape: free-form labels plus legacy
//! boolean flags. `Profile` is what the rules consume: every label resolved to
//! a closed enumeration, with an explicit fallback for anything unrecognized.
//!
//! ## Label Matching
//!
//! Matching is deterministic and never guesses across tiers:
//! 1. Trimmed, case-insensitive equality with a canonical label or alias
//! 2. Equality of the label's leading keyword (text before `(`, `/` or ` - `)
//! 3. Scale only: keyword containment, in ascending tier order
//!
//! Step 2 runs before step 3, so `"Enterprise (Large segment)"` resolves to
//! `Enterprise`, not `Large`.

use crate::primitives::{MAX_LABEL_LENGTH, MAX_PRIORITIES};
use crate::types::{Scale, StackError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// WIRE SHAPE
// =============================================================================

/// Project requirements as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRequirements {
    /// e.g. "Web App", "Mobile App", "IoT System"
    pub project_type: String,
    /// e.g. "E-commerce", "Fintech", "Education"
    pub domain: String,
    /// e.g. "Small (Hundreds of users)", "Enterprise (Global scale)"
    pub expected_scale: String,
    /// e.g. "Solo Developer", "Small Team (2-10)"
    pub team_size: String,
    /// e.g. "Tight / Bootstrapped", "Moderate"
    pub budget: String,
    #[serde(default)]
    pub priorities: Vec<String>,
    // Legacy flags, folded into `priorities` when the list is empty.
    #[serde(default)]
    pub performance_critical: bool,
    #[serde(default)]
    pub security_critical: bool,
    #[serde(default)]
    pub offline_capability: bool,
    #[serde(default)]
    pub hardware_integration: bool,
}

impl ProjectRequirements {
    /// Requirements with the given labels, no priorities and no legacy flags.
    #[must_use]
    pub fn new(
        project_type: impl Into<String>,
        domain: impl Into<String>,
        expected_scale: impl Into<String>,
        team_size: impl Into<String>,
        budget: impl Into<String>,
    ) -> Self {
        Self {
            project_type: project_type.into(),
            domain: domain.into(),
            expected_scale: expected_scale.into(),
            team_size: team_size.into(),
            budget: budget.into(),
            priorities: Vec::new(),
            performance_critical: false,
            security_critical: false,
            offline_capability: false,
            hardware_integration: false,
        }
    }

    /// Display name of the project: `"{domain} {project_type}"`.
    #[must_use]
    pub fn project_name(&self) -> String {
        format!("{} {}", self.domain, self.project_type)
    }

    /// Validate field sizes.
    ///
    /// Labels themselves are never rejected for being unknown; they parse to
    /// an `Other` fallback instead.
    pub fn validate(&self) -> Result<(), StackError> {
        let labels = [
            ("project_type", &self.project_type),
            ("domain", &self.domain),
            ("expected_scale", &self.expected_scale),
            ("team_size", &self.team_size),
            ("budget", &self.budget),
        ];
        for (field, value) in labels {
            check_label_length(field, value)?;
        }

        if self.priorities.len() > MAX_PRIORITIES {
            return Err(StackError::InvalidRequirements {
                field: "priorities",
                reason: format!(
                    "{} priorities exceed the maximum of {}",
                    self.priorities.len(),
                    MAX_PRIORITIES
                ),
            });
        }
        for priority in &self.priorities {
            check_label_length("priorities", priority)?;
        }

        Ok(())
    }

    /// Resolve every label into its closed enumeration.
    #[must_use]
    pub fn profile(&self) -> Profile {
        Profile::from_requirements(self)
    }
}

fn check_label_length(field: &'static str, value: &str) -> Result<(), StackError> {
    if value.len() > MAX_LABEL_LENGTH {
        return Err(StackError::InvalidRequirements {
            field,
            reason: format!(
                "length {} exceeds maximum {} bytes",
                value.len(),
                MAX_LABEL_LENGTH
            ),
        });
    }
    Ok(())
}

// =============================================================================
// LABEL MATCHING
// =============================================================================

/// Text before the first `(`, `/` or ` - `, trimmed.
fn leading_keyword(label: &str) -> &str {
    let cut = [label.find('('), label.find('/'), label.find(" - ")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(label.len());
    label[..cut].trim()
}

/// Resolve `label` against a table of known variants and their names.
fn match_label<T: Clone>(
    label: &str,
    known: &[T],
    names: impl Fn(&T) -> &'static [&'static str],
) -> Option<T> {
    let full = label.trim();
    let lead = leading_keyword(full);

    let find = |needle: &str| {
        known
            .iter()
            .find(|v| names(v).iter().any(|n| n.eq_ignore_ascii_case(needle)))
            .cloned()
    };

    find(full).or_else(|| if lead.is_empty() { None } else { find(lead) })
}

// =============================================================================
// PROJECT TYPE
// =============================================================================

/// Kind of software being built.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectType {
    WebApp,
    SaasPlatform,
    ProgressiveWebApp,
    CmsBlogPlatform,
    StaticSite,
    BrowserExtension,
    Microservices,
    DataScience,
    MobileApp,
    IotSystem,
    RoboticsSystem,
    EmbeddedSystem,
    DeviceDriver,
    /// Unrecognized label, kept verbatim.
    Other(String),
}

impl ProjectType {
    pub const KNOWN: [ProjectType; 13] = [
        ProjectType::WebApp,
        ProjectType::SaasPlatform,
        ProjectType::ProgressiveWebApp,
        ProjectType::CmsBlogPlatform,
        ProjectType::StaticSite,
        ProjectType::BrowserExtension,
        ProjectType::Microservices,
        ProjectType::DataScience,
        ProjectType::MobileApp,
        ProjectType::IotSystem,
        ProjectType::RoboticsSystem,
        ProjectType::EmbeddedSystem,
        ProjectType::DeviceDriver,
    ];

    /// Canonical label first, then accepted aliases.
    fn names(&self) -> &'static [&'static str] {
        match self {
            ProjectType::WebApp => &["Web App", "Web Application"],
            ProjectType::SaasPlatform => &["SaaS Platform", "SaaS"],
            ProjectType::ProgressiveWebApp => &["Progressive Web App (PWA)", "Progressive Web App", "PWA"],
            ProjectType::CmsBlogPlatform => &["CMS / Blog Platform", "CMS", "Blog Platform"],
            ProjectType::StaticSite => &["Static Website / Portfolio", "Static Website", "Portfolio"],
            ProjectType::BrowserExtension => &["Browser Extension"],
            ProjectType::Microservices => &["Microservices Architecture", "Microservices"],
            ProjectType::DataScience => &["Data Science / ML Pipeline", "Data Science", "ML Pipeline"],
            ProjectType::MobileApp => &["Mobile App", "Mobile Application"],
            ProjectType::IotSystem => &["IoT System", "IoT"],
            ProjectType::RoboticsSystem => &["Robotics System", "Robotics"],
            ProjectType::EmbeddedSystem => &["Embedded System Software", "Embedded System", "Embedded"],
            ProjectType::DeviceDriver => &["Device Driver"],
            ProjectType::Other(_) => &[],
        }
    }

    #[must_use]
    pub fn parse(label: &str) -> Self {
        match_label(label, &Self::KNOWN, Self::names)
            .unwrap_or_else(|| ProjectType::Other(label.trim().to_string()))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            ProjectType::Other(label) => label.as_str(),
            known => known.names().first().copied().unwrap_or_default(),
        }
    }

    /// Web-delivered projects whose frontends are judged as web frameworks.
    #[must_use]
    pub fn is_web_family(&self) -> bool {
        matches!(
            self,
            ProjectType::WebApp
                | ProjectType::SaasPlatform
                | ProjectType::ProgressiveWebApp
                | ProjectType::CmsBlogPlatform
                | ProjectType::StaticSite
        )
    }

    /// Project types that always need physical hardware.
    #[must_use]
    pub fn is_hardware_bound(&self) -> bool {
        matches!(
            self,
            ProjectType::IotSystem
                | ProjectType::RoboticsSystem
                | ProjectType::EmbeddedSystem
                | ProjectType::DeviceDriver
        )
    }
}

// =============================================================================
// DOMAIN
// =============================================================================

/// Business domain of the project. Only domains with dedicated rules are named.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Domain {
    Ecommerce,
    Fintech,
    SocialMedia,
    Education,
    Other(String),
}

impl Domain {
    pub const KNOWN: [Domain; 4] = [
        Domain::Ecommerce,
        Domain::Fintech,
        Domain::SocialMedia,
        Domain::Education,
    ];

    fn names(&self) -> &'static [&'static str] {
        match self {
            Domain::Ecommerce => &["E-commerce", "Ecommerce"],
            Domain::Fintech => &["Fintech", "Finance", "Financial Services"],
            Domain::SocialMedia => &["Social Media", "Social Network"],
            Domain::Education => &["Education", "EdTech"],
            Domain::Other(_) => &[],
        }
    }

    #[must_use]
    pub fn parse(label: &str) -> Self {
        match_label(label, &Self::KNOWN, Self::names)
            .unwrap_or_else(|| Domain::Other(label.trim().to_string()))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Domain::Other(label) => label.as_str(),
            known => known.names().first().copied().unwrap_or_default(),
        }
    }

    /// Domains where organic search traffic matters for the frontend.
    #[must_use]
    pub fn is_seo_sensitive(&self) -> bool {
        matches!(
            self,
            Domain::Ecommerce | Domain::SocialMedia | Domain::Education
        )
    }
}

// =============================================================================
// SCALE LABELS
// =============================================================================

impl Scale {
    fn names(&self) -> &'static [&'static str] {
        match self {
            Scale::Prototype => &["Prototype / MVP", "Prototype", "MVP"],
            Scale::Academic => &["Academic / Research Project", "Academic", "Research"],
            Scale::Small => &["Small (Hundreds of users)", "Small"],
            Scale::Medium => &["Medium (Thousands of users)", "Medium"],
            Scale::Large => &["Large (Millions of users)", "Large"],
            Scale::Enterprise => &["Enterprise (Global scale)", "Enterprise"],
        }
    }

    /// Canonical form label for this tier.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.names().first().copied().unwrap_or_default()
    }

    /// Parse a free-form expected-scale label.
    ///
    /// Returns `None` when no tier keyword can be found; callers fall back
    /// to `Small`.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Scale> {
        match_label(label, &Scale::ALL, Scale::names).or_else(|| {
            let lower = label.to_ascii_lowercase();
            Scale::ALL
                .into_iter()
                .find(|s| lower.contains(&s.keyword().to_ascii_lowercase()))
        })
    }
}

// =============================================================================
// TEAM SIZE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TeamSize {
    Solo,
    Small,
    MidSized,
    Large,
    Other(String),
}

impl TeamSize {
    pub const KNOWN: [TeamSize; 4] = [
        TeamSize::Solo,
        TeamSize::Small,
        TeamSize::MidSized,
        TeamSize::Large,
    ];

    fn names(&self) -> &'static [&'static str] {
        match self {
            TeamSize::Solo => &["Solo Developer", "Solo"],
            TeamSize::Small => &["Small Team (2-10)", "Small Team", "Small"],
            TeamSize::MidSized => &["Mid-sized Team (10-50)", "Mid-sized Team", "Mid-sized", "Medium"],
            TeamSize::Large => &["Large Organization (50+)", "Large Organization", "Large"],
            TeamSize::Other(_) => &[],
        }
    }

    #[must_use]
    pub fn parse(label: &str) -> Self {
        match_label(label, &Self::KNOWN, Self::names)
            .unwrap_or_else(|| TeamSize::Other(label.trim().to_string()))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            TeamSize::Other(label) => label.as_str(),
            known => known.names().first().copied().unwrap_or_default(),
        }
    }
}

// =============================================================================
// BUDGET
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Budget {
    Zero,
    Tight,
    Moderate,
    High,
    Enterprise,
    Other(String),
}

impl Budget {
    pub const KNOWN: [Budget; 5] = [
        Budget::Zero,
        Budget::Tight,
        Budget::Moderate,
        Budget::High,
        Budget::Enterprise,
    ];

    fn names(&self) -> &'static [&'static str] {
        match self {
            Budget::Zero => &["Zero ($0) - Open Source only", "Zero", "$0"],
            Budget::Tight => &["Tight / Bootstrapped", "Tight", "Bootstrapped"],
            Budget::Moderate => &["Moderate"],
            Budget::High => &["High / Well-funded", "High", "Well-funded"],
            Budget::Enterprise => &["Enterprise / Unlimited", "Enterprise", "Unlimited"],
            Budget::Other(_) => &[],
        }
    }

    #[must_use]
    pub fn parse(label: &str) -> Self {
        match_label(label, &Self::KNOWN, Self::names)
            .unwrap_or_else(|| Budget::Other(label.trim().to_string()))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Budget::Other(label) => label.as_str(),
            known => known.names().first().copied().unwrap_or_default(),
        }
    }

    /// Zero or tight budgets, where cost tier dominates.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        matches!(self, Budget::Zero | Budget::Tight)
    }
}

// =============================================================================
// PRIORITY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    PerformanceEfficiency,
    SecurityPrivacy,
    Scalability,
    DevelopmentSpeed,
    TimeToMarket,
    Maintainability,
    CostEfficiency,
    PowerEfficiency,
    HardwareIntegration,
    OfflineCapability,
    Serverless,
    Other(String),
}

impl Priority {
    pub const KNOWN: [Priority; 11] = [
        Priority::PerformanceEfficiency,
        Priority::SecurityPrivacy,
        Priority::Scalability,
        Priority::DevelopmentSpeed,
        Priority::TimeToMarket,
        Priority::Maintainability,
        Priority::CostEfficiency,
        Priority::PowerEfficiency,
        Priority::HardwareIntegration,
        Priority::OfflineCapability,
        Priority::Serverless,
    ];

    fn names(&self) -> &'static [&'static str] {
        match self {
            Priority::PerformanceEfficiency => &["Performance & Efficiency", "Performance"],
            Priority::SecurityPrivacy => &["Security & Privacy", "Security"],
            Priority::Scalability => &["Scalability"],
            Priority::DevelopmentSpeed => &["Development Speed"],
            Priority::TimeToMarket => &["Time-to-Market", "Time to Market"],
            Priority::Maintainability => &["Maintainability"],
            Priority::CostEfficiency => &["Cost Efficiency"],
            Priority::PowerEfficiency => &["Power & Resource Efficiency", "Power Efficiency"],
            Priority::HardwareIntegration => &["Hardware Integration"],
            Priority::OfflineCapability => &["Offline Capability"],
            Priority::Serverless => &["Serverless"],
            Priority::Other(_) => &[],
        }
    }

    #[must_use]
    pub fn parse(label: &str) -> Self {
        match_label(label, &Self::KNOWN, Self::names)
            .unwrap_or_else(|| Priority::Other(label.trim().to_string()))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Priority::Other(label) => label.as_str(),
            known => known.names().first().copied().unwrap_or_default(),
        }
    }
}

// =============================================================================
// PROFILE
// =============================================================================

/// Parsed requirements, as consumed by scoring rules and the deployment selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub project_type: ProjectType,
    pub domain: Domain,
    /// Expected scale; `Small` when the label was not recognized.
    pub scale: Scale,
    /// Whether `scale` came from the label rather than the fallback.
    pub scale_recognized: bool,
    pub team_size: TeamSize,
    pub budget: Budget,
    /// Active priorities: explicit ones, or the legacy flags folded in.
    pub priorities: BTreeSet<Priority>,
    pub performance_critical: bool,
    pub security_critical: bool,
    pub offline_capability: bool,
    pub hardware_integration: bool,
}

impl Profile {
    /// Parse every label of `reqs`.
    ///
    /// Legacy flags are folded into the priority set only when no explicit
    /// priority was given. The set makes duplicates impossible.
    #[must_use]
    pub fn from_requirements(reqs: &ProjectRequirements) -> Self {
        let parsed_scale = Scale::parse_label(&reqs.expected_scale);

        let mut priorities: BTreeSet<Priority> =
            reqs.priorities.iter().map(|p| Priority::parse(p)).collect();
        if reqs.priorities.is_empty() {
            let legacy = [
                (reqs.performance_critical, Priority::PerformanceEfficiency),
                (reqs.security_critical, Priority::SecurityPrivacy),
                (reqs.offline_capability, Priority::OfflineCapability),
                (reqs.hardware_integration, Priority::HardwareIntegration),
            ];
            priorities.extend(legacy.into_iter().filter(|(on, _)| *on).map(|(_, p)| p));
        }

        Self {
            project_type: ProjectType::parse(&reqs.project_type),
            domain: Domain::parse(&reqs.domain),
            scale: parsed_scale.unwrap_or_default(),
            scale_recognized: parsed_scale.is_some(),
            team_size: TeamSize::parse(&reqs.team_size),
            budget: Budget::parse(&reqs.budget),
            priorities,
            performance_critical: reqs.performance_critical,
            security_critical: reqs.security_critical,
            offline_capability: reqs.offline_capability,
            hardware_integration: reqs.hardware_integration,
        }
    }

    #[must_use]
    pub fn has_priority(&self, priority: &Priority) -> bool {
        self.priorities.contains(priority)
    }

    /// Hardware integration asked for, by legacy flag or by priority.
    #[must_use]
    pub fn hardware_requested(&self) -> bool {
        self.hardware_integration || self.has_priority(&Priority::HardwareIntegration)
    }

    /// Offline support asked for, by legacy flag or by priority.
    #[must_use]
    pub fn offline_requested(&self) -> bool {
        self.offline_capability || self.has_priority(&Priority::OfflineCapability)
    }

    /// Whether Hardware-category technologies may be scored at all.
    ///
    /// True when Hardware Integration is an active priority or the project
    /// type is inherently hardware-bound.
    #[must_use]
    pub fn hardware_needed(&self) -> bool {
        self.has_priority(&Priority::HardwareIntegration) || self.project_type.is_hardware_bound()
    }
}

// =============================================================================
// REQUIREMENT OPTIONS
// =============================================================================

/// Canonical labels for every requirement field, for building input forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementOptions {
    pub project_types: Vec<String>,
    pub domains: Vec<String>,
    pub scales: Vec<String>,
    pub team_sizes: Vec<String>,
    pub budgets: Vec<String>,
    pub priorities: Vec<String>,
}

impl RequirementOptions {
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            project_types: ProjectType::KNOWN.iter().map(|v| v.label().to_string()).collect(),
            domains: Domain::KNOWN.iter().map(|v| v.label().to_string()).collect(),
            scales: Scale::ALL.iter().map(|v| v.label().to_string()).collect(),
            team_sizes: TeamSize::KNOWN.iter().map(|v| v.label().to_string()).collect(),
            budgets: Budget::KNOWN.iter().map(|v| v.label().to_string()).collect(),
            priorities: Priority::KNOWN.iter().map(|v| v.label().to_string()).collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
