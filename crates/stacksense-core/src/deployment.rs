//! # Deployment Strategy Selector
//!
//! Maps a profile to one of six fixed deployment strategies. The selection is
//! a first-match-wins cascade and is total: every profile gets a strategy.

use crate::requirements::{Priority, Profile, ProjectType};
use crate::types::{DeploymentStrategy, Scale};

/// The fixed set of deployment strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    StaticCdn,
    ServerlessPaas,
    ContainerOrchestration,
    AppStores,
    DeviceFleet,
    CloudVps,
}

impl StrategyKind {
    /// Every strategy, in cascade order.
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::StaticCdn,
        StrategyKind::ServerlessPaas,
        StrategyKind::ContainerOrchestration,
        StrategyKind::AppStores,
        StrategyKind::DeviceFleet,
        StrategyKind::CloudVps,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            StrategyKind::StaticCdn => "Static Cloud / CDN",
            StrategyKind::ServerlessPaas => "Serverless / PaaS",
            StrategyKind::ContainerOrchestration => "Container Orchestration / Cloud Native",
            StrategyKind::AppStores => "App Stores & Mobile CI/CD",
            StrategyKind::DeviceFleet => "Device Fleet Management",
            StrategyKind::CloudVps => "Modern Cloud VPS / PaaS",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            StrategyKind::StaticCdn => {
                "Your project is primarily frontend-driven. Deploying to a global CDN is the fastest, cheapest, and most scalable option."
            }
            StrategyKind::ServerlessPaas => {
                "Focus on code, not infrastructure. Platform-as-a-Service (PaaS) handles scaling automatically."
            }
            StrategyKind::ContainerOrchestration => {
                "For massive scale and control, use Docker containers managed by Kubernetes or specific Cloud Run services."
            }
            StrategyKind::AppStores => {
                "Deployment means publishing to the Apple App Store and Google Play Store, managing updates via OTA (like Expo) or standard releases."
            }
            StrategyKind::DeviceFleet => {
                "You need to push firmware updates to physical devices securely over-the-air (OTA)."
            }
            StrategyKind::CloudVps => "A balanced approach using comprehensive cloud providers.",
        }
    }

    #[must_use]
    pub const fn platforms(self) -> &'static [&'static str] {
        match self {
            StrategyKind::StaticCdn => &["Vercel", "Netlify", "GitHub Pages"],
            StrategyKind::ServerlessPaas => &["Vercel (for Next.js)", "Heroku", "Railway", "Render"],
            StrategyKind::ContainerOrchestration => {
                &["AWS EKS / ECS", "Google Cloud Run", "Azure Kubernetes Service"]
            }
            StrategyKind::AppStores => &["Apple App Store", "Google Play Store", "Expo EAS"],
            StrategyKind::DeviceFleet => &["AWS IoT Greengrass", "BalenaCloud", "Particle"],
            StrategyKind::CloudVps => &["DigitalOcean", "AWS Lightsail", "Linode"],
        }
    }

    /// Owned wire form.
    #[must_use]
    pub fn strategy(self) -> DeploymentStrategy {
        DeploymentStrategy {
            title: self.title().to_string(),
            description: self.description().to_string(),
            recommended_platforms: self.platforms().iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

/// Pick the strategy kind for `profile`.
///
/// Only a recognized Prototype or Small scale selects serverless by scale;
/// an unrecognized label that fell back to Small does not.
#[must_use]
pub fn select_kind(profile: &Profile) -> StrategyKind {
    let project = &profile.project_type;
    let scale = profile.scale_recognized.then_some(profile.scale);

    if matches!(
        project,
        ProjectType::StaticSite | ProjectType::BrowserExtension
    ) {
        return StrategyKind::StaticCdn;
    }

    if profile.has_priority(&Priority::Serverless)
        || matches!(scale, Some(Scale::Prototype | Scale::Small))
    {
        return StrategyKind::ServerlessPaas;
    }

    if *project == ProjectType::Microservices
        || matches!(scale, Some(Scale::Large | Scale::Enterprise))
    {
        return StrategyKind::ContainerOrchestration;
    }

    match project {
        ProjectType::MobileApp => StrategyKind::AppStores,
        ProjectType::IotSystem | ProjectType::EmbeddedSystem => StrategyKind::DeviceFleet,
        _ => StrategyKind::CloudVps,
    }
}

/// Select the deployment strategy for `profile`.
#[must_use]
pub fn select_strategy(profile: &Profile) -> DeploymentStrategy {
    select_kind(profile).strategy()
}
