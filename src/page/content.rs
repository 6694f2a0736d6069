//! Copy and per-element attributes of the landing page

use crate::config::{attributes, Attributes};

pub const BRAND: &str = "Wireframe";

pub const HERO_TITLE: &str = "Ship interfaces that feel alive";
pub const HERO_SUBTITLE: &str = "Motion, depth and feedback for your landing page, without the weight.";

pub const CTA_TITLE: &str = "Ready to get started?";

#[derive(Debug, Clone, Copy)]
pub struct NavLinkSpec {
    pub label: &'static str,
    pub href: &'static str,
}

pub const NAV_LINKS: [NavLinkSpec; 4] = [
    NavLinkSpec { label: "Stats", href: "#stats" },
    NavLinkSpec { label: "Features", href: "#features" },
    NavLinkSpec { label: "FAQ", href: "#faq" },
    NavLinkSpec { label: "Contact", href: "#cta" },
];

#[derive(Debug, Clone, Copy)]
pub struct StatSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub target: &'static str,
}

pub const STATS: [StatSpec; 4] = [
    StatSpec { id: "stat-users", label: "Active users", target: "250000" },
    StatSpec { id: "stat-teams", label: "Teams", target: "1500" },
    StatSpec { id: "stat-uptime", label: "Uptime %", target: "99" },
    StatSpec { id: "stat-regions", label: "Regions", target: "24" },
];

#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    pub progress: &'static str,
}

pub const FEATURES: [FeatureSpec; 3] = [
    FeatureSpec {
        id: "feature-speed",
        title: "Fast by default",
        body: "Every effect is a few lines of state updated once per frame.",
        progress: "92",
    },
    FeatureSpec {
        id: "feature-fallback",
        title: "Graceful fallback",
        body: "No GPU? The background switches to a 2D animation and carries on.",
        progress: "75",
    },
    FeatureSpec {
        id: "feature-motion",
        title: "Respects motion settings",
        body: "Hover and parallax effects switch off when reduced motion is requested.",
        progress: "60",
    },
];

pub const FAQ: [(&str, &str); 4] = [
    ("What does it render?", "A rotating wireframe torus with orbiting markers behind the page content."),
    ("Do I need a graphics card?", "No. Without one the background falls back to a CPU-drawn animation."),
    ("Can I turn the motion off?", "Pass --reduced-motion or set LANDING_FX_REDUCED_MOTION=1."),
    ("Is any data stored?", "No. Nothing is persisted and nothing goes over the network."),
];

pub const PARTNERS: [&str; 5] = ["Northwind", "Contoso", "Initech", "Umbrella", "Hooli"];

#[derive(Debug, Clone, Copy)]
pub struct ButtonSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub href: Option<&'static str>,
}

pub const HERO_BUTTON: ButtonSpec = ButtonSpec {
    id: "hero-button",
    label: "Get started",
    href: Some("#cta"),
};

pub const CTA_BUTTON: ButtonSpec = ButtonSpec {
    id: "cta-button",
    label: "Start free trial",
    href: None,
};

pub fn hero_title_attributes() -> Attributes {
    attributes([("data-typing", ""), ("data-typing-speed", "60")])
}

pub fn hero_background_attributes() -> Attributes {
    attributes([("data-parallax", "0.5")])
}

pub fn button_attributes() -> Attributes {
    attributes([("data-magnetic", "0.3")])
}

pub fn stat_attributes(stat: &StatSpec) -> Attributes {
    attributes([("data-target", stat.target)])
}

pub fn feature_attributes(feature: &FeatureSpec) -> Attributes {
    attributes([("data-tilt", ""), ("data-progress", feature.progress)])
}

pub fn feature_grid_attributes() -> Attributes {
    attributes([("data-stagger-group", ""), ("data-stagger-delay", "150")])
}
