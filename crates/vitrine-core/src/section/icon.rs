//! Icon registry for card content.
//!
//! Content is persisted as plain data, so a card stores its icon as a
//! symbolic name rather than a renderable reference; the rendering layer
//! re-resolves the name through this closed registry at display time.
//! Unknown or missing names resolve to the default icon, never an error.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The closed set of icons card content may reference by name.
///
/// Wire names are kebab-case, e.g. `"graduation-cap"`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Icon {
    /// Fallback for unknown or missing names
    #[default]
    BookOpen,
    GraduationCap,
    FlaskConical,
    ScrollText,
    Users,
    Globe,
    Award,
    Briefcase,
    Landmark,
    Presentation,
    Microscope,
    PenTool,
    Library,
    Target,
}

impl Icon {
    /// Resolves a symbolic icon name against the registry.
    ///
    /// `None`, an empty string, and any name the registry does not know
    /// all resolve to [`Icon::BookOpen`]; this never fails.
    pub fn resolve(name: Option<&str>) -> Icon {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }

    /// The symbolic wire name of this icon.
    pub fn name(&self) -> String {
        self.to_string()
    }
}
