//! Profile domain model.
//!
//! The profile is a singleton record: it is never deleted and always
//! exists, falling back to the default baseline for any unset field.

use serde::{Deserialize, Serialize};

/// A language the owner speaks, with a display color tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language name, e.g. "English"
    pub name: String,
    /// Color tag the rendering layer maps to a gradient
    pub color: String,
}

/// The portfolio owner's profile.
///
/// Mutated only through profile updates; a partial update is shallow-merged
/// field by field, the incoming side winning per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Full display name
    pub name: String,
    /// Nationality line shown next to the identity block
    pub nationality: String,
    /// Contact e-mail
    pub email: String,
    /// Contact phone number
    #[serde(default)]
    pub phone: String,
    /// Current position, e.g. "Associate Professor"
    pub position: String,
    /// Affiliation string, e.g. department and university
    pub affiliation: String,
    /// Rich-text (HTML) mission statement
    pub mission: String,
    /// Spoken languages in display order
    #[serde(default)]
    pub languages: Vec<Language>,
    /// Opaque reference to the profile photo, if one was uploaded
    #[serde(default)]
    pub photo: Option<String>,
}

/// Partial profile overlay.
///
/// Doubles as the gateway fetch result and the update payload: every field
/// is optional, and only present fields participate in a merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<Language>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Option<String>>,
}

impl ProfilePatch {
    /// Applies this patch onto a profile, present fields winning.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(nationality) = &self.nationality {
            profile.nationality = nationality.clone();
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            profile.phone = phone.clone();
        }
        if let Some(position) = &self.position {
            profile.position = position.clone();
        }
        if let Some(affiliation) = &self.affiliation {
            profile.affiliation = affiliation.clone();
        }
        if let Some(mission) = &self.mission {
            profile.mission = mission.clone();
        }
        if let Some(languages) = &self.languages {
            profile.languages = languages.clone();
        }
        if let Some(photo) = &self.photo {
            profile.photo = photo.clone();
        }
    }

    /// Overlays another patch onto this one, the other side winning per field.
    ///
    /// Used by gateway implementations that persist profiles as accumulated
    /// partial records.
    pub fn overlay(&mut self, other: &ProfilePatch) {
        macro_rules! take {
            ($field:ident) => {
                if other.$field.is_some() {
                    self.$field = other.$field.clone();
                }
            };
        }
        take!(name);
        take!(nationality);
        take!(email);
        take!(phone);
        take!(position);
        take!(affiliation);
        take!(mission);
        take!(languages);
        take!(photo);
    }

    /// Returns true when no field is present.
    pub fn is_empty(&self) -> bool {
        self == &ProfilePatch::default()
    }
}
