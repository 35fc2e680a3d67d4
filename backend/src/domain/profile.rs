//! Profile aggregate: one per user, with embedded experience and education.
//!
//! Raw inputs arrive as `*Input` structs with every field optional; the
//! validating constructors turn them into typed values before any service
//! logic runs. Blank strings count as absent.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::embedded::EmbeddedEntry;
use super::ownership::Owned;
use super::{EntryId, ProfileId, UserId, UserSummary};

/// Validation failures for profile, experience, and education inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProfileValidationError {
    /// A required field was missing or blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

impl ProfileValidationError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require(value: Option<String>, field: &'static str) -> Result<String, ProfileValidationError> {
    present(value).ok_or(ProfileValidationError::MissingField { field })
}

/// Split a comma-separated skill list into trimmed entries.
///
/// Order and duplicates are preserved; blank segments are dropped.
///
/// # Examples
/// ```
/// use devhub::domain::parse_skills;
///
/// assert_eq!(parse_skills("go, rust , python"), vec!["go", "rust", "python"]);
/// assert_eq!(parse_skills("rust,,rust"), vec!["rust", "rust"]);
/// ```
#[must_use]
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Social network links shown on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    fn normalised(self) -> Self {
        Self {
            youtube: present(self.youtube),
            facebook: present(self.facebook),
            twitter: present(self.twitter),
            linkedin: present(self.linkedin),
            instagram: present(self.instagram),
        }
    }

    fn merge(&mut self, update: Social) {
        let Social {
            youtube,
            facebook,
            twitter,
            linkedin,
            instagram,
        } = update;
        overwrite(&mut self.youtube, youtube);
        overwrite(&mut self.facebook, facebook);
        overwrite(&mut self.twitter, twitter);
        overwrite(&mut self.linkedin, linkedin);
        overwrite(&mut self.instagram, instagram);
    }
}

fn overwrite(slot: &mut Option<String>, update: Option<String>) {
    if update.is_some() {
        *slot = update;
    }
}

/// Raw profile upsert input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInput {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub github_username: Option<String>,
    /// Comma-separated skill list.
    pub skills: Option<String>,
    pub social: Social,
}

/// Validated profile fields.
///
/// ## Invariants
/// - `status` is non-blank.
/// - `skills` holds at least one trimmed, non-empty entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    status: String,
    skills: Vec<String>,
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    github_username: Option<String>,
    social: Social,
}

impl TryFrom<ProfileInput> for ProfileFields {
    type Error = ProfileValidationError;

    fn try_from(input: ProfileInput) -> Result<Self, Self::Error> {
        let ProfileInput {
            company,
            website,
            location,
            bio,
            status,
            github_username,
            skills,
            social,
        } = input;

        let status = require(status, "status")?;
        let skills = parse_skills(&require(skills, "skills")?);
        if skills.is_empty() {
            return Err(ProfileValidationError::MissingField { field: "skills" });
        }

        Ok(Self {
            status,
            skills,
            company: present(company),
            website: present(website),
            location: present(location),
            bio: present(bio),
            github_username: present(github_username),
            social: social.normalised(),
        })
    }
}

/// Profile document.
///
/// ## Invariants
/// - Exactly one profile exists per `user_id`.
/// - `experience` and `education` are ordered newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Build a new profile from validated fields.
    pub fn create(user_id: UserId, fields: ProfileFields, created_at: DateTime<Utc>) -> Self {
        let ProfileFields {
            status,
            skills,
            company,
            website,
            location,
            bio,
            github_username,
            social,
        } = fields;
        Self {
            id: ProfileId::random(),
            user_id,
            company,
            website,
            location,
            bio,
            status,
            github_username,
            skills,
            social,
            experience: Vec::new(),
            education: Vec::new(),
            created_at,
        }
    }

    /// Merge validated fields into an existing profile.
    ///
    /// Required fields are always replaced; optional fields (including each
    /// social link) are replaced only when supplied, otherwise kept.
    pub fn apply(&mut self, fields: ProfileFields) {
        let ProfileFields {
            status,
            skills,
            company,
            website,
            location,
            bio,
            github_username,
            social,
        } = fields;
        self.status = status;
        self.skills = skills;
        overwrite(&mut self.company, company);
        overwrite(&mut self.website, website);
        overwrite(&mut self.location, location);
        overwrite(&mut self.bio, bio);
        overwrite(&mut self.github_username, github_username);
        self.social.merge(social);
    }
}

impl Owned for Profile {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Profile joined with its owner's live identity at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    /// `None` when the owning user no longer exists.
    pub user: Option<UserSummary>,
}

/// Raw experience input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Work experience entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: EntryId,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TryFrom<ExperienceInput> for Experience {
    type Error = ProfileValidationError;

    fn try_from(input: ExperienceInput) -> Result<Self, Self::Error> {
        let ExperienceInput {
            title,
            company,
            location,
            from,
            to,
            current,
            description,
        } = input;
        let title = require(title, "title")?;
        let company = require(company, "company")?;
        let from = from.ok_or(ProfileValidationError::MissingField { field: "from" })?;
        Ok(Self {
            id: EntryId::random(),
            title,
            company,
            location: present(location),
            from,
            to,
            current,
            description: present(description),
        })
    }
}

impl EmbeddedEntry for Experience {
    fn entry_id(&self) -> &EntryId {
        &self.id
    }
}

/// Raw education input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationInput {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Education entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: EntryId,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TryFrom<EducationInput> for Education {
    type Error = ProfileValidationError;

    fn try_from(input: EducationInput) -> Result<Self, Self::Error> {
        let EducationInput {
            school,
            degree,
            field_of_study,
            from,
            to,
            current,
            description,
        } = input;
        let school = require(school, "school")?;
        let degree = require(degree, "degree")?;
        let field_of_study = require(field_of_study, "fieldOfStudy")?;
        let from = from.ok_or(ProfileValidationError::MissingField { field: "from" })?;
        Ok(Self {
            id: EntryId::random(),
            school,
            degree,
            field_of_study,
            from,
            to,
            current,
            description: present(description),
        })
    }
}

impl EmbeddedEntry for Education {
    fn entry_id(&self) -> &EntryId {
        &self.id
    }
}

#[cfg(test)]
mod tests;
