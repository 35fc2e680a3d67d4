//! Profile handlers.
//!
//! Listing and lookup by user are public; everything else acts on the
//! authenticated principal's own profile.
//!
//! ```text
//! GET    /api/profile
//! POST   /api/profile                {"status":"Developer","skills":"rust, go"}
//! DELETE /api/profile
//! GET    /api/profile/me
//! GET    /api/profile/user/{user_id}
//! PUT    /api/profile/experience     {"title":"Engineer","company":"Acme","from":"2020-01-01"}
//! DELETE /api/profile/experience/{id}
//! PUT    /api/profile/education      {"school":"MIT","degree":"BSc","fieldOfStudy":"CS","from":"2016-09-01"}
//! DELETE /api/profile/education/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Education, EducationInput, EntryId, Experience, ExperienceInput, Profile, ProfileFields,
    ProfileInput, ProfileView, Social, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::principal::Principal;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_profile_validation_error, parse_optional_date, parse_path_id,
};

/// Body for `POST /api/profile`. Social links are flat, as in the form.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "githubusername")]
    pub github_username: Option<String>,
    /// Comma-separated.
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl From<ProfileRequest> for ProfileInput {
    fn from(value: ProfileRequest) -> Self {
        let ProfileRequest {
            company,
            website,
            location,
            bio,
            status,
            github_username,
            skills,
            youtube,
            facebook,
            twitter,
            linkedin,
            instagram,
        } = value;
        Self {
            company,
            website,
            location,
            bio,
            status,
            github_username,
            skills,
            social: Social {
                youtube,
                facebook,
                twitter,
                linkedin,
                instagram,
            },
        }
    }
}

/// Body for `PUT /api/profile/experience`. Dates are `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl ExperienceRequest {
    fn into_experience(self) -> ApiResult<Experience> {
        let input = ExperienceInput {
            from: parse_optional_date(self.from, FieldName::new("from"))?,
            to: parse_optional_date(self.to, FieldName::new("to"))?,
            title: self.title,
            company: self.company,
            location: self.location,
            current: self.current.unwrap_or_default(),
            description: self.description,
        };
        Experience::try_from(input).map_err(map_profile_validation_error)
    }
}

/// Body for `PUT /api/profile/education`. Dates are `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    #[serde(alias = "fieldofstudy")]
    pub field_of_study: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl EducationRequest {
    fn into_education(self) -> ApiResult<Education> {
        let input = EducationInput {
            from: parse_optional_date(self.from, FieldName::new("from"))?,
            to: parse_optional_date(self.to, FieldName::new("to"))?,
            school: self.school,
            degree: self.degree,
            field_of_study: self.field_of_study,
            current: self.current.unwrap_or_default(),
            description: self.description,
        };
        Education::try_from(input).map_err(map_profile_validation_error)
    }
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    msg: &'static str,
}

/// Every profile with its owner joined; public.
#[get("/profile")]
pub async fn list_profiles(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ProfileView>>> {
    Ok(web::Json(state.profiles_query.list_profiles().await?))
}

/// Create or update the principal's profile.
#[post("/profile")]
pub async fn upsert_profile(
    state: web::Data<HttpState>,
    principal: Principal,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<Profile>> {
    let fields = ProfileFields::try_from(ProfileInput::from(payload.into_inner()))
        .map_err(map_profile_validation_error)?;
    let profile = state
        .profiles
        .upsert_profile(principal.user_id(), fields)
        .await?;
    Ok(web::Json(profile))
}

/// Delete the principal's profile and account. Posts are kept.
#[delete("/profile")]
pub async fn delete_profile(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<HttpResponse> {
    state.profiles.delete_profile(principal.user_id()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse { msg: "User deleted" }))
}

#[get("/profile/me")]
pub async fn own_profile(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<web::Json<ProfileView>> {
    Ok(web::Json(
        state.profiles_query.own_profile(principal.user_id()).await?,
    ))
}

#[get("/profile/user/{user_id}")]
pub async fn profile_by_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileView>> {
    let user_id: UserId = parse_path_id(&path, "profile not found")?;
    Ok(web::Json(state.profiles_query.profile_by_user(&user_id).await?))
}

#[put("/profile/experience")]
pub async fn add_experience(
    state: web::Data<HttpState>,
    principal: Principal,
    payload: web::Json<ExperienceRequest>,
) -> ApiResult<web::Json<Profile>> {
    let experience = payload.into_inner().into_experience()?;
    let profile = state
        .profiles
        .add_experience(principal.user_id(), experience)
        .await?;
    Ok(web::Json(profile))
}

#[delete("/profile/experience/{id}")]
pub async fn remove_experience(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<web::Json<Profile>> {
    let entry_id: EntryId = parse_path_id(&path, "experience does not exist")?;
    let profile = state
        .profiles
        .remove_experience(principal.user_id(), &entry_id)
        .await?;
    Ok(web::Json(profile))
}

#[put("/profile/education")]
pub async fn add_education(
    state: web::Data<HttpState>,
    principal: Principal,
    payload: web::Json<EducationRequest>,
) -> ApiResult<web::Json<Profile>> {
    let education = payload.into_inner().into_education()?;
    let profile = state
        .profiles
        .add_education(principal.user_id(), education)
        .await?;
    Ok(web::Json(profile))
}

#[delete("/profile/education/{id}")]
pub async fn remove_education(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<web::Json<Profile>> {
    let entry_id: EntryId = parse_path_id(&path, "education does not exist")?;
    let profile = state
        .profiles
        .remove_education(principal.user_id(), &entry_id)
        .await?;
    Ok(web::Json(profile))
}

/// Register the profile routes; mount inside the `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_profiles)
        .service(upsert_profile)
        .service(delete_profile)
        .service(own_profile)
        .service(profile_by_user)
        .service(add_experience)
        .service(remove_experience)
        .service(add_education)
        .service(remove_education);
}
