use std::collections::BTreeMap;

use reqwest::{Method, header::HeaderMap};

use super::{AcdClient, DetailedResponse, segment};
use crate::{
    error::{AcdError, Result, require},
    models::{AcdProfile, ServiceMessage},
};

#[derive(Debug, Clone, Default)]
pub struct ListProfilesOptions {
    pub headers: HeaderMap,
}

#[derive(Debug, Clone, Default)]
pub struct GetProfileOptions {
    pub profile_id: Option<String>,
    pub headers: HeaderMap,
}

impl GetProfileOptions {
    pub fn new(profile_id: impl Into<String>) -> Self {
        Self {
            profile_id: Some(profile_id.into()),
            ..Default::default()
        }
    }
}

/// The profile's `id` is required; the service keys the new profile by it.
#[derive(Debug, Clone, Default)]
pub struct CreateProfileOptions {
    pub profile: AcdProfile,
    pub headers: HeaderMap,
}

impl CreateProfileOptions {
    pub fn new(profile: AcdProfile) -> Self {
        Self {
            profile,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProfileOptions {
    pub profile_id: Option<String>,
    pub profile: AcdProfile,
    pub headers: HeaderMap,
}

impl UpdateProfileOptions {
    pub fn new(profile_id: impl Into<String>, profile: AcdProfile) -> Self {
        Self {
            profile_id: Some(profile_id.into()),
            profile,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteProfileOptions {
    pub profile_id: Option<String>,
    pub headers: HeaderMap,
}

impl DeleteProfileOptions {
    pub fn new(profile_id: impl Into<String>) -> Self {
        Self {
            profile_id: Some(profile_id.into()),
            ..Default::default()
        }
    }
}

impl_with_headers!(
    ListProfilesOptions,
    GetProfileOptions,
    CreateProfileOptions,
    UpdateProfileOptions,
    DeleteProfileOptions,
);

impl AcdClient {
    /// `GET /v1/profiles`: every profile, keyed by id.
    pub async fn list_profiles(
        &self,
        options: &ListProfilesOptions,
    ) -> Result<DetailedResponse<BTreeMap<String, AcdProfile>>> {
        self.send_json(self.request(Method::GET, "/v1/profiles", &options.headers))
            .await
    }

    pub async fn get_profile(
        &self,
        options: &GetProfileOptions,
    ) -> Result<DetailedResponse<AcdProfile>> {
        let profile_id = require(options.profile_id.as_deref(), "profile_id")?;
        let path = format!("/v1/profiles/{}", segment(profile_id));
        self.send_json(self.request(Method::GET, &path, &options.headers))
            .await
    }

    pub async fn create_profile(
        &self,
        options: &CreateProfileOptions,
    ) -> Result<DetailedResponse<ServiceMessage>> {
        require(options.profile.id.as_deref(), "profile.id")?;
        self.send_json(
            self.request(Method::POST, "/v1/profiles", &options.headers)
                .json(&options.profile),
        )
        .await
    }

    /// `PUT /v1/profiles/{id}`. A body without an id takes the path id; a body
    /// with a different id is rejected before sending.
    pub async fn update_profile(
        &self,
        options: &UpdateProfileOptions,
    ) -> Result<DetailedResponse<ServiceMessage>> {
        let profile_id = require(options.profile_id.as_deref(), "profile_id")?;
        let mut profile = options.profile.clone();
        match profile.id.as_deref() {
            None => profile.id = Some(profile_id.to_string()),
            Some(body_id) if body_id != profile_id => {
                return Err(AcdError::InvalidParameter(format!(
                    "profile body id '{}' does not match path id '{}'",
                    body_id, profile_id
                )));
            }
            Some(_) => {}
        }

        let path = format!("/v1/profiles/{}", segment(profile_id));
        self.send_json(self.request(Method::PUT, &path, &options.headers).json(&profile))
            .await
    }

    pub async fn delete_profile(
        &self,
        options: &DeleteProfileOptions,
    ) -> Result<DetailedResponse<ServiceMessage>> {
        let profile_id = require(options.profile_id.as_deref(), "profile_id")?;
        let path = format!("/v1/profiles/{}", segment(profile_id));
        self.send_json(self.request(Method::DELETE, &path, &options.headers))
            .await
    }
}
