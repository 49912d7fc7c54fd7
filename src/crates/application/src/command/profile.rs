use crate::error::AppError;
use domain::profile::{Gender, Profile, ProfileRepository};
use domain::value::{GeoPoint, ProfileId};
use std::sync::Arc;

#[derive(Debug)]
pub struct UpdateProfileCmd {
    pub full_name: Option<String>,
    pub short_description: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub profession: Option<String>,
    pub education: Option<String>,
    pub hobbies: Option<String>,
    pub belief: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<chrono::NaiveDate>,
}

#[derive(Debug)]
pub struct RecordSignalCmd {
    pub latitude: f64,
    pub longitude: f64,
}

pub struct ProfileService {
    profile_repository: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(profile_repository: Arc<dyn ProfileRepository>) -> Self {
        Self { profile_repository }
    }

    /// 首次见到某个认证用户时补建资料行。
    /// 用户 id 来自托管认证方签发的 token，不在本地生成。
    pub async fn ensure_profile(
        &self,
        user_id: ProfileId,
        username: &str,
    ) -> Result<Profile, AppError> {
        if let Some(profile) = self.profile_repository.find_by_id(user_id.clone()).await? {
            return Ok(profile);
        }
        let profile = Profile::new(user_id, username.to_string())?;
        let profile = self.profile_repository.save(profile).await?;
        Ok(profile)
    }

    pub async fn update_profile(
        &self,
        user_id: ProfileId,
        cmd: UpdateProfileCmd,
    ) -> Result<Profile, AppError> {
        let mut profile = self
            .profile_repository
            .find_by_id(user_id.clone())
            .await?
            .ok_or_else(|| {
                AppError::AggregateNotFound("Profile".to_string(), user_id.to_string())
            })?;

        let gender = match cmd.gender.as_deref() {
            None => None,
            Some(raw) => Some(Gender::parse(raw).ok_or_else(|| {
                AppError::InvalidInput(format!("无法识别的性别取值: {}", raw))
            })?),
        };

        profile.full_name = cmd.full_name;
        profile.short_description = cmd.short_description;
        profile.avatar_url = cmd.avatar_url;
        profile.website = cmd.website;
        profile.city = cmd.city;
        profile.country = cmd.country;
        profile.address = cmd.address;
        profile.profession = cmd.profession;
        profile.education = cmd.education;
        profile.hobbies = cmd.hobbies;
        profile.belief = cmd.belief;
        profile.gender = gender;
        profile.dob = cmd.dob;
        profile.touch();
        profile.updated_at = profile.last_active;

        let profile = self.profile_repository.save(profile).await?;
        Ok(profile)
    }

    /// 记录一次位置信号（地图端定期上报）
    pub async fn record_signal(
        &self,
        user_id: ProfileId,
        cmd: RecordSignalCmd,
    ) -> Result<(), AppError> {
        let location = GeoPoint::new(cmd.latitude, cmd.longitude).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "非法坐标: ({}, {})",
                cmd.latitude, cmd.longitude
            ))
        })?;
        let mut profile = self
            .profile_repository
            .find_by_id(user_id.clone())
            .await?
            .ok_or_else(|| {
                AppError::AggregateNotFound("Profile".to_string(), user_id.to_string())
            })?;
        profile.record_signal(location);
        self.profile_repository.save(profile).await?;
        Ok(())
    }
}
