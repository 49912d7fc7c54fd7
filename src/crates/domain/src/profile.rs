use crate::value::{GeoPoint, ProfileId};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

// 领域错误定义
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("数据库错误: {0}")]
    DbErr(String),
    #[error("实体不存在: {0}")]
    NotFoundErr(String),
    #[error("用户名已被占用: {0}")]
    UsernameTaken(String),
    #[error("验证错误: {0}")]
    ValidationErr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Gender> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// 用户资料。favorites 是反规范化计数，
/// 理论上等于 favorite_user 表中 user_id 指向本行的行数。
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: ProfileId,
    pub username: String,
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
    pub gender: Option<Gender>,
    pub dob: Option<NaiveDate>,
    pub location: Option<GeoPoint>,
    pub favorites: i32,
    pub last_active: NaiveDateTime,
    pub last_signal: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Profile {
    pub fn new(id: ProfileId, username: String) -> Result<Self, ProfileError> {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(ProfileError::ValidationErr("用户名不能为空".to_string()));
        }
        if username.len() > 64 {
            return Err(ProfileError::ValidationErr(
                "用户名不能超过64个字符".to_string(),
            ));
        }
        let now = Utc::now().naive_utc();
        Ok(Self {
            id,
            username,
            full_name: None,
            short_description: None,
            avatar_url: None,
            website: None,
            city: None,
            country: None,
            address: None,
            profession: None,
            education: None,
            hobbies: None,
            belief: None,
            gender: None,
            dob: None,
            location: None,
            favorites: 0,
            last_active: now,
            last_signal: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// 记录一次位置信号，同时刷新活跃时间
    pub fn record_signal(&mut self, location: GeoPoint) {
        let now = Utc::now().naive_utc();
        self.location = Some(location);
        self.last_signal = Some(now);
        self.last_active = now;
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now().naive_utc();
    }
}

// 仓储接口
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, ProfileError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Profile>, ProfileError>;
    async fn save(&self, profile: Profile) -> Result<Profile, ProfileError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_rejects_blank_username() {
        assert!(Profile::new(ProfileId::from(1), "  ".to_string()).is_err());
    }

    #[test]
    fn test_record_signal_updates_location_and_activity() {
        let mut profile = Profile::new(ProfileId::from(1), "alice".to_string()).unwrap();
        assert!(profile.last_signal.is_none());
        profile.record_signal(GeoPoint::new(31.2, 121.5).unwrap());
        assert!(profile.last_signal.is_some());
        assert_eq!(profile.location.unwrap().latitude, 31.2);
    }
}
