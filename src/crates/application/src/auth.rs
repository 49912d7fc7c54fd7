use crate::error::AppError;

/// 托管认证方签发的 token 中携带的声明
#[derive(Debug, Clone)]
pub struct UserClaims {
    pub user_id: i64,
    pub username: String,
    pub exp: i64,
}

/// token 验证接口。本服务只验证托管认证方签发的 token，
/// 不负责签发、改密等认证协议本身
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<UserClaims, AppError>;
}
