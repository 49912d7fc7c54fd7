use crate::auth::AuthConfig;
use config::{Config, Environment, File};
use dotenvy::dotenv;
use serde::Deserialize;
use std::error::Error;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::RwLock;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    database_url: String,
    jwt_secret_key: String,
    /// 服务器配置
    server: RawServerConfig,
    /// 首页信息流配置
    feed: RawFeedConfig,
    /// 双写补偿策略
    compensation: RawCompensationConfig,
}

/// 服务器配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawServerConfig {
    /// 监听地址
    host: String,
    /// 监听端口
    port: u16,
}

impl Default for RawServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5580,
        }
    }
}

/// 信息流配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawFeedConfig {
    /// 附近用户返回上限
    nearby_limit: i32,
    /// 最新推荐返回上限
    recent_limit: i32,
}

impl Default for RawFeedConfig {
    fn default() -> Self {
        Self {
            nearby_limit: 50,
            recent_limit: 20,
        }
    }
}

/// 补偿策略配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawCompensationConfig {
    /// 补偿写入最多尝试次数
    attempts: u32,
    /// 重试间隔基数（毫秒），按次数线性放大
    backoff_ms: u64,
}

impl Default for RawCompensationConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff_ms: 50,
        }
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            database_url: "".to_string(),
            jwt_secret_key: "secret".to_string(),
            server: RawServerConfig::default(),
            feed: RawFeedConfig::default(),
            compensation: RawCompensationConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 信息流配置
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub nearby_limit: i32,
    pub recent_limit: i32,
}

/// 双写补偿策略
#[derive(Debug, Clone)]
pub struct CompensationConfig {
    pub attempts: u32,
    pub backoff_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfigImpl {
    pub database_url: Arc<RwLock<String>>,
    pub jwt_secret_key: Arc<RwLock<String>>,
    pub server: Arc<RwLock<ServerConfig>>,
    pub feed: Arc<RwLock<FeedConfig>>,
    pub compensation: Arc<RwLock<CompensationConfig>>,
}

impl AppConfigImpl {
    fn new(data: RawConfig) -> Self {
        let server_config = ServerConfig {
            host: data.server.host,
            port: data.server.port,
        };
        let feed_config = FeedConfig {
            nearby_limit: data.feed.nearby_limit,
            recent_limit: data.feed.recent_limit,
        };
        let compensation_config = CompensationConfig {
            attempts: data.compensation.attempts,
            backoff_ms: data.compensation.backoff_ms,
        };
        AppConfigImpl {
            database_url: Arc::new(RwLock::new(data.database_url)),
            jwt_secret_key: Arc::new(RwLock::new(data.jwt_secret_key)),
            server: Arc::new(RwLock::new(server_config)),
            feed: Arc::new(RwLock::new(feed_config)),
            compensation: Arc::new(RwLock::new(compensation_config)),
        }
    }

    pub fn load() -> Result<AppConfigImpl, Box<dyn Error>> {
        dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let raw: RawConfig = config.try_deserialize()?; // serde 自动填充默认值
        Ok(AppConfigImpl::new(raw))
    }

    pub fn server(&self) -> ServerConfig {
        let cfg_val = self.server.read().unwrap();
        cfg_val.clone()
    }

    pub fn feed(&self) -> FeedConfig {
        let cfg_val = self.feed.read().unwrap();
        cfg_val.clone()
    }

    pub fn compensation(&self) -> CompensationConfig {
        let cfg_val = self.compensation.read().unwrap();
        cfg_val.clone()
    }

    pub fn database_url(&self) -> String {
        let cfg_val = self.database_url.read().unwrap();
        (*cfg_val).clone()
    }
}

impl AuthConfig for AppConfigImpl {
    fn jwt_secret(&self) -> &str {
        static CACHED_SECRET: OnceLock<String> = OnceLock::new();

        let secret_string = {
            let cfg_val = self.jwt_secret_key.read().unwrap();
            cfg_val.clone()
        };

        CACHED_SECRET.get_or_init(|| secret_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let cfg = AppConfigImpl::new(RawConfig::default());
        let server = cfg.server();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 5580);
        let compensation = cfg.compensation();
        assert_eq!(compensation.attempts, 3);
        assert_eq!(compensation.backoff_ms, 50);
        assert_eq!(cfg.feed().nearby_limit, 50);
    }
}
