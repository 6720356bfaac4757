use crate::cache::{MokaCacheWrapper, ObjectCache};
use crate::config::AppConfig;
use crate::errors::{EduDeskError, Result};
use crate::middlewares::CronSecret;
use crate::models::profiles::entities::UserRole;
use crate::models::profiles::requests::CreateProfileRequest;
use crate::services::jobs::JobSettings;
use crate::services::notifications::Notifier;
use crate::storage::{ServiceStorage, Storage};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub service_storage: ServiceStorage,
    pub cache: Arc<dyn ObjectCache>,
    pub notifier: Notifier,
    pub job_settings: JobSettings,
    pub cron_secret: CronSecret,
}

/// 初始化首个管理员档案
/// 没有任何管理员时，根据 ADMIN_AUTH_USER_ID / ADMIN_EMAIL 创建
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_profiles_by_role(UserRole::Admin).await {
        Ok(count) if count > 0 => {
            debug!("Found {} admin profile(s), skipping admin seed", count);
            return;
        }
        Ok(_) => {}
        Err(e) => {
            warn!("Failed to count admin profiles: {}, skipping admin seed", e);
            return;
        }
    }

    let auth_user_id = std::env::var("ADMIN_AUTH_USER_ID").unwrap_or_default();
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_default();
    if auth_user_id.trim().is_empty() || email.trim().is_empty() {
        warn!("==========================================================");
        warn!("  NO ADMIN PROFILE EXISTS");
        warn!("  Set ADMIN_AUTH_USER_ID and ADMIN_EMAIL to seed one");
        warn!("==========================================================");
        return;
    }

    // 档案已存在（例如曾被降级）时不覆盖
    if let Ok(Some(profile)) = storage.get_profile_by_auth_user_id(auth_user_id.trim()).await {
        warn!(
            "Profile {} already exists with role {}, not promoting it automatically",
            profile.id, profile.role
        );
        return;
    }

    let request = CreateProfileRequest {
        auth_user_id: auth_user_id.trim().to_string(),
        email: email.trim().to_string(),
        full_name: Some("Administrator".to_string()),
        role: UserRole::Admin,
        institute_id: None,
    };

    match storage.create_profile(request).await {
        Ok(profile) => info!(
            "Admin profile created (ID: {}, email: {})",
            profile.id, profile.email
        ),
        Err(e) => warn!("Failed to create admin profile: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存、通知通道和定时任务参数
pub async fn prepare_server_startup() -> Result<StartupContext> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| EduDeskError::configuration("Failed to install rustls crypto provider"))?;

    let config = AppConfig::get();

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    let service_storage = crate::storage::create_service_storage().await?;
    if service_storage.0.is_none() {
        warn!("Service database URL not configured, billing jobs will be rejected");
    }

    // 初始化首个管理员（如果需要）
    seed_admin(&storage).await;

    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::from_config());
    warn!("Cache backend initialized");

    if config.cron.secret.trim().is_empty() {
        warn!("Cron secret not configured, all cron requests will be rejected");
    }

    Ok(StartupContext {
        storage,
        service_storage,
        cache,
        notifier: Notifier::from_config(),
        job_settings: JobSettings::from_config(),
        cron_secret: CronSecret::new(config.cron.secret.trim()),
    })
}
