use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin")]
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// 管理员公开信息（不含密码）
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminUser {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "admin@xuelongai.com")]
    pub email: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// 写接口使用的 Bearer token
    pub token: String,
    pub user: AdminUser,
}
