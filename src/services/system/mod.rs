pub mod health;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 健康检查（无需认证）
    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        health::health(request).await
    }
}
