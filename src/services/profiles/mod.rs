pub mod audits;
pub mod list;
pub mod me;
pub mod update_role;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::profiles::requests::{ProfileListQuery, RoleAuditQuery, UpdateRoleRequest};
use crate::storage::Storage;

pub struct ProfileService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProfileService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 当前用户档案
    pub async fn get_me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_me(request).await
    }

    // 档案列表
    pub async fn list_profiles(
        &self,
        request: &HttpRequest,
        query: ProfileListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_profiles(self, request, query).await
    }

    // 变更角色（带审计）
    pub async fn update_role(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateRoleRequest,
    ) -> ActixResult<HttpResponse> {
        update_role::update_role(self, request, id, body).await
    }

    // 角色审计记录
    pub async fn list_role_audits(
        &self,
        request: &HttpRequest,
        query: RoleAuditQuery,
    ) -> ActixResult<HttpResponse> {
        audits::list_role_audits(self, request, query).await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::profiles::entities::{Profile, UserRole};
    use crate::routes::profiles as handlers;
    use crate::storage::testing::{memory_storage, seed_profile};
    use actix_web::{App, HttpMessage, dev::Service as _, http::StatusCode, test, web};
    use serde_json::{Value, json};

    macro_rules! profile_app {
        ($storage:expr, $actor:expr) => {{
            let actor: Profile = $actor;
            test::init_service(
                App::new()
                    .app_data(web::Data::new($storage.clone()))
                    .wrap_fn(move |req, srv| {
                        req.extensions_mut().insert(actor.clone());
                        srv.call(req)
                    })
                    .route("/profiles/me", web::get().to(handlers::get_me))
                    .route("/profiles/{id}/role", web::put().to(handlers::update_role))
                    .route("/profiles/role-audits", web::get().to(handlers::list_role_audits)),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_admin_cannot_change_own_role() {
        let storage = memory_storage().await;
        let admin = seed_profile(&storage, "admin-1", UserRole::Admin).await;
        let app = profile_app!(storage, admin.clone());

        let req = test::TestRequest::put()
            .uri(&format!("/profiles/{}/role", admin.id))
            .set_json(json!({"role": "teacher"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_role_change_is_audited() {
        let storage = memory_storage().await;
        let admin = seed_profile(&storage, "admin-2", UserRole::Admin).await;
        let user = seed_profile(&storage, "user-2", UserRole::Student).await;
        let app = profile_app!(storage, admin.clone());

        let req = test::TestRequest::put()
            .uri(&format!("/profiles/{}/role", user.id))
            .set_json(json!({"role": "staff", "reason": "hired"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["role"], "staff");

        // 相同角色不再写审计
        let req = test::TestRequest::put()
            .uri(&format!("/profiles/{}/role", user.id))
            .set_json(json!({"role": "staff"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/profiles/role-audits?profile_id={}", user.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        let audits = body["data"]["items"].as_array().expect("audits");
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0]["old_role"], "student");
        assert_eq!(audits[0]["new_role"], "staff");
        assert_eq!(audits[0]["changed_by"], admin.id);
        assert_eq!(audits[0]["reason"], "hired");
    }

    #[actix_web::test]
    async fn test_me_returns_current_profile() {
        let storage = memory_storage().await;
        let teacher = seed_profile(&storage, "teacher-3", UserRole::Teacher).await;
        let app = profile_app!(storage, teacher);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/profiles/me").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["auth_user_id"], "teacher-3");
    }
}
