pub mod create;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::institutes::requests::{
    CreateInstituteRequest, InstituteListQuery, UpdateInstituteRequest,
};
use crate::storage::Storage;

pub struct InstituteService {
    storage: Option<Arc<dyn Storage>>,
}

impl InstituteService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_institutes(
        &self,
        request: &HttpRequest,
        query: InstituteListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_institutes(self, request, query).await
    }

    pub async fn create_institute(
        &self,
        request: &HttpRequest,
        institute: CreateInstituteRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_institute(self, request, institute).await
    }

    pub async fn get_institute(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_institute(self, request, id).await
    }

    pub async fn update_institute(
        &self,
        request: &HttpRequest,
        id: i64,
        update: UpdateInstituteRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_institute(self, request, id, update).await
    }
}
