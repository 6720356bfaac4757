//! 测试夹具：内存 SQLite 存储与常用种子数据

use std::sync::Arc;

use super::Storage;
use super::sea_orm_storage::SeaOrmStorage;
use crate::models::{
    classes::{entities::Class, requests::CreateClassRequest},
    enrollments::{entities::Enrollment, requests::CreateEnrollmentRequest},
    profiles::{
        entities::{Profile, UserRole},
        requests::CreateProfileRequest,
    },
    students::{entities::Student, requests::CreateStudentRequest},
};

pub async fn memory_storage() -> Arc<dyn Storage> {
    Arc::new(
        SeaOrmStorage::new_in_memory()
            .await
            .expect("in-memory storage"),
    )
}

/// 只有学号和姓名的学生请求，联系方式由测试按需填写
pub fn student_request(code: &str) -> CreateStudentRequest {
    CreateStudentRequest {
        institute_id: None,
        student_code: code.to_string(),
        full_name: format!("Student {code}"),
        email: None,
        phone: None,
        guardian_name: None,
        guardian_email: None,
        guardian_phone: None,
        date_of_birth: None,
        status: None,
        barcode: None,
    }
}

pub async fn seed_student(storage: &Arc<dyn Storage>, req: CreateStudentRequest) -> Student {
    storage.create_student(req).await.expect("student created")
}

pub async fn seed_class(storage: &Arc<dyn Storage>, code: &str, monthly_fee: f64) -> Class {
    storage
        .create_class(CreateClassRequest {
            institute_id: None,
            code: code.to_string(),
            name: format!("Class {code}"),
            subject: None,
            teacher_id: None,
            monthly_fee,
            capacity: None,
        })
        .await
        .expect("class created")
}

pub async fn seed_enrollment(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    class_id: i64,
    custom_fee: Option<f64>,
) -> Enrollment {
    storage
        .create_enrollment(CreateEnrollmentRequest {
            student_id,
            class_id,
            custom_fee,
            enrolled_at: None,
        })
        .await
        .expect("enrollment created")
}

pub async fn seed_profile(storage: &Arc<dyn Storage>, auth_user_id: &str, role: UserRole) -> Profile {
    storage
        .create_profile(CreateProfileRequest {
            auth_user_id: auth_user_id.to_string(),
            email: format!("{auth_user_id}@example.com"),
            full_name: None,
            role,
            institute_id: None,
        })
        .await
        .expect("profile created")
}
