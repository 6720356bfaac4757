use crate::models::{
    PaginatedResponse,
    assessments::{
        entities::{Assessment, Grade},
        requests::{AssessmentListQuery, CreateAssessmentRequest, GradeEntry},
    },
    attendance::{entities::AttendanceRecord, requests::MarkAttendanceRequest},
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
    },
    communications::{
        entities::{CommunicationLog, NewCommunicationLog},
        requests::CommunicationListQuery,
    },
    enrollments::{
        entities::Enrollment,
        requests::{CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest},
    },
    institutes::{
        entities::Institute,
        requests::{CreateInstituteRequest, InstituteListQuery, UpdateInstituteRequest},
    },
    payments::{
        entities::{FeePayment, FeePaymentDetail, PaymentMethod, PaymentReminderTarget, PaymentStatus},
        requests::{CreatePaymentRequest, PaymentListQuery},
    },
    profiles::{
        entities::{Profile, RoleAudit, UserRole},
        requests::{CreateProfileRequest, ProfileListQuery, RoleAuditQuery},
    },
    sessions::{
        entities::ClassSession,
        requests::{CreateSessionRequest, SessionListQuery},
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    },
    tutorials::{
        entities::{Tutorial, TutorialProgress},
        requests::{
            CreateTutorialRequest, TutorialListQuery, UpdateTutorialRequest,
            UpsertProgressRequest,
        },
    },
};

use crate::errors::{EduDeskError, Result};
use std::sync::Arc;

pub mod sea_orm_storage;

#[cfg(test)]
pub mod testing;

/// 特权存储（定时任务与管理员触发的任务使用），未配置时为 None
#[derive(Clone, Default)]
pub struct ServiceStorage(pub Option<Arc<dyn Storage>>);

impl ServiceStorage {
    pub fn new(storage: Option<Arc<dyn Storage>>) -> Self {
        Self(storage)
    }

    /// 取出特权存储；未配置时返回配置错误，调用方须在产生副作用之前检查
    pub fn require(&self) -> Result<Arc<dyn Storage>> {
        self.0
            .clone()
            .ok_or_else(|| EduDeskError::configuration("Service database URL not configured"))
    }
}

/// 角色变更（连同审计信息）
#[derive(Debug, Clone)]
pub struct RoleChange {
    pub profile_id: i64,
    pub new_role: UserRole,
    pub changed_by: i64,
    pub reason: Option<String>,
    pub ip_address: Option<String>,
}

/// 确认收款
#[derive(Debug, Clone)]
pub struct PaymentSettlement {
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub payment_date: chrono::NaiveDate,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户档案
    // 创建档案
    async fn create_profile(&self, req: CreateProfileRequest) -> Result<Profile>;
    // 通过ID获取档案
    async fn get_profile_by_id(&self, id: i64) -> Result<Option<Profile>>;
    // 通过外部认证用户ID获取档案
    async fn get_profile_by_auth_user_id(&self, auth_user_id: &str) -> Result<Option<Profile>>;
    // 列出档案
    async fn list_profiles_with_pagination(
        &self,
        query: ProfileListQuery,
    ) -> Result<PaginatedResponse<Profile>>;
    // 统计某角色的档案数
    async fn count_profiles_by_role(&self, role: UserRole) -> Result<u64>;
    // 变更角色并写入审计记录（同一事务）
    async fn change_profile_role(&self, change: RoleChange) -> Result<Option<Profile>>;
    // 列出角色审计记录
    async fn list_role_audits_with_pagination(
        &self,
        query: RoleAuditQuery,
    ) -> Result<PaginatedResponse<RoleAudit>>;

    /// 机构
    async fn create_institute(&self, req: CreateInstituteRequest) -> Result<Institute>;
    async fn get_institute_by_id(&self, id: i64) -> Result<Option<Institute>>;
    async fn get_institute_by_code(&self, code: &str) -> Result<Option<Institute>>;
    async fn list_institutes_with_pagination(
        &self,
        query: InstituteListQuery,
    ) -> Result<PaginatedResponse<Institute>>;
    async fn update_institute(
        &self,
        id: i64,
        update: UpdateInstituteRequest,
    ) -> Result<Option<Institute>>;

    /// 教师
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>>;
    async fn update_teacher(&self, id: i64, update: UpdateTeacherRequest)
    -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 学生
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_code(&self, student_code: &str) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>>;
    async fn update_student(&self, id: i64, update: UpdateStudentRequest)
    -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 班级
    async fn create_class(&self, req: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn get_class_by_code(&self, code: &str) -> Result<Option<Class>>;
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<PaginatedResponse<Class>>;
    async fn update_class(&self, id: i64, update: UpdateClassRequest) -> Result<Option<Class>>;
    async fn delete_class(&self, id: i64) -> Result<bool>;

    /// 课时
    async fn list_class_sessions(
        &self,
        class_id: i64,
        query: SessionListQuery,
    ) -> Result<Vec<ClassSession>>;
    async fn create_class_session(
        &self,
        class_id: i64,
        req: CreateSessionRequest,
    ) -> Result<ClassSession>;
    async fn delete_class_session(&self, id: i64) -> Result<bool>;

    /// 选课
    async fn create_enrollment(&self, req: CreateEnrollmentRequest) -> Result<Enrollment>;
    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>>;
    async fn get_enrollment_by_student_and_class(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<Option<Enrollment>>;
    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<Enrollment>>;
    async fn update_enrollment(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>>;
    async fn delete_enrollment(&self, id: i64) -> Result<bool>;

    /// 学费
    // 手动创建学费记录
    async fn create_payment(&self, req: CreatePaymentRequest) -> Result<FeePayment>;
    async fn get_payment_by_id(&self, id: i64) -> Result<Option<FeePayment>>;
    // 列出学费记录（附带学生与班级名称）
    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaginatedResponse<FeePaymentDetail>>;
    // 确认收款
    async fn mark_payment_paid(
        &self,
        id: i64,
        settlement: PaymentSettlement,
    ) -> Result<Option<FeePayment>>;
    // 手动更新状态
    async fn update_payment_status(
        &self,
        id: i64,
        status: PaymentStatus,
        amount_paid: Option<f64>,
        notes: Option<String>,
    ) -> Result<Option<FeePayment>>;

    /// 账单任务
    // 为 payment_month 生成学费，返回新建数量（同一事务）
    async fn generate_monthly_fees(
        &self,
        payment_month: chrono::NaiveDate,
        due_date: chrono::NaiveDate,
    ) -> Result<u64>;
    // 将 due_date 早于 today 的未缴记录标记为逾期，返回更新数量
    async fn mark_overdue_payments(&self, today: chrono::NaiveDate) -> Result<u64>;
    // 列出在 due_date 当天到期的未缴记录及联系方式
    async fn list_reminder_targets(
        &self,
        due_date: chrono::NaiveDate,
    ) -> Result<Vec<PaymentReminderTarget>>;
    // 在 [from, to) 时间段内是否已成功发送过缴费提醒
    async fn has_sent_reminder_between(&self, payment_id: i64, from: i64, to: i64)
    -> Result<bool>;

    /// 通讯记录
    async fn create_communication_log(&self, log: NewCommunicationLog) -> Result<CommunicationLog>;
    async fn list_communication_logs_with_pagination(
        &self,
        query: CommunicationListQuery,
    ) -> Result<PaginatedResponse<CommunicationLog>>;

    /// 考勤
    async fn list_attendance(
        &self,
        class_id: i64,
        date: chrono::NaiveDate,
    ) -> Result<Vec<AttendanceRecord>>;
    // 批量登记考勤（已存在则覆盖）
    async fn upsert_attendance(&self, req: MarkAttendanceRequest) -> Result<Vec<AttendanceRecord>>;

    /// 测评与成绩
    async fn create_assessment(&self, req: CreateAssessmentRequest) -> Result<Assessment>;
    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>>;
    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<PaginatedResponse<Assessment>>;
    async fn delete_assessment(&self, id: i64) -> Result<bool>;
    async fn list_grades(&self, assessment_id: i64) -> Result<Vec<Grade>>;
    async fn upsert_grades(&self, assessment_id: i64, grades: Vec<GradeEntry>)
    -> Result<Vec<Grade>>;

    /// 教程与学习进度
    async fn create_tutorial(&self, req: CreateTutorialRequest) -> Result<Tutorial>;
    async fn get_tutorial_by_id(&self, id: i64) -> Result<Option<Tutorial>>;
    async fn list_tutorials_with_pagination(
        &self,
        query: TutorialListQuery,
    ) -> Result<PaginatedResponse<Tutorial>>;
    async fn update_tutorial(
        &self,
        id: i64,
        update: UpdateTutorialRequest,
    ) -> Result<Option<Tutorial>>;
    async fn delete_tutorial(&self, id: i64) -> Result<bool>;
    async fn list_tutorial_progress(&self, tutorial_id: i64) -> Result<Vec<TutorialProgress>>;
    async fn upsert_tutorial_progress(
        &self,
        tutorial_id: i64,
        req: UpsertProgressRequest,
    ) -> Result<TutorialProgress>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

/// 特权存储；未配置 service_url 时为 None
pub async fn create_service_storage() -> Result<ServiceStorage> {
    if !crate::config::AppConfig::get().has_service_database() {
        return Ok(ServiceStorage::default());
    }
    let storage = sea_orm_storage::SeaOrmStorage::new_service_async().await?;
    Ok(ServiceStorage::new(Some(Arc::new(storage))))
}
