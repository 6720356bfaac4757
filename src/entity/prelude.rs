//! 预导入模块，方便使用

pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendance, Model as AttendanceModel,
};
pub use super::class_sessions::{
    ActiveModel as ClassSessionActiveModel, Entity as ClassSessions, Model as ClassSessionModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::communication_logs::{
    ActiveModel as CommunicationLogActiveModel, Entity as CommunicationLogs,
    Model as CommunicationLogModel,
};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::fee_payments::{
    ActiveModel as FeePaymentActiveModel, Entity as FeePayments, Model as FeePaymentModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::institutes::{
    ActiveModel as InstituteActiveModel, Entity as Institutes, Model as InstituteModel,
};
pub use super::profiles::{
    ActiveModel as ProfileActiveModel, Entity as Profiles, Model as ProfileModel,
};
pub use super::role_audits::{
    ActiveModel as RoleAuditActiveModel, Entity as RoleAudits, Model as RoleAuditModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::tutorial_progress::{
    ActiveModel as TutorialProgressActiveModel, Entity as TutorialProgress,
    Model as TutorialProgressModel,
};
pub use super::tutorials::{
    ActiveModel as TutorialActiveModel, Entity as Tutorials, Model as TutorialModel,
};
