pub mod assessments;
pub mod attendance;
pub mod classes;
pub mod communications;
pub mod cron;
pub mod enrollments;
pub mod institutes;
pub mod payments;
pub mod profiles;
pub mod students;
pub mod system;
pub mod teachers;
pub mod tutorials;

pub use assessments::configure_assessments_routes;
pub use attendance::configure_attendance_routes;
pub use classes::configure_classes_routes;
pub use communications::configure_communications_routes;
pub use cron::{configure_cron_routes, configure_cron_routes_with};
pub use enrollments::configure_enrollments_routes;
pub use institutes::configure_institutes_routes;
pub use payments::configure_payments_routes;
pub use profiles::configure_profiles_routes;
pub use students::configure_students_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teachers_routes;
pub use tutorials::configure_tutorials_routes;
