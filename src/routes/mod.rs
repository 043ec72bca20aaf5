pub mod assignments;

pub mod classes;

pub mod grade_structures;

pub mod grades;

pub mod notifications;

pub mod submissions;

pub use assignments::configure_assignments_routes;
pub use classes::configure_classes_routes;
pub use grade_structures::configure_grade_structures_routes;
pub use grades::configure_grades_routes;
pub use notifications::configure_notifications_routes;
pub use submissions::configure_submissions_routes;
