//! 预导入模块，方便使用

pub use super::assignment_grades::{
    ActiveModel as AssignmentGradeActiveModel, Entity as AssignmentGrades,
    Model as AssignmentGradeModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::class_users::{
    ActiveModel as ClassUserActiveModel, Entity as ClassUsers, Model as ClassUserModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::grade_categories::{
    ActiveModel as GradeCategoryActiveModel, Entity as GradeCategories,
    Model as GradeCategoryModel,
};
pub use super::grade_structures::{
    ActiveModel as GradeStructureActiveModel, Entity as GradeStructures,
    Model as GradeStructureModel,
};
pub use super::notification_status::{
    ActiveModel as NotificationStatusActiveModel, Entity as NotificationStatuses,
    Model as NotificationStatusModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
