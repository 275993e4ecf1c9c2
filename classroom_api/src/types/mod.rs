mod lenient;

mod meta;
pub use self::meta::PaginatedResponse;

mod course;
pub use self::course::{CourseID, CourseRecord};

mod lecture;
pub use self::lecture::{LectureID, LectureRecord};

mod quiz;
pub use self::quiz::{AttemptID, AttemptRecord, QuestionID, QuizID, QuizRecord};
