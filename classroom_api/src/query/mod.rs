mod common;
pub use self::common::{PageQuery, Query, QueryCommon};

mod course;
pub use self::course::CourseQuery;

mod quiz;
pub use self::quiz::QuizQuery;
