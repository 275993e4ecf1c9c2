mod client;
mod endpoints;
mod errors;
mod query;
mod session;
pub mod types;
pub use self::client::{ApiRequest, ApiResponse, Client, DEFAULT_API_ROOT, DEFAULT_BASE_URL};
pub use self::endpoints::{COURSES_PATH, LECTURES_PATH, QUIZZES_PATH};
pub use self::errors::Error;
pub use self::query::{CourseQuery, PageQuery, Query, QueryCommon, QuizQuery};
pub use self::session::{MemorySession, SessionCredentials, SessionStore};

pub use reqwest::Method;
