//! Typed wrappers for the backend's course and quiz routes.
//!
//! Paths keep their `/api` prefix so they work both against a bare host and
//! against a base URL that already ends in `/api`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    query::{CourseQuery, PageQuery, Query, QuizQuery},
    types::{
        AttemptID, AttemptRecord, CourseID, CourseRecord, LectureID, LectureRecord,
        PaginatedResponse, QuestionID, QuizID, QuizRecord,
    },
    Client, Error,
};

pub const COURSES_PATH: &str = "/api/courses/courses/";
pub const LECTURES_PATH: &str = "/api/courses/lectures/";
pub const QUIZZES_PATH: &str = "/api/quizzes/quizzes/";

fn course_path(course_id: CourseID, action: Option<&str>) -> String {
    match action {
        Some(action) => format!("{}{}/{}/", COURSES_PATH, course_id, action),
        None => format!("{}{}/", COURSES_PATH, course_id),
    }
}

fn quiz_path(quiz_id: QuizID, action: Option<&str>) -> String {
    match action {
        Some(action) => format!("{}{}/{}/", QUIZZES_PATH, quiz_id, action),
        None => format!("{}{}/", QUIZZES_PATH, quiz_id),
    }
}

impl Client {
    /// Fetches one page of courses matching the given query.
    pub async fn list_courses(
        &self,
        query: &CourseQuery,
    ) -> Result<PaginatedResponse<CourseRecord>, Error> {
        self.get_json(COURSES_PATH, Some(query)).await
    }

    /// Fetches one page of courses awaiting review.
    pub async fn list_pending_courses(
        &self,
        page: i64,
    ) -> Result<PaginatedResponse<CourseRecord>, Error> {
        let query = CourseQuery::default().with_page(page).with_status("pending");
        self.list_courses(&query).await
    }

    pub async fn get_course(&self, course_id: CourseID) -> Result<CourseRecord, Error> {
        self.get_json::<CourseRecord, PageQuery>(&course_path(course_id, None), None)
            .await
    }

    /// Fetches the full lecture/quiz tree of a course.
    pub async fn get_course_content(&self, course_id: CourseID) -> Result<Value, Error> {
        self.get_json::<Value, PageQuery>(&course_path(course_id, Some("content")), None)
            .await
    }

    pub async fn create_course<B: Serialize + ?Sized>(
        &self,
        data: &B,
    ) -> Result<CourseRecord, Error> {
        self.post_json(COURSES_PATH, Some(data)).await
    }

    pub async fn update_course<B: Serialize + ?Sized>(
        &self,
        course_id: CourseID,
        data: &B,
    ) -> Result<CourseRecord, Error> {
        self.patch_json(&course_path(course_id, None), data).await
    }

    pub async fn delete_course(&self, course_id: CourseID) -> Result<(), Error> {
        self.delete(&course_path(course_id, None)).await
    }

    pub async fn approve_course(&self, course_id: CourseID) -> Result<Value, Error> {
        self.post_json::<Value, Value>(&course_path(course_id, Some("approve")), None)
            .await
    }

    pub async fn reject_course(&self, course_id: CourseID, reason: &str) -> Result<Value, Error> {
        let body = json!({ "reason": reason });
        self.post_json(&course_path(course_id, Some("reject")), Some(&body))
            .await
    }

    pub async fn lock_course_price(&self, course_id: CourseID) -> Result<Value, Error> {
        self.post_json::<Value, Value>(&course_path(course_id, Some("lock_price")), None)
            .await
    }

    pub async fn unlock_course_price(&self, course_id: CourseID) -> Result<Value, Error> {
        self.post_json::<Value, Value>(&course_path(course_id, Some("unlock_price")), None)
            .await
    }

    /// Fetches one page of lectures.
    pub async fn list_lectures(
        &self,
        query: &PageQuery,
    ) -> Result<PaginatedResponse<LectureRecord>, Error> {
        self.get_json(LECTURES_PATH, Some(query)).await
    }

    pub async fn create_lecture<B: Serialize + ?Sized>(
        &self,
        data: &B,
    ) -> Result<LectureRecord, Error> {
        self.post_json(LECTURES_PATH, Some(data)).await
    }

    pub async fn update_lecture<B: Serialize + ?Sized>(
        &self,
        lecture_id: LectureID,
        data: &B,
    ) -> Result<LectureRecord, Error> {
        self.patch_json(&format!("{}{}/", LECTURES_PATH, lecture_id), data)
            .await
    }

    /// Fetches one page of quizzes, optionally narrowed to a course or status.
    pub async fn list_quizzes(
        &self,
        query: &QuizQuery,
    ) -> Result<PaginatedResponse<QuizRecord>, Error> {
        self.get_json(QUIZZES_PATH, Some(query)).await
    }

    pub async fn get_quiz(&self, quiz_id: QuizID) -> Result<QuizRecord, Error> {
        self.get_json::<QuizRecord, PageQuery>(&quiz_path(quiz_id, None), None)
            .await
    }

    pub async fn create_quiz<B: Serialize + ?Sized>(&self, data: &B) -> Result<QuizRecord, Error> {
        self.post_json(QUIZZES_PATH, Some(data)).await
    }

    pub async fn update_quiz<B: Serialize + ?Sized>(
        &self,
        quiz_id: QuizID,
        data: &B,
    ) -> Result<QuizRecord, Error> {
        self.patch_json(&quiz_path(quiz_id, None), data).await
    }

    pub async fn delete_quiz(&self, quiz_id: QuizID) -> Result<(), Error> {
        self.delete(&quiz_path(quiz_id, None)).await
    }

    pub async fn publish_quiz(&self, quiz_id: QuizID) -> Result<Value, Error> {
        self.post_json::<Value, Value>(&quiz_path(quiz_id, Some("publish")), None)
            .await
    }

    pub async fn unpublish_quiz(&self, quiz_id: QuizID) -> Result<Value, Error> {
        self.post_json::<Value, Value>(&quiz_path(quiz_id, Some("unpublish")), None)
            .await
    }

    /// Fetches one page of a quiz's questions.
    pub async fn list_quiz_questions(
        &self,
        quiz_id: QuizID,
        query: &PageQuery,
    ) -> Result<PaginatedResponse<Value>, Error> {
        self.get_json(&quiz_path(quiz_id, Some("questions")), Some(query))
            .await
    }

    pub async fn create_question<B: Serialize + ?Sized>(
        &self,
        quiz_id: QuizID,
        data: &B,
    ) -> Result<Value, Error> {
        self.post_json(&quiz_path(quiz_id, Some("questions")), Some(data))
            .await
    }

    pub async fn update_question<B: Serialize + ?Sized>(
        &self,
        question_id: QuestionID,
        data: &B,
    ) -> Result<Value, Error> {
        self.patch_json(&format!("/api/quizzes/questions/{}/", question_id), data)
            .await
    }

    pub async fn delete_question(&self, question_id: QuestionID) -> Result<(), Error> {
        self.delete(&format!("/api/quizzes/questions/{}/", question_id))
            .await
    }

    /// Fetches one page of attempts made on a quiz.
    pub async fn list_quiz_attempts(
        &self,
        quiz_id: QuizID,
        query: &PageQuery,
    ) -> Result<PaginatedResponse<AttemptRecord>, Error> {
        self.get_json(&quiz_path(quiz_id, Some("attempts")), Some(query))
            .await
    }

    pub async fn get_attempt(&self, attempt_id: AttemptID) -> Result<AttemptRecord, Error> {
        self.get_json::<AttemptRecord, PageQuery>(
            &format!("/api/quizzes/attempts/{}/", attempt_id),
            None,
        )
        .await
    }

    /// Records a manual grade for an attempt.
    pub async fn grade_attempt(
        &self,
        attempt_id: AttemptID,
        score: f64,
        feedback: &str,
    ) -> Result<Value, Error> {
        let body = json!({ "score": score, "feedback": feedback });
        self.post_json(
            &format!("/api/quizzes/attempts/{}/grade/", attempt_id),
            Some(&body),
        )
        .await
    }

    /// Path of the quiz attempts collection, for use with a paginated fetcher.
    pub fn quiz_attempts_path(quiz_id: QuizID) -> String {
        quiz_path(quiz_id, Some("attempts"))
    }
}
