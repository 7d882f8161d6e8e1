//! Lesson progress and course completion certificates.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::course::Course;
use crate::error::{EducaError, Result};

pub const CERTIFICATE_PREFIX: &str = "CERT-";
pub const CERTIFICATE_CODE_LEN: usize = 12;

const CERTIFICATE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MAX_CODE_ATTEMPTS: usize = 10;

/// How far a learner got in one lesson.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LessonProgress {
    pub user_id: Uuid,
    pub lesson_id: u64,
    #[serde(default)]
    pub completed: bool,
    /// Seconds into the lesson video.
    #[serde(default)]
    pub current_time: u32,
    pub updated_at: DateTime<Utc>,
}

impl LessonProgress {
    pub fn new(user_id: Uuid, lesson_id: u64) -> Self {
        Self {
            user_id,
            lesson_id,
            completed: false,
            current_time: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn record_position(&mut self, seconds: u32) {
        self.current_time = seconds;
        self.updated_at = Utc::now();
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
        self.updated_at = Utc::now();
    }
}

/// A finished course and the certificate issued for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseCompletion {
    pub user_id: Uuid,
    pub course_id: u64,
    pub completed_at: DateTime<Utc>,
    pub certificate_code: String,
    pub total_hours: u64,
}

/// Generate a code of the form `CERT-XXXXXXXXXXXX` (uppercase letters and digits).
pub fn generate_certificate_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..CERTIFICATE_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CERTIFICATE_CHARSET.len());
            CERTIFICATE_CHARSET[idx] as char
        })
        .collect();
    format!("{CERTIFICATE_PREFIX}{suffix}")
}

/// Progress and completion records, unique per (user, lesson) and
/// (user, course).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProgressBook {
    #[serde(default)]
    lessons: Vec<LessonProgress>,
    #[serde(default)]
    completions: Vec<CourseCompletion>,
}

impl ProgressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a progress record for a lesson the user has not started yet.
    pub fn start_lesson(&mut self, user_id: Uuid, lesson_id: u64) -> Result<&mut LessonProgress> {
        if self.lesson(user_id, lesson_id).is_some() {
            return Err(EducaError::Conflict(format!(
                "progress for lesson {lesson_id} already exists for user {user_id}"
            )));
        }
        let index = self.lessons.len();
        self.lessons.push(LessonProgress::new(user_id, lesson_id));
        Ok(&mut self.lessons[index])
    }

    pub fn lesson(&self, user_id: Uuid, lesson_id: u64) -> Option<&LessonProgress> {
        self.lessons
            .iter()
            .find(|p| p.user_id == user_id && p.lesson_id == lesson_id)
    }

    pub fn lesson_mut(&mut self, user_id: Uuid, lesson_id: u64) -> Result<&mut LessonProgress> {
        self.lessons
            .iter_mut()
            .find(|p| p.user_id == user_id && p.lesson_id == lesson_id)
            .ok_or_else(|| {
                EducaError::NotFound(format!(
                    "no progress for lesson {lesson_id} and user {user_id}"
                ))
            })
    }

    /// Lessons of `course` the user has completed.
    pub fn completed_lessons(&self, user_id: Uuid, course: &Course) -> usize {
        course
            .sections
            .iter()
            .flat_map(|s| &s.lessons)
            .filter(|l| {
                self.lesson(user_id, l.id)
                    .map(|p| p.completed)
                    .unwrap_or(false)
            })
            .count()
    }

    /// Completed share of the course's lessons, 0..=100, rounded down.
    pub fn completion_percent(&self, user_id: Uuid, course: &Course) -> u8 {
        let total = course.lesson_count();
        if total == 0 {
            return 0;
        }
        let done = self.completed_lessons(user_id, course);
        (done * 100 / total).min(100) as u8
    }

    /// Record that the user finished `course` and issue its certificate.
    ///
    /// A supplied code is kept as given; otherwise one is generated.
    pub fn complete_course(
        &mut self,
        user_id: Uuid,
        course: &Course,
        certificate_code: Option<&str>,
    ) -> Result<&CourseCompletion> {
        if self
            .completions
            .iter()
            .any(|c| c.user_id == user_id && c.course_id == course.id)
        {
            return Err(EducaError::Conflict(format!(
                "user {user_id} already completed course {}",
                course.id
            )));
        }

        let certificate_code = match certificate_code {
            Some(supplied) => {
                let code = supplied.trim();
                if code.is_empty() {
                    return Err(EducaError::Validation(
                        "certificate code must not be empty".into(),
                    ));
                }
                if self.code_in_use(code) {
                    return Err(EducaError::Conflict(format!(
                        "certificate code {code} is already in use"
                    )));
                }
                code.to_string()
            }
            None => self.unused_code()?,
        };

        let completion = CourseCompletion {
            user_id,
            course_id: course.id,
            completed_at: Utc::now(),
            certificate_code,
            total_hours: course.workload_hours(),
        };
        info!(
            user_id = %user_id,
            course_id = course.id,
            certificate = %completion.certificate_code,
            "Course completed"
        );

        let index = self.completions.len();
        self.completions.push(completion);
        Ok(&self.completions[index])
    }

    pub fn find_by_code(&self, certificate_code: &str) -> Result<&CourseCompletion> {
        self.completions
            .iter()
            .find(|c| c.certificate_code == certificate_code)
            .ok_or_else(|| {
                EducaError::NotFound(format!("certificate {certificate_code} does not exist"))
            })
    }

    /// The user's certificates, newest first.
    pub fn completions_for(&self, user_id: Uuid) -> Vec<&CourseCompletion> {
        let mut completions: Vec<&CourseCompletion> = self
            .completions
            .iter()
            .filter(|c| c.user_id == user_id)
            .collect();
        completions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        completions
    }

    fn code_in_use(&self, code: &str) -> bool {
        self.completions.iter().any(|c| c.certificate_code == code)
    }

    fn unused_code(&self) -> Result<String> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_certificate_code();
            if !self.code_in_use(&code) {
                return Ok(code);
            }
        }
        Err(EducaError::Conflict(
            "could not generate an unused certificate code".into(),
        ))
    }
}
