use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{EducaError, Result};

const MAX_TITLE_LEN: usize = 255;

/// Course difficulty grade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Iniciante,
    Intermediario,
    Avancado,
}

/// A lesson inside a section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lesson {
    pub id: u64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "subtitulo", default)]
    pub subtitle: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "duracao_minutos", default)]
    pub duration_minutes: u32,
    #[serde(rename = "ordem", default)]
    pub order: u32,
}

/// A section groups the lessons of a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub id: u64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "subtitulo", default)]
    pub subtitle: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "ordem", default)]
    pub order: u32,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// A course and its content hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: u64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "subtitulo", default)]
    pub subtitle: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "grau_dificuldade", default)]
    pub difficulty: Difficulty,
    #[serde(rename = "resumo", default)]
    pub summary: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sections: Vec<Section>,
}

fn default_active() -> bool {
    true
}

impl Section {
    /// Lessons in display order.
    pub fn ordered_lessons(&self) -> Vec<&Lesson> {
        let mut lessons: Vec<&Lesson> = self.lessons.iter().collect();
        lessons.sort_by_key(|l| l.order);
        lessons
    }

    pub fn duration_minutes(&self) -> u64 {
        self.lessons.iter().map(|l| u64::from(l.duration_minutes)).sum()
    }
}

impl Course {
    /// Check titles and that `order` is unique among siblings.
    pub fn validate(&self) -> Result<()> {
        check_title("course", &self.title)?;

        let mut section_orders = HashSet::new();
        for section in &self.sections {
            check_title("section", &section.title)?;
            if !section_orders.insert(section.order) {
                return Err(EducaError::Validation(format!(
                    "course {:?} has more than one section with order {}",
                    self.title, section.order
                )));
            }

            let mut lesson_orders = HashSet::new();
            for lesson in &section.lessons {
                check_title("lesson", &lesson.title)?;
                if !lesson_orders.insert(lesson.order) {
                    return Err(EducaError::Validation(format!(
                        "section {:?} has more than one lesson with order {}",
                        section.title, lesson.order
                    )));
                }
            }
        }

        Ok(())
    }

    /// Sections in display order.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    pub fn lesson_count(&self) -> usize {
        self.sections.iter().map(|s| s.lessons.len()).sum()
    }

    pub fn total_duration_minutes(&self) -> u64 {
        self.sections.iter().map(Section::duration_minutes).sum()
    }

    /// Workload in whole hours, rounded up.
    pub fn workload_hours(&self) -> u64 {
        self.total_duration_minutes().div_ceil(60)
    }
}

fn check_title(kind: &str, title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(EducaError::Validation(format!("{kind} title must not be empty")));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(EducaError::Validation(format!(
            "{kind} title must have at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Filter for listing courses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CourseFilter {
    /// Case-insensitive substring of the category.
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "dificuldade", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Case-insensitive substring of the title or summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        if let Some(ref category) = self.category {
            if !contains_ignore_case(&course.category, category) {
                return false;
            }
        }
        if let Some(difficulty) = self.difficulty {
            if course.difficulty != difficulty {
                return false;
            }
        }
        if let Some(is_active) = self.is_active {
            if course.is_active != is_active {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            if !contains_ignore_case(&course.title, search)
                && !contains_ignore_case(&course.summary, search)
            {
                return false;
            }
        }
        true
    }

    /// Matching courses, in input order.
    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        courses.iter().filter(|c| self.matches(c)).collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
