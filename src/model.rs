use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type TaskIndex = usize;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Work,
    School,
    Health,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub text: String,
    pub category: Category,
    pub completed: bool,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TaskError {
    #[error("task index {index} out of range (have {len} tasks)")]
    IndexOutOfRange { index: TaskIndex, len: usize },
    #[error("task text must not be empty")]
    EmptyText,
    #[error("unknown category: {0} (expected personal, work, school or health)")]
    UnknownCategory(String),
    #[error("task store is malformed, refusing to overwrite it: {0}")]
    MalformedStore(String),
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Personal,
        Category::Work,
        Category::School,
        Category::Health,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::School => "school",
            Category::Health => "health",
        }
    }

    pub fn accent_rgb(&self) -> (u8, u8, u8) {
        match self {
            Category::Personal => (0xff, 0x4f, 0xd8),
            Category::Work => (0x4d, 0xd2, 0xff),
            Category::School => (0x7b, 0xff, 0xb1),
            Category::Health => (0xff, 0xc4, 0x6b),
        }
    }

    pub fn position(&self) -> usize {
        match self {
            Category::Personal => 0,
            Category::Work => 1,
            Category::School => 2,
            Category::Health => 3,
        }
    }

    pub fn next(&self) -> Category {
        Category::ALL[(self.position() + 1) % Category::ALL.len()]
    }

    pub fn prev(&self) -> Category {
        Category::ALL[(self.position() + Category::ALL.len() - 1) % Category::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == wanted)
            .ok_or_else(|| TaskError::UnknownCategory(s.trim().to_string()))
    }
}

impl Task {
    pub fn new(text: &str, category: Category) -> Result<Self, TaskError> {
        let text = clean_text(text)?;
        Ok(Task {
            text,
            category,
            completed: false,
        })
    }
}

pub fn clean_text(text: &str) -> Result<String, TaskError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyText);
    }
    Ok(trimmed.to_string())
}

pub fn check_index(tasks: &[Task], index: TaskIndex) -> Result<(), TaskError> {
    if index >= tasks.len() {
        return Err(TaskError::IndexOutOfRange {
            index,
            len: tasks.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(" Work ".parse::<Category>(), Ok(Category::Work));
        assert_eq!("HEALTH".parse::<Category>(), Ok(Category::Health));
        assert_eq!(
            "chores".parse::<Category>(),
            Err(TaskError::UnknownCategory("chores".into()))
        );
    }

    #[test]
    fn category_cycles_through_all_four() {
        let mut c = Category::Personal;
        for _ in 0..4 {
            c = c.next();
        }
        assert_eq!(c, Category::Personal);
        assert_eq!(Category::Personal.prev(), Category::Health);
    }

    #[test]
    fn new_task_is_open_and_trimmed() {
        let task = Task::new("  Buy milk ", Category::Personal).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert_eq!(Task::new("   ", Category::Work), Err(TaskError::EmptyText));
    }

    #[test]
    fn task_serializes_with_lowercase_category() {
        let task = Task::new("Run", Category::Health).unwrap();
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"text":"Run","category":"health","completed":false}"#);
    }
}
