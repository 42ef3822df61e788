use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Host-side pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// Build the build-image.
    Image,
    /// Run the build agent container.
    Packages,
}

impl Task {
    /// All tasks in execution order.
    pub const ALL: [Task; 2] = [Task::Image, Task::Packages];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Image => "image",
            Task::Packages => "packages",
        }
    }
}

impl FromStr for Task {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Task::Image),
            "packages" => Ok(Task::Packages),
            other => Err(ModelError::UnknownTask(other.to_string())),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selected host tasks.
///
/// An empty selection means every task runs. Execution order is always
/// [`Task::ALL`] order, whatever order the selection was given in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSet {
    selected: Vec<Task>,
}

impl TaskSet {
    /// Empty selection (runs everything).
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse task names. Duplicates are ignored.
    pub fn from_names<I, S>(names: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = Vec::new();
        for name in names {
            let task: Task = name.as_ref().parse()?;
            if !selected.contains(&task) {
                selected.push(task);
            }
        }
        Ok(Self { selected })
    }

    /// Returns `true` when no explicit selection was made.
    pub fn is_default(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether `task` runs under this selection.
    pub fn contains(&self, task: Task) -> bool {
        self.is_default() || self.selected.contains(&task)
    }

    /// Tasks to run, in execution order.
    pub fn ordered(&self) -> Vec<Task> {
        Task::ALL
            .into_iter()
            .filter(|t| self.contains(*t))
            .collect()
    }
}

impl fmt::Display for TaskSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.ordered().iter().map(Task::as_str).collect();
        f.write_str(&names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_runs_everything_in_order() {
        let set = TaskSet::from_names(Vec::<String>::new()).unwrap();
        assert!(set.is_default());
        assert_eq!(set.ordered(), vec![Task::Image, Task::Packages]);
    }

    #[test]
    fn order_is_fixed_regardless_of_input() {
        let set = TaskSet::from_names(["packages", "image"]).unwrap();
        assert_eq!(set.ordered(), vec![Task::Image, Task::Packages]);
        assert_eq!(set.to_string(), "image,packages");
    }

    #[test]
    fn packages_only_skips_image() {
        let set = TaskSet::from_names(["packages"]).unwrap();
        assert!(!set.contains(Task::Image));
        assert!(set.contains(Task::Packages));
        assert_eq!(set.ordered(), vec![Task::Packages]);
    }

    #[test]
    fn duplicates_collapse() {
        let set = TaskSet::from_names(["image", "IMAGE", " image "]).unwrap();
        assert_eq!(set.ordered(), vec![Task::Image]);
    }

    #[test]
    fn rejects_unknown_task() {
        let err = TaskSet::from_names(["configure"]).unwrap_err();
        assert!(matches!(err, ModelError::UnknownTask(ref t) if t == "configure"));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Task::Packages).unwrap();
        assert_eq!(json, r#""packages""#);
        let back: Task = serde_json::from_str(r#""image""#).unwrap();
        assert_eq!(back, Task::Image);
    }
}
