//! Task-to-model routing table.
//!
//! Maps each [`TaskType`] to a backend model identifier. The table is filled
//! from configuration once at startup and read-only afterwards; per-task
//! entries are optional and resolution falls back to the `general` entry.

use crate::task::TaskType;

/// Mapping from task category to backend model identifier.
#[derive(Debug, Clone, Default)]
pub struct ModelMap {
    pub code: Option<String>,
    pub math: Option<String>,
    pub creative: Option<String>,
    pub general: Option<String>,
}

impl ModelMap {
    /// Resolve the model for a task, falling back to the general entry.
    ///
    /// Returns `None` only when neither the task's own entry nor a general
    /// model is configured, a configuration error the caller must surface.
    pub fn model_for(&self, task: TaskType) -> Option<&str> {
        let entry = match task {
            TaskType::Code => &self.code,
            TaskType::Math => &self.math,
            TaskType::Creative => &self.creative,
            TaskType::General => &self.general,
        };
        entry.as_deref().or(self.general.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> ModelMap {
        ModelMap {
            code: Some("coder".into()),
            math: Some("mathlete".into()),
            creative: Some("poet".into()),
            general: Some("allrounder".into()),
        }
    }

    #[test]
    fn resolves_per_task_entries() {
        let map = full_map();
        assert_eq!(map.model_for(TaskType::Code), Some("coder"));
        assert_eq!(map.model_for(TaskType::Math), Some("mathlete"));
        assert_eq!(map.model_for(TaskType::Creative), Some("poet"));
        assert_eq!(map.model_for(TaskType::General), Some("allrounder"));
    }

    #[test]
    fn missing_entry_falls_back_to_general() {
        let map = ModelMap {
            creative: None,
            ..full_map()
        };
        assert_eq!(map.model_for(TaskType::Creative), Some("allrounder"));
    }

    #[test]
    fn empty_map_resolves_nothing() {
        let map = ModelMap::default();
        assert_eq!(map.model_for(TaskType::Code), None);
        assert_eq!(map.model_for(TaskType::General), None);
    }
}
