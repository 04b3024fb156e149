// config.rs — Planner configuration.
//
// PlannerConfig determines where the planner stores its state. The
// `for_project()` constructor generates sensible defaults under a
// `.canvass/` directory in the project root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the Canvass planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Root directory of the planning project.
    pub project_root: PathBuf,

    /// Directory holding the snapshot files (one JSON file per key).
    pub data_dir: PathBuf,
}

impl PlannerConfig {
    /// Create a config with the standard `.canvass/` layout for a project.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let root = project_root.as_ref().to_path_buf();
        let data_dir = root.join(".canvass");
        Self {
            project_root: root,
            data_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_lives_under_project_root() {
        let config = PlannerConfig::for_project("/tmp/my-campaign");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/my-campaign/.canvass"));
    }
}
