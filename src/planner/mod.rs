//! Boundary to the external reconfiguration path planner.
//!
//! The planner is opaque: it takes initial and final lattice configurations
//! as JSON and answers with scenario text. This module builds the JSON
//! ([`LatticeConfig`]), defines the call ([`PathPlanner`]), and parses the
//! answer back into a [`Scenario`].

mod config;

use std::path::PathBuf;
use std::process::Command;

pub use config::{ConfigModule, LatticeConfig};

use crate::error::MetavisError;
use crate::scenario::Scenario;

/// Something that turns two configuration documents into scenario text.
pub trait PathPlanner {
    /// Plan a reconfiguration from `initial` to `final_`, both planner JSON.
    fn plan(&self, initial: &str, final_: &str) -> Result<String, MetavisError>;
}

impl<F> PathPlanner for F
where
    F: Fn(&str, &str) -> Result<String, MetavisError>,
{
    fn plan(&self, initial: &str, final_: &str) -> Result<String, MetavisError> {
        self(initial, final_)
    }
}

/// Serialize both configurations, run `planner`, and parse its scenario.
pub fn plan_scenario(
    planner: &dyn PathPlanner,
    initial: &LatticeConfig,
    final_: &LatticeConfig,
) -> Result<Scenario, MetavisError> {
    let initial_json = initial.to_json()?;
    let final_json = final_.to_json()?;
    log::info!(
        "planning {} modules ({} mobile)",
        initial.modules.len(),
        initial.mobile_modules().count()
    );
    let text = planner.plan(&initial_json, &final_json)?;
    text.parse().map_err(|e| match e {
        MetavisError::ScenarioParse { line, message } => MetavisError::Planner(
            format!("planner output line {line}: {message}"),
        ),
        other => other,
    })
}

/// Runs a planner executable that reads its configurations from files and
/// writes a scenario file (`-I <initial> -F <final> -e <export>`).
#[derive(Debug, Clone)]
pub struct CommandPlanner {
    /// Planner executable.
    pub program: PathBuf,
    /// Directory the configuration and scenario files are written to.
    pub work_dir: PathBuf,
    /// Extra arguments passed before the file arguments.
    pub args: Vec<String>,
}

impl CommandPlanner {
    /// Planner at `program` using `work_dir` for its files.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            work_dir: work_dir.into(),
            args: Vec::new(),
        }
    }
}

impl PathPlanner for CommandPlanner {
    fn plan(&self, initial: &str, final_: &str) -> Result<String, MetavisError> {
        std::fs::create_dir_all(&self.work_dir)?;
        let initial_path = self.work_dir.join("initial.json");
        let final_path = self.work_dir.join("final.json");
        let export_path = self.work_dir.join("plan.scen");
        std::fs::write(&initial_path, initial)?;
        std::fs::write(&final_path, final_)?;

        log::debug!("running planner {}", self.program.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("-I")
            .arg(&initial_path)
            .arg("-F")
            .arg(&final_path)
            .arg("-e")
            .arg(&export_path)
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MetavisError::Planner(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(std::fs::read_to_string(&export_path)?)
    }
}
