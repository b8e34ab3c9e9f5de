//! Sequential provisioning pipeline
//!
//! Runs the steps strictly in order and short-circuits on the first error.
//! No retries, no compensation: provisioning is an operator-driven,
//! re-runnable action, so the recovery story is "fix the cause, run again".

use std::path::Path;

use crate::config::ProvisionConfig;
use crate::error::Result;
use crate::progress::ProgressDisplay;
use crate::runner::CommandRunner;
use crate::steps::{BrowserStep, EnvironmentStep, PackageStep, ProvisionStep};

/// The standard three-step pipeline for an app dir
pub fn standard_steps(app_dir: &Path, config: &ProvisionConfig) -> Vec<Box<dyn ProvisionStep>> {
    vec![
        Box::new(PackageStep::new(config.packages.clone())),
        Box::new(BrowserStep::new(config.browser.clone())),
        Box::new(EnvironmentStep::new(
            app_dir.join(&config.environment.venv_dir),
            app_dir.join(&config.environment.manifest),
        )),
    ]
}

/// Run the steps in order, aborting on the first failure
pub fn run(steps: &[Box<dyn ProvisionStep>], runner: &dyn CommandRunner) -> Result<()> {
    let display = ProgressDisplay::new(steps.len() as u64);

    for (index, step) in steps.iter().enumerate() {
        display.start_step(step.name(), index as u64 + 1);
        match step.run(runner) {
            Ok(outcome) => display.finish_step(step.name(), outcome),
            Err(e) => {
                display.abandon();
                return Err(e);
            }
        }
    }

    display.finish();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrowserConfig;
    use crate::error::HostprepError;
    use crate::runner::mock::MockRunner;
    use crate::steps::BrowserStep;
    use tempfile::TempDir;

    fn missing(_command: &str) -> bool {
        false
    }

    fn resolves(_command: &str) -> bool {
        true
    }

    fn test_steps(temp: &TempDir, probe: fn(&str) -> bool) -> Vec<Box<dyn ProvisionStep>> {
        let app_dir = temp.path();
        std::fs::write(app_dir.join("requirements.txt"), "fastapi\n").unwrap();
        let config = ProvisionConfig {
            browser: BrowserConfig {
                sources_list: app_dir.join("google-chrome.list"),
                ..BrowserConfig::default()
            },
            ..ProvisionConfig::default()
        };
        let mut steps = standard_steps(app_dir, &config);
        steps[1] = Box::new(
            BrowserStep::new(config.browser.clone())
                .with_probe(probe)
                .with_artifact_dir(app_dir.join("artifacts")),
        );
        steps
    }

    #[test]
    fn test_full_pipeline_order() {
        let temp = TempDir::new().unwrap();
        let steps = test_steps(&temp, resolves);
        let mock = MockRunner::new();
        run(&steps, &mock).unwrap();

        let lines = mock.command_lines();
        // packages (2), browser skipped by check gate, environment (3)
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "apt-get update");
        assert!(lines[1].starts_with("apt-get install -y"));
        assert!(lines[2].starts_with("python3 -m venv"));
    }

    #[test]
    fn test_first_failure_short_circuits() {
        let temp = TempDir::new().unwrap();
        let steps = test_steps(&temp, resolves);
        let mock = MockRunner::new();
        mock.push_outcome(false); // apt-get update
        let err = run(&steps, &mock).unwrap_err();
        assert!(matches!(err, HostprepError::PackageIndexFailed { .. }));
        assert_eq!(mock.invocations().len(), 1);
    }

    #[test]
    fn test_browser_failure_prevents_environment_step() {
        let temp = TempDir::new().unwrap();
        let steps = test_steps(&temp, missing);
        let mock = MockRunner::new();
        mock.push_outcome(true); // apt-get update
        mock.push_outcome(true); // apt-get install
        mock.push_outcome(false); // wget -c (primary)
        mock.push_outcome(true); // key fetch
        mock.push_outcome(true); // apt-key add
        mock.push_outcome(true); // apt-get update (repo)
        mock.push_outcome(false); // repo install (fallback fails too)
        let err = run(&steps, &mock).unwrap_err();
        assert!(matches!(err, HostprepError::BrowserUnavailable { .. }));

        // the environment step never executed
        let lines = mock.command_lines();
        assert!(lines.iter().all(|line| !line.contains("venv")));
    }
}
