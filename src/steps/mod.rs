//! Provisioning steps
//!
//! Each step converges one host-state fact toward the target (packages
//! installed, browser resolvable, environment reconciled). Steps run
//! strictly sequentially and return a tagged error on the first failure;
//! nothing retries and nothing compensates.

pub mod browser;
pub mod environment;
pub mod packages;

use crate::error::Result;
use crate::progress::StepOutcome;
use crate::runner::CommandRunner;

pub use browser::BrowserStep;
pub use environment::EnvironmentStep;
pub use packages::PackageStep;

/// One idempotent provisioning step
pub trait ProvisionStep {
    /// Operator-facing step name
    fn name(&self) -> &str;

    /// Converge the host toward this step's target state. Safe to re-run
    /// after partial or full success.
    fn run(&self, runner: &dyn CommandRunner) -> Result<StepOutcome>;
}
