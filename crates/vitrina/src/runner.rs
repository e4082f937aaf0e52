//! Scenario execution and run reporting.
//!
//! A [`ScenarioRunner`] owns the run-wide session and a step catalogue.
//! Each scenario gets a fresh [`ScenarioContext`]; steps run in order and
//! the first failure terminates that scenario (remaining steps are recorded
//! as skipped) without stopping the rest of the run. The browser session is
//! acquired once and released by [`ScenarioRunner::finish`].

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::context::ScenarioContext;
use crate::result::VitrinaResult;
use crate::scenario::{Feature, Scenario};
use crate::session::Session;
use crate::steps::{catalogue, StepRegistry};

/// How one step ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The handler ran and returned Ok
    Passed,
    /// The handler returned an error
    Failed {
        /// Rendered error
        error: String,
    },
    /// An earlier step in the scenario failed
    Skipped,
}

/// Record of one executed (or skipped) step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// Keyword as written in the script
    pub keyword: String,
    /// The dispatched sentence
    pub sentence: String,
    /// How the step ended
    pub outcome: StepOutcome,
    /// Wall-clock duration, zero for skipped steps
    pub duration_ms: u64,
}

/// Record of one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Scenario name from the script
    pub name: String,
    /// Step records in script order
    pub steps: Vec<StepReport>,
    /// Whether every step passed
    pub passed: bool,
    /// Wall-clock duration
    pub duration_ms: u64,
}

impl ScenarioReport {
    /// The first failed step, if any
    pub fn failure(&self) -> Option<&StepReport> {
        self.steps
            .iter()
            .find(|s| matches!(s.outcome, StepOutcome::Failed { .. }))
    }
}

/// Record of a whole feature run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Feature name from the script
    pub feature: String,
    /// Scenario records in script order
    pub scenarios: Vec<ScenarioReport>,
    /// Wall-clock duration
    pub duration_ms: u64,
}

impl RunReport {
    /// Number of scenarios that passed
    pub fn passed_count(&self) -> usize {
        self.scenarios.iter().filter(|s| s.passed).count()
    }

    /// Number of scenarios that failed
    pub fn failed_count(&self) -> usize {
        self.scenarios.len() - self.passed_count()
    }

    /// Whether every scenario passed
    pub fn all_passed(&self) -> bool {
        self.scenarios.iter().all(|s| s.passed)
    }

    /// The failed scenarios
    pub fn failures(&self) -> Vec<&ScenarioReport> {
        self.scenarios.iter().filter(|s| !s.passed).collect()
    }

    /// One-line-per-scenario text summary
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{}: {} passed, {} failed ({} ms)\n",
            self.feature,
            self.passed_count(),
            self.failed_count(),
            self.duration_ms
        );
        for scenario in &self.scenarios {
            let mark = if scenario.passed { "ok" } else { "FAILED" };
            out.push_str(&format!("  {mark} {}\n", scenario.name));
            if let Some(step) = scenario.failure() {
                if let StepOutcome::Failed { error } = &step.outcome {
                    out.push_str(&format!("      {} {}: {error}\n", step.keyword, step.sentence));
                }
            }
        }
        out
    }
}

/// Drives scenarios against a step catalogue over one session.
#[derive(Debug)]
pub struct ScenarioRunner {
    session: Session,
    registry: StepRegistry,
}

impl ScenarioRunner {
    /// Build a runner over an explicit registry
    pub fn new(session: Session, registry: StepRegistry) -> Self {
        Self { session, registry }
    }

    /// Build a runner over the default storefront catalogue.
    ///
    /// # Errors
    ///
    /// Propagates catalogue construction errors.
    pub fn with_catalogue(session: Session) -> VitrinaResult<Self> {
        Ok(Self::new(session, catalogue()?))
    }

    /// The registry scenarios are dispatched against
    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Run every scenario of a feature
    pub async fn run_feature(&self, feature: &Feature) -> RunReport {
        let started = Instant::now();
        info!(feature = %feature.name, scenarios = feature.scenarios.len(), "feature started");
        let mut scenarios = Vec::with_capacity(feature.scenarios.len());
        for scenario in &feature.scenarios {
            scenarios.push(self.run_scenario(scenario).await);
        }
        let report = RunReport {
            feature: feature.name.clone(),
            scenarios,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        info!(
            feature = %report.feature,
            passed = report.passed_count(),
            failed = report.failed_count(),
            "feature finished"
        );
        report
    }

    /// Parse a feature script and run it.
    ///
    /// # Errors
    ///
    /// Returns a parse error before any step runs.
    pub async fn run_script(&self, script: &str) -> VitrinaResult<RunReport> {
        let feature = Feature::parse(script)?;
        Ok(self.run_feature(&feature).await)
    }

    /// Run one scenario with a fresh context
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioReport {
        let started = Instant::now();
        let ctx = ScenarioContext::new(self.session.clone());
        info!(scenario = %scenario.name, "scenario started");

        let mut steps = Vec::with_capacity(scenario.steps.len());
        let mut failed = false;
        for line in &scenario.steps {
            if failed {
                steps.push(StepReport {
                    keyword: line.keyword.as_str().to_string(),
                    sentence: line.sentence.clone(),
                    outcome: StepOutcome::Skipped,
                    duration_ms: 0,
                });
                continue;
            }
            let step_started = Instant::now();
            let outcome = match self.registry.execute(&ctx, &line.sentence).await {
                Ok(()) => StepOutcome::Passed,
                Err(err) => {
                    warn!(
                        scenario = %scenario.name,
                        step = %line.sentence,
                        error = %err,
                        "step failed"
                    );
                    failed = true;
                    StepOutcome::Failed {
                        error: err.to_string(),
                    }
                }
            };
            steps.push(StepReport {
                keyword: line.keyword.as_str().to_string(),
                sentence: line.sentence.clone(),
                outcome,
                duration_ms: u64::try_from(step_started.elapsed().as_millis()).unwrap_or(u64::MAX),
            });
        }

        ScenarioReport {
            name: scenario.name.clone(),
            steps,
            passed: !failed,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Release the browser session. Always call this, even after failures.
    ///
    /// # Errors
    ///
    /// Propagates driver shutdown errors.
    pub async fn finish(self) -> VitrinaResult<()> {
        self.session.quit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDriver;
    use crate::result::VitrinaError;
    use crate::steps::StepRegistry;
    use std::sync::Arc;

    fn runner_with(registry: StepRegistry) -> (Arc<MockDriver>, ScenarioRunner) {
        let driver = Arc::new(MockDriver::new());
        let session = Session::new(driver.clone());
        (driver, ScenarioRunner::new(session, registry))
    }

    fn toy_registry() -> StepRegistry {
        let mut registry = StepRegistry::new();
        registry
            .register("a passing step", |_ctx, _args| Box::pin(async { Ok(()) }))
            .unwrap();
        registry
            .register("a failing step", |_ctx, _args| {
                Box::pin(async {
                    Err(VitrinaError::AssertionFailed {
                        message: "expected calm, got chaos".to_string(),
                    })
                })
            })
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn test_failure_skips_rest_of_scenario_only() {
        let (_, runner) = runner_with(toy_registry());
        let report = runner
            .run_script(
                "Feature: Toy\n\
                 Scenario: Breaks midway\n\
                   Given a passing step\n\
                   When a failing step\n\
                   Then a passing step\n\
                 Scenario: Still runs\n\
                   Given a passing step\n",
            )
            .await
            .unwrap();

        assert_eq!(report.scenarios.len(), 2);
        let broken = &report.scenarios[0];
        assert!(!broken.passed);
        assert_eq!(broken.steps[0].outcome, StepOutcome::Passed);
        assert!(matches!(broken.steps[1].outcome, StepOutcome::Failed { .. }));
        assert_eq!(broken.steps[2].outcome, StepOutcome::Skipped);
        assert!(report.scenarios[1].passed);
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_passed());
    }

    #[tokio::test]
    async fn test_undefined_sentence_fails_the_scenario() {
        let (_, runner) = runner_with(toy_registry());
        let report = runner
            .run_script("Feature: Toy\nScenario: Typo\n  Given a pasing step\n")
            .await
            .unwrap();
        let failure = report.scenarios[0].failure().unwrap();
        assert!(matches!(&failure.outcome, StepOutcome::Failed { error } if error.contains("a pasing step")));
    }

    #[tokio::test]
    async fn test_finish_quits_driver() {
        let (driver, runner) = runner_with(toy_registry());
        runner.finish().await.unwrap();
        assert!(driver.is_quit());
    }

    #[tokio::test]
    async fn test_summary_names_failed_step() {
        let (_, runner) = runner_with(toy_registry());
        let report = runner
            .run_script("Feature: Toy\nScenario: Breaks\n  Given a failing step\n")
            .await
            .unwrap();
        let summary = report.summary();
        assert!(summary.contains("FAILED Breaks"));
        assert!(summary.contains("expected calm, got chaos"));
    }

    #[tokio::test]
    async fn test_report_serializes() {
        let (_, runner) = runner_with(toy_registry());
        let report = runner
            .run_script("Feature: Toy\nScenario: Fine\n  Given a passing step\n")
            .await
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["feature"], "Toy");
        assert_eq!(json["scenarios"][0]["steps"][0]["outcome"], "passed");
    }
}
