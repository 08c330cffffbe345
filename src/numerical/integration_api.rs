//! # Integration task
//!
//! `IntegrationTask` holds everything a comparison needs (function, bounds, precision
//! settings, selected methods) and runs it in one call:
//! ```
//! use RustedQuad::numerical::integration_api::IntegrationTask;
//! use RustedQuad::numerical::quadrature::QuadMethod;
//! let mut task = IntegrationTask::new();
//! task.set_expression("sin(x)");
//! task.set_bounds(0.0, std::f64::consts::PI).unwrap();
//! task.toggle_method(QuadMethod::SimpsonThreeEighths);
//! task.set_loglevel(Some("off")).unwrap();
//! let report = task.solve().unwrap();
//! let simpson = report.result_for(QuadMethod::SimpsonOneThird).unwrap();
//! assert!((simpson.value - 2.0).abs() < 1e-6);
//! ```
//! The same task can be described by a document:
//! ```text
//! function expression: "sin(x) + x^2"
//! bounds lower: 0 upper: 3.14159
//! settings intervals: 100 samples: 1000 methods: trapezoidal, simpson, monte-carlo
//! run seed: 42 loglevel: info log_to_file: false
//! ```
use crate::Utils::task_parser::{DocumentMap, TaskDocument, template_from};
use crate::numerical::convergence::{ConvergenceSeries, analyze_convergence_with_rng};
use crate::numerical::integration_errors::{IntegrationError, validate_bounds, validate_count};
use crate::numerical::monte_carlo::monte_carlo_with_rng;
use crate::numerical::quadrature::{IntegrationResult, QuadMethod, integrate};
use crate::numerical::reference_error::{ErrorMetrics, reference_value};
use crate::numerical::visualization::{
    MAX_VISUALIZED_COUNT, MAX_VISUALIZED_SAMPLES, VisualizationData,
    generate_visualization_with_rng,
};
use crate::symbolic::symbolic_lambdify::compile_for_bounds;
use chrono::{DateTime, Local, SecondsFormat, Utc};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use simplelog::*;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use tabled::{builder::Builder, settings::Style};

pub const DEFAULT_EXPRESSION: &str = "x**2";
pub const DEFAULT_LOWER: f64 = 0.0;
pub const DEFAULT_UPPER: f64 = 1.0;
pub const DEFAULT_INTERVALS: usize = 100;
pub const DEFAULT_SAMPLES: usize = 1000;

fn default_methods() -> BTreeSet<QuadMethod> {
    BTreeSet::from([QuadMethod::Trapezoidal, QuadMethod::SimpsonOneThird])
}

/// "off" and "none" disable logging, anything else must name a level
fn parse_loglevel(level: &str) -> Result<LevelFilter, IntegrationError> {
    match level {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        other => Err(IntegrationError::TaskFile(format!(
            "loglevel must be debug, info, warn, error, off or none, got '{}'",
            other
        ))),
    }
}

fn task_template() -> DocumentMap {
    template_from(&[
        ("function", &["expression"][..]),
        ("bounds", &["lower", "upper"][..]),
        ("settings", &["intervals", "samples", "methods"][..]),
        ("run", &["seed", "loglevel", "log_to_file"][..]),
    ])
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationTask {
    pub expression: String,
    pub lower: f64,
    pub upper: f64,
    /// interval count of the Newton-Cotes rules
    pub intervals: usize,
    /// sample count of Monte Carlo
    pub samples: usize,
    /// iterated in the fixed order of `QuadMethod`
    pub methods: BTreeSet<QuadMethod>,
    /// seeds every random draw of a run; `None` takes fresh entropy
    pub seed: Option<u64>,
    pub loglevel: Option<String>,
    pub log_to_file: bool,
}

impl Default for IntegrationTask {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegrationTask {
    pub fn new() -> Self {
        IntegrationTask {
            expression: DEFAULT_EXPRESSION.to_string(),
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
            intervals: DEFAULT_INTERVALS,
            samples: DEFAULT_SAMPLES,
            methods: default_methods(),
            seed: None,
            loglevel: Some("info".to_string()),
            log_to_file: false,
        }
    }

    /// Builds a task from a task document; absent keys keep their defaults.
    pub fn from_task_document(document: &str) -> Result<Self, IntegrationError> {
        let template = task_template();
        let document = TaskDocument::parse(document, Some(&template))?;
        Self::from_parsed(&document)
    }

    pub fn from_task_file<P: AsRef<Path>>(path: P) -> Result<Self, IntegrationError> {
        let template = task_template();
        let document = TaskDocument::from_file(path, Some(&template))?;
        Self::from_parsed(&document)
    }

    fn from_parsed(document: &TaskDocument) -> Result<Self, IntegrationError> {
        let mut task = IntegrationTask::new();
        if let Some(expression) = document.get_string("function", "expression")? {
            task.set_expression(&expression);
        }
        let lower = document.get_f64("bounds", "lower")?.unwrap_or(task.lower);
        let upper = document.get_f64("bounds", "upper")?.unwrap_or(task.upper);
        task.set_bounds(lower, upper)?;
        if let Some(intervals) = document.get_usize("settings", "intervals")? {
            task.set_intervals(intervals)?;
        }
        if let Some(samples) = document.get_usize("settings", "samples")? {
            task.set_samples(samples)?;
        }
        if let Some(names) = document.get_strings("settings", "methods") {
            let methods = names
                .iter()
                .map(|name| {
                    QuadMethod::from_str(name).map_err(|_| {
                        IntegrationError::TaskFile(format!("unknown method '{}'", name))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            task.set_methods(&methods);
        }
        task.set_seed(document.get_u64("run", "seed")?);
        if let Some(level) = document.get_string("run", "loglevel")? {
            task.set_loglevel(Some(&level))?;
        }
        if let Some(to_file) = document.get_bool("run", "log_to_file")? {
            task.set_log_to_file(to_file);
        }
        Ok(task)
    }

    pub fn set_expression(&mut self, expression: &str) {
        self.expression = expression.trim().to_string();
    }

    pub fn set_bounds(&mut self, lower: f64, upper: f64) -> Result<(), IntegrationError> {
        validate_bounds(lower, upper)?;
        self.lower = lower;
        self.upper = upper;
        Ok(())
    }

    pub fn set_intervals(&mut self, intervals: usize) -> Result<(), IntegrationError> {
        validate_count(QuadMethod::Trapezoidal, intervals)?;
        self.intervals = intervals;
        Ok(())
    }

    pub fn set_samples(&mut self, samples: usize) -> Result<(), IntegrationError> {
        validate_count(QuadMethod::MonteCarlo, samples)?;
        self.samples = samples;
        Ok(())
    }

    /// selects `method` if it was not selected and deselects it otherwise; returns the new state
    pub fn toggle_method(&mut self, method: QuadMethod) -> bool {
        if self.methods.remove(&method) {
            false
        } else {
            self.methods.insert(method)
        }
    }

    pub fn set_methods(&mut self, methods: &[QuadMethod]) {
        self.methods = methods.iter().copied().collect();
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    pub fn set_loglevel(&mut self, loglevel: Option<&str>) -> Result<(), IntegrationError> {
        if let Some(level) = loglevel {
            parse_loglevel(level)?;
        }
        self.loglevel = loglevel.map(str::to_string);
        Ok(())
    }

    pub fn set_log_to_file(&mut self, to_file: bool) {
        self.log_to_file = to_file;
    }

    /// back to the defaults of a fresh task
    pub fn reset(&mut self) {
        *self = IntegrationTask::new();
    }

    fn count_for(&self, method: QuadMethod) -> usize {
        if method.is_interval_based() {
            self.intervals
        } else {
            self.samples
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Compiles the function, computes the reference value and runs every selected
    /// method with error metrics and visualization data. The first failure aborts the run.
    pub fn solver(&self) -> Result<IntegrationReport, IntegrationError> {
        if self.methods.is_empty() {
            return Err(IntegrationError::NoMethodSelected);
        }
        let (a, b) = (self.lower, self.upper);
        let f = compile_for_bounds(&self.expression, a, b)?;
        let reference = reference_value(&f, a, b)?;
        let mut rng = self.rng();

        let mut results = Vec::with_capacity(self.methods.len());
        let mut visualizations = Vec::with_capacity(self.methods.len());
        for &method in &self.methods {
            let count = self.count_for(method);
            let result = match method {
                QuadMethod::MonteCarlo => monte_carlo_with_rng(&f, a, b, count, &mut rng)?,
                _ => integrate(method, &f, a, b, count)?,
            }
            .with_reference(reference);
            info!(
                "{}: {} ({} {}), absolute error {:e}",
                method,
                result.value,
                result.sample_count,
                method.count_unit(),
                result.error.map_or(0.0, |e| e.absolute)
            );
            let visualized = match method {
                QuadMethod::MonteCarlo => count.min(MAX_VISUALIZED_SAMPLES),
                _ => count.min(MAX_VISUALIZED_COUNT),
            };
            let visualization =
                generate_visualization_with_rng(method, &f, a, b, visualized, &mut rng)?;
            visualizations.push(visualization);
            results.push(result);
        }

        let report = IntegrationReport {
            expression: self.expression.clone(),
            lower: a,
            upper: b,
            reference_value: reference,
            results,
            visualizations,
            timestamp: Utc::now(),
        };
        info!("\n \n INTEGRATION RESULTS \n \n {}", report.results_table());
        Ok(report)
    }

    /// wrapper around solver function to implement logging
    pub fn solve(&self) -> Result<IntegrationReport, IntegrationError> {
        let level = match self.loglevel.as_deref() {
            Some(level) => parse_loglevel(level)?,
            None => LevelFilter::Info,
        };
        if level == LevelFilter::Off {
            return self.solver();
        }
        let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )];
        if self.log_to_file {
            let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
            let name = format!("integration_log_{}.txt", date_and_time);
            match File::create(&name) {
                Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
                Err(e) => eprintln!("cannot create log file {}: {}", name, e),
            }
        }
        // a logger installed by an earlier run stays in place
        let _ = CombinedLogger::init(loggers);
        let report = self.solver();
        if let Err(ref e) = report {
            warn!("integration failed: {}", e);
        }
        report
    }

    /// Convergence series of `method` for this task's function and bounds.
    pub fn analyze_convergence(
        &self,
        method: QuadMethod,
        steps: usize,
    ) -> Result<ConvergenceSeries, IntegrationError> {
        let f = compile_for_bounds(&self.expression, self.lower, self.upper)?;
        analyze_convergence_with_rng(&f, self.lower, self.upper, method, steps, &mut self.rng())
    }
}

/// Everything one run produced, results in method order.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationReport {
    pub expression: String,
    pub lower: f64,
    pub upper: f64,
    pub reference_value: f64,
    pub results: Vec<IntegrationResult>,
    pub visualizations: Vec<VisualizationData>,
    pub timestamp: DateTime<Utc>,
}

impl IntegrationReport {
    pub fn result_for(&self, method: QuadMethod) -> Option<&IntegrationResult> {
        self.results.iter().find(|r| r.method == method)
    }

    pub fn visualization_for(&self, method: QuadMethod) -> Option<&VisualizationData> {
        self.visualizations.iter().find(|v| v.method == method)
    }

    /// method with the smallest absolute error
    pub fn most_accurate(&self) -> Option<&IntegrationResult> {
        self.results
            .iter()
            .filter(|r| r.error.is_some())
            .min_by(|x, y| {
                let ex = x.error.map_or(f64::INFINITY, |e| e.absolute);
                let ey = y.error.map_or(f64::INFINITY, |e| e.absolute);
                ex.total_cmp(&ey)
            })
    }

    pub fn to_export(&self) -> ExportDocument {
        ExportDocument {
            timestamp: self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            function: self.expression.clone(),
            bounds: ExportBounds {
                lower: self.lower,
                upper: self.upper,
            },
            reference_value: self.reference_value,
            results: self.results.iter().map(ExportEntry::from).collect(),
        }
    }

    pub fn results_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record([
            "method",
            "result",
            "count",
            "absolute error",
            "relative error",
            "time, ms",
        ]);
        for r in &self.results {
            let (absolute, relative) = match r.error {
                Some(e) if e.relative_is_absolute => {
                    (format!("{:e}", e.absolute), format!("{:e} (abs)", e.relative))
                }
                Some(e) => (format!("{:e}", e.absolute), format!("{:.6}%", e.relative)),
                None => ("-".to_string(), "-".to_string()),
            };
            builder.push_record([
                r.method_name(),
                format!("{:.10}", r.value),
                format!("{} {}", r.sample_count, r.method.count_unit()),
                absolute,
                relative,
                format!("{:.4}", r.elapsed_time_ms),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportBounds {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEntry {
    pub method: String,
    pub result: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervals: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<usize>,
    pub execution_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorMetrics>,
}

impl From<&IntegrationResult> for ExportEntry {
    fn from(r: &IntegrationResult) -> Self {
        let (intervals, samples) = if r.method.is_interval_based() {
            (Some(r.sample_count), None)
        } else {
            (None, Some(r.sample_count))
        };
        ExportEntry {
            method: r.method_name(),
            result: r.value,
            intervals,
            samples,
            execution_time: r.elapsed_time_ms,
            error: r.error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub timestamp: String,
    pub function: String,
    pub bounds: ExportBounds,
    pub reference_value: f64,
    pub results: Vec<ExportEntry>,
}

impl ExportDocument {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strum::IntoEnumIterator;

    fn quiet_task() -> IntegrationTask {
        let mut task = IntegrationTask::new();
        task.set_loglevel(Some("off")).unwrap();
        task
    }

    #[test]
    fn test_defaults() {
        let task = IntegrationTask::new();
        assert_eq!(task.expression, "x**2");
        assert_eq!((task.lower, task.upper), (0.0, 1.0));
        assert_eq!(task.intervals, 100);
        assert_eq!(task.samples, 1000);
        let methods: Vec<QuadMethod> = task.methods.iter().copied().collect();
        assert_eq!(methods, vec![QuadMethod::Trapezoidal, QuadMethod::SimpsonOneThird]);
    }

    #[test]
    fn test_setters_validate() {
        let mut task = quiet_task();
        assert!(matches!(task.set_bounds(2.0, 1.0), Err(IntegrationError::InvalidBounds { .. })));
        assert_eq!(task.upper, 1.0);
        assert!(task.set_intervals(1).is_err());
        assert!(task.set_samples(9).is_err());
        assert!(task.set_loglevel(Some("verbose")).is_err());
        task.set_intervals(2).unwrap();
        task.set_samples(10).unwrap();
        assert_eq!((task.intervals, task.samples), (2, 10));
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut task = quiet_task();
        assert!(task.toggle_method(QuadMethod::MonteCarlo));
        assert!(!task.toggle_method(QuadMethod::Trapezoidal));
        let methods: Vec<QuadMethod> = task.methods.iter().copied().collect();
        assert_eq!(methods, vec![QuadMethod::SimpsonOneThird, QuadMethod::MonteCarlo]);
        task.set_expression("  sin(x) ");
        assert_eq!(task.expression, "sin(x)");
        task.set_log_to_file(true);
        assert!(task.log_to_file);
        task.reset();
        assert_eq!(task, IntegrationTask::new());
    }

    #[test]
    fn test_solver_default_task() {
        let report = quiet_task().solver().unwrap();
        assert_relative_eq!(report.reference_value, 1.0 / 3.0, epsilon = 1e-14);
        assert_eq!(report.results.len(), 2);
        let trap = report.result_for(QuadMethod::Trapezoidal).unwrap();
        assert_relative_eq!(trap.value, 1.0 / 3.0, epsilon = 1e-4);
        assert!(trap.error.is_some());
        let simpson = report.result_for(QuadMethod::SimpsonOneThird).unwrap();
        assert!(simpson.error.unwrap().absolute < 1e-12);
        assert_eq!(report.most_accurate().unwrap().method, QuadMethod::SimpsonOneThird);
        assert!(report.result_for(QuadMethod::MonteCarlo).is_none());
        let viz = report.visualization_for(QuadMethod::Trapezoidal).unwrap();
        assert_eq!(viz.area_segments.len(), 100);
    }

    #[test]
    fn test_solver_all_methods_seeded() {
        let mut task = quiet_task();
        task.set_methods(&QuadMethod::iter().collect::<Vec<_>>());
        task.set_samples(2000).unwrap();
        task.set_seed(Some(42));
        let first = task.solver().unwrap();
        let second = task.solver().unwrap();
        let mc1 = first.result_for(QuadMethod::MonteCarlo).unwrap();
        let mc2 = second.result_for(QuadMethod::MonteCarlo).unwrap();
        assert_eq!(mc1.value, mc2.value);
        assert!((mc1.value - 1.0 / 3.0).abs() < 0.05);
        let viz = first.visualization_for(QuadMethod::MonteCarlo).unwrap();
        assert_eq!(viz.area_segments.len(), MAX_VISUALIZED_SAMPLES);
        assert_eq!(first.result_for(QuadMethod::SimpsonThreeEighths).unwrap().sample_count, 102);
        let order: Vec<QuadMethod> = first.results.iter().map(|r| r.method).collect();
        assert_eq!(order, QuadMethod::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_solver_errors() {
        let mut task = quiet_task();
        task.set_methods(&[]);
        assert_eq!(task.solver().unwrap_err(), IntegrationError::NoMethodSelected);

        let mut task = quiet_task();
        task.set_expression("sin(x");
        assert!(matches!(task.solver(), Err(IntegrationError::InvalidExpression { .. })));

        let mut task = quiet_task();
        task.lower = 3.0;
        assert!(matches!(task.solver(), Err(IntegrationError::InvalidBounds { .. })));

        // singular inside the interval: aborts as a whole
        let mut task = quiet_task();
        task.set_expression("1/(x - 0.5)");
        task.set_intervals(10).unwrap();
        assert!(task.solver().is_err());
    }

    #[test]
    fn test_large_interval_count_caps_visualization() {
        let mut task = quiet_task();
        task.set_methods(&[QuadMethod::Trapezoidal]);
        task.set_intervals(MAX_VISUALIZED_COUNT * 2).unwrap();
        let report = task.solver().unwrap();
        let trap = report.result_for(QuadMethod::Trapezoidal).unwrap();
        assert_eq!(trap.sample_count, MAX_VISUALIZED_COUNT * 2);
        let viz = report.visualization_for(QuadMethod::Trapezoidal).unwrap();
        assert_eq!(viz.area_segments.len(), MAX_VISUALIZED_COUNT);
    }

    #[test]
    fn test_zero_reference_is_flagged() {
        let mut task = quiet_task();
        task.set_expression("x - x");
        task.set_bounds(-1.0, 1.0).unwrap();
        let report = task.solver().unwrap();
        let error = report.result_for(QuadMethod::Trapezoidal).unwrap().error.unwrap();
        assert!(error.relative_is_absolute);
        assert_eq!(error.relative, error.absolute);
    }

    #[test]
    fn test_export_document_shape() {
        let mut task = quiet_task();
        task.set_methods(&[QuadMethod::SimpsonOneThird, QuadMethod::MonteCarlo]);
        task.set_seed(Some(1));
        let export = task.solver().unwrap().to_export();
        let json: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(json["function"], "x**2");
        assert!(json["referenceValue"].is_f64());
        let simpson = &json["results"][0];
        assert_eq!(simpson["method"], "Simpson's 1/3 Rule");
        assert_eq!(simpson["intervals"], 100);
        assert!(simpson.get("samples").is_none());
        assert!(simpson["executionTime"].is_f64());
        assert!(simpson["error"]["relative"].is_f64());
        let mc = &json["results"][1];
        assert_eq!(mc["samples"], 1000);
        assert!(mc.get("intervals").is_none());
    }

    #[test]
    fn test_results_table_lists_methods() {
        let table = quiet_task().solver().unwrap().results_table();
        assert!(table.contains("Trapezoidal Rule"));
        assert!(table.contains("Simpson's 1/3 Rule"));
        assert!(table.contains("absolute error"));
    }

    #[test]
    fn test_from_task_document() {
        let document = r#"
        // compare all methods on a mixed function
        function expression: "sin(x) + x^2"
        bounds lower: 0 upper: 3.14159
        settings intervals: 64 samples: 5000 methods: trapezoidal, simpson38, monte-carlo
        run seed: 42 loglevel: off log_to_file: true
        "#;
        let task = IntegrationTask::from_task_document(document).unwrap();
        assert_eq!(task.expression, "sin(x) + x^2");
        assert_eq!(task.upper, 3.14159);
        assert_eq!(task.intervals, 64);
        assert_eq!(task.samples, 5000);
        assert_eq!(task.seed, Some(42));
        assert_eq!(task.loglevel.as_deref(), Some("off"));
        assert!(task.log_to_file);
        let methods: Vec<QuadMethod> = task.methods.iter().copied().collect();
        assert_eq!(
            methods,
            vec![QuadMethod::Trapezoidal, QuadMethod::SimpsonThreeEighths, QuadMethod::MonteCarlo]
        );
        let report = task.solve().unwrap();
        assert_eq!(report.results.len(), 3);
    }

    #[test]
    fn test_from_task_document_defaults_and_errors() {
        let task = IntegrationTask::from_task_document("bounds upper: 2").unwrap();
        assert_eq!(task.expression, DEFAULT_EXPRESSION);
        assert_eq!((task.lower, task.upper), (0.0, 2.0));

        assert!(matches!(
            IntegrationTask::from_task_document("settings methods: trapezoidal, romberg"),
            Err(IntegrationError::TaskFile(_))
        ));
        assert!(matches!(
            IntegrationTask::from_task_document("bounds lower: 1 upper: 0"),
            Err(IntegrationError::InvalidBounds { .. })
        ));
        assert!(IntegrationTask::from_task_document("settings intervals: 1").is_err());
        assert!(IntegrationTask::from_task_document("run loglevel: loud").is_err());
    }

    #[test]
    fn test_task_convergence() {
        let mut task = quiet_task();
        task.set_expression("exp(x)");
        let series = task.analyze_convergence(QuadMethod::SimpsonOneThird, 5).unwrap();
        assert_eq!(series.len(), 5);
        let exact = std::f64::consts::E - 1.0;
        let order = series.observed_order(exact).unwrap();
        assert!((order - 4.0).abs() < 0.2);
    }
}
