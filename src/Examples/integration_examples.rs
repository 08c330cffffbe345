#![allow(non_snake_case)]

use crate::Utils::logger::{save_convergence_to_csv, save_export_to_json};
use crate::numerical::convergence::{DEFAULT_CONVERGENCE_STEPS, analyze_convergence};
use crate::numerical::integration_api::IntegrationTask;
use crate::numerical::quadrature::{
    QuadMethod, simpson_one_third, simpson_three_eighths, trapezoidal,
};
use crate::numerical::monte_carlo::monte_carlo;
use crate::numerical::reference_error::{compute_error, reference_value};
use crate::numerical::visualization::{AreaSegment, generate_visualization};
use crate::symbolic::symbolic_lambdify::compile;
use std::error::Error;
use strum::IntoEnumIterator;

type ExampleResult = Result<(), Box<dyn Error>>;

fn single_rules() -> ExampleResult {
    // compile once, integrate with every rule
    let f = compile("exp(x)")?;
    let (a, b) = (0.0, 1.0);
    let exact = std::f64::consts::E - 1.0;
    let results = [
        trapezoidal(&f, a, b, 10)?,
        simpson_one_third(&f, a, b, 9)?,
        simpson_three_eighths(&f, a, b, 10)?,
        monte_carlo(&f, a, b, 10_000)?,
    ];
    for r in &results {
        let error = compute_error(r.value, exact);
        println!(
            "{}: {} with {} {}, absolute error {:e}, relative {:.6}%",
            r.method,
            r.value,
            r.sample_count,
            r.method.count_unit(),
            error.absolute,
            error.relative
        );
    }
    Ok(())
}

fn compare_all_methods() -> ExampleResult {
    let mut task = IntegrationTask::new();
    task.set_expression("sin(x) + x^2");
    task.set_bounds(0.0, std::f64::consts::PI)?;
    task.set_methods(&QuadMethod::iter().collect::<Vec<_>>());
    task.set_seed(Some(42));
    let report = task.solve()?;
    println!("reference value {}", report.reference_value);
    println!("{}", report.results_table());
    if let Some(best) = report.most_accurate() {
        println!("most accurate: {}", best.method);
    }
    Ok(())
}

fn convergence_study() -> ExampleResult {
    let f = compile("1/(1 + x^2)")?;
    let (a, b) = (0.0, 1.0);
    // ∫₀¹ 1/(1+x²) dx = π/4
    let exact = std::f64::consts::FRAC_PI_4;
    let mut all_series = Vec::new();
    for method in QuadMethod::iter() {
        let series = analyze_convergence(&f, a, b, method, DEFAULT_CONVERGENCE_STEPS)?;
        match series.observed_order(exact) {
            Some(order) => println!("{}: observed order {:.3}", method, order),
            None => println!("{}: order not available", method),
        }
        for (count, error) in series.errors_against(exact) {
            println!("    {:>6} {:e}", count, error);
        }
        all_series.push(series);
    }
    save_convergence_to_csv(&all_series, Some(exact), "convergence.csv")?;
    println!("convergence series saved to convergence.csv");
    Ok(())
}

fn task_document_and_export() -> ExampleResult {
    let document = r#"
    // integrate a gaussian bump with all methods
    function
      expression: "exp(-x^2)"
    bounds
      lower: -2
      upper: 2
    settings
      intervals: 50
      samples: 20000
      methods: trapezoidal, simpson, simpson38, monte-carlo
    run
      seed: 7
      loglevel: info
    "#;
    let task = IntegrationTask::from_task_document(document)?;
    let report = task.solve()?;
    let export = report.to_export();
    println!("{}", export.to_json()?);
    save_export_to_json(&export, "integration-results.json")?;
    Ok(())
}

fn visualization_data() -> ExampleResult {
    let f = compile("sqrt(x) * cos(x)")?;
    let (a, b) = (0.0, 2.0);
    let reference = reference_value(&f, a, b)?;
    for method in QuadMethod::iter() {
        let count = if method.is_interval_based() { 6 } else { 20 };
        let data = generate_visualization(method, &f, a, b, count)?;
        println!(
            "{}: {} curve points, {} segments, drawn area {} (reference {})",
            method,
            data.curve_points.len(),
            data.area_segments.len(),
            data.total_area(),
            reference
        );
        for segment in data.area_segments.iter().take(3) {
            match segment {
                AreaSegment::Sample { x, y } => println!("    sample ({:.4}, {:.4})", x, y),
                other => println!("    {:?}", other),
            }
        }
    }
    Ok(())
}

fn invalid_input() -> ExampleResult {
    // every failure is a typed error, nothing panics
    for expression in ["sin(x", "foo(x)", "1/(x-1)", "x +* 2"] {
        match compile(expression) {
            Ok(f) => println!("{} compiled", f),
            Err(e) => println!("{}", e),
        }
    }
    let f = compile("x")?;
    if let Err(e) = trapezoidal(&f, 1.0, 0.0, 10) {
        println!("{}", e);
    }
    if let Err(e) = monte_carlo(&f, 0.0, 1.0, 5) {
        println!("{}", e);
    }
    let mut task = IntegrationTask::new();
    task.set_methods(&[]);
    if let Err(e) = task.solver() {
        println!("{}", e);
    }
    Ok(())
}

pub fn integration_examples(example: usize) {
    let outcome = match example {
        0 => single_rules(),
        1 => compare_all_methods(),
        2 => convergence_study(),
        3 => task_document_and_export(),
        4 => visualization_data(),
        5 => invalid_input(),
        _ => {
            println!("no example {}, choose 0..=5", example);
            Ok(())
        }
    };
    if let Err(e) = outcome {
        eprintln!("example {} failed: {}", example, e);
    }
}
