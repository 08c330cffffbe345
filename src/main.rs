#![allow(non_snake_case)]
use RustedQuad::Examples::integration_examples::integration_examples;
use RustedQuad::Utils::logger::save_export_to_json;
use RustedQuad::numerical::integration_api::IntegrationTask;
use std::env;

const USAGE: &str = "usage: RustedQuad <task file> [export.json] | RustedQuad --example <n>";

#[derive(Debug, PartialEq)]
enum Command {
    Example(usize),
    Task {
        task_file: String,
        export_path: Option<String>,
    },
    /// bad arguments, with the reason
    Usage(String),
}

fn parse_args(args: &[String]) -> Command {
    match args {
        [] => Command::Example(1),
        [flag, n] if flag == "--example" => match n.parse::<usize>() {
            Ok(example) => Command::Example(example),
            Err(_) => Command::Usage(format!("example number expected, got '{}'", n)),
        },
        [flag, ..] if flag == "--example" => {
            Command::Usage("--example takes one number".to_string())
        }
        [flag, ..] if flag.starts_with("--") => {
            Command::Usage(format!("unknown option '{}'", flag))
        }
        [task_file] => Command::Task {
            task_file: task_file.clone(),
            export_path: None,
        },
        [task_file, export_path] => Command::Task {
            task_file: task_file.clone(),
            export_path: Some(export_path.clone()),
        },
        _ => Command::Usage("too many arguments".to_string()),
    }
}

fn run_task(task_file: &str, export_path: Option<&str>) {
    let outcome = IntegrationTask::from_task_file(task_file).and_then(|task| task.solve());
    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    println!("{}", report.results_table());
    if let Some(export_path) = export_path {
        match save_export_to_json(&report.to_export(), export_path) {
            Ok(()) => println!("results saved to {}", export_path),
            Err(e) => eprintln!("cannot save {}: {}", export_path, e),
        }
    }
}

/// `RustedQuad <task file> [export.json]` runs a task document,
/// `RustedQuad --example <n>` runs one of the bundled examples
fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args) {
        Command::Example(example) => integration_examples(example),
        Command::Task {
            task_file,
            export_path,
        } => run_task(&task_file, export_path.as_deref()),
        Command::Usage(reason) => {
            eprintln!("{}\n{}", reason, USAGE);
            std::process::exit(2);
        }
    }
}
