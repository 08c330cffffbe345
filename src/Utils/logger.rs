use crate::numerical::convergence::ConvergenceSeries;
use crate::numerical::integration_api::ExportDocument;
use csv::Writer;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// writes the export document as pretty-printed JSON
pub fn save_export_to_json<P: AsRef<Path>>(
    document: &ExportDocument,
    filename: P,
) -> io::Result<()> {
    let file = File::create(filename)?;
    serde_json::to_writer_pretty(BufWriter::new(file), document)?;
    Ok(())
}

/// One row per convergence point: method, count, estimate and, when a reference is
/// given, the absolute error.
pub fn save_convergence_to_csv<P: AsRef<Path>>(
    series: &[ConvergenceSeries],
    reference: Option<f64>,
    filename: P,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    let mut headers = vec!["method", "count", "estimate"];
    if reference.is_some() {
        headers.push("absolute_error");
    }
    writer.write_record(&headers)?;

    for s in series {
        for point in &s.points {
            let mut row = vec![
                s.method.id().to_string(),
                point.sample_count.to_string(),
                point.estimate.to_string(),
            ];
            if let Some(reference) = reference {
                row.push((point.estimate - reference).abs().to_string());
            }
            writer.write_record(&row)?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::convergence::analyze_convergence;
    use crate::numerical::integration_api::IntegrationTask;
    use crate::numerical::quadrature::QuadMethod;
    use tempfile::tempdir;

    #[test]
    fn test_save_convergence_to_csv() {
        let f = |x: f64| x * x;
        let trap = analyze_convergence(&f, 0.0, 1.0, QuadMethod::Trapezoidal, 3).unwrap();
        let simpson = analyze_convergence(&f, 0.0, 1.0, QuadMethod::SimpsonOneThird, 3).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("convergence.csv");
        save_convergence_to_csv(&[trap, simpson], Some(1.0 / 3.0), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[3], "absolute_error");
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[0][0], "trapezoidal");
        assert_eq!(&rows[0][1], "8");
        assert_eq!(&rows[5][0], "simpson");
        let error: f64 = rows[5][3].parse().unwrap();
        assert!(error < 1e-12);
    }

    #[test]
    fn test_save_export_to_json() {
        let mut task = IntegrationTask::new();
        task.set_methods(&[QuadMethod::Trapezoidal, QuadMethod::SimpsonThreeEighths]);
        let report = task.solver().unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.json");
        save_export_to_json(&report.to_export(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["function"], "x**2");
        assert_eq!(json["bounds"]["upper"], 1.0);
        assert_eq!(json["results"].as_array().unwrap().len(), 2);
        assert_eq!(json["results"][1]["intervals"], 102);
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("out.csv");
        assert!(save_convergence_to_csv(&[], None, &path).is_err());
    }
}
