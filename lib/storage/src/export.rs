//! Writing analysis results to JSON and CSV reports

use geoprox_core::{cell_text, Error, Result};
use geoprox_proximity::{MatchRow, SummaryStatistics};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Rendering of a null cell in tabular output
pub const MISSING: &str = "N/A";

/// Column order of the detailed table
pub const ROW_HEADERS: [&str; 24] = [
    "Government_School_Name",
    "Government_BemisCode",
    "Government_District",
    "Government_Tehsil",
    "Government_UC",
    "Government_Level",
    "Government_Gender",
    "Government_Enrollment",
    "Government_Space_for_new_Rooms",
    "Government_Total_Rooms",
    "Government_Toilets",
    "Government_Boundary_Wall",
    "Government_Drinking_Water",
    "Custom_School_Name",
    "Custom_BemisCode",
    "Custom_Source",
    "Custom_Division",
    "Custom_District",
    "Custom_Tehsil",
    "Custom_Level",
    "Custom_Gender",
    "Custom_Students",
    "Custom_Functional_Status",
    "Distance_km",
];

#[derive(Serialize)]
struct ResultsDocument<'a> {
    results: &'a [MatchRow],
    summary: &'a SummaryStatistics,
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

fn csv_error(e: csv::Error) -> Error {
    Error::Serialization(e.to_string())
}

/// Write `{"results": [...], "summary": {...}}`
pub fn write_json(path: impl AsRef<Path>, rows: &[MatchRow], summary: &SummaryStatistics) -> Result<()> {
    let mut writer = create(path.as_ref())?;
    serde_json::to_writer(&mut writer, &ResultsDocument { results: rows, summary })
        .map_err(|e| Error::Serialization(e.to_string()))?;
    writer.flush()?;
    Ok(())
}

pub fn write_rows_csv(path: impl AsRef<Path>, rows: &[MatchRow]) -> Result<()> {
    write_rows(create(path.as_ref())?, rows)
}

/// Detailed table: government fields, candidate fields, then the distance
pub fn write_rows<W: Write>(out: W, rows: &[MatchRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(ROW_HEADERS).map_err(csv_error)?;

    for row in rows {
        let g = &row.government;
        let c = &row.candidate;
        let cells = [
            &g.name,
            &g.identifier,
            &g.district,
            &g.tehsil,
            &g.union_council,
            &g.level,
            &g.gender,
            &g.enrollment,
            &g.space_for_rooms,
            &g.total_rooms,
            &g.toilets,
            &g.boundary_wall,
            &g.drinking_water,
            &c.name,
            &c.identifier,
            &c.source,
            &c.division,
            &c.district,
            &c.tehsil,
            &c.level,
            &c.gender,
            &c.students,
            &c.functional_status,
        ];
        let mut record: Vec<String> = cells.iter().map(|v| render(v)).collect();
        record.push(format!("{} km", format_distance(row.distance_km)));
        writer.write_record(&record).map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_summary_csv(path: impl AsRef<Path>, summary: &SummaryStatistics) -> Result<()> {
    write_summary(create(path.as_ref())?, summary)
}

/// Two-column Metric/Value table
pub fn write_summary<W: Write>(out: W, summary: &SummaryStatistics) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["Metric", "Value"]).map_err(csv_error)?;

    let metrics = [
        ("Total Result Rows", summary.total_rows.to_string()),
        ("Total Government Schools", summary.total_gov_schools.to_string()),
        ("Total Custom Schools Found", summary.total_custom_schools_found.to_string()),
        ("Average Distance (km)", format_distance(summary.avg_distance)),
        (
            "Average Custom Schools per Government School",
            format_distance(summary.avg_custom_schools_per_gov),
        ),
        ("Within 0-2 km", summary.distance_ranges.within_2km.to_string()),
        ("Within 2-5 km", summary.distance_ranges.from_2_to_5km.to_string()),
    ];
    for (metric, value) in metrics {
        writer.write_record([metric, value.as_str()]).map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

fn render(value: &Value) -> String {
    cell_text(value).unwrap_or_else(|| MISSING.to_string())
}

/// Whole numbers keep one decimal so `2` prints as `2.0`
fn format_distance(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoprox_proximity::{summarize, CandidateInfo, GovernmentInfo};
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_row(distance_km: f64) -> MatchRow {
        MatchRow {
            government: GovernmentInfo {
                record_index: 0,
                name: json!("GPS Alpha"),
                identifier: json!("G1"),
                district: json!("Quetta"),
                tehsil: Value::Null,
                union_council: Value::Null,
                level: json!("Primary"),
                gender: Value::Null,
                enrollment: json!(120),
                space_for_rooms: Value::Null,
                total_rooms: Value::Null,
                toilets: Value::Null,
                boundary_wall: Value::Null,
                drinking_water: Value::Null,
                latitude: 30.0,
                longitude: 70.0,
            },
            candidate: CandidateInfo {
                record_index: 3,
                name: json!("Community School"),
                identifier: Value::Null,
                division: Value::Null,
                district: json!("Quetta"),
                tehsil: Value::Null,
                level: Value::Null,
                gender: Value::Null,
                students: json!(40),
                functional_status: json!("Functional"),
                source: json!("BEF"),
                latitude: 30.01,
                longitude: 70.0,
            },
            distance_km,
            candidate_count: 1,
        }
    }

    #[test]
    fn test_rows_csv_renders_missing_and_distance() {
        let mut out = Vec::new();
        write_rows(&mut out, &[sample_row(1.11), sample_row(2.0)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Government_School_Name,Government_BemisCode"));
        assert!(lines[0].ends_with("Distance_km"));
        assert!(lines[1].starts_with("GPS Alpha,G1,Quetta,N/A,N/A,Primary,N/A,120,"));
        assert!(lines[1].ends_with(",40,Functional,1.11 km"));
        assert!(lines[2].ends_with(",2.0 km"));
    }

    #[test]
    fn test_summary_csv() {
        let summary = summarize(&[sample_row(1.0), sample_row(3.0)]).unwrap();
        let mut out = Vec::new();
        write_summary(&mut out, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Metric,Value\n"));
        assert!(text.contains("Total Result Rows,2\n"));
        assert!(text.contains("Total Government Schools,1\n"));
        assert!(text.contains("Average Distance (km),2.0\n"));
        assert!(text.contains("Average Custom Schools per Government School,2.0\n"));
        assert!(text.contains("Within 2-5 km,1\n"));
    }

    #[test]
    fn test_write_json_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        let rows = vec![sample_row(1.5)];
        let summary = summarize(&rows).unwrap();
        write_json(&path, &rows, &summary).unwrap();

        let doc: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(doc["results"][0]["gov_bemis_code"], "G1");
        assert_eq!(doc["results"][0]["custom_source"], "BEF");
        assert_eq!(doc["results"][0]["distance_km"], 1.5);
        assert_eq!(doc["results"][0]["custom_schools_count"], 1);
        assert_eq!(doc["summary"]["total_rows"], 1);
        assert_eq!(doc["summary"]["distance_ranges"]["0-2km"], 1);
    }
}
