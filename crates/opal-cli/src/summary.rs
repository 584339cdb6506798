//! Console output for finished commands.

use std::collections::BTreeMap;
use std::io::{self, Write};

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use opal_model::{IssueStage, MappingIssue};
use opal_transform::ValidationOutcome;

use crate::types::{ConvertResult, EncodeResult, MapResult};

/// Print the dictionary check lines as soon as the outcome is known.
pub fn print_validation(outcome: &ValidationOutcome) {
    let mut stdout = io::stdout().lock();
    let _ = write_validation(&mut stdout, outcome);
}

pub fn write_validation<W: Write>(out: &mut W, outcome: &ValidationOutcome) -> io::Result<()> {
    for line in outcome.report_lines() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn print_encode_summary(result: &EncodeResult) {
    println!(
        "Transformation completed. Output saved to {}",
        result.output.display()
    );
}

pub fn print_map_summary(result: &MapResult) {
    println!();
    println!(
        "Success: Excel file '{}' created.",
        result.output.display()
    );
    println!(
        "Please, check for parsing errors by finding the following keywords in the \
         conflicting fields: \"error\" and \"unknown\""
    );
    println!();
    println!("{}", sheet_table(result));
    if let Some(table) = issue_table(&result.report.issues) {
        println!();
        println!("Issues:");
        println!("{table}");
    }
}

pub fn print_convert_summary(result: &ConvertResult) {
    println!(
        "Conversion complete. CSV file saved as {}",
        result.output.display()
    );
}

fn sheet_table(result: &MapResult) -> Table {
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Issues"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let by_stage = report.issues_by_stage();
    let stage_count = |stages: &[IssueStage]| -> usize {
        stages
            .iter()
            .filter_map(|stage| by_stage.get(stage))
            .sum()
    };
    table.add_row(vec![
        Cell::new("Variables")
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(report.variables.len()),
        count_cell(stage_count(&[
            IssueStage::EntityType,
            IssueStage::Variables,
            IssueStage::ValueType,
        ])),
    ]);
    table.add_row(vec![
        Cell::new("Categories")
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(report.categories.len()),
        count_cell(stage_count(&[IssueStage::Categories])),
    ]);
    table
}

fn issue_table(issues: &[MappingIssue]) -> Option<Table> {
    if issues.is_empty() {
        return None;
    }
    let mut grouped: BTreeMap<IssueStage, Vec<&MappingIssue>> = BTreeMap::new();
    for issue in issues {
        grouped.entry(issue.stage()).or_default().push(issue);
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Feature"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for (stage, issues) in grouped {
        for issue in issues {
            table.add_row(vec![
                Cell::new(stage.as_str()).fg(Color::Red),
                issue.feature().map_or_else(|| dim_cell("-"), Cell::new),
                Cell::new(issue.to_string()),
            ]);
        }
    }
    Some(table)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() == 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use opal_map::MappingReport;

    fn map_result(issues: Vec<MappingIssue>) -> MapResult {
        MapResult {
            output: PathBuf::from("dict.xlsx"),
            report: MappingReport {
                entity_type: "participant".to_string(),
                variables: Vec::new(),
                categories: Vec::new(),
                issues,
            },
        }
    }

    #[test]
    fn validation_lines_for_mismatch() {
        let outcome = ValidationOutcome::Mismatched {
            missing_in_dictionary: vec!["b".to_string()],
            missing_in_table: vec!["c".to_string()],
        };
        let mut out = Vec::new();
        write_validation(&mut out, &outcome).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Validation errors:\n\
             - Columns missing in dictionary: b\n\
             - Columns missing in table: c\n\
             Proceeding with transformation despite validation errors.\n"
        );
    }

    #[test]
    fn no_issue_table_without_issues() {
        assert!(issue_table(&[]).is_none());
    }

    #[test]
    fn issue_table_lists_every_issue() {
        let result = map_result(vec![
            MappingIssue::MissingDataType {
                feature: "age".to_string(),
            },
            MappingIssue::MissingName {
                section: "features",
                index: 2,
            },
        ]);
        let table = issue_table(&result.report.issues).expect("table");
        let rendered = table.to_string();
        assert!(rendered.contains("Missing dataType for feature age"));
        assert!(rendered.contains("entry #2"));
        assert_eq!(table.row_iter().count(), 2);
    }

    #[test]
    fn sheet_table_counts_issues_per_sheet() {
        let result = map_result(vec![MappingIssue::MalformedConcept {
            feature: "sex".to_string(),
            index: 0,
            reason: "expected an object".to_string(),
        }]);
        let table = sheet_table(&result);
        assert_eq!(table.row_iter().count(), 2);
        assert!(table.to_string().contains("Categories"));
    }
}
