use conflux_core::schedule::model::Weekday;
use conflux_core::ParsedSchedule;

pub fn print(parsed: &ParsedSchedule) {
    print!("{}", format_parsed(parsed));
}

/// Render classes as a grid with one column of periods per weekday.
pub fn format_parsed(parsed: &ParsedSchedule) -> String {
    let mut out = String::new();

    let max_id = parsed
        .records
        .iter()
        .map(|r| r.class_id().as_str().len())
        .max()
        .unwrap_or(5)
        .max("Class".len());

    out.push_str(&format!("  {:<max_id$}  {:<8}", "Class", "Grade"));
    for day in Weekday::ALL {
        out.push_str(&format!("  {:<10}", day.name()));
    }
    out.push('\n');
    let rule_width = max_id + 10 + 12 * Weekday::ALL.len();
    out.push_str(&format!("  {}\n", "-".repeat(rule_width)));

    for record in &parsed.records {
        out.push_str(&format!(
            "  {:<width$}  {:<8}",
            record.class_id().as_str(),
            record.grade_level().label(),
            width = max_id
        ));
        for day in Weekday::ALL {
            let periods = record.conflicts().periods_on(day);
            let cell = if periods.is_empty() {
                "-".to_string()
            } else {
                periods
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            };
            out.push_str(&format!("  {:<10}", cell));
        }
        out.push('\n');
    }

    out.push_str(&format!("\n  {} class(es)", parsed.records.len()));
    let grades: Vec<String> = parsed
        .diagnostics
        .grade_histogram
        .iter()
        .map(|(grade, count)| format!("{grade}: {count}"))
        .collect();
    if !grades.is_empty() {
        out.push_str(&format!(" ({})", grades.join(", ")));
    }
    out.push('\n');

    out
}
