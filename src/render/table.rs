use crate::summary::{SummaryByTag, SummaryRecord};

const COLUMNS: [&str; 11] = [
    "tag", "ops", "time_s", "ops/s", "mean_ms", "p50_ms", "p90_ms", "p99_ms", "p99.9_ms",
    "p99.99_ms", "p99.999_ms",
];

/// Render one row per tag, right-aligned, columns sized to their content.
pub fn render_table(summary: &SummaryByTag) -> String {
    let rows: Vec<Vec<String>> = summary
        .iter()
        .map(|(tag, record)| row(tag, record))
        .collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    push_line(&mut out, &header, &widths);
    for r in &rows {
        push_line(&mut out, r, &widths);
    }
    out
}

fn row(tag: &str, r: &SummaryRecord) -> Vec<String> {
    vec![
        tag.to_string(),
        r.ops_count.to_string(),
        format!("{:.1}", r.stress_time_s),
        format!("{:.2}", r.throughput_per_second),
        format!("{:.3}", r.mean_latency_ms),
        format!("{:.3}", r.median_latency_ms),
        format!("{:.3}", r.p90_latency_ms),
        format!("{:.3}", r.p99_latency_ms),
        format!("{:.3}", r.p99_9_latency_ms),
        format!("{:.3}", r.p99_99_latency_ms),
        format!("{:.3}", r.p99_999_latency_ms),
    ]
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
        if i == 0 {
            line.push_str(&format!("{:<w$}", cell, w = *w));
        } else {
            line.push_str(&format!("  {:>w$}", cell, w = *w));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
