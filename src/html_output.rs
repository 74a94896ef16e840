//! HTML output format for deviation reports
//!
//! Self-contained visual report with styled tables and embedded CSS.

use crate::report::{join_signals, Report, DISCLAIMER};

/// Escape HTML special characters to prevent XSS
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate embedded CSS styles
fn generate_styles() -> &'static str {
    r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        tr:hover {
            background-color: #f0f0f0;
        }
        .signal {
            color: #0066cc;
            font-weight: bold;
            font-family: monospace;
        }
        .severity {
            font-family: monospace;
        }
        .severity-high {
            color: #cc0000;
            font-weight: bold;
        }
        .summary-table th {
            background-color: #5cb85c;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
}

/// Render baselines as an HTML table
fn render_baselines(report: &Report) -> String {
    let mut html = String::new();

    html.push_str("    <h2>Baselines</h2>\n");
    if report.baselines.is_empty() {
        html.push_str("    <p>No signals resolved.</p>\n");
        return html;
    }

    html.push_str("    <table>\n");
    html.push_str(
        "        <tr><th>Signal</th><th>Median</th><th>Volatility</th><th>Samples</th></tr>\n",
    );
    for (signal, record) in &report.baselines {
        html.push_str(&format!(
            "        <tr><td class=\"signal\">{}</td><td>{:.2}</td><td>{:.2}</td><td>{}</td></tr>\n",
            escape_html(signal.as_str()),
            record.median,
            record.volatility,
            record.samples
        ));
    }
    html.push_str("    </table>\n");

    html
}

/// Render deviation events as an HTML table
fn render_events(report: &Report) -> String {
    let mut html = String::new();

    html.push_str("    <h2>Deviation Events</h2>\n");
    if report.deviations.is_empty() {
        html.push_str("    <p>No deviations detected.</p>\n");
        return html;
    }

    html.push_str("    <table>\n");
    html.push_str("        <tr><th>Row</th><th>Signals</th><th>Severity</th></tr>\n");
    for event in &report.deviations {
        let severity_class = if event.severity >= 2 {
            "severity severity-high"
        } else {
            "severity"
        };
        html.push_str(&format!(
            "        <tr><td>{}</td><td class=\"signal\">{}</td><td class=\"{}\">{}</td></tr>\n",
            event.row,
            escape_html(&join_signals(&event.signals)),
            severity_class,
            event.severity
        ));
    }
    html.push_str("    </table>\n");

    html
}

/// Render summary counters as an HTML table
fn render_summary(report: &Report) -> String {
    let mut html = String::new();

    html.push_str("    <h2>Summary</h2>\n");
    html.push_str("    <table class=\"summary-table\">\n");
    html.push_str(
        "        <tr><th>Total rows</th><th>Deviation rows</th><th>Max severity</th><th>Multi-signal events</th></tr>\n",
    );
    html.push_str(&format!(
        "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        report.summary.total_rows,
        report.summary.deviation_rows,
        report.summary.max_severity,
        report.summary.multi_signal
    ));
    html.push_str("    </table>\n");

    html
}

/// Generate complete HTML document
pub fn to_html(report: &Report) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");

    html.push_str("<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("    <title>Desviar Deviation Report</title>\n");
    html.push_str("    <style>");
    html.push_str(generate_styles());
    html.push_str("</style>\n");
    html.push_str("</head>\n");

    html.push_str("<body>\n");
    html.push_str("    <h1>Signal Deviation Report</h1>\n");

    html.push_str(&render_baselines(report));
    html.push_str(&render_events(report));
    html.push_str(&render_summary(report));

    html.push_str("    <div class=\"footer\">\n");
    html.push_str(&format!("        {}<br>\n", escape_html(DISCLAIMER)));
    html.push_str("        Generated by Desviar - Signal Deviation Analyzer\n");
    html.push_str("    </div>\n");

    html.push_str("</body>\n");
    html.push_str("</html>\n");

    html
}
