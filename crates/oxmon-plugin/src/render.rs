use crate::metric::MetricRegistry;
use oxmon_common::types::Severity;
use std::fmt::Write;

/// Formats the final status line:
///
/// `<SEVERITY>:[ <messages>][ | <perfdata> ...]\n`
///
/// Messages are joined with `separator`; metrics come out sorted by name
/// with empty min/max fields.
pub fn render(
    status: Severity,
    messages: &[String],
    separator: &str,
    metrics: &MetricRegistry,
) -> String {
    let mut out = format!("{status}:");

    if !messages.is_empty() {
        out.push(' ');
        out.push_str(&messages.join(separator));
    }

    if !metrics.is_empty() {
        out.push_str(" |");
        for metric in metrics.iter() {
            let _ = write!(out, " {metric}");
        }
    }

    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_status() {
        let metrics = MetricRegistry::new();
        assert_eq!(render(Severity::Ok, &[], ", ", &metrics), "OK:\n");
        assert_eq!(render(Severity::Unknown, &[], ", ", &metrics), "UNKNOWN:\n");
    }

    #[test]
    fn messages_use_the_separator() {
        let metrics = MetricRegistry::new();
        let messages = vec!["All ok".to_string(), "Nothing to see".to_string()];
        assert_eq!(
            render(Severity::Ok, &messages, ":", &metrics),
            "OK: All ok:Nothing to see\n"
        );
    }

    #[test]
    fn metrics_only() {
        let mut metrics = MetricRegistry::new();
        metrics.add("m2", 456.789, &[]).unwrap();
        metrics.add("m1", 123.456, &["MB", "100"]).unwrap();
        assert_eq!(
            render(Severity::Warning, &[], ", ", &metrics),
            "WARNING: | m1=123.456MB;100;;; m2=456.789;;;;\n"
        );
    }
}
