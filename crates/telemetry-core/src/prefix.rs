//! Time-partitioned object prefixes.
//!
//! The delivery stream writes under a Hive-style prefix derived from the
//! arrival time of each batch. Templates are written strftime-style so they
//! can be evaluated locally with chrono and translated into the delivery
//! service's own `!{timestamp:...}` expression language.

use chrono::{DateTime, Utc};

/// strftime codes understood by the template and their delivery-stream
/// equivalents.
const TIMESTAMP_CODES: [(&str, &str); 4] = [
    ("%Y", "!{timestamp:yyyy}"),
    ("%m", "!{timestamp:MM}"),
    ("%d", "!{timestamp:dd}"),
    ("%H", "!{timestamp:HH}"),
];

/// Expression the delivery service replaces with the failure category.
pub const ERROR_OUTPUT_TYPE: &str = "!{firehose:error-output-type}";

/// A strftime-style partition prefix such as `data/year=%Y/month=%m/day=%d/`.
///
/// Supported codes:
/// - `%Y` - 4-digit year (e.g., 2026)
/// - `%m` - 2-digit month (01-12)
/// - `%d` - 2-digit day (01-31)
/// - `%H` - 2-digit hour (00-23)
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use telemetry_core::PrefixTemplate;
///
/// let template = PrefixTemplate::daily("data");
/// assert_eq!(template.as_str(), "data/year=%Y/month=%m/day=%d/");
/// assert_eq!(
///     template.to_firehose_expression(),
///     "data/year=!{timestamp:yyyy}/month=!{timestamp:MM}/day=!{timestamp:dd}/"
/// );
///
/// let at = Utc.with_ymd_and_hms(2026, 3, 7, 9, 0, 0).unwrap();
/// assert_eq!(template.render_at(at), "data/year=2026/month=03/day=07/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTemplate {
    template: String,
}

impl PrefixTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// `{root}/year=%Y/month=%m/day=%d/`
    pub fn daily(root: &str) -> Self {
        Self::new(format!("{root}/year=%Y/month=%m/day=%d/"))
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Leading path segment before any partition, e.g. `data`.
    pub fn root(&self) -> &str {
        self.template
            .split('/')
            .next()
            .filter(|segment| !segment.contains('='))
            .unwrap_or("")
    }

    /// Partition column names in template order.
    /// e.g., "data/year=%Y/month=%m/day=%d/" -> ["year", "month", "day"]
    pub fn partition_columns(&self) -> Vec<String> {
        self.template
            .split('/')
            .filter_map(|segment| segment.find('=').map(|idx| segment[..idx].to_string()))
            .collect()
    }

    /// Evaluate the template for a specific instant.
    pub fn render_at(&self, at: DateTime<Utc>) -> String {
        at.format(&self.template).to_string()
    }

    /// The delivery service's expression for this template.
    pub fn to_firehose_expression(&self) -> String {
        TIMESTAMP_CODES
            .iter()
            .fold(self.template.clone(), |acc, (code, expr)| acc.replace(code, expr))
    }

    /// Error-output twin of this template: same partitions under `errors/`,
    /// followed by the failure category.
    pub fn error_template(&self) -> Self {
        let partitions = self
            .template
            .strip_prefix(self.root())
            .unwrap_or(&self.template)
            .trim_start_matches('/');
        Self::new(format!("errors/{partitions}"))
    }

    /// Delivery expression for [`error_template`](Self::error_template) with
    /// the failure category appended.
    pub fn to_error_firehose_expression(&self) -> String {
        format!(
            "{}{ERROR_OUTPUT_TYPE}/",
            self.error_template().to_firehose_expression()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_daily_template() {
        let template = PrefixTemplate::daily("data");
        assert_eq!(template.root(), "data");
        assert_eq!(template.partition_columns(), ["year", "month", "day"]);
    }

    #[test]
    fn test_error_expression() {
        let template = PrefixTemplate::daily("data");
        assert_eq!(
            template.to_error_firehose_expression(),
            "errors/year=!{timestamp:yyyy}/month=!{timestamp:MM}/day=!{timestamp:dd}/!{firehose:error-output-type}/"
        );
    }

    #[test]
    fn test_hour_expression() {
        let template = PrefixTemplate::new("raw/dt=%Y-%m-%d/hour=%H/");
        assert_eq!(
            template.to_firehose_expression(),
            "raw/dt=!{timestamp:yyyy}-!{timestamp:MM}-!{timestamp:dd}/hour=!{timestamp:HH}/"
        );
        assert_eq!(template.partition_columns(), ["dt", "hour"]);
    }

    #[test]
    fn test_render_pads_month_and_day() {
        let template = PrefixTemplate::daily("data");
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 23, 59, 59).unwrap();
        assert_eq!(template.render_at(at), "data/year=2026/month=01/day=05/");
    }
}
