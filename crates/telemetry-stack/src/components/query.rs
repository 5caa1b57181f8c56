//! Query workgroup and the saved analytical queries.

use telemetry_core::Configuration;

use crate::components::storage::{DATA_ROOT, RESULTS_PREFIX};
use crate::error::StackError;
use crate::model::athena::{
    BYTES_SCANNED_CUTOFF, EncryptionConfiguration, NamedQuery, ResultConfiguration,
    ResultEncryption, Workgroup, WorkgroupConfiguration,
};
use crate::model::{Expr, ResourceAddress};
use crate::stack::Stack;

/// Daily event counts, most recent first.
pub fn events_by_day(database: &str) -> String {
    format!(
        "SELECT year, month, day, COUNT(*) as event_count \
         FROM {database}.{DATA_ROOT} \
         GROUP BY year, month, day \
         ORDER BY year DESC, month DESC, day DESC \
         LIMIT 30;"
    )
}

/// The 20 most frequent event types.
pub fn top_event_types(database: &str) -> String {
    format!(
        "SELECT event_type, COUNT(*) as event_count \
         FROM {database}.{DATA_ROOT} \
         GROUP BY event_type \
         ORDER BY event_count DESC \
         LIMIT 20;"
    )
}

pub fn declare(
    config: &Configuration,
    stack: &mut Stack,
    results_bucket: &ResourceAddress,
    database: &ResourceAddress,
) -> Result<ResourceAddress, StackError> {
    let workgroup = stack.declare(
        "telemetry",
        Workgroup {
            name: config.prefixed("telemetry"),
            configuration: WorkgroupConfiguration {
                enforce_workgroup_configuration: true,
                publish_cloudwatch_metrics_enabled: true,
                bytes_scanned_cutoff_per_query: BYTES_SCANNED_CUTOFF,
                result_configuration: ResultConfiguration {
                    output_location: Expr::literal("s3://")
                        .attr(&results_bucket.attr("id"))
                        .text(format!("/{RESULTS_PREFIX}")),
                    encryption_configuration: EncryptionConfiguration {
                        encryption_option: ResultEncryption::SseKms,
                    },
                },
            },
            tags: config.common_tags.clone(),
        },
    )?;

    // The database name is known before apply, so query text embeds it.
    let database_name = config.catalog_database_name();
    let queries = [
        ("events_by_day", "events-by-day", events_by_day(&database_name)),
        ("top_event_types", "top-event-types", top_event_types(&database_name)),
    ];

    for (logical, suffix, query) in queries {
        stack.declare(
            logical,
            NamedQuery {
                name: config.prefixed(suffix),
                workgroup: workgroup.attr("id").into(),
                database: database.attr("name").into(),
                query,
            },
        )?;
    }

    Ok(workgroup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text() {
        let query = top_event_types("acme_prod_telemetry");
        assert!(query.contains("FROM acme_prod_telemetry.data "));
        assert!(query.ends_with("LIMIT 20;"));

        let query = events_by_day("acme_prod_telemetry");
        assert!(query.contains("ORDER BY year DESC, month DESC, day DESC"));
        assert!(query.ends_with("LIMIT 30;"));
    }
}
