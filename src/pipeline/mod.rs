//! Pipeline controller
//!
//! One input row at a time, in input order:
//! search -> disambiguate -> extract -> merge -> append -> checkpoint.

pub mod context;
pub mod disambiguate;
pub mod extract;

pub use context::RunContext;
pub use disambiguate::{Outcome, Resolution};

use crate::browser::RegistryPage;
use crate::config::Config;
use crate::error::Result;
use crate::export::excel::save_output;
use disambiguate::resolve;
use enkk_common::{error_rows, merge_person, BasicFields, InputRecord, PersonRecord, SearchQuery};
use extract::extract_status;
use indicatif::ProgressBar;
use log::{info, warn};

/// Process every record, appending to `ctx.output` and checkpointing
/// every `config.save_freq` rows
pub async fn run<P: RegistryPage + ?Sized>(
    page: &mut P,
    records: &[InputRecord],
    config: &Config,
    ctx: &mut RunContext,
    progress: &ProgressBar,
) -> Result<()> {
    ctx.total_rows = records.len();
    ctx.reset_rolling();

    for (idx, record) in records.iter().enumerate() {
        ctx.current_index = idx + 1;
        info!("Scraping row {} out of {}", ctx.current_index, ctx.total_rows);

        let block = process_record(page, record, ctx.current_index).await?;
        ctx.output.append(block);

        if ctx.current_index % config.save_freq == 0 {
            save_output(&ctx.output, ctx.output_path())?;
        }

        if let Some(elapsed) = ctx.throughput_due(config.throughput_every) {
            info!(
                "Elapsed time for the last {} rows: {:.3} seconds",
                config.throughput_every,
                elapsed.as_secs_f64()
            );
        }

        progress.inc(1);
    }

    Ok(())
}

/// All output rows for one input row. Lookup failures become a single
/// error row; browser failures while searching are returned as errors.
pub async fn process_record<P: RegistryPage + ?Sized>(
    page: &mut P,
    record: &InputRecord,
    row_index: usize,
) -> Result<Vec<PersonRecord>> {
    let basic = BasicFields::new(record, &SearchQuery::from_record(record));

    let Resolution { query, outcome } = resolve(page, record).await?;

    let status_rows = match outcome {
        Outcome::ProfileOpened => extract_status(page, row_index).await,
        Outcome::Failed(err) => Err(err),
    };

    let status_rows = status_rows.unwrap_or_else(|err| {
        warn!(
            "Error at row {} : {} number: {}, name: {}",
            row_index, err, query.search_number, query.search_name
        );
        error_rows(err)
    });

    Ok(merge_person(&basic, &status_rows))
}
