use std::io::{BufWriter, stdout};
use std::sync::Arc;

use anyhow::Context;
use gogr_core::{ExtractOptions, FileWorker, RecordSink, WriterSink};
use gogr_go::GoIndexer;
use gogr_ingest::{Dispatcher, FilenameSource, FlowControlConfig};
use tokio::io::BufReader;
use tracing::info;

use crate::Cli;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let indexer = GoIndexer::new(ExtractOptions {
        report_unsupported: cli.debug,
    });
    let sink = Arc::new(WriterSink::new(BufWriter::new(stdout())));
    let worker = FileWorker::new(Arc::new(indexer), sink.clone());

    let flow_control = match cli.jobs {
        Some(jobs) => FlowControlConfig::with_workers(jobs),
        None => FlowControlConfig::default(),
    };
    let source = FilenameSource::from_args_or(cli.files, BufReader::new(tokio::io::stdin()));

    let outcome = Dispatcher::new(Arc::new(worker), flow_control)
        .run(source)
        .await;

    // Records of finished files are flushed even when enumeration failed.
    sink.flush().context("failed to flush output")?;
    let stats = outcome.context("failed to read file names")?;

    info!(
        "Indexed {} files ({} failed), {} records",
        stats.succeeded, stats.failed, stats.records
    );
    Ok(())
}
