//! Conversion pipeline
//!
//! One producer walks the input files on a blocking thread and hands blobs
//! over a capacity-1 channel to one consumer task, which decodes each blob
//! and passes it to the sink. Input order is output order. When the producer
//! is done it drops its sender; the consumer drains the channel, finishes the
//! sink and reports back, and only then does [`run_pipeline`] return.

use crate::certificate::CertificateDecoder;
use crate::config::{OutputTarget, Settings};
use crate::models::{ConversionError, RawBlob, RunSummary};
use crate::sink::{CertificateSink, Delivery, IndexSink, StdoutSink};
use crate::source::{self, InputFormat};
use crate::utils::{ConvertError, Result, SinkError, SourceError};
use std::path::PathBuf;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 1;

/// Run a full conversion with the sink selected by the settings
pub async fn run(settings: &Settings) -> Result<RunSummary> {
    let summary = match &settings.output {
        OutputTarget::Stdout => {
            run_pipeline(&settings.files, settings.input, StdoutSink::stdout())
                .await?
                .0
        }
        OutputTarget::Index(target) => {
            let sink = IndexSink::new(target)?;
            tracing::info!("Sending certificates to {}", sink.url());
            run_pipeline(&settings.files, settings.input, sink).await?.0
        }
    };

    tracing::info!(
        "Converted {} of {} certificates from {} file(s) ({} undecodable, {} rejected by index)",
        summary.emitted,
        summary.blobs,
        summary.files,
        summary.decode_failures,
        summary.rejected
    );

    Ok(summary)
}

/// Run the producer and consumer to completion, returning the sink once drained.
///
/// A source error still lets the consumer finish the blobs it was handed
/// before the error is returned.
pub async fn run_pipeline<S>(
    files: &[PathBuf],
    format: InputFormat,
    sink: S,
) -> Result<(RunSummary, S)>
where
    S: CertificateSink + 'static,
{
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    let consumer = tokio::spawn(consume(rx, sink, CertificateDecoder::new()));

    let files = files.to_vec();
    let producer = tokio::task::spawn_blocking(move || produce(&files, format, tx));

    // The sender is dropped once the producer returns, even on error, so the
    // consumer always drains and flushes what it already has
    let produced = producer.await.map_err(task_error)?;
    let consumed = consumer.await.map_err(task_error)?;

    let produced = produced?;
    let (consumed, sink) = consumed?;
    Ok((produced.merge(consumed), sink))
}

/// Read every file in order, sending each blob to the consumer
fn produce(
    files: &[PathBuf],
    format: InputFormat,
    tx: mpsc::Sender<RawBlob>,
) -> std::result::Result<RunSummary, SourceError> {
    let mut summary = RunSummary::default();

    for path in files {
        tracing::info!("Loading certificates from {} ({})", path.display(), format);
        summary.files += 1;

        for blob in source::open(path, format)? {
            if tx.blocking_send(blob?).is_err() {
                // Consumer has stopped; its error is reported by the caller
                tracing::debug!("Consumer gone, abandoning remaining input");
                return Ok(summary);
            }
            summary.blobs += 1;
        }
    }

    Ok(summary)
}

/// Decode and emit blobs until the channel closes
async fn consume<S: CertificateSink>(
    mut rx: mpsc::Receiver<RawBlob>,
    mut sink: S,
    decoder: CertificateDecoder,
) -> std::result::Result<(RunSummary, S), SinkError> {
    let mut summary = RunSummary::default();

    while let Some(blob) = rx.recv().await {
        let cert = match decoder.decode(&blob.der) {
            Ok(cert) => cert,
            Err(e) => {
                let failure = ConversionError::new(&blob, e.to_string());
                tracing::warn!("{}", failure);
                summary.decode_failures += 1;
                continue;
            }
        };

        match sink.emit(&cert).await? {
            Delivery::Rejected { .. } => summary.rejected += 1,
            Delivery::Written | Delivery::Accepted { .. } => summary.emitted += 1,
        }
    }

    sink.finish().await?;
    Ok((summary, sink))
}

fn task_error(e: tokio::task::JoinError) -> ConvertError {
    ConvertError::Task {
        message: e.to_string(),
    }
}
