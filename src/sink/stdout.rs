//! Newline-delimited JSON output

use crate::models::ParsedCertificate;
use crate::sink::{CertificateSink, Delivery};
use crate::utils::SinkError;
use std::io::{BufWriter, Stdout, Write};

/// Writes one compact JSON object per line
#[derive(Debug)]
pub struct StdoutSink<W: Write + Send> {
    writer: W,
}

impl StdoutSink<BufWriter<Stdout>> {
    /// Sink on the process's standard output
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(std::io::stdout()))
    }
}

impl<W: Write + Send> StdoutSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> CertificateSink for StdoutSink<W> {
    async fn emit(&mut self, cert: &ParsedCertificate) -> Result<Delivery, SinkError> {
        let mut line = serde_json::to_vec(cert)?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        Ok(Delivery::Written)
    }

    async fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
