use ferrous_lookup_domain::{LookupError, LookupEvent, LookupSummary, PtrResult};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Writes lookup results to stdout, one line per event.
pub struct Printer<W: Write> {
    format: OutputFormat,
    out: W,
}

impl Printer<std::io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(format, std::io::stdout())
    }
}

impl<W: Write> Printer<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self { format, out }
    }

    pub fn event(&mut self, event: &LookupEvent) -> anyhow::Result<()> {
        let line = match self.format {
            OutputFormat::Json => serde_json::to_string(event)?,
            OutputFormat::Text => match event {
                LookupEvent::Record(record) => record.to_string(),
                LookupEvent::Error(error) => format_error(error),
                LookupEvent::Complete(summary) => format_summary(summary),
            },
        };
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    pub fn ptr(&mut self, result: &PtrResult) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => writeln!(self.out, "{}", serde_json::to_string(result)?)?,
            OutputFormat::Text if result.is_resolved() => {
                for name in &result.names {
                    writeln!(self.out, "{}\t@{}", name, result.server)?;
                }
            }
            OutputFormat::Text => writeln!(self.out, ";; no PTR record (last tried @{})", result.server)?,
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn format_error(error: &LookupError) -> String {
    format!(";; error: {}", error)
}

fn format_summary(summary: &LookupSummary) -> String {
    format!(
        ";; {} host(s), {} server(s), {} queries, {} records, {} errors{}",
        summary.hosts,
        summary.servers,
        summary.queries,
        summary.records,
        summary.errors,
        if summary.cancelled { " (cancelled)" } else { "" }
    )
}
