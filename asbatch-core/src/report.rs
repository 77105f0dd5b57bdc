use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::domain::Outcome;
use crate::error::Result;
use crate::util::sanitize::one_field;

pub const FIELD_COUNT: usize = 5;

/// Local wall-clock time when the offset can be determined, UTC otherwise.
/// Call before spawning threads; the local offset is unavailable once the
/// process is multi-threaded on some platforms.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// `<prefix>-<YYYYMMDDThh:mm>.tsv`
pub fn report_file_name(prefix: &str, started: OffsetDateTime) -> Result<String> {
    let stamp = started.format(format_description!("[year][month][day]T[hour]:[minute]"))?;
    Ok(format!("{prefix}-{stamp}.tsv"))
}

/// `Code\tURI\tMessage\tTimestamp\tWorkerID\n`
pub fn format_line(o: &Outcome) -> Result<String> {
    Ok(format!(
        "{}\t{}\t{}\t{}\t{}\n",
        o.code,
        one_field(&o.uri),
        one_field(&o.message),
        o.timestamp.format(&Rfc3339)?,
        o.worker_id
    ))
}

/// Append-only `.tsv` report for one run. Only the dispatcher writes to it.
pub struct ReportWriter {
    path: PathBuf,
    out: BufWriter<File>,
}

impl ReportWriter {
    pub fn create(dir: &Path, prefix: &str, started: OffsetDateTime) -> Result<Self> {
        let path = dir.join(report_file_name(prefix, started)?);
        let file = File::create(&path)?;
        Ok(Self {
            path,
            out: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every outcome of a batch, then flush.
    pub fn write_batch(&mut self, outcomes: &[Outcome]) -> Result<()> {
        for o in outcomes {
            self.out.write_all(format_line(o)?.as_bytes())?;
        }
        self.out.flush()?;
        Ok(())
    }
}
