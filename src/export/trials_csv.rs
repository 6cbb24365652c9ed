//! CSV export of per-trial records.

use std::{fs::File, path::Path};

use crate::{Result, pipeline::trials::TrialRecord, ports::Observer};

/// Observer that streams trial records to a CSV file, one row per trial.
pub struct CsvObserver {
    writer: csv::Writer<File>,
}

impl CsvObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let writer = csv::Writer::from_path(path)?;
        Ok(Self { writer })
    }
}

impl Observer for CsvObserver {
    fn on_trial_end(&mut self, record: &TrialRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
