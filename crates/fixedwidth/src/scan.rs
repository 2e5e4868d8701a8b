//! Discriminator-gated selective reads.
//!
//! A selective read decodes every line first as a small *probe* record type
//! that shares the target's leading layout, asks a predicate about it, and
//! only decodes the full record when the predicate accepts. Instead of
//! silently swallowing bad lines, the scan returns a [`ScanReport`] with the
//! outcome of every line it looked at; the caller decides whether failures
//! matter.

use crate::buffer::RecordBuffer;
use crate::config::ScanPolicy;
use crate::error::{FixedWidthError, Result};
use crate::schema::RecordSchema;
use crate::serializer::FixedWidthSerializer;
use crate::traits::FixedWidthRecord;

/// What happened to one scanned line.
#[derive(Debug)]
pub enum LineStatus {
    /// The predicate accepted the probe and the full record was decoded.
    Matched,
    /// The predicate rejected the probe.
    Skipped,
    /// Decoding the probe or the full record failed.
    Failed(FixedWidthError),
}

/// Outcome of one scanned line.
#[derive(Debug)]
pub struct LineOutcome {
    /// 1-based line number.
    pub line: usize,
    /// What happened.
    pub status: LineStatus,
}

/// Per-line outcomes of a selective read, in input order.
///
/// Lines after the point where the scan stopped (first match for
/// [`read_single`](FixedWidthSerializer::read_single), first failure under
/// [`ScanPolicy::FailFast`]) are not listed.
#[derive(Debug, Default)]
pub struct ScanReport {
    outcomes: Vec<LineOutcome>,
}

impl ScanReport {
    /// All outcomes.
    pub fn outcomes(&self) -> &[LineOutcome] {
        &self.outcomes
    }

    /// Number of lines inspected.
    pub fn lines_scanned(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of lines that produced a record.
    pub fn matched(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, LineStatus::Matched))
            .count()
    }

    /// Failed lines with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &FixedWidthError)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            LineStatus::Failed(err) => Some((o.line, err)),
            _ => None,
        })
    }

    /// Returns `true` when no line failed.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Turns the report into the matched count, or the first failure.
    pub fn into_result(self) -> Result<usize> {
        let matched = self.matched();
        for outcome in self.outcomes {
            if let LineStatus::Failed(err) = outcome.status {
                return Err(err);
            }
        }
        Ok(matched)
    }

    fn push(&mut self, line: usize, status: LineStatus) {
        self.outcomes.push(LineOutcome { line, status });
    }
}

/// Whether a scan keeps going after a line.
enum Flow {
    Continue,
    Stop,
}

impl FixedWidthSerializer {
    /// Finds the first line whose probe satisfies `discriminator` and hands
    /// the fully decoded record to `assign`.
    ///
    /// `assign` is called at most once and scanning stops right after the
    /// match. Layout errors for either type are returned as `Err`; problems
    /// with individual lines are logged and reported in the [`ScanReport`].
    pub fn read_single<T, P, D, A>(
        &self,
        buffer: &mut RecordBuffer,
        mut discriminator: D,
        assign: A,
    ) -> Result<ScanReport>
    where
        T: FixedWidthRecord,
        P: FixedWidthRecord,
        D: FnMut(&P) -> bool,
        A: FnOnce(T),
    {
        let mut assign = Some(assign);
        self.scan::<T, P, _, _>(buffer, &mut discriminator, |record| {
            if let Some(assign) = assign.take() {
                assign(record);
            }
            Flow::Stop
        })
    }

    /// Appends every record whose probe satisfies `discriminator` to
    /// `destination`, in input order.
    pub fn read_many<T, P, D>(
        &self,
        buffer: &mut RecordBuffer,
        destination: &mut Vec<T>,
        mut discriminator: D,
    ) -> Result<ScanReport>
    where
        T: FixedWidthRecord,
        P: FixedWidthRecord,
        D: FnMut(&P) -> bool,
    {
        self.scan::<T, P, _, _>(buffer, &mut discriminator, |record| {
            destination.push(record);
            Flow::Continue
        })
    }

    fn scan<T, P, D, F>(
        &self,
        buffer: &mut RecordBuffer,
        discriminator: &mut D,
        mut on_match: F,
    ) -> Result<ScanReport>
    where
        T: FixedWidthRecord,
        P: FixedWidthRecord,
        D: FnMut(&P) -> bool,
        F: FnMut(T) -> Flow,
    {
        let probe_schema = RecordSchema::of::<P>()?;
        let schema = RecordSchema::of::<T>()?;
        buffer.rewind();

        let mut report = ScanReport::default();
        let mut line_no = 0;

        while let Some(line) = buffer.read_line() {
            line_no += 1;

            let decoded = self
                .decode_record::<P>(&probe_schema, &line, line_no)
                .and_then(|probe| {
                    if discriminator(&probe) {
                        self.decode_record::<T>(&schema, &line, line_no).map(Some)
                    } else {
                        Ok(None)
                    }
                });

            match decoded {
                Ok(Some(record)) => {
                    report.push(line_no, LineStatus::Matched);
                    if let Flow::Stop = on_match(record) {
                        break;
                    }
                }
                Ok(None) => report.push(line_no, LineStatus::Skipped),
                Err(err) => {
                    tracing::warn!(
                        line = line_no,
                        record = schema.record(),
                        error = %err,
                        "fixed-width line failed to decode during scan"
                    );
                    report.push(line_no, LineStatus::Failed(err));
                    if self.config.scan_policy == ScanPolicy::FailFast {
                        break;
                    }
                }
            }
        }

        tracing::debug!(
            record = schema.record(),
            scanned = report.lines_scanned(),
            matched = report.matched(),
            "selective read finished"
        );
        Ok(report)
    }
}
