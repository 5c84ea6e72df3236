//! Run-wide error counters for verification mode.

/// Counts accumulated across every listing source of one run. Never reset
/// between sources, so each summary reports the running total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerificationTally {
    pub line_errors: u64,
    pub file_errors: u64,
    pub checksum_errors: u64,
}

impl VerificationTally {
    pub fn is_success(&self) -> bool {
        self.line_errors == 0 && self.file_errors == 0 && self.checksum_errors == 0
    }

    /// Warning lines for every nonzero counter, in a fixed order.
    pub fn summary_lines(&self, program: &str) -> Vec<String> {
        let mut lines = Vec::new();
        if self.line_errors > 0 {
            lines.push(format!(
                "{program}: WARNING: {} lines are improperly formatted",
                self.line_errors
            ));
        }
        if self.file_errors > 0 {
            lines.push(format!(
                "{program}: WARNING: {} listed files could not be read",
                self.file_errors
            ));
        }
        if self.checksum_errors > 0 {
            lines.push(format!(
                "{program}: WARNING: {} computed checksums did NOT match",
                self.checksum_errors
            ));
        }
        lines
    }
}
