//! Placeholder restoration

use super::RecordProcessor;
use crate::config::EngineConfig;
use crate::record::Record;
use crate::summary::RunSummary;
use verbatim_core::{Restorer, SideChannel};

/// Restores `TEXT\tSIDE_CHANNEL` lines to plain text.
///
/// The side channel may use either encoding. Unresolvable placeholders are
/// counted in `restore_errors` when errors are ignored, never written inline.
#[derive(Debug, Clone, Copy)]
pub struct PasteProcessor {
    restorer: Restorer,
}

impl PasteProcessor {
    /// Failure handling follows `ignore_errors`
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            restorer: Restorer::new(config.ignore_errors),
        }
    }
}

impl RecordProcessor for PasteProcessor {
    fn name(&self) -> &'static str {
        "paste"
    }

    fn columns(&self) -> &'static [usize] {
        &[2]
    }

    fn process(
        &self,
        record: &Record<'_>,
        summary: &mut RunSummary,
    ) -> verbatim_core::Result<Vec<String>> {
        let side_channel = SideChannel::decode(record.field(1))?;
        let restored = self.restorer.restore(&record.tokens(0), &side_channel)?;
        summary.restore_errors += restored.errors;
        Ok(vec![restored.text])
    }
}
