use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::SecondsFormat;

use crate::history::SpinRecord;

const HEADER: [&str; 4] = ["ts", "personId", "capability", "platform"];

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Spin history as CSV, one row per landed wheel in history order.
///
/// Every value is double-quoted; empty columns are `""`.
pub fn spins_csv(records: &[SpinRecord]) -> String {
    let mut lines = vec![HEADER.join(",")];
    lines.extend(records.iter().map(|record| {
        let ts = record.ts.to_rfc3339_opts(SecondsFormat::Millis, true);
        [
            ts.as_str(),
            record.person_id.as_deref().unwrap_or_default(),
            record.capability.as_deref().unwrap_or_default(),
            record.platform.as_deref().unwrap_or_default(),
        ]
        .map(quoted)
        .join(",")
    }));
    lines.join("\n")
}

pub fn write_spins_csv(records: &[SpinRecord], path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(spins_csv(records).as_bytes())?;
    log::info!("Exported {} spins to {}", records.len(), path.display());
    Ok(())
}
