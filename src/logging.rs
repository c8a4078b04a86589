use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::fmt::format::FmtSpan;

/// Installs a global subscriber writing JSON lines to `output_path`.
/// The terminal belongs to the UI, so nothing is logged unless this runs.
pub fn init_tracing_json(output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(output_path)?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parent_dirs() {
        let dir = std::env::temp_dir().join("pcmanager_logging_test").join("nested");
        let _ = fs::remove_dir_all(&dir);
        ensure_parent_dir(&dir.join("app.log")).unwrap();
        assert!(dir.is_dir());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn bare_file_name_needs_no_parent() {
        ensure_parent_dir(Path::new("app.log")).unwrap();
    }
}
