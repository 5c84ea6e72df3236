//! Diagnostic logging for etagsum runs.
//!
//! Events go to `$XDG_STATE_HOME/etagsum/etagsum.log`. The user-facing error
//! channel is stderr, so the stderr fallback only lets errors through unless
//! `RUST_LOG` says otherwise.

use anyhow::Result;
use std::fs::{self, File};
use std::io;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const FILE_FILTER: &str = "info,etagsum=debug";
const STDERR_FILTER: &str = "error";

/// Per-event handle on the log file; stderr if the handle can't be duplicated.
enum LogSink {
    File(File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    }
}

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to the state-dir file. Errors if the file can't be opened, in which
/// case the caller should use [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("etagsum")?;
    let path = xdg_dirs.place_state_file("etagsum.log")?;
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_or(FILE_FILTER))
        .with_writer(BoxMakeWriter::new(LogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("etagsum logging initialized at {}", path.display());
    Ok(())
}

pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_or(STDERR_FILTER))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{run_groups, SizeGroup};
    use crate::source::testing::MemorySource;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn with_stderr_filter(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(STDERR_FILTER))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn stderr_filter_drops_below_error() {
        let logged = with_stderr_filter(|| {
            tracing::debug!("debug line");
            tracing::info!("info line");
            tracing::warn!("warn line");
            tracing::error!("error line");
        });
        assert!(!logged.contains("debug line"));
        assert!(!logged.contains("info line"));
        assert!(!logged.contains("warn line"));
        assert!(logged.contains("error line"));
    }

    #[test]
    fn unreadable_target_is_reported_only_once_on_stderr() {
        let source = MemorySource::new();
        let groups = vec![SizeGroup {
            chunk_size: 8,
            targets: vec!["missing".into()],
        }];
        let mut out = Vec::new();
        let mut err = Vec::new();
        let logged = with_stderr_filter(|| {
            let ok = run_groups(&source, &groups, "etagsum", &mut out, &mut err).unwrap();
            assert!(!ok);
        });
        assert_eq!(logged, "");
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "etagsum: missing: No such file or directory\n"
        );
    }
}
