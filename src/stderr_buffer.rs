use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Activate buffering. While active, `warn!()` calls store messages
/// instead of printing to stderr.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

/// Whether messages are currently being held back
pub fn is_active() -> bool {
    buffer().is_some()
}

/// Write a warning message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn warn(msg: String) {
    let mut guard = buffer();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// Log sink for `tracing-subscriber` that routes through the buffer.
///
/// The fmt layer writes each event in a single call, so one write maps to
/// one buffered message.
#[derive(Debug, Default, Clone, Copy)]
pub struct Writer;

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = buffer();
        if let Some(messages) = guard.as_mut() {
            let text = String::from_utf8_lossy(buf);
            messages.push(text.trim_end_matches('\n').to_string());
            Ok(buf.len())
        } else {
            drop(guard);
            io::stderr().write_all(buf)?;
            Ok(buf.len())
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Convenience macro that works like `eprintln!` but routes through the
/// stderr buffer when it is active.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::warn(format!($($arg)*))
    };
}
