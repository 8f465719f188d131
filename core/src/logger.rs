use chrono::Utc;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug)]
enum Sink {
    Stderr,
    Buffer(Rc<RefCell<String>>),
}

/// JSONL logger: one `ts/level/rid/subsystem/action/msg` record per line.
#[derive(Clone, Debug)]
pub struct Logger {
    rid: u64,
    sink: Sink,
}

impl Logger {
    /// Creates a logger that keeps every record on stderr, leaving stdout for
    /// prompt text.
    ///
    /// # Panics
    ///
    /// Panics if `rid` is zero.
    #[must_use]
    pub fn stderr(rid: u64) -> Self {
        assert!(rid > 0, "Logger rid must be non-zero");
        Self { rid, sink: Sink::Stderr }
    }

    /// Creates a logger for tests that captures output in a string buffer.
    ///
    /// # Panics
    ///
    /// Panics if `rid` is zero.
    #[must_use]
    pub fn new_for_test(rid: u64, buffer: Rc<RefCell<String>>) -> Self {
        assert!(rid > 0, "Logger rid must be non-zero");
        Self { rid, sink: Sink::Buffer(buffer) }
    }

    pub fn info(&self, subsystem: &str, action: &str, message: &str) {
        self.emit("info", subsystem, action, message);
    }

    pub fn error(&self, subsystem: &str, action: &str, message: &str) {
        self.emit("error", subsystem, action, message);
    }

    fn emit(&self, level: &str, subsystem: &str, action: &str, message: &str) {
        let log_entry = json!({
            "ts": Utc::now().to_rfc3339(),
            "level": level,
            "rid": self.rid,
            "subsystem": subsystem,
            "action": action,
            "msg": message,
        });

        match &self.sink {
            Sink::Buffer(buf) => {
                let mut writer = buf.borrow_mut();
                writer.push_str(&log_entry.to_string());
                writer.push('\n');
            }
            Sink::Stderr => eprintln!("{log_entry}"),
        }
    }
}
