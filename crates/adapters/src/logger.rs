//! Logger adapter forwarding structured events to `tracing`.

use cms_admin_ports::{LogEvent, LogFields, LogLevel, LoggerPort};
use serde_json::Value;

/// Logger that re-emits port events through the `tracing` macros.
///
/// Subscribers decide formatting and filtering; the event name and serialized
/// fields travel as `event` and `fields`.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    base_fields: LogFields,
    min_level: LogLevel,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingLogger {
    /// Logger forwarding every level.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base_fields: LogFields::new(),
            min_level: LogLevel::Debug,
        }
    }

    /// Set base fields applied to every event.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    fn render_fields(&self, extra: Option<LogFields>) -> String {
        let mut fields = self.base_fields.clone();
        if let Some(extra) = extra {
            fields.extend(extra);
        }
        if fields.is_empty() {
            return String::new();
        }

        let map: serde_json::Map<String, Value> = fields
            .into_iter()
            .map(|(key, value)| (key.into_string(), value))
            .collect();
        serde_json::to_string(&Value::Object(map)).unwrap_or_default()
    }
}

impl LoggerPort for TracingLogger {
    fn log(&self, event: LogEvent) {
        if event.level < self.min_level {
            return;
        }

        let fields = self.render_fields(event.fields);
        let name = &*event.event;
        let message = &*event.message;
        match event.level {
            LogLevel::Debug => tracing::debug!(event = name, fields = %fields, "{message}"),
            LogLevel::Info => tracing::info!(event = name, fields = %fields, "{message}"),
            LogLevel::Warn => tracing::warn!(event = name, fields = %fields, "{message}"),
            LogLevel::Error => tracing::error!(event = name, fields = %fields, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl CapturedOutput {
        fn contents(&self) -> String {
            self.0
                .lock()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default()
        }
    }

    impl io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .map_err(|_| io::Error::other("capture buffer poisoned"))?
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(logger: &TracingLogger, emit: impl FnOnce(&TracingLogger)) -> String {
        let output = CapturedOutput::default();
        let writer = output.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, || emit(logger));
        output.contents()
    }

    #[test]
    fn event_fields_override_base_fields() {
        let mut base = LogFields::new();
        base.insert("service".into(), json!("admin"));
        base.insert("ids".into(), json!(0));
        let logger = TracingLogger::new().with_base_fields(base);

        let mut extra = LogFields::new();
        extra.insert("ids".into(), json!(2));
        assert_eq!(
            logger.render_fields(Some(extra)),
            r#"{"ids":2,"service":"admin"}"#
        );
    }

    #[test]
    fn empty_fields_render_as_empty_string() {
        assert_eq!(TracingLogger::new().render_fields(None), "");
    }

    #[test]
    fn events_below_min_level_are_dropped() {
        let logger = TracingLogger::new().with_min_level(LogLevel::Warn);
        let output = capture(&logger, |logger| {
            logger.debug("admin.role.delete.rejected", "ignored", None);
            logger.info("admin.role.delete.rejected", "also ignored", None);
            logger.error("admin.role.delete.checkFailed", "forwarded", None);
        });

        assert!(output.contains("forwarded"));
        assert!(output.contains("admin.role.delete.checkFailed"));
        assert!(!output.contains("ignored"));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn forwarded_events_carry_rendered_fields() {
        let mut base = LogFields::new();
        base.insert("source".into(), json!("cmsv"));
        let logger = TracingLogger::new().with_base_fields(base);
        let output = capture(&logger, |logger| {
            logger.warn("admin.role.delete.rejected", "role is protected", None);
        });

        assert!(output.contains("WARN"));
        assert!(output.contains("role is protected"));
        assert!(output.contains(r#"{"source":"cmsv"}"#));
    }
}
