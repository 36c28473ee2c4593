//! The channel logger.
//!
//! # Responsibilities
//! - Gate every call on the channel registry
//! - Format positional arguments and build the final display string
//! - Consult the fatal handler for FatalError
//! - Route the line to the sink and notify observers
//!
//! # Design Decisions
//! - Explicitly constructed and shared via `Arc`; no global instance
//! - Suppressed calls do no formatting and no allocation
//! - No lock or `ArcSwap` guard is held while the fatal handler runs
//! - Missing channel colors fall back to the theme foreground and are
//!   reported to the sink once per channel

use arc_swap::ArcSwap;
use dashmap::DashSet;
use std::fmt::Display;
use std::sync::Arc;

use crate::channels::{Channel, ChannelRegistry, ColorTable, Theme};
use crate::config::LoggerConfig;
use crate::dispatch::fatal::{
    ContinueOnFatal, FatalDecision, FatalHandler, FatalHandlerKind, HaltOnFatal, TerminalPrompt,
};
use crate::dispatch::format::{format_message, FormatError};
use crate::dispatch::markup;
use crate::dispatch::observer::{LogEvent, LogObserver, ObserverId, ObserverList};
use crate::dispatch::sink::{LogSink, TracingSink};
use crate::dispatch::{Priority, SinkLevel};
use crate::observability::metrics;

/// Errors surfaced by a log call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

/// What happened to a log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The channel is inactive; nothing was written.
    Suppressed,
    /// Written to the sink and observers.
    Emitted,
    /// Written, and the fatal handler asked the host to halt.
    HaltRequested,
    /// `assert` was called with a true condition; nothing to report.
    Skipped,
}

/// Theme and channel colors, swapped as one unit.
#[derive(Debug, Clone, Default)]
struct Palette {
    theme: Theme,
    colors: ColorTable,
}

/// Channel-gated logger.
pub struct Logger {
    registry: Arc<ChannelRegistry>,
    palette: ArcSwap<Palette>,
    sink: Arc<dyn LogSink>,
    fatal: Arc<dyn FatalHandler>,
    observers: ObserverList,
    /// Channels already reported as missing a color.
    warned: DashSet<Channel>,
    metrics_enabled: bool,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Build a logger from a loaded configuration, writing to `sink`.
    pub fn from_config(config: &LoggerConfig, sink: impl LogSink + 'static) -> Self {
        Self::builder().config(config).sink(sink).build()
    }

    /// The registry gating this logger.
    pub fn registry(&self) -> &Arc<ChannelRegistry> {
        &self.registry
    }

    pub fn is_active(&self, channel: Channel) -> bool {
        self.registry.is_active(channel)
    }

    /// Log a message verbatim.
    pub fn log(&self, channel: Channel, priority: Priority, message: &str) -> Outcome {
        if !self.registry.is_active(channel) {
            return self.suppressed(channel);
        }
        self.dispatch(channel, priority, message)
    }

    /// Log a message after substituting `{N}` placeholders.
    ///
    /// An inactive channel returns `Suppressed` without checking the
    /// template. A malformed template or argument mismatch writes nothing.
    pub fn log_fmt(
        &self,
        channel: Channel,
        priority: Priority,
        template: &str,
        args: &[&dyn Display],
    ) -> Result<Outcome, LogError> {
        if !self.registry.is_active(channel) {
            return Ok(self.suppressed(channel));
        }
        let message = format_message(template, args)?;
        Ok(self.dispatch(channel, priority, &message))
    }

    pub fn info(&self, channel: Channel, message: &str) -> Outcome {
        self.log(channel, Priority::Info, message)
    }

    pub fn warning(&self, channel: Channel, message: &str) -> Outcome {
        self.log(channel, Priority::Warning, message)
    }

    pub fn error(&self, channel: Channel, message: &str) -> Outcome {
        self.log(channel, Priority::Error, message)
    }

    pub fn fatal(&self, channel: Channel, message: &str) -> Outcome {
        self.log(channel, Priority::FatalError, message)
    }

    /// Log a fatal error on the Assert channel when `condition` is false.
    ///
    /// Returns `Skipped` when the condition holds, and `Suppressed` when it
    /// fails but the Assert channel is inactive.
    pub fn assert(&self, condition: bool, message: &str) -> Outcome {
        if condition {
            return Outcome::Skipped;
        }
        self.log(
            Channel::Assert,
            Priority::FatalError,
            &format!("Assert Failed: {}", message),
        )
    }

    /// Register an observer; it runs after every emitted call.
    pub fn subscribe(&self, observer: impl LogObserver + 'static) -> ObserverId {
        self.observers.subscribe(Arc::new(observer))
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Replace the channel colors. Missing-color warnings may fire again.
    pub fn set_colors(&self, colors: ColorTable) {
        self.palette.rcu(|current| Palette {
            theme: current.theme,
            colors: colors.clone(),
        });
        self.warned.clear();
    }

    pub fn set_theme(&self, theme: Theme) {
        self.palette.rcu(|current| Palette {
            theme,
            colors: current.colors.clone(),
        });
    }

    /// Apply a (re)loaded configuration: channel states, colors and theme.
    pub fn apply_config(&self, config: &LoggerConfig) {
        let states = config.channel_states();
        let enabled = states.values().filter(|e| **e).count();
        self.registry.replace_all(states);
        self.palette.store(Arc::new(Palette {
            theme: config.theme,
            colors: config.color_table(),
        }));
        self.warned.clear();

        tracing::debug!(
            channels = self.registry.len(),
            enabled,
            theme = ?config.theme,
            "Applied logger configuration"
        );
    }

    fn suppressed(&self, channel: Channel) -> Outcome {
        if self.metrics_enabled {
            metrics::record_suppressed(channel);
        }
        Outcome::Suppressed
    }

    fn dispatch(&self, channel: Channel, priority: Priority, message: &str) -> Outcome {
        let final_message = self.finalize(channel, priority, message);

        let decision = if priority == Priority::FatalError {
            self.fatal.on_fatal(&final_message)
        } else {
            FatalDecision::Continue
        };

        self.sink.write(priority.sink_level(), &final_message);
        if self.metrics_enabled {
            metrics::record_event(channel, priority);
        }

        let faults = self.observers.notify(&LogEvent {
            channel,
            priority,
            message: final_message,
        });
        if faults > 0 && self.metrics_enabled {
            metrics::record_observer_faults(faults);
        }

        match decision {
            FatalDecision::Continue => Outcome::Emitted,
            FatalDecision::Halt => {
                tracing::warn!(channel = %channel, "Fatal handler requested halt");
                Outcome::HaltRequested
            }
        }
    }

    /// Fatal messages go to targets that cannot render markup, so they stay plain.
    fn finalize(&self, channel: Channel, priority: Priority, message: &str) -> String {
        if priority == Priority::FatalError {
            return markup::plain(channel, message);
        }

        let palette = self.palette.load();
        let priority_color = priority.color(palette.theme);
        match palette.colors.get(channel) {
            Some(color) => markup::colored(channel, color, &priority_color, message),
            None => {
                if self.warned.insert(channel) {
                    self.sink.write(
                        SinkLevel::Warning,
                        &format!("Please add colour for channel {}", channel),
                    );
                }
                markup::colored(channel, &palette.theme.foreground(), &priority_color, message)
            }
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("registry", &self.registry)
            .field("palette", &self.palette.load_full())
            .field("observers", &self.observers)
            .finish()
    }
}

/// Builder for [`Logger`].
pub struct LoggerBuilder {
    registry: Option<Arc<ChannelRegistry>>,
    sink: Arc<dyn LogSink>,
    fatal: Arc<dyn FatalHandler>,
    palette: Palette,
    metrics_enabled: bool,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            registry: None,
            sink: Arc::new(TracingSink),
            fatal: Arc::new(ContinueOnFatal),
            palette: Palette {
                theme: Theme::default(),
                colors: ColorTable::builtin(),
            },
            metrics_enabled: true,
        }
    }

    /// Share an existing registry instead of creating one.
    pub fn registry(mut self, registry: Arc<ChannelRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn fatal_handler(mut self, handler: impl FatalHandler + 'static) -> Self {
        self.fatal = Arc::new(handler);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.palette.theme = theme;
        self
    }

    pub fn colors(mut self, colors: ColorTable) -> Self {
        self.palette.colors = colors;
        self
    }

    pub fn metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    /// Take theme, colors, fatal handler, metrics switch and channel
    /// states from `config`.
    pub fn config(mut self, config: &LoggerConfig) -> Self {
        self.palette = Palette {
            theme: config.theme,
            colors: config.color_table(),
        };
        self.fatal = match config.fatal.handler {
            FatalHandlerKind::Continue => Arc::new(ContinueOnFatal),
            FatalHandlerKind::Halt => Arc::new(HaltOnFatal),
            FatalHandlerKind::Prompt => Arc::new(TerminalPrompt),
        };
        self.metrics_enabled = config.observability.metrics_enabled;
        self.registry = Some(Arc::new(ChannelRegistry::with_states(config.channel_states())));
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            registry: self.registry.unwrap_or_default(),
            palette: ArcSwap::from_pointee(self.palette),
            sink: self.sink,
            fatal: self.fatal,
            observers: ObserverList::new(),
            warned: DashSet::new(),
            metrics_enabled: self.metrics_enabled,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::sink::MemorySink;
    use crate::channels::Color;
    use ::metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, SharedString, Unit};
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn logger() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder().sink(sink.clone()).metrics(false).build();
        (logger, sink)
    }

    #[test]
    fn test_info_is_colored() {
        let (logger, sink) = logger();
        assert_eq!(logger.info(Channel::Rendering, "frame"), Outcome::Emitted);

        assert_eq!(
            sink.at(SinkLevel::Info),
            vec!["<b><color=#008000>[Rendering] </color></b> <color=white>frame</color>"]
        );
    }

    #[test]
    fn test_priority_routing() {
        let (logger, sink) = logger();
        logger.warning(Channel::AI, "w");
        logger.error(Channel::AI, "e");
        logger.fatal(Channel::AI, "f");

        assert_eq!(sink.at(SinkLevel::Warning).len(), 1);
        assert!(sink.at(SinkLevel::Warning)[0].contains("<color=orange>w</color>"));
        assert_eq!(sink.at(SinkLevel::Error), vec![
            "<b><color=#0000FF>[AI] </color></b> <color=red>e</color>".to_string(),
            "[AI] f".to_string(),
        ]);
        assert!(sink.at(SinkLevel::Info).is_empty());
    }

    #[test]
    fn test_inactive_channel_is_silent() {
        let (logger, sink) = logger();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        logger.subscribe(move |_: &LogEvent| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        logger.registry().remove(Channel::Audio);
        assert_eq!(logger.info(Channel::Audio, "beep"), Outcome::Suppressed);
        assert_eq!(
            logger.log_fmt(Channel::Audio, Priority::Info, "bad {5}", &[]),
            Ok(Outcome::Suppressed)
        );

        logger.registry().add(Channel::Audio).unwrap();
        logger.registry().toggle(Channel::Audio).unwrap();
        assert_eq!(logger.error(Channel::Audio, "beep"), Outcome::Suppressed);

        assert!(sink.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_log_fmt() {
        let (logger, sink) = logger();
        let outcome = logger
            .log_fmt(Channel::Physics, Priority::Info, "count={0}", &[&3])
            .unwrap();
        assert_eq!(outcome, Outcome::Emitted);
        assert!(sink.at(SinkLevel::Info)[0].contains("count=3"));
    }

    #[test]
    fn test_log_fmt_mismatch_writes_nothing() {
        let (logger, sink) = logger();
        let err = logger
            .log_fmt(Channel::Physics, Priority::Error, "{0} {1}", &[&3])
            .unwrap_err();
        assert_eq!(
            err,
            LogError::Format(FormatError::MissingArgument { index: 1, available: 1 })
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_assert() {
        let (logger, sink) = logger();
        assert_eq!(logger.assert(true, "oops"), Outcome::Skipped);
        assert!(sink.is_empty());

        assert_eq!(logger.assert(false, "oops"), Outcome::Emitted);
        assert_eq!(sink.at(SinkLevel::Error), vec!["[Assert] Assert Failed: oops"]);
    }

    #[test]
    fn test_missing_color_warns_once() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .sink(sink.clone())
            .colors(ColorTable::empty())
            .theme(Theme::Light)
            .metrics(false)
            .build();

        logger.info(Channel::UI, "first");
        logger.info(Channel::UI, "second");

        let warnings = sink.at(SinkLevel::Warning);
        assert_eq!(warnings, vec!["Please add colour for channel UI"]);
        let infos = sink.at(SinkLevel::Info);
        assert_eq!(infos.len(), 2);
        assert!(infos[1].starts_with("<b><color=black>[UI] </color></b>"));

        // New color table, new chance to warn
        logger.set_colors(ColorTable::empty());
        logger.info(Channel::UI, "third");
        assert_eq!(sink.at(SinkLevel::Warning).len(), 2);
    }

    #[test]
    fn test_fatal_handler_decides() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .sink(sink.clone())
            .metrics(false)
            .fatal_handler(move |msg: &str| {
                s.lock().unwrap().push(msg.to_string());
                FatalDecision::Halt
            })
            .build();

        assert_eq!(logger.fatal(Channel::Platform, "gpu lost"), Outcome::HaltRequested);
        assert_eq!(*seen.lock().unwrap(), vec!["[Platform] gpu lost"]);
        assert_eq!(sink.at(SinkLevel::Error), vec!["[Platform] gpu lost"]);

        // Non-fatal priorities never reach the handler
        logger.error(Channel::Platform, "recoverable");
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_observers_receive_final_message() {
        let (logger, _sink) = logger();
        let events = Arc::new(Mutex::new(Vec::new()));
        let e = events.clone();
        let id = logger.subscribe(move |event: &LogEvent| e.lock().unwrap().push(event.clone()));

        logger.warning(Channel::Loading, "slow");
        assert!(logger.unsubscribe(id));
        logger.warning(Channel::Loading, "ignored");

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].channel, Channel::Loading);
        assert_eq!(events[0].priority, Priority::Warning);
        assert!(events[0].message.contains("<color=orange>slow</color>"));
    }

    #[test]
    fn test_apply_config() {
        let (logger, sink) = logger();
        let config: LoggerConfig = toml::from_str(
            r##"
            theme = "light"

            [[channels]]
            name = "AI"
            enabled = false

            [[channels]]
            name = "Build"
            color = "#123456"
            "##,
        )
        .unwrap();

        logger.apply_config(&config);

        assert!(!logger.is_active(Channel::AI));
        assert!(!logger.is_active(Channel::Rendering));
        assert_eq!(logger.info(Channel::Build, "ok"), Outcome::Emitted);
        assert_eq!(
            sink.at(SinkLevel::Info),
            vec!["<b><color=#123456>[Build] </color></b> <color=black>ok</color>"]
        );
    }

    #[test]
    fn test_concurrent_theme_and_colors_both_apply() {
        for _ in 0..50 {
            let (logger, sink) = logger();
            let logger = Arc::new(logger);
            let mut colors = ColorTable::empty();
            colors.insert(Channel::Build, Color::new("#123456").unwrap());

            let themer = {
                let logger = logger.clone();
                std::thread::spawn(move || logger.set_theme(Theme::Light))
            };
            let painter = {
                let logger = logger.clone();
                std::thread::spawn(move || logger.set_colors(colors))
            };
            themer.join().unwrap();
            painter.join().unwrap();

            logger.info(Channel::Build, "x");
            assert_eq!(
                sink.at(SinkLevel::Info),
                vec!["<b><color=#123456>[Build] </color></b> <color=black>x</color>"]
            );
        }
    }

    /// Counts `logger_observer_faults_total` increments on this thread.
    struct FaultRecorder(Arc<AtomicU64>);

    impl ::metrics::Recorder for FaultRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            if key.name() == "logger_observer_faults_total" {
                Counter::from_arc(self.0.clone())
            } else {
                Counter::noop()
            }
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    #[test]
    fn test_observer_faults_follow_metrics_switch() {
        let faults = Arc::new(AtomicU64::new(0));
        let recorder = FaultRecorder(faults.clone());

        for enabled in [false, true] {
            let logger = Logger::builder()
                .sink(MemorySink::new())
                .metrics(enabled)
                .build();
            logger.subscribe(|_: &LogEvent| {
                panic!("observer bug");
            });
            ::metrics::with_local_recorder(&recorder, || {
                logger.info(Channel::UI, "click");
            });
            assert_eq!(faults.load(Ordering::SeqCst), u64::from(enabled));
        }
    }

    #[test]
    fn test_builder_from_config() {
        let mut config = LoggerConfig::default();
        config.fatal.handler = FatalHandlerKind::Halt;
        config.observability.metrics_enabled = false;
        config.channels.retain(|c| c.name != "Player");

        let logger = Logger::from_config(&config, MemorySink::new());
        assert!(!logger.is_active(Channel::Player));
        assert!(logger.is_active(Channel::AI));
        assert_eq!(logger.assert(false, "x"), Outcome::HaltRequested);
    }
}
