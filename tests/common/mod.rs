//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use enhanced_logger::{LogEvent, Logger, MemorySink};

/// A logger writing to memory, with every emitted event captured.
pub struct Harness {
    pub logger: Logger,
    pub sink: MemorySink,
    pub events: Arc<Mutex<Vec<LogEvent>>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::from_logger_builder(Logger::builder())
    }

    pub fn from_logger_builder(builder: enhanced_logger::dispatch::LoggerBuilder) -> Self {
        let sink = MemorySink::new();
        let logger = builder.sink(sink.clone()).metrics(false).build();
        let events = Arc::new(Mutex::new(Vec::new()));
        let captured = events.clone();
        logger.subscribe(move |event: &LogEvent| captured.lock().unwrap().push(event.clone()));

        Self {
            logger,
            sink,
            events,
        }
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Nothing reached the sink or the observer.
    #[allow(dead_code)]
    pub fn assert_silent(&self) {
        assert!(self.sink.is_empty(), "sink received {:?}", self.sink.lines());
        assert!(self.events().is_empty(), "observer received {:?}", self.events());
    }
}
