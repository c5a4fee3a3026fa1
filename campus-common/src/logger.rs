use campus_error::{CPError, CPResult};
use std::sync::{Arc, RwLock};
use tracing::{subscriber::set_global_default, Level};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    filter::DynFilterFn,
    fmt::{self},
    layer::SubscriberExt,
    Layer, Registry,
};

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "campus.log";

pub struct Logger {
    level: Arc<RwLock<Level>>,
    _file_guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn new(level: Option<Level>) -> Self {
        Logger {
            level: Arc::new(RwLock::new(level.unwrap_or(Level::INFO))),
            _file_guard: None,
        }
    }

    /// Logger at the level named in configuration, `info` when unparsable
    pub fn from_level_name(name: &str) -> Self {
        Self::new(name.parse::<Level>().ok())
    }

    #[inline]
    pub fn set_level(&self, new_level: Level) {
        let mut level = self.level.write().unwrap_or_else(|e| e.into_inner());
        *level = new_level;
    }

    #[inline]
    pub fn get_level(&self) -> Level {
        *self.level.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Install console and daily rolling file output as the global subscriber.
    pub fn initialize(&mut self) -> CPResult<()> {
        let file_appender = rolling::daily(LOG_DIR, LOG_FILE);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        self._file_guard = Some(guard);

        let console_filter = {
            let level = Arc::clone(&self.level);
            DynFilterFn::new(move |metadata, _| {
                metadata.level() <= &*level.read().unwrap_or_else(|e| e.into_inner())
            })
        };

        let file_filter = {
            let level = Arc::clone(&self.level);
            DynFilterFn::new(move |metadata, _| {
                metadata.level() <= &*level.read().unwrap_or_else(|e| e.into_inner())
            })
        };

        let console_layer = {
            #[cfg(debug_assertions)]
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true);

            #[cfg(not(debug_assertions))]
            let layer = fmt::layer().with_writer(std::io::stderr);

            layer.with_filter(console_filter)
        };

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_filter(file_filter);

        let subscriber = Registry::default().with(console_layer).with(file_layer);
        set_global_default(subscriber).map_err(|_| CPError::from("Failed to set logger"))?;
        Ok(())
    }
}
