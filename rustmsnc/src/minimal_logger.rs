use colored::Colorize;
use log::{Level, Metadata, Record};

pub struct MinimalLogger;

impl log::Log for MinimalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Inspired by https://github.com/borntyping/rust-simple_logger/blob/ce8ec4bbe5f81cfd2f7a852f68e308369ef7fa5f/src/lib.rs#L199-L203
        let level_string = match record.level() {
            Level::Error => record.level().to_string().red(),
            Level::Warn => record.level().to_string().yellow(),
            Level::Info => record.level().to_string().cyan(),
            Level::Debug => record.level().to_string().purple(),
            Level::Trace => record.level().to_string().normal(),
        };

        // stdout is reserved for the gene trees
        eprintln!("{:<5} {}", level_string, record.args());
    }

    fn flush(&self) {}
}
