//! Logger setup shared by the binary and by library users that want the same output.
//!
//! Log records always go to the terminal; if `log_file` is set in the settings they are
//! also written to that file. Calling `init_logger` a second time is harmless: the first
//! logger stays in place.
use crate::errors::MechGraphResult;
use crate::settings::MechGraphSettings;
use log::debug;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;

pub fn init_logger(settings: &MechGraphSettings) -> MechGraphResult<()> {
    let level = settings.level_filter();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));
    if let Some(log_file) = &settings.log_file {
        loggers.push(WriteLogger::new(
            level,
            Config::default(),
            File::create(log_file)?,
        ));
    }
    if CombinedLogger::init(loggers).is_err() {
        debug!("logger already initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_init_twice_with_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut settings = MechGraphSettings::new();
        settings.log_file = Some(temp_file.path().to_str().unwrap().to_string());
        assert!(init_logger(&settings).is_ok());
        assert!(init_logger(&MechGraphSettings::new()).is_ok());
    }

    #[test]
    fn test_unwritable_log_file() {
        let mut settings = MechGraphSettings::new();
        settings.log_file = Some("/no/such/directory/mechgraph.log".to_string());
        assert!(init_logger(&settings).is_err());
    }
}
