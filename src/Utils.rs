/// Reading mechanisms and graphs from disk.
pub mod load_from_file;
pub mod logger;
