//! Default resource locations and environment variable names

pub mod defaults {
    /// Base directory holding the four source files
    pub const MESSAGE_FILES_PATH: &str = "exception";

    pub const MESSAGE_FILE_NAME: &str = "message.properties";
    pub const DEBUG_FILE_NAME: &str = "debug.properties";
    pub const SOLUTION_FILE_NAME: &str = "solution.properties";
    pub const HTTP_STATUS_FILE_NAME: &str = "http_status.properties";
}

pub mod env_vars {
    pub const MESSAGE_FILES_PATH: &str = "EXCEPTION_MESSAGE_FILES_PATH";
    pub const MESSAGE_FILE_NAME: &str = "EXCEPTION_MESSAGE_FILE_NAME";
    pub const DEBUG_FILE_NAME: &str = "EXCEPTION_DEBUG_FILE_NAME";
    pub const SOLUTION_FILE_NAME: &str = "EXCEPTION_SOLUTION_FILE_NAME";
    pub const HTTP_STATUS_FILE_NAME: &str = "EXCEPTION_HTTP_STATUS_FILE_NAME";
}
