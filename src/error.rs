use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid input workbook: {0}")]
    InputFormat(String),

    #[error("Could not start browser session: {0}")]
    BrowserSession(String),

    #[error("Browser command failed: {0}")]
    Browser(String),

    #[error("Excel output error: {0}")]
    ExcelOutput(String),

    #[error("Logger error: {0}")]
    Logger(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScraperError>;
