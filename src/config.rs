use crate::error::{Result, ScraperError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Optional override file, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "enkk-scraper.json";

/// Header names of the input workbook columns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputColumns {
    pub name: String,
    pub number: String,
    pub job_title: String,
    pub pay_office: String,
}

impl Default for InputColumns {
    fn default() -> Self {
        Self {
            name: "name".into(),
            number: "num".into(),
            job_title: "Munkakör".into(),
            pay_office: "Kifizetőhely".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub url: String,
    pub webdriver_url: String,
    pub browser_args: Vec<String>,
    pub input_path: PathBuf,
    pub input_columns: InputColumns,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Checkpoint every N processed rows
    pub save_freq: usize,
    /// Log throughput every N processed rows
    pub throughput_every: usize,
    pub result_wait_secs: u64,
    pub slider_sleep_ms: u64,
    pub click_sleep_ms: u64,
    pub init_sleep_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "https://kereso.enkk.hu/index.php".into(),
            webdriver_url: "http://localhost:9515".into(),
            browser_args: vec![
                "--headless".into(),
                "--disable-extensions".into(),
                "--disable-dev-shm-usage".into(),
                "--no-sandbox".into(),
            ],
            input_path: PathBuf::from("input_names_ext.xlsx"),
            input_columns: InputColumns::default(),
            output_dir: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            save_freq: 10,
            throughput_every: 100,
            result_wait_secs: 20,
            slider_sleep_ms: 0,
            click_sleep_ms: 0,
            init_sleep_ms: 2000,
        }
    }
}

impl Config {
    /// Compiled-in defaults, overridden by `enkk-scraper.json` when present
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.save_freq == 0 {
            return Err(ScraperError::Config("save_freq must be at least 1".into()));
        }
        if self.throughput_every == 0 {
            return Err(ScraperError::Config("throughput_every must be at least 1".into()));
        }
        Ok(())
    }

    pub fn result_wait(&self) -> Duration {
        Duration::from_secs(self.result_wait_secs)
    }

    pub fn slider_sleep(&self) -> Duration {
        Duration::from_millis(self.slider_sleep_ms)
    }

    pub fn click_sleep(&self) -> Duration {
        Duration::from_millis(self.click_sleep_ms)
    }

    pub fn init_sleep(&self) -> Duration {
        Duration::from_millis(self.init_sleep_ms)
    }
}
