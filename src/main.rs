use anyhow::Context;
use enkk_scraper::browser::WebDriverPage;
use enkk_scraper::config::Config;
use enkk_scraper::export::excel::save_output;
use enkk_scraper::pipeline::{self, RunContext};
use enkk_scraper::{input, logger};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    let mut ctx = RunContext::new(&config.output_dir);

    let log_path = logger::init(&config.log_dir, ctx.run_stamp()).context("opening log file")?;
    println!("enkk-scraper - log: {}", log_path.display());

    // 1. Browser
    println!("[1/3] Opening browser session...");
    let mut page = WebDriverPage::connect(&config)
        .await
        .with_context(|| format!("connecting to WebDriver at {}", config.webdriver_url))?;

    // 2. Inputs
    let records = input::load_records(&config.input_path, &config.input_columns)
        .with_context(|| format!("reading {}", config.input_path.display()))?;
    println!("[2/3] {} rows to look up", records.len());

    // 3. Lookup
    println!("[3/3] Querying registry...");
    let progress = ProgressBar::new(records.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} [{elapsed_precise}] eta {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    pipeline::run(&mut page, &records, &config, &mut ctx, &progress).await?;
    progress.finish();

    page.close().await?;

    save_output(&ctx.output, ctx.output_path())
        .with_context(|| format!("writing {}", ctx.output_path().display()))?;

    info!("Run finished: {} input rows, {} output rows", ctx.total_rows, ctx.output.len());
    println!("Done: {}", ctx.output_path().display());
    Ok(())
}
