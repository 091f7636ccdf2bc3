//! Pipeline tests against a scripted registry page
//!
//! The fake page answers searches from a queue of result counts and
//! profile requests from a queue of status cell HTML.

use async_trait::async_trait;
use calamine::{open_workbook_auto, Reader};
use enkk_common::{InputRecord, SearchQuery, COLUMN_ORDER};
use enkk_scraper::browser::{PageError, RegistryPage};
use enkk_scraper::config::Config;
use enkk_scraper::error::{Result, ScraperError};
use enkk_scraper::pipeline::{self, process_record, RunContext};
use indicatif::ProgressBar;
use std::collections::VecDeque;
use tempfile::tempdir;

#[derive(Default)]
struct FakePage {
    counts: VecDeque<usize>,
    profiles: VecDeque<std::result::Result<String, PageError>>,
    searched: Vec<SearchQuery>,
    submits: usize,
    opened: usize,
    fail_search: bool,
}

impl FakePage {
    fn with_counts(counts: &[usize]) -> Self {
        Self {
            counts: counts.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn profile(mut self, html: &str) -> Self {
        self.profiles.push_back(Ok(html.to_string()));
        self
    }

    fn missing_profile(mut self) -> Self {
        self.profiles
            .push_back(Err(PageError::ElementNotFound("status cell".into())));
        self
    }
}

#[async_trait]
impl RegistryPage for FakePage {
    async fn fill_search(&mut self, query: &SearchQuery) -> Result<()> {
        if self.fail_search {
            return Err(ScraperError::Browser("session lost".into()));
        }
        self.searched.push(query.clone());
        Ok(())
    }

    async fn submit(&mut self) -> Result<()> {
        self.submits += 1;
        Ok(())
    }

    async fn count_results(&mut self) -> Result<usize> {
        Ok(self.counts.pop_front().unwrap_or(0))
    }

    async fn open_profile(&mut self) -> Result<()> {
        self.opened += 1;
        Ok(())
    }

    async fn status_table_html(&mut self) -> std::result::Result<String, PageError> {
        self.profiles
            .pop_front()
            .unwrap_or_else(|| Err(PageError::ElementNotFound("no profile scripted".into())))
    }
}

const HEADER: &str = "<tr><td>Szakképesítés</td><td>Érvényesség</td><td>Státusz</td>\
    <td>Korlátozott alkalmasság</td></tr>";

fn status_cell(rows: &[(&str, &str, &str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(q, v, s, r)| format!("<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>", q, v, s, r))
        .collect();
    format!(
        "<td><table><tbody><tr><td colspan=\"4\">Működési nyilvántartás</td></tr>{}{}</tbody></table></td>",
        HEADER, body
    )
}

fn kovacs() -> InputRecord {
    InputRecord {
        name: "Dr. Kovács János".into(),
        registration_id: "12345-A".into(),
        job_title: "orvos".into(),
        pay_office: "X kórház".into(),
    }
}

fn person(name: &str, id: &str) -> InputRecord {
    InputRecord {
        name: name.into(),
        registration_id: id.into(),
        job_title: "ápoló".into(),
        pay_office: "Y rendelő".into(),
    }
}

#[tokio::test]
async fn test_single_match_end_to_end() {
    let html = status_cell(&[("belgyógyász", "2010-01-01 - 2030-01-01", "aktív", "nincs")]);
    let mut page = FakePage::with_counts(&[1]).profile(&html);

    let rows = process_record(&mut page, &kovacs(), 1).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].columns(),
        [
            "Dr. Kovács János",
            "orvos",
            "X kórház",
            "12345",
            "2010-01-01",
            "2030-01-01",
            "belgyógyász",
            "aktív",
            "nincs",
        ]
    );
    assert_eq!(page.searched.len(), 1);
    assert_eq!(page.searched[0].search_name, "jános");
    assert_eq!(page.searched[0].search_number, "12345");
    assert_eq!(page.opened, 1);
}

#[tokio::test]
async fn test_multiple_qualifications_replicate_basic_fields() {
    let html = status_cell(&[
        ("belgyógyász", "2010-01-01 - 2030-01-01", "aktív", "nincs"),
        ("kardiológus", "2015-03-01 - 2035-03-01", "aktív", "nincs"),
        ("belgyógyász", "2001-01-01 - 2009-01-01", "lejárt", "nincs"),
    ]);
    let mut page = FakePage::with_counts(&[1]).profile(&html);

    let rows = process_record(&mut page, &kovacs(), 1).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.name == "Dr. Kovács János" && r.registration_number == "12345"));
    assert_eq!(rows[1].qualification, "kardiológus");
}

#[tokio::test]
async fn test_no_match_is_noname() {
    let mut page = FakePage::with_counts(&[0]);

    let rows = process_record(&mut page, &kovacs(), 1).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].qualification, "# HIBA - HIÁNYZÓ NÉV");
    assert_eq!(rows[0].validity_start, "# HIBA - HIÁNYZÓ NÉV");
    assert_eq!(rows[0].name, "Dr. Kovács János");
    assert_eq!(page.opened, 0);
    assert_eq!(page.searched.len(), 1);
}

#[tokio::test]
async fn test_ambiguous_then_resolved_by_retry() {
    let html = status_cell(&[("sebész", "2012-01-01 - 2032-01-01", "aktív", "nincs")]);
    let mut page = FakePage::with_counts(&[3, 1]).profile(&html);

    let rows = process_record(&mut page, &kovacs(), 1).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].qualification, "sebész");
    assert_eq!(page.searched.len(), 2);
    assert_eq!(page.searched[1].search_name, "Kovács János");
    assert_eq!(page.searched[1].search_number, "12345");
    assert_eq!(page.submits, 2);
    assert_eq!(page.opened, 1);
}

#[tokio::test]
async fn test_ambiguous_retry_still_ambiguous_is_duplicate() {
    let mut page = FakePage::with_counts(&[3, 2, 1]);

    let rows = process_record(&mut page, &kovacs(), 1).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].qualification, "# HIBA - NÉV EGYEZŐSÉG");
    // exactly one retry, the third scripted count is never consumed
    assert_eq!(page.searched.len(), 2);
    assert_eq!(page.counts.len(), 1);
    assert_eq!(page.opened, 0);
}

#[tokio::test]
async fn test_ambiguous_retry_empty_is_duplicate() {
    let mut page = FakePage::with_counts(&[2, 0]);

    let rows = process_record(&mut page, &kovacs(), 1).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, "# HIBA - NÉV EGYEZŐSÉG");
}

#[tokio::test]
async fn test_header_only_profile_is_empty() {
    let html = status_cell(&[]);
    let mut page = FakePage::with_counts(&[1]).profile(&html);

    let rows = process_record(&mut page, &kovacs(), 1).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].qualification, "# HIBA - ÜRES");
}

#[tokio::test]
async fn test_missing_status_cell_is_unknown() {
    let mut page = FakePage::with_counts(&[1]).missing_profile();

    let rows = process_record(&mut page, &kovacs(), 1).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].qualification, "# HIBA - ISMERETLEN HIBA");
}

#[tokio::test]
async fn test_changed_layout_is_unknown() {
    let html = "<td><table><tr><td>x</td></tr><tr><td>Név</td><td>Cím</td></tr>\
        <tr><td>a</td><td>b</td></tr></table></td>";
    let mut page = FakePage::with_counts(&[1]).profile(html);

    let rows = process_record(&mut page, &kovacs(), 1).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].restricted_fitness, "# HIBA - ISMERETLEN HIBA");
}

#[tokio::test]
async fn test_blank_restriction_column_keeps_rows() {
    let html = status_cell(&[
        ("belgyógyász", "2010-01-01 - 2030-01-01", "aktív", ""),
        ("kardiológus", "2015-03-01 - 2035-03-01", "aktív", ""),
    ]);
    let mut page = FakePage::with_counts(&[1]).profile(&html);

    let rows = process_record(&mut page, &kovacs(), 1).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].qualification, "belgyógyász");
    assert_eq!(rows[0].status, "aktív");
    assert_eq!(rows[0].restricted_fitness, "");
    assert_eq!(rows[1].qualification, "kardiológus");
}

#[tokio::test]
async fn test_open_ended_validity_keeps_start_date() {
    let html = status_cell(&[("belgyógyász", "2010-01-01", "aktív", "nincs")]);
    let mut page = FakePage::with_counts(&[1]).profile(&html);

    let rows = process_record(&mut page, &kovacs(), 1).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].validity_start, "2010-01-01");
    assert_eq!(rows[0].validity_end, "");
    assert_eq!(rows[0].qualification, "belgyógyász");
}

#[tokio::test]
async fn test_browser_failure_while_searching_is_fatal() {
    let mut page = FakePage {
        fail_search: true,
        ..Default::default()
    };

    let result = process_record(&mut page, &kovacs(), 1).await;
    assert!(matches!(result, Err(ScraperError::Browser(_))));
}

#[tokio::test]
async fn test_run_every_row_yields_output_and_checkpoints() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config {
        save_freq: 2,
        output_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let mut ctx = RunContext::new(&config.output_dir);

    let html = status_cell(&[("belgyógyász", "2010-01-01 - 2030-01-01", "aktív", "nincs")]);
    // row 1: found, row 2: none, row 3: duplicate
    let mut page = FakePage::with_counts(&[1, 0, 4, 4]).profile(&html);
    let records = vec![kovacs(), person("Nagy Éva", "555"), person("Dr. Kiss Anna", "777-B")];

    pipeline::run(&mut page, &records, &config, &mut ctx, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(ctx.total_rows, 3);
    assert_eq!(ctx.current_index, 3);
    assert_eq!(ctx.output.len(), 3);

    let names: Vec<&str> = ctx.output.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Dr. Kovács János", "Nagy Éva", "Dr. Kiss Anna"]);
    assert_eq!(ctx.output.rows()[2].registration_number, "777");

    // checkpoint after row 2 holds the first two persons only
    let path = ctx.output_path().to_path_buf();
    assert!(path.exists(), "checkpoint file missing");

    let mut workbook = open_workbook_auto(&path).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], COLUMN_ORDER.map(String::from).to_vec());
    assert_eq!(rows[1][0], "Dr. Kovács János");
    assert_eq!(rows[2][0], "Nagy Éva");
    assert_eq!(rows[2][6], "# HIBA - HIÁNYZÓ NÉV");
}

#[tokio::test]
async fn test_run_with_short_throughput_window() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config {
        save_freq: 10,
        throughput_every: 2,
        output_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let mut ctx = RunContext::new(&config.output_dir);

    let mut page = FakePage::with_counts(&[0, 0, 0, 0]);
    let records = vec![
        kovacs(),
        person("Nagy Éva", "555"),
        person("Dr. Kiss Anna", "777-B"),
        person("Tóth Péter", "888"),
    ];

    pipeline::run(&mut page, &records, &config, &mut ctx, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(ctx.current_index, 4);
    assert_eq!(ctx.output.len(), 4);
    assert_eq!(page.searched.len(), 4);
    // save_freq never reached, no checkpoint written
    assert!(!ctx.output_path().exists());
    // the last row closed a window, so the rolling timer was just restarted
    assert!(ctx.take_rolling_elapsed() < std::time::Duration::from_secs(1));
}
