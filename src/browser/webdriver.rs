//! WebDriver implementation of the registry page (chromedriver via fantoccini)

use super::{PageError, RegistryPage};
use crate::config::Config;
use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use enkk_common::SearchQuery;
use fantoccini::actions::{InputSource, MouseActions, PointerAction, MOUSE_BUTTON_LEFT};
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use log::{debug, info};
use std::time::Duration;

/// Element locations and quirks of the registry search page
#[derive(Debug, Clone)]
pub struct SiteLayout {
    pub name_field_id: String,
    pub number_field_id: String,
    /// Slider handle that has to be dragged open before searching
    pub toggle_handle_xpath: String,
    /// Text element telling whether the slider is open
    pub toggle_status_xpath: String,
    pub toggle_closed_prefix: String,
    pub toggle_drag_offset_x: i64,
    pub submit_xpath: String,
    pub results_table_id: String,
    /// Visible text of a profile link in the result table
    pub profile_link_text: String,
    pub first_result_xpath: String,
    pub status_cell_xpath: String,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            name_field_id: "nev".into(),
            number_field_id: "szam".into(),
            toggle_handle_xpath: r#"//*[@id="FORMkeres"]/div[2]/div[1]/div"#.into(),
            toggle_status_xpath: r#"//*[@id="FORMkeres"]/div[2]/div[3]"#.into(),
            toggle_closed_prefix: "Zárva".into(),
            toggle_drag_offset_x: 182,
            submit_xpath: r#"//*[@id="ok"]"#.into(),
            results_table_id: "searchresultTABLE".into(),
            profile_link_text: "Adatlap".into(),
            first_result_xpath: r#"//*[@id="searchresultTABLE"]/tbody/tr[4]/td[4]/a"#.into(),
            status_cell_xpath:
                r#"//*[@id="searchresultTABLE"]/tbody/tr[3]/td/table/tbody/tr[3]/td"#.into(),
        }
    }
}

impl SiteLayout {
    fn profile_links_xpath(&self) -> String {
        format!("//a[contains(., '{}')]", self.profile_link_text)
    }
}

impl From<CmdError> for ScraperError {
    fn from(e: CmdError) -> Self {
        ScraperError::Browser(e.to_string())
    }
}

pub struct WebDriverPage {
    client: Client,
    layout: SiteLayout,
    result_wait: Duration,
    slider_sleep: Duration,
    click_sleep: Duration,
}

impl WebDriverPage {
    /// Start a headless Chrome session and open the search page
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut capabilities = serde_json::Map::new();
        capabilities.insert(
            "goog:chromeOptions".to_string(),
            serde_json::json!({ "args": config.browser_args }),
        );

        let client = ClientBuilder::native()
            .capabilities(capabilities)
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| ScraperError::BrowserSession(e.to_string()))?;

        client.goto(&config.url).await?;
        tokio::time::sleep(config.init_sleep()).await;
        info!("Browser session opened at {}", config.url);

        Ok(Self {
            client,
            layout: SiteLayout::default(),
            result_wait: config.result_wait(),
            slider_sleep: config.slider_sleep(),
            click_sleep: config.click_sleep(),
        })
    }

    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        info!("Browser session closed");
        Ok(())
    }

    async fn fill_field(&self, id: &str, value: &str) -> Result<()> {
        let field = self.client.find(Locator::Id(id)).await?;
        field.clear().await?;
        field.send_keys(value).await?;
        Ok(())
    }

    async fn toggle_is_closed(&self) -> Result<bool> {
        let status = self
            .client
            .find(Locator::XPath(&self.layout.toggle_status_xpath))
            .await?;
        let text = status.text().await?;
        Ok(text.starts_with(&self.layout.toggle_closed_prefix))
    }

    /// Click and hold the slider handle, move it right, release
    async fn drag_toggle_open(&self) -> Result<()> {
        let handle = self
            .client
            .find(Locator::XPath(&self.layout.toggle_handle_xpath))
            .await?;

        let drag = MouseActions::new("mouse".to_string())
            .then(PointerAction::MoveToElement {
                element: handle,
                duration: None,
                x: 0,
                y: 0,
            })
            .then(PointerAction::Down {
                button: MOUSE_BUTTON_LEFT,
            })
            .then(PointerAction::MoveBy {
                duration: None,
                x: self.layout.toggle_drag_offset_x,
                y: 0,
            })
            .then(PointerAction::Up {
                button: MOUSE_BUTTON_LEFT,
            });

        self.client.perform_actions(drag).await?;
        self.client.release_actions().await?;
        Ok(())
    }
}

#[async_trait]
impl RegistryPage for WebDriverPage {
    async fn fill_search(&mut self, query: &SearchQuery) -> Result<()> {
        self.fill_field(&self.layout.name_field_id, &query.search_name).await?;
        self.fill_field(&self.layout.number_field_id, &query.search_number).await?;
        Ok(())
    }

    async fn submit(&mut self) -> Result<()> {
        if self.toggle_is_closed().await? {
            debug!("Search toggle closed, dragging it open");
            self.drag_toggle_open().await?;
            tokio::time::sleep(self.slider_sleep).await;
        }

        self.client
            .find(Locator::XPath(&self.layout.submit_xpath))
            .await?
            .click()
            .await?;
        tokio::time::sleep(self.click_sleep).await;
        Ok(())
    }

    async fn count_results(&mut self) -> Result<usize> {
        let waited = self
            .client
            .wait()
            .at_most(self.result_wait)
            .for_element(Locator::Id(&self.layout.results_table_id))
            .await;

        match waited {
            Ok(_) => {}
            // a slow or missing result table is read as zero results
            Err(CmdError::WaitTimeout) => {
                debug!("Result table did not appear within {:?}", self.result_wait);
            }
            Err(e) => return Err(e.into()),
        }

        let xpath = self.layout.profile_links_xpath();
        let links = self.client.find_all(Locator::XPath(&xpath)).await?;
        Ok(links.len())
    }

    async fn open_profile(&mut self) -> Result<()> {
        self.client
            .find(Locator::XPath(&self.layout.first_result_xpath))
            .await?
            .click()
            .await?;
        Ok(())
    }

    async fn status_table_html(&mut self) -> std::result::Result<String, PageError> {
        let cells = self
            .client
            .find_all(Locator::XPath(&self.layout.status_cell_xpath))
            .await
            .map_err(|e| PageError::Command(e.to_string()))?;

        let cell = cells
            .into_iter()
            .next()
            .ok_or_else(|| PageError::ElementNotFound(self.layout.status_cell_xpath.clone()))?;

        cell.html(false)
            .await
            .map_err(|e| PageError::Command(e.to_string()))
    }
}
