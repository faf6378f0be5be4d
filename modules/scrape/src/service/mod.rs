
use crate::{
    model::{ScrapeRequest, ScrapeSummary},
    provider::{CrawlClient, CrawlPage, JobStatus},
    Error,
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::instrument;
use url::Url;
use uuid::Uuid;
use vocero_common::{
    db::{limiter::LimiterTrait, Database},
    model::{Paginated, PaginatedResults},
};
use vocero_entity::{
    assistant, assistant_file,
    scraped_website::{self, Status},
};
use vocero_module_platform::PlatformClient;

/// The polling behavior of the scrape service.
///
/// One status request per tick, a fixed tick, a fixed budget. No backoff, no jitter.
#[derive(Clone, Copy, Debug)]
pub struct PollPolicy {
    pub interval: Duration,
    pub attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            attempts: 30,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScrapeService {
    db: Database,
    provider: CrawlClient,
    platform: PlatformClient,
    poll: PollPolicy,
}

impl ScrapeService {
    pub fn new(db: Database, provider: CrawlClient, platform: PlatformClient) -> Self {
        Self {
            db,
            provider,
            platform,
            poll: PollPolicy::default(),
        }
    }

    pub fn with_poll(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Start a scrape job and drive it to a terminal state.
    ///
    /// The record is created right away, the crawl is submitted, and then the provider is
    /// polled until it reports the job as done, or the attempt budget runs out. Whatever
    /// happens, the record ends up in exactly one of completed or failed.
    #[instrument(skip(self), err)]
    pub async fn start_scrape(
        &self,
        user_id: &str,
        request: ScrapeRequest,
    ) -> Result<ScrapeSummary, Error> {
        let url = Url::parse(&request.url)
            .map_err(|err| Error::BadRequest(format!("invalid URL: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::BadRequest(format!(
                "unsupported URL scheme: {}",
                url.scheme()
            )));
        }

        let Some(assistant) = assistant::Entity::find_by_id(request.assistant_id)
            .filter(assistant::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Err(Error::NotFound);
        };

        let record = scraped_website::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.to_string()),
            assistant_id: Set(assistant.id),
            url: Set(request.url.clone()),
            status: Set(Status::Queued),
            job_id: Set(None),
            page_count: Set(None),
            content_bytes: Set(None),
            error: Set(None),
            created_at: Set(OffsetDateTime::now_utc()),
            finished_at: Set(None),
        }
        .insert(&self.db)
        .await?;

        let job = match self.provider.start_crawl(&request.url).await {
            Ok(job) => job,
            Err(err) => {
                self.mark_failed(record.id, err.to_string()).await?;
                return Err(err.into());
            }
        };

        log::info!("crawl submitted: {} -> {}", request.url, job.job_id);

        scraped_website::ActiveModel {
            id: Unchanged(record.id),
            status: Set(Status::Scraping),
            job_id: Set(Some(job.job_id.clone())),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        self.poll_to_completion(record.id, &job.job_id, &assistant)
            .await
    }

    /// Poll the provider at a fixed interval until the job is done or the budget is spent.
    async fn poll_to_completion(
        &self,
        record: Uuid,
        job_id: &str,
        assistant: &assistant::Model,
    ) -> Result<ScrapeSummary, Error> {
        for attempt in 1..=self.poll.attempts {
            let state = match self.provider.job_status(job_id).await {
                Ok(state) => state,
                Err(err) => {
                    self.mark_failed(record, err.to_string()).await?;
                    return Err(err.into());
                }
            };

            match state.status {
                JobStatus::Completed => {
                    return self.complete(record, assistant, state.pages).await;
                }
                JobStatus::Failed => {
                    let message = state
                        .error
                        .unwrap_or_else(|| "crawl failed".to_string());
                    self.mark_failed(record, message.clone()).await?;
                    return Err(Error::CrawlFailed(message));
                }
                JobStatus::Queued | JobStatus::Scraping => {
                    log::debug!("crawl {job_id} still running (attempt {attempt})");
                }
            }

            if attempt < self.poll.attempts {
                tokio::time::sleep(self.poll.interval).await;
            }
        }

        self.mark_failed(record, "timed out waiting for the crawl to finish".to_string())
            .await?;
        Err(Error::Timeout)
    }

    /// List the caller's scrape records, newest first.
    pub async fn list(
        &self,
        user_id: &str,
        paginated: Paginated,
    ) -> Result<PaginatedResults<ScrapeSummary>, Error> {
        let limiter = scraped_website::Entity::find()
            .filter(scraped_website::Column::UserId.eq(user_id))
            .order_by_desc(scraped_website::Column::CreatedAt)
            .limiting(&self.db, paginated.offset, paginated.limit);

        let total = limiter.total().await?;

        Ok(PaginatedResults {
            total,
            items: limiter
                .fetch()
                .await?
                .into_iter()
                .map(ScrapeSummary::from)
                .collect(),
        })
    }

    /// Re-issue a single status check for a stored job and refresh the record.
    ///
    /// This is the only way to pick up a job whose original request got cut off mid-poll.
    #[instrument(skip(self), err)]
    pub async fn refresh_status(&self, user_id: &str, id: Uuid) -> Result<ScrapeSummary, Error> {
        let Some(record) = scraped_website::Entity::find_by_id(id)
            .filter(scraped_website::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Err(Error::NotFound);
        };

        let job_id = match (&record.status, &record.job_id) {
            (Status::Completed | Status::Failed, _) | (_, None) => None,
            (_, Some(job_id)) => Some(job_id.clone()),
        };

        // terminal records, and records which never made it to the provider, stay as they are
        let Some(job_id) = job_id else {
            return Ok(record.into());
        };

        let state = match self.provider.job_status(&job_id).await {
            Ok(state) => state,
            Err(err) => {
                self.mark_failed(record.id, err.to_string()).await?;
                return Err(err.into());
            }
        };

        match state.status {
            JobStatus::Completed => {
                let Some(assistant) = assistant::Entity::find_by_id(record.assistant_id)
                    .one(&self.db)
                    .await?
                else {
                    return Err(Error::NotFound);
                };
                self.complete(record.id, &assistant, state.pages).await
            }
            JobStatus::Failed => {
                let message = state.error.unwrap_or_else(|| "crawl failed".to_string());
                self.mark_failed(record.id, message).await
            }
            JobStatus::Queued | JobStatus::Scraping => Ok(record.into()),
        }
    }

    /// Finish a job: turn the pages into one document, hand it to the voice platform, and
    /// record the outcome.
    async fn complete(
        &self,
        record: Uuid,
        assistant: &assistant::Model,
        pages: Vec<CrawlPage>,
    ) -> Result<ScrapeSummary, Error> {
        let updated = match self.ingest_document(record, assistant, &pages).await {
            Ok(updated) => updated,
            Err(err) => {
                self.mark_failed(record, err.to_string()).await?;
                return Err(err);
            }
        };

        Ok(updated)
    }

    async fn ingest_document(
        &self,
        record: Uuid,
        assistant: &assistant::Model,
        pages: &[CrawlPage],
    ) -> Result<ScrapeSummary, Error> {
        let document = render_document(pages);
        let size = document.len() as i64;
        let file_name = document_file_name(&assistant.name);

        let file = self
            .platform
            .upload_file(&file_name, "text/plain", document.into_bytes())
            .await?;

        // make the new knowledge file visible to the platform assistant
        let mut definition = self
            .platform
            .get_assistant(&assistant.platform_assistant_id)
            .await?
            .definition;
        definition.file_ids.push(file.id.clone());
        self.platform
            .update_assistant(&assistant.platform_assistant_id, &definition)
            .await?;

        let now = OffsetDateTime::now_utc();
        let tx = self.db.begin().await?;

        assistant_file::ActiveModel {
            id: Set(Uuid::new_v4()),
            assistant_id: Set(assistant.id),
            user_id: Set(assistant.user_id.clone()),
            file_name: Set(file_name),
            content_type: Set("text/plain".to_string()),
            size: Set(size),
            platform_file_id: Set(file.id.clone()),
            processed: Set(file.is_processed()),
            created_at: Set(now),
        }
        .insert(&tx)
        .await?;

        let updated = scraped_website::ActiveModel {
            id: Unchanged(record),
            status: Set(Status::Completed),
            page_count: Set(Some(pages.len() as i32)),
            content_bytes: Set(Some(size)),
            error: Set(None),
            finished_at: Set(Some(now)),
            ..Default::default()
        }
        .update(&tx)
        .await?;

        tx.commit().await?;

        Ok(updated.into())
    }

    async fn mark_failed(&self, record: Uuid, message: String) -> Result<ScrapeSummary, Error> {
        let updated = scraped_website::ActiveModel {
            id: Unchanged(record),
            status: Set(Status::Failed),
            error: Set(Some(message)),
            finished_at: Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(updated.into())
    }
}

/// Concatenate the crawled pages into one plain text document.
fn render_document(pages: &[CrawlPage]) -> String {
    let mut document = String::new();

    for page in pages {
        if let Some(title) = &page.title {
            document.push_str(title);
            document.push('\n');
        }
        document.push_str(&page.url);
        document.push_str("\n\n");
        document.push_str(page.text.trim());
        document.push_str("\n\n");
    }

    document
}

fn document_file_name(assistant_name: &str) -> String {
    let slug = assistant_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect::<String>();

    format!("{}-website.txt", slug.trim_matches('-'))
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn render_pages() {
        let pages = vec![
            CrawlPage {
                url: "https://example.com".into(),
                title: Some("Example".into()),
                text: "Hello\n".into(),
            },
            CrawlPage {
                url: "https://example.com/about".into(),
                title: None,
                text: "About us".into(),
            },
        ];

        assert_eq!(
            render_document(&pages),
            "Example\nhttps://example.com\n\nHello\n\nhttps://example.com/about\n\nAbout us\n\n"
        );
    }

    #[test]
    fn file_name_is_slugged() {
        assert_eq!(document_file_name("Support Bot"), "support-bot-website.txt");
        assert_eq!(document_file_name("--x--"), "x-website.txt");
    }
}
