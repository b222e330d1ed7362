//! Extract stage: bounded pool turning fetched documents into new frontier entries

use crate::crawler::barrier::CompletionToken;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::pool::WorkerPool;
use crate::crawler::session::SessionState;
use std::sync::Arc;

pub(crate) struct ExtractStage<F: PageFetcher> {
    pool: WorkerPool,
    fetcher: Arc<F>,
}

impl<F: PageFetcher> ExtractStage<F> {
    pub(crate) fn new(pool: WorkerPool, fetcher: Arc<F>) -> Self {
        Self { pool, fetcher }
    }

    pub(crate) fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Queues link extraction for `document`
    ///
    /// `token` is the level barrier arrival inherited from the fetch; it is
    /// released when extraction finishes or the job is dropped.
    pub(crate) fn submit(
        &self,
        document: F::Document,
        session: Arc<SessionState>,
        token: CompletionToken,
    ) {
        let fetcher = Arc::clone(&self.fetcher);
        let accepted = self.pool.submit(async move {
            let _token = token;
            if session.is_cancelled() {
                return;
            }
            let discovered = collect_links(fetcher.as_ref(), &document, &session);
            tracing::trace!("Extraction queued {} new addresses", discovered);
        });

        if !accepted {
            tracing::debug!("Extract pool closed, dropping extraction");
        }
    }
}

/// Feeds every link of `document` into the session's next frontier
///
/// Stops at the first extraction error; links seen before it are kept.
/// Returns how many links were new to the session.
fn collect_links<F: PageFetcher>(
    fetcher: &F,
    document: &F::Document,
    session: &SessionState,
) -> usize {
    let mut discovered = 0;
    for link in fetcher.extract_links(document) {
        match link {
            Ok(address) => {
                if session.discover(address) {
                    discovered += 1;
                }
            }
            Err(e) => {
                tracing::debug!("{}", e);
                break;
            }
        }
    }
    discovered
}
