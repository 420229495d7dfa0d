//! The one-shot availability load as a cancellable task.
//!
//! [`LoadTask::spawn`] starts the fetch on the runtime and pairs it with the
//! [`LoadTicket`] issued by the view. Dropping the task aborts the request;
//! committing it hands the result to the view, which ignores it unless the
//! ticket is still current.

use std::sync::Arc;

use shelters_core::{AvailabilityView, LoadFailure, LoadTicket, ShelterSnapshot};
use tokio::task::JoinHandle;

use crate::client::AvailabilityClient;
use crate::error::ClientError;

pub struct LoadTask {
    ticket: LoadTicket,
    handle: Option<JoinHandle<Result<ShelterSnapshot, ClientError>>>,
}

impl LoadTask {
    /// Spawns the fetch for `ticket` on the current Tokio runtime.
    #[must_use]
    pub fn spawn(client: Arc<AvailabilityClient>, ticket: LoadTicket) -> Self {
        let handle = tokio::spawn(async move { client.fetch_shelters().await });
        Self {
            ticket,
            handle: Some(handle),
        }
    }

    #[must_use]
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    /// Aborts the in-flight request. Its result will never be committed.
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Waits for the fetch and commits the outcome to `view`.
    ///
    /// Returns `true` if the view accepted the result. A panicked or aborted
    /// task commits as a failure so the view never stays in loading forever.
    pub async fn commit_into(mut self, view: &mut AvailabilityView) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        let result = match handle.await {
            Ok(Ok(snapshot)) => Ok(snapshot),
            Ok(Err(err)) => Err(LoadFailure::from(err)),
            Err(join_err) => {
                tracing::error!(error = %join_err, "shelter load task did not complete");
                Err(LoadFailure::from_description(&join_err.to_string()))
            }
        };
        view.commit_load(self.ticket, result)
    }
}

impl Drop for LoadTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            tracing::debug!("abandoning in-flight shelter load");
            handle.abort();
        }
    }
}

/// Starts a load on `view` and waits for it to commit.
///
/// Convenience for callers that own the view for the whole request, such as
/// the command-line front end.
pub async fn load_into(client: Arc<AvailabilityClient>, view: &mut AvailabilityView) -> bool {
    let ticket = view.begin_load();
    LoadTask::spawn(client, ticket).commit_into(view).await
}
