//! Client-side tracker session.
//!
//! Holds the last proposal list the API returned and applies the results of
//! mutations locally, so the table reflects a change without a reload. List
//! loads are versioned: only the most recently started load may replace the
//! snapshot, and nothing is applied once the session is closed.

use grantboard::prelude::*;
use jiff::Timestamp;

use crate::gateway::{ApiClient, FetchError, Operation};

/// Identifies one list load started with [`TrackerSession::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a load is only applied through `finish_load`"]
pub struct LoadTicket(u64);

/// A user action whose failure is reported in the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Submitting the new-proposal form.
    Add,
    /// Saving an edited proposal or changing its status.
    Update,
    /// Removing one proposal.
    Delete,
    /// Removing every proposal.
    Clear,
}

impl Action {
    /// The banner text shown when this action fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Add => "Failed to add proposal",
            Self::Update => "Failed to update proposal",
            Self::Delete => "Failed to delete proposal",
            Self::Clear => "Failed to clear proposals",
        }
    }
}

/// State of one open tracker view.
#[derive(Debug)]
pub struct TrackerSession {
    book: ProposalBook,
    filter: ProposalFilter,
    banner: Option<String>,
    generation: u64,
    open: bool,
}

impl Default for TrackerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerSession {
    /// An open session with an empty book and no filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            book: ProposalBook::new(),
            filter: ProposalFilter {
                search: String::new(),
                status: String::new(),
            },
            banner: None,
            generation: 0,
            open: true,
        }
    }

    /// The latest proposal snapshot.
    pub const fn book(&self) -> &ProposalBook {
        &self.book
    }

    /// The active search and status filter.
    pub const fn filter(&self) -> &ProposalFilter {
        &self.filter
    }

    /// Replace the filter; the snapshot is untouched.
    pub fn set_filter(&mut self, filter: ProposalFilter) {
        self.filter = filter;
    }

    /// The current error banner, if any.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Hide the error banner.
    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Whether [`Self::close`] has not been called yet.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Tear the session down; later load results are dropped.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Start a list load, superseding any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;

        LoadTicket(self.generation)
    }

    /// Apply the outcome of the load identified by `ticket`.
    ///
    /// Returns `false` when the result was ignored because a newer load was
    /// started or the session was closed.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Proposal>, FetchError>,
    ) -> bool {
        if !self.open || ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                open = self.open,
                "ignoring stale proposal load"
            );

            return false;
        }

        match result {
            Ok(proposals) => {
                self.book = ProposalBook::from_vec(proposals);
                self.banner = None;
            }
            Err(error) => {
                tracing::warn!(error = %error.cause(), "proposal load failed");

                self.banner = Some(Operation::LoadProposals.failure_message().to_owned());
            }
        }

        true
    }

    /// Load the proposal list from `client`.
    ///
    /// Returns whether the result was applied.
    pub async fn refresh(&mut self, client: &ApiClient) -> bool {
        let ticket = self.begin_load();
        let result = client.list_proposals().await;

        self.finish_load(ticket, result)
    }

    /// Prepend a record the API just created.
    pub fn apply_created(&mut self, proposal: Proposal) {
        self.book = std::mem::take(&mut self.book).insert(proposal);
        self.banner = None;
    }

    /// Swap in a record the API just updated.
    pub fn apply_updated(&mut self, proposal: Proposal) {
        self.book = std::mem::take(&mut self.book).replace(proposal);
        self.banner = None;
    }

    /// Drop a record the API just deleted.
    pub fn apply_deleted(&mut self, id: ProposalUuid) {
        self.book = std::mem::take(&mut self.book).remove(id);
        self.banner = None;
    }

    /// Empty the snapshot after the API cleared every proposal.
    pub fn apply_cleared(&mut self) {
        self.book = std::mem::take(&mut self.book).clear();
        self.banner = None;
    }

    /// Report a failed action in the banner. The snapshot is left unchanged.
    pub fn fail(&mut self, action: Action) {
        self.banner = Some(action.failure_message().to_owned());
    }

    /// Submit the new-proposal form.
    ///
    /// Incomplete input or a non-positive amount is rejected before any
    /// request is sent; in that case nothing changes and `None` is returned.
    pub async fn add(&mut self, client: &ApiClient, input: &ProposalInput) -> Option<Proposal> {
        if !input.is_submittable() {
            return None;
        }

        self.settle(Action::Add, client.create_proposal(input).await)
            .inspect(|created| self.apply_created(created.clone()))
    }

    /// Save the full field set of proposal `id`.
    pub async fn update(
        &mut self,
        client: &ApiClient,
        id: ProposalUuid,
        input: &ProposalInput,
    ) -> Option<Proposal> {
        self.settle(Action::Update, client.update_proposal(id, input).await)
            .inspect(|updated| self.apply_updated(updated.clone()))
    }

    /// Move proposal `id` to `status`, keeping its other fields.
    pub async fn change_status(
        &mut self,
        client: &ApiClient,
        id: ProposalUuid,
        status: ProposalStatus,
    ) -> Option<Proposal> {
        let mut input = ProposalInput::from(self.book.get(id)?);
        input.status = Some(status.as_str().to_owned());

        self.update(client, id, &input).await
    }

    /// Delete proposal `id`, returning whether the API accepted it.
    pub async fn delete(&mut self, client: &ApiClient, id: ProposalUuid) -> bool {
        self.settle(Action::Delete, client.delete_proposal(id).await)
            .inspect(|()| self.apply_deleted(id))
            .is_some()
    }

    /// Delete every proposal, returning whether the API accepted it.
    pub async fn clear(&mut self, client: &ApiClient) -> bool {
        self.settle(Action::Clear, client.clear_proposals().await)
            .inspect(|()| self.apply_cleared())
            .is_some()
    }

    /// Proposals passing the current filter, newest first.
    pub fn visible(&self) -> Vec<&Proposal> {
        filter_proposals(&self.book, &self.filter)
    }

    /// Table rows for [`Self::visible`] as of `now`.
    pub fn rows(&self, now: Timestamp) -> Vec<ProposalRow> {
        self.visible()
            .into_iter()
            .map(|proposal| ProposalRow::at(proposal, now))
            .collect()
    }

    /// Headline figures over the whole snapshot, ignoring the filter.
    pub fn kpis(&self) -> Kpis {
        Kpis::from_proposals(&self.book)
    }

    fn settle<T>(&mut self, action: Action, result: Result<T, FetchError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(?action, error = %error.cause(), "proposal action failed");

                self.fail(action);

                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use crate::gateway::FetchCause;

    use super::*;

    fn proposal(title: &str, status: ProposalStatus, amount: i64) -> Proposal {
        Proposal {
            id: ProposalUuid::new(),
            title: title.to_owned(),
            principal_investigator: "Dr. Sarah Chen".to_owned(),
            funding_agency: "National Science Foundation (NSF)".to_owned(),
            requested_amount: Decimal::from(amount),
            submission_deadline: date(2024, 12, 15),
            status,
            description: String::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn load_failure() -> FetchError {
        FetchError::new(
            Operation::LoadProposals,
            FetchCause::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
        )
    }

    #[test]
    fn current_load_replaces_the_snapshot() {
        let mut session = TrackerSession::new();
        let ticket = session.begin_load();

        assert!(session.finish_load(ticket, Ok(vec![proposal("A", ProposalStatus::Draft, 1)])));
        assert_eq!(session.book().len(), 1);
        assert_eq!(session.banner(), None);
    }

    #[test]
    fn superseded_load_is_ignored() {
        let mut session = TrackerSession::new();
        let first = session.begin_load();
        let second = session.begin_load();

        assert!(session.finish_load(second, Ok(vec![proposal("New", ProposalStatus::Draft, 1)])));
        assert!(!session.finish_load(first, Ok(Vec::new())), "late result applied");

        let titles: Vec<_> = session.book().iter().map(|p| p.title.as_str()).collect();

        assert_eq!(titles, ["New"]);
    }

    #[test]
    fn closed_session_ignores_results() {
        let mut session = TrackerSession::new();
        let ticket = session.begin_load();

        session.close();

        assert!(!session.finish_load(ticket, Ok(vec![proposal("A", ProposalStatus::Draft, 1)])));
        assert!(session.book().is_empty(), "closed session was updated");
    }

    #[test]
    fn failed_load_sets_banner_and_keeps_snapshot() {
        let mut session = TrackerSession::new();
        session.apply_created(proposal("Kept", ProposalStatus::Draft, 1));

        let ticket = session.begin_load();

        assert!(session.finish_load(ticket, Err(load_failure())));
        assert_eq!(session.banner(), Some("Failed to load proposals"));
        assert_eq!(session.book().len(), 1);
    }

    #[test]
    fn local_updates_mirror_the_table() {
        let mut session = TrackerSession::new();
        let first = proposal("First", ProposalStatus::Draft, 100);
        let second = proposal("Second", ProposalStatus::Submitted, 200);

        session.apply_created(first.clone());
        session.apply_created(second.clone());

        let titles: Vec<_> = session.book().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Second", "First"]);

        session.apply_updated(Proposal {
            status: ProposalStatus::Approved,
            ..first.clone()
        });
        assert_eq!(
            session.book().get(first.id).map(|p| p.status),
            Some(ProposalStatus::Approved)
        );

        session.apply_deleted(second.id);
        assert_eq!(session.book().len(), 1);

        session.apply_cleared();
        assert!(session.book().is_empty(), "clear left records behind");
    }

    #[test]
    fn failures_and_success_toggle_the_banner() {
        let mut session = TrackerSession::new();

        session.fail(Action::Add);
        assert_eq!(session.banner(), Some("Failed to add proposal"));

        session.fail(Action::Clear);
        assert_eq!(session.banner(), Some("Failed to clear proposals"));

        session.apply_created(proposal("A", ProposalStatus::Draft, 1));
        assert_eq!(session.banner(), None);
    }

    #[test]
    fn kpis_ignore_the_filter() {
        let mut session = TrackerSession::new();

        session.apply_created(proposal("A", ProposalStatus::Approved, 100));
        session.apply_created(proposal("B", ProposalStatus::Draft, 50));
        session.set_filter(ProposalFilter::new("", "draft"));

        assert_eq!(session.visible().len(), 1);
        assert_eq!(session.kpis().total, 2);
        assert_eq!(session.kpis().total_funding, Decimal::from(100));
    }

    #[tokio::test]
    async fn add_skips_incomplete_input() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/proposals"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::parse(format!("{}/api", server.uri()))?;
        let mut session = TrackerSession::new();

        let input = ProposalInput {
            title: Some("Zero".to_owned()),
            principal_investigator: Some("Dr. Sarah Chen".to_owned()),
            funding_agency: Some("NSF".to_owned()),
            requested_amount: Some(Decimal::ZERO),
            submission_deadline: Some("2024-12-15".to_owned()),
            status: Some("draft".to_owned()),
            description: None,
        };

        assert_eq!(session.add(&client, &input).await, None);
        assert!(session.book().is_empty(), "nothing should be added");
        assert_eq!(session.banner(), None);

        Ok(())
    }

    #[tokio::test]
    async fn refresh_then_failed_delete_keeps_the_record() -> TestResult {
        let server = MockServer::start().await;
        let stored = proposal("Stored", ProposalStatus::Draft, 10);

        Mock::given(method("GET"))
            .and(path("/api/proposals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored])))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(format!("/api/proposals/{}", stored.id)))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::parse(format!("{}/api", server.uri()))?;
        let mut session = TrackerSession::new();

        assert!(session.refresh(&client).await, "refresh was not applied");
        assert!(!session.delete(&client, stored.id).await, "delete should fail");
        assert_eq!(session.banner(), Some("Failed to delete proposal"));
        assert_eq!(session.book().get(stored.id), Some(&stored));

        Ok(())
    }

    #[tokio::test]
    async fn change_status_sends_full_field_set() -> TestResult {
        let server = MockServer::start().await;
        let stored = proposal("Stored", ProposalStatus::Draft, 150);
        let approved = Proposal {
            status: ProposalStatus::Approved,
            ..stored.clone()
        };

        Mock::given(method("PUT"))
            .and(path(format!("/api/proposals/{}", stored.id)))
            .and(wiremock::matchers::body_partial_json(json!({
                "title": "Stored",
                "requestedAmount": 150,
                "status": "approved",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(approved)))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::parse(format!("{}/api", server.uri()))?;
        let mut session = TrackerSession::new();
        session.apply_created(stored.clone());

        let before = session.kpis().total_funding;
        let updated = session
            .change_status(&client, stored.id, ProposalStatus::Approved)
            .await;

        assert_eq!(updated.map(|p| p.status), Some(ProposalStatus::Approved));
        assert_eq!(before, Decimal::ZERO);
        assert_eq!(session.kpis().total_funding, Decimal::from(150));

        Ok(())
    }
}
