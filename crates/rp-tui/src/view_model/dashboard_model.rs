// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The dashboard's single view model.
//!
//! All queries flow through [`rp_core::QueryCache`]: a spawned task runs
//! the fetch and posts [`Msg::QuerySettled`] back to the event loop, and
//! rendering reads typed snapshots out of the cache. The one exception is
//! the repo selector, which bypasses the cache so a quick project switch
//! can cancel a load for a project that is no longer on screen.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveTime;
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use rp_client_api::AnalyticsApi;
use rp_core::resources::{commits, developers, insights, metrics, projects, sync, timeline};
use rp_core::{
    today_local, CursorHistory, PagedList, QueryCache, QueryError, QueryKey, QueryState,
    RangePreset, SharedFilters, ViewStatus,
};
use rp_domain_types::{Commit, CommitPage, DevelopersOverview, Project, Repo};

use super::{Msg, Tab};

/// How many commits the overview's latest-commits panel asks for.
pub const LATEST_COMMITS_LIMIT: u32 = 8;

/// Page size of the commits tab.
pub const REPO_COMMITS_LIMIT: u32 = 25;

/// Page size of the branches panel.
pub const BRANCHES_LIMIT: u32 = 10;

/// Page size of the developer profile's commits table.
pub const DEVELOPER_COMMITS_LIMIT: u32 = 10;

/// State of the commits tab: repo selector, branches panel and the
/// accumulating commit list.
pub struct CommitsState {
    /// Repos of the selected project. Held on the model rather than in
    /// the cache; see the module docs.
    pub repos: QueryState<Vec<Repo>>,
    pub selected_repo: usize,
    pub list: PagedList<Commit>,
    /// Key of the page currently in flight. Guards against double loads
    /// and against recording a page that a filter reset obsoleted.
    pending_page: Option<QueryKey>,
    /// Every page key issued since the last reset, for invalidation and
    /// for reading the latest page error.
    page_keys: Vec<QueryKey>,
    repo_token: CancellationToken,
}

impl Default for CommitsState {
    fn default() -> Self {
        Self {
            repos: QueryState::default(),
            selected_repo: 0,
            list: PagedList::new(),
            pending_page: None,
            page_keys: Vec::new(),
            repo_token: CancellationToken::new(),
        }
    }
}

/// State of the developers tab.
#[derive(Default)]
pub struct DevelopersState {
    pub selected: usize,
    pub profile: Option<ProfilePane>,
}

/// Profile pane opened over the developers table.
pub struct ProfilePane {
    pub author_id: String,
    pub author_name: String,
    /// Trail of cursors behind the commits table's current page.
    pub history: CursorHistory,
}

/// State of the insights tab.
#[derive(Default)]
pub struct InsightsState {
    /// Narrows the insight feed to one developer without touching the
    /// shared filters.
    pub focus: Option<AuthorFocus>,
}

/// Developer picked from the profile pane for focused insights.
#[derive(Debug, Clone)]
pub struct AuthorFocus {
    pub id: String,
    pub name: String,
}

/// Owns all dashboard state and drives the query layer. Input arrives as
/// [`Msg`] values; rendering reads the model and its cache snapshots.
pub struct ViewModel {
    client: Arc<dyn AnalyticsApi>,
    cache: QueryCache,
    /// App-lifetime token handed to cached fetches. Widgets that need
    /// real cancellation carry their own tokens.
    token: CancellationToken,
    tx: Sender<Msg>,
    pub filters: SharedFilters,
    pub preset: RangePreset,
    pub tab: Tab,
    pub commits: CommitsState,
    pub developers: DevelopersState,
    pub insights: InsightsState,
    last_sync_poll: Option<Instant>,
    pub needs_redraw: bool,
    exit_requested: bool,
}

impl ViewModel {
    pub fn new(
        client: Arc<dyn AnalyticsApi>,
        cache: QueryCache,
        preset: RangePreset,
        tx: Sender<Msg>,
    ) -> Self {
        let filters = SharedFilters::for_preset(preset, today_local());
        let mut model = Self {
            client,
            cache,
            token: CancellationToken::new(),
            tx,
            filters,
            preset,
            tab: Tab::Overview,
            commits: CommitsState::default(),
            developers: DevelopersState::default(),
            insights: InsightsState::default(),
            last_sync_poll: None,
            needs_redraw: true,
            exit_requested: false,
        };
        model.refresh_tab_queries();
        model.spawn_projects_fetch();
        model
    }

    /// Apply one message to the model.
    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Key(key) => self.on_key(key),
            Msg::Tick => self.on_tick(),
            Msg::QuerySettled { key } => self.on_query_settled(key),
            Msg::ReposLoaded {
                project_id,
                outcome,
            } => self.on_repos_loaded(project_id, outcome),
        }
    }

    /// True once after an exit was requested.
    pub fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }

    // ---- keys the view needs to snapshot the same slots the model fills

    pub fn summary_key(&self) -> QueryKey {
        metrics::summary_key(&self.filters, Some(LATEST_COMMITS_LIMIT))
    }

    pub fn timeline_key(&self) -> QueryKey {
        timeline::timeline_key(&self.filters)
    }

    pub fn team_key(&self) -> QueryKey {
        developers::team_key(&self.filters)
    }

    pub fn projects_key(&self) -> QueryKey {
        projects::projects_key()
    }

    pub fn sync_key(&self) -> QueryKey {
        sync::sync_key()
    }

    pub fn insights_key(&self) -> QueryKey {
        let focus = self.insights.focus.as_ref().map(|focus| focus.id.as_str());
        insights::insights_key(&self.filters, focus)
    }

    pub fn project_detail_key(&self) -> Option<QueryKey> {
        self.filters.project_id().map(projects::project_key)
    }

    pub fn branches_key(&self) -> Option<QueryKey> {
        self.selected_repo()
            .map(|repo| commits::repo_branches_key(&repo.id, Some(BRANCHES_LIMIT), None))
    }

    pub fn profile_key(&self) -> Option<QueryKey> {
        self.developers.profile.as_ref().map(|pane| {
            developers::profile_key(
                &pane.author_id,
                &self.filters,
                Some(DEVELOPER_COMMITS_LIMIT),
                None,
            )
        })
    }

    pub fn developer_commits_key(&self) -> Option<QueryKey> {
        self.developers.profile.as_ref().map(|pane| {
            developers::commits_key(
                &pane.author_id,
                &self.filters,
                Some(DEVELOPER_COMMITS_LIMIT),
                pane.history.current(),
            )
        })
    }

    /// Snapshot of one cache slot, typed for the widget that renders it.
    pub fn snapshot<T: Send + Sync + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        self.cache.snapshot(key)
    }

    /// Repo currently highlighted in the selector.
    pub fn selected_repo(&self) -> Option<&Repo> {
        self.commits
            .repos
            .data
            .as_ref()
            .and_then(|repos| repos.get(self.commits.selected_repo))
    }

    /// Display name of the selected project, once the project list is in.
    pub fn selected_project_name(&self) -> Option<String> {
        let project_id = self.filters.project_id()?;
        let projects = self.snapshot::<Vec<Project>>(&self.projects_key()).data?;
        projects
            .iter()
            .find(|project| project.id == project_id)
            .map(|project| project.name.clone())
    }

    /// Reduce the accumulated commit list plus the page in flight to one
    /// renderable status. The error, if any, comes from the slot of the
    /// most recently attempted page.
    pub fn repo_commits_status(&self) -> ViewStatus<Vec<Commit>> {
        let error = self
            .commits
            .page_keys
            .last()
            .map(|key| self.snapshot::<CommitPage>(key))
            .and_then(|page| page.error);
        let state = QueryState {
            data: (self.commits.list.pages_loaded() > 0)
                .then(|| Arc::new(self.commits.list.items().to_vec())),
            error,
            is_fetching: self.commits.pending_page.is_some(),
        };
        state.status(|items| items.is_empty())
    }

    // ---- message handlers

    fn on_key(&mut self, key: KeyEvent) {
        self.needs_redraw = true;
        match key.code {
            KeyCode::Char('q') => self.exit_requested = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.exit_requested = true;
            }
            KeyCode::Tab => self.switch_tab(self.tab.next()),
            KeyCode::BackTab => self.switch_tab(self.tab.previous()),
            KeyCode::Char('1') => self.switch_tab(Tab::Overview),
            KeyCode::Char('2') => self.switch_tab(Tab::Commits),
            KeyCode::Char('3') => self.switch_tab(Tab::Developers),
            KeyCode::Char('4') => self.switch_tab(Tab::Insights),
            KeyCode::Char('r') => self.apply_preset(self.preset.next()),
            KeyCode::Char('p') => self.cycle_project(),
            KeyCode::Char('R') => self.force_refresh(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => self.open_developer_profile(),
            KeyCode::Esc => self.dismiss(),
            KeyCode::Char('n') => self.load_more_commits(),
            KeyCode::Char(']') => self.developer_commits_next_page(),
            KeyCode::Char('[') => self.developer_commits_previous_page(),
            KeyCode::Char('i') => self.focus_insights_on_profile(),
            _ => self.needs_redraw = false,
        }
    }

    fn on_tick(&mut self) {
        let now = Instant::now();
        let due = self
            .last_sync_poll
            .map_or(true, |at| now.duration_since(at) >= sync::SYNC_POLL_INTERVAL);
        if due {
            self.last_sync_poll = Some(now);
            self.spawn_sync_poll();
        }
    }

    fn on_query_settled(&mut self, key: QueryKey) {
        if self.commits.pending_page.as_ref() == Some(&key) {
            self.commits.pending_page = None;
            let page = self.snapshot::<CommitPage>(&key);
            if let Some(page) = page.data {
                self.commits
                    .list
                    .record_page(page.commits.clone(), page.next_cursor.clone());
            }
        }
        self.needs_redraw = true;
    }

    fn on_repos_loaded(&mut self, project_id: i64, outcome: Result<Vec<Repo>, QueryError>) {
        if self.filters.project_id() != Some(project_id) {
            // Settled for a project that is no longer selected.
            return;
        }
        match outcome {
            Ok(repos) => {
                self.commits.selected_repo = 0;
                self.commits.repos = QueryState {
                    data: Some(Arc::new(repos)),
                    error: None,
                    is_fetching: false,
                };
                self.reset_commit_pages();
                if self.tab == Tab::Commits {
                    self.ensure_first_commits_page();
                    self.spawn_branches_fetch();
                }
            }
            Err(error) if error.is_cancelled() => return,
            Err(error) => {
                self.commits.repos.error = Some(Arc::new(error));
                self.commits.repos.is_fetching = false;
            }
        }
        self.needs_redraw = true;
    }

    // ---- tab and filter actions

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.refresh_tab_queries();
    }

    /// Swap the date window. Every derived key changes, so paging state
    /// resets and the visible tab refetches.
    fn apply_preset(&mut self, preset: RangePreset) {
        self.preset = preset;
        self.filters = self.filters.clone().with_preset(preset, today_local());
        self.on_filters_changed();
    }

    /// Cycle project scope: none, then each loaded project in turn.
    fn cycle_project(&mut self) {
        let projects = self.snapshot::<Vec<Project>>(&self.projects_key());
        let Some(projects) = projects.data else {
            self.spawn_projects_fetch();
            return;
        };
        if projects.is_empty() {
            return;
        }
        let next = match self.filters.project_id() {
            None => Some(projects[0].id),
            Some(current) => projects
                .iter()
                .position(|project| project.id == current)
                .and_then(|index| projects.get(index + 1))
                .map(|project| project.id),
        };
        self.filters = self.filters.clone().with_project(next);
        self.commits.selected_repo = 0;
        self.reload_repos();
        self.on_filters_changed();
    }

    fn on_filters_changed(&mut self) {
        self.reset_commit_pages();
        if let Some(pane) = &mut self.developers.profile {
            pane.history.reset();
        }
        self.refresh_tab_queries();
    }

    /// Drop the current tab's cached slots and refetch them.
    fn force_refresh(&mut self) {
        match self.tab {
            Tab::Overview => {
                self.cache.invalidate(&self.summary_key());
                self.cache.invalidate(&self.timeline_key());
            }
            Tab::Commits => {
                if let Some(key) = self.project_detail_key() {
                    self.cache.invalidate(&key);
                }
                if let Some(key) = self.branches_key() {
                    self.cache.invalidate(&key);
                }
                for key in std::mem::take(&mut self.commits.page_keys) {
                    self.cache.invalidate(&key);
                }
                self.reset_commit_pages();
                self.reload_repos();
            }
            Tab::Developers => {
                self.cache.invalidate(&self.team_key());
                if let Some(key) = self.profile_key() {
                    self.cache.invalidate(&key);
                }
                if let Some(key) = self.developer_commits_key() {
                    self.cache.invalidate(&key);
                }
            }
            Tab::Insights => self.cache.invalidate(&self.insights_key()),
        }
        self.refresh_tab_queries();
    }

    /// Issue the queries the current tab renders from. Fresh slots settle
    /// without a request; stale ones serve data and revalidate behind it.
    fn refresh_tab_queries(&mut self) {
        match self.tab {
            Tab::Overview => {
                self.spawn_summary_fetch();
                self.spawn_timeline_fetch();
            }
            Tab::Commits => {
                self.spawn_project_detail_fetch();
                self.ensure_repos_loaded();
                self.ensure_first_commits_page();
                self.spawn_branches_fetch();
            }
            Tab::Developers => {
                self.spawn_team_fetch();
                self.spawn_profile_pane_fetches();
            }
            Tab::Insights => self.spawn_insights_fetch(),
        }
    }

    // ---- selection and pane actions

    fn move_selection(&mut self, delta: i64) {
        match self.tab {
            Tab::Commits => {
                let count = self
                    .commits
                    .repos
                    .data
                    .as_ref()
                    .map_or(0, |repos| repos.len());
                let next = step_index(self.commits.selected_repo, delta, count);
                if next != self.commits.selected_repo {
                    self.commits.selected_repo = next;
                    self.reset_commit_pages();
                    self.ensure_first_commits_page();
                    self.spawn_branches_fetch();
                }
            }
            Tab::Developers if self.developers.profile.is_none() => {
                let count = self
                    .snapshot::<DevelopersOverview>(&self.team_key())
                    .data
                    .map_or(0, |team| team.authors.len());
                self.developers.selected = step_index(self.developers.selected, delta, count);
            }
            _ => {}
        }
    }

    fn open_developer_profile(&mut self) {
        if self.tab != Tab::Developers || self.developers.profile.is_some() {
            return;
        }
        let team = self.snapshot::<DevelopersOverview>(&self.team_key());
        let Some(team) = team.data else { return };
        let Some(row) = team.authors.get(self.developers.selected) else {
            return;
        };
        self.developers.profile = Some(ProfilePane {
            author_id: row.author_id.clone(),
            author_name: row.name.clone(),
            history: CursorHistory::new(),
        });
        self.spawn_profile_pane_fetches();
    }

    fn dismiss(&mut self) {
        match self.tab {
            Tab::Developers if self.developers.profile.is_some() => {
                self.developers.profile = None;
            }
            Tab::Insights if self.insights.focus.is_some() => {
                self.insights.focus = None;
                self.spawn_insights_fetch();
            }
            _ => {}
        }
    }

    fn focus_insights_on_profile(&mut self) {
        if self.tab != Tab::Developers {
            return;
        }
        let focus = match &self.developers.profile {
            Some(pane) => AuthorFocus {
                id: pane.author_id.clone(),
                name: pane.author_name.clone(),
            },
            None => return,
        };
        self.insights.focus = Some(focus);
        self.switch_tab(Tab::Insights);
    }

    // ---- commits pagination

    fn reset_commit_pages(&mut self) {
        self.commits.list.reset();
        self.commits.pending_page = None;
        self.commits.page_keys.clear();
    }

    /// Fetch the first page for the selected repo when the list is empty
    /// and nothing is in flight.
    fn ensure_first_commits_page(&mut self) {
        if self.commits.pending_page.is_some() || self.commits.list.pages_loaded() > 0 {
            return;
        }
        self.spawn_commits_page(None);
    }

    fn load_more_commits(&mut self) {
        if self.tab != Tab::Commits
            || self.commits.pending_page.is_some()
            || !self.commits.list.has_more()
        {
            return;
        }
        let cursor = self.commits.list.request_cursor().map(str::to_string);
        self.spawn_commits_page(cursor);
    }

    fn developer_commits_next_page(&mut self) {
        if self.tab != Tab::Developers {
            return;
        }
        let Some(key) = self.developer_commits_key() else {
            return;
        };
        let page = self.snapshot::<CommitPage>(&key);
        let Some(page) = page.data else { return };
        let Some(cursor) = page.next_cursor.clone() else {
            return;
        };
        let Some(pane) = self.developers.profile.as_mut() else {
            return;
        };
        pane.history.advance(cursor);
        self.spawn_developer_commits_fetch();
    }

    fn developer_commits_previous_page(&mut self) {
        if self.tab != Tab::Developers {
            return;
        }
        let went_back = self
            .developers
            .profile
            .as_mut()
            .map_or(false, |pane| pane.history.back());
        if went_back {
            // Earlier pages are still fresh in the cache, so this settles
            // without a request.
            self.spawn_developer_commits_fetch();
        }
    }

    // ---- fetch plumbing

    /// Run one cached fetch on the runtime and post a settle message when
    /// it finishes, whatever the outcome.
    fn spawn_query<T, Fut>(&self, key: QueryKey, stale_after: Option<Duration>, fut: Fut)
    where
        T: Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<T, QueryError>> + Send + 'static,
    {
        let cache = self.cache.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = match stale_after {
                Some(window) => cache.fetch_with(&key, window, move || fut).await,
                None => cache.fetch(&key, move || fut).await,
            };
            if let Err(error) = &outcome {
                if !error.is_cancelled() {
                    debug!(key = %key, error = %error, "query failed");
                }
            }
            let _ = tx.send(Msg::QuerySettled { key });
        });
    }

    fn spawn_summary_fetch(&self) {
        let client = self.client.clone();
        let token = self.token.clone();
        let filters = self.filters.clone();
        self.spawn_query(self.summary_key(), None, async move {
            metrics::fetch_summary(
                client.as_ref(),
                &token,
                &filters,
                Some(LATEST_COMMITS_LIMIT),
            )
            .await
        });
    }

    fn spawn_timeline_fetch(&self) {
        let client = self.client.clone();
        let token = self.token.clone();
        let filters = self.filters.clone();
        self.spawn_query(self.timeline_key(), None, async move {
            timeline::fetch_timeline(client.as_ref(), &token, &filters).await
        });
    }

    fn spawn_team_fetch(&self) {
        let client = self.client.clone();
        let token = self.token.clone();
        let filters = self.filters.clone();
        self.spawn_query(self.team_key(), None, async move {
            developers::fetch_team(client.as_ref(), &token, &filters).await
        });
    }

    fn spawn_projects_fetch(&self) {
        let client = self.client.clone();
        let token = self.token.clone();
        self.spawn_query(self.projects_key(), None, async move {
            projects::fetch_projects(client.as_ref(), &token).await
        });
    }

    fn spawn_project_detail_fetch(&self) {
        let Some(project_id) = self.filters.project_id() else {
            return;
        };
        let client = self.client.clone();
        let token = self.token.clone();
        self.spawn_query(projects::project_key(project_id), None, async move {
            projects::fetch_project(client.as_ref(), &token, project_id).await
        });
    }

    fn spawn_branches_fetch(&self) {
        let Some(repo) = self.selected_repo() else {
            return;
        };
        let repo_id = repo.id.clone();
        let key = commits::repo_branches_key(&repo_id, Some(BRANCHES_LIMIT), None);
        let client = self.client.clone();
        let token = self.token.clone();
        self.spawn_query(key, None, async move {
            commits::fetch_repo_branches(client.as_ref(), &token, &repo_id, Some(BRANCHES_LIMIT), None)
                .await
        });
    }

    fn spawn_commits_page(&mut self, cursor: Option<String>) {
        let Some(repo) = self.selected_repo() else {
            return;
        };
        let repo_id = repo.id.clone();
        // Scope the listing to the filter window's lower bound so a range
        // change cannot leak older commits into the list.
        let after = self.filters.since().and_time(NaiveTime::MIN).and_utc();
        let key = commits::repo_commits_key(
            &repo_id,
            Some(REPO_COMMITS_LIMIT),
            cursor.as_deref(),
            Some(after),
        );
        self.commits.pending_page = Some(key.clone());
        self.commits.page_keys.push(key.clone());
        let client = self.client.clone();
        let token = self.token.clone();
        self.spawn_query(key, None, async move {
            commits::fetch_repo_commits(
                client.as_ref(),
                &token,
                &repo_id,
                Some(REPO_COMMITS_LIMIT),
                cursor.as_deref(),
                Some(after),
            )
            .await
        });
    }

    fn spawn_profile_pane_fetches(&self) {
        self.spawn_profile_summary_fetch();
        self.spawn_developer_commits_fetch();
    }

    fn spawn_profile_summary_fetch(&self) {
        let Some(key) = self.profile_key() else { return };
        let Some(pane) = &self.developers.profile else {
            return;
        };
        let author_id = pane.author_id.clone();
        let client = self.client.clone();
        let token = self.token.clone();
        let filters = self.filters.clone();
        self.spawn_query(key, None, async move {
            developers::fetch_profile(
                client.as_ref(),
                &token,
                &author_id,
                &filters,
                Some(DEVELOPER_COMMITS_LIMIT),
                None,
            )
            .await
        });
    }

    fn spawn_developer_commits_fetch(&self) {
        let Some(key) = self.developer_commits_key() else {
            return;
        };
        let Some(pane) = &self.developers.profile else {
            return;
        };
        let author_id = pane.author_id.clone();
        let cursor = pane.history.current().map(str::to_string);
        let client = self.client.clone();
        let token = self.token.clone();
        let filters = self.filters.clone();
        self.spawn_query(key, None, async move {
            developers::fetch_commits(
                client.as_ref(),
                &token,
                &author_id,
                &filters,
                Some(DEVELOPER_COMMITS_LIMIT),
                cursor.as_deref(),
            )
            .await
        });
    }

    fn spawn_insights_fetch(&self) {
        let client = self.client.clone();
        let token = self.token.clone();
        let filters = self.filters.clone();
        let focus = self.insights.focus.as_ref().map(|focus| focus.id.clone());
        self.spawn_query(self.insights_key(), None, async move {
            insights::fetch_insights(client.as_ref(), &token, &filters, focus.as_deref()).await
        });
    }

    fn spawn_sync_poll(&self) {
        let client = self.client.clone();
        let token = self.token.clone();
        self.spawn_query(
            self.sync_key(),
            Some(sync::SYNC_POLL_INTERVAL),
            async move { sync::fetch_sync_status(client.as_ref(), &token).await },
        );
    }

    // ---- repo selector, outside the cache

    /// Load the selector if the selected project has no repos loaded or
    /// loading yet.
    fn ensure_repos_loaded(&mut self) {
        if self.filters.project_id().is_none() {
            return;
        }
        if self.commits.repos.data.is_some() || self.commits.repos.is_fetching {
            return;
        }
        self.reload_repos();
    }

    /// Cancel any selector fetch still running and start over for the
    /// currently selected project.
    fn reload_repos(&mut self) {
        self.commits.repo_token.cancel();
        self.commits.repo_token = CancellationToken::new();
        if self.filters.project_id().is_none() {
            self.commits.repos = QueryState::default();
            return;
        }
        self.commits.repos = QueryState {
            data: None,
            error: None,
            is_fetching: true,
        };
        self.spawn_repos_fetch();
    }

    fn spawn_repos_fetch(&self) {
        let Some(project_id) = self.filters.project_id() else {
            return;
        };
        let client = self.client.clone();
        let token = self.commits.repo_token.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = projects::fetch_project_repos(client.as_ref(), &token, project_id).await;
            let _ = tx.send(Msg::ReposLoaded {
                project_id,
                outcome,
            });
        });
    }
}

fn step_index(current: usize, delta: i64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let current = current.min(count - 1);
    if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        (current + delta as usize).min(count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_index_clamps_at_both_ends() {
        assert_eq!(step_index(0, -1, 5), 0);
        assert_eq!(step_index(4, 1, 5), 4);
        assert_eq!(step_index(2, 1, 5), 3);
        assert_eq!(step_index(2, -1, 5), 1);
        assert_eq!(step_index(3, 1, 0), 0);
        // A selection beyond the list, after it shrank, clamps first.
        assert_eq!(step_index(9, 1, 3), 2);
    }
}
