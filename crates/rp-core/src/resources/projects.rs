// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Project and repository browsing

use tokio_util::sync::CancellationToken;

use rp_api_contract::{ProjectDto, RepoDto};
use rp_client_api::AnalyticsApi;
use rp_domain_types::{Project, Repo};

use crate::error::QueryResult;
use crate::key::QueryKey;

pub fn projects_key() -> QueryKey {
    QueryKey::new("projects")
}

/// Every project visible to the caller.
pub async fn fetch_projects(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
) -> QueryResult<Vec<Project>> {
    let dtos = super::cancellable(token, client.list_projects()).await?;
    Ok(dtos.into_iter().map(adapt_project).collect())
}

pub fn project_key(project_id: i64) -> QueryKey {
    QueryKey::new("project-detail").int("project_id", Some(project_id))
}

/// Detail payload for one project.
pub async fn fetch_project(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
    project_id: i64,
) -> QueryResult<Project> {
    let dto = super::cancellable(token, client.get_project(project_id)).await?;
    Ok(adapt_project(dto))
}

pub fn project_repos_key(project_id: i64) -> QueryKey {
    QueryKey::new("project-repos").int("project_id", Some(project_id))
}

/// Repositories of one project. The repo selector issues this without
/// caching and with its own token, so switching projects quickly can
/// abandon a fetch for a project no longer shown.
pub async fn fetch_project_repos(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
    project_id: i64,
) -> QueryResult<Vec<Repo>> {
    let dtos = super::cancellable(token, client.list_project_repos(project_id)).await?;
    Ok(dtos.into_iter().map(adapt_repo).collect())
}

fn adapt_project(dto: ProjectDto) -> Project {
    Project {
        id: dto.id,
        name: dto.name,
        description: dto.description,
        is_public: dto.is_public,
        repo_count: dto.repo_count,
        last_activity_at: dto.last_activity_at,
    }
}

fn adapt_repo(dto: RepoDto) -> Repo {
    Repo {
        id: dto.id,
        project_id: dto.project_id,
        name: dto.name,
        default_branch: dto.default_branch,
        description: dto.description,
        updated_at: dto.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_adapter_keeps_optional_fields_optional() {
        let project = adapt_project(ProjectDto {
            id: 2,
            name: "tooling".to_string(),
            description: None,
            is_public: true,
            repo_count: 1,
            last_activity_at: None,
        });
        assert_eq!(project.name, "tooling");
        assert_eq!(project.description, None);
        assert_eq!(project.last_activity_at, None);
    }

    #[test]
    fn repo_listing_keys_are_scoped_by_project() {
        assert_ne!(project_repos_key(1), project_repos_key(2));
        assert_ne!(projects_key(), project_key(1));
    }
}
