// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Deterministic fixture dataset backing the mock client
//!
//! Commits are generated from index arithmetic rather than randomness, so
//! every test run sees identical data. Aggregates are computed from the
//! commit list on demand, which means filter parameters behave like the
//! live service's instead of returning canned blobs.
//!
//! `share_pct` fields deliberately mix fraction and percentage-point forms
//! across endpoints, matching the inconsistency of the live service that
//! the adapter layer exists to absorb.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use std::collections::{BTreeMap, BTreeSet};

use rp_api_contract::*;

/// Message subjects cycled through the generated commits. A few are under
/// the short-message threshold on purpose.
const SUBJECTS: [&str; 8] = [
    "Add request timeout to the ingest worker",
    "Fix off-by-one in cursor windowing",
    "wip",
    "Refactor branch resolution into its own module",
    "Bump parser dependency and adjust call sites",
    "fixup",
    "Handle empty histogram buckets in the report view",
    "Introduce per-project access checks",
];

/// Commits whose subject is shorter than this count as low-quality.
const SHORT_MESSAGE_LEN: usize = 10;

/// In-memory dataset the mock serves from
#[derive(Debug, Clone)]
pub struct FixtureDataset {
    pub projects: Vec<ProjectDto>,
    pub repos: Vec<RepoDto>,
    pub branches: Vec<(String, Vec<BranchDto>)>,
    /// Sorted newest first.
    pub commits: Vec<CommitDto>,
    pub insights: Vec<InsightDto>,
    pub sync: SyncStatusDto,
}

impl FixtureDataset {
    /// The standard dataset anchored at a fixed date, for reproducible tests.
    pub fn standard() -> Self {
        Self::anchored(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap())
    }

    /// The standard dataset with commit history ending on `anchor`. The
    /// dashboard's demo mode anchors at today so range presets line up.
    pub fn anchored(anchor: NaiveDate) -> Self {
        let authors = [
            ("11111111-1111-4111-8111-111111111111", "Mara Jensen", "mara@example.dev"),
            ("22222222-2222-4222-8222-222222222222", "Oleg Petrov", "oleg@example.dev"),
            ("33333333-3333-4333-8333-333333333333", "Ines Castillo", "ines@example.dev"),
            ("44444444-4444-4444-8444-444444444444", "Tomas Lind", "tomas@example.dev"),
        ];

        let projects = vec![
            ProjectDto {
                id: 1,
                name: "platform".to_string(),
                description: Some("Core services".to_string()),
                is_public: false,
                repo_count: 2,
                last_activity_at: Some(at_noon(anchor)),
            },
            ProjectDto {
                id: 2,
                name: "tooling".to_string(),
                description: None,
                is_public: true,
                repo_count: 1,
                last_activity_at: Some(at_noon(anchor - Duration::days(2))),
            },
        ];

        let repos = vec![
            repo("aaaaaaaa-0000-4000-8000-000000000001", 1, "ingest", anchor),
            repo("aaaaaaaa-0000-4000-8000-000000000002", 1, "api-gateway", anchor),
            repo("aaaaaaaa-0000-4000-8000-000000000003", 2, "cli", anchor),
        ];

        // Five commits a day across 30 days, rotating authors and repos.
        let mut commits = Vec::new();
        let anchor_noon = at_noon(anchor);
        for i in 0..150u64 {
            let (author_id, author_name, author_email) = authors[(i % 4) as usize];
            let repo = &repos[(i % 3) as usize];
            let committed_at = anchor_noon - Duration::hours((i * 5) as i64);
            let subject = SUBJECTS[(i % 8) as usize];
            commits.push(CommitDto {
                sha: format!("{:040x}", 0x9e3779b9u64.wrapping_mul(i + 1)),
                repo: CommitRepoRefDto {
                    id: repo.id.clone(),
                    project_id: repo.project_id,
                    name: repo.name.clone(),
                },
                author: person(author_id, author_name, author_email),
                committer: person(author_id, author_name, author_email),
                committed_at,
                message: format!("{subject}\n\nGenerated fixture commit {i}."),
                is_merge: i % 11 == 0,
                added_lines: 4 + (i * 13) % 180,
                deleted_lines: (i * 7) % 60,
                files_changed: (1 + i % 6) as u32,
            });
        }
        commits.sort_by(|a, b| b.committed_at.cmp(&a.committed_at));

        let branches = repos
            .iter()
            .map(|r| {
                let tip = commits.iter().find(|c| c.repo.id == r.id);
                (
                    r.id.clone(),
                    vec![
                        BranchDto {
                            id: format!("{}-main", r.name),
                            name: "main".to_string(),
                            is_default: true,
                            is_protected: true,
                            latest_commit: tip.map(branch_tip),
                        },
                        BranchDto {
                            id: format!("{}-develop", r.name),
                            name: "develop".to_string(),
                            is_default: false,
                            is_protected: false,
                            latest_commit: None,
                        },
                    ],
                )
            })
            .collect();

        let insights = vec![
            InsightDto {
                id: "ins-offhours".to_string(),
                title: "Off-hours activity is rising".to_string(),
                description: "A growing share of commits lands outside working hours.".to_string(),
                severity: Some("warning".to_string()),
            },
            InsightDto {
                id: "ins-msg".to_string(),
                title: "Commit messages are improving".to_string(),
                description: "The share of one-word messages dropped this period.".to_string(),
                severity: Some("positive".to_string()),
            },
            InsightDto {
                id: "ins-bus".to_string(),
                title: "Review load is concentrated".to_string(),
                description: "One author produced most changes in api-gateway.".to_string(),
                // Unknown label on purpose; adapters must fall back to info.
                severity: Some("elevated".to_string()),
            },
        ];

        let sync = SyncStatusDto {
            in_progress: false,
            phase: None,
            started_at: Some(at_noon(anchor) - Duration::hours(6)),
            finished_at: Some(at_noon(anchor) - Duration::hours(5)),
            last_error: None,
            progress: None,
        };

        Self {
            projects,
            repos,
            branches,
            commits,
            insights,
            sync,
        }
    }

    /// Commits matching a filter window, newest first.
    pub fn filtered_commits(
        &self,
        since: NaiveDate,
        until: NaiveDate,
        project_id: Option<i64>,
        repo_ids: Option<&[String]>,
        author_ids: Option<&[String]>,
    ) -> Vec<&CommitDto> {
        self.commits
            .iter()
            .filter(|c| {
                let day = c.committed_at.date_naive();
                day >= since && day <= until
            })
            .filter(|c| project_id.map_or(true, |p| c.repo.project_id == p))
            .filter(|c| repo_ids.map_or(true, |ids| ids.iter().any(|id| *id == c.repo.id)))
            .filter(|c| author_ids.map_or(true, |ids| ids.iter().any(|id| *id == c.author.id)))
            .collect()
    }

    pub fn kpi(commits: &[&CommitDto]) -> MetricsKpiDto {
        let devs: BTreeSet<&str> = commits.iter().map(|c| c.author.id.as_str()).collect();
        let repos: BTreeSet<&str> = commits.iter().map(|c| c.repo.id.as_str()).collect();

        let mut sizes: Vec<u64> =
            commits.iter().map(|c| c.added_lines + c.deleted_lines).collect();
        sizes.sort_unstable();
        let mean = if sizes.is_empty() {
            0.0
        } else {
            sizes.iter().sum::<u64>() as f64 / sizes.len() as f64
        };
        let median = match sizes.len() {
            0 => 0.0,
            n if n % 2 == 1 => sizes[n / 2] as f64,
            n => (sizes[n / 2 - 1] + sizes[n / 2]) as f64 / 2.0,
        };

        let avg_length = if commits.is_empty() {
            0.0
        } else {
            commits.iter().map(|c| subject_len(c)).sum::<usize>() as f64 / commits.len() as f64
        };
        let short = commits.iter().filter(|c| subject_len(c) < SHORT_MESSAGE_LEN).count();
        // Fraction form, not percentage points.
        let short_pct = if commits.is_empty() {
            0.0
        } else {
            short as f64 / commits.len() as f64
        };

        MetricsKpiDto {
            commits: commits.len() as u64,
            active_devs: devs.len() as u64,
            active_repos: repos.len() as u64,
            avg_commit_size: AvgCommitSizeDto { mean, median },
            msg_quality: MsgQualityDto {
                avg_length,
                short_pct,
            },
        }
    }

    pub fn series(commits: &[&CommitDto]) -> MetricsSeriesDto {
        let total = commits.len() as f64;
        let fraction = |n: u64| if total == 0.0 { 0.0 } else { n as f64 / total };

        let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        let mut hourly: BTreeMap<u8, (u64, u64, u64)> = BTreeMap::new();
        let mut weekday: BTreeMap<u8, u64> = BTreeMap::new();
        let mut hist: BTreeMap<&'static str, u64> = BTreeMap::new();

        for c in commits {
            *daily.entry(c.committed_at.date_naive()).or_default() += 1;
            let entry = hourly.entry(c.committed_at.hour() as u8).or_default();
            entry.0 += 1;
            entry.1 += c.added_lines;
            entry.2 += c.deleted_lines;
            *weekday
                .entry(c.committed_at.date_naive().weekday().num_days_from_monday() as u8)
                .or_default() += 1;
            *hist.entry(size_bucket(c.added_lines + c.deleted_lines)).or_default() += 1;
        }

        MetricsSeriesDto {
            commits_daily: daily
                .into_iter()
                .map(|(date, count)| DailyCommitPointDto { date, count })
                .collect(),
            by_hour: hourly
                .into_iter()
                .map(|(hour, (commits, added, deleted))| HourlyCommitPointDto {
                    hour,
                    commits,
                    share_pct: fraction(commits),
                    lines_added: added,
                    lines_deleted: deleted,
                })
                .collect(),
            by_weekday: weekday
                .into_iter()
                .map(|(weekday, commits)| WeekdayCommitPointDto {
                    weekday,
                    commits,
                    share_pct: fraction(commits),
                })
                .collect(),
            size_hist: hist
                .into_iter()
                .map(|(bucket, count)| SizeHistogramBucketDto {
                    bucket: bucket.to_string(),
                    count,
                })
                .collect(),
        }
    }

    pub fn authors_top(commits: &[&CommitDto]) -> Vec<AuthorSummaryDto> {
        let total = commits.len() as f64;
        let mut by_author: BTreeMap<&str, (u64, u64, &CommitPersonDto)> = BTreeMap::new();
        for c in commits {
            let entry = by_author.entry(c.author.id.as_str()).or_insert((0, 0, &c.author));
            entry.0 += 1;
            entry.1 += c.added_lines + c.deleted_lines;
        }

        let mut rows: Vec<AuthorSummaryDto> = by_author
            .into_values()
            .map(|(commit_count, lines, who)| AuthorSummaryDto {
                author_id: who.id.clone(),
                commits: commit_count,
                lines,
                // Percentage points here, unlike the hourly series.
                share_pct: if total == 0.0 {
                    0.0
                } else {
                    commit_count as f64 / total * 100.0
                },
                git_name: who.name.clone(),
                git_email: who.email.clone(),
            })
            .collect();
        rows.sort_by(|a, b| b.commits.cmp(&a.commits).then(a.author_id.cmp(&b.author_id)));
        rows
    }

    pub fn timeline_kpi(commits: &[&CommitDto]) -> TimelineKpiDto {
        let base = Self::kpi(commits);

        let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        let mut hourly: BTreeMap<u8, u64> = BTreeMap::new();
        let mut offhours = 0u64;
        for c in commits {
            *daily.entry(c.committed_at.date_naive()).or_default() += 1;
            *hourly.entry(c.committed_at.hour() as u8).or_default() += 1;
            let hour = c.committed_at.hour();
            if !(8..20).contains(&hour) {
                offhours += 1;
            }
        }

        let peak_day = daily.iter().max_by_key(|(_, n)| **n).map(|(d, _)| *d);
        let peak_hour = hourly.iter().max_by_key(|(_, n)| **n).map(|(h, _)| *h);
        let offhours_pct = if commits.is_empty() {
            None
        } else {
            Some(offhours as f64 / commits.len() as f64)
        };

        TimelineKpiDto {
            commits: base.commits,
            active_devs: base.active_devs,
            active_repos: base.active_repos,
            avg_commit_size: base.avg_commit_size,
            msg_quality: base.msg_quality,
            peak_day,
            peak_hour,
            offhours_pct,
        }
    }

    /// Slice a commit listing into one page. Cursors are stringified
    /// offsets, treated as opaque by every consumer.
    pub fn page<'a>(
        commits: &[&'a CommitDto],
        cursor: Option<&str>,
        limit: usize,
    ) -> (Vec<&'a CommitDto>, Option<String>) {
        let offset = cursor.and_then(|c| c.parse::<usize>().ok()).unwrap_or(0);
        let end = (offset + limit).min(commits.len());
        let items: Vec<&CommitDto> = commits.get(offset..end).map(|s| s.to_vec()).unwrap_or_default();
        let next = if end < commits.len() {
            Some(end.to_string())
        } else {
            None
        };
        (items, next)
    }
}

fn subject_len(c: &CommitDto) -> usize {
    c.message.lines().next().unwrap_or("").chars().count()
}

fn size_bucket(churn: u64) -> &'static str {
    match churn {
        0..=9 => "0-9",
        10..=49 => "10-49",
        50..=199 => "50-199",
        _ => "200+",
    }
}

fn at_noon(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
}

fn person(id: &str, name: &str, email: &str) -> CommitPersonDto {
    CommitPersonDto {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn repo(id: &str, project_id: i64, name: &str, anchor: NaiveDate) -> RepoDto {
    RepoDto {
        id: id.to_string(),
        project_id,
        name: name.to_string(),
        default_branch: "main".to_string(),
        description: None,
        updated_at: Some(at_noon(anchor)),
    }
}

fn branch_tip(c: &CommitDto) -> BranchTipDto {
    BranchTipDto {
        sha: c.sha.clone(),
        message: c.message.lines().next().unwrap_or("").to_string(),
        committed_at: c.committed_at,
        author: BranchTipAuthorDto {
            name: c.author.name.clone(),
            email: c.author.email.clone(),
        },
    }
}
