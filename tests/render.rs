use chrono::TimeZone;
use chrono_tz::America::Los_Angeles;
use chrono_tz::Tz;
use gh_daily_summary::adjust::adjust;
use gh_daily_summary::aggregate::{NewRepository, RepoTally};
use gh_daily_summary::render::{render, AggregateReport, RenderOptions};

fn tally_of(pairs: &[(&str, u64)]) -> RepoTally {
    let mut tally = RepoTally::default();
    for (repo, count) in pairs {
        tally.add(repo, *count);
    }
    tally
}

fn report(tally: RepoTally, commits: u64, prs: u64, issues: u64, reviews: u64) -> AggregateReport {
    AggregateReport {
        date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        timezone: Los_Angeles,
        total_commits: commits,
        total_prs: prs,
        total_issues: issues,
        total_reviews: reviews,
        repo_tally: tally,
        new_repos: vec![],
    }
}

#[test]
fn zero_activity_renders_the_empty_state_and_nothing_else() {
    let lines = render(
        &report(RepoTally::default(), 0, 0, 0, 0),
        "octocat",
        None,
        RenderOptions::default(),
    );

    assert_eq!(
        lines,
        vec![
            "# Daily GitHub Summary - 2024-05-01 (America/Los_Angeles)".to_string(),
            String::new(),
            "Today, octocat did:".to_string(),
            String::new(),
            "- Nothing was done.".to_string(),
        ]
    );
}

#[test]
fn repos_sort_by_descending_count_with_stable_ties_and_pluralization() {
    let tally = tally_of(&[("a/x", 3), ("a/y", 3), ("a/z", 1)]);
    let lines = render(
        &report(tally, 7, 0, 0, 0),
        "octocat",
        None,
        RenderOptions::default(),
    );

    let heading = lines
        .iter()
        .position(|line| line == "### Commits by repo")
        .expect("commits-by-repo section present");
    assert_eq!(lines[heading + 1], "- a/x: 3 commits");
    assert_eq!(lines[heading + 2], "- a/y: 3 commits");
    assert_eq!(lines[heading + 3], "- a/z: 1 commit");
}

#[test]
fn zero_count_repos_never_reach_the_rendered_output() {
    let tally = tally_of(&[("a/active", 2), ("a/idle", 0)]);
    let (commits, tally) = adjust(2, tally, None);

    let lines = render(
        &report(tally, commits, 0, 0, 0),
        "octocat",
        None,
        RenderOptions::default(),
    );

    assert!(lines.iter().any(|line| line == "- a/active: 2 commits"));
    assert!(!lines.iter().any(|line| line.contains("a/idle")));
}

#[test]
fn empty_tally_with_activity_renders_the_placeholder_bullet() {
    let lines = render(
        &report(RepoTally::default(), 0, 2, 0, 1),
        "octocat",
        None,
        RenderOptions::default(),
    );

    assert!(lines.iter().any(|line| line == "- Pull requests opened: **2**"));
    assert!(lines
        .iter()
        .any(|line| line == "- (No commits outside this repo.)"));
}

#[test]
fn category_bullets_keep_their_fixed_order() {
    let tally = tally_of(&[("a/x", 4)]);
    let lines = render(
        &report(tally, 4, 3, 2, 1),
        "octocat",
        None,
        RenderOptions::default(),
    );

    let expected_tail = vec![
        "- Commits (excluding this repo): **4**".to_string(),
        "- Pull requests opened: **3**".to_string(),
        "- Issues opened: **2**".to_string(),
        "- Reviews: **1**".to_string(),
        String::new(),
        "### Commits by repo".to_string(),
        "- a/x: 4 commits".to_string(),
    ];
    assert_eq!(&lines[4..], &expected_tail[..]);
}

#[test]
fn new_repositories_render_before_the_commits_bullet() {
    let mut rep = report(tally_of(&[("a/x", 1)]), 1, 0, 0, 0);
    rep.new_repos = vec![
        NewRepository {
            name: "acme/fresh".to_string(),
            url: "https://github.com/acme/fresh".to_string(),
        },
        NewRepository {
            name: "acme/also-fresh".to_string(),
            url: "https://github.com/acme/also-fresh".to_string(),
        },
    ];

    let lines = render(&rep, "octocat", None, RenderOptions::default());

    let created = lines
        .iter()
        .position(|line| line == "- Repositories created: **2**")
        .expect("created section present");
    assert_eq!(
        lines[created + 1],
        "    - [acme/fresh](https://github.com/acme/fresh)"
    );
    assert_eq!(
        lines[created + 2],
        "    - [acme/also-fresh](https://github.com/acme/also-fresh)"
    );
    let commits = lines
        .iter()
        .position(|line| line.starts_with("- Commits"))
        .expect("commits bullet present");
    assert!(created < commits);
}

#[test]
fn disabled_new_repos_section_falls_back_to_the_empty_state() {
    let mut rep = report(RepoTally::default(), 0, 0, 0, 0);
    rep.new_repos = vec![NewRepository {
        name: "acme/fresh".to_string(),
        url: "https://github.com/acme/fresh".to_string(),
    }];

    let with_section = render(&rep, "octocat", None, RenderOptions::default());
    assert!(with_section
        .iter()
        .any(|line| line == "- Repositories created: **1**"));

    let without_section = render(
        &rep,
        "octocat",
        None,
        RenderOptions {
            include_new_repos: false,
        },
    );
    assert!(without_section
        .iter()
        .any(|line| line == "- Nothing was done."));
    assert!(!without_section
        .iter()
        .any(|line| line.contains("Repositories created")));
}

#[test]
fn run_instant_adds_the_run_at_line_with_timezone_abbreviation() {
    let run_at = Los_Angeles.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
    let lines = render(
        &report(RepoTally::default(), 0, 0, 0, 0),
        "octocat",
        Some(run_at),
        RenderOptions::default(),
    );

    assert_eq!(lines[1], "**Run at:** 2024-05-01 10:30:00 PDT");
}

#[test]
fn output_is_deterministic_for_identical_input() {
    let make = || {
        let tally = tally_of(&[("a/x", 2), ("a/y", 2), ("a/z", 5)]);
        let run_at: chrono::DateTime<Tz> =
            Los_Angeles.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        render(
            &report(tally, 9, 1, 0, 2),
            "octocat",
            Some(run_at),
            RenderOptions::default(),
        )
    };

    assert_eq!(make(), make());
}
