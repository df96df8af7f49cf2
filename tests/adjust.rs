use gh_daily_summary::adjust::adjust;
use gh_daily_summary::aggregate::RepoTally;

fn tally_of(pairs: &[(&str, u64)]) -> RepoTally {
    let mut tally = RepoTally::default();
    for (repo, count) in pairs {
        tally.add(repo, *count);
    }
    tally
}

#[test]
fn adjusted_total_is_floored_at_zero() {
    let (adjusted, tally) = adjust(3, tally_of(&[("acme/summary", 5)]), Some("acme/summary"));

    assert_eq!(adjusted, 0);
    assert!(tally.is_empty());
}

#[test]
fn reporting_repo_and_zero_entries_are_removed() {
    let tally = tally_of(&[("acme/summary", 2), ("acme/widgets", 3), ("acme/idle", 0)]);

    let (adjusted, tally) = adjust(6, tally, Some("acme/summary"));

    assert_eq!(adjusted, 4);
    assert_eq!(tally.entries(), &[("acme/widgets".to_string(), 3)]);
    assert_eq!(tally.get("acme/summary"), 0);
}

#[test]
fn no_reporting_repo_means_no_subtraction() {
    let tally = tally_of(&[("acme/widgets", 3), ("acme/idle", 0)]);

    let (adjusted, tally) = adjust(5, tally, None);

    assert_eq!(adjusted, 5);
    assert_eq!(tally.entries(), &[("acme/widgets".to_string(), 3)]);
}

#[test]
fn reporting_repo_absent_from_tally_changes_nothing_but_zero_filtering() {
    let tally = tally_of(&[("acme/widgets", 3)]);

    let (adjusted, tally) = adjust(3, tally, Some("acme/summary"));

    assert_eq!(adjusted, 3);
    assert_eq!(tally.len(), 1);
}
