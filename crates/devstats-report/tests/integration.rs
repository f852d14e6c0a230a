use std::path::Path;

use devstats_core::AnalysisConfig;
use devstats_report::{run_report, Answer, Outcome, RankedCount, Report};
use devstats_table::Dataset;

const USERS: &str = "\
login,name,company,location,email,hireable,bio,public_repos,followers,following,created_at
amelie,Amélie Martin,@Datadog ,\"Paris, France\",amelie@example.fr,true,Building observability tools in Rust,40,1500,10,2010-04-01T09:00:00Z
bruno,Bruno Bernard,datadog,paris,,,Go and coffee,25,800,0,2012-06-15T12:00:00Z
chloe,Chloé Martin,,Paris,chloe@example.fr,true,,12,350,50,2008-02-20T08:00:00Z
david,David,@Criteo,Lyon,,false,ML engineer,60,5000,100,2021-03-03T10:00:00Z
emma,Emma Bernard,Criteo,\"Île-de-France, Paris\",,,Open source maintainer and speaker,5,150,5,2022-07-07T07:00:00Z
farid,Farid Petit,,Berlin,farid@example.de,,,8,20,40,not-a-date
";

const REPOSITORIES: &str = "\
login,language,license_name,stargazers_count,has_projects,has_wiki,created_at
amelie,Rust,MIT,120,true,true,2024-06-01T10:00:00Z
amelie,Rust,MIT,30,true,false,2024-06-02T10:00:00Z
amelie,Go,Apache-2.0,10,false,false,2024-06-03T10:00:00Z
bruno,Go,MIT,5,true,true,2024-06-01T18:00:00Z
david,Python,,900,false,true,2024-06-04T10:00:00Z
david,Python,GPL-3.0,100,false,false,2024-06-08T10:00:00Z
david,TypeScript,Apache-2.0,40,true,true,2024-06-09T10:00:00Z
emma,Python,MIT,2,false,false,2024-06-05T10:00:00Z
emma,,,0,false,false,garbage
";

fn write_fixture(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let users = dir.join("users.csv");
    let repos = dir.join("repositories.csv");
    std::fs::write(&users, USERS).unwrap();
    std::fs::write(&repos, REPOSITORIES).unwrap();
    (users, repos)
}

fn full_report() -> Report {
    let dir = tempfile::tempdir().unwrap();
    let (users, repos) = write_fixture(dir.path());
    let data = Dataset::load(&users, &repos).unwrap();
    run_report(&data, &AnalysisConfig::default(), &[]).unwrap()
}

fn answer(report: &Report, id: u8) -> &Answer {
    let finding = report
        .findings
        .iter()
        .find(|f| f.id == id)
        .unwrap_or_else(|| panic!("question {id} missing"));
    match &finding.outcome {
        Outcome::Answer(answer) => answer,
        Outcome::Error(e) => panic!("question {id} failed: {e}"),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn label(report: &Report, id: u8) -> Option<String> {
    match answer(report, id) {
        Answer::Label(label) => label.clone(),
        other => panic!("question {id}: expected a label, got {other:?}"),
    }
}

#[test]
fn every_question_is_answered() {
    let report = full_report();
    assert_eq!(report.findings.len(), 16);
    assert_eq!(report.failures(), 0, "{report}");
    assert_eq!(report.users, 6);
    assert_eq!(report.repositories, 9);
}

#[test]
fn rankings() {
    let report = full_report();
    assert!(matches!(
        answer(&report, 1),
        Answer::Logins(l) if *l == strings(&["amelie", "bruno", "chloe"])
    ));
    assert!(matches!(
        answer(&report, 2),
        Answer::Logins(l) if *l == strings(&["chloe", "amelie", "bruno", "emma"])
    ));
    assert!(matches!(
        answer(&report, 3),
        Answer::Labels(l) if *l == strings(&["MIT", "Apache-2.0", "GPL-3.0"])
    ));
    assert!(matches!(
        answer(&report, 8),
        Answer::Logins(l) if *l == strings(&["bruno", "amelie", "david", "emma", "chloe"])
    ));
}

#[test]
fn modes_and_group_means() {
    let report = full_report();
    // DATADOG, "" and CRITEO all appear twice; DATADOG was seen first.
    assert_eq!(label(&report, 4).as_deref(), Some("DATADOG"));
    assert_eq!(label(&report, 5).as_deref(), Some("Python"));
    assert_eq!(label(&report, 6).as_deref(), Some("TypeScript"));
    assert_eq!(label(&report, 7).as_deref(), Some("Python"));
}

#[test]
fn correlations_are_bounded() {
    let report = full_report();
    for id in [9, 11] {
        match answer(&report, id) {
            Answer::Scalar(Some(r)) => assert!((-1.0..=1.0).contains(r), "q{id}: {r}"),
            other => panic!("q{id}: unexpected {other:?}"),
        }
    }
}

#[test]
fn regressions() {
    let report = full_report();
    match answer(&report, 10) {
        Answer::Regression(fit) => {
            assert_eq!(fit.observations, 6);
            assert_eq!(fit.slope.name, "public_repos");
            assert!((0.0..=1.0).contains(&fit.r_squared));
        }
        other => panic!("unexpected {other:?}"),
    }
    match answer(&report, 13) {
        Answer::Regression(fit) => {
            assert_eq!(fit.observations, 4);
            assert_eq!(fit.slope.name, "bio_word_count");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn hireable_comparisons() {
    let report = full_report();
    match answer(&report, 12) {
        Answer::Split { hireable, other } => {
            assert_eq!(*hireable, Some(30.0));
            assert_eq!(*other, Some(36.25));
        }
        other => panic!("unexpected {other:?}"),
    }
    match answer(&report, 15) {
        Answer::Split { hireable, other } => {
            assert_eq!(*hireable, Some(1.0));
            assert_eq!(*other, Some(0.25));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn weekend_creators_and_surnames() {
    let report = full_report();
    let expected = vec![
        RankedCount { key: "amelie".into(), count: 2 },
        RankedCount { key: "david".into(), count: 2 },
        RankedCount { key: "bruno".into(), count: 1 },
    ];
    assert!(matches!(answer(&report, 14), Answer::Counted(c) if *c == expected));
    assert!(matches!(
        answer(&report, 16),
        Answer::Surnames { names, count: 2 } if *names == strings(&["Martin", "Bernard"])
    ));
}

#[test]
fn text_rendering_starts_with_question_one() {
    let text = full_report().to_string();
    assert!(text.starts_with("Top 5 users in Paris by followers: amelie, bruno, chloe\n"));
    assert!(text.contains("Most common surname(s): Martin, Bernard (count: 2)"));
    assert!(text.contains("R-squared"));
}

#[test]
fn json_rendering_is_valid() {
    let json = serde_json::to_string(&full_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["findings"].as_array().unwrap().len(), 16);
    assert_eq!(value["findings"][9]["answer"]["kind"], "regression");
}

#[test]
fn stricter_config_changes_answers() {
    let dir = tempfile::tempdir().unwrap();
    let (users, repos) = write_fixture(dir.path());
    let data = Dataset::load(&users, &repos).unwrap();
    let config = AnalysisConfig {
        city: "lyon".into(),
        min_followers: 1000,
        top_n: 2,
        ..AnalysisConfig::default()
    };
    let report = run_report(&data, &config, &[1, 8]).unwrap();
    assert!(matches!(answer(&report, 1), Answer::Logins(l) if *l == strings(&["david"])));
    assert!(matches!(answer(&report, 8), Answer::Logins(l) if l.len() == 2));
}
