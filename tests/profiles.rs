use std::fs;
use std::path::PathBuf;

use matchsim_terminal::profile::{Metric, load_team_profile};

fn temp_csv(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("matchsim_{}_{name}", std::process::id()));
    fs::write(&path, contents).expect("write fixture csv");
    path
}

#[test]
fn loads_profile_and_takes_name_from_first_row() {
    let path = temp_csv(
        "ok.csv",
        "team,possession,shots,efficiency\n\
         Rovers,55,12,30\n\
         Rovers,60,14,32\n\
         Rovers,58,13,31\n",
    );

    let profile = load_team_profile(&path).unwrap();
    assert_eq!(profile.name, "Rovers");
    assert_eq!(profile.matches(), 3);
    assert_eq!(profile.metric(Metric::Possession), &[55.0, 60.0, 58.0]);
    assert_eq!(profile.metric(Metric::Shots), &[12.0, 14.0, 13.0]);
    assert_eq!(profile.metric(Metric::Efficiency), &[30.0, 32.0, 31.0]);

    let _ = fs::remove_file(path);
}

#[test]
fn header_matching_ignores_case_and_padding() {
    let path = temp_csv(
        "headers.csv",
        "Team, Possession ,SHOTS,Efficiency\n\
         Wanderers,45,8,25\n",
    );

    let profile = load_team_profile(&path).unwrap();
    assert_eq!(profile.name, "Wanderers");
    assert_eq!(profile.metric(Metric::Shots), &[8.0]);

    let _ = fs::remove_file(path);
}

#[test]
fn missing_column_fails_fast_and_names_it() {
    let path = temp_csv(
        "missing.csv",
        "team,possession,shots\n\
         Rovers,55,12\n",
    );

    let err = load_team_profile(&path).unwrap_err();
    assert!(err.to_string().contains("efficiency"), "got: {err:#}");

    let _ = fs::remove_file(path);
}

#[test]
fn header_only_file_has_no_data_rows() {
    let path = temp_csv("empty.csv", "team,possession,shots,efficiency\n");

    let err = load_team_profile(&path).unwrap_err();
    assert!(err.to_string().contains("no data rows"), "got: {err:#}");

    let _ = fs::remove_file(path);
}
