use std::path::PathBuf;

use assertables::*;
use clap_complete::Shell;

use super::completions::{
    completion_filename_for,
    default_path_for,
    prompt_for_location,
};
use super::*;

#[rstest]
#[case::abs_path("/foo/bar", "/foo/bar")]
#[case::home_dir("~/foo/bar", dirs::home_dir().unwrap())]
#[case::no_entry("\n", default_path_for(&Shell::Bash))]
fn test_prompt_for_location(#[case] path: &str, #[case] expected_prefix: PathBuf) {
    let res = prompt_for_location(&Shell::Bash, &mut path.as_bytes()).unwrap();
    assert_starts_with!(res, &expected_prefix);
    assert!(res.ends_with(completion_filename_for(&Shell::Bash)));
}

#[rstest]
fn test_prompt_for_location_unsupported() {
    let _ = prompt_for_location(&Shell::Bash, &mut "~someone/foo/bar".as_bytes()).unwrap_err();
}

#[rstest]
fn test_command_parses() {
    PlantonCommandRoot::command().debug_assert();
}
