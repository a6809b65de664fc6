mod completions_test;
mod kinds_test;
mod validate_test;

use rstest::*;

use super::*;
