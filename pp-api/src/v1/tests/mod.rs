mod schema_defaults_test;

use rstest::*;

use super::*;
