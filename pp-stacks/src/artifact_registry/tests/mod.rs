mod artifact_registry_test;

use rstest::*;

use super::*;
