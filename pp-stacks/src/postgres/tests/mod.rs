mod postgres_test;

use rstest::*;

use super::*;
