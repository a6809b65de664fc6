mod locals_test;

use rstest::*;

use super::*;
