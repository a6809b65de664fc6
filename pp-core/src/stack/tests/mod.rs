mod context_test;
mod outputs_test;

use rstest::*;

use super::*;
