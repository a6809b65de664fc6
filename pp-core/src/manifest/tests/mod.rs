
use rstest::*;

use super::*;
