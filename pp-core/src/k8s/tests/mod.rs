mod gvk_test;
mod util_test;

use rstest::*;

use super::*;
use crate::macros::*;
use crate::prelude::*;
