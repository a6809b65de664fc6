mod kubernetes_test;

use rstest::*;

use super::*;
