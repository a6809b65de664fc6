mod microservice_test;

use rstest::*;

use super::*;
