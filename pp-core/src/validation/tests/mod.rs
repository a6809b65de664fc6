mod constraint_store_test;
mod resource_test;

use rstest::*;

use super::*;

fn messages(res: Result<(), ValidationErrors>) -> Vec<String> {
    match res {
        Ok(()) => vec![],
        Err(errs) => errs.violations().iter().map(|v| v.to_string()).collect(),
    }
}
