use std::collections::BTreeMap; // sorted by constraint id for stable output

use clap::ValueEnum;
use lazy_static::lazy_static;
use serde::Serialize;

use super::constraint::*;
use crate::errors::*;

#[derive(Clone, Debug, ValueEnum)]
pub enum PrintFormat {
    Json,
    List,
    Table,
    Yaml,
}

#[derive(Serialize)]
pub struct ConstraintStore {
    constraints: BTreeMap<&'static str, Constraint>,
}

impl ConstraintStore {
    fn new() -> ConstraintStore {
        let mut store = ConstraintStore { constraints: BTreeMap::new() };
        for c in ALL_CONSTRAINTS {
            store.register(*c);
        }
        store
    }

    fn register(&mut self, c: Constraint) {
        self.constraints.insert(c.id, c);
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn lookup(&self, id: &str) -> anyhow::Result<&Constraint> {
        self.constraints.get(id).ok_or(anyhow!("constraint not found: {id}"))
    }

    pub fn explain(&self, id: &str) -> anyhow::Result<String> {
        let c = self.lookup(id)?;
        Ok(format!("{} ({})\n{:=<80}\n{}", c.id, c.kind_name(), "", c.help))
    }

    pub fn render(&self, format: &PrintFormat) -> anyhow::Result<String> {
        Ok(match format {
            PrintFormat::Json => serde_json::to_string(self)?,
            PrintFormat::List => self.render_list(),
            PrintFormat::Table => self.render_table(),
            PrintFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    fn render_list(&self) -> String {
        self.constraints
            .values()
            .map(|c| format!("{} ({}): {}\n", c.id, c.kind_name(), c.help()))
            .collect()
    }

    fn render_table(&self) -> String {
        let mut out = String::from("| id | kind | description |\n|---|---|---|\n");
        for c in self.constraints.values() {
            out.push_str(&format!("| {} | {} | {} |\n", c.id, c.kind_name(), c.help()));
        }
        out
    }
}

lazy_static! {
    pub static ref CONSTRAINTS: ConstraintStore = ConstraintStore::new();
}
