use std::process::Stdio;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::{
    AsyncWriteExt,
    BufWriter,
};
use tokio::process::Command;
use tracing::*;

use super::*;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmRelease {
    pub name: String,
    pub namespace: String,
    pub chart: String,
    pub repo: String,
    pub version: String,
    pub values: serde_json::Value,
}

impl HelmRelease {
    pub fn urn(&self) -> String {
        format!("helm:Release::{}/{}", self.namespace, self.name)
    }
}

pub struct HelmCliProvider {
    binary: String,
    kubeconfig: Option<String>,
    kube_context: Option<String>,
}

impl HelmCliProvider {
    pub fn new(binary: &str) -> HelmCliProvider {
        HelmCliProvider {
            binary: binary.into(),
            kubeconfig: None,
            kube_context: None,
        }
    }

    pub fn with_kubeconfig(mut self, kubeconfig: Option<String>, kube_context: Option<String>) -> HelmCliProvider {
        self.kubeconfig = kubeconfig;
        self.kube_context = kube_context;
        self
    }

    // Values are fed through stdin (`--values -`) so that secrets never show up in the
    // process table
    pub fn upgrade_args(&self, release: &HelmRelease) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "upgrade".into(),
            "--install".into(),
            release.name.clone(),
            release.chart.clone(),
            "--repo".into(),
            release.repo.clone(),
            "--version".into(),
            release.version.clone(),
            "--namespace".into(),
            release.namespace.clone(),
            "--values".into(),
            "-".into(),
            "--wait".into(),
        ];

        if let Some(kubeconfig) = &self.kubeconfig {
            args.extend(["--kubeconfig".into(), kubeconfig.clone()]);
        }
        if let Some(ctx) = &self.kube_context {
            args.extend(["--kube-context".into(), ctx.clone()]);
        }
        args
    }
}

impl Default for HelmCliProvider {
    fn default() -> Self {
        HelmCliProvider::new("helm")
    }
}

#[async_trait]
impl HelmProvider for HelmCliProvider {
    async fn upgrade_install(&self, release: &HelmRelease) -> EmptyResult {
        let args = self.upgrade_args(release);
        info!("Running `{}` with args {:?}", self.binary, args);

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("could not run {}", self.binary))?;

        let mut stdin = BufWriter::new(child.stdin.take().ok_or(anyhow!("could not take stdin"))?);
        stdin.write_all(serde_yaml::to_string(&release.values)?.as_bytes()).await?;
        stdin.flush().await?;
        drop(stdin);

        let output = child.wait_with_output().await?;
        debug!("helm output: {}", String::from_utf8_lossy(&output.stdout));
        if !output.status.success() {
            bail!(ProviderError::helm_failed(String::from_utf8_lossy(&output.stderr).trim()));
        }
        Ok(())
    }
}
