use anyhow::Result;
use console::style;
use swarmind::ApiConfig;

/// Print the version and the store this invocation would talk to
pub async fn execute(config: Option<&ApiConfig>) -> Result<()> {
    for (label, value) in summary(config) {
        println!("{:>10} {}", style(label).bold().green(), value);
    }
    Ok(())
}

fn summary(config: Option<&ApiConfig>) -> Vec<(&'static str, String)> {
    let mut lines = vec![("swarmind", env!("CARGO_PKG_VERSION").to_string())];
    match config {
        Some(config) => {
            lines.push(("store", config.url.clone()));
            lines.push(("namespace", config.namespace.clone()));
            let timeout = config
                .timeout
                .map(|t| format!("{}s", t.as_secs()))
                .unwrap_or_else(|| "none".to_string());
            lines.push(("timeout", timeout));
        }
        None => lines.push(("store", "not configured".to_string())),
    }
    lines
}
