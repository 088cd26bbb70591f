use std::path::Path;

use anyhow::{Context, Result};

use schema_sync::Fingerprint;

use crate::ui::context::UiContext;

pub fn cmd_fingerprint(path: &Path, ui: &UiContext) -> Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let fingerprint = Fingerprint::of(&bytes);

    if ui.json {
        let output = serde_json::json!({
            "event": "fingerprint",
            "path": path.display().to_string(),
            "fingerprint": fingerprint.as_str(),
            "bytes": bytes.len(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}  {}", fingerprint, path.display());
    }

    Ok(())
}
