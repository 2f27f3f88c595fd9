//! C6 — Output Router (§4.6).

use serde::Serialize;
use tctl_discovery_types::{DiscoveryError, Result};

use crate::args::OutputFormat;

/// Parses a raw format string against the explicit three-way contract
/// (§4.6). The CLI itself never hits this path (`clap`'s `ValueEnum`
/// rejects bad values earlier), but the contract is exercised directly
/// here and by the output-router invariant tests (§8 invariant 7).
pub fn parse_output_format(raw: &str) -> Result<OutputFormat> {
    match raw {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        "yaml" => Ok(OutputFormat::Yaml),
        other => Err(DiscoveryError::bad_parameter(format!("unknown format: {other}"))),
    }
}

/// Dispatches `value` to JSON/YAML marshaling or to `render_text`,
/// depending on `format`. `render_text` is only ever invoked for
/// `OutputFormat::Text`; JSON/YAML never touch it (§8 invariant 7).
pub fn route<T, F>(format: OutputFormat, value: &T, render_text: Option<F>) -> Result<String>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| DiscoveryError::Backend(anyhow::Error::new(e))),
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| DiscoveryError::Backend(anyhow::Error::new(e)))
        }
        OutputFormat::Text => match render_text {
            Some(render) => Ok(render(value)),
            None => Err(DiscoveryError::bad_parameter(
                "text output renderer is required",
            )),
        },
    }
}
