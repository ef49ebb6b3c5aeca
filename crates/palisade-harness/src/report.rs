//! Serializable snapshot of a finished bootstrap.
//!
//! Mirrors [`palisade_core::BootstrapResult`] plus what the loader was asked
//! to map, in a stable JSON shape suitable for diffs.

use serde::Serialize;

use palisade_core::BootstrapResult;

use crate::fsio::RecordingLoader;

/// JSON report emitted by the `bootcheck` binary.
#[derive(Debug, Clone, Serialize)]
pub struct BootReport {
    pub instance_id: u64,
    pub manifest_uri: String,
    pub executable_uri: Option<String>,
    pub argv: Vec<String>,
    pub envp: Vec<String>,
    pub disable_aslr: bool,
    /// URI of the selected debug sink; `null` when debugging is off.
    pub debug_sink: Option<String>,
    /// Preload libraries in the order the loader was asked to map them.
    pub preloaded: Vec<String>,
}

impl BootReport {
    pub fn new(result: &BootstrapResult, loader: &RecordingLoader) -> Self {
        Self {
            instance_id: result.instance_id,
            manifest_uri: result.manifest_uri.clone(),
            executable_uri: result.executable_uri.clone(),
            argv: result.argv.clone(),
            envp: result.envp.clone(),
            disable_aslr: result.disable_aslr,
            debug_sink: result.debug_sink.uri().map(str::to_owned),
            preloaded: loader.preloads.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palisade_core::DebugSink;

    #[test]
    fn report_serializes_to_stable_json() {
        let result = BootstrapResult {
            instance_id: 3,
            argv: vec!["app".to_string()],
            envp: vec!["LANG=C".to_string()],
            disable_aslr: false,
            executable_uri: Some("file:app".to_string()),
            manifest_uri: "file:app.manifest".to_string(),
            debug_sink: DebugSink::Inline,
        };
        let loader = RecordingLoader {
            preloads: vec!["file:lib".to_string()],
            executable: Some("file:app".to_string()),
            executable_from_image: false,
        };
        let json = serde_json::to_value(BootReport::new(&result, &loader)).unwrap();
        assert_eq!(json["argv"][0], "app");
        assert_eq!(json["debug_sink"], "dev:tty");
        assert_eq!(json["preloaded"][0], "file:lib");
        assert_eq!(json["disable_aslr"], false);
    }
}
