use serde::Deserialize;

/// Decoder settings. Deserializable so it can sit inside an application's
/// own TOML/JSON config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecoderConfig {
    /// Upper bound on the length of any one decoded sequence. Guards against
    /// keys like `list[4000000000]` allocating huge vectors.
    #[serde(default = "default_max_sequence_len")]
    pub max_sequence_len: usize,
    /// Timestamp format for fields without their own `format`.
    /// `None` → RFC 3339.
    #[serde(default)]
    pub time_format: Option<String>,
}

fn default_max_sequence_len() -> usize {
    1024
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_sequence_len: default_max_sequence_len(),
            time_format: None,
        }
    }
}
