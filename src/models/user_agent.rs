use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParsedUserAgent {
    pub browser: String,
    pub os: String,
    pub device_type: String,
}
