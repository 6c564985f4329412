use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemaType {
    /// Environment the host asks the operator for
    Input,
    /// Metadata carried on each emitted feature
    Output,
}

/// JSON schema the host validates task input and output against.
pub fn schema(kind: SchemaType) -> Value {
    match kind {
        SchemaType::Input => json!({
            "type": "object",
            "properties": {
                "DEBUG": {
                    "type": "boolean",
                    "default": false,
                    "description": "Print results in logs"
                }
            }
        }),
        SchemaType::Output => json!({
            "type": "object",
            "properties": {}
        }),
    }
}
