mod config;
mod error;
mod feature;
mod schema;
mod sink;
mod task;

pub use config::TaskConfig;
pub use schema::{schema, SchemaType};
pub use sink::{DirectorySink, FeatureSink, StdoutSink};
pub use task::Task;
