mod error;
mod requests;
mod tags;
mod types;

pub use error::ValidationError;
pub use requests::{
    AddExperimentTags, CreateExperiment, ExperimentResponse, FindExperimentRuns,
    FindExperimentRunsResponse, GetExperimentById, GetExperimentByName, GetTags, GetTagsResponse,
};
pub use tags::{Tag, TagList};
pub use types::{ExperimentRun, ExperimentSnapshot, KeyValue};
