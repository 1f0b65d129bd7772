#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to build table `{name}`")]
    Build {
        name: String,
        #[source]
        source: range_table::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
