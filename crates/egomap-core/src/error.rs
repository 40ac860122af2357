pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Stakeholder name must not be empty")]
    EmptyName,

    #[error("No record with id: {id}")]
    UnknownRecord { id: String },
}
