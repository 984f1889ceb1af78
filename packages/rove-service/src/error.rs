pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The only error class that ever crosses the pipeline boundary.
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	/// Contained inside the detached audit task; never reaches a caller.
	#[error("Audit write failed: {message}")]
	Audit { message: String },
}
