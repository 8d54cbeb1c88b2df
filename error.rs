use std::path::PathBuf;

#[derive(thiserror::Error, Debug)] pub enum Error {
	#[error("Configuration: {0}")] Config(String),
	#[error("Wrong input data in {}: {message}", .file.display())] Parse { file: PathBuf, message: String },
	#[error("Disk.{disk}: cell {cell} is outside of the mesh ({cells} cells)")] Bounds { disk: u32, cell: usize, cells: usize },
	#[error("{name}: {message}")] Field { name: String, message: String },
}

impl Error {
	pub fn parse(file: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self { Error::Parse{file: file.into(), message: message.to_string()} }
	pub fn field(name: &str, message: impl std::fmt::Display) -> Self { Error::Field{name: name.into(), message: message.to_string()} }
}
