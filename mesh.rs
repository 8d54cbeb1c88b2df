use {fehler::{throws, throw}, serde::{Serialize, Deserialize}, std::path::{Path, PathBuf}, linear_map::LinearMap as Map, crate::Error};

/// Exponents of kg, m, s, K, mol, A, cd
pub type Dimensions = [i8; 7];
pub const mass_per_volume_per_time: Dimensions = [1, -3, -1, 0, 0, 0, 0];

/// Cell centered scalar field
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)] pub struct Field {
	pub name: String,
	pub dimensions: Dimensions,
	pub values: Box<[f64]>,
}

/// Mesh and field storage of the host solver
pub trait Mesh {
	fn cells_len(&self) -> usize;
	fn create(&self, name: &str, dimensions: Dimensions, default: f64) -> Field { Field{name: name.into(), dimensions, values: vec![default; self.cells_len()].into()} }
	fn write(&mut self, field: &Field) -> Result<(), Error>;
	/// Fails when the field was never written
	fn read(&self, name: &str) -> Result<Field, Error>;
}

#[throws(Error)] fn check(cells_len: usize, field: &Field) {
	if field.values.len() != cells_len { throw!(Error::field(&field.name, format!("{} values for {cells_len} cells", field.values.len()))) }
}

#[derive(Debug, Default)] pub struct Memory {
	cells_len: usize,
	fields: Map<String, Field>,
}

impl Memory {
	pub fn new(cells_len: usize) -> Self { Self{cells_len, fields: Map::new()} }
	pub fn contains(&self, name: &str) -> bool { self.fields.contains_key(name) }
}

impl Mesh for Memory {
	fn cells_len(&self) -> usize { self.cells_len }
	#[throws(Error)] fn write(&mut self, field: &Field) {
		check(self.cells_len, field)?;
		self.fields.insert(field.name.clone(), field.clone());
	}
	#[throws(Error)] fn read(&self, name: &str) -> Field { self.fields.get(name).cloned().ok_or_else(|| Error::field(name, "Missing field"))? }
}

/// Case directory: fields are stored as `<case>/<time>/<name>.yaml`
#[derive(Debug, Clone)] pub struct Case {
	path: PathBuf,
	time: String,
	cells_len: usize,
}

/// Cell count from the `note` of a polyMesh file header
fn header_cells_len(header: &str) -> Option<usize> {
	header.split(|c: char| c.is_whitespace() || c == '"' || c == ';').find_map(|token| token.strip_prefix("nCells:")).and_then(|n| n.parse().ok())
}

impl Case {
	/// Reads the cell count from `constant/polyMesh/owner`
	#[throws(Error)] pub fn open(path: impl Into<PathBuf>, time: &str) -> Self {
		let path = path.into();
		let owner = path.join("constant").join("polyMesh").join("owner");
		let bytes = std::fs::read(&owner).map_err(|e| Error::parse(&owner, e))?;
		let header = String::from_utf8_lossy(&bytes[..bytes.len().min(4096)]);
		let cells_len = header_cells_len(&header).ok_or_else(|| Error::parse(&owner, "Missing nCells in header"))?;
		log::info!("{}: {cells_len} cells", path.display());
		Self{path, time: time.into(), cells_len}
	}
	pub fn new(path: impl Into<PathBuf>, time: &str, cells_len: usize) -> Self { Self{path: path.into(), time: time.into(), cells_len} }
	pub fn path(&self) -> &Path { &self.path }
	pub fn time(&self) -> &str { &self.time }
	pub fn field_path(&self, name: &str) -> PathBuf { self.path.join(&self.time).join(format!("{name}.yaml")) }
}

impl Mesh for Case {
	fn cells_len(&self) -> usize { self.cells_len }
	#[throws(Error)] fn write(&mut self, field: &Field) {
		check(self.cells_len, field)?;
		let path = self.field_path(&field.name);
		if let Some(folder) = path.parent() { std::fs::create_dir_all(folder).map_err(|e| Error::field(&field.name, e))?; }
		let yaml = serde_yaml::to_string(field).map_err(|e| Error::field(&field.name, e))?;
		std::fs::write(&path, yaml).map_err(|e| Error::field(&field.name, format!("{}: {e}", path.display())))?;
	}
	#[throws(Error)] fn read(&self, name: &str) -> Field {
		let path = self.field_path(name);
		if !path.exists() { throw!(Error::field(name, format!("Missing field {}", path.display()))) }
		let yaml = std::fs::read_to_string(&path).map_err(|e| Error::field(name, format!("{}: {e}", path.display())))?;
		let field: Field = serde_yaml::from_str(&yaml).map_err(|e| Error::field(name, format!("{}: {e}", path.display())))?;
		if field.name != name { throw!(Error::field(name, format!("{} holds {}", path.display(), field.name))) }
		check(self.cells_len, &field)?;
		field
	}
}

#[cfg(test)] mod test {
	use super::*;
	#[test] fn header() {
		let header = "FoamFile\n{\n    version     2.0;\n    format      ascii;\n    class       labelList;\n    note        \"nPoints:1331  nCells:1000  nFaces:3300  nInternalFaces:2700\";\n    location    \"constant/polyMesh\";\n    object      owner;\n}\n";
		assert_eq!(header_cells_len(header), Some(1000));
		assert_eq!(header_cells_len("FoamFile { object owner; }"), None);
	}
	#[test] fn memory() {
		let mut mesh = Memory::new(3);
		let mut field = mesh.create("SDisk_H2", mass_per_volume_per_time, 0.);
		field.values[1] = -2.5;
		mesh.write(&field).unwrap();
		assert_eq!(mesh.read("SDisk_H2").unwrap(), field);
		assert!(matches!(mesh.read("SDisk_O2"), Err(Error::Field{..})));
		assert!(mesh.write(&Field{name: "short".into(), dimensions: mass_per_volume_per_time, values: [0.].into()}).is_err());
	}
	#[test] fn case() {
		let folder = tempfile::tempdir().unwrap();
		let polyMesh = folder.path().join("constant").join("polyMesh");
		std::fs::create_dir_all(&polyMesh).unwrap();
		std::fs::write(polyMesh.join("owner"), "FoamFile\n{\n    note \"nPoints:8 nCells:4 nFaces:12 nInternalFaces:4\";\n}\n(\n0\n1\n)\n").unwrap();
		let mut case = Case::open(folder.path(), "0").unwrap();
		assert_eq!(case.cells_len(), 4);
		let mut field = case.create("SDisk_CH4", mass_per_volume_per_time, 0.);
		field.values.copy_from_slice(&[0.1, -1./3., 0., 6.02214076e23]);
		case.write(&field).unwrap();
		assert!(case.field_path("SDisk_CH4").exists());
		assert_eq!(case.read("SDisk_CH4").unwrap(), field);
		assert!(case.read("SDisk_O2").is_err());
		assert!(Case::new(folder.path(), "0", 5).read("SDisk_CH4").is_err());
	}
}
