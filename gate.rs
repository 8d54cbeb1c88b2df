//! Computes the disk source fields and stores them, or reads back stored ones
use {fehler::{throws, throw}, std::path::Path, crate::{Error, Mechanism, Mesh, Options, DiskSourceTerms, Correction, topology, source, scatter, mesh::mass_per_volume_per_time}};

pub fn field_name(species: &str) -> String { format!("SDisk_{species}") }

/// Collaborators shared by every step
pub struct Context<'t> {
	pub mechanism: &'t dyn Mechanism,
	pub mesh: &'t mut dyn Mesh,
	pub options: &'t Options,
	/// Relative disk folders are resolved from this directory
	pub case: &'t Path,
}

/// Disk source terms (kg/m³/s) of every mechanism species
#[derive(Debug, Clone, PartialEq)] pub struct SourceFields {
	pub species: Box<[String]>,
	pub values: Box<[Box<[f64]>]>,
}

impl SourceFields {
	pub fn get(&self, species: &str) -> Option<&[f64]> { self.species.iter().position(|s| s == species).map(|k| &*self.values[k]) }
	pub fn iter(&self) -> impl Iterator<Item=(&str, &[f64])> { self.species.iter().map(|s| s.as_str()).zip(self.values.iter().map(|v| &**v)) }
}

/// Topology, samples, correction and scatter
#[throws(Error)] pub fn preprocess(mechanism: &dyn Mechanism, disks: &DiskSourceTerms, folder: &Path, cells_len: usize) -> SourceFields {
	let topologies = topology::load(folder, &disks.disks)?;
	let correction = Correction{coefficient: disks.correction_coefficient, exclude_negative: disks.exclude_negative_source_terms.into()};
	let mut rates = Vec::with_capacity(topologies.len());
	for topology in topologies.iter() {
		let sample = source::load(folder, topology.id, &disks.target_time.0, mechanism)?;
		rates.push(correction.apply(&sample, topology));
	}
	log::info!("Source terms from disks creation... ({} species, {cells_len} cells)", mechanism.len());
	let pairs = topologies.iter().zip(rates.iter()).map(|(topology, rates)| (topology, &**rates)).collect::<Box<_>>();
	SourceFields{species: mechanism.species_names().into(), values: scatter(mechanism.len(), &pairs, cells_len, disks.overlap)?}
}

#[throws(Error)] pub fn persist(mesh: &mut dyn Mesh, fields: &SourceFields) {
	for (species, values) in fields.iter() {
		let mut field = mesh.create(&field_name(species), mass_per_volume_per_time, 0.);
		field.values = values.into();
		mesh.write(&field)?;
	}
}

/// Reads back every `SDisk_<species>` field, all of which must exist
#[throws(Error)] pub fn load(mechanism: &dyn Mechanism, mesh: &dyn Mesh) -> SourceFields {
	let mut values = Vec::with_capacity(mechanism.len());
	for species in mechanism.species_names() {
		let name = field_name(species);
		let field = mesh.read(&name)?;
		if field.dimensions != mass_per_volume_per_time { throw!(Error::field(&name, format!("dimensions {:?} (expected {mass_per_volume_per_time:?})", field.dimensions))) }
		values.push(field.values);
	}
	let fields = SourceFields{species: mechanism.species_names().into(), values: values.into()};
	let cells = (0..mesh.cells_len()).filter(|&cell| fields.values.iter().any(|v| v[cell] != 0.)).count();
	log::info!("Source terms from disks read: {} fields, {cells} cells with sources", fields.species.len());
	fields
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)] pub enum State { #[default] Uninitialized, Preprocessing, Persisted, Loaded, Disabled }

#[derive(Debug)] pub enum Outcome {
	Disabled,
	/// Fields were computed and written: the preprocessing pass is complete
	Preprocessed(SourceFields),
	Loaded(SourceFields),
}

impl Outcome {
	pub fn fields(&self) -> Option<&SourceFields> { match self { Outcome::Disabled => None, Outcome::Preprocessed(fields)|Outcome::Loaded(fields) => Some(fields) } }
}

#[derive(Debug, Default)] pub struct Gate { state: State }

impl Gate {
	pub fn state(&self) -> State { self.state }
	#[throws(Error)] pub fn run(&mut self, context: &mut Context) -> Outcome {
		if self.state != State::Uninitialized { throw!(Error::Config(format!("Disk source terms were already set up ({:?})", self.state))) }
		let options = context.options;
		match options.disks() {
			None => {
				log::info!("Disk source terms: off");
				self.state = State::Disabled;
				Outcome::Disabled
			}
			Some(disks) if disks.pre_process.0 => {
				self.state = State::Preprocessing;
				let fields = preprocess(context.mechanism, disks, &context.case.join(&disks.folder), context.mesh.cells_len())?;
				persist(context.mesh, &fields)?;
				self.state = State::Persisted;
				log::info!("Source terms from disks correctly written!");
				Outcome::Preprocessed(fields)
			}
			Some(_) => {
				let fields = load(context.mechanism, context.mesh)?;
				self.state = State::Loaded;
				Outcome::Loaded(fields)
			}
		}
	}
}
