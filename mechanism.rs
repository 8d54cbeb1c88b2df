/// Kinetic mechanism as seen by the disk preprocessing: an ordered species table
pub trait Mechanism {
	fn species_names(&self) -> &[String];
	fn len(&self) -> usize { self.species_names().len() }
	/// 0-based species index, `None` when the mechanism does not know `name`
	fn index(&self, name: &str) -> Option<usize> { self.species_names().iter().position(|s| s == name) }
}

#[derive(Debug, Clone, PartialEq)] pub struct Species(Box<[String]>);

impl Mechanism for Species { fn species_names(&self) -> &[String] { &self.0 } }

impl<S: Into<String>> FromIterator<S> for Species {
	fn from_iter<I: IntoIterator<Item=S>>(iter: I) -> Self { Species(iter.into_iter().map(Into::into).collect()) }
}

#[cfg(feature="yaml")] mod cantera {
	use {fehler::{throws, throw}, std::path::Path, yaml::{Yaml, YamlLoader as Loader}, crate::Error, super::Species};
	impl Species {
		/// Species of the first phase, or of the whole species list when the phase references species indirectly
		#[throws(String)] pub fn parse(yaml: &[Yaml]) -> Self {
			let data = yaml.first().ok_or("Empty mechanism")?;
			let phase = data["phases"][0]["species"].as_vec().and_then(|list| list.iter().map(|s| s.as_str().map(String::from)).collect::<Option<Box<[String]>>>());
			let names = match phase {
				Some(names) => names,
				None => data["species"].as_vec().and_then(|list| list.iter().map(|s| s["name"].as_str().map(String::from)).collect::<Option<Box<[String]>>>()).ok_or("Missing species list")?,
			};
			if names.is_empty() { throw!("Empty species list") }
			Species(names)
		}
		#[throws(Error)] pub fn load(path: &Path) -> Self {
			let source = std::fs::read_to_string(path).map_err(|e| Error::parse(path, e))?;
			let yaml = Loader::load_from_str(&source).map_err(|e| Error::parse(path, e))?;
			let species = Self::parse(&yaml).map_err(|e| Error::parse(path, e))?;
			log::info!("{}: {} species", path.display(), super::Mechanism::len(&species));
			species
		}
	}

}
