//! Species source terms sampled over a slice of an external domain
use {fehler::{throws, throw}, std::path::Path, crate::{Error, xml, Mechanism}};

pub fn file_name(id: u32, target_time: &str) -> String { format!("Disk.{id}.source.{target_time}.xml") }

#[derive(Debug, Clone, PartialEq)] pub struct Sample {
	pub id: u32,
	pub target_time: String,
	/// Volume of the external domain slice the rates were integrated over (m³)
	pub slice_volume: f64,
	/// Raw rate for each mechanism species (kg/s over the slice), zero when absent from the sample
	pub rates: Box<[f64]>,
}

fn scalar<T: std::str::FromStr>(root: &xml::Element, name: &str) -> Result<T, String> where T::Err: std::fmt::Display {
	let text = root.child(name).ok_or_else(|| format!("Missing {name}"))?.text();
	text.parse().map_err(|e| format!("{name} '{text}': {e}"))
}

#[throws(String)] pub fn parse(source: &str, id: u32, target_time: &str, mechanism: &dyn Mechanism) -> Sample {
	let root = xml::parse(source)?;
	if root.name != "opensmoke" { throw!(format!("Root element is <{}> (expected <opensmoke>)", root.name)) }
	let species_len: usize = scalar(&root, "number-species")?;
	let slice_volume: f64 = scalar(&root, "slice-volume")?;
	if !(slice_volume > 0. && slice_volume.is_finite()) { throw!(format!("slice-volume {slice_volume} is not strictly positive")) }
	let tokens = root.child("source-terms").ok_or("Missing source-terms")?.text().split_whitespace().collect::<Box<[_]>>();
	if species_len.checked_mul(4) != Some(tokens.len()) { throw!(format!("{} tokens in source-terms for {species_len} species (expected name and 3 values for each)", tokens.len())) }
	let mut rates = vec![0.; mechanism.len()].into_boxed_slice();
	let mut seen = vec![false; mechanism.len()];
	for record in tokens.chunks_exact(4) {
		let [name, values @ ..] = record else { unreachable!() };
		let values = values.iter().map(|v| v.parse::<f64>().map_err(|e| format!("{name}: '{v}': {e}"))).collect::<Result<Box<_>, _>>()?;
		let Some(index) = mechanism.index(name) else {
			log::warn!("Disk.{id}: {name} is not available in the current kinetic mechanism");
			continue;
		};
		if seen[index] { log::warn!("Disk.{id}: {name} is listed more than once, keeping the last rate"); }
		seen[index] = true;
		rates[index] = values[2];
	}
	log::info!(" * Disk.{id} Species: {species_len} Slice volume: {slice_volume}");
	Sample{id, target_time: target_time.into(), slice_volume, rates}
}

#[throws(Error)] pub fn load(folder: &Path, id: u32, target_time: &str, mechanism: &dyn Mechanism) -> Sample {
	let path = folder.join(file_name(id, target_time));
	log::info!("Reading source terms for Disk.{id}");
	let source = std::fs::read_to_string(&path).map_err(|e| Error::parse(&path, e))?;
	parse(&source, id, target_time, mechanism).map_err(|e| Error::parse(&path, format!("Disk.{id}: {e}")))?
}
