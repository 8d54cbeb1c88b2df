//! Cells and volume of each disk in the target mesh
use {fehler::{throws, throw}, std::{path::Path, str::FromStr}, crate::{Error, xml}};

pub const file_name: &str = "DiskTopology.xml";

#[derive(Debug, Clone, PartialEq)] pub struct Topology {
	pub id: u32,
	/// Global mesh cell indices
	pub cells: Box<[usize]>,
	/// Volume of the disk region in the mesh (m³)
	pub volume: f64,
}

fn number<T: FromStr>(element: Option<&xml::Element>, name: &str) -> Result<T, String> where T::Err: std::fmt::Display {
	let text = element.and_then(|e| e.child(name)).ok_or_else(|| format!("Missing {name}"))?.text();
	text.parse().map_err(|e| format!("{name} '{text}': {e}"))
}

#[throws(String)] fn disk(root: &xml::Element, id: u32) -> Topology {
	let name = format!("Disk.{id}");
	let disk = root.child(&name).ok_or_else(|| format!("Missing {name}"))?;
	let in_disk = |e: String| format!("{name}: {e}");
	let points: usize = number(Some(disk), "NumberOfPoints").map_err(in_disk)?;
	let volume: f64 = number(Some(disk), "Volume").map_err(in_disk)?;
	if !(volume > 0. && volume.is_finite()) { throw!(in_disk(format!("Volume {volume} is not strictly positive"))) }
	let pairs = disk.child("Cells").ok_or_else(|| in_disk("Missing Cells".into()))?.text().split_whitespace().collect::<Box<[_]>>();
	if points.checked_mul(2) != Some(pairs.len()) { throw!(in_disk(format!("{} values in Cells for {points} points (expected cell, weight pairs)", pairs.len()))) }
	let cells = pairs.chunks_exact(2).map(|pair| {
		let [cell, weight] = [pair[0], pair[1]];
		weight.parse::<f64>().map_err(|e| in_disk(format!("weight '{weight}': {e}")))?;
		cell.parse::<usize>().map_err(|e| in_disk(format!("cell '{cell}': {e}")))
	}).collect::<Result<Box<_>, _>>()?;
	log::info!(" * Disk.{id} Cells: {points} Volume: {volume}");
	Topology{id, cells, volume}
}

/// Topology of each requested disk, in request order
#[throws(String)] pub fn parse(source: &str, disks: &[u32]) -> Box<[Topology]> {
	let root = xml::parse(source)?;
	if root.name != "opensmoke" { throw!(format!("Root element is <{}> (expected <opensmoke>)", root.name)) }
	let count: usize = number(Some(&root), "Disks").map_err(|e| format!("Wrong number of disks: {e}"))?;
	if count < disks.len() { log::warn!("{file_name} declares {count} disks but {} are requested", disks.len()); }
	disks.iter().map(|&id| disk(&root, id)).collect::<Result<_, _>>()?
}

#[throws(Error)] pub fn load(folder: &Path, disks: &[u32]) -> Box<[Topology]> {
	let path = folder.join(file_name);
	let source = std::fs::read_to_string(&path).map_err(|e| Error::parse(&path, e))?;
	log::info!("Reading topology for disks {}", itertools::Itertools::format(disks.iter(), ", "));
	parse(&source, disks).map_err(|e| Error::parse(&path, e))?
}
