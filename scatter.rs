use {fehler::{throws, throw}, crate::{Error, Topology, options::Overlap}};

/// Writes each disk corrected rates into the cells of the disk, one field per species.
/// Disks are processed in the given order, which decides shared cells.
#[throws(Error)] pub fn scatter(species_len: usize, disks: &[(&Topology, &[f64])], cells_len: usize, overlap: Overlap) -> Box<[Box<[f64]>]> {
	let mut fields = vec![vec![0.; cells_len].into_boxed_slice(); species_len];
	let mut owner: Vec<Option<u32>> = vec![None; cells_len];
	for &(topology, rates) in disks {
		debug_assert_eq!(rates.len(), species_len);
		let id = topology.id;
		if let Some(&cell) = topology.cells.iter().find(|&&cell| cell >= cells_len) { throw!(Error::Bounds{disk: id, cell, cells: cells_len}) }
		let mut shared = 0;
		for &cell in topology.cells.iter() {
			match owner[cell].replace(id) {
				Some(previous) if previous == id => continue,
				Some(_) => shared += 1,
				None => {},
			}
			for (field, &rate) in fields.iter_mut().zip(rates.iter()) {
				match overlap {
					Overlap::Overwrite => field[cell] = rate,
					Overlap::Accumulate => field[cell] += rate,
				}
			}
		}
		if shared > 0 { log::warn!("Disk.{id}: {shared} cells are shared with previous disks ({overlap:?})"); }
	}
	fields.into_boxed_slice()
}

#[cfg(test)] mod test {
	use super::*;
	fn disk(id: u32, cells: &[usize]) -> Topology { Topology{id, cells: cells.into(), volume: 1.} }
	#[test] fn untouched_cells() {
		let fields = scatter(2, &[(&disk(0, &[3, 7]), &[-2.5, 1.][..])], 10, Overlap::Overwrite).unwrap();
		assert_eq!(fields.len(), 2);
		for (cell, (&a, &b)) in fields[0].iter().zip(fields[1].iter()).enumerate() {
			if cell == 3 || cell == 7 { assert_eq!((a, b), (-2.5, 1.)) } else { assert_eq!((a, b), (0., 0.)) }
		}
	}
	#[test] fn last_writer_wins() {
		let fields = scatter(1, &[(&disk(0, &[8, 9]), &[1.][..]), (&disk(1, &[9, 10]), &[4.][..])], 12, Overlap::Overwrite).unwrap();
		assert_eq!(&fields[0][8..=10], [1., 4., 4.]);
		let fields = scatter(1, &[(&disk(1, &[9, 10]), &[4.][..]), (&disk(0, &[8, 9]), &[1.][..])], 12, Overlap::Overwrite).unwrap();
		assert_eq!(&fields[0][8..=10], [1., 1., 4.]);
	}
	#[test] fn accumulate() {
		let fields = scatter(1, &[(&disk(0, &[9, 9]), &[1.][..]), (&disk(1, &[9]), &[4.][..])], 12, Overlap::Accumulate).unwrap();
		assert_eq!(fields[0][9], 5.);
	}
	#[test] fn bounds() {
		let error = scatter(1, &[(&disk(2, &[0, 12]), &[1.][..])], 12, Overlap::Overwrite).unwrap_err();
		assert!(matches!(error, Error::Bounds{disk: 2, cell: 12, cells: 12}));
	}
}
