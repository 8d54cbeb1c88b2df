use crate::{Sample, Topology};

/// Rescales slice integrated rates into volumetric rates of the disk
#[derive(Debug, Clone, Copy, PartialEq)] pub struct Correction {
	pub coefficient: f64,
	pub exclude_negative: bool,
}

impl Correction {
	/// kg/m³/s
	pub fn rate(&self, raw: f64, slice_volume: f64, volume: f64) -> f64 {
		debug_assert!(volume > 0.);
		let rate = self.coefficient * raw * slice_volume / volume;
		if self.exclude_negative && rate < 0. { 0. } else { rate }
	}
	pub fn apply(&self, sample: &Sample, topology: &Topology) -> Box<[f64]> {
		debug_assert_eq!(sample.id, topology.id);
		sample.rates.iter().map(|&raw| self.rate(raw, sample.slice_volume, topology.volume)).collect()
	}
}

#[cfg(test)] mod test {
	use super::*;
	#[test] fn scale() {
		let correction = Correction{coefficient: 1.3, exclude_negative: false};
		let [R, S, V] = [-7.25, 0.03, 0.4];
		assert!(f64::abs(correction.rate(R, S, V) - 1.3*R*S/V) < 1e-15);
		assert_eq!(Correction{coefficient: 1., exclude_negative: false}.rate(-10., 0.5, 2.), -2.5);
	}
	#[test] fn exclude_negative() {
		let correction = Correction{coefficient: 1., exclude_negative: true};
		assert_eq!(correction.rate(-10., 0.5, 2.), 0.);
		assert_eq!(correction.rate(10., 0.5, 2.), 2.5);
		let sample = Sample{id: 1, target_time: "0".into(), slice_volume: 2., rates: [-1., 0., 3.].into()};
		let topology = Topology{id: 1, cells: [0].into(), volume: 4.};
		assert_eq!(&*correction.apply(&sample, &topology), [0., 0., 1.5]);
		assert_eq!(&*Correction{exclude_negative: false, ..correction}.apply(&sample, &topology), [-0.5, 0., 1.5]);
	}
}
