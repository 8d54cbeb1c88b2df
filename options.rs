//! Solver options read once at startup
use {fehler::{throws, throw}, serde::{Deserialize, Deserializer, de}, std::path::{Path, PathBuf}, crate::Error};

/// Boolean accepting the usual dictionary words (`on`, `off`, `yes`, `no`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)] pub struct Switch(pub bool);

impl std::str::FromStr for Switch {
	type Err = String;
	fn from_str(word: &str) -> Result<Self, String> {
		match word {
			"on"|"yes"|"y"|"true"|"t" => Ok(Switch(true)),
			"off"|"no"|"n"|"false"|"f"|"none" => Ok(Switch(false)),
			word => Err(format!("'{word}' is not a switch")),
		}
	}
}

impl<'de> Deserialize<'de> for Switch {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct Visitor;
		impl<'de> de::Visitor<'de> for Visitor {
			type Value = Switch;
			fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result { f.write_str("a switch (on/off, yes/no, true/false)") }
			fn visit_bool<E: de::Error>(self, v: bool) -> Result<Switch, E> { Ok(Switch(v)) }
			fn visit_str<E: de::Error>(self, v: &str) -> Result<Switch, E> { v.parse().map_err(E::custom) }
		}
		deserializer.deserialize_any(Visitor)
	}
}

impl From<Switch> for bool { fn from(Switch(v): Switch) -> bool { v } }

/// Time directory name, taken verbatim from the scalar text (`1.0` stays `1.0`)
#[derive(Debug, Clone, PartialEq, Eq)] pub struct Label(pub String);

impl<'de> Deserialize<'de> for Label {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct Visitor;
		impl<'de> de::Visitor<'de> for Visitor {
			type Value = Label;
			fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result { f.write_str("a time label") }
			fn visit_str<E: de::Error>(self, v: &str) -> Result<Label, E> { Ok(Label(v.into())) }
			fn visit_u64<E: de::Error>(self, v: u64) -> Result<Label, E> { Ok(Label(v.to_string())) }
			fn visit_i64<E: de::Error>(self, v: i64) -> Result<Label, E> { Ok(Label(v.to_string())) }
		}
		deserializer.deserialize_str(Visitor)
	}
}

impl std::fmt::Display for Label { fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result { f.write_str(&self.0) } }

/// Policy for cells claimed by several disks
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)] #[serde(rename_all="lowercase")] pub enum Overlap {
	/// Last disk in configuration order wins
	#[default] Overwrite,
	Accumulate,
}

fn on() -> Switch { Switch(true) }

#[derive(Deserialize, Debug, Clone)] #[serde(rename_all="camelCase", deny_unknown_fields)] pub struct DiskSourceTerms {
	pub folder: PathBuf,
	pub disks: Box<[u32]>,
	pub target_time: Label,
	pub correction_coefficient: f64,
	#[serde(default)] pub exclude_negative_source_terms: Switch,
	#[serde(default="on")] pub pre_process: Switch,
	#[serde(default)] pub overlap: Overlap,
}

#[derive(Deserialize, Debug, Clone, Default)] #[serde(rename_all="camelCase")] pub struct PhysicalModel {
	#[serde(default)] pub disk_source_terms: Switch,
}

#[derive(Deserialize, Debug, Clone, Default)] pub struct Options {
	#[serde(rename="PhysicalModel", default)] pub physical_model: PhysicalModel,
	#[serde(rename="DiskSourceTerms")] pub disk_source_terms: Option<DiskSourceTerms>,
}

impl DiskSourceTerms {
	#[throws(Error)] fn validate(&self) {
		if self.disks.is_empty() { throw!(Error::Config("DiskSourceTerms: empty disks list".into())) }
		if let Some(id) = self.disks.iter().enumerate().find_map(|(i, id)| self.disks[..i].contains(id).then_some(id)) {
			throw!(Error::Config(format!("DiskSourceTerms: disk {id} is listed twice")))
		}
		if self.target_time.0.trim().is_empty() { throw!(Error::Config("DiskSourceTerms: empty targetTime".into())) }
		if !self.correction_coefficient.is_finite() { throw!(Error::Config(format!("DiskSourceTerms: correctionCoefficient {} is not finite", self.correction_coefficient))) }
	}
}

impl Options {
	#[throws(Error)] pub fn parse(yaml: &str) -> Self {
		let options: Options = serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
		if options.physical_model.disk_source_terms.0 {
			options.disk_source_terms.as_ref().ok_or_else(|| Error::Config("diskSourceTerms is on but the DiskSourceTerms section is missing".into()))?.validate()?;
		}
		options
	}
	#[throws(Error)] pub fn load(path: &Path) -> Self {
		let yaml = std::fs::read_to_string(path).map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
		Self::parse(&yaml).map_err(|e| match e { Error::Config(message) => Error::Config(format!("{}: {message}", path.display())), e => e })?
	}
	/// Disk source terms settings when enabled
	pub fn disks(&self) -> Option<&DiskSourceTerms> { if self.physical_model.disk_source_terms.0 { self.disk_source_terms.as_ref() } else { None } }
}

#[cfg(test)] mod test {
	use super::*;
	#[test] fn defaults() {
		let options = Options::parse("PhysicalModel: {diskSourceTerms: on}\nDiskSourceTerms:\n  folder: disks\n  disks: [0, 3]\n  targetTime: '0.25'\n  correctionCoefficient: 1.5\n").unwrap();
		let disks = options.disks().unwrap();
		assert_eq!(&*disks.disks, [0, 3]);
		assert_eq!(disks.target_time.0, "0.25");
		assert_eq!(disks.exclude_negative_source_terms, Switch(false));
		assert_eq!(disks.pre_process, Switch(true));
		assert_eq!(disks.overlap, Overlap::Overwrite);
	}
	#[test] fn switches() {
		for (word, value) in [("on", true), ("off", false), ("yes", true), ("no", false), ("true", true), ("false", false), ("none", false)] {
			let options = Options::parse(&format!("PhysicalModel: {{diskSourceTerms: {word}}}\nDiskSourceTerms: {{folder: d, disks: [1], targetTime: 1, correctionCoefficient: 1}}")).unwrap();
			assert_eq!(options.disks().is_some(), value, "{word}");
		}
		assert!(matches!(Options::parse("PhysicalModel: {diskSourceTerms: maybe}"), Err(Error::Config(_))));
	}
	#[test] fn disabled() {
		let options = Options::parse("PhysicalModel: {}").unwrap();
		assert!(options.disks().is_none());
	}
	#[test] fn numeric_label() {
		let options = Options::parse("PhysicalModel: {diskSourceTerms: on}\nDiskSourceTerms: {folder: d, disks: [1], targetTime: 0.5, correctionCoefficient: 1, excludeNegativeSourceTerms: yes, preProcess: off, overlap: accumulate}").unwrap();
		let disks = options.disks().unwrap();
		assert_eq!(disks.target_time.to_string(), "0.5");
		assert!(bool::from(disks.exclude_negative_source_terms));
		assert!(!bool::from(disks.pre_process));
		assert_eq!(disks.overlap, Overlap::Accumulate);
	}
	#[test] fn verbatim_label() {
		for label in ["1.0", "0.250", "1", "1e-3"] {
			let options = Options::parse(&format!("PhysicalModel: {{diskSourceTerms: on}}\nDiskSourceTerms: {{folder: d, disks: [1], targetTime: {label}, correctionCoefficient: 1}}")).unwrap();
			assert_eq!(options.disks().unwrap().target_time.0, label);
		}
	}
	#[test] fn invalid() {
		let parse = |section: &str| Options::parse(&format!("PhysicalModel: {{diskSourceTerms: on}}\n{section}"));
		assert!(matches!(parse(""), Err(Error::Config(_))));
		assert!(matches!(parse("DiskSourceTerms: {folder: d, disks: [1], targetTime: 1}"), Err(Error::Config(_))));
		assert!(matches!(parse("DiskSourceTerms: {folder: d, disks: [], targetTime: 1, correctionCoefficient: 1}"), Err(Error::Config(_))));
		assert!(matches!(parse("DiskSourceTerms: {folder: d, disks: [1, 1], targetTime: 1, correctionCoefficient: 1}"), Err(Error::Config(_))));
		assert!(matches!(parse("DiskSourceTerms: {folder: d, disks: [-1], targetTime: 1, correctionCoefficient: 1}"), Err(Error::Config(_))));
		assert!(matches!(parse("DiskSourceTerms: {folder: d, disks: [1], targetTime: 1, correctionCoefficient: .nan}"), Err(Error::Config(_))));
		assert!(matches!(parse("DiskSourceTerms: {folder: d, disks: [1], targetTime: 1, correctionCoefficient: 1, overlap: sum}"), Err(Error::Config(_))));
	}
}
