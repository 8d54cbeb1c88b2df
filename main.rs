#![allow(non_upper_case_globals)]
use {anyhow::{Error, Context as _}, std::{env::args, path::PathBuf}, disks::*};
#[fehler::throws] fn main() {
	color_backtrace::install();
	pretty_env_logger::formatted_builder().filter_level(log::LevelFilter::Info).parse_default_env().init();
	const usage: &str = "preprocess <case> <mechanism.yaml> [time]";
	let mut args = args().skip(1);
	let case = PathBuf::from(args.next().context(usage)?);
	let mechanism = PathBuf::from(args.next().context(usage)?);
	let time = args.next().unwrap_or_else(|| "0".into());
	let options = Options::load(&case.join("system").join("solverOptions.yaml"))?;
	let mechanism = Species::load(&mechanism)?;
	let mut mesh = Case::open(&case, &time)?;
	let mut gate = Gate::default();
	match gate.run(&mut Context{mechanism: &mechanism, mesh: &mut mesh, options: &options, case: &case})? {
		Outcome::Disabled => log::info!("Disk source terms are off, nothing to do"),
		Outcome::Preprocessed(_) => log::info!("Preprocessing complete: rerun with preProcess off to start the simulation"),
		Outcome::Loaded(fields) => {
			use itertools::Itertools;
			let sources = fields.iter().filter_map(|(species, values)| {
				let (min, max) = values.iter().filter(|&&v| v != 0.).fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| (min.min(v), max.max(v)));
				(min <= max).then(|| format!("{species}: [{min:.3e}, {max:.3e}]"))
			});
			println!("{}", sources.format("\n"));
		}
	}
}
