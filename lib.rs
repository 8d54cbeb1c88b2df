#![allow(non_upper_case_globals,non_snake_case)]
//! Chemical source terms of actuator disks, mapped onto the cells of a reacting flow mesh
pub mod error; pub use error::Error;
pub mod xml;
pub mod mechanism; pub use mechanism::{Mechanism, Species};
pub mod mesh; pub use mesh::{Mesh, Field, Memory, Case};
pub mod options; pub use options::{Options, DiskSourceTerms, Switch, Overlap};
pub mod topology; pub use topology::Topology;
pub mod source; pub use source::Sample;
pub mod correction; pub use correction::Correction;
mod scatter; pub use scatter::scatter;
pub mod gate; pub use gate::{Context, Gate, Outcome, SourceFields, field_name};
