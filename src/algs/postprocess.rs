//! Derived solid-mechanics fields.
//!
//! Each [`FieldCalculator`] reads one cell-centred symmetric-tensor field at
//! a time and writes one derived field next to it.

use itertools::Itertools;
use log::{info, warn};
use nalgebra::Vector3;

use crate::config::PostprocessConfig;
use crate::data::field::{FieldValue, VolField};
use crate::data::tensor::SymmTensor;
use crate::io::case::MeshCase;
use crate::mesh_error::MeshRemapError;
use crate::topology::poly_mesh::PolyMesh;

/// Von Mises equivalent stress `sqrt(3/2 dev σ : dev σ)`.
pub fn von_mises(sigma: &SymmTensor) -> f64 {
    let dev = sigma.dev();
    (1.5 * dev.double_dot(&dev)).sqrt()
}

/// Equivalent total strain `sqrt(2/3 dev ε : dev ε)`.
pub fn equivalent_strain(epsilon: &SymmTensor) -> f64 {
    let dev = epsilon.dev();
    (2.0 / 3.0 * dev.double_dot(&dev)).sqrt()
}

/// Equivalent plastic strain `sqrt(2/3 εp : εp)`.
pub fn equivalent_plastic_strain(epsilon_p: &SymmTensor) -> f64 {
    (2.0 / 3.0 * epsilon_p.double_dot(epsilon_p)).sqrt()
}

/// Principal values, largest first.
pub fn principal_values(t: &SymmTensor) -> Vector3<f64> {
    t.eigenvalues()
}

/// A derived field the post-processor knows how to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldCalculator {
    /// `pstress`: principal stresses of `sigma`.
    PrincipalStress,
    /// `sigmaEq`: von Mises stress of `sigma`.
    SigmaEq,
    /// `epsilonEq`: equivalent strain of `epsilon`.
    EpsilonEq,
    /// `epsilonPEq`: equivalent plastic strain of `epsilonP`.
    EpsilonPEq,
}

impl FieldCalculator {
    pub const ALL: [Self; 4] = [
        Self::PrincipalStress,
        Self::SigmaEq,
        Self::EpsilonEq,
        Self::EpsilonPEq,
    ];

    /// Name of the written field, also used to select the calculator.
    pub fn name(self) -> &'static str {
        match self {
            Self::PrincipalStress => "pstress",
            Self::SigmaEq => "sigmaEq",
            Self::EpsilonEq => "epsilonEq",
            Self::EpsilonPEq => "epsilonPEq",
        }
    }

    /// Name of the tensor field read.
    pub fn source(self) -> &'static str {
        match self {
            Self::PrincipalStress | Self::SigmaEq => "sigma",
            Self::EpsilonEq => "epsilon",
            Self::EpsilonPEq => "epsilonP",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Compute the derived field for `time` and write it.
    pub fn calc(self, case: &MeshCase, mesh: &PolyMesh, time: &str) -> Result<(), MeshRemapError> {
        let source: VolField<SymmTensor> = case.read_field_checked(mesh, time, self.source())?;
        match self {
            Self::PrincipalStress => write(case, time, self.name(), &source.map(principal_values)),
            Self::SigmaEq => write(case, time, self.name(), &source.map(von_mises)),
            Self::EpsilonEq => write(case, time, self.name(), &source.map(equivalent_strain)),
            Self::EpsilonPEq => {
                write(case, time, self.name(), &source.map(equivalent_plastic_strain))
            }
        }
    }
}

fn write<T: FieldValue>(
    case: &MeshCase,
    time: &str,
    name: &str,
    field: &VolField<T>,
) -> Result<(), MeshRemapError> {
    case.write_field(time, name, field)?;
    info!("{time}: wrote {name}");
    Ok(())
}

/// Calculators for `names`, in order. Unknown names are logged and skipped.
pub fn select_calculators<S: AsRef<str>>(names: &[S]) -> Vec<FieldCalculator> {
    names
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let calc = FieldCalculator::from_name(name);
            if calc.is_none() {
                warn!(
                    "no calculator for {name}; known: {}",
                    FieldCalculator::ALL.iter().map(|c| c.name()).join(", ")
                );
            }
            calc
        })
        .collect()
}

/// Run the post-processor; returns the number of fields written.
pub fn run_postprocess(config: &PostprocessConfig) -> Result<usize, MeshRemapError> {
    let calculators = select_calculators(&config.calculators);
    if calculators.is_empty() {
        info!("no fields to calculate");
        return Ok(0);
    }
    let case = MeshCase::new(&config.case);
    let mesh = case.read_mesh()?;
    let times = case.select_times(&config.times)?;
    info!(
        "calculating {} at {} time(s)",
        calculators.iter().map(|c| c.name()).join(", "),
        times.len()
    );

    let mut written = 0;
    for time in &times {
        info!("time = {time}");
        for calc in &calculators {
            calc.calc(&case, &mesh, time)?;
            written += 1;
        }
    }
    Ok(written)
}
