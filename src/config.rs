//! Run configurations of the utilities.
//!
//! Every utility takes one of these explicitly; the binaries fill them from
//! the command line.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::io::case::TimeSelection;
use crate::overlap::filter::OverlapPolicy;

/// Inputs of the map-creation pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMapsConfig {
    /// Decomposed case of the global mesh.
    pub global_case: PathBuf,
    /// Decomposed case of the local mesh; maps are written here.
    pub local_case: PathBuf,
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

impl CreateMapsConfig {
    pub fn new(global_case: impl Into<PathBuf>, local_case: impl Into<PathBuf>) -> Self {
        Self {
            global_case: global_case.into(),
            local_case: local_case.into(),
            overlap_policy: OverlapPolicy::default(),
        }
    }

    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }
}

/// Names of the fields moved between the decompositions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// Cell-centred symmetric tensor scattered local → global.
    pub strain: String,
    /// Face-centred companion of `strain`, moved with `unstructured`.
    pub strain_faces: String,
    /// Cell-centred vector gathered global → local.
    pub displacement: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            strain: "epsilonP".into(),
            strain_faces: "epsilonPf".into(),
            displacement: "D".into(),
        }
    }
}

/// Direction of a field transfer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferDirection {
    /// Scatter local results into the global field.
    #[default]
    LocalToGlobal,
    /// Distribute the global field down to the local subdomains.
    GlobalToLocal,
}

/// Inputs of the field transfer pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferConfig {
    pub global_case: PathBuf,
    pub local_case: PathBuf,
    #[serde(default)]
    pub direction: TransferDirection,
    /// Also move the face-centred field.
    #[serde(default)]
    pub unstructured: bool,
    #[serde(default)]
    pub fields: FieldNames,
}

impl TransferConfig {
    pub fn new(global_case: impl Into<PathBuf>, local_case: impl Into<PathBuf>) -> Self {
        Self {
            global_case: global_case.into(),
            local_case: local_case.into(),
            direction: TransferDirection::default(),
            unstructured: false,
            fields: FieldNames::default(),
        }
    }

    pub fn with_direction(mut self, direction: TransferDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_unstructured(mut self, unstructured: bool) -> Self {
        self.unstructured = unstructured;
        self
    }
}

/// Inputs of the boundary orientation utility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientationConfig {
    pub case: PathBuf,
    /// Symmetric tensor field to rotate; the result is `<field>_T`.
    pub field: String,
    /// Direction boundary normals are rotated onto.
    #[serde(default = "default_reference")]
    pub reference: [f64; 3],
    #[serde(default)]
    pub times: TimeSelection,
}

fn default_reference() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}

impl OrientationConfig {
    pub fn new(case: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        Self {
            case: case.into(),
            field: field.into(),
            reference: default_reference(),
            times: TimeSelection::default(),
        }
    }
}

/// Inputs of the post-processing utility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostprocessConfig {
    pub case: PathBuf,
    /// Calculator names, e.g. `pstress`, `sigmaEq`.
    pub calculators: Vec<String>,
    #[serde(default)]
    pub times: TimeSelection,
}

impl PostprocessConfig {
    pub fn new(case: impl Into<PathBuf>, calculators: Vec<String>) -> Self {
        Self {
            case: case.into(),
            calculators,
            times: TimeSelection::default(),
        }
    }
}

/// Inputs of the case initialiser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitCaseConfig {
    /// Mesh case, or decomposed case whose subdomains are all initialised.
    pub case: PathBuf,
    /// Time directory to write into.
    #[serde(default = "default_init_time")]
    pub time: String,
    #[serde(default)]
    pub fields: FieldNames,
}

fn default_init_time() -> String {
    "0".into()
}

impl InitCaseConfig {
    pub fn new(case: impl Into<PathBuf>) -> Self {
        Self {
            case: case.into(),
            time: default_init_time(),
            fields: FieldNames::default(),
        }
    }
}
