//! Directory layout of mesh cases and decomposed cases.
//!
//! ```text
//! <case>/system/decomposeParDict
//! <case>/processor<N>/constant/polyMesh/{mesh.json, cellProcAddressing, faceProcAddressing, cellMap, faceMap}
//! <case>/processor<N>/constant/polyMesh/maps/procGlobalCaseList
//! <case>/processor<N>/constant/polyMesh/maps/processor<G>/{faceMap, cellMap}
//! <case>/processor<N>/<time>/<field>
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algs::distribute::DecomposedPiece;
use crate::data::field::{FieldLocation, FieldValue, GeometricField};
use crate::io::dictionary::{read_number_of_subdomains, write_decompose_par_dict};
use crate::io::field_io::{read_field, read_field_class, write_field};
use crate::io::foam_list::{read_label_list, write_label_list};
use crate::mesh_error::MeshRemapError;
use crate::topology::addressing::{Label, ProcAddressing};
use crate::topology::decomposition_map::{DecompositionMap, PairMaps};
use crate::topology::poly_mesh::PolyMesh;

pub const POLY_MESH_DIR: &str = "constant/polyMesh";
pub const MESH_FILE: &str = "mesh.json";
pub const CELL_PROC_ADDRESSING: &str = "cellProcAddressing";
pub const FACE_PROC_ADDRESSING: &str = "faceProcAddressing";
pub const CELL_MAP: &str = "cellMap";
pub const FACE_MAP: &str = "faceMap";
pub const MAPS_DIR: &str = "maps";
pub const MEMBERSHIP_LIST: &str = "procGlobalCaseList";

/// Directory name of subdomain `n`.
pub fn processor_dir_name(n: usize) -> String {
    format!("processor{n}")
}

/// Which time directories a utility processes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSelection {
    #[default]
    All,
    Latest,
    Named(String),
}

/// One mesh case: a polyMesh plus time directories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshCase {
    root: PathBuf,
}

impl MeshCase {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn poly_mesh_dir(&self) -> PathBuf {
        self.root.join(POLY_MESH_DIR)
    }

    pub fn maps_dir(&self) -> PathBuf {
        self.poly_mesh_dir().join(MAPS_DIR)
    }

    /// Directory holding the maps towards global subdomain `global`.
    pub fn pair_maps_dir(&self, global: usize) -> PathBuf {
        self.maps_dir().join(processor_dir_name(global))
    }

    pub fn membership_path(&self) -> PathBuf {
        self.maps_dir().join(MEMBERSHIP_LIST)
    }

    pub fn field_path(&self, time: &str, name: &str) -> PathBuf {
        self.root.join(time).join(name)
    }

    /// Time directory names, sorted by numeric value.
    pub fn times(&self) -> Result<Vec<String>, MeshRemapError> {
        let entries = fs::read_dir(&self.root).map_err(|e| MeshRemapError::io(&self.root, e))?;
        let mut times: Vec<(f64, String)> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MeshRemapError::io(&self.root, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Ok(value) = name.parse::<f64>() {
                if value.is_finite() {
                    times.push((value, name));
                }
            }
        }
        times.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(times.into_iter().map(|(_, name)| name).collect())
    }

    pub fn latest_time(&self) -> Result<String, MeshRemapError> {
        self.times()?
            .pop()
            .ok_or_else(|| MeshRemapError::NoTimeDirectories(self.root.clone()))
    }

    /// Resolve a [`TimeSelection`] against the directories on disk.
    pub fn select_times(&self, selection: &TimeSelection) -> Result<Vec<String>, MeshRemapError> {
        match selection {
            TimeSelection::All => {
                let times = self.times()?;
                if times.is_empty() {
                    return Err(MeshRemapError::NoTimeDirectories(self.root.clone()));
                }
                Ok(times)
            }
            TimeSelection::Latest => Ok(vec![self.latest_time()?]),
            TimeSelection::Named(time) => {
                if self.root.join(time).is_dir() {
                    Ok(vec![time.clone()])
                } else {
                    Err(MeshRemapError::UnknownTime {
                        case: self.root.clone(),
                        time: time.clone(),
                    })
                }
            }
        }
    }

    pub fn read_mesh(&self) -> Result<PolyMesh, MeshRemapError> {
        let path = self.poly_mesh_dir().join(MESH_FILE);
        let bytes = fs::read(&path).map_err(|e| MeshRemapError::io(&path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            MeshRemapError::MeshIoParse(format!("{}: {e}", path.display()))
        })
    }

    pub fn write_mesh(&self, mesh: &PolyMesh) -> Result<(), MeshRemapError> {
        let dir = self.poly_mesh_dir();
        fs::create_dir_all(&dir).map_err(|e| MeshRemapError::io(&dir, e))?;
        let path = dir.join(MESH_FILE);
        let bytes = serde_json::to_vec(mesh.parts())
            .map_err(|e| MeshRemapError::MeshIoParse(e.to_string()))?;
        fs::write(&path, bytes).map_err(|e| MeshRemapError::io(&path, e))
    }

    /// Cell partition addressing; negative entries are rejected.
    pub fn read_cell_addressing(&self) -> Result<ProcAddressing, MeshRemapError> {
        let raw = read_label_list(self.poly_mesh_dir().join(CELL_PROC_ADDRESSING))?;
        ProcAddressing::from_cells(&raw)
    }

    /// Face partition addressing with the flip sign stripped.
    pub fn read_face_addressing(&self) -> Result<ProcAddressing, MeshRemapError> {
        let raw = read_label_list(self.poly_mesh_dir().join(FACE_PROC_ADDRESSING))?;
        Ok(ProcAddressing::from_faces(raw))
    }

    pub fn write_addressing(&self, cells: &[Label], faces: &[Label]) -> Result<(), MeshRemapError> {
        let dir = self.poly_mesh_dir();
        write_label_list(dir.join(CELL_PROC_ADDRESSING), cells)?;
        write_label_list(dir.join(FACE_PROC_ADDRESSING), faces)
    }

    /// Maps from this subdomain's entities into the reconstructed whole
    /// mesh of its own decomposition (`cellMap`, `faceMap`).
    pub fn read_reconstruction_maps(&self) -> Result<PairMaps, MeshRemapError> {
        let dir = self.poly_mesh_dir();
        Ok(PairMaps {
            cell_map: read_label_list(dir.join(CELL_MAP))?.into(),
            face_map: read_label_list(dir.join(FACE_MAP))?.into(),
        })
    }

    pub fn write_reconstruction_maps(&self, maps: &PairMaps) -> Result<(), MeshRemapError> {
        let dir = self.poly_mesh_dir();
        write_label_list(dir.join(CELL_MAP), maps.cell_map.as_slice())?;
        write_label_list(dir.join(FACE_MAP), maps.face_map.as_slice())
    }

    pub fn write_pair_maps(&self, global: usize, maps: &PairMaps) -> Result<(), MeshRemapError> {
        let dir = self.pair_maps_dir(global);
        write_label_list(dir.join(FACE_MAP), maps.face_map.as_slice())?;
        write_label_list(dir.join(CELL_MAP), maps.cell_map.as_slice())
    }

    pub fn read_pair_maps(&self, global: usize) -> Result<PairMaps, MeshRemapError> {
        let dir = self.pair_maps_dir(global);
        Ok(PairMaps {
            face_map: DecompositionMap::from(read_label_list(dir.join(FACE_MAP))?),
            cell_map: DecompositionMap::from(read_label_list(dir.join(CELL_MAP))?),
        })
    }

    /// Write the list of global subdomains this subdomain has maps for.
    pub fn write_membership(&self, globals: &[usize]) -> Result<(), MeshRemapError> {
        let values: Vec<Label> = globals.iter().map(|&g| g as Label).collect();
        write_label_list(self.membership_path(), &values)
    }

    pub fn read_membership(&self) -> Result<Vec<Label>, MeshRemapError> {
        read_label_list(self.membership_path())
    }

    pub fn has_field(&self, time: &str, name: &str) -> bool {
        self.field_path(time, name).is_file()
    }

    pub fn field_class(&self, time: &str, name: &str) -> Result<String, MeshRemapError> {
        read_field_class(self.field_path(time, name))
    }

    pub fn read_field<T: FieldValue, L: FieldLocation>(
        &self,
        time: &str,
        name: &str,
    ) -> Result<GeometricField<T, L>, MeshRemapError> {
        read_field(self.field_path(time, name))
    }

    /// Read a field and check its shape against `mesh`.
    pub fn read_field_checked<T: FieldValue, L: FieldLocation>(
        &self,
        mesh: &PolyMesh,
        time: &str,
        name: &str,
    ) -> Result<GeometricField<T, L>, MeshRemapError> {
        let field: GeometricField<T, L> = self.read_field(time, name)?;
        field.check_against(mesh, name)?;
        Ok(field)
    }

    pub fn write_field<T: FieldValue, L: FieldLocation>(
        &self,
        time: &str,
        name: &str,
        field: &GeometricField<T, L>,
    ) -> Result<(), MeshRemapError> {
        write_field(self.field_path(time, name), field)
    }
}

/// A case split into `processor<N>` subdomains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecomposedCase {
    root: PathBuf,
    n_subdomains: usize,
}

impl DecomposedCase {
    /// Open a decomposed case, reading its subdomain count.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, MeshRemapError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(MeshRemapError::MissingFile(root));
        }
        let n_subdomains = read_number_of_subdomains(&root)?;
        debug!("{}: {n_subdomains} subdomains", root.display());
        Ok(Self { root, n_subdomains })
    }

    /// Write `pieces` as a decomposed case: dictionary, meshes, partition
    /// addressing and identity reconstruction maps.
    pub fn create(
        root: impl Into<PathBuf>,
        pieces: &[DecomposedPiece],
    ) -> Result<Self, MeshRemapError> {
        let root = root.into();
        write_decompose_par_dict(&root, pieces.len())?;
        let case = Self {
            root,
            n_subdomains: pieces.len(),
        };
        for (n, piece) in pieces.iter().enumerate() {
            let sub = case.subdomain(n);
            sub.write_mesh(&piece.mesh)?;
            sub.write_addressing(&piece.cell_addressing, &piece.face_addressing)?;
            sub.write_reconstruction_maps(&PairMaps {
                cell_map: DecompositionMap::identity(piece.mesh.n_cells()),
                face_map: DecompositionMap::identity(piece.mesh.n_faces()),
            })?;
        }
        Ok(case)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn n_subdomains(&self) -> usize {
        self.n_subdomains
    }

    pub fn subdomain(&self, n: usize) -> MeshCase {
        MeshCase::new(self.root.join(processor_dir_name(n)))
    }

    pub fn subdomains(&self) -> impl Iterator<Item = (usize, MeshCase)> + '_ {
        (0..self.n_subdomains).map(|n| (n, self.subdomain(n)))
    }
}
