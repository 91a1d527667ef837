//! Wheel decomposition
//!
//! The rider model ships both wheels baked into single meshes (spokes, rims,
//! tyres). To spin them independently each mesh is split once at import time:
//! triangles whose centroid lies past the mesh's x-midpoint form the front
//! wheel, the rest the back wheel. Each half gets the pivot it should rotate
//! about. None of this runs per frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a wheel mesh could not be split
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshSplitError {
    #[error("position buffer length {0} is not a multiple of 3")]
    RaggedPositions(usize),
    #[error("mesh has no triangles")]
    NoTriangles,
    #[error("index {index} is out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
    #[error("split failed: the {0} side has no triangles")]
    EmptySide(&'static str),
}

/// One half of a split wheel mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelHalf {
    /// Triangles as indices into the source vertex buffer
    pub triangles: Vec<[u32; 3]>,
    /// Mean of the half's triangle vertices; the rotation pivot
    pub center: Vec3,
}

/// Front and back halves of a wheel mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSplit {
    pub front: WheelHalf,
    pub back: WheelHalf,
}

/// Split a flat `[x, y, z, x, y, z, ...]` position buffer.
///
/// `indices` are triangle indices; when absent every three consecutive
/// vertices form a triangle.
pub fn split_wheel_mesh(positions: &[f32], indices: Option<&[u32]>) -> Result<WheelSplit, MeshSplitError> {
    if positions.len() % 3 != 0 {
        return Err(MeshSplitError::RaggedPositions(positions.len()));
    }
    let vertices: Vec<Vec3> = positions.chunks_exact(3).map(Vec3::from_slice).collect();

    let triangles: Vec<[u32; 3]> = match indices {
        Some(indices) => {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(MeshSplitError::IndexOutOfRange {
                    index,
                    vertices: vertices.len(),
                });
            }
            indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect()
        }
        None => (0..(vertices.len() / 3) as u32)
            .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
            .collect(),
    };
    if triangles.is_empty() {
        return Err(MeshSplitError::NoTriangles);
    }

    let (min_x, max_x) = vertices
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v.x), hi.max(v.x)));
    let mid_x = (min_x + max_x) / 2.0;

    let (front, back): (Vec<[u32; 3]>, Vec<[u32; 3]>) = triangles
        .into_iter()
        .partition(|tri| centroid(&vertices, tri).x > mid_x);

    if front.is_empty() {
        return Err(MeshSplitError::EmptySide("front"));
    }
    if back.is_empty() {
        return Err(MeshSplitError::EmptySide("back"));
    }

    Ok(WheelSplit {
        front: half(&vertices, front),
        back: half(&vertices, back),
    })
}

fn centroid(vertices: &[Vec3], tri: &[u32; 3]) -> Vec3 {
    tri.iter().map(|&i| vertices[i as usize]).sum::<Vec3>() / 3.0
}

fn half(vertices: &[Vec3], triangles: Vec<[u32; 3]>) -> WheelHalf {
    // Every triangle contributes three vertices, so the mean of the centroids
    // equals the mean over all triangle vertices
    let center = triangles.iter().map(|t| centroid(vertices, t)).sum::<Vec3>() / triangles.len() as f32;
    WheelHalf { triangles, center }
}
