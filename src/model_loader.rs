use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, info};
use ultraviolet::DVec3;

use crate::{error::RenderError, materials::MaterialId, render_objects::MeshRenderObject};

/// Load a Wavefront OBJ file as a mesh. The model is centred and scaled to
/// fit a [-1, 1] cube, then scaled by `scale` and moved to `position`.
pub fn model_loader(
    path: &Path,
    mat: MaterialId,
    position: DVec3,
    scale: f64,
) -> Result<MeshRenderObject, RenderError> {
    info!("Loading model \"{}\"", path.display());
    let file = File::open(path).map_err(|source| RenderError::ModelIo {
        path: path.to_path_buf(),
        source,
    })?;

    read_model(BufReader::new(file), mat, position, scale).map_err(|err| match err {
        RenderError::ModelIo { source, .. } => RenderError::ModelIo {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Same as [`model_loader`] but reading from any buffered source.
pub fn read_model(
    reader: impl BufRead,
    mat: MaterialId,
    position: DVec3,
    scale: f64,
) -> Result<MeshRenderObject, RenderError> {
    let mut verts: Vec<DVec3> = Vec::new();
    let mut faces: Vec<[usize; 3]> = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| RenderError::ModelIo {
            path: Default::default(),
            source,
        })?;
        let line_number = number + 1;
        let mut line_iter = line.split_ascii_whitespace();

        match line_iter.next() {
            Some("v") => {
                let mut coord = || -> Result<f64, RenderError> {
                    let token = line_iter
                        .next()
                        .ok_or_else(|| parse_error(line_number, "vertex needs three coordinates"))?;
                    token
                        .parse::<f64>()
                        .map_err(|_| parse_error(line_number, &format!("bad coordinate \"{token}\"")))
                };
                let (x, y, z) = (coord()?, coord()?, coord()?);
                verts.push(DVec3::new(x, y, z));
            }
            Some("f") => {
                let indices = line_iter
                    .map(|token| face_index(token, verts.len(), line_number))
                    .collect::<Result<Vec<usize>, RenderError>>()?;
                if indices.len() < 3 {
                    return Err(parse_error(line_number, "face needs at least three vertices"));
                }
                // Polygons are split into a triangle fan around the first vertex.
                for window in 1..indices.len() - 1 {
                    faces.push([indices[0], indices[window], indices[window + 1]]);
                }
            }
            _ => {}
        }
    }

    debug!("\tvertices: {}, triangles: {}", verts.len(), faces.len());
    unitize(&mut verts);

    let mut mesh = MeshRenderObject::new(mat);
    mesh.tris.reserve(faces.len());
    for [a, b, c] in faces {
        mesh.push(
            verts[a] * scale + position,
            verts[b] * scale + position,
            verts[c] * scale + position,
        );
    }
    Ok(mesh)
}

fn parse_error(line: usize, message: &str) -> RenderError {
    RenderError::ModelParse {
        line,
        message: message.to_string(),
    }
}

/// Resolve a face token (`7`, `7/1`, `7//3`, `-1`) to a zero based vertex index.
fn face_index(token: &str, vertex_count: usize, line: usize) -> Result<usize, RenderError> {
    let raw = token.split('/').next().unwrap_or(token);
    let index: i64 = raw
        .parse()
        .map_err(|_| parse_error(line, &format!("bad face index \"{token}\"")))?;

    let resolved = if index < 0 {
        vertex_count as i64 + index
    } else {
        index - 1
    };
    if resolved < 0 || resolved >= vertex_count as i64 {
        return Err(parse_error(line, &format!("face index {index} out of range")));
    }
    Ok(resolved as usize)
}

/// Centre the vertices on the origin and fit them inside a [-1, 1] cube.
fn unitize(verts: &mut [DVec3]) {
    let Some(first) = verts.first().copied() else {
        return;
    };

    let (min, max) = verts.iter().fold((first, first), |(min, max), v| {
        (min.min_by_component(*v), max.max_by_component(*v))
    });

    let center = (min + max) * 0.5;
    let extent = max - min;
    let largest = extent.x.max(extent.y).max(extent.z);
    let factor = if largest > 0.0 { 2.0 / largest } else { 1.0 };

    for v in verts.iter_mut() {
        *v = (*v - center) * factor;
    }
}
