// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use tracing::{debug, warn};

use crate::{
    error::{HoleEditError, HoleEditResult},
    geometry::Point3,
    mesh::basic_types::{Mesh, VertexId},
    numeric::scalar::Scalar,
};

pub fn write_obj<T: Scalar, P: AsRef<Path>>(mesh: &Mesh<T>, path: P) -> HoleEditResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| HoleEditError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_obj_to(mesh, &mut out).map_err(|e| HoleEditError::io(path, e))
}

/// Vertices, then live faces with 1-based indices.
pub fn write_obj_to<T: Scalar, W: Write>(mesh: &Mesh<T>, out: &mut W) -> std::io::Result<()> {
    for v in &mesh.vertices {
        let [x, y, z] = v.position.coords();
        writeln!(out, "v {:?} {:?} {:?}", x.as_f64(), y.as_f64(), z.as_f64())?;
    }
    for face in mesh.faces.iter().filter(|f| !f.removed) {
        let vs = face.vertices;
        writeln!(out, "f {} {} {}", vs[0] + 1, vs[1] + 1, vs[2] + 1)?;
    }
    out.flush()
}

/// Read a mesh from a Wavefront OBJ file and build its adjacency.
pub fn read_obj<T: Scalar, P: AsRef<Path>>(path: P) -> HoleEditResult<Mesh<T>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| HoleEditError::io(path, e))?;
    parse_obj(BufReader::new(file)).map_err(|err| match err {
        HoleEditError::Io { source, .. } => HoleEditError::io(path, source),
        other => other,
    })
}

/// Parse `v` and `f` records; everything else is skipped. Polygons are split
/// into a triangle fan and `f` entries may carry `/vt/vn` suffixes.
pub fn parse_obj<T: Scalar, R: BufRead>(reader: R) -> HoleEditResult<Mesh<T>> {
    let mut mesh = Mesh::new();

    for (n, line) in reader.lines().enumerate() {
        let line_no = n + 1;
        let line = line.map_err(|e| HoleEditError::io("<reader>", e))?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let mut xyz = [0.0f64; 3];
                for c in xyz.iter_mut() {
                    *c = parse_field(parts.next(), line_no, "vertex coordinate")?;
                }
                mesh.add_vertex(Point3::from_vals(xyz));
            }
            Some("f") => {
                let ids = parts
                    .map(|tok| parse_index(tok, mesh.vertices.len(), line_no))
                    .collect::<HoleEditResult<Vec<VertexId>>>()?;
                if ids.len() < 3 {
                    return Err(HoleEditError::ObjParse {
                        line: line_no,
                        message: format!("face with {} vertices", ids.len()),
                    });
                }
                for k in 1..ids.len() - 1 {
                    mesh.add_triangle(ids[0], ids[k], ids[k + 1]);
                }
            }
            _ => {}
        }
    }

    let non_manifold = mesh.build_adjacency();
    if non_manifold > 0 {
        warn!(edges = non_manifold, "mesh has non-manifold edges");
    }
    debug!(vertices = mesh.vertices.len(), faces = mesh.faces.len(), "parsed OBJ");
    Ok(mesh)
}

fn parse_field(tok: Option<&str>, line: usize, what: &str) -> HoleEditResult<f64> {
    let tok = tok.ok_or_else(|| HoleEditError::ObjParse {
        line,
        message: format!("missing {what}"),
    })?;
    tok.parse().map_err(|_| HoleEditError::ObjParse {
        line,
        message: format!("bad {what} `{tok}`"),
    })
}

fn parse_index(tok: &str, vertex_count: usize, line: usize) -> HoleEditResult<VertexId> {
    let head = tok.split('/').next().unwrap_or(tok);
    let idx: usize = head.parse().map_err(|_| HoleEditError::ObjParse {
        line,
        message: format!("bad vertex index `{tok}`"),
    })?;
    if idx == 0 || idx > vertex_count {
        return Err(HoleEditError::ObjParse {
            line,
            message: format!("vertex index {idx} out of range"),
        });
    }
    Ok(idx - 1)
}
