//! A narrow Wavefront OBJ reader: `v` and `f` lines only, triangle faces,
//! texture/normal indices on a face line are accepted but ignored. This
//! isn't meant to be a general OBJ importer — see `tobj` for that — it's
//! the subset the mesh loader actually needs.

use std::io::BufRead;

use crate::error::Error;
use crate::math::vec3f;

pub struct ParsedObj {
    pub vertices: Vec<crate::math::Vec3f>,
    pub faces: Vec<(usize, usize, usize)>,
}

/// Parse an OBJ document from any buffered reader.
///
/// - `v x y z` lines become vertices, in file order.
/// - `f a b c` lines become triangle faces; each token's vertex index is
///   the text up to its first `/` (texture/normal indices, if present, are
///   discarded), 1-based in the file and converted to 0-based here.
/// - Any other line (comments, `vt`, `vn`, `o`, `g`, blank lines, `f` lines
///   with a face count other than three) is skipped.
pub fn parse<R: BufRead>(reader: R) -> Result<ParsedObj, Error> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(Error::Io)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else { continue };

        match tag {
            "v" => {
                let coords: Vec<f32> = tokens
                    .take(3)
                    .map(|t| {
                        t.parse::<f32>().map_err(|_| Error::ObjParse {
                            line: line_no + 1,
                            message: format!("invalid vertex coordinate {t:?}"),
                        })
                    })
                    .collect::<Result<_, _>>()?;
                if coords.len() != 3 {
                    return Err(Error::ObjParse { line: line_no + 1, message: "vertex line needs 3 coordinates".into() });
                }
                vertices.push(vec3f(coords[0], coords[1], coords[2]));
            }
            "f" => {
                let face_tokens: Vec<&str> = tokens.collect();
                if face_tokens.len() != 3 {
                    continue;
                }
                let mut idx = [0usize; 3];
                for (i, tok) in face_tokens.iter().enumerate() {
                    let vertex_part = tok.split('/').next().unwrap_or(tok);
                    let one_based: i64 = vertex_part.parse().map_err(|_| Error::ObjParse {
                        line: line_no + 1,
                        message: format!("invalid face vertex index {tok:?}"),
                    })?;
                    if one_based < 1 {
                        return Err(Error::ObjParse {
                            line: line_no + 1,
                            message: format!("face vertex index {one_based} is not 1-based"),
                        });
                    }
                    idx[i] = (one_based - 1) as usize;
                }
                faces.push((idx[0], idx[1], idx[2]));
            }
            _ => continue,
        }
    }

    for &(a, b, c) in &faces {
        for i in [a, b, c] {
            if i >= vertices.len() {
                return Err(Error::OutOfBounds { what: "obj face vertex", index: i, len: vertices.len() });
            }
        }
    }

    Ok(ParsedObj { vertices, faces })
}
