//! PLY assembly shared by all structures.
//!
//! Vertices carry `x y z`, optionally `red green blue` and one float scalar
//! property. Triangles go in a `face` element, line segments in an `edge`
//! element.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use gempy_viewer_core::{DVec3, Result, ViewerError};
use glam::Vec3;
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};

/// Incremental builder of a [`Ply`] document.
#[derive(Debug, Default)]
pub struct PlyBuilder {
    comment: Option<String>,
    positions: Vec<DVec3>,
    colors: Option<Vec<Vec3>>,
    scalar: Option<(String, Vec<f64>)>,
    faces: Vec<[u32; 3]>,
    edges: Vec<[u32; 2]>,
}

impl PlyBuilder {
    pub fn new(positions: Vec<DVec3>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Per-vertex colors; must match the number of vertices.
    pub fn colors(mut self, colors: Vec<Vec3>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// One per-vertex scalar property.
    pub fn scalar(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.scalar = Some((name.into(), values));
        self
    }

    pub fn faces(mut self, faces: Vec<[u32; 3]>) -> Self {
        self.faces = faces;
        self
    }

    pub fn edges(mut self, edges: Vec<[u32; 2]>) -> Self {
        self.edges = edges;
        self
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual == self.positions.len() {
            Ok(())
        } else {
            Err(ViewerError::SizeMismatch {
                expected: self.positions.len(),
                actual,
            })
        }
    }

    /// Assembles the document.
    pub fn build(self) -> Result<Ply<DefaultElement>> {
        if let Some(colors) = &self.colors {
            self.check_len(colors.len())?;
        }
        if let Some((_, values)) = &self.scalar {
            self.check_len(values.len())?;
        }

        let mut ply = Ply::<DefaultElement>::new();
        ply.header.encoding = Encoding::Ascii;
        if let Some(comment) = &self.comment {
            ply.header.comments.push(comment.clone());
        }

        let mut vertex_def = ElementDef::new("vertex".to_string());
        for axis in ["x", "y", "z"] {
            vertex_def.properties.add(PropertyDef::new(
                axis.to_string(),
                PropertyType::Scalar(ScalarType::Float),
            ));
        }
        if self.colors.is_some() {
            for channel in ["red", "green", "blue"] {
                vertex_def.properties.add(PropertyDef::new(
                    channel.to_string(),
                    PropertyType::Scalar(ScalarType::UChar),
                ));
            }
        }
        if let Some((name, _)) = &self.scalar {
            vertex_def.properties.add(PropertyDef::new(
                name.clone(),
                PropertyType::Scalar(ScalarType::Float),
            ));
        }
        ply.header.elements.add(vertex_def);

        let mut vertices = Vec::with_capacity(self.positions.len());
        for (i, p) in self.positions.iter().enumerate() {
            let mut vertex = DefaultElement::new();
            vertex.insert("x".to_string(), Property::Float(p.x as f32));
            vertex.insert("y".to_string(), Property::Float(p.y as f32));
            vertex.insert("z".to_string(), Property::Float(p.z as f32));
            if let Some(colors) = &self.colors {
                let c = (colors[i].clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
                vertex.insert("red".to_string(), Property::UChar(c.x as u8));
                vertex.insert("green".to_string(), Property::UChar(c.y as u8));
                vertex.insert("blue".to_string(), Property::UChar(c.z as u8));
            }
            if let Some((name, values)) = &self.scalar {
                vertex.insert(name.clone(), Property::Float(values[i] as f32));
            }
            vertices.push(vertex);
        }
        ply.payload.insert("vertex".to_string(), vertices);

        if !self.faces.is_empty() {
            let mut face_def = ElementDef::new("face".to_string());
            face_def.properties.add(PropertyDef::new(
                "vertex_indices".to_string(),
                PropertyType::List(ScalarType::UChar, ScalarType::Int),
            ));
            ply.header.elements.add(face_def);
            let faces = self
                .faces
                .iter()
                .map(|f| {
                    let mut face = DefaultElement::new();
                    face.insert(
                        "vertex_indices".to_string(),
                        Property::ListInt(f.iter().map(|&i| i as i32).collect()),
                    );
                    face
                })
                .collect();
            ply.payload.insert("face".to_string(), faces);
        }

        if !self.edges.is_empty() {
            let mut edge_def = ElementDef::new("edge".to_string());
            for end in ["vertex1", "vertex2"] {
                edge_def.properties.add(PropertyDef::new(
                    end.to_string(),
                    PropertyType::Scalar(ScalarType::Int),
                ));
            }
            ply.header.elements.add(edge_def);
            let edges = self
                .edges
                .iter()
                .map(|[a, b]| {
                    let mut edge = DefaultElement::new();
                    edge.insert("vertex1".to_string(), Property::Int(*a as i32));
                    edge.insert("vertex2".to_string(), Property::Int(*b as i32));
                    edge
                })
                .collect();
            ply.payload.insert("edge".to_string(), edges);
        }

        ply.make_consistent()
            .map_err(|e| ViewerError::RenderError(format!("inconsistent PLY: {e:?}")))?;
        Ok(ply)
    }
}
