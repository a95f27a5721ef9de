//! Scene description built once from track names, a typeface and generated
//! positions.
//!
//! The scene is renderer-agnostic: materials are stored once and referenced by
//! [`MaterialId`], so every marker shares one emissive material and every
//! label shares one flat-color material. Changing a shared material recolors
//! all objects that use it.

use crate::camera::PerspectiveCamera;
use crate::constants::*;
use crate::font::{TextGeometry, Typeface};
use crate::graph::{build_nearest_neighbor_edges, NeighborEdge};
use crate::positions::PositionGenerator;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialKind {
    /// Lit surface: `color * ambient + emissive`.
    Standard,
    /// Unlit flat color.
    Basic,
    /// Unlit point sprites of a fixed world size.
    Points { size: f32 },
    /// Unlit line segments.
    Line,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: [f32; 3],
    pub emissive: [f32; 3],
}

impl Material {
    pub fn standard(color: [f32; 3], emissive: [f32; 3]) -> Self {
        Self {
            kind: MaterialKind::Standard,
            color,
            emissive,
        }
    }

    pub fn basic(color: [f32; 3]) -> Self {
        Self {
            kind: MaterialKind::Basic,
            color,
            emissive: [0.0; 3],
        }
    }

    pub fn points(color: [f32; 3], size: f32) -> Self {
        Self {
            kind: MaterialKind::Points { size },
            color,
            emissive: [0.0; 3],
        }
    }

    pub fn line(color: [f32; 3]) -> Self {
        Self {
            kind: MaterialKind::Line,
            color,
            emissive: [0.0; 3],
        }
    }
}

/// Sphere marker at a track position.
#[derive(Clone, Debug)]
pub struct Marker {
    pub position: Vec3,
    pub radius: f32,
    pub material: MaterialId,
}

/// Outline text label hanging below its marker.
#[derive(Clone, Debug)]
pub struct Label {
    pub text: String,
    pub anchor: Vec3,
    /// Local-space geometry, already centered and dropped below the anchor.
    pub geometry: TextGeometry,
    /// Euler XYZ orientation, copied from the camera every frame.
    pub rotation: Vec3,
    pub material: MaterialId,
}

impl Label {
    pub fn model_matrix(&self) -> Mat4 {
        let q = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_rotation_translation(q, self.anchor)
    }

    /// World-space line-list vertices.
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        let m = self.model_matrix();
        self.geometry.vertices.iter().map(move |v| m.transform_point3(*v))
    }
}

/// A track: its position and name plus indices of its marker and label.
#[derive(Clone, Debug)]
pub struct TrackPoint {
    pub position: Vec3,
    pub name: String,
    pub marker: usize,
    pub label: usize,
}

/// Line segment drawn for one neighbor edge. Degenerate edges keep a
/// zero-length segment and are skipped by renderers.
#[derive(Clone, Copy, Debug)]
pub struct EdgeSegment {
    pub edge: NeighborEdge,
    pub from: Vec3,
    pub to: Vec3,
}

/// Unlabeled point cloud with a whole-field rotation about Y.
#[derive(Clone, Debug)]
pub struct ParticleCloud {
    pub positions: Vec<f32>,
    pub rotation_y: f32,
    pub material: MaterialId,
}

impl ParticleCloud {
    #[inline]
    pub fn count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl AmbientLight {
    pub fn radiance(&self) -> [f32; 3] {
        self.color.map(|c| c * self.intensity)
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub tracks: Vec<TrackPoint>,
    pub markers: Vec<Marker>,
    pub labels: Vec<Label>,
    pub edges: Vec<EdgeSegment>,
    pub dim_field: ParticleCloud,
    pub bright_field: ParticleCloud,
    pub ambient: AmbientLight,
    pub materials: Vec<Material>,
    pub marker_material: MaterialId,
    pub label_material: MaterialId,
    pub edge_material: MaterialId,
}

impl Scene {
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    #[inline]
    pub fn material_mut(&mut self, id: MaterialId) -> &mut Material {
        &mut self.materials[id.0]
    }

    /// Markers, labels, edge segments, both particle clouds and the light.
    pub fn object_count(&self) -> usize {
        self.markers.len() + self.labels.len() + self.edges.len() + 2 + 1
    }

    /// Flat line-list vertices for every drawable neighbor edge.
    pub fn edge_vertices(&self) -> Vec<Vec3> {
        self.edges
            .iter()
            .filter(|e| e.edge.is_drawable())
            .flat_map(|e| [e.from, e.to])
            .collect()
    }
}

/// Output of [`SceneAssembler`]: the scene and the camera that views it.
pub struct AssembledScene {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
}

/// Builds markers, labels, neighbor edges, particle clouds, light and camera.
pub struct SceneAssembler<'f> {
    font: &'f Typeface,
    aspect: f32,
}

impl<'f> SceneAssembler<'f> {
    pub fn new(font: &'f Typeface) -> Self {
        Self { font, aspect: 1.0 }
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Generate positions and both particle fields, then assemble.
    pub fn assemble<R: Rng>(
        &self,
        names: &[String],
        generator: &mut PositionGenerator<R>,
    ) -> AssembledScene {
        let count = names.len().min(TRACK_COUNT);
        let positions = generator.sphere_positions(count);
        let dim = generator.particle_positions(DIM_PARTICLE_COUNT);
        let bright = generator.particle_positions(BRIGHT_PARTICLE_COUNT);
        self.assemble_at(&names[..count], &positions, dim, bright)
    }

    /// Assemble from explicit positions. Names and positions pair up by
    /// index; surplus entries on either side are ignored.
    pub fn assemble_at(
        &self,
        names: &[String],
        positions: &[Vec3],
        dim_particles: Vec<f32>,
        bright_particles: Vec<f32>,
    ) -> AssembledScene {
        let count = names.len().min(positions.len());
        if names.len() != positions.len() {
            log::warn!(
                "[scene] {} names for {} positions; using {}",
                names.len(),
                positions.len(),
                count
            );
        }
        let positions = &positions[..count];

        let camera = PerspectiveCamera::scene_default(self.aspect);

        let mut materials = Vec::with_capacity(5);
        let mut add = |m: Material| {
            materials.push(m);
            MaterialId(materials.len() - 1)
        };
        let marker_material = add(Material::standard(MARKER_BASE_COLOR, [0.0; 3]));
        let label_material = add(Material::basic(LABEL_COLOR));
        let edge_material = add(Material::line(EDGE_COLOR));
        let dim_material = add(Material::points(PARTICLE_COLOR, PARTICLE_SIZE));
        let bright_material = add(Material::points(PARTICLE_COLOR, PARTICLE_SIZE));

        let mut tracks = Vec::with_capacity(count);
        let mut markers = Vec::with_capacity(count);
        let mut labels = Vec::with_capacity(count);
        for (name, &position) in names.iter().zip(positions) {
            markers.push(Marker {
                position,
                radius: MARKER_RADIUS,
                material: marker_material,
            });
            labels.push(Label {
                text: name.clone(),
                anchor: position,
                geometry: self.label_geometry(name),
                rotation: camera.state.rotation,
                material: label_material,
            });
            tracks.push(TrackPoint {
                position,
                name: name.clone(),
                marker: markers.len() - 1,
                label: labels.len() - 1,
            });
        }

        let edges = build_nearest_neighbor_edges(positions)
            .into_iter()
            .map(|edge| EdgeSegment {
                edge,
                from: positions[edge.source],
                to: positions[edge.nearest],
            })
            .collect::<Vec<_>>();

        let scene = Scene {
            tracks,
            markers,
            labels,
            edges,
            dim_field: ParticleCloud {
                positions: dim_particles,
                rotation_y: 0.0,
                material: dim_material,
            },
            bright_field: ParticleCloud {
                positions: bright_particles,
                rotation_y: 0.0,
                material: bright_material,
            },
            ambient: AmbientLight {
                color: AMBIENT_COLOR,
                intensity: AMBIENT_INTENSITY,
            },
            materials,
            marker_material,
            label_material,
            edge_material,
        };
        log::info!(
            "[scene] tracks={} edges={} particles={}+{}",
            scene.tracks.len(),
            scene.edges.len(),
            scene.dim_field.count(),
            scene.bright_field.count()
        );
        AssembledScene { scene, camera }
    }

    fn label_geometry(&self, text: &str) -> TextGeometry {
        let mut geom = TextGeometry::build(self.font, text, LABEL_SIZE);
        let center_x = geom.min.x + 0.5 * geom.width();
        geom.translate(Vec3::new(-center_x, -LABEL_DROP, 0.0));
        geom
    }
}
