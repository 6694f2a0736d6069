use glam::{EulerRot, Mat4, Quat, Vec3};

use super::geometry::WireGeometry;
use crate::core::canvas::Rgba;

/// Index into [`Scene::geometries`]
pub type GeometryId = usize;
/// Index into [`Scene::nodes`]
pub type NodeId = usize;

/// Position, Euler rotation (XYZ order, radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Per-instance orbit state of a marker; mutated every frame by the driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerOrbit {
    /// Position at creation
    pub origin: Vec3,
    /// Current angle on the orbit circle (radians)
    pub angle: f32,
    /// Angle advanced per frame (radians)
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    Mesh,
    Marker(MarkerOrbit),
    Line,
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: &'static str,
    pub geometry: GeometryId,
    pub transform: Transform,
    /// Line colour, alpha is the material opacity
    pub color: Rgba,
    pub kind: NodeKind,
}

/// Flat scene graph: every node hangs off the root and references shared
/// geometry by id. Nodes are never removed.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    geometries: Vec<WireGeometry>,
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_geometry(&mut self, geometry: WireGeometry) -> GeometryId {
        self.geometries.push(geometry);
        self.geometries.len() - 1
    }

    pub fn add(&mut self, node: SceneNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn geometries(&self) -> &[WireGeometry] {
        &self.geometries
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&WireGeometry> {
        self.geometries.get(id)
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> {
        self.nodes.iter_mut()
    }

    /// Markers with their orbit annotation
    pub fn markers(&self) -> impl Iterator<Item = (&SceneNode, &MarkerOrbit)> {
        self.nodes.iter().filter_map(|node| match &node.kind {
            NodeKind::Marker(orbit) => Some((node, orbit)),
            _ => None,
        })
    }

    /// Total segments drawn per frame
    pub fn segment_count(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(|n| self.geometries.get(n.geometry))
            .map(WireGeometry::segment_count)
            .sum()
    }
}
