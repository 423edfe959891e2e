//! Tessa3D core library: stateless geometry and camera math
//!
//! Recursive subdivision generators (gasket, tetrahedron, geodesic sphere),
//! model/view/projection transforms, a yaw/pitch/roll camera basis, and the
//! Phong lighting model, all working on plain nalgebra types. Rendering
//! front ends consume these through an immutable per-frame parameter
//! snapshot.

pub mod error;
pub mod geometry;
pub mod lighting;
pub mod orientation;
pub mod projection;
pub mod scene;
pub mod subdivision;
pub mod transform;

// Re-export commonly used types
pub use error::{GeometryError, GeometryResult};
pub use geometry::{Mesh, Triangle, Vertex};
pub use lighting::{Light, Material};
pub use orientation::{Attitude, CameraBasis};
pub use projection::{Camera, ProjectionMode};
pub use scene::{FrameMatrices, RenderMode, RenderParams};
pub use transform::{ModelTransform, RotationState, ScaleAxis, Transform};
