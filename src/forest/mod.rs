//! Followers, their trees, and the facade that keeps the two in step

pub mod archetype;
pub mod assign;
pub mod core;
pub mod exchange;
pub mod follower;
pub mod mesh;
pub mod state;

pub use archetype::{Archetype, ArchetypeParams, Quality, Season};
pub use assign::{Assignment, archetype_index, name_hash, scale_factor};
pub use self::core::{DepartingTree, ForestCore, ForestStats};
pub use follower::{Follower, Roster, SortOrder};
pub use mesh::{MeshOptions, TreeMesh, build_mesh};
pub use state::{ChapterStats, ForestState, TreeInstance};
