mod binding;
mod definition;
mod error;
mod library;
mod limb;
mod table;

pub use binding::{Side, SkeletonBinding};
pub use definition::{GestureDefinition, DEFAULT_ARMATURE};
pub use error::{HandsignGestureError, Result};
pub use library::{BuiltinGestures, GestureDirectory, GestureSource};
pub use limb::{LimbAccent, LimbOverride};
pub use table::{JointAngleTable, JointId};
