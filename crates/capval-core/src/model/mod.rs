pub mod collection;
pub mod document;
pub mod element;
pub mod graph;
pub mod level;
pub mod properties;
pub mod relationship;

pub use collection::{Collection, Link};
pub use element::{Element, ElementType};
pub use graph::Model;
pub use level::{Level, LEVEL_PROPERTY};
pub use properties::Properties;
pub use relationship::{Relationship, RelationshipType};
