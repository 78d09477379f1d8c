mod component;
mod data;
mod graph;
mod method;

pub use self::component::*;
pub use self::data::*;
pub use self::graph::*;
pub use self::method::*;
