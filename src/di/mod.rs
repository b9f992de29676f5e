//! Startup-time wiring: a type-keyed container plus the `Injectable`
//! constructors that read from it.

mod builder;
mod container;
mod injectable;

pub use builder::ContainerBuilder;
pub use container::Container;
pub use injectable::Injectable;
