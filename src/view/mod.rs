//! Declarative views: sources, the renderer and its extension points.

mod builtins;
pub mod renderer;
pub mod source;

pub use renderer::{
    EventContext, EventHandler, ProcessContext, Processor, RenderScope, Renderer, StyleHandler,
    WalkState,
};
pub use source::{DirSource, MemorySource, ViewSource};
