pub mod config;
pub mod document;
pub mod goal;
pub mod journal;
mod lenient;
pub mod mood;
pub mod note;
pub mod settings;
pub mod timeline;
pub mod todo;

pub use config::*;
pub use document::*;
pub use goal::*;
pub use journal::*;
pub use mood::*;
pub use note::*;
pub use settings::*;
pub use timeline::*;
pub use todo::*;
