// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod document;
pub mod forms;
pub mod mailto;
pub mod model;
pub mod scroll;
pub mod state;

pub use document::*;
pub use forms::*;
pub use mailto::*;
pub use model::*;
pub use scroll::*;
pub use state::*;
