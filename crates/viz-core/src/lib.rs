//! Platform-independent core of the visualizer: band analysis, pointer
//! kinematics, particle physics, palette/scene geometry and the playback
//! state machine. The wasm front end drives these from browser callbacks;
//! everything here builds and tests on the host.

pub mod bands;
pub mod constants;
pub mod error;
pub mod palette;
pub mod particles;
pub mod playback;
pub mod playlist;
pub mod pointer;
pub mod scene;
pub mod timer;
pub mod wav;

pub use bands::*;
pub use error::*;
pub use palette::*;
pub use particles::*;
pub use playback::*;
pub use playlist::*;
pub use pointer::*;
pub use timer::*;
