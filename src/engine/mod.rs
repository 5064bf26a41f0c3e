pub mod headless;
pub mod host;
pub mod script;
pub mod time;

pub use headless::HeadlessHost;
pub use host::{Host, HostEnv, TextureHandle};
pub use script::EventScript;
pub use time::FrameClock;
