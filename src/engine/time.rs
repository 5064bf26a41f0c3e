/// Fixed-step frame clock. Every tick advances time by the same `dt`, which
/// keeps headless runs and tests reproducible.
#[derive(Clone, Debug)]
pub struct FrameClock {
    pub dt: f32,
    /// Frames ticked so far.
    pub frame: u64,
    /// Seconds of simulated time.
    pub elapsed: f32,
}

impl FrameClock {
    pub const SIXTY_HZ: f32 = 1.0 / 60.0;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            frame: 0,
            elapsed: 0.0,
        }
    }

    pub fn tick(&mut self) {
        self.frame += 1;
        self.elapsed += self.dt;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Self::SIXTY_HZ)
    }
}
