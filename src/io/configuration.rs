//! Sampler constants and runtime configuration defaults

// Geometry limits
/// Largest accepted hexagon side length
pub const MAX_SIDE_LENGTH: usize = 1_000;

/// Default hexagon side `a` (flat steps per path)
pub const DEFAULT_SIDE_A: usize = 8;
/// Default hexagon side `b` (up steps per path)
pub const DEFAULT_SIDE_B: usize = 8;
/// Default hexagon side `c` (number of paths)
pub const DEFAULT_SIDE_C: usize = 8;

// Default values for configurable parameters
/// Fixed seed for reproducible sampling
pub const DEFAULT_SEED: u64 = 42;

// Safety valve only; coalescence normally needs far fewer rounds
/// Default cap on doubling rounds before reporting a timeout
pub const DEFAULT_MAX_ROUNDS: usize = 48;

// Enumeration guard for the exhaustive state search
/// Maximum number of path systems the enumerator will visit
pub const MAX_ENUMERATED_STATES: usize = 200_000;

// Uniformity check settings
/// Significance level below which the uniformity check reports a failure
pub const UNIFORMITY_SIGNIFICANCE: f64 = 0.001;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Default PNG output path
pub const DEFAULT_OUTPUT: &str = "tiling.png";
/// Suffix added to the output stem for the rounds animation
pub const VISUALIZATION_SUFFIX: &str = "_rounds";
/// Pixels per lattice unit when rendering
pub const RENDER_SCALE: f64 = 24.0;
/// Blank border around the rendered hexagon in pixels
pub const RENDER_MARGIN: u32 = 8;
/// Outline thickness in pixels
pub const OUTLINE_WIDTH: f32 = 2.0;
/// Fill colours for left, right and top lozenges
pub const FAMILY_COLORS: [[u8; 4]; 3] = [
    [0xd9, 0x5d, 0x39, 0xff],
    [0x2e, 0x86, 0xab, 0xff],
    [0xf2, 0xc1, 0x4e, 0xff],
];
/// Outline colour
pub const OUTLINE_COLOR: [u8; 4] = [0x20, 0x20, 0x20, 0xff];
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 400;
