//! Detection Constants
//!
//! Parameters of the exponentially weighted moving average and the moving
//! mean-absolute-deviation used to flag transient shocks.

/// Smoothing factor for the moving average of magnitude.
///
/// Small so the baseline follows slow drift (orientation, temperature)
/// but not the transient itself.
pub const EMA_ALPHA: f32 = 0.125;

/// Smoothing factor for the moving mean-absolute-deviation.
///
/// Larger than [`EMA_ALPHA`] so deviation reacts within a few samples.
pub const DEVIATION_BETA: f32 = 0.25;

/// Moving deviation above which a cycle counts as an event.
///
/// Expressed in normalized magnitude units (≈ g).
pub const DETECTION_THRESHOLD: f32 = 0.15;

/// Seed of the moving average.
///
/// Matches the normalized at-rest magnitude; a zero seed would report a
/// spurious deviation on the very first samples.
pub const INITIAL_MOVING_AVERAGE: f32 = 1.0;

/// Seed of the moving deviation.
pub const INITIAL_MOVING_DEVIATION: f32 = 0.0;
