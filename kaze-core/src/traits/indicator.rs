//! Activity indicator trait

/// Visual feedback while a command is being sent
///
/// Implementations handle polarity; `on` always means visible.
pub trait Indicator {
    fn on(&mut self);

    fn off(&mut self);
}
