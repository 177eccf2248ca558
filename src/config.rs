/// Behavior switches for [`crate::TreeSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeSessionConfig {
    /// Carries expand flags over to the hierarchy rebuilt after a move.
    /// When disabled every rebuild starts fully expanded.
    pub preserve_expansion: bool,
    /// Recomputes the informational `level` of the records after a move.
    pub relevel_on_move: bool,
}

impl TreeSessionConfig {
    pub const fn new() -> Self {
        Self {
            preserve_expansion: true,
            relevel_on_move: true,
        }
    }

    /// Rebuilds expanded after every move and leaves `level` untouched.
    pub const fn reset_on_rebuild() -> Self {
        Self {
            preserve_expansion: false,
            relevel_on_move: false,
        }
    }
}

impl Default for TreeSessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
