//! Progress reporting for long-running algorithms.
//!
//! Iterative operations such as Catmull-Clark subdivision accept a
//! [`Progress`] and call it once per iteration, and once more when done.
//!
//! # Example
//!
//! ```
//! use massing::algo::subdivide::{catmull_clark_with_progress, CatmullClarkOptions};
//! use massing::algo::Progress;
//! use massing::mesh::primitives::create_box;
//!
//! let progress = Progress::new(|current, total, message| {
//!     println!("[{}/{}] {}", current, total, message);
//! });
//!
//! let block = create_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
//! let options = CatmullClarkOptions::new(3);
//! let smooth = catmull_clark_with_progress(&block, &options, &progress).unwrap();
//! assert_eq!(smooth.num_faces(), 6 * 64);
//! ```

/// A progress callback that receives updates during long-running operations.
///
/// The callback receives the current step (0-based), the total number of
/// steps and a short description of the operation. A final call with
/// `current == total` marks completion.
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
